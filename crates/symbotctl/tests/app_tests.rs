//! Start-up wiring: shipped dataset, config files and resolver construction.
//! None of these turns reach the network.

use std::io::Write;
use std::path::{Path, PathBuf};
use symbot_common::resolver::HELP_TEXT;
use symbot_common::{CannedReplies, Config};
use symbotctl::app::{build_resolver, load_canned, BUNDLED_RESPONSES};
use symbotctl::render::Renderer;

fn shipped_dataset() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join("responses.json")
}

#[tokio::test]
async fn test_shipped_dataset_parses() {
    let replies = CannedReplies::load(&shipped_dataset()).await.unwrap();
    assert!(replies.len() >= 4);
}

#[tokio::test]
async fn test_default_config_uses_bundled_dataset() {
    let bundled = load_canned(&Config::default(), None).await;
    let shipped = CannedReplies::load(&shipped_dataset()).await.unwrap();
    assert_eq!(bundled.len(), shipped.len());
    assert_eq!(
        BUNDLED_RESPONSES,
        std::fs::read_to_string(shipped_dataset()).unwrap()
    );
}

#[tokio::test]
async fn test_default_resolver_answers_from_bundled_dataset() {
    let mut resolver = build_resolver(&Config::default(), None).await.unwrap();
    let answer = resolver.resolve("Goodbye for now").await;
    assert_eq!(answer.text, "Goodbye! Come back any time you want to chat.");
}

#[tokio::test]
async fn test_resolver_uses_dataset_override() {
    let mut resolver = build_resolver(&Config::default(), Some(&shipped_dataset()))
        .await
        .unwrap();
    let answer = resolver.resolve("Goodbye for now").await;
    assert_eq!(answer.text, "Goodbye! Come back any time you want to chat.");
}

#[tokio::test]
async fn test_missing_dataset_degrades() {
    let mut resolver = build_resolver(&Config::default(), Some(Path::new("/nonexistent/r.json")))
        .await
        .unwrap();
    // Canned replies are off, so this reaches the reflection stage
    let answer = resolver.resolve("you are funny").await;
    assert_eq!(answer.text, "Why do you believe I am funny?");
    assert_eq!(resolver.resolve("help").await.text, HELP_TEXT);
}

#[tokio::test]
async fn test_dataset_path_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "[responses]\npath = {:?}\n\n[log]\nlevel = \"debug\"\n",
        shipped_dataset().display().to_string()
    )
    .unwrap();

    let config = Config::load(Some(file.path())).unwrap();
    assert_eq!(config.log.level, "debug");

    let mut resolver = build_resolver(&config, None).await.unwrap();
    let answer = resolver.resolve("thanks a lot").await;
    assert!(["You're welcome!", "Happy to help."].contains(&answer.text.as_str()));
}

#[test]
fn test_help_renders_as_plain_lines() {
    let out = Renderer::default().render_text(HELP_TEXT);
    assert!(out.starts_with("Here are the commands you can use:\n- help: Displays this help menu."));
    assert!(out.ends_with("[END OF HELP MENU]"));
    assert!(!out.contains('<'));
}
