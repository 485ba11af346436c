//! symbotctl - terminal client for SymbolicBot
//!
//! Starts an interactive chat by default; `ask` answers one message.

use anyhow::Result;
use clap::Parser;
use symbot_common::Config;
use symbotctl::cli::{Cli, Commands};
use symbotctl::render::Renderer;
use symbotctl::{app, logging, repl};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    logging::init(cli.log_level.as_deref().unwrap_or(&config.log.level));

    match cli.command_or_default() {
        Commands::Chat => {
            let mut resolver = app::build_resolver(&config, cli.responses.as_deref()).await?;
            repl::start_repl(&mut resolver, &Renderer::for_stdout()).await
        }
        Commands::Ask { text, json } => {
            let mut resolver = app::build_resolver(&config, cli.responses.as_deref()).await?;
            let answer = resolver.resolve(&text.join(" ")).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&answer)?);
            } else {
                println!("{}", Renderer::for_stdout().render(&answer));
            }
            Ok(())
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}
