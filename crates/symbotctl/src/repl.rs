//! REPL - interactive chat loop.
//!
//! One line in, one rendered answer out. Blank lines are ignored;
//! `exit`, `quit` or end of input end the session.

use crate::render::Renderer;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::io::Write;
use symbot_common::Resolver;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

const EXIT_WORDS: &[&str] = &["exit", "quit"];

const WELCOME: &str =
    "Hi! I'm SymbolicBot. Ask me about anything, or type 'help' to see what I can do.";

fn is_exit(line: &str) -> bool {
    let lowered = line.to_lowercase();
    EXIT_WORDS.contains(&lowered.as_str())
}

/// Chat on stdin/stdout until exit or EOF
pub async fn start_repl(resolver: &mut Resolver, renderer: &Renderer) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_session(resolver, renderer, stdin, &mut stdout).await
}

/// Main loop over any line source (factored out for tests)
pub async fn run_session<R, W>(
    resolver: &mut Resolver,
    renderer: &Renderer,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}\n", renderer.render_text(WELCOME))?;

    let mut lines = input.lines();
    let mut turns = 0usize;

    loop {
        print_prompt(out, renderer)?;

        let Some(line) = lines.next_line().await.context("Error reading input")? else {
            debug!("End of input");
            break;
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_exit(line) {
            break;
        }

        let answer = resolver.resolve(line).await;
        turns += 1;
        writeln!(out, "{}\n", renderer.render(&answer))?;
    }

    writeln!(out)?;
    info!("Chat session ended after {} turns", turns);
    Ok(())
}

fn print_prompt<W: Write>(out: &mut W, renderer: &Renderer) -> Result<()> {
    if renderer.color() {
        write!(out, "{} ", "you>".cyan().bold())?;
    } else {
        write!(out, "you> ")?;
    }
    out.flush()?;
    Ok(())
}
