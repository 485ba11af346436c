//! Terminal rendering of answers.
//!
//! Answer text carries a small HTML subset: `<br>` line breaks and `<b>`
//! emphasis. Breaks become newlines, bold becomes ANSI bold when colour is
//! on, and any other tag is dropped. Image, source and license links are
//! printed as trailer lines under the text.

use once_cell::sync::Lazy;
use owo_colors::OwoColorize;
use regex::{Captures, Regex};
use std::io::IsTerminal;
use symbot_common::Answer;

static BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid regex"));
static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<b>(.*?)</b>").expect("valid regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

pub const DEFAULT_WIDTH: usize = 80;

const ENTITIES: &[(&str, &str)] = &[
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&nbsp;", " "),
    ("&amp;", "&"),
];

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    width: usize,
    color: bool,
}

impl Renderer {
    pub fn new(width: usize, color: bool) -> Self {
        Self {
            width: width.max(20),
            color,
        }
    }

    /// Colour only when stdout is a terminal
    pub fn for_stdout() -> Self {
        Self::new(DEFAULT_WIDTH, std::io::stdout().is_terminal())
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// Render the markup in an answer's text as wrapped terminal lines
    pub fn render_text(&self, text: &str) -> String {
        let text = BREAK_RE.replace_all(text, "\n");
        let text = BOLD_RE.replace_all(&text, |caps: &Captures| {
            let inner = TAG_RE.replace_all(&caps[1], "");
            if self.color {
                inner.bold().to_string()
            } else {
                inner.into_owned()
            }
        });
        let text = decode_entities(&TAG_RE.replace_all(&text, ""));

        text.split('\n')
            .map(|line| {
                if line.trim().is_empty() {
                    String::new()
                } else {
                    textwrap::wrap(line.trim_end(), self.width).join("\n")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Text plus attribution trailer
    pub fn render(&self, answer: &Answer) -> String {
        let mut out = self.render_text(&answer.text);

        let trailer = [
            ("Image", answer.image.as_deref()),
            ("Source", answer.source.as_deref()),
            ("License", answer.license.as_deref()),
        ];
        for (label, value) in trailer {
            let Some(value) = value else { continue };
            let line = format!("{}: {}", label, value);
            out.push('\n');
            if self.color {
                out.push_str(&line.dimmed().to_string());
            } else {
                out.push_str(&line);
            }
        }

        out
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, false)
    }
}

fn decode_entities(text: &str) -> String {
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, plain)| acc.replace(entity, plain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breaks_and_bold_without_color() {
        let renderer = Renderer::default();
        assert_eq!(
            renderer.render_text("Commands:<br>- <b>help</b>: menu<BR/>[END]"),
            "Commands:\n- help: menu\n[END]"
        );
    }

    #[test]
    fn test_bold_with_color() {
        let renderer = Renderer::new(80, true);
        let out = renderer.render_text("<b>help</b> me");
        assert!(out.contains("\u{1b}[1m"));
        assert!(out.contains("help"));
        assert!(!out.contains("<b>"));
    }

    #[test]
    fn test_unknown_tags_stripped_and_entities_decoded() {
        let renderer = Renderer::default();
        assert_eq!(
            renderer.render_text("<p><i>Ada</i> &amp; Charles</p>"),
            "Ada & Charles"
        );
    }

    #[test]
    fn test_long_lines_wrap() {
        let renderer = Renderer::new(20, false);
        let out = renderer.render_text("one two three four five six seven eight nine ten");
        assert!(out.lines().count() > 1);
        assert!(out.lines().all(|line| line.chars().count() <= 20));
    }

    #[test]
    fn test_blank_lines_preserved() {
        let renderer = Renderer::default();
        assert_eq!(renderer.render_text("a<br><br>b"), "a\n\nb");
    }

    #[test]
    fn test_attribution_trailer() {
        let answer = Answer::text("Ada was a mathematician.")
            .with_source("https://en.wikipedia.org/wiki/Ada%20Lovelace")
            .with_license("https://creativecommons.org/licenses/by-sa/4.0/");
        let out = Renderer::default().render(&answer);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Ada was a mathematician.");
        assert_eq!(lines[1], "Source: https://en.wikipedia.org/wiki/Ada%20Lovelace");
        assert_eq!(lines[2], "License: https://creativecommons.org/licenses/by-sa/4.0/");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_plain_answer_has_no_trailer() {
        let out = Renderer::default().render(&Answer::text("Hello"));
        assert_eq!(out, "Hello");
    }
}
