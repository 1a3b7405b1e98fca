//! Terminal presentation of backup and restore results.
//!
//! Whether stdout is interactive is decided once at startup and stored in
//! the [`Presenter`]. Non-interactive output is the bare seed phrase, so it
//! can be redirected to a file or piped straight into `melt restore`.

use std::io::{self, IsTerminal};

use crossterm::style::{Color, Stylize};
use melt_core::language::{WordlistTag, DEFAULT_LANGUAGE};
use unicode_width::UnicodeWidthStr;

/// Widest layout used, even on wider terminals.
pub const MAX_WIDTH: usize = 72;

/// Left margin of every block.
const MARGIN: usize = 2;
/// Horizontal padding inside the phrase block.
const PADDING: usize = 2;
const LINE_CONTINUATION: &str = " \\";

const VIOLET: Color = Color::Rgb { r: 0x6B, g: 0x50, b: 0xFF };
const PHRASE_BG: Color = Color::Rgb { r: 0x1B, g: 0x17, b: 0x31 };
const COMMAND_FG: Color = Color::Rgb { r: 0xFF, g: 0x5E, b: 0x8E };
const COMMAND_BG: Color = Color::Rgb { r: 0x1F, g: 0x1F, b: 0x1F };

#[derive(Debug, Clone, Copy)]
pub struct Presenter {
    interactive: bool,
    color: bool,
    width: usize,
}

impl Presenter {
    /// Inspect stdout and the terminal size.
    pub fn detect() -> Self {
        let interactive = io::stdout().is_terminal();
        let color = interactive && std::env::var_os("NO_COLOR").is_none();
        Self::new(interactive, color, terminal_width())
    }

    pub fn new(interactive: bool, color: bool, width: usize) -> Self {
        Self {
            interactive,
            color,
            width: width.min(MAX_WIDTH),
        }
    }

    /// Everything printed to stdout after a successful backup.
    pub fn backup_output(&self, phrase: &str, program: &str, wordlist: WordlistTag) -> String {
        if !self.interactive {
            return phrase.to_string();
        }

        let mut out = String::from("\n");
        self.paragraph(
            &mut out,
            &format!(
                "OK! Your key has been melted down to the seed phrase below. \
                 Store it somewhere safe. You can use {program} to recover your key at any time."
            ),
            Some(program),
        );
        self.phrase_block(&mut out, phrase);
        self.paragraph(&mut out, "To recreate this key run:", None);
        self.restore_hint(&mut out, phrase, program, wordlist);
        out.push('\n');
        out
    }

    /// Confirmation after writing a key pair.
    pub fn restore_success(&self, private: &str, public: &str) -> String {
        let private = self.key_path(private);
        let public = self.key_path(public);
        format!(
            "\n{}Successfully restored keys to {private} and {public}\n",
            margin()
        )
    }

    fn paragraph(&self, out: &mut String, text: &str, highlight: Option<&str>) {
        for line in wrap(text, self.width.saturating_sub(MARGIN)) {
            out.push_str(&margin());
            match highlight {
                Some(word) if self.color => {
                    let styled = word.with(COMMAND_FG).on(COMMAND_BG).to_string();
                    out.push_str(&line.replacen(word, &styled, 1));
                }
                _ => out.push_str(&line),
            }
            out.push('\n');
        }
        out.push('\n');
    }

    fn phrase_block(&self, out: &mut String, phrase: &str) {
        let inner = self.width.saturating_sub(MARGIN + 2 * PADDING);
        let block = self.width.saturating_sub(MARGIN);

        let mut rows = vec![String::new()];
        rows.extend(
            wrap(phrase, inner)
                .into_iter()
                .map(|l| format!("{}{l}", " ".repeat(PADDING))),
        );
        rows.push(String::new());

        for row in rows {
            let fill = block.saturating_sub(row.width());
            let padded = format!("{row}{}", " ".repeat(fill));
            out.push_str(&margin());
            if self.color {
                out.push_str(&padded.with(VIOLET).on(PHRASE_BG).to_string());
            } else {
                out.push_str(padded.trim_end());
            }
            out.push('\n');
        }
        out.push('\n');
    }

    fn restore_hint(&self, out: &mut String, phrase: &str, program: &str, wordlist: WordlistTag) {
        let language = if wordlist.tag() == DEFAULT_LANGUAGE {
            String::new()
        } else {
            format!(" --language {}", wordlist.tag())
        };
        let command = format!("{program} restore{language} ./my-key --seed \"{phrase}\"");
        let width = self
            .width
            .saturating_sub(LINE_CONTINUATION.len() + 2 * MARGIN);

        let lines = wrap(&command, width);
        let last = lines.len().saturating_sub(1);
        for (i, line) in lines.iter().enumerate() {
            out.push_str(&margin());
            out.push_str(line);
            if i < last {
                out.push_str(LINE_CONTINUATION);
                out.push('\n');
            }
        }
        out.push('\n');
    }

    fn key_path(&self, path: &str) -> String {
        if self.color {
            path.with(VIOLET).to_string()
        } else {
            path.to_string()
        }
    }
}

fn margin() -> String {
    " ".repeat(MARGIN)
}

/// Terminal columns, capped at [`MAX_WIDTH`].
pub fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((cols, _)) if cols > 0 => (cols as usize).min(MAX_WIDTH),
        _ => MAX_WIDTH,
    }
}

/// Greedy word wrap on whitespace, measured in terminal columns so wide
/// CJK words count double. Words longer than `width` get a line of their
/// own and are never split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.width() + 1 + word.width() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
