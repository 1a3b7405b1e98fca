//! Passphrase negotiation
//!
//! Asks for the passphrase of an existing key, or for a new passphrase
//! with confirmation. Input is read from the controlling terminal with
//! echo disabled, so piping a seed phrase through stdin never doubles as
//! passphrase input.

use std::fmt;
use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// A passphrase. Empty means "no passphrase".
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Passphrase(Zeroizing<Vec<u8>>);

impl Passphrase {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Passphrase {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }
}

impl From<&str> for Passphrase {
    fn from(s: &str) -> Self {
        Self::from(s.as_bytes().to_vec())
    }
}

impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Passphrase(<redacted>)")
    }
}

/// Source of masked secret input.
pub trait SecretReader {
    /// Show `prompt` and read one line without echoing it.
    fn read_secret(&mut self, prompt: &str) -> Result<Passphrase>;
}

/// Prompt/confirm protocol on top of a [`SecretReader`].
pub struct PassphraseNegotiator<R> {
    reader: R,
}

impl<R: SecretReader> PassphraseNegotiator<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Ask once for the passphrase that unlocks `context` (usually a path).
    pub fn ask_existing(&mut self, context: &str) -> Result<Passphrase> {
        self.reader
            .read_secret(&format!("Enter the passphrase to unlock {context:?}: "))
    }

    /// Ask for a new passphrase twice; both entries must match.
    ///
    /// An empty passphrase is accepted and means the key is stored
    /// unencrypted.
    pub fn ask_new(&mut self) -> Result<Passphrase> {
        let pass = self
            .reader
            .read_secret("Enter new passphrase (empty for no passphrase): ")?;
        let confirm = self.reader.read_secret("Enter same passphrase again: ")?;

        if pass != confirm {
            return Err(Error::PassphraseMismatch);
        }
        Ok(pass)
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Reads secrets from the controlling terminal in raw mode.
///
/// Prompts are written to `out` (stderr by default). Key events come from
/// the terminal device itself, even when stdin is redirected.
pub struct TerminalReader<W = io::Stderr> {
    out: W,
}

impl TerminalReader {
    pub fn stderr() -> Self {
        Self { out: io::stderr() }
    }
}

impl<W: Write> TerminalReader<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

/// Leaves raw mode when dropped, including on early return.
struct RawMode;

impl RawMode {
    fn enable() -> Result<Self> {
        crossterm::terminal::enable_raw_mode()
            .map_err(|e| Error::Prompt(format!("could not open tty: {e}")))?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = crossterm::terminal::disable_raw_mode() {
            log::warn!("failed to restore terminal mode: {e}");
        }
    }
}

fn read_masked_line() -> Result<Passphrase> {
    let _raw = RawMode::enable()?;
    let mut typed = Zeroizing::new(String::new());

    loop {
        let ev = event::read().map_err(|e| Error::Prompt(e.to_string()))?;
        let Event::Key(key) = ev else { continue };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(Error::Prompt("interrupted".to_string()));
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
            KeyCode::Enter => break,
            KeyCode::Backspace => {
                typed.pop();
            }
            KeyCode::Char(c) => typed.push(c),
            _ => {}
        }
    }

    Ok(Passphrase::from(typed.as_bytes().to_vec()))
}

impl<W: Write> SecretReader for TerminalReader<W> {
    fn read_secret(&mut self, prompt: &str) -> Result<Passphrase> {
        let io_err = |e: io::Error| Error::Prompt(e.to_string());

        write!(self.out, "{prompt}").map_err(io_err)?;
        self.out.flush().map_err(io_err)?;

        let result = read_masked_line();

        // Raw mode swallowed the newline the user typed.
        writeln!(self.out).map_err(io_err)?;
        result
    }
}
