//! Key and seed phrase input
//!
//! `-`, an empty path, or a redirected stdin all mean "read standard
//! input"; anything else names a file.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Bytes read from a key file or stream.
pub type RawKeyBytes = Zeroizing<Vec<u8>>;

/// Where input comes from after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    Stdin,
    File(PathBuf),
}

impl KeyInput {
    /// Human-readable name for prompts and errors.
    pub fn display_name(&self) -> String {
        match self {
            Self::Stdin => "<stdin>".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// Opens key material using the file-or-stdin rule.
pub struct KeySource<S = io::Stdin> {
    stdin: S,
    stdin_is_terminal: bool,
}

impl KeySource {
    /// Use the process stdin. `stdin_is_terminal` is decided once by the caller.
    pub fn from_stdin(stdin_is_terminal: bool) -> Self {
        Self::new(io::stdin(), stdin_is_terminal)
    }
}

impl<S: Read> KeySource<S> {
    pub fn new(stdin: S, stdin_is_terminal: bool) -> Self {
        Self {
            stdin,
            stdin_is_terminal,
        }
    }

    /// Decide where `path` should be read from.
    pub fn resolve(&self, path: &str) -> KeyInput {
        if path == "-" || path.is_empty() || !self.stdin_is_terminal {
            KeyInput::Stdin
        } else {
            KeyInput::File(PathBuf::from(path))
        }
    }

    /// Read everything from the input `path` resolves to.
    pub fn read(&mut self, path: &str) -> Result<RawKeyBytes> {
        let input = self.resolve(path);
        let mut buf = Zeroizing::new(Vec::new());

        let res = match &input {
            KeyInput::Stdin => self.stdin.read_to_end(&mut buf).map(|_| ()),
            KeyInput::File(p) => {
                fs::File::open(p).and_then(|mut f| f.read_to_end(&mut buf).map(|_| ()))
            }
        };

        match res {
            Ok(()) => {
                log::debug!("read {} bytes from {}", buf.len(), input.display_name());
                Ok(buf)
            }
            Err(source) => Err(Error::KeyRead {
                path: input.display_name(),
                source,
            }),
        }
    }

    /// Read a seed phrase given on the command line.
    ///
    /// The value is treated like a key path first. If that input cannot be
    /// opened, the value itself is the phrase. A literal value also wins over
    /// a redirected stdin that turns out to be blank.
    pub fn read_phrase(&mut self, value: &str) -> String {
        let literal_allowed = !(value == "-" || value.is_empty());
        match self.read(value) {
            Ok(bytes)
                if literal_allowed
                    && !self.stdin_is_terminal
                    && bytes.iter().all(u8::is_ascii_whitespace) =>
            {
                log::debug!("redirected stdin is blank, using seed value verbatim");
                value.to_string()
            }
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                log::debug!("seed value is not readable input ({e}), using it verbatim");
                value.to_string()
            }
        }
    }
}
