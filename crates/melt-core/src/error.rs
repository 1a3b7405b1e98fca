//! Error kinds surfaced by the backup and restore pipelines.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not read key from {path}: {source}")]
    KeyRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse key: {0}")]
    KeyParse(String),
    #[error("key is encrypted and needs a passphrase")]
    PassphraseRequired,
    #[error("incorrect passphrase")]
    IncorrectPassphrase,
    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(String),
    #[error("could not encode key as seed phrase: {0}")]
    Encode(String),
    #[error("invalid seed phrase: {0}")]
    MnemonicDecode(String),
    #[error("this language is not supported: {0:?}")]
    UnsupportedLanguage(String),
    #[error("passphrases do not match")]
    PassphraseMismatch,
    #[error("could not marshal key: {0}")]
    KeyMarshal(String),
    #[error("failed to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not read passphrase: {0}")]
    Prompt(String),
}

impl Error {
    /// Whether the key parser rejected the passphrase rather than the key.
    ///
    /// These are the only errors the backup pipeline recovers from.
    pub fn is_passphrase_error(&self) -> bool {
        matches!(self, Self::PassphraseRequired | Self::IncorrectPassphrase)
    }
}
