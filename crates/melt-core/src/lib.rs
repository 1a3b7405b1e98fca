//! melt core
//!
//! Turns an Ed25519 SSH private key into a BIP-39 seed phrase and back.
//!
//! # Backup
//!
//! [`BackupPipeline`] reads a key file (or stdin), asks for its passphrase
//! as often as needed and encodes the 32-byte private seed as a 24-word
//! phrase in the chosen wordlist.
//!
//! # Restore
//!
//! [`RestorePipeline`] decodes a phrase, asks for a new passphrase with
//! confirmation and writes the key through an [`OutputSink`]: either a
//! stream (private key only) or a `<path>` / `<path>.pub` file pair.
//!
//! The wordlist is resolved once with [`language::resolve`] and passed to
//! each pipeline explicitly.

pub mod backup;
pub mod error;
pub mod keys;
pub mod keysource;
pub mod language;
pub mod memory;
pub mod mnemonic;
pub mod passphrase;
pub mod restore;
pub mod sink;

pub use backup::BackupPipeline;
pub use error::{Error, Result};
pub use keys::{marshal_key, parse_key, KeyEncodings, SupportedKey};
pub use keysource::{KeyInput, KeySource};
pub use language::{resolve, WordlistTag};
pub use mnemonic::MnemonicPhrase;
pub use passphrase::{Passphrase, PassphraseNegotiator, SecretReader, TerminalReader};
pub use restore::{RestorePipeline, RestoreReport};
pub use sink::{FilePairSink, OutputSink, StreamSink};
