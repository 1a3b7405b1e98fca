//! Restore: seed phrase in, SSH key out

use std::path::PathBuf;

use crate::error::Result;
use crate::keys::marshal_key;
use crate::language::WordlistTag;
use crate::mnemonic;
use crate::passphrase::{PassphraseNegotiator, SecretReader};
use crate::sink::OutputSink;

/// Outcome of a successful restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreReport {
    pub algorithm: &'static str,
    /// Whether the written private key is passphrase protected.
    pub encrypted: bool,
    /// Files written; empty when the key went to a stream.
    pub written: Vec<PathBuf>,
}

pub struct RestorePipeline<R> {
    negotiator: PassphraseNegotiator<R>,
    wordlist: WordlistTag,
}

impl<R: SecretReader> RestorePipeline<R> {
    pub fn new(negotiator: PassphraseNegotiator<R>, wordlist: WordlistTag) -> Self {
        Self {
            negotiator,
            wordlist,
        }
    }

    /// Decode `phrase`, ask for a new passphrase and hand the key to `sink`.
    ///
    /// Nothing reaches the sink unless every earlier step succeeded.
    pub fn run(&mut self, phrase: &str, sink: &mut dyn OutputSink) -> Result<RestoreReport> {
        let key = mnemonic::decode(phrase, self.wordlist)?;
        log::debug!("decoded {} key from seed phrase", key.algorithm());

        let passphrase = self.negotiator.ask_new()?;
        let encodings = marshal_key(&key, &passphrase)?;
        let written = sink.emit(&encodings)?;

        Ok(RestoreReport {
            algorithm: key.algorithm(),
            encrypted: !passphrase.is_empty(),
            written,
        })
    }

    pub fn into_negotiator(self) -> PassphraseNegotiator<R> {
        self.negotiator
    }
}
