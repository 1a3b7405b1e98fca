//! Backup: SSH key in, seed phrase out
//!
//! Driven as an explicit state machine. The key bytes are read once and
//! decryption is retried with a fresh passphrase until it succeeds or a
//! non-passphrase error ends the run. There is no attempt limit.

use std::io::Read;

use crate::error::Result;
use crate::keys::{parse_key, SupportedKey};
use crate::keysource::{KeySource, RawKeyBytes};
use crate::language::WordlistTag;
use crate::mnemonic::{self, MnemonicPhrase};
use crate::passphrase::{Passphrase, PassphraseNegotiator, SecretReader};

enum BackupState {
    ReadRaw,
    Decrypt,
    AskPassphrase,
    Encode(SupportedKey),
    Done(MnemonicPhrase),
}

pub struct BackupPipeline<'a, S, R> {
    source: &'a mut KeySource<S>,
    negotiator: PassphraseNegotiator<R>,
    wordlist: WordlistTag,
}

impl<'a, S: Read, R: SecretReader> BackupPipeline<'a, S, R> {
    pub fn new(
        source: &'a mut KeySource<S>,
        negotiator: PassphraseNegotiator<R>,
        wordlist: WordlistTag,
    ) -> Self {
        Self {
            source,
            negotiator,
            wordlist,
        }
    }

    /// Turn the key at `path` into a seed phrase.
    pub fn run(&mut self, path: &str) -> Result<MnemonicPhrase> {
        let context = self.source.resolve(path).display_name();
        let mut raw = RawKeyBytes::default();
        let mut passphrase = Passphrase::empty();
        let mut attempt = 0u32;
        let mut state = BackupState::ReadRaw;

        loop {
            state = match state {
                BackupState::ReadRaw => {
                    raw = self.source.read(path)?;
                    BackupState::Decrypt
                }
                BackupState::Decrypt => {
                    attempt += 1;
                    match parse_key(&raw, &passphrase) {
                        Ok(key) => {
                            log::debug!("decrypted {} on attempt {attempt}", key.algorithm());
                            BackupState::Encode(key)
                        }
                        Err(e) if e.is_passphrase_error() => {
                            log::debug!("attempt {attempt}: {e}");
                            BackupState::AskPassphrase
                        }
                        Err(e) => return Err(e),
                    }
                }
                BackupState::AskPassphrase => {
                    passphrase = self.negotiator.ask_existing(&context)?;
                    BackupState::Decrypt
                }
                BackupState::Encode(key) => {
                    BackupState::Done(mnemonic::encode(&key, self.wordlist)?)
                }
                BackupState::Done(phrase) => return Ok(phrase),
            };
        }
    }

    pub fn into_negotiator(self) -> PassphraseNegotiator<R> {
        self.negotiator
    }
}
