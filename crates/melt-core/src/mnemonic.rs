//! BIP-39 seed phrase encoding of key material
//!
//! The 32-byte Ed25519 private seed is used directly as BIP-39 entropy,
//! giving a 24-word phrase. Decoding validates the checksum and rebuilds
//! the keypair from the recovered entropy.

use std::fmt;

use bip39::Mnemonic;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{Error, Result};
use crate::keys::{SupportedKey, ED25519_SEED_LEN};
use crate::language::WordlistTag;

/// Words in a phrase encoding an Ed25519 seed.
pub const PHRASE_WORDS: usize = 24;

/// A seed phrase, zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct MnemonicPhrase(String);

impl MnemonicPhrase {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn word_count(&self) -> usize {
        self.0.split_whitespace().count()
    }
}

impl fmt::Display for MnemonicPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for MnemonicPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MnemonicPhrase({} words)", self.word_count())
    }
}

/// Encode a key as a seed phrase in the given wordlist.
pub fn encode(key: &SupportedKey, wordlist: WordlistTag) -> Result<MnemonicPhrase> {
    let seed = key.seed();
    let mut mnemonic = Mnemonic::from_entropy_in(wordlist.language(), &seed[..])
        .map_err(|e| Error::Encode(e.to_string()))?;
    let phrase = MnemonicPhrase(mnemonic.to_string());
    mnemonic.zeroize();
    Ok(phrase)
}

/// Decode a seed phrase in the given wordlist back into a key.
///
/// Leading/trailing whitespace and line breaks are ignored.
pub fn decode(phrase: &str, wordlist: WordlistTag) -> Result<SupportedKey> {
    let mut mnemonic = Mnemonic::parse_in(wordlist.language(), phrase.trim())
        .map_err(|e| Error::MnemonicDecode(e.to_string()))?;
    let entropy = Zeroizing::new(mnemonic.to_entropy());
    mnemonic.zeroize();

    let seed: Zeroizing<[u8; ED25519_SEED_LEN]> = Zeroizing::new(
        entropy[..]
            .try_into()
            .map_err(|_| {
                Error::MnemonicDecode(format!(
                    "expected {PHRASE_WORDS} words, got {}",
                    phrase.split_whitespace().count()
                ))
            })?,
    );
    Ok(SupportedKey::from_ed25519_seed(&seed))
}
