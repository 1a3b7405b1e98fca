//! SSH private key parsing and marshaling
//!
//! Reads OpenSSH private keys (optionally passphrase-protected) and writes
//! them back out together with the matching `authorized_keys` line.
//! Only Ed25519 keys can be turned into a seed phrase.

use rand::rngs::OsRng;
use ssh_key::private::{Ed25519Keypair, KeypairData};
use ssh_key::{LineEnding, PrivateKey};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::passphrase::Passphrase;

/// Size of an Ed25519 private seed.
pub const ED25519_SEED_LEN: usize = 32;

/// A decrypted key of one of the supported types.
///
/// Only lives in memory between decode and re-encode.
#[derive(Clone, PartialEq, Eq)]
pub enum SupportedKey {
    Ed25519(Ed25519Keypair),
}

impl SupportedKey {
    /// Rebuild an Ed25519 keypair from its 32-byte private seed.
    pub fn from_ed25519_seed(seed: &[u8; ED25519_SEED_LEN]) -> Self {
        Self::Ed25519(Ed25519Keypair::from_seed(seed))
    }

    /// The private seed (BIP-39 entropy for this key).
    pub fn seed(&self) -> Zeroizing<[u8; ED25519_SEED_LEN]> {
        match self {
            Self::Ed25519(keypair) => Zeroizing::new(keypair.private.to_bytes()),
        }
    }

    /// OpenSSH algorithm name, e.g. `ssh-ed25519`.
    pub fn algorithm(&self) -> &'static str {
        match self {
            Self::Ed25519(_) => "ssh-ed25519",
        }
    }

    fn from_keypair_data(data: &KeypairData) -> Result<Self> {
        match data {
            KeypairData::Ed25519(keypair) => Ok(Self::Ed25519(keypair.clone())),
            other => {
                let name = other
                    .algorithm()
                    .map(|a| a.to_string())
                    .unwrap_or_else(|_| "unknown".to_string());
                Err(Error::UnsupportedKeyType(name))
            }
        }
    }

    fn to_private_key(&self) -> Result<PrivateKey> {
        let data = match self {
            Self::Ed25519(keypair) => KeypairData::Ed25519(keypair.clone()),
        };
        PrivateKey::new(data, "").map_err(|e| Error::KeyMarshal(e.to_string()))
    }
}

impl std::fmt::Debug for SupportedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SupportedKey").field(&self.algorithm()).finish()
    }
}

/// Serialized forms of a restored key.
pub struct KeyEncodings {
    /// OpenSSH PEM private key, encrypted when a passphrase was given.
    pub private_pem: Zeroizing<String>,
    /// Single `authorized_keys` line, newline terminated.
    pub public_line: String,
}

/// Parse an OpenSSH private key, decrypting it with `passphrase` if needed.
///
/// An encrypted key yields [`Error::PassphraseRequired`] when `passphrase`
/// is empty and [`Error::IncorrectPassphrase`] when it does not decrypt.
pub fn parse_key(raw: &[u8], passphrase: &Passphrase) -> Result<SupportedKey> {
    let key = PrivateKey::from_openssh(raw).map_err(|e| Error::KeyParse(e.to_string()))?;

    let key = if key.is_encrypted() {
        if passphrase.is_empty() {
            return Err(Error::PassphraseRequired);
        }
        key.decrypt(passphrase.as_bytes())
            .map_err(|_| Error::IncorrectPassphrase)?
    } else {
        key
    };

    SupportedKey::from_keypair_data(key.key_data())
}

/// Serialize `key` as an OpenSSH private key plus its public key line.
///
/// An empty passphrase stores the private key unencrypted.
pub fn marshal_key(key: &SupportedKey, passphrase: &Passphrase) -> Result<KeyEncodings> {
    let private = key.to_private_key()?;
    let private = if passphrase.is_empty() {
        private
    } else {
        private
            .encrypt(&mut OsRng, passphrase.as_bytes())
            .map_err(|e| Error::KeyMarshal(e.to_string()))?
    };

    let private_pem = private
        .to_openssh(LineEnding::LF)
        .map_err(|e| Error::KeyMarshal(e.to_string()))?;
    let mut public_line = private
        .public_key()
        .to_openssh()
        .map_err(|e| Error::KeyMarshal(e.to_string()))?;
    public_line.push('\n');

    Ok(KeyEncodings {
        private_pem,
        public_line,
    })
}
