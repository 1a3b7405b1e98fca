//! Destinations for a restored key
//!
//! A stream receives the private key only. A file pair receives the
//! private key at `path` and the public key at `path.pub`, both readable
//! by the owner only. Writing the pair is not atomic: if the `.pub` write
//! fails the private key file is left in place.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::keys::KeyEncodings;

/// Permission bits for every file we write.
#[cfg(unix)]
const KEY_FILE_MODE: u32 = 0o600;

pub trait OutputSink {
    /// Deliver the encodings. Returns the files written, if any.
    fn emit(&mut self, keys: &KeyEncodings) -> Result<Vec<PathBuf>>;
}

/// Writes the private key to a stream.
pub struct StreamSink<W> {
    out: W,
}

impl<W: Write> StreamSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputSink for StreamSink<W> {
    fn emit(&mut self, keys: &KeyEncodings) -> Result<Vec<PathBuf>> {
        let to_err = |source| Error::OutputWrite {
            path: PathBuf::from("<stdout>"),
            source,
        };
        self.out
            .write_all(keys.private_pem.as_bytes())
            .map_err(to_err)?;
        self.out.flush().map_err(to_err)?;
        Ok(Vec::new())
    }
}

/// Writes `path` and `path.pub`.
pub struct FilePairSink {
    path: PathBuf,
}

impl FilePairSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn private_path(&self) -> &Path {
        &self.path
    }

    pub fn public_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".pub");
        PathBuf::from(name)
    }
}

impl OutputSink for FilePairSink {
    fn emit(&mut self, keys: &KeyEncodings) -> Result<Vec<PathBuf>> {
        let private = self.path.clone();
        let public = self.public_path();

        write_owner_only(&private, keys.private_pem.as_bytes())?;
        log::info!("wrote private key to {}", private.display());

        write_owner_only(&public, keys.public_line.as_bytes())?;
        log::info!("wrote public key to {}", public.display());

        Ok(vec![private, public])
    }
}

/// Create or truncate `path` with owner-only permissions and write `data`.
fn write_owner_only(path: &Path, data: &[u8]) -> Result<()> {
    let to_err = |source| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut opts = OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(KEY_FILE_MODE);
    }

    let mut file = opts.open(path).map_err(to_err)?;
    restrict_permissions(path).map_err(to_err)?;
    file.write_all(data).map_err(to_err)?;
    file.sync_all().map_err(to_err)
}

/// `mode` only applies on creation, so tighten pre-existing files too.
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(KEY_FILE_MODE))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
