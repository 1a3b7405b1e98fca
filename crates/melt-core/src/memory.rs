//! Process hardening
//!
//! Key seeds and passphrases live in this process's memory while a backup
//! or restore runs. Disabling core dumps keeps a crash from writing them to
//! disk. This is best effort: containers and some unprivileged setups refuse
//! it, which is logged and otherwise ignored.

use std::sync::OnceLock;

static CORE_DUMPS_DISABLED: OnceLock<bool> = OnceLock::new();

/// Set the core dump size limit to zero. Returns whether that took effect.
///
/// Call before any key material is read. Only the first call does any work;
/// later calls report its outcome.
pub fn disable_core_dumps() -> bool {
    *CORE_DUMPS_DISABLED.get_or_init(apply_core_limit)
}

fn apply_core_limit() -> bool {
    #[cfg(unix)]
    {
        let limit = libc::rlimit {
            rlim_cur: 0,
            rlim_max: 0,
        };
        // SAFETY: setrlimit only reads the struct we pass.
        let rc = unsafe { libc::setrlimit(libc::RLIMIT_CORE, &limit) };
        if rc != 0 {
            log::warn!(
                "failed to disable core dumps: {}",
                std::io::Error::last_os_error()
            );
            return false;
        }
        log::debug!("core dumps disabled");
        true
    }

    #[cfg(not(unix))]
    {
        log::warn!("core dump prevention is not supported on this platform");
        false
    }
}
