#![no_main]

use libfuzzer_sys::fuzz_target;
use melt_core::language::resolve;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Same token, same answer.
        let first = resolve(s).ok();
        assert_eq!(first, resolve(s).ok());
    }
});
