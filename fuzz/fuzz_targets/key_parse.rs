#![no_main]

use libfuzzer_sys::fuzz_target;
use melt_core::{parse_key, Passphrase};

fuzz_target!(|data: &[u8]| {
    // First byte picks the passphrase so both the plain and the
    // decrypting paths get exercised.
    let Some((&selector, raw)) = data.split_first() else {
        return;
    };
    let passphrase = if selector & 1 == 0 {
        Passphrase::empty()
    } else {
        Passphrase::from("fuzz")
    };
    let _ = parse_key(raw, &passphrase);
});
