#![no_main]

use libfuzzer_sys::fuzz_target;
use melt_core::mnemonic::decode;
use melt_core::WordlistTag;

fuzz_target!(|data: &[u8]| {
    // Arbitrary text as a seed phrase. decode must return Ok or Err, never panic.
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(key) = decode(s, WordlistTag::default()) {
            assert_eq!(key.seed().len(), 32);
        }
    }
});
