#![no_main]

use libfuzzer_sys::fuzz_target;
use marktest_core::{ParamKind, coerce};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        for kind in [ParamKind::Str, ParamKind::Int, ParamKind::Float, ParamKind::Bool] {
            // Coercion must never panic; a successful string coercion must round-trip verbatim
            if let Ok(value) = coerce(s, kind) {
                if kind == ParamKind::Str {
                    assert_eq!(value.to_string(), s);
                }
            }
        }
    }
});
