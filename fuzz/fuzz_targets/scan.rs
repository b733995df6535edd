#![no_main]

use std::path::Path;

use fruitrun::backend::render;
use fruitrun::{HarnessConfig, SuiteModel};
use fruitrun_syntax::parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Fuzz the scanner
        if let Ok(module) = parser::parse(Path::new("fuzz.f90"), s) {
            // If scanning succeeds, fuzz driver rendering
            let _ = render(&SuiteModel::from_modules(vec![module]), &HarnessConfig::default());
        }
    }
});
