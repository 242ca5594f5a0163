#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate huffpass;

fuzz_target!(|data: &[u8]| {
    // errors are fine, panics are not
    let _ = huffpass::decompress(data);
});
