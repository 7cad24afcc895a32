#![no_main]
use huffpack::container;
use libfuzzer_sys::fuzz_target;

// Arbitrary bytes must never panic the decoder, only return an error.
fuzz_target!(|data: &[u8]| {
    let _ = container::inspect(data);
    let _ = container::decode(data);
});
