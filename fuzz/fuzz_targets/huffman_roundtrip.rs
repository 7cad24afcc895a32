#![no_main]
use huffpack::{compress, container, decompress};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let stored = container::encode(data).unwrap();
    assert_eq!(container::decode(&stored).unwrap(), data);

    if data.is_empty() {
        return;
    }

    let encoded = compress(data).unwrap();
    assert_eq!(decompress(&encoded.stream, &encoded.tree).unwrap(), data);
});
