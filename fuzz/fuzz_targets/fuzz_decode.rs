#![no_main]
use std::io::Cursor;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = zendds::Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };

    // Probe and decode must never panic
    let _ = zendds::ImageInfo::from_bytes(data);

    let mut cursor = Cursor::new(data);
    let _ = zendds::DecodeRequest::new(&mut cursor)
        .with_mipmaps(true)
        .with_limits(&limits)
        .decode(enough::Unstoppable);
});
