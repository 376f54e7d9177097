#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(audio) = qoadec::decode_bytes(data) else {
        return;
    };
    match audio.channel_count {
        0 => assert!(audio.samples.is_empty()),
        n => assert_eq!(audio.samples.len() % n as usize, 0),
    }
});
