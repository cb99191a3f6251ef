#![no_main]

use libfuzzer_sys::fuzz_target;
use std::path::PathBuf;
use vidcull::cleanup;
use vidcull::nav;
use vidcull::playlist::Playlist;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let playlist = Playlist::parse(PathBuf::from("fuzz.txt"), &raw);

    let mut index = 0usize;
    for byte in data {
        let moved = match byte % 4 {
            0 | 1 => nav::next(playlist.len(), index),
            2 => nav::prev(index),
            _ => {
                let _ = cleanup::format_size(u64::from(*byte) << (byte % 33));
                None
            }
        };
        if let Some(next) = moved {
            index = next;
            assert!(playlist.get(index).is_some());
        }
    }
});
