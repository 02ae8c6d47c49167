#![no_main]

use libfuzzer_sys::fuzz_target;
use std::cmp::Ordering;

fuzz_target!(|tokens: Vec<u8>| {
    // Small alphabet so suffixes share long prefixes; 0 is a boundary
    let Ok(mut index) = cxi::index::SuffixIndex::new() else {
        return;
    };
    for t in tokens.iter().take(512) {
        let text = if t % 4 == 0 { Vec::new() } else { vec![b'a' + t % 4] };
        index.append_token(&text).unwrap();
    }
    index.sort().unwrap();

    let sa = index.suffixes();
    for w in sa.windows(2) {
        assert_ne!(index.compare_suffixes(w[0], w[1]), Ordering::Greater);
    }
});
