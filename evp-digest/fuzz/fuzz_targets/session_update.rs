#![no_main]

use libfuzzer_sys::fuzz_target;
use evp_digest::{digest, Algorithm, Session};

// the first byte picks the algorithm and the chunk size, the rest is the message.
fuzz_target!(|data: &[u8]| {
    let Some((&selector, message)) = data.split_first() else { return };

    let fixed: Vec<_> = Algorithm::ALL.iter().filter(|a| !a.is_xof()).collect();
    let algo = fixed[selector as usize % fixed.len()];
    let Ok(md) = algo.descriptor() else { return };
    let Ok(mut session) = Session::with_descriptor(&md) else { return };

    let chunk = (selector as usize >> 3) + 1;
    for part in message.chunks(chunk) {
        session.update(part).unwrap();
    }

    let chunked = session.finalize().unwrap();
    let whole = digest(&md, message).unwrap();

    assert_eq!(chunked, whole);
    assert!(session.update(message).is_err());
});
