#![no_main]
use libfuzzer_sys::fuzz_target;

use std::collections::HashMap;

use shamir256::{combine, ShareMap};

fuzz_target!(|shares: HashMap<u8, Vec<u8>>| {
    let shares: ShareMap = shares.into_iter().collect();
    let _secret = combine(&shares);
});
