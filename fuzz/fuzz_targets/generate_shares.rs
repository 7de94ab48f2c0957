#![no_main]
use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use shamir256::{combine, split};

#[derive(Debug, Arbitrary)]
struct Parameters {
    pub threshold: u8,
    pub n_shares: u8,
    pub secret: Vec<u8>,
}

fuzz_target!(|params: Parameters| {
    let mut rng = rand::thread_rng();
    if let Ok(shares) = split(params.n_shares, params.threshold, &params.secret, &mut rng) {
        assert_eq!(shares.len(), params.n_shares as usize);
        assert_eq!(combine(&shares).unwrap(), params.secret);
    }
});
