//! Property tests for split/combine workflows

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use rand::seq::SliceRandom;
use rand_chacha::{rand_core::SeedableRng, ChaCha20Rng};
use shamir256::{combine, recover, split, Error, SecretSharing, Share, ShareMap};

/// Wrapper for valid threshold and share count pairs
#[derive(Clone, Copy, Debug)]
struct ValidShamirParams {
    threshold: u8,
    num_shares: u8,
}

impl Arbitrary for ValidShamirParams {
    fn arbitrary(g: &mut Gen) -> Self {
        // Mostly small configurations, sometimes the full 255 share range
        let num_shares = if u8::arbitrary(g) % 8 == 0 {
            u8::arbitrary(g) % 255 + 1 // 1..=255
        } else {
            u8::arbitrary(g) % 20 + 1 // 1..=20
        };
        let threshold = u8::arbitrary(g) % num_shares + 1; // 1..=num_shares

        ValidShamirParams {
            threshold,
            num_shares,
        }
    }
}

/// Same as `ValidShamirParams` but with threshold >= 2
#[derive(Clone, Copy, Debug)]
struct MultiShareParams(ValidShamirParams);

impl Arbitrary for MultiShareParams {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_shares = u8::arbitrary(g) % 19 + 2; // 2..=20
        let threshold = u8::arbitrary(g) % (num_shares - 1) + 2; // 2..=num_shares
        MultiShareParams(ValidShamirParams {
            threshold,
            num_shares,
        })
    }
}

/// Secret long enough that guessing it by accident is out of the question
#[derive(Clone, Debug)]
struct LongSecret(Vec<u8>);

impl Arbitrary for LongSecret {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::from(u8::arbitrary(g) % 32) + 16;
        LongSecret((0..len).map(|_| u8::arbitrary(g)).collect())
    }
}

fn pick(shares: &ShareMap, count: usize, rng: &mut ChaCha20Rng) -> ShareMap {
    let mut ids: Vec<u8> = shares.keys().copied().collect();
    ids.shuffle(rng);
    ids.truncate(count);
    ids.into_iter().map(|id| (id, shares[&id].clone())).collect()
}

/// Any selection of threshold-or-more shares recovers the secret
#[quickcheck]
fn prop_split_combine_round_trip(
    secret: Vec<u8>,
    params: ValidShamirParams,
    seed: u64,
    extra: u8,
) -> bool {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let Ok(shares) = split(params.num_shares, params.threshold, &secret, &mut rng) else {
        return false;
    };

    if shares.len() != params.num_shares as usize {
        return false;
    }
    if shares.keys().any(|id| *id == 0 || *id > params.num_shares) {
        return false;
    }
    if shares.values().any(|v| v.len() != secret.len()) {
        return false;
    }

    let spare = params.num_shares - params.threshold;
    let count = params.threshold + if spare == 0 { 0 } else { extra % (spare + 1) };
    let selected = pick(&shares, count as usize, &mut rng);

    combine(&selected).is_ok_and(|recovered| recovered == secret)
}

/// Fewer shares than the threshold do not give the secret back
#[quickcheck]
fn prop_insufficient_shares_give_wrong_secret(
    secret: LongSecret,
    params: MultiShareParams,
    seed: u64,
) -> bool {
    let LongSecret(secret) = secret;
    let MultiShareParams(params) = params;
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let Ok(shares) = split(params.num_shares, params.threshold, &secret, &mut rng) else {
        return false;
    };

    let selected = pick(&shares, (params.threshold - 1) as usize, &mut rng);

    // No error is raised: the result just is not the secret
    combine(&selected)
        .is_ok_and(|recovered| recovered.len() == secret.len() && recovered != secret)
}

/// Rebuilding missing shares gives the original shares
#[quickcheck]
fn prop_recover_shares_rebuilds_every_share(
    secret: Vec<u8>,
    params: MultiShareParams,
    seed: u64,
) -> bool {
    let MultiShareParams(params) = params;
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let Ok(sss) = SecretSharing::new(params.threshold, params.num_shares) else {
        return false;
    };
    let Ok(dealer) = sss.dealer_rng(&secret, &mut rng) else {
        return false;
    };
    let shares: Vec<Share> = dealer.take(params.num_shares as usize).collect();

    let mut known: Vec<usize> = (0..shares.len()).collect();
    known.shuffle(&mut rng);
    known.truncate(params.threshold as usize);

    let slots: Vec<Option<&Share>> = (0..shares.len())
        .map(|i| known.contains(&i).then(|| &shares[i]))
        .collect();

    sss.recover_shares(slots, params.num_shares)
        .is_ok_and(|rebuilt| rebuilt == shares)
}

/// Shares survive the byte encoding
#[quickcheck]
fn prop_share_bytes_round_trip(secret: Vec<u8>, seed: u64) -> bool {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let Ok(sss) = SecretSharing::new(2, 3) else {
        return false;
    };
    let Ok(dealer) = sss.dealer_rng(&secret, &mut rng) else {
        return false;
    };
    let shares: Vec<Share> = dealer.take(3).collect();

    let decoded: Result<Vec<Share>, Error> = shares
        .iter()
        .map(|s| Share::try_from(Vec::from(s).as_slice()))
        .collect();

    decoded.is_ok_and(|decoded| {
        decoded == shares && recover(&decoded).is_ok_and(|recovered| recovered == secret)
    })
}

/// Mismatched share lengths are rejected
#[quickcheck]
fn prop_mismatched_lengths_rejected(secret: LongSecret, seed: u64) -> bool {
    let LongSecret(secret) = secret;
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let Ok(mut shares) = split(3, 2, &secret, &mut rng) else {
        return false;
    };
    if let Some(value) = shares.get_mut(&2) {
        value.pop();
    }

    matches!(combine(&shares), Err(Error::ShareLengthMismatch { .. }))
}

/// Invalid configurations never produce shares
#[quickcheck]
fn prop_invalid_config_rejected(threshold: u8, num_shares: u8, seed: u64) -> bool {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let result = split(num_shares, threshold, &[1, 2, 3], &mut rng);
    let valid = num_shares >= 1 && threshold >= 1 && threshold <= num_shares;
    result.is_ok() == valid
}
