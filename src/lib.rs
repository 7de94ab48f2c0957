//! Fast, small and secure [Shamir's Secret Sharing](https://en.wikipedia.org/wiki/Shamir%27s_Secret_Sharing) library crate
//! over GF(256) with the AES reduction polynomial `0x11b` and generator `0x03`.
//!
//! # Usage
//! ## (std)
//!
//! ```
//! use shamir256::{combine, SecretSharing};
//!
//! // 3 out of 5 shares are needed to recover the secret
//! let sss = SecretSharing::new(3, 5).unwrap();
//! # #[cfg(feature = "std")]
//! # {
//! let shares = sss.split(&[1, 2, 3, 4]).unwrap();
//! assert_eq!(shares.len(), 5);
//!
//! // Keep any 3 of them
//! let subset = shares
//!     .into_iter()
//!     .filter(|(id, _)| [1, 3, 5].contains(id))
//!     .collect();
//! // Recover the original secret!
//! let secret = combine(&subset).unwrap();
//! assert_eq!(secret, vec![1, 2, 3, 4]);
//! # }
//! ```
//!
//! ## (no std)
//!
//! ```
//! use shamir256::{split, combine};
//! use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
//!
//! let mut rng = ChaCha8Rng::from_seed([0x90; 32]);
//! // 5 shares, threshold 3
//! let shares = split(5, 3, &[1, 2, 3, 4], &mut rng).unwrap();
//! let secret = combine(&shares).unwrap();
//! assert_eq!(secret, vec![1, 2, 3, 4]);
//! ```
//!
//! # Entropy
//!
//! Splitting consumes randomness from a caller supplied [`rand::RngCore`] +
//! [`rand::CryptoRng`]. The security of every share is bounded by that source.
//! A failing source surfaces as [`Error::Entropy`].
//!
//! # Threshold
//!
//! Shares carry no metadata about the threshold. Combining fewer shares than
//! the threshold used at split time does not fail: it returns bytes that look
//! like a secret but are unrelated to it. Callers must supply enough shares.
//!
//! # Feature flags
//!
//! - `std` — enables `split`/`dealer` convenience methods on [`SecretSharing`]
//!   (uses `rand::thread_rng`). Without `std`, use `split_rng`/`dealer_rng`.
//! - `zeroize_memory` — enables `Zeroize` on shares and polynomials to clear memory on drop,
//!   and wipes the intermediate buffers of `recover`/`combine`. The plain `Vec<u8>` values
//!   of a [`ShareMap`] and the `Vec<u8>` secret returned by `combine` are owned by the
//!   caller and are not wiped; wrap them in `zeroize::Zeroizing` if needed.
//! - `fuzzing` — derives `arbitrary::Arbitrary` for the fuzz targets.
#![cfg_attr(not(feature = "std"), no_std)]

mod error;
pub mod field;
pub mod math;
mod share;

extern crate alloc;

use alloc::vec::Vec;
use hashbrown::HashSet;
use rand::{CryptoRng, RngCore};

pub use error::{Error, Result};
use field::GF256;
pub use share::{from_share_map, to_share_map, Share, ShareMap};

/// Validated split parameters: at least `threshold` of `share_count` shares are
/// needed to recover a secret.
///
/// Share ids are single non-zero bytes, so both values are capped at 255 by their type.
///
/// Usage example:
/// ```
/// # use shamir256::{recover, SecretSharing, Share};
/// # use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
/// let sss = SecretSharing::new(10, 12).unwrap();
/// let mut rng = ChaCha8Rng::from_seed([0x90; 32]);
/// // Obtain an iterator over the shares for secret [1, 2, 3, 4]
/// let dealer = sss.dealer_rng(&[1, 2, 3, 4], &mut rng).unwrap();
/// // Get 10 shares
/// let shares = dealer.take(10).collect::<Vec<Share>>();
/// // Recover the original secret!
/// let secret = recover(&shares).unwrap();
/// assert_eq!(secret, vec![1, 2, 3, 4]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretSharing {
    threshold: u8,
    share_count: u8,
}

impl SecretSharing {
    /// Creates a new split configuration.
    ///
    /// # Errors
    /// Fails if either value is zero or if `threshold > share_count`.
    pub fn new(threshold: u8, share_count: u8) -> Result<Self> {
        if share_count == 0 {
            return Err(Error::ZeroShareCount);
        }
        if threshold == 0 {
            return Err(Error::ZeroThreshold);
        }
        if threshold > share_count {
            return Err(Error::ThresholdExceedsShareCount {
                threshold,
                share_count,
            });
        }

        Ok(SecretSharing {
            threshold,
            share_count,
        })
    }

    /// Minimum number of shares needed to recover a secret.
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Number of shares produced by `split`/`split_rng`.
    pub fn share_count(&self) -> u8 {
        self.share_count
    }

    /// This method is useful when `std` is not available. For typical usage
    /// see the `dealer` method.
    ///
    /// Given a `secret` byte slice, returns an `Iterator` along new shares.
    /// The iterator yields shares for ids `1..=255`, independently of
    /// `share_count`; the maximum number of shares that can be generated is 255.
    ///
    /// Example:
    /// ```
    /// # use shamir256::{SecretSharing, Share};
    /// # use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
    /// # let sss = SecretSharing::new(3, 3).unwrap();
    /// // Obtain an iterator over the shares for secret [1, 2]
    /// let mut rng = ChaCha8Rng::from_seed([0x90; 32]);
    /// let dealer = sss.dealer_rng(&[1, 2], &mut rng).unwrap();
    /// // Get 3 shares
    /// let shares = dealer.take(3).collect::<Vec<Share>>();
    /// assert_eq!(shares[2].id(), 3);
    /// ```
    pub fn dealer_rng<R: RngCore + CryptoRng>(
        &self,
        secret: &[u8],
        rng: &mut R,
    ) -> Result<impl Iterator<Item = Share>> {
        let mut polys = Vec::with_capacity(secret.len());

        for chunk in secret {
            polys.push(math::random_polynomial(GF256(*chunk), self.threshold, rng)?)
        }

        Ok(math::get_evaluator(polys))
    }

    /// Given a `secret` byte slice, returns an `Iterator` along new shares,
    /// drawing randomness from `rand::thread_rng`.
    #[cfg(feature = "std")]
    pub fn dealer(&self, secret: &[u8]) -> Result<impl Iterator<Item = Share>> {
        let mut rng = rand::thread_rng();
        self.dealer_rng(secret, &mut rng)
    }

    /// Splits `secret` into `share_count` shares with ids `1..=share_count`.
    ///
    /// Example:
    /// ```
    /// # use shamir256::SecretSharing;
    /// # use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
    /// let sss = SecretSharing::new(2, 4).unwrap();
    /// let mut rng = ChaCha8Rng::from_seed([0x90; 32]);
    /// let shares = sss.split_rng(&[], &mut rng).unwrap();
    /// // An empty secret gives empty share values
    /// assert_eq!(shares.len(), 4);
    /// assert!(shares.values().all(|v| v.is_empty()));
    /// ```
    pub fn split_rng<R: RngCore + CryptoRng>(
        &self,
        secret: &[u8],
        rng: &mut R,
    ) -> Result<ShareMap> {
        tracing::debug!(
            threshold = self.threshold(),
            share_count = self.share_count(),
            secret_len = secret.len(),
            "splitting secret"
        );

        let dealer = self.dealer_rng(secret, rng)?;
        Ok(dealer
            .take(self.share_count() as usize)
            .map(|share| (share.id(), share.value()))
            .collect())
    }

    /// Splits `secret` into `share_count` shares using `rand::thread_rng`.
    #[cfg(feature = "std")]
    pub fn split(&self, secret: &[u8]) -> Result<ShareMap> {
        let mut rng = rand::thread_rng();
        self.split_rng(secret, &mut rng)
    }

    /// Given an iterable collection of shares (optionally with None for unknown shares),
    /// rebuilds the full set of `n` shares with ids `1..=n`.
    /// If the number of distinct shares is less than the threshold an `Err` is returned,
    /// otherwise an `Ok` containing the `n` shares.
    ///
    /// Example:
    /// ```
    /// # use shamir256::{SecretSharing, Share};
    /// # use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
    /// # let sss = SecretSharing::new(2, 3).unwrap();
    /// # let mut rng = ChaCha8Rng::from_seed([0x90; 32]);
    /// # let shares = sss.dealer_rng(&[1, 2, 3, 4], &mut rng).unwrap().take(3).collect::<Vec<Share>>();
    /// // Recover original shares from original shares up to threshold shares
    /// let recovered_shares = sss.recover_shares(
    ///     [Some(&shares[0]), None, Some(&shares[2])],
    ///     3,
    /// );
    /// // Shares correctly recovered
    /// assert!(recovered_shares.is_ok());
    /// let recovered_shares = recovered_shares.unwrap();
    /// assert_eq!(recovered_shares, shares);
    /// // Remove shares for demonstration purposes
    /// let recovered_shares = sss.recover_shares([Some(&shares[0]), None, None], 3);
    /// // Not enough shares to recover shares
    /// assert!(recovered_shares.is_err());
    /// ```
    pub fn recover_shares<'a, T>(&self, shares: T, n: u8) -> Result<Vec<Share>>
    where
        T: IntoIterator<Item = Option<&'a Share>>,
    {
        let mut count = 0;
        let mut known: Vec<&Share> = Vec::new();
        for share in shares {
            count += 1;
            if let Some(share) = share {
                known.push(share);
            }
        }

        if count != n as usize {
            return Err(Error::ShareCountMismatch {
                expected: n as usize,
                found: count,
            });
        }

        validate(&known)?;

        let ids: HashSet<u8> = known.iter().map(|s| s.id()).collect();
        if ids.len() < self.threshold() as usize {
            return Err(Error::NotEnoughShares {
                needed: self.threshold(),
                found: ids.len(),
            });
        }

        tracing::debug!(known = known.len(), n, "rebuilding shares");

        (1..=n).map(|x| math::reshare(&known, GF256(x))).collect()
    }
}

// Non-empty, no zero id, equal lengths.
fn validate(shares: &[&Share]) -> Result<()> {
    let first = shares.first().ok_or(Error::NoShares)?;
    let expected = first.y.len();

    for share in shares {
        if share.x == GF256::ZERO {
            return Err(Error::InvalidShareId(0));
        }
        if share.y.len() != expected {
            return Err(Error::ShareLengthMismatch {
                expected,
                found: share.y.len(),
            });
        }
    }

    Ok(())
}

/// Splits `secret` into `n` shares with ids `1..=n`, any `k` of which recover it.
///
/// # Errors
/// Fails if `n == 0`, `k == 0` or `k > n`, or if `rng` fails.
pub fn split<R: RngCore + CryptoRng>(
    n: u8,
    k: u8,
    secret: &[u8],
    rng: &mut R,
) -> Result<ShareMap> {
    SecretSharing::new(k, n)?.split_rng(secret, rng)
}

/// Recovers a secret from a share set.
///
/// The output has the length of the share values. Passing fewer shares than the
/// threshold used at split time returns a wrong secret without any error.
///
/// # Errors
/// Fails if `shares` is empty, contains id 0, or holds values of different lengths.
pub fn combine(shares: &ShareMap) -> Result<Vec<u8>> {
    let shares = from_share_map(shares);
    recover(&shares)
}

/// Given an iterable collection of shares, recovers the original secret.
///
/// Same contract as [`combine`]. Two shares with the same id yield
/// [`Error::DivisionByZero`].
///
/// Example:
/// ```
/// # use shamir256::{recover, Error, SecretSharing, Share};
/// # use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
/// # let sss = SecretSharing::new(3, 3).unwrap();
/// # let mut rng = ChaCha8Rng::from_seed([0x90; 32]);
/// let mut shares = sss
///     .dealer_rng(&[1], &mut rng)
///     .unwrap()
///     .take(3)
///     .collect::<Vec<Share>>();
/// // Recover original secret from shares
/// assert_eq!(recover(&shares).unwrap(), vec![1]);
/// // The same share twice cannot be interpolated
/// shares[1] = shares[0].clone();
/// assert!(matches!(recover(&shares), Err(Error::DivisionByZero)));
/// ```
pub fn recover<'a, T>(shares: T) -> Result<Vec<u8>>
where
    T: IntoIterator<Item = &'a Share>,
{
    let shares: Vec<&Share> = shares.into_iter().collect();
    validate(&shares)?;

    tracing::debug!(
        shares = shares.len(),
        secret_len = shares[0].y.len(),
        "recovering secret"
    );

    #[allow(unused_mut)]
    let mut secret = math::interpolate(&shares, GF256::ZERO)?;
    let bytes = secret.iter().map(|b| b.0).collect();

    #[cfg(feature = "zeroize_memory")]
    zeroize::Zeroize::zeroize(&mut secret);

    Ok(bytes)
}
