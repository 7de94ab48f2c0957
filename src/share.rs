use alloc::vec::Vec;

use hashbrown::HashMap;

use super::error::{Error, Result};
use super::field::GF256;

#[cfg(feature = "fuzzing")]
use arbitrary::Arbitrary;

#[cfg(feature = "zeroize_memory")]
use zeroize::Zeroize;

/// Share set keyed by share id. Keys are the x-coordinates, values hold one
/// byte per secret byte.
pub type ShareMap = HashMap<u8, Vec<u8>>;

/// A share used to reconstruct the secret. Can be serialized to and from a byte array.
///
/// Usage example:
/// ```
/// use shamir256::{recover, SecretSharing, Share};
/// use core::convert::TryFrom;
/// # use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
/// # fn send_to_printer(_: Vec<u8>) {}
/// # fn ask_shares() -> Vec<Vec<u8>> {vec![vec![1, 2, 3], vec![2, 3, 4], vec![3, 4, 5]]}
///
/// // Transmit the share bytes to a printer
/// let sss = SecretSharing::new(3, 5).unwrap();
/// let mut rng = ChaCha8Rng::from_seed([0x90; 32]);
/// let dealer = sss.dealer_rng(&[1, 2, 3], &mut rng).unwrap();
///
/// // Get 5 shares and print paper keys
/// for s in dealer.take(5) {
///     send_to_printer(Vec::from(&s));
/// };
///
/// // Get share bytes from an external source and recover secret
/// let shares: Vec<Share> = ask_shares()
///     .iter()
///     .map(|s| Share::try_from(s.as_slice()).unwrap())
///     .collect();
/// let secret = recover(&shares).unwrap();
/// assert_eq!(secret, vec![5, 2]);
/// ```
///
/// # Serialization format
/// `[x, y...]`: the first byte is the share id, the rest are the `y` values.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "fuzzing", derive(Arbitrary))]
#[cfg_attr(feature = "zeroize_memory", derive(Zeroize))]
#[cfg_attr(feature = "zeroize_memory", zeroize(drop))]
pub struct Share {
    /// The x coordinate of the share.
    pub x: GF256,
    /// The y coordinates of the share.
    pub y: Vec<GF256>,
}

impl Share {
    pub fn new(id: u8, value: &[u8]) -> Self {
        Share {
            x: GF256(id),
            y: value.iter().copied().map(GF256).collect(),
        }
    }

    /// Share id, i.e. the x-coordinate as a byte.
    pub fn id(&self) -> u8 {
        self.x.0
    }

    /// Share value without the id.
    pub fn value(&self) -> Vec<u8> {
        self.y.iter().map(|p| p.0).collect()
    }
}

/// Converts a Share to a vector of bytes, where the first byte is the x value and the rest are the y values.
impl From<&Share> for Vec<u8> {
    fn from(s: &Share) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(s.y.len() + 1);
        bytes.push(s.x.0);
        bytes.extend(s.y.iter().map(|p| p.0));
        bytes
    }
}

impl core::convert::TryFrom<&[u8]> for Share {
    type Error = Error;

    fn try_from(s: &[u8]) -> Result<Share> {
        if s.is_empty() {
            return Err(Error::ShareTooShort(0));
        }
        if s[0] == 0 {
            return Err(Error::InvalidShareId(0));
        }
        Ok(Share::new(s[0], &s[1..]))
    }
}

/// Collects shares into a [`ShareMap`]. A later share with the same id replaces an earlier one.
pub fn to_share_map<'a, T>(shares: T) -> ShareMap
where
    T: IntoIterator<Item = &'a Share>,
{
    shares.into_iter().map(|s| (s.id(), s.value())).collect()
}

/// Turns a [`ShareMap`] back into shares, sorted by id.
pub fn from_share_map(shares: &ShareMap) -> Vec<Share> {
    let mut out: Vec<Share> = shares
        .iter()
        .map(|(id, value)| Share::new(*id, value))
        .collect();
    out.sort_by_key(Share::id);
    out
}
