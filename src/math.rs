// A module which contains necessary algorithms to compute Shamir's shares and recover secrets

use alloc::{vec, vec::Vec};

use rand::{CryptoRng, RngCore};

#[cfg(feature = "zeroize_memory")]
use zeroize::Zeroize;

use super::error::{Error, Result};
use super::field::GF256;
use super::share::Share;

/// Polynomial over GF(256), coefficients in ascending degree order:
/// `[a0, a1, a2]` is `a0 + a1·x + a2·x²`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "zeroize_memory", derive(Zeroize))]
#[cfg_attr(feature = "zeroize_memory", zeroize(drop))]
pub struct Polynomial {
    coefficients: Vec<GF256>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<GF256>) -> Self {
        Polynomial { coefficients }
    }

    pub fn coefficients(&self) -> &[GF256] {
        &self.coefficients
    }

    /// Evaluates the polynomial at `x` with Horner's method.
    pub fn evaluate(&self, x: GF256) -> GF256 {
        self.coefficients
            .iter()
            .rev()
            .fold(GF256::ZERO, |acc, c| acc * x + *c)
    }
}

// Generates `k` coefficients: `s` as the constant term followed by `k - 1` random bytes.
// A draw whose highest-degree coefficient is zero is thrown away and redrawn, so the
// polynomial always has degree exactly `k - 1`.
pub fn random_polynomial<R: RngCore + CryptoRng>(
    s: GF256,
    k: u8,
    rng: &mut R,
) -> Result<Polynomial> {
    if k == 0 {
        return Err(Error::ZeroThreshold);
    }

    let mut random = vec![0u8; k as usize - 1];
    while !random.is_empty() {
        rng.try_fill_bytes(&mut random).map_err(Error::Entropy)?;
        if random.last() != Some(&0) {
            break;
        }
        tracing::trace!(degree = k - 1, "leading coefficient is zero, redrawing");
    }

    let mut coefficients = Vec::with_capacity(k as usize);
    coefficients.push(s);
    coefficients.extend(random.iter().copied().map(GF256));

    #[cfg(feature = "zeroize_memory")]
    random.zeroize();

    Ok(Polynomial::new(coefficients))
}

// Returns an iterator over the points of the `polys` polynomials passed as argument.
// Each item of the iterator is a share `(x, [f_1(x), f_2(x)..])` where each `f_i` is the result for the ith polynomial.
// Each polynomial corresponds to one byte chunk of the original secret.
// The iterator will start at `x = 1` and end at `x = 255`.
pub fn get_evaluator(polys: Vec<Polynomial>) -> impl Iterator<Item = Share> {
    (1..=u8::MAX).map(GF256).map(move |x| Share {
        x,
        y: polys.iter().map(|p| p.evaluate(x)).collect(),
    })
}

/// Lagrange basis polynomials `l_i` evaluated at `x`:
/// `l_i(x) = Π_{j≠i} (x - x_j) / (x_i - x_j)`.
///
/// Fails with [`Error::DivisionByZero`] if two x-coordinates coincide.
pub fn lagrange_basis(xs: &[GF256], x: GF256) -> Result<Vec<GF256>> {
    xs.iter()
        .enumerate()
        .map(|(i, &x_i)| {
            xs.iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .try_fold(GF256::ONE, |acc, (_, &x_j)| {
                    (x - x_j).checked_div(x_i - x_j).map(|q| acc * q)
                })
        })
        .collect()
}

/// Value at `x` of the unique polynomial of degree `< points.len()` through `points`.
pub fn interpolate_at(points: &[(GF256, GF256)], x: GF256) -> Result<GF256> {
    let xs: Vec<GF256> = points.iter().map(|(x_i, _)| *x_i).collect();
    let basis = lagrange_basis(&xs, x)?;

    Ok(points
        .iter()
        .zip(basis)
        .map(|((_, y_i), l_i)| *y_i * l_i)
        .sum::<GF256>())
}

/// Finds the [root of the Lagrange polynomial](https://en.wikipedia.org/wiki/Shamir%27s_Secret_Sharing#Computationally_efficient_approach),
/// i.e. its constant term.
///
/// With fewer points than the degree of the sampled polynomial plus one, the
/// result is some field element unrelated to the real constant term.
pub fn intercept_at_zero(points: &[(GF256, GF256)]) -> Result<GF256> {
    interpolate_at(points, GF256::ZERO)
}

// Interpolates every byte position of `shares` at `x`. All shares must have the same `y` length.
// The basis only depends on the x-coordinates, so it is computed once for all positions.
pub fn interpolate(shares: &[&Share], x: GF256) -> Result<Vec<GF256>> {
    let xs: Vec<GF256> = shares.iter().map(|s| s.x).collect();
    let basis = lagrange_basis(&xs, x)?;
    let length = shares.first().map_or(0, |s| s.y.len());

    Ok((0..length)
        .map(|i| {
            shares
                .iter()
                .zip(basis.iter())
                .map(|(s, l)| s.y[i] * *l)
                .sum::<GF256>()
        })
        .collect())
}

// Computes the share with id `x` from already known shares.
pub fn reshare(shares: &[&Share], x: GF256) -> Result<Share> {
    Ok(Share {
        x,
        y: interpolate(shares, x)?,
    })
}
