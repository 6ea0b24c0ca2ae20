// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{InternalError, Result};
use libpaillier::unknown_order::BigNumber;
use rand::{CryptoRng, RngCore};

/// Computes a^e (mod n)
#[cfg_attr(feature = "flame_it", flame("utils"))]
pub(crate) fn modpow(a: &BigNumber, e: &BigNumber, n: &BigNumber) -> BigNumber {
    a.modpow(e, n)
}

/// Computes `a^x * b^y (mod n)`, the shape shared by Paillier encryption and
/// the commitments in [Π-dlog](crate::zkp::pidlog).
pub(crate) fn modpow_product(
    a: &BigNumber,
    x: &BigNumber,
    b: &BigNumber,
    y: &BigNumber,
    n: &BigNumber,
) -> BigNumber {
    modpow(a, x, n).modmul(&modpow(b, y, n), n)
}

/// Generate a random BigNumber uniformly in the range `[0, n)`.
///
/// `BigNumber` draws from the operating system's generator, so `_rng` is
/// not consumed.
pub(crate) fn random_positive_bn<R: RngCore + CryptoRng>(_rng: &mut R, n: &BigNumber) -> BigNumber {
    BigNumber::random(n)
}

/// Generate a random BigNumber uniformly in the range `[min, max)`.
///
/// Fails if the range is empty.
pub(crate) fn random_bn_in_range<R: RngCore + CryptoRng>(
    rng: &mut R,
    min: &BigNumber,
    max: &BigNumber,
) -> Result<BigNumber> {
    if min >= max {
        return arg_err!("Sampling range must be non-empty");
    }
    Ok(random_positive_bn(rng, &(max - min)) + min)
}

/// Generate a random BigNumber in Z*_N, i.e. in `[1, N)` and coprime to `N`.
pub(crate) fn random_bn_in_z_star<R: RngCore + CryptoRng>(
    rng: &mut R,
    n: &BigNumber,
) -> Result<BigNumber> {
    if n <= &BigNumber::one() {
        return arg_err!("Modulus of Z*_N must be larger than one");
    }
    loop {
        let bn = random_bn_in_range(rng, &BigNumber::one(), n)?;
        if bn.gcd(n) == BigNumber::one() {
            return Ok(bn);
        }
    }
}

/// Number of significant bits of a non-negative BigNumber.
pub(crate) fn bit_length(n: &BigNumber) -> usize {
    let bytes = n.to_bytes();
    match bytes.iter().position(|b| *b != 0) {
        Some(i) => (bytes.len() - i) * 8 - bytes[i].leading_zeros() as usize,
        None => 0,
    }
}

/// Number of bytes needed to write any value in `[0, modulus)`.
pub(crate) fn byte_width(modulus: &BigNumber) -> usize {
    (bit_length(modulus) + 7) / 8
}

/// Big-endian encoding of `n` left-padded with zeros to exactly `width` bytes.
pub(crate) fn to_fixed_bytes(n: &BigNumber, width: usize) -> Result<Vec<u8>> {
    let bytes = n.to_bytes();
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    let significant = &bytes[start..];
    if significant.len() > width {
        return Err(InternalError::InternalInvariantFailed);
    }
    let mut out = vec![0u8; width - significant.len()];
    out.extend_from_slice(significant);
    Ok(out)
}

/// Returns an rng seeded from the OS, printing the seed so that the
/// elliptic-curve keys of a failing test can be replayed.
#[cfg(test)]
pub(crate) fn get_test_rng() -> rand::rngs::StdRng {
    use rand::{rngs::OsRng, SeedableRng};

    let mut seed = [0u8; 32];
    OsRng.fill_bytes(&mut seed);
    println!("test rng seed: {}", hex::encode(seed));
    rand::rngs::StdRng::from_seed(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bn_in_range() -> Result<()> {
        let mut rng = get_test_rng();
        let min = BigNumber::from(10u64);
        let max = BigNumber::from(13u64);
        for _ in 0..100 {
            let bn = random_bn_in_range(&mut rng, &min, &max)?;
            assert!(bn >= min && bn < max);
        }

        // Statistical test -- samples from a large range should be long enough
        let bound = BigNumber::one() << 800;
        let max_len = (0..100)
            .map(|_| bit_length(&random_positive_bn(&mut rng, &bound)))
            .max()
            .unwrap_or(0);
        assert!(max_len > 790);
        Ok(())
    }

    #[test]
    fn empty_range_is_rejected() {
        let mut rng = get_test_rng();
        let n = BigNumber::from(7u64);
        assert!(random_bn_in_range(&mut rng, &n, &n).is_err());
        assert!(random_bn_in_z_star(&mut rng, &BigNumber::one()).is_err());
    }

    #[test]
    fn z_star_samples_are_units() -> Result<()> {
        let mut rng = get_test_rng();
        let n = BigNumber::from(187u64);
        for _ in 0..200 {
            let bn = random_bn_in_z_star(&mut rng, &n)?;
            assert_eq!(bn.gcd(&n), BigNumber::one());
        }
        Ok(())
    }

    #[test]
    fn fixed_width_encoding() -> Result<()> {
        let n = BigNumber::from(0x0102u64);
        assert_eq!(to_fixed_bytes(&n, 4)?, vec![0, 0, 1, 2]);
        assert_eq!(to_fixed_bytes(&BigNumber::zero(), 2)?, vec![0, 0]);
        assert!(to_fixed_bytes(&n, 1).is_err());
        assert_eq!(bit_length(&n), 9);
        assert_eq!(byte_width(&BigNumber::from(255u64)), 1);
        assert_eq!(byte_width(&BigNumber::from(256u64)), 2);
        Ok(())
    }
}
