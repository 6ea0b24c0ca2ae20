// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Generation of random primes and safe primes.
//!
//! A safe prime is a prime `P` such that `Q = (P - 1) / 2` is also prime.
//! Safe primes are used as the factors of Paillier moduli.

use crate::errors::Result;
use libpaillier::unknown_order::BigNumber;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A safe prime `p` together with the Sophie Germain prime `q = (p - 1) / 2`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafePrimePair {
    p: BigNumber,
    q: BigNumber,
}

impl SafePrimePair {
    /// The safe prime `P = 2Q + 1`.
    pub fn p(&self) -> &BigNumber {
        &self.p
    }

    /// The prime `Q = (P - 1) / 2`.
    pub fn q(&self) -> &BigNumber {
        &self.q
    }

    /// Consumes the pair, returning `(P, Q)`.
    pub fn into_parts(self) -> (BigNumber, BigNumber) {
        (self.p, self.q)
    }
}

/// Smallest bit length handed to [`BigNumber::prime`].
pub(crate) const MIN_PRIME_BITS: usize = 128;

/// Samples a random prime of exactly `bits` bits.
///
/// `BigNumber` draws candidates from the operating system's generator, so
/// `_rng` is not consumed.
#[cfg_attr(feature = "flame_it", flame("safe_primes"))]
pub(crate) fn random_prime<R: RngCore + CryptoRng>(_rng: &mut R, bits: usize) -> Result<BigNumber> {
    if bits < MIN_PRIME_BITS {
        return arg_err!("Primes must have at least 128 bits");
    }
    Ok(BigNumber::prime(bits))
}

/// Generates a safe prime `P` of `bit_length` bits and the prime `Q` with
/// `P = 2Q + 1`.
///
/// Random primes `Q` of `bit_length - 1` bits are sampled until `2Q + 1`
/// passes [`BigNumber::is_prime`]. The expected number of iterations grows with
/// the reciprocal of the prime density at that size, so large bit lengths
/// take a while.
#[instrument(skip(rng))]
pub fn generate_safe_primes<R: RngCore + CryptoRng>(
    rng: &mut R,
    bit_length: usize,
) -> Result<SafePrimePair> {
    if bit_length <= MIN_PRIME_BITS {
        return arg_err!("Safe primes must have more than 128 bits");
    }
    let mut attempts = 0usize;
    loop {
        attempts += 1;
        let q = random_prime(rng, bit_length - 1)?;
        // P = 2Q + 1 = (Q << 1) | 1
        let p = (q.clone() << 1usize) + BigNumber::one();
        if p.is_prime() {
            debug!(attempts, "Found safe prime.");
            return Ok(SafePrimePair { p, q });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{bit_length, get_test_rng};

    #[test]
    fn random_primes_have_the_requested_size() -> Result<()> {
        let mut rng = get_test_rng();
        for bits in [128, 200, 256] {
            let p = random_prime(&mut rng, bits)?;
            assert_eq!(bit_length(&p), bits);
            assert!(p.is_prime());
        }
        Ok(())
    }

    #[test]
    fn generated_safe_primes_are_safe() -> Result<()> {
        let mut rng = get_test_rng();
        for bits in [129, 256] {
            let pair = generate_safe_primes(&mut rng, bits)?;
            assert!(bit_length(pair.p()) >= bits);
            assert!(pair.p().is_prime());
            assert!(pair.q().is_prime());
            let (p, q) = pair.into_parts();
            assert_eq!((p - BigNumber::one()) / BigNumber::from(2u64), q);
        }
        Ok(())
    }

    #[test]
    fn tiny_bit_lengths_are_rejected() {
        let mut rng = get_test_rng();
        assert!(generate_safe_primes(&mut rng, 2).is_err());
        assert!(generate_safe_primes(&mut rng, MIN_PRIME_BITS).is_err());
        assert!(random_prime(&mut rng, 64).is_err());
    }
}
