// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Generates the auxiliary parameters `(Ñ, h1, h2)` used by
//! [Π-dlog](crate::zkp::pidlog).
//!
//! `Ñ` is an RSA modulus unrelated to any Paillier modulus and `h1, h2` are
//! random units modulo `Ñ` other than one. Commitments `h1^x h2^r mod Ñ` are binding under
//! the strong-RSA assumption, provided the prover does not know the factors
//! of `Ñ` nor the discrete logarithm of `h1` to the base `h2`.

use crate::{
    errors::Result,
    safe_primes::{random_prime, MIN_PRIME_BITS},
    utils::{modpow_product, random_bn_in_z_star},
};
use libpaillier::unknown_order::BigNumber;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Smallest accepted bit length for `Ñ`, twice the smallest prime size.
const MIN_CONTEXT_BITS: usize = 2 * MIN_PRIME_BITS;

/// Commitment parameters `(Ñ, h1, h2)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofContext {
    /// The RSA modulus `Ñ`.
    modulus: BigNumber,
    /// First base `h1`.
    h1: BigNumber,
    /// Second base `h2`.
    h2: BigNumber,
}

impl ProofContext {
    /// Generates a fresh context whose modulus is the product of two random
    /// primes of `bit_length / 2` bits each.
    #[instrument(skip(rng))]
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R, bit_length: usize) -> Result<Self> {
        if bit_length < MIN_CONTEXT_BITS {
            return arg_err!("Proof context modulus is too small");
        }
        let p = random_prime(rng, bit_length / 2)?;
        loop {
            let q = random_prime(rng, bit_length - bit_length / 2)?;
            if p != q {
                return Self::from_primes(rng, &p, &q);
            }
        }
    }

    /// Builds a context from the primes `p` and `q`, sampling fresh bases.
    pub fn from_primes<R: RngCore + CryptoRng>(
        rng: &mut R,
        p: &BigNumber,
        q: &BigNumber,
    ) -> Result<Self> {
        if p == q {
            return arg_err!("Proof context factors must be distinct");
        }
        let modulus = p * q;
        let h1 = sample_base(rng, &modulus)?;
        let h2 = sample_base(rng, &modulus)?;
        Ok(Self { modulus, h1, h2 })
    }

    /// The modulus `Ñ`.
    pub fn modulus(&self) -> &BigNumber {
        &self.modulus
    }

    /// The base `h1`.
    pub fn h1(&self) -> &BigNumber {
        &self.h1
    }

    /// The base `h2`.
    pub fn h2(&self) -> &BigNumber {
        &self.h2
    }

    /// Computes `h1^value * h2^randomness mod Ñ`.
    pub(crate) fn commit(&self, value: &BigNumber, randomness: &BigNumber) -> BigNumber {
        modpow_product(&self.h1, value, &self.h2, randomness, &self.modulus)
    }

    /// Checks that `Ñ > 1` and that both bases lie in `[2, Ñ)`.
    pub(crate) fn check_well_formed(&self) -> Result<()> {
        let one = BigNumber::one();
        if self.modulus <= one {
            return malformed_err!("Proof context modulus must be larger than one");
        }
        for base in [&self.h1, &self.h2] {
            if base <= &one || base >= &self.modulus {
                return malformed_err!("Proof context bases must lie in [2, N~)");
            }
        }
        Ok(())
    }
}

/// Samples a unit modulo `modulus` other than one.
fn sample_base<R: RngCore + CryptoRng>(rng: &mut R, modulus: &BigNumber) -> Result<BigNumber> {
    loop {
        let base = random_bn_in_z_star(rng, modulus)?;
        if base != BigNumber::one() {
            return Ok(base);
        }
    }
}
