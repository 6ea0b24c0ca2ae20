// Copyright (c) Facebook, Inc. and its affiliates.
// Modifications Copyright (c) 2022-2023 Bolt Labs Holdings, Inc
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! The Paillier cryptosystem.
//!
//! A [`DecryptionKey`] is built from two primes `P, Q` and stores the values
//! needed to decrypt: `N = PQ`, `N^2`, `Γ = 1 + N`, `φ(N) = (P-1)(Q-1)` and
//! `φ(N)^-1 mod N`. Its [`EncryptionKey`] only carries `N`, `N^2` and `Γ`.
//!
//! Encryption of `m ∈ [0, N)` with nonce `r ∈ Z*_N` is `Γ^m r^N mod N^2`.
//! The scheme is additively homomorphic: the product of two ciphertexts
//! decrypts to the sum of their plaintexts modulo `N`.
//!
//! Neither encryption nor decryption validates its input. Plaintexts outside
//! `[0, N)` and ciphertexts produced under another key give well-defined but
//! meaningless results.

use crate::{
    errors::{InternalError, Result},
    safe_primes::generate_safe_primes,
    utils::{modpow, modpow_product, random_bn_in_z_star},
};
use libpaillier::unknown_order::BigNumber;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use tracing::{info, instrument, warn};
use zeroize::Zeroizing;

/// A Paillier ciphertext, an integer modulo `N^2`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ciphertext(pub(crate) BigNumber);

impl Ciphertext {
    /// Wraps an integer received from a counterparty.
    pub fn new(value: BigNumber) -> Self {
        Ciphertext(value)
    }

    /// The ciphertext as an integer.
    pub fn value(&self) -> &BigNumber {
        &self.0
    }
}

/// The randomness `r` used to produce a [`Ciphertext`].
///
/// It is only needed as a witness for [Π-dlog](crate::zkp::pidlog); plain
/// callers can drop it. It is wiped from memory on drop.
#[derive(Clone)]
pub struct Nonce(Zeroizing<Vec<u8>>);

impl Nonce {
    fn from_bn(r: &BigNumber) -> Self {
        Nonce(Zeroizing::new(r.to_bytes()))
    }

    pub(crate) fn value(&self) -> BigNumber {
        BigNumber::from_slice(&*self.0)
    }
}

impl Debug for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Nonce([redacted])")
    }
}

/// A Paillier public key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionKey {
    n: BigNumber,
    nn: BigNumber,
    gamma: BigNumber,
}

impl EncryptionKey {
    /// The modulus `N`.
    pub fn n(&self) -> &BigNumber {
        &self.n
    }

    /// The squared modulus `N^2`.
    pub fn nn(&self) -> &BigNumber {
        &self.nn
    }

    /// The base `Γ = 1 + N`.
    pub fn gamma(&self) -> &BigNumber {
        &self.gamma
    }

    /// Checks that `N > 1`, `N^2 = N * N` and `Γ = 1 + N`, which may not hold
    /// for a key received over the wire.
    pub(crate) fn check_well_formed(&self) -> Result<()> {
        let one = BigNumber::one();
        if self.n <= one || self.nn != &self.n * &self.n || self.gamma != &self.n + &one {
            return malformed_err!("Paillier encryption key is inconsistent");
        }
        Ok(())
    }

    /// Encrypts `m` under a fresh nonce and returns the ciphertext together
    /// with the nonce.
    ///
    /// The caller must ensure `0 <= m < N`; other values are encrypted
    /// anyway and will not decrypt to `m`.
    #[cfg_attr(feature = "flame_it", flame("EncryptionKey"))]
    pub fn encrypt<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        m: &BigNumber,
    ) -> Result<(Ciphertext, Nonce)> {
        if m < &BigNumber::zero() || m >= &self.n {
            warn!("Encrypting a plaintext outside of [0, N); it will not decrypt to itself.");
        }
        let r = random_bn_in_z_star(rng, &self.n)?;
        let nonce = Nonce::from_bn(&r);
        Ok((self.encrypt_with_nonce(m, &nonce), nonce))
    }

    /// Encrypts `m` with the given nonce: `Γ^m r^N mod N^2`.
    pub fn encrypt_with_nonce(&self, m: &BigNumber, nonce: &Nonce) -> Ciphertext {
        Ciphertext(modpow_product(
            &self.gamma,
            m,
            &nonce.value(),
            &self.n,
            &self.nn,
        ))
    }

    /// Homomorphic addition: the result decrypts to `m1 + m2 mod N`.
    pub fn add(&self, c1: &Ciphertext, c2: &Ciphertext) -> Ciphertext {
        Ciphertext(c1.0.modmul(&c2.0, &self.nn))
    }

    /// Homomorphic multiplication by a known constant: the result decrypts to
    /// `k * m mod N`.
    pub fn multiply(&self, c: &Ciphertext, k: &BigNumber) -> Ciphertext {
        Ciphertext(modpow(&c.0, k, &self.nn))
    }
}

/// A Paillier private key.
///
/// Constructed once by [`DecryptionKey::from_primes`] (or
/// [`DecryptionKey::new`]) and immutable afterwards.
#[derive(Clone)]
pub struct DecryptionKey {
    p: BigNumber,
    q: BigNumber,
    n: BigNumber,
    nn: BigNumber,
    gamma: BigNumber,
    totient: BigNumber,
    totient_inv: BigNumber,
}

impl Debug for DecryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptionKey")
            .field("n", &self.n)
            .finish_non_exhaustive()
    }
}

impl DecryptionKey {
    /// Generates a key from two fresh, distinct safe primes of `prime_bits`
    /// bits each.
    #[instrument(skip(rng))]
    pub fn new<R: RngCore + CryptoRng>(rng: &mut R, prime_bits: usize) -> Result<Self> {
        let p = generate_safe_primes(rng, prime_bits)?.into_parts().0;
        loop {
            let q = generate_safe_primes(rng, prime_bits)?.into_parts().0;
            if p != q {
                let key = Self::from_primes(&p, &q)?;
                info!("Generated Paillier decryption key.");
                return Ok(key);
            }
        }
    }

    /// Builds a key from the primes `p` and `q`.
    ///
    /// Fails if the primes are equal or smaller than two, or if `φ(N)` is not
    /// invertible modulo `N`.
    pub fn from_primes(p: &BigNumber, q: &BigNumber) -> Result<Self> {
        let one = BigNumber::one();
        if p <= &one || q <= &one {
            return arg_err!("Paillier factors must be larger than one");
        }
        if p == q {
            return arg_err!("Paillier factors must be distinct");
        }

        let n = p * q;
        let nn = &n * &n;
        let gamma = &n + &one;
        let totient = (p - &one) * (q - &one);
        let totient_inv = totient
            .invert(&n)
            .ok_or(InternalError::CouldNotInvertBigNumber)?;

        Ok(Self {
            p: p.clone(),
            q: q.clone(),
            n,
            nn,
            gamma,
            totient,
            totient_inv,
        })
    }

    /// Returns the public projection of this key.
    pub fn encryption_key(&self) -> EncryptionKey {
        EncryptionKey {
            n: self.n.clone(),
            nn: self.nn.clone(),
            gamma: self.gamma.clone(),
        }
    }

    /// The modulus `N`.
    pub fn modulus(&self) -> &BigNumber {
        &self.n
    }

    /// The factors `(P, Q)` of the modulus.
    pub fn primes(&self) -> (&BigNumber, &BigNumber) {
        (&self.p, &self.q)
    }

    /// Decrypts `c`: `((c^φ(N) mod N^2) - 1) / N * φ(N)^-1 mod N`.
    ///
    /// The division is exact for every ciphertext produced under this key.
    /// Other ciphertexts decrypt to garbage.
    #[cfg_attr(feature = "flame_it", flame("DecryptionKey"))]
    pub fn decrypt(&self, c: &Ciphertext) -> BigNumber {
        let c_hat = modpow(&c.0, &self.totient, &self.nn);
        let m_hat = (c_hat - BigNumber::one()) / &self.n;
        m_hat.modmul(&self.totient_inv, &self.n)
    }
}
