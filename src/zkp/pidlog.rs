// Copyright (c) Facebook, Inc. and its affiliates.
// Modifications Copyright (c) 2022 Bolt Labs Holdings, Inc
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Implements a non-interactive proof that a Paillier ciphertext encrypts the
//! discrete logarithm of an elliptic-curve point.
//!
//! The statement is: given a Paillier public key `N`, a ciphertext `w` and a
//! point `y`, the prover knows `x ∈ [1, q)` and `r ∈ Z*_N` such that
//! `w = Γ^x r^N mod N^2` and `y = x·G`. This is the Sigma protocol of
//! MacKenzie and Reiter (Section 6 of
//! <https://www.cs.unc.edu/~reiter/papers/2004/IJIS.pdf>) made non-interactive
//! with the Fiat-Shamir transform over a [`Transcript`].
//!
//! Commitments to `x` live in a separate RSA group described by a
//! [`ProofContext`], which the prover generates and ships inside the proof.

use super::{context::ProofContext, Proof};
use crate::{
    curve::{k256_order, CurvePoint, SecretScalar},
    errors::*,
    paillier::{Ciphertext, EncryptionKey, Nonce},
    parameters::{CHALLENGE_BYTES, PROOF_CONTEXT_BITS},
    utils::{byte_width, modpow, modpow_product, random_bn_in_range, to_fixed_bytes},
};
use libpaillier::unknown_order::BigNumber;
use merlin::Transcript;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Proof that a ciphertext encrypts the discrete logarithm of a point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PiDlogProof {
    /// Commitment parameters `(Ñ, h1, h2)` chosen by the prover.
    context: ProofContext,
    /// Commitment to the secret, `z = h1^x h2^ρ mod Ñ`.
    z: BigNumber,
    /// Mask of the public point, `u1 = α·G`.
    u1: CurvePoint,
    /// Mask of the ciphertext, `u2 = Γ^α β^N mod N^2`.
    u2: BigNumber,
    /// Commitment to the mask, `u3 = h1^α h2^γ mod Ñ`.
    u3: BigNumber,
    /// Fiat-Shamir challenge.
    e: BigNumber,
    /// Response `s1 = e·x + α`.
    s1: BigNumber,
    /// Response `s2 = r^e β mod N`.
    s2: BigNumber,
    /// Response `s3 = e·ρ + γ`.
    s3: BigNumber,
}

/// Public input to [`PiDlogProof`].
#[derive(Debug, Clone)]
pub struct PiDlogInput {
    encryption_key: EncryptionKey,
    ciphertext: Ciphertext,
    public_point: CurvePoint,
}

impl PiDlogInput {
    /// Collects the Paillier key `N`, the ciphertext `w` and the point `y`.
    pub fn new(
        encryption_key: &EncryptionKey,
        ciphertext: &Ciphertext,
        public_point: &CurvePoint,
    ) -> Self {
        Self {
            encryption_key: encryption_key.clone(),
            ciphertext: ciphertext.clone(),
            public_point: *public_point,
        }
    }
}

/// The prover's witness: the scalar `x` and the nonce `r` used to encrypt it.
#[derive(Debug)]
pub struct PiDlogSecret {
    x: SecretScalar,
    r: Nonce,
}

impl PiDlogSecret {
    /// Collects the witness for a ciphertext produced by
    /// [`EncryptionKey::encrypt`].
    pub fn new(x: &SecretScalar, r: &Nonce) -> Self {
        Self {
            x: x.clone(),
            r: r.clone(),
        }
    }
}

impl Proof for PiDlogProof {
    type CommonInput = PiDlogInput;
    type ProverSecret = PiDlogSecret;

    /// Generates a fresh [`ProofContext`] of
    /// [`PROOF_CONTEXT_BITS`](crate::parameters::PROOF_CONTEXT_BITS) bits and
    /// proves under it.
    #[cfg_attr(feature = "flame_it", flame("PiDlogProof"))]
    fn prove<R: RngCore + CryptoRng>(
        input: &Self::CommonInput,
        secret: &Self::ProverSecret,
        rng: &mut R,
    ) -> Result<Self> {
        let context = ProofContext::generate(rng, PROOF_CONTEXT_BITS)?;
        Self::prove_with_context(context, input, secret, rng)
    }

    #[cfg_attr(feature = "flame_it", flame("PiDlogProof"))]
    #[instrument(skip_all)]
    fn verify(&self, input: &Self::CommonInput) -> Result<()> {
        self.check_well_formed(input)?;

        let key = &input.encryption_key;
        let n_tilde = self.context.modulus();

        // First, do Fiat-Shamir consistency check
        let e = challenge(input, &self.context, &self.z, &self.u1, &self.u2, &self.u3)?;
        let fs_check = e == self.e;

        // Do equality checks

        let eq_check_1 = {
            let lhs = CurvePoint::GENERATOR.multiply(&self.s1)?;
            let rhs = self.u1.add(&input.public_point.multiply(&self.e)?);
            lhs == rhs
        };

        let eq_check_2 = {
            let lhs = modpow_product(key.gamma(), &self.s1, &self.s2, key.n(), key.nn());
            let rhs = self
                .u2
                .modmul(&modpow(input.ciphertext.value(), &self.e, key.nn()), key.nn());
            lhs == rhs
        };

        let eq_check_3 = {
            let lhs = self.context.commit(&self.s1, &self.s3);
            let rhs = self.u3.modmul(&modpow(&self.z, &self.e, n_tilde), n_tilde);
            lhs == rhs
        };

        if fs_check && eq_check_1 && eq_check_2 && eq_check_3 {
            Ok(())
        } else {
            debug!("Π-dlog proof rejected.");
            Err(InternalError::ProofRejected)
        }
    }
}

impl PiDlogProof {
    /// Proves under a caller-supplied [`ProofContext`].
    ///
    /// Nothing about the witness is checked: a prover holding a bad witness
    /// gets a proof that fails verification.
    #[cfg_attr(feature = "flame_it", flame("PiDlogProof"))]
    #[instrument(skip_all)]
    pub fn prove_with_context<R: RngCore + CryptoRng>(
        context: ProofContext,
        input: &PiDlogInput,
        secret: &PiDlogSecret,
        rng: &mut R,
    ) -> Result<Self> {
        context.check_well_formed()?;
        input.encryption_key.check_well_formed()?;

        let key = &input.encryption_key;
        let one = BigNumber::one();
        let q = k256_order();
        let q_cubed = &q * &q * &q;
        let n_tilde = context.modulus();

        let alpha = random_bn_in_range(rng, &one, &q_cubed)?;
        let beta = random_bn_in_range(rng, &one, key.n())?;
        let rho = random_bn_in_range(rng, &one, &(&q * n_tilde))?;
        let gamma = random_bn_in_range(rng, &one, &(&q_cubed * n_tilde))?;

        let z = secret.x.expose(|x| context.commit(x, &rho));
        let u1 = CurvePoint::GENERATOR.multiply(&alpha)?;
        let u2 = modpow_product(key.gamma(), &alpha, &beta, key.n(), key.nn());
        let u3 = context.commit(&alpha, &gamma);

        let e = challenge(input, &context, &z, &u1, &u2, &u3)?;

        let s1 = secret.x.expose(|x| &e * x + &alpha);
        let s2 = modpow(&secret.r.value(), &e, key.n()).modmul(&beta, key.n());
        let s3 = &e * &rho + &gamma;

        Ok(Self {
            context,
            z,
            u1,
            u2,
            u3,
            e,
            s1,
            s2,
            s3,
        })
    }

    /// The commitment parameters the proof was produced under.
    pub fn context(&self) -> &ProofContext {
        &self.context
    }

    /// Rejects values outside the ranges the equality checks are defined on.
    fn check_well_formed(&self, input: &PiDlogInput) -> Result<()> {
        self.context.check_well_formed()?;
        input.encryption_key.check_well_formed()?;

        let zero = BigNumber::zero();
        let one = BigNumber::one();
        let n = input.encryption_key.n();
        let nn = input.encryption_key.nn();
        let n_tilde = self.context.modulus();

        let in_range = |x: &BigNumber, max: &BigNumber| x >= &one && x < max;
        if !in_range(&self.z, n_tilde) || !in_range(&self.u3, n_tilde) {
            return malformed_err!("z and u3 must lie in [1, N~)");
        }
        if !in_range(&self.u2, nn) || !in_range(input.ciphertext.value(), nn) {
            return malformed_err!("u2 and w must lie in [1, N^2)");
        }
        if !in_range(&self.s2, n) {
            return malformed_err!("s2 must lie in [1, N)");
        }
        if self.s1 < zero || self.s3 < zero {
            return malformed_err!("s1 and s3 must be non-negative");
        }
        if self.e < zero || self.e >= (BigNumber::one() << (8 * CHALLENGE_BYTES)) {
            return malformed_err!("e is wider than a challenge");
        }
        Ok(())
    }
}

/// Derives the challenge `e = Hash(G, y, w, z, u1, u2, u3)`.
///
/// Integers are written big-endian at the byte width of their modulus and
/// points as their two affine coordinates, so every field has a fixed size.
fn challenge(
    input: &PiDlogInput,
    context: &ProofContext,
    z: &BigNumber,
    u1: &CurvePoint,
    u2: &BigNumber,
    u3: &BigNumber,
) -> Result<BigNumber> {
    let nn_width = byte_width(input.encryption_key.nn());
    let n_tilde_width = byte_width(context.modulus());

    let mut transcript = Transcript::new(b"PiDlogProof");
    append_point(&mut transcript, b"G", &CurvePoint::GENERATOR);
    append_point(&mut transcript, b"y", &input.public_point);
    transcript.append_message(
        b"w",
        &to_fixed_bytes(input.ciphertext.value(), nn_width)?,
    );
    transcript.append_message(b"z", &to_fixed_bytes(z, n_tilde_width)?);
    append_point(&mut transcript, b"u1", u1);
    transcript.append_message(b"u2", &to_fixed_bytes(u2, nn_width)?);
    transcript.append_message(b"u3", &to_fixed_bytes(u3, n_tilde_width)?);

    let mut e = [0u8; CHALLENGE_BYTES];
    transcript.challenge_bytes(b"e", &mut e);
    Ok(BigNumber::from_slice(e))
}

fn append_point(transcript: &mut Transcript, label: &'static [u8], point: &CurvePoint) {
    let (x, y) = point.to_coordinate_bytes();
    transcript.append_message(label, &[x, y].concat());
}
