// Copyright (c) Facebook, Inc. and its affiliates.
// Modifications Copyright (c) 2022-2023 Bolt Labs Holdings, Inc
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Elliptic-curve primitives over secp256k1.
//!
//! This is a thin layer over [`k256`] exposing exactly what the rest of the
//! crate consumes: the generator and group order, scalar multiplication by a
//! [`BigNumber`], point addition and negation, fixed-width coordinate
//! encoding, key pairs and ECDSA signatures.

use crate::{
    errors::{InternalError, Result},
    utils::to_fixed_bytes,
};
use k256::{
    ecdsa::{
        signature::{Signer, Verifier},
        Signature, SigningKey, VerifyingKey,
    },
    elliptic_curve::{ff::PrimeField, group::Group, sec1::ToEncodedPoint},
    AffinePoint, FieldBytes, ProjectivePoint, Scalar, SecretKey,
};
use libpaillier::unknown_order::BigNumber;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Debug};
use zeroize::Zeroizing;

/// Size in bytes of a secp256k1 scalar or coordinate.
pub(crate) const COORDINATE_BYTES: usize = 32;

/// Big-endian encoding of the order of the secp256k1 group.
const K256_ORDER: [u8; COORDINATE_BYTES] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// Returns the order `q` of the secp256k1 group.
pub fn k256_order() -> BigNumber {
    BigNumber::from_slice(K256_ORDER)
}

/// Converts a BigNumber into a [`Scalar`], reducing it modulo the group order.
pub(crate) fn bn_to_scalar(x: &BigNumber) -> Result<Scalar> {
    let order = k256_order();
    let reduced = if x < &BigNumber::zero() {
        let magnitude = -x.clone();
        (&order - &(magnitude % &order)) % &order
    } else {
        x % &order
    };
    let bytes = to_fixed_bytes(&reduced, COORDINATE_BYTES)?;
    Option::from(Scalar::from_repr(FieldBytes::clone_from_slice(&bytes)))
        .ok_or(InternalError::CouldNotConvertToScalar)
}

/// A point on the secp256k1 curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvePoint(pub(crate) ProjectivePoint);

impl CurvePoint {
    /// The fixed generator `G` of the curve.
    pub const GENERATOR: Self = CurvePoint(ProjectivePoint::GENERATOR);

    /// The point at infinity.
    pub fn identity() -> Self {
        CurvePoint(ProjectivePoint::identity())
    }

    /// Returns `true` for the point at infinity.
    pub fn is_identity(&self) -> bool {
        self.0.is_identity().into()
    }

    /// Computes `k * self`.
    pub fn multiply(&self, k: &BigNumber) -> Result<Self> {
        Ok(CurvePoint(self.0 * bn_to_scalar(k)?))
    }

    /// Computes `self + other`.
    pub fn add(&self, other: &Self) -> Self {
        CurvePoint(self.0 + other.0)
    }

    /// Computes `-self`.
    pub fn negate(&self) -> Self {
        CurvePoint(-self.0)
    }

    /// Returns the affine `(x, y)` coordinates as fixed-width big-endian byte
    /// strings. The point at infinity is encoded as two all-zero strings.
    pub fn to_coordinate_bytes(&self) -> ([u8; COORDINATE_BYTES], [u8; COORDINATE_BYTES]) {
        let encoded = self.0.to_affine().to_encoded_point(false);
        let mut x = [0u8; COORDINATE_BYTES];
        let mut y = [0u8; COORDINATE_BYTES];
        if let (Some(ex), Some(ey)) = (encoded.x(), encoded.y()) {
            x.copy_from_slice(ex);
            y.copy_from_slice(ey);
        }
        (x, y)
    }

    /// SEC1 encoding of the point.
    fn to_sec1_bytes(self) -> Vec<u8> {
        self.0.to_affine().to_encoded_point(false).as_bytes().to_vec()
    }
}

impl Serialize for CurvePoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.to_affine().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CurvePoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let affine = AffinePoint::deserialize(deserializer)?;
        Ok(CurvePoint(ProjectivePoint::from(affine)))
    }
}

/// An opaque handle on a secret scalar `x` in `[1, q)`.
///
/// The scalar is wiped from memory when the handle is dropped. Code that needs
/// `x` as an integer borrows it through [`SecretScalar::expose`], which bounds
/// the lifetime of the integer copy to a closure.
#[derive(Clone)]
pub struct SecretScalar(SecretKey);

impl SecretScalar {
    /// Samples a uniformly random non-zero scalar.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        SecretScalar(SecretKey::random(&mut *rng))
    }

    /// Builds a handle from an integer, which must lie in `[1, q)`.
    pub(crate) fn from_bn(x: &BigNumber) -> Result<Self> {
        if x <= &BigNumber::zero() || x >= &k256_order() {
            return Err(InternalError::CouldNotConvertToScalar);
        }
        let bytes = Zeroizing::new(to_fixed_bytes(x, COORDINATE_BYTES)?);
        SecretKey::from_be_bytes(&bytes)
            .map(SecretScalar)
            .map_err(|_| InternalError::CouldNotConvertToScalar)
    }

    /// Runs `f` with the scalar as a [`BigNumber`].
    pub fn expose<T>(&self, f: impl FnOnce(&BigNumber) -> T) -> T {
        let bytes = Zeroizing::new(self.0.to_be_bytes().to_vec());
        let x = BigNumber::from_slice(&*bytes);
        f(&x)
    }

    /// Returns `x * G`.
    pub fn public_point(&self) -> CurvePoint {
        CurvePoint(self.0.public_key().to_projective())
    }
}

impl Debug for SecretScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretScalar([redacted])")
    }
}

/// An EC key pair `(x, y = x * G)`.
#[derive(Clone, Debug)]
pub struct EcKeyPair {
    secret: SecretScalar,
    public: CurvePoint,
}

impl EcKeyPair {
    /// Generates a fresh key pair.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self::from_secret(SecretScalar::random(rng))
    }

    /// Builds the key pair belonging to `secret`.
    pub fn from_secret(secret: SecretScalar) -> Self {
        let public = secret.public_point();
        Self { secret, public }
    }

    /// The secret scalar `x`.
    pub fn secret(&self) -> &SecretScalar {
        &self.secret
    }

    /// The public point `y`.
    pub fn public(&self) -> &CurvePoint {
        &self.public
    }

    /// ECDSA signature of `message` (hashed with SHA-256).
    pub fn sign(&self, message: &[u8]) -> Result<Signature> {
        let bytes = Zeroizing::new(self.secret.0.to_be_bytes().to_vec());
        let signing_key = SigningKey::from_bytes(&bytes)
            .map_err(|_| InternalError::SignatureInstantiationError)?;
        Ok(signing_key.sign(message))
    }
}

/// Checks an ECDSA signature on `message` against the public point `public`.
pub fn verify_signature(public: &CurvePoint, message: &[u8], signature: &Signature) -> bool {
    match VerifyingKey::from_sec1_bytes(&public.to_sec1_bytes()) {
        Ok(verifying_key) => verifying_key.verify(message, signature).is_ok(),
        Err(_) => false,
    }
}
