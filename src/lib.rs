// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Paillier encryption with a proof of elliptic-curve discrete logarithm
//!
//! The Paillier cryptosystem is an additively homomorphic public-key scheme
//! whose security rests on the hardness of factoring. This crate provides key
//! generation from safe primes, encryption, decryption and the homomorphic
//! operations, together with a non-interactive zero-knowledge proof
//! ([Π-dlog](zkp::pidlog)) that a ciphertext encrypts the discrete logarithm
//! `x` of a public point `y = x·G` on
//! [secp256k1](https://en.bitcoin.it/wiki/Secp256k1).
//!
//! Such a proof lets the owner of an ECDSA key hand its secret to another
//! party in encrypted form, while anyone can check that the ciphertext really
//! holds the secret behind the public key. This is the building block of
//! two-party signing protocols in the style of MacKenzie and Reiter.
//!
//! ```no_run
//! use paillier_dlog::{DecryptionKey, EcKeyPair, PRIME_BITS};
//! # fn main() -> paillier_dlog::errors::Result<()> {
//! let mut rng = rand::rngs::OsRng;
//! let decryption_key = DecryptionKey::new(&mut rng, PRIME_BITS)?;
//! let key_pair = EcKeyPair::generate(&mut rng);
//!
//! let (ciphertext, proof) = decryption_key
//!     .encryption_key()
//!     .encrypt_secret_scalar(&mut rng, &key_pair)?;
//! let secret = decryption_key.decrypt_secret_scalar(key_pair.public(), &ciphertext, &proof)?;
//! assert_eq!(&secret.public_point(), key_pair.public());
//! # Ok(())
//! # }
//! ```
//!
//! Note that this library performs no communication: proofs, ciphertexts and
//! keys are [`serde`] types that the caller ships however it likes.

#![warn(missing_docs)]
#![cfg_attr(feature = "flame_it", feature(proc_macro_hygiene))]
#[cfg(feature = "flame_it")]
extern crate flame;
#[cfg(feature = "flame_it")]
#[macro_use]
extern crate flamer;

#[macro_use]
pub mod errors;

pub mod curve;
mod key;
pub mod paillier;
pub mod parameters;
pub mod safe_primes;
#[cfg(test)]
mod safe_primes_512;
mod utils;
pub mod zkp;

pub use curve::{k256_order, verify_signature, CurvePoint, EcKeyPair, SecretScalar};
pub use paillier::{Ciphertext, DecryptionKey, EncryptionKey, Nonce};
pub use parameters::{PRIME_BITS, PROOF_CONTEXT_BITS};
pub use safe_primes::{generate_safe_primes, SafePrimePair};
pub use zkp::{
    context::ProofContext,
    pidlog::{PiDlogInput, PiDlogProof, PiDlogSecret},
    Proof,
};
