// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Security parameter definitions.
//!
//! The Paillier modulus is the product of two [`PRIME_BITS`]-bit safe primes,
//! giving a 2048-bit modulus and 112 bits of computational security per NIST's
//! Recommendation for Key Management \[1\]. The auxiliary modulus used by
//! [Π-dlog](crate::zkp::pidlog) is of the same size, which is the minimum for
//! soundness under the strong-RSA assumption.
//!
//! ## References
//! 1. Recommendation for Key Management, Special Publication 800-57 Part 1 Rev. 5, NIST, 05/2020.
//!    Interpreted via [keylength.org](https://www.keylength.com/en/compare/).

/// Bit size of the (safe) prime factors of a Paillier modulus.
///
/// The product of two 1024-bit primes will produce 2048-bit Pallier moduli.
pub const PRIME_BITS: usize = 1024;

/// Bit size of the auxiliary RSA modulus `Ñ` generated for each
/// [Π-dlog](crate::zkp::pidlog) proof.
pub const PROOF_CONTEXT_BITS: usize = 2048;

/// Size in bytes of the Fiat-Shamir challenge `e`.
pub(crate) const CHALLENGE_BYTES: usize = 32;
