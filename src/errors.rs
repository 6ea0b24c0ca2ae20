// Copyright (c) Facebook, Inc. and its affiliates.
// Modifications Copyright (c) 2022-2023 Bolt Labs Holdings, Inc
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! A list of error types which are produced by the cryptographic primitives of
//! this crate.
use core::fmt::Debug;
use thiserror::Error;

/// The default Result type used in this crate
pub type Result<T> = std::result::Result<T, InternalError>;

/// Represents an error in the manipulation of internal cryptographic data
#[derive(Clone, Eq, PartialEq, Error, Debug)]
#[allow(missing_docs)]
pub enum InternalError {
    #[error("Proof was rejected by the verifier")]
    ProofRejected,
    #[error("Proof input is malformed: `{0}`")]
    MalformedProofInput(String),
    #[error("Could not invert a BigNumber")]
    CouldNotInvertBigNumber,
    #[error("Failed to convert BigNumber to k256::Scalar, as BigNumber was not in [0,q)")]
    CouldNotConvertToScalar,
    #[error("Decrypted value does not match the expected public point")]
    PublicPointMismatch,
    #[error("Could not produce or check an ECDSA signature")]
    SignatureInstantiationError,
    #[error("Represents some code assumption that was checked at runtime but failed to be true")]
    InternalInvariantFailed,
    #[error("Function call contained invalid arguments: `{0}`")]
    InvalidArgument(String),
}

macro_rules! malformed_err {
    ($x:expr) => {{
        Err(crate::errors::InternalError::MalformedProofInput(
            String::from($x),
        ))
    }};
}

macro_rules! arg_err {
    ($x:expr) => {{
        Err(crate::errors::InternalError::InvalidArgument(String::from(
            $x,
        )))
    }};
}
