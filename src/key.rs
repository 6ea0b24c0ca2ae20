// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Moving an elliptic-curve secret key under Paillier encryption.
//!
//! The owner of an [`EcKeyPair`] encrypts its secret under a counterparty's
//! [`EncryptionKey`] and attaches a [`PiDlogProof`] so that anyone holding the
//! public point can check the ciphertext without decrypting it. The holder of
//! the matching [`DecryptionKey`] recovers the secret and checks it against
//! the public point.

use crate::{
    curve::{k256_order, CurvePoint, EcKeyPair, SecretScalar},
    errors::{InternalError, Result},
    paillier::{Ciphertext, DecryptionKey, EncryptionKey},
    zkp::{
        pidlog::{PiDlogInput, PiDlogProof, PiDlogSecret},
        Proof,
    },
};
use rand::{CryptoRng, RngCore};
use tracing::{instrument, warn};

impl EncryptionKey {
    /// Encrypts the secret of `key_pair` and proves that the ciphertext holds
    /// the discrete logarithm of its public point.
    ///
    /// The modulus must exceed the curve order so that the secret encrypts
    /// without wrapping.
    #[instrument(skip_all)]
    pub fn encrypt_secret_scalar<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        key_pair: &EcKeyPair,
    ) -> Result<(Ciphertext, PiDlogProof)> {
        if self.n() <= &k256_order() {
            return arg_err!("Paillier modulus must exceed the curve order");
        }
        let (ciphertext, nonce) = key_pair.secret().expose(|x| self.encrypt(rng, x))?;
        let input = PiDlogInput::new(self, &ciphertext, key_pair.public());
        let secret = PiDlogSecret::new(key_pair.secret(), &nonce);
        let proof = PiDlogProof::prove(&input, &secret, rng)?;
        Ok((ciphertext, proof))
    }
}

impl DecryptionKey {
    /// Checks `proof`, then decrypts `ciphertext` and confirms that the
    /// plaintext is the discrete logarithm of `public_point`.
    #[instrument(skip_all)]
    pub fn decrypt_secret_scalar(
        &self,
        public_point: &CurvePoint,
        ciphertext: &Ciphertext,
        proof: &PiDlogProof,
    ) -> Result<SecretScalar> {
        let input = PiDlogInput::new(&self.encryption_key(), ciphertext, public_point);
        proof.verify(&input)?;

        let secret = SecretScalar::from_bn(&self.decrypt(ciphertext))?;
        if &secret.public_point() != public_point {
            warn!("Decrypted secret does not match the public point.");
            return Err(InternalError::PublicPointMismatch);
        }
        Ok(secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        safe_primes_512::get_safe_primes_512, utils::get_test_rng, zkp::context::ProofContext,
    };
    use libpaillier::unknown_order::BigNumber;

    #[test]
    fn small_moduli_are_refused() -> Result<()> {
        let mut rng = get_test_rng();
        let decryption_key =
            DecryptionKey::from_primes(&BigNumber::from(11u64), &BigNumber::from(17u64))?;
        let key_pair = EcKeyPair::generate(&mut rng);
        assert!(matches!(
            decryption_key
                .encryption_key()
                .encrypt_secret_scalar(&mut rng, &key_pair),
            Err(InternalError::InvalidArgument(_))
        ));
        Ok(())
    }

    #[test]
    fn secret_scalar_survives_encryption() -> Result<()> {
        let mut rng = get_test_rng();
        let primes = get_safe_primes_512();
        let decryption_key = DecryptionKey::from_primes(&primes[0], &primes[1])?;
        let key_pair = EcKeyPair::generate(&mut rng);

        let (ciphertext, proof) = decryption_key
            .encryption_key()
            .encrypt_secret_scalar(&mut rng, &key_pair)?;
        let recovered =
            decryption_key.decrypt_secret_scalar(key_pair.public(), &ciphertext, &proof)?;
        assert_eq!(recovered.public_point(), *key_pair.public());

        let other = EcKeyPair::generate(&mut rng);
        assert_eq!(
            decryption_key
                .decrypt_secret_scalar(other.public(), &ciphertext, &proof)
                .err(),
            Some(InternalError::ProofRejected)
        );
        Ok(())
    }

    #[test]
    fn unrelated_ciphertext_is_rejected() -> Result<()> {
        let mut rng = get_test_rng();
        let primes = get_safe_primes_512();
        let decryption_key = DecryptionKey::from_primes(&primes[0], &primes[1])?;
        let encryption_key = decryption_key.encryption_key();
        let context = ProofContext::from_primes(&mut rng, &primes[2], &primes[3])?;

        let key_pair = EcKeyPair::generate(&mut rng);
        let (ciphertext, nonce) = key_pair
            .secret()
            .expose(|x| encryption_key.encrypt(&mut rng, x))?;
        let input = PiDlogInput::new(&encryption_key, &ciphertext, key_pair.public());
        let secret = PiDlogSecret::new(key_pair.secret(), &nonce);
        let proof = PiDlogProof::prove_with_context(context, &input, &secret, &mut rng)?;
        assert!(decryption_key
            .decrypt_secret_scalar(key_pair.public(), &ciphertext, &proof)
            .is_ok());

        let (other_ciphertext, _) = encryption_key.encrypt(&mut rng, &BigNumber::from(5u64))?;
        assert_eq!(
            decryption_key
                .decrypt_secret_scalar(key_pair.public(), &other_ciphertext, &proof)
                .err(),
            Some(InternalError::ProofRejected)
        );
        Ok(())
    }
}
