// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Pre-generated safe primes, so that tests do not spend most of their time
//! in prime generation. Produced with `cargo run --example gen_primes`.

use libpaillier::unknown_order::BigNumber;

/// Hex encodings of 512-bit safe primes.
const SAFE_PRIMES_512: [&str; 4] = [
    concat!(
        "F70272E4885D5688F40FA69A62DD7823557CD83D791CD6EE6CF43725A9F1F553",
        "D56C91368CECB54C9DF70D2AAC3A7F6055F480A8FF0C0815DD8FFA4D84F0577F",
    ),
    concat!(
        "F4FAAB0DF7932CDB4B61F39B69198CF16890EEC3610B364D741C2B83AB1AD111",
        "2F38929CE420026AF6EF2CD2D83B61B9FBEB48259194FF58AB955B41096D8447",
    ),
    concat!(
        "FC803D794288003DCFA856D0A9E0D5995CF450BAC7DDFCDA80B27D80C23F0901",
        "906E4F70DF17064866E03EC664F31037370F601FD6F44C20B86727AE30B4CD03",
    ),
    concat!(
        "FA992519E50D1253852DD59C930E09F81C0947ACBC794B52117AFAE7ACD87E01",
        "87DBFB95FEB608466DC0B3A0E33DC62F24D9A220B93D4DAAA12331219C1CB37B",
    ),
];

/// Hex encodings of the two 1024-bit safe primes used as the fixed
/// decryption fixture.
const FIXTURE_PRIMES_1024: [&str; 2] = [
    concat!(
        "F4695A5505DDCEF7E8362B95857037F2D784F61CF9AA983CE707057B873E901E",
        "BDEA24BA8B89C335C1CA246D0385B0DE02DB4BA2FBA7AC357BC54D3D07928094",
        "FCFD5D47CFD002A22F5E983C8BA5BF6C4CAEFF57AF54412E26415A64ABDB55A5",
        "C778B69C2B1928D1EB7486F5CEA8F1C38C0ECCB34B8994659443B092063DF3F3",
    ),
    concat!(
        "DFA8B8B4E75BA82E0F767F50FEAA0955BD21671D222B326B6D5D6EC04E82DB86",
        "B63068A4061D3FEE6C8CC044E8C226E268FE689E7276629A0426051ABCE87DCD",
        "E05BEA8350E77E2E6B7DBAE51618B576048C4DEAED9975D3CDD31FBB50777514",
        "E7CB3670DE78748295196FA709E1039900D8470D6B37E657E6A3227C67F5C4FB",
    ),
];

fn from_hex(hex_str: &str) -> BigNumber {
    BigNumber::from_slice(hex::decode(hex_str).expect("fixture primes are valid hex"))
}

/// Returns the pool of 512-bit safe primes.
pub(crate) fn get_safe_primes_512() -> Vec<BigNumber> {
    SAFE_PRIMES_512.iter().map(|p| from_hex(p)).collect()
}

/// Returns the two 1024-bit safe primes `(P, Q)` used by the fixed
/// encrypt/decrypt scenario.
pub(crate) fn get_fixture_primes_1024() -> (BigNumber, BigNumber) {
    (
        from_hex(FIXTURE_PRIMES_1024[0]),
        from_hex(FIXTURE_PRIMES_1024[1]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::bit_length;

    #[test]
    fn pooled_primes_are_safe_primes() {
        let two = BigNumber::from(2u64);
        let (p, q) = get_fixture_primes_1024();
        for prime in get_safe_primes_512().iter().chain([&p, &q]) {
            let sophie_germain = (prime - &BigNumber::one()) / &two;
            assert!(prime.is_prime());
            assert!(sophie_germain.is_prime());
        }
        assert_eq!(bit_length(&p), 1024);
        assert_eq!(bit_length(&q), 1024);
    }
}
