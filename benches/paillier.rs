// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use libpaillier::unknown_order::BigNumber;
use paillier_dlog::{
    DecryptionKey, EcKeyPair, PiDlogInput, PiDlogProof, PiDlogSecret, Proof, ProofContext,
};
use rand::rngs::OsRng;

const PRIME_BITS: usize = 512;

fn paillier(c: &mut Criterion) {
    let mut rng = OsRng;
    let decryption_key = DecryptionKey::new(&mut rng, PRIME_BITS).unwrap();
    let encryption_key = decryption_key.encryption_key();
    let m = BigNumber::from(9876543210u64);
    let (ciphertext, _) = encryption_key.encrypt(&mut rng, &m).unwrap();

    c.bench_function(&format!("encrypt ({} bit primes)", PRIME_BITS), |b| {
        b.iter(|| encryption_key.encrypt(&mut rng, &m).unwrap())
    });
    c.bench_function(&format!("decrypt ({} bit primes)", PRIME_BITS), |b| {
        b.iter(|| decryption_key.decrypt(&ciphertext))
    });
}

fn pidlog(c: &mut Criterion) {
    let mut rng = OsRng;
    let decryption_key = DecryptionKey::new(&mut rng, PRIME_BITS).unwrap();
    let encryption_key = decryption_key.encryption_key();
    let context = ProofContext::generate(&mut rng, 2 * PRIME_BITS).unwrap();

    let key_pair = EcKeyPair::generate(&mut rng);
    let (ciphertext, nonce) = key_pair
        .secret()
        .expose(|x| encryption_key.encrypt(&mut rng, x))
        .unwrap();
    let input = PiDlogInput::new(&encryption_key, &ciphertext, key_pair.public());
    let secret = PiDlogSecret::new(key_pair.secret(), &nonce);
    let proof =
        PiDlogProof::prove_with_context(context.clone(), &input, &secret, &mut rng).unwrap();

    c.bench_function("pidlog prove", |b| {
        b.iter_batched(
            || context.clone(),
            |context| PiDlogProof::prove_with_context(context, &input, &secret, &mut rng).unwrap(),
            BatchSize::SmallInput,
        )
    });
    c.bench_function("pidlog verify", |b| {
        b.iter(|| proof.verify(&input).unwrap())
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = paillier, pidlog
}
criterion_main!(benches);
