use paillier_dlog::{generate_safe_primes, PRIME_BITS};
use rand::rngs::OsRng;

use std::fs::OpenOptions;
use std::io::prelude::*;
use std::time::{Duration, Instant};

/// Used to pre-generate safe primes, so that they can be stored in a text
/// file and reused as test fixtures.
///
/// Usage: `cargo run --example gen_primes -- [bits] [count] [file]`

fn main() {
    let mut args = std::env::args().skip(1);
    let bits: usize = args
        .next()
        .map(|s| s.parse().expect("bits must be a number"))
        .unwrap_or(PRIME_BITS / 2);
    let iterations: usize = args
        .next()
        .map(|s| s.parse().expect("count must be a number"))
        .unwrap_or(10);
    let path = args
        .next()
        .unwrap_or_else(|| format!("safe_primes_{}.txt", bits));

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .unwrap();

    let mut rng = OsRng;
    let mut prev = Instant::now();
    let mut total_seconds = Duration::new(0, 0);

    println!("Generating {} {}-bit safe primes into {}...", iterations, bits, path);
    for i in 0..iterations {
        let pair = generate_safe_primes(&mut rng, bits).unwrap();
        let next = Instant::now();
        let duration = next - prev;
        prev = next;
        total_seconds += duration;
        println!("Generating that prime took: {} seconds", duration.as_secs());
        println!(
            "Total average prime generation time: {} seconds",
            total_seconds.as_secs() as f64 / (i as f64 + 1.0)
        );
        writeln!(file, "{}", hex::encode(pair.p().to_bytes())).unwrap();
        file.flush().unwrap();
    }
}
