//! # measure
//!
//! Times a reused `MapSort` engine against `sort_unstable` on random `i32`s.
//!
//! ```
//! cargo run --release --example measure -- 24
//! ```
//!
//! The optional argument is the base 2 logarithm of the input size. Without it 20,000,000
//! elements are sorted.

use mapsort::MapSort;
use nanorand::{Rng, WyRand};
use std::process::exit;
use std::time::Instant;

const DEFAULT_N: usize = 20_000_000;
const TRIALS: usize = 3;

fn fill_random(rng: &mut WyRand, data: &mut [i32]) {
    for v in data.iter_mut() {
        *v = rng.generate_range(0..i32::MAX);
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() > 1 {
        eprintln!("usage: measure [log2 size]");
        exit(1);
    }

    let n = match args.first() {
        Some(arg) => match arg.parse::<u32>() {
            Ok(shift) if shift < usize::BITS => 1usize << shift,
            _ => {
                eprintln!("usage: measure [log2 size]");
                exit(1);
            }
        },
        None => DEFAULT_N,
    };
    println!("N = {}", n);

    let mut rng = WyRand::new();
    let mut buf = vec![0i32; n];

    let mut engine: MapSort<i32> = MapSort::new();
    engine.init(n, None);

    for t in 0..TRIALS {
        fill_random(&mut rng, &mut buf);
        let time = Instant::now();
        engine.sort(&mut buf, None);
        eprintln!("MapSort::sort({}): {:.6} sec", t, time.elapsed().as_secs_f64());
    }

    for t in 0..TRIALS {
        fill_random(&mut rng, &mut buf);
        let time = Instant::now();
        buf.sort_unstable();
        eprintln!("sort_unstable({}): {:.6} sec", t, time.elapsed().as_secs_f64());
    }
}
