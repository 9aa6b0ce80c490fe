#![allow(dead_code)]

use std::hash::{Hash, Hasher};

use rand::seq::SliceRandom;
use rand::thread_rng;

/// Every value hashes alike, so a table keeps all of them in one bin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Collide(pub u32);

impl Hash for Collide {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(0);
    }
}

/// Hashes only the low two bits, so 64 keys share each of four hashes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Crowded(pub u16);

impl Hash for Crowded {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u16(self.0 & 3);
    }
}

pub fn shuffled(n: u32) -> Vec<u32> {
    let mut v: Vec<u32> = (0..n).collect();
    v.shuffle(&mut thread_rng());
    v
}

/// Routes the crate's events to the test output when `RUST_LOG` is set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
