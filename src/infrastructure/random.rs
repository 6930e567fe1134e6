// Random source wiring - Seeded for reproducible runs, entropy otherwise
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

pub fn build_rng(seed: Option<u64>) -> Box<dyn RngCore + Send> {
    match seed {
        Some(seed) => {
            tracing::info!(seed, "using seeded random source");
            Box::new(StdRng::seed_from_u64(seed))
        }
        None => Box::new(StdRng::from_entropy()),
    }
}
