use rand::{rngs::OsRng, Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use std::sync::{Arc, Mutex};

/// A fuzzer for generating random test data.
///
/// Uses the xoshiro256** PRNG so a seeded fuzzer replays the same sequence,
/// which keeps randomized container tests reproducible: print `seed` on
/// failure and re-run with it.
///
/// # Examples
///
/// ```
/// use medley_util::fuzzer::Fuzzer;
///
/// let fuzzer = Fuzzer::new(None);
///
/// let n = fuzzer.random_int(1, 10);
/// assert!(n >= 1 && n <= 10);
///
/// let choices = ["insert", "remove", "check"];
/// let picked = fuzzer.pick(&choices);
/// assert!(choices.contains(picked));
/// ```
pub struct Fuzzer {
    /// The seed used to initialize the PRNG.
    pub seed: [u8; 32],
    rng: Arc<Mutex<Xoshiro256StarStar>>,
}

impl Fuzzer {
    /// Create a new fuzzer with an optional seed.
    ///
    /// If no seed is provided, a random seed will be generated using `OsRng`.
    pub fn new(seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            bytes
        });

        let rng = Xoshiro256StarStar::from_seed(seed);

        Self {
            seed,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Generate a random integer in the range [min, max] (inclusive).
    pub fn random_int(&self, min: i64, max: i64) -> i64 {
        let mut rng = self.rng.lock().unwrap();
        rng.gen_range(min..=max)
    }

    /// Pick a random element from a slice.
    pub fn pick<'a, T>(&self, elements: &'a [T]) -> &'a T {
        let mut rng = self.rng.lock().unwrap();
        let idx = rng.gen_range(0..elements.len());
        &elements[idx]
    }

    /// Repeat a callback `times` times and collect results.
    pub fn repeat<T, F>(&self, times: usize, mut callback: F) -> Vec<T>
    where
        F: FnMut() -> T,
    {
        (0..times).map(|_| callback()).collect()
    }

    /// Generate a random boolean with the given probability of being true.
    pub fn random_bool(&self, probability: f64) -> bool {
        let mut rng = self.rng.lock().unwrap();
        rng.gen_bool(probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_int_range() {
        let fuzzer = Fuzzer::new(None);
        for _ in 0..100 {
            let n = fuzzer.random_int(1, 10);
            assert!(n >= 1 && n <= 10);
        }
    }

    #[test]
    fn test_pick() {
        let fuzzer = Fuzzer::new(None);
        let choices = ["a", "b", "c"];
        for _ in 0..100 {
            assert!(choices.contains(fuzzer.pick(&choices)));
        }
    }

    #[test]
    fn test_repeat() {
        let fuzzer = Fuzzer::new(None);
        let results: Vec<i32> = fuzzer.repeat(5, || 42);
        assert_eq!(results, vec![42, 42, 42, 42, 42]);
    }

    #[test]
    fn test_reproducible() {
        let seed = [1u8; 32];
        let fuzzer1 = Fuzzer::new(Some(seed));
        let fuzzer2 = Fuzzer::new(Some(seed));

        for _ in 0..10 {
            assert_eq!(fuzzer1.random_int(0, 1000), fuzzer2.random_int(0, 1000));
        }
    }

    #[test]
    fn test_random_bool_produces_both() {
        let fuzzer = Fuzzer::new(None);
        let mut has_true = false;
        let mut has_false = false;

        for _ in 0..200 {
            if fuzzer.random_bool(0.5) {
                has_true = true;
            } else {
                has_false = true;
            }
        }

        assert!(has_true && has_false);
    }
}
