// Deterministic, portable pseudo-random number generator.
//
// xoshiro256++ (Blackman & Vigna, 2019) seeded through SplitMix64. The
// generator is hand-rolled so that two hosts given the same seed roll the
// same durability losses and plant the same trees, independent of platform
// or of whichever `rand` version happens to be in the dependency graph.
//
// Consumers: `timberfall_sim::remover` (Unbreaking rolls) and
// `timberfall_sim::tree_gen` (canopy thinning). The host simulation owns a
// single `TickRng` and lends it to each break event.
//
// **Critical constraint: determinism.** No floating point in the core
// generator, no OS entropy, no stdlib hashing.

use serde::{Deserialize, Serialize};

/// Xoshiro256++ state. Cloning forks the stream.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TickRng {
    s: [u64; 4],
}

impl TickRng {
    /// Seed the 256-bit state from a single `u64` via SplitMix64.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Uniform `f64` in [0, 1) from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `[low, high)`, rejection-sampled to avoid modulo
    /// bias. Panics if `low >= high`.
    pub fn range_u64(&mut self, low: u64, high: u64) -> u64 {
        assert!(low < high, "range_u64: low must be less than high");
        let range = high - low;
        if range.is_power_of_two() {
            return low + (self.next_u64() & (range - 1));
        }
        let threshold = range.wrapping_neg() % range;
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return low + (r % range);
            }
        }
    }

    /// `true` with probability `1 / n`. `n == 0` and `n == 1` always hit.
    ///
    /// This is the shape of an Unbreaking roll: a tool with level `k` takes
    /// damage on `one_in(k + 1)`.
    pub fn one_in(&mut self, n: u64) -> bool {
        n <= 1 || self.range_u64(0, n) == 0
    }

    /// `true` with probability `p`. `p <= 0.0` never hits, `p >= 1.0` always does.
    pub fn random_bool(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// SplitMix64 step, used only to expand the seed.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = TickRng::new(42);
        let mut b = TickRng::new(42);
        for _ in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = TickRng::new(42);
        let mut b = TickRng::new(43);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn range_u64_within_bounds() {
        let mut rng = TickRng::new(999);
        for _ in 0..10_000 {
            let v = rng.range_u64(10, 20);
            assert!((10..20).contains(&v), "range_u64 out of range: {v}");
        }
    }

    #[test]
    fn one_in_degenerate_cases_always_hit() {
        let mut rng = TickRng::new(7);
        for _ in 0..100 {
            assert!(rng.one_in(0));
            assert!(rng.one_in(1));
        }
    }

    #[test]
    fn one_in_four_is_roughly_a_quarter() {
        let mut rng = TickRng::new(2024);
        let n = 20_000;
        let hits = (0..n).filter(|_| rng.one_in(4)).count();
        let pct = hits as f64 / n as f64;
        assert!((0.22..0.28).contains(&pct), "one_in(4) hit {:.1}%", pct * 100.0);
    }

    #[test]
    fn random_bool_extremes() {
        let mut rng = TickRng::new(42);
        for _ in 0..100 {
            assert!(!rng.random_bool(0.0));
            assert!(rng.random_bool(1.0));
        }
    }

    #[test]
    fn serialized_state_continues_the_stream() {
        let mut rng = TickRng::new(42);
        for _ in 0..100 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: TickRng = serde_json::from_str(&json).unwrap();
        for _ in 0..100 {
            assert_eq!(rng.next_u64(), restored.next_u64());
        }
    }
}
