use crate::error::{Result, SkipListError};
use rand::prelude::*;
use rand::rngs::StdRng;

/// Hard ceiling on the number of levels, enough for 2^32 elements at p = 1/2.
pub(crate) const MAX_LEVEL: usize = 32;

/// Tuning knobs for a [`SkipList`](crate::SkipList).
///
/// ```
/// use rank_skiplist::{Natural, Options, SkipList};
///
/// let opts = Options::default()
///     .level_probability(0.25)
///     .unwrap()
///     .size_hint(10_000)
///     .seed(7);
/// let mut sk = SkipList::with_options(Natural, opts);
/// sk.insert(1u32);
/// assert_eq!(sk.len(), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    log_p: u32,
    size_hint: Option<usize>,
    seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            log_p: 1,
            size_hint: None,
            seed: None,
        }
    }
}

impl Options {
    /// Chance that a node reaching level `k` also reaches `k + 1`.
    ///
    /// Rounded to the nearest power of one half, and never above 1/2.
    pub fn level_probability(mut self, p: f64) -> Result<Self> {
        if !(p > 0.0 && p < 1.0) {
            return Err(SkipListError::InvalidProbability(p));
        }
        self.log_p = ((-p.log2()).round() as u32).max(1);
        Ok(self)
    }

    /// Expected population. Fixes the level cap instead of growing it with `len`.
    pub fn size_hint(mut self, size_hint: usize) -> Self {
        self.size_hint = Some(size_hint);
        self
    }

    /// Seed the level generator, making node heights reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[inline]
fn bit_len(n: usize) -> usize {
    (usize::BITS - n.leading_zeros()) as usize
}

#[derive(Clone, Debug)]
pub(crate) struct LevelGenerator {
    rng: StdRng,
    log_p: usize,
    fixed_cap: Option<usize>,
}

impl LevelGenerator {
    pub(crate) fn new(options: Options) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let log_p = options.log_p as usize;
        let fixed_cap = options
            .size_hint
            .map(|hint| Self::cap(log_p, hint.saturating_add(1)));
        LevelGenerator {
            rng,
            log_p,
            fixed_cap,
        }
    }

    /// Highest zero-based level worth having for `n` elements.
    #[inline]
    fn cap(log_p: usize, n: usize) -> usize {
        ((bit_len(n) + log_p - 1) / log_p).min(MAX_LEVEL - 1)
    }

    /// Level a search over `len` elements should start from.
    #[inline]
    pub(crate) fn entry_level(&self, len: usize) -> usize {
        Self::cap(self.log_p, len + 1)
    }

    /// Height for a new node in a list currently holding `len` elements.
    pub(crate) fn random_level(&mut self, len: usize) -> usize {
        let cap = self
            .fixed_cap
            .unwrap_or_else(|| Self::cap(self.log_p, len + 1));
        let run = self.rng.gen::<u64>().trailing_zeros() as usize / self.log_p;
        run.min(cap) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_probability() {
        for p in &[0.0, 1.0, -0.5, 2.0, std::f64::NAN] {
            assert!(Options::default().level_probability(*p).is_err());
        }
        let opts = Options::default().level_probability(0.25).unwrap();
        assert_eq!(opts.log_p, 2);
        let opts = Options::default().level_probability(0.9).unwrap();
        assert_eq!(opts.log_p, 1);
    }

    #[test]
    fn test_small_lists_stay_short() {
        let mut gen = LevelGenerator::new(Options::default().seed(1));
        for _ in 0..1000 {
            let height = gen.random_level(0);
            assert!(height >= 1 && height <= 2);
        }
        for _ in 0..1000 {
            assert!(gen.random_level(6) <= 4);
        }
    }

    #[test]
    fn test_size_hint_caps_height() {
        let mut gen = LevelGenerator::new(Options::default().size_hint(15).seed(2));
        for _ in 0..1000 {
            assert!(gen.random_level(1_000_000) <= 6);
        }
        let mut gen = LevelGenerator::new(Options::default().size_hint(usize::MAX).seed(3));
        for _ in 0..1000 {
            assert!(gen.random_level(0) <= MAX_LEVEL);
        }
    }

    #[test]
    fn test_distribution() {
        let draws = 20_000;
        let mut gen = LevelGenerator::new(Options::default().size_hint(1 << 20).seed(4));
        let tall = (0..draws).filter(|_| gen.random_level(0) >= 2).count();
        let ratio = tall as f64 / draws as f64;
        assert!(ratio > 0.45 && ratio < 0.55, "ratio {}", ratio);

        let opts = Options::default()
            .level_probability(0.25)
            .unwrap()
            .size_hint(1 << 20)
            .seed(5);
        let mut gen = LevelGenerator::new(opts);
        let tall = (0..draws).filter(|_| gen.random_level(0) >= 2).count();
        let ratio = tall as f64 / draws as f64;
        assert!(ratio > 0.2 && ratio < 0.3, "ratio {}", ratio);
    }
}
