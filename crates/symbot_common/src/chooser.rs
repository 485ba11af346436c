//! Injectable choice among alternatives (canned replies, fallback prompts).
//!
//! Production uses `RandomChooser`; tests pin output with `FixedChooser`.

use rand::Rng;

pub trait Chooser: Send + Sync {
    /// Return an index in `0..len`. Callers never pass `len == 0`.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform random choice
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomChooser;

impl Chooser for RandomChooser {
    fn pick(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }
}

/// Always picks the same index (clamped to the last one)
#[derive(Debug, Clone, Copy)]
pub struct FixedChooser(pub usize);

impl Chooser for FixedChooser {
    fn pick(&self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}
