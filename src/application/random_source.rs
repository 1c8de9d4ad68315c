// Random source seam for the generator

/// Source of uniform randomness for the generator.
/// Production wraps a PRNG; tests supply fixed sequences.
pub trait RandomSource: Send {
    /// Next sample, uniform in [0, 1)
    fn next_unit(&mut self) -> f64;
}
