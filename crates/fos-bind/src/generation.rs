//! Container generations
//!
//! Every structural mutation of a container bumps its generation. Deferred
//! work (a fade that ends in a removal) captures the generation when it is
//! scheduled and is dropped if the container moved in the meantime.

/// Generation counter - incremented on every structural mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Generation(u32);

impl Generation {
    /// Initial generation (never mutated)
    pub const INITIAL: Self = Generation(0);

    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Get the next generation
    #[inline]
    pub const fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}
