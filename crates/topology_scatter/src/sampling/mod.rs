//! Random draws and node position sampling.
//!
//! Every stage of the pipeline draws from a caller-provided [`RngCore`]; the helpers
//! here turn raw `u32` draws into unit floats, bounded indices and permutations so
//! that a seeded generator reproduces a pass exactly.
use rand::Rng as RngCore;

pub mod min_distance;

pub use min_distance::MinDistanceSampling;

/// Generate a random float in the range [0, 1].
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Generate a random index in `0..len` using a widening multiply.
///
/// `len` must be non-zero.
#[inline]
pub(crate) fn rand_index(rng: &mut dyn RngCore, len: usize) -> usize {
    debug_assert!(len > 0, "rand_index on empty range");
    ((rng.next_u32() as u64 * len as u64) >> 32) as usize
}

/// Uniformly shuffled `0..len` (Fisher-Yates).
pub(crate) fn permutation(rng: &mut dyn RngCore, len: usize) -> Vec<usize> {
    let mut indexes: Vec<usize> = (0..len).collect();
    for i in (1..len).rev() {
        let j = rand_index(rng, i + 1);
        indexes.swap(i, j);
    }
    indexes
}

/// Compute the next smaller representable float value.
///
/// Returns a value that is strictly less than the input, useful for
/// ensuring bounds are strictly inside a domain.
#[inline]
pub(crate) fn next_down(val: f32) -> f32 {
    if val.is_nan() {
        return f32::NAN;
    }

    if val == f32::NEG_INFINITY {
        return f32::NEG_INFINITY;
    }

    if val == f32::INFINITY {
        return f32::MAX;
    }

    if val == 0.0 {
        return -f32::MIN_POSITIVE;
    }

    let bits = val.to_bits();
    if val > 0.0 {
        f32::from_bits(bits.saturating_sub(1))
    } else {
        f32::from_bits(bits.saturating_add(1))
    }
}

/// Uniform coordinate in `[0, extent)`.
#[inline]
pub(crate) fn rand_coord(rng: &mut dyn RngCore, extent: f32) -> f32 {
    if extent <= 0.0 {
        return 0.0;
    }
    (rand01(rng) * extent).clamp(0.0, next_down(extent))
}
