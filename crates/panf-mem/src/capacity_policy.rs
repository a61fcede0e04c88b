/// Slot count of an array built with `new`.
pub const DEFAULT_CAPACITY: usize = 10;

/// Decides how large the backing store becomes when it runs out of slots.
pub trait CapacityPolicy {

    const DEFAULT_CAPACITY: usize;

    /// Capacity to reallocate to when `required` slots are needed but only
    /// `current` exist and `len` are occupied. The result must be at least
    /// `required`; `None` means it would overflow `usize`.
    fn grow(current: usize, len: usize, required: usize) -> Option<usize>;
}

/// Grows by a constant [`Linear::STEP`] slots past the current length.
///
/// Every growth copies the whole array, so `n` appends move O(n²/STEP)
/// elements in total. Memory overhead stays below `STEP` slots.
pub struct Linear;

impl Linear {

    pub const STEP: usize = 10;
}

impl CapacityPolicy for Linear {

    const DEFAULT_CAPACITY: usize = DEFAULT_CAPACITY;

    #[inline]
    fn grow(_: usize, len: usize, required: usize) -> Option<usize> {
        Some(len.checked_add(Self::STEP)?.max(required))
    }
}

/// Grows to a power of two at least twice the current capacity.
pub struct Doubling;

impl CapacityPolicy for Doubling {

    const DEFAULT_CAPACITY: usize = DEFAULT_CAPACITY;

    #[inline]
    fn grow(current: usize, _: usize, required: usize) -> Option<usize> {
        current
            .saturating_mul(2)
            .max(required)
            .max(2)
            .checked_next_power_of_two()
    }
}
