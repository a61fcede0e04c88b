#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ArrayError {
    InvalidCapacity {
        capacity: usize,
    },
    IndexOutOfRange {
        index: usize,
        len: usize,
    },
    Incomparable {
        left: usize,
        right: usize,
    },
    CapacityOverflow {
        requested: usize,
    },
    AllocFailed {
        new_capacity: usize,
    },
}

impl core::fmt::Display for ArrayError {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidCapacity { capacity } => {
                write!(f, "illegal capacity {}", capacity)
            },
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {} is out of bounds for size {}", index, len)
            },
            Self::Incomparable { left, right } => {
                write!(f, "elements at {} and {} have no ordering", left, right)
            },
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity {} exceeds the maximum allocation size", requested)
            },
            Self::AllocFailed { new_capacity } => {
                write!(f, "allocation failed with new capacity {}", new_capacity)
            },
        }
    }
}

impl core::error::Error for ArrayError {}
