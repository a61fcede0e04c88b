#[macro_use]
mod macros;

pub mod capacity_policy;
pub mod array_types;

mod errors;
mod allocator;
mod global_alloc;

pub use errors::ArrayError;
pub use allocator::Allocator;
pub use global_alloc::{GlobalAlloc, GLOBAL_ALLOC};
pub use capacity_policy::{CapacityPolicy, Linear, Doubling, DEFAULT_CAPACITY};
pub use array_types::DynamicArray;

pub type Result<T> = core::result::Result<T, ArrayError>;
