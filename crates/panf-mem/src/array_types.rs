mod strategies;
mod sort;
mod dynamic_array;

pub use dynamic_array::DynamicArray;
