#[macro_use]
mod log;
mod errors;
pub mod fmt;

pub use errors::LogError;
pub use fmt::{LogFmt, LogFmtBuilder, LogSpec, SegmentSpec};

pub type Result<T> = core::result::Result<T, LogError>;

pub use log::*;
