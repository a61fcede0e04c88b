#[derive(Debug)]
pub enum LogError {
    IoError(std::io::Error),
    UnknownFormat {
        index: usize,
    },
    Uninitialized,
}

impl core::fmt::Display for LogError {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::IoError(_) => write!(f, "IO error"),
            Self::UnknownFormat { index } => write!(f, "no custom format registered at {}", index),
            Self::Uninitialized => write!(f, "panf logger not initialized"),
        }
    }
}

impl core::error::Error for LogError {

    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LogError {

    fn from(value: std::io::Error) -> Self {
        Self::IoError(value)
    }
}
