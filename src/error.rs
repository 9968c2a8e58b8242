use std::fmt;

/// Custom error types for stage-log parsing
#[derive(Debug)]
pub enum LogError {
    /// I/O errors while reading the log stream
    Io(std::io::Error),
    /// No label survived parsing and trimming
    EmptyLog,
    /// A label name was opened twice (strict mode only)
    DuplicateLabel(String),
    /// A label carried too few observations (strict mode only)
    ShortLabel { label: String, samples: usize },
    /// The derived or supplied angular step is unusable
    BadStep(f64),
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogError::Io(err) => write!(f, "I/O error: {}", err),
            LogError::EmptyLog => write!(f, "Empty or corrupt log"),
            LogError::DuplicateLabel(label) => {
                write!(f, "Label \"{}\" already exists", label)
            }
            LogError::ShortLabel { label, samples } => {
                write!(f, "Too small ({}) set on label \"{}\"", samples, label)
            }
            LogError::BadStep(step) => write!(f, "Unusable angular step: {}", step),
        }
    }
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LogError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LogError {
    fn from(err: std::io::Error) -> Self {
        LogError::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, LogError>;
