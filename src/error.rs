use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Key not found: {key}")]
    NotFound { key: String },

    #[error("Cannot convert {value:?} to {target}: {reason}")]
    Conversion {
        value: String,
        target: &'static str,
        reason: String,
    },

    #[error("Value {value:?} can not be interpreted as bool")]
    BoolParse { value: String },
}

impl ConfError {
    pub(crate) fn not_found(key: Option<&str>) -> Self {
        ConfError::NotFound {
            key: key.unwrap_or_default().to_string(),
        }
    }

    pub(crate) fn conversion(value: &str, target: &'static str, reason: impl ToString) -> Self {
        ConfError::Conversion {
            value: value.to_string(),
            target,
            reason: reason.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfError::NotFound { .. })
    }
}

/// Failure of a list conversion.
///
/// Every element is attempted; the ones that converted are kept, in their
/// original order, in [`ListError::partial`]. The list is complete only when
/// no error is returned at all. A missing key has no partial values and a
/// `NotFound` source.
#[derive(Error, Debug)]
#[error("List conversion failed ({failed} bad element(s)): {source}")]
pub struct ListError<T> {
    partial: Vec<T>,
    pub failed: usize,
    pub source: ConfError,
}

impl<T> ListError<T> {
    pub(crate) fn new(partial: Vec<T>, failed: usize, source: ConfError) -> Self {
        Self {
            partial,
            failed,
            source,
        }
    }

    pub(crate) fn not_found(key: Option<&str>) -> Self {
        Self::new(Vec::new(), 0, ConfError::not_found(key))
    }

    /// Values that converted successfully.
    pub fn partial(&self) -> &[T] {
        &self.partial
    }

    pub fn into_partial(self) -> Vec<T> {
        self.partial
    }
}

pub type Result<T> = std::result::Result<T, ConfError>;
