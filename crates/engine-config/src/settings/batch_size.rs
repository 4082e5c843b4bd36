use crate::error::SettingsError;
use std::fmt;

/// Rows per extracted page and per INSERT statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSize(usize);

impl BatchSize {
    pub const DEFAULT: usize = 100;
    pub const MIN: usize = 1;
    pub const MAX: usize = 5000;

    pub fn new(size: usize) -> Result<Self, SettingsError> {
        if !(Self::MIN..=Self::MAX).contains(&size) {
            return Err(SettingsError::InvalidValue {
                key: "BATCH_SIZE".to_string(),
                value: size.to_string(),
                reason: format!("must be between {} and {}", Self::MIN, Self::MAX),
            });
        }
        Ok(BatchSize(size))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        BatchSize(Self::DEFAULT)
    }
}

impl fmt::Display for BatchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
