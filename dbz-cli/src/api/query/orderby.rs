//! Sort key for record queries

use serde::{Deserialize, Serialize};

pub const ASC: &str = "asc";
pub const DESC: &str = "desc";

/// Single sort key with a direction
///
/// The direction is carried as given and is not checked against
/// `asc`/`desc`; the records service decides what it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: String,
}

impl OrderBy {
    pub fn new(field: impl Into<String>, direction: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: direction.into(),
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, ASC)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, DESC)
    }
}
