use serde::{Deserialize, Serialize};

use crate::constants::defaults::UNKNOWN_COUNTRY;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub code: String,
    pub name: String,
    pub country: String,
}

impl Destination {
    pub fn new(code: &str, name: &str, country: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            country: country.to_string(),
        }
    }

    /// Stand-in for a city code the catalog does not know.
    #[must_use]
    pub fn unknown(code: &str) -> Self {
        Self {
            code: code.to_string(),
            name: code.to_string(),
            country: UNKNOWN_COUNTRY.to_string(),
        }
    }
}
