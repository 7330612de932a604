//! Domain layer: aggregates, value objects and the ports adapters implement.

pub mod merchant;
pub mod organization;
pub mod ports;
pub mod token;
pub mod user;
pub mod value_objects;

use crate::error::{AccountsError, Result};
use std::str::FromStr;
use strum::VariantNames;

/// Parses a status filter case-insensitively, listing the valid values on failure.
pub fn parse_status<S: FromStr + VariantNames>(raw: &str) -> Result<S> {
    S::from_str(raw.trim()).map_err(|_| {
        AccountsError::InvalidFilter(format!(
            "Invalid status filter. Valid values are: {}",
            S::VARIANTS.join(", ")
        ))
    })
}
