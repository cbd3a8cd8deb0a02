//! URL handling module for the collector
//!
//! This module provides host extraction, the domain allow-list check and
//! relative link resolution.

mod domain;
mod matcher;
mod normalize;

pub use domain::extract_domain;
pub use matcher::{is_allowed, matches_suffix};
pub use normalize::resolve_link;
