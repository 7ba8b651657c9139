//! # storefront_core
//!
//! Core domain logic for Storefront: authentication and token lifecycle,
//! the store catalog, and the embedded database migrations.

pub mod auth;
pub mod catalog;
pub mod migrate;
pub mod models;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
