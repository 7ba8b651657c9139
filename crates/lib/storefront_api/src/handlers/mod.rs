//! Request handlers.

pub mod auth;
pub mod items;
pub mod stores;
pub mod todos;

/// Strip an optional request field down to its non-empty value.
pub(crate) fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.trim().is_empty())
}
