//! Client-facing error messages.
//!
//! These strings are part of the wire contract; clients match on them.

pub const INVALID_JSON: &str = "invalid json";
pub const VALIDATION_FAILED: &str = "validation error";
pub const INVALID_QUERY: &str = "invalid data in query string";
pub const INTERNAL_ERROR: &str = "internal error";
pub const NOT_FOUND_RESOURCE: &str = "not found";

/// Message for a route hit with the wrong method.
pub fn only_method_allowed(method: &axum::http::Method) -> String {
    format!("only method {} allowed", method)
}

/// Message for a required query parameter that is absent or empty.
pub fn empty_query_param(name: &str) -> String {
    format!("query string \"{}\" is empty", name)
}
