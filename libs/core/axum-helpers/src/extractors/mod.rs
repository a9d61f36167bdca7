//! Custom extractors for Axum handlers.
//!
//! This module provides reusable extractors that reduce boilerplate
//! and standardize error handling across your API.

pub mod json_body;
pub mod validated_json;

pub use json_body::JsonBody;
pub use validated_json::ValidatedJson;
