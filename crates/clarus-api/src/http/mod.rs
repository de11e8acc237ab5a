//! HTTP/REST API layer for Clarus.
//!
//! Axum-based API exposing message recording, session history and the
//! session list, with permissive CORS and request tracing.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
