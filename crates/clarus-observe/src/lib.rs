//! Observability setup for Clarus.

pub mod tracing_setup;
