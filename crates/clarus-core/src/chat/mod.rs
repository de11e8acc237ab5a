//! Chat history persistence abstractions for Clarus.
//!
//! `repository` defines the storage port; `service` implements recording,
//! history reads and session listing on top of it. `assistant`, `prompt` and
//! `fallback` produce the reply recorded by `POST /chat`.

pub mod assistant;
pub mod fallback;
pub mod prompt;
pub mod repository;
pub mod service;
