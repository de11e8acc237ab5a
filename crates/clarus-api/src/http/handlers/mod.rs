//! HTTP request handlers for the REST API.

pub mod chat;
pub mod health;
pub mod history;
pub mod messages;
pub mod session;
