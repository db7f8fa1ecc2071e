//! Serde models for the REST backend payloads and the console configuration.

pub mod auth;
pub mod book;
pub mod catalog;
pub mod config;
pub mod envelope;
