//! Domain types shared by the API client, services and templates.

pub mod book;
pub mod catalog;
pub mod listing;
pub mod query;
pub mod session;
pub mod types;
