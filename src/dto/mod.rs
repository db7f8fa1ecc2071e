//! DTO modules that bridge services with templates.

pub mod books;
pub mod catalog;
