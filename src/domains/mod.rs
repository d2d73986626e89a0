//! Domains module containing business logic organized by bounded contexts.
//!
//! - **maps**: the upstream Google Maps Web Service API
//! - **tools**: MCP tools built on top of it

pub mod maps;
pub mod tools;
