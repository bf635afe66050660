//! API layer - HTTP entry points.

pub mod http;
mod mapping;
