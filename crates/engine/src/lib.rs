//! Gang NPC Manager engine library.
//!
//! This crate contains all server-side code for the NPC manager.
//!
//! ## Structure
//!
//! - `use_cases/` - Request orchestration over the domain model
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// End-to-end tests driving the router over an in-memory database.
#[cfg(test)]
mod e2e_tests;

pub use app::App;
