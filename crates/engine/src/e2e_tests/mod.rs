//! Backend E2E tests.
//!
//! Each test builds the complete `App` over a private in-memory SQLite
//! database and drives the HTTP router with `tower::ServiceExt::oneshot`,
//! so requests go through JSON decoding, use cases, storage and error
//! mapping exactly as in production.

mod e2e_helpers;
mod npc_flow_tests;

pub use e2e_helpers::*;
