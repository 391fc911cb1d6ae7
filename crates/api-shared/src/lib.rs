//! # API Shared
//!
//! Shared definitions for the triage APIs.
//!
//! Contains:
//! - Wire request/response types (`wire` module), with serde and OpenAPI schema derives
//! - Shared services like `HealthService`
//!
//! Used by `triage-core` to shape its results, and by `api-rest` and the CLI to transport them.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
