//! Compile typed filter conditions and batched permission checks into
//! injection-safe, parameterized `PostgreSQL`.
#![warn(missing_docs)]

/// Compiler settings: permission schema and calendar time zone.
pub mod config;
/// Error types for filter compilation, permission batching and configuration.
pub mod error;
/// Filter-condition compilation: operator handlers, dispatch and fallback.
pub mod filter;
/// Bulk permission-check compilation and result decoding.
pub mod permission;
/// Literal and identifier rendering shared by both compilers.
pub mod sql;
