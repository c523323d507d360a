//! Dashboard HTTP service for the cut-asset manager.
//!
//! Renders the management pages as JSON view models (rows, tabs, sort and
//! pagination links, selection state, assembly layers) and proxies form
//! submissions to the external cuts API. Exposed as a library so integration
//! tests and the binary entrypoint share the same building blocks.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod state;
pub mod views;
