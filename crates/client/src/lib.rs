//! HTTP client for the external cuts REST API.
//!
//! The dashboard never talks to storage directly; every read and write goes
//! through [`CutsApi`]. Auth tokens are opaque and supplied per call; they
//! come from the external identity provider and are never inspected here.

pub mod api;

pub use api::{CutsApi, CutsApiError, CutsPage, ImageUpload, ListCutsQuery};
