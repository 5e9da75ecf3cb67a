//! Core domain types
//!
//! These types are shared between the server (which loads and matches them)
//! and the client (which triggers pipelines for matched projects).

pub mod artifact;
pub mod project;
