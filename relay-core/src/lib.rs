//! Relay Core
//!
//! Core types for the Nexus-to-GitLab webhook relay.
//!
//! This crate contains:
//! - Domain types: downstream projects, their dependency coordinates and the
//!   artifact-update events published by the repository manager
//! - Matching: selecting the projects an event should rebuild

pub mod domain;
pub mod matching;

pub use domain::artifact::{ArtifactEvent, Component, DecodeError};
pub use domain::project::{Dependency, Project};
pub use matching::{TriggerPolicy, match_projects};
