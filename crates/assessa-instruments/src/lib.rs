//! assessa-instruments
//!
//! Assessment instrument rules. Pure data, no HTTP dependency.
//! Defines how tests are composed from weighted mini-tests and questions,
//! how the flat question record maps questions to reviewers, how submitted
//! answers become a score set, the assignment wizard, and dashboard
//! analytics over fetched assignments.

pub mod analytics;
pub mod composition;
pub mod error;
pub mod flatten;
pub mod record;
pub mod scoring;
pub mod wizard;
