//! assessa-core
//!
//! Pure domain types, form inputs and backend endpoint conventions.
//! No HTTP dependency. This is the shared vocabulary of the Assessa system.

pub mod api_paths;
pub mod error;
pub mod inputs;
pub mod models;
