//! assessa-backend
//!
//! REST client for the assessment backend. Thin wrapper around reqwest.

pub mod client;
pub mod error;
pub mod reference;
pub mod reply;
