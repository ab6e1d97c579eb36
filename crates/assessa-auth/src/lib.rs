//! assessa-auth
//!
//! Session token validation, display names, and role metadata writes to
//! the identity provider.

pub mod client;
pub mod error;
pub mod identity;
pub mod jwt;
