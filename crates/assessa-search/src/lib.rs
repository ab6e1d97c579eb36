//! assessa-search
//!
//! In-memory filtering of backend lists, derived display facts, and the
//! personal and directory views built on top of them.

pub mod cards;
pub mod directory;
pub mod personal;
pub mod query;
