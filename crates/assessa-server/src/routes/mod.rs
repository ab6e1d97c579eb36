pub mod assessments;
pub mod assignments;
pub mod clubs;
pub mod crud;
pub mod dashboard;
pub mod directory;
pub mod health;
pub mod me;
pub mod mini_clubs;
pub mod options;
pub mod positions;
pub mod questions;
pub mod roles;
pub mod users;
pub mod wizard;
