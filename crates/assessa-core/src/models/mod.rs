pub mod assignment;
pub mod club;
pub mod mini_club;
pub mod position;
pub mod question;
pub mod refs;
pub mod test;
pub mod user;
