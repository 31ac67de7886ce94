pub mod countdown;
pub mod message;
pub mod session;
pub mod user;
