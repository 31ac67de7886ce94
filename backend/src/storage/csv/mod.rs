pub mod connection;
pub mod countdown_repository;
pub mod message_repository;
pub mod session_repository;
pub mod user_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use countdown_repository::CountdownRepository;
pub use message_repository::MessageRepository;
pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;
