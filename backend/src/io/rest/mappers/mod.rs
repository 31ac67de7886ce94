pub mod countdown_mapper;
pub mod message_mapper;
pub mod user_mapper;

pub use countdown_mapper::CountdownMapper;
pub use message_mapper::MessageMapper;
pub use user_mapper::UserMapper;
