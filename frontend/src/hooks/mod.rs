pub mod use_birthday_data;
pub mod use_countdown_tick;
pub mod use_session;
