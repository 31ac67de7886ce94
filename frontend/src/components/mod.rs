pub mod countdown_timer;
pub mod dashboard;
pub mod message_card;
pub mod message_grid;
pub mod sign_in_form;
