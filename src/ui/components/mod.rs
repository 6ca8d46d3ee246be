pub mod chat_window;
pub mod footer;
pub mod header;
pub mod input_bar;
pub mod notice;
pub mod waste_card;
