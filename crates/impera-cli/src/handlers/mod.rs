pub mod board;
pub mod chat;
