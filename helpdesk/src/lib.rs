//! `HelpDesk`: terminal support inbox library.

pub mod app;
pub mod assistant;
pub mod chat;
pub mod compose;
pub mod config;
pub mod feed;
pub mod inbox;
pub mod theme;
pub mod ui;
