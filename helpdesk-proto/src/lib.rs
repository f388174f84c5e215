//! Shared data model and fixtures for `HelpDesk`.

pub mod fixture;
pub mod inbox;
pub mod message;
