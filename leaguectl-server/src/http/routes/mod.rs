//! Route handlers organized by surface

pub mod admin;
pub mod api;
pub mod health;
pub mod news;
