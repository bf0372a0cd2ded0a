//! Terminal interface for tubedesc.

pub mod action;
pub mod app;
pub mod clipboard;
pub mod components;
pub mod composer;
pub mod event;
pub mod theme;
pub mod timers;

pub use app::App;
