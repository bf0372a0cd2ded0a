pub mod config;
pub mod description;
pub mod error;
pub mod form;
pub mod links;
pub mod options;
pub mod reveal;
pub mod submission;
pub mod text;

pub use config::TubedescConfig;
pub use error::{Result, TubedescError};
