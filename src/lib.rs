pub mod career;
pub mod clock;
pub mod config;
pub mod consts;
pub mod content;
pub mod error;
pub mod game;
pub mod persist;
pub mod scorer;
pub mod types;

pub use error::{CfResult, CountyForgeError};
