pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod shell;

pub use crate::core::*;
pub use error::{MonitorError, MonitorResult};
pub use shell::{Command, Shell};
