//! CLI command implementations.
//!
//! Available commands:
//! - **assess**: Register factor files, assess each one and report
//! - **init**: Write a default `.pharmarisk.toml`

pub mod assess;
pub mod init;

pub use assess::{handle_assess, run_assessments, AssessConfig};
pub use init::init_config;
