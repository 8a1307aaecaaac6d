//! # passgate-core
//!
//! Core crate for Passgate. Contains configuration schemas and loading,
//! logging initialisation, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Passgate crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
