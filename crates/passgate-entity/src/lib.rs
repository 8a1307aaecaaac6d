//! # passgate-entity
//!
//! Domain entities shared by the Passgate crates.

pub mod identity;

pub use identity::Identity;
