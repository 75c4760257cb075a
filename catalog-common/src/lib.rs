//! # Catalog Common Library
//!
//! Shared code for the library catalog:
//! - Error type used by every crate in the workspace
//! - Configuration loading and root folder resolution
//! - Database initialization (schema creation)
//! - Entity models and their virtual (computed) fields
//! - Date formatting helpers

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod time;
pub mod uuid_utils;

pub use error::{Error, Result};
