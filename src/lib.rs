//! A guided tour of analytical SQL over an embedded SQLite database.
//!
//! # Intention
//!
//! - Recreate a small `departments`/`employees` schema and seed it with fixed rows.
//! - Run a fixed sequence of demonstration queries and print every result set.
//!
//! # Architectural Boundaries
//!
//! - Query planning, execution and storage belong to SQLite.
//! - This crate only issues statements, decodes rows and renders them.

pub mod config;
pub mod error;
pub mod queries;
pub mod runner;
pub mod schema;
pub mod seed;
pub mod value;

pub use config::{LogFormat, LoggingConfig, TourConfig, DEFAULT_DB_PATH};
pub use error::{Result, TourError};
pub use runner::{run, Runner};
pub use value::{Money, ResultSet, Value};
