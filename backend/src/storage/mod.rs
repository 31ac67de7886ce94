//! # Storage Module
//!
//! Data persistence for the birthday time capsule. Records live as CSV files
//! in a single data directory:
//!
//! ```text
//! data/
//! ├── capsule_config.yaml   (optional, see config.rs)
//! ├── users.csv
//! ├── messages.csv
//! ├── countdowns.csv
//! └── sessions.csv
//! ```
//!
//! Each file is parsed into typed domain models at this boundary; rows that
//! do not parse are skipped with a warning.

pub mod csv;
pub mod traits;

pub use csv::CsvConnection;
pub use traits::{CountdownStorage, MessageStorage, SessionStorage, UserFilter, UserStorage, Viewer};
