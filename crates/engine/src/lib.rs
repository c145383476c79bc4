//! Charsmith Engine library.
//!
//! Application layer around the pure `charsmith-domain` operators.
//!
//! ## Structure
//!
//! - `use_cases/` - Character commands with publish-then-persist sequencing
//! - `infrastructure/` - Ports and their adapters (SQLite, in-memory, rule loading, export)
//! - `config` - Environment configuration
//! - `cli` - Command-line entry points

pub mod cli;
pub mod config;
pub mod infrastructure;
pub mod use_cases;
