//! Use cases - User story orchestration.

pub mod character;

pub use character::{CharacterService, CommandResult, Notice, ServiceError};
