//! Character storage adapters.

mod memory;
mod sqlite;

pub use memory::InMemoryCharacterRepo;
pub use sqlite::SqliteCharacterRepo;
