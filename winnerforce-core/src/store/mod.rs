//! Client-side associations kept behind a key-value interface.
//!
//! Some relationships (team assignments) are not modeled by the backend and
//! live on the client. Going through [`KeyValueStore`] keeps the association
//! logic independent of where the values are persisted.

mod file;
mod memory;
mod team;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use team::TeamAssignments;

use crate::error::WinnerforceResult;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> WinnerforceResult<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> WinnerforceResult<()>;
}
