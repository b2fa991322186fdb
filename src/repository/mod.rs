//! Repository Layer
//!
//! Data access abstractions and implementations.

mod db;
mod envelope;
mod kv_repo;
mod memory;
mod traits;
mod writer;


pub use db::init_db;
pub use envelope::{decode, encode};
pub use kv_repo::SqliteKvStore;
pub use memory::MemoryKvStore;
pub use traits::KeyValueStore;
pub use writer::WriteThrough;
