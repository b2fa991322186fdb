//! Commands Layer
//!
//! Handlers that bridge a UI to the stores.

mod grocery_cmd;
mod profile_cmd;

pub use grocery_cmd::*;
pub use profile_cmd::*;
