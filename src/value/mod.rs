//! In-memory value model.
//!
//! [`Instance`] mirrors the contract the emitted code implements (default
//! construction, deep copy, structural equality and assignment) so schemas
//! can be exercised without compiling generated output.

mod data;
mod instance;

pub use data::Value;
pub use instance::Instance;
