//! In-memory schema model.
//!
//! An [`EntitySchema`] is a named, ordered list of typed fields, optionally
//! followed by hand-written [`MethodSignature`]s. Entities are
//! collected in a [`SchemaSet`], which resolves entity references by name and
//! rejects composition that could never be default-constructed.

mod entity;
mod field;
mod method;
pub(crate) mod naming;
mod set;
mod types;

pub use entity::{EntitySchema, fields_of};
pub use field::{Field, Fields};
pub use method::{MethodSignature, Parameter};
pub use set::{EntityId, SchemaSet};
pub use types::{FieldType, PrimitiveCategory, PrimitiveKind};
