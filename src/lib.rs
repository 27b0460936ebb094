//! # wc_gen
//!
//! Deterministic generator of value-type implementations. Given an entity
//! schema, it emits the full value contract for the target language: default
//! constructor, copy constructor, destructor, `copy_to`, `clone`, `==`, `!=`
//! and `=`.
//!
//! ## Features
//!
//! - **Schema model**: named entities with ordered, typed fields, collected in
//!   a [`SchemaSet`](schema::SchemaSet) that resolves references by name
//! - **Deep copy**: composed entities are owned and copied recursively
//! - **Structural equality**: field-by-field, in declaration order
//! - **Deterministic output**: the same schema always yields byte-identical files
//! - **Custom methods**: hand-written methods are declared in the class and
//!   get stubs in a user-owned file that regeneration only appends to
//! - **TOML sources** (`toml-source` feature): schemas and generator settings
//!   read from `[[entity]]` tables
//! - **Value model**: an in-memory [`Instance`](value::Instance) with the same
//!   copy and equality semantics as the generated code
//!
//! ## Quick Start
//!
//! ```rust
//! use wc_gen::prelude::*;
//!
//! let mut schemas = SchemaSet::new();
//! schemas.declare(EntitySchema::define(
//!     "Point3",
//!     [
//!         ("y", PrimitiveKind::F32.into()),
//!         ("x", PrimitiveKind::F32.into()),
//!         ("z", PrimitiveKind::F32.into()),
//!     ],
//! )?)?;
//!
//! let unit = emit(&schemas, "Point3", &GeneratorConfig::default())?;
//! assert_eq!(unit.header_file_name(), "Point3.hpp");
//! assert!(unit.implementation().contains("return y == other.y && x == other.x && z == other.z;"));
//! # Ok::<(), wc_gen::error::WcGenError>(())
//! ```
//!
//! Writing the rendered files is left to the caller.

pub mod codegen;
pub mod config;
pub mod error;
pub mod prelude;
pub mod schema;
#[cfg(feature = "toml-source")]
pub mod source;
pub mod value;

pub use codegen::{EmitReport, Emitter, GeneratedUnit, TargetLanguage, emit};
pub use config::GeneratorConfig;
pub use error::{WcGenError, WcGenResult};
