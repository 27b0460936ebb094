//! TOML schema sources.
//!
//! ```toml
//! [generator]
//! indent = "tab"
//!
//! [[entity]]
//! name = "Point3"
//! fields = [
//!     { name = "y", type = "f32" },
//!     { name = "x", type = "f32" },
//!     { name = "z", type = "f32" },
//! ]
//! methods = [
//!     { name = "length", returns = "f32" },
//!     { name = "scale", parameters = [{ name = "factor", type = "f32" }] },
//! ]
//! ```
//!
//! Field types are primitive names (`i8` .. `u64`, `f32`, `f64`, `bool`,
//! `string`, `void`), entity names, or any of those followed by `[]`.

mod toml_parser;
mod toml_types;

pub use toml_parser::{load, parse_schema_file, parse_schema_from_str};
pub use toml_types::{EntityConfig, FieldConfig, MethodConfig, SchemaFile};
