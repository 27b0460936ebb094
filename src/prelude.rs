//! Prelude module for convenient imports.
//!
//! ```rust
//! use wc_gen::prelude::*;
//! ```

pub use crate::codegen::{
    CustomMethod, EmitOutcome, EmitReport, Emitter, GeneratedMarker, GeneratedMember,
    GeneratedUnit, MemberKind, TargetLanguage, emit,
};
pub use crate::config::{GeneratorConfig, Indent};
pub use crate::error::{
    EmitError, ErrorKind, SchemaError, TypeParseError, ValueError, WcGenError, WcGenResult,
};
pub use crate::schema::{
    EntityId, EntitySchema, Field, FieldType, Fields, MethodSignature, Parameter, PrimitiveKind,
    SchemaSet, fields_of,
};
pub use crate::value::{Instance, Value};

#[cfg(feature = "toml-source")]
pub use crate::error::SourceError;
#[cfg(feature = "toml-source")]
pub use crate::source::{SchemaFile, load, parse_schema_file, parse_schema_from_str};
