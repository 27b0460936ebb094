//! Error types for schema construction, emission and the value model.
//!
//! Every fallible operation in the crate returns one of the enums below.
//! `WcGenError` unifies them so callers that drive a whole generation run can
//! use a single `WcGenResult<T>` together with the `?` operator:
//!
//! ```
//! use wc_gen::error::{ErrorKind, WcGenResult};
//! use wc_gen::schema::{EntitySchema, FieldType, PrimitiveKind};
//!
//! fn define_point() -> WcGenResult<EntitySchema> {
//!     let point = EntitySchema::define(
//!         "Point",
//!         [
//!             ("x", FieldType::Primitive(PrimitiveKind::F32)),
//!             ("x", FieldType::Primitive(PrimitiveKind::F32)),
//!         ],
//!     )?;
//!     Ok(point)
//! }
//!
//! let err = define_point().unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::DuplicateField);
//! ```
//!
//! Each error carries the entity name, the offending field name when there is
//! one, and an [`ErrorKind`] so invoking tools can surface all three without
//! parsing messages.

use crate::codegen::TargetLanguage;
use crate::schema::PrimitiveKind;
use strum::{Display, IntoStaticStr};
use thiserror::Error;

/// Result type alias for whole generation runs.
pub type WcGenResult<T> = Result<T, WcGenError>;

/// Discriminant of every error the crate can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum ErrorKind {
    DuplicateField,
    DuplicateEntity,
    DuplicateMethod,
    DuplicateParameter,
    InvalidIdentifier,
    InvalidType,
    UnresolvedType,
    CompositionCycle,
    UnknownEntity,
    UnsupportedPrimitive,
    ReservedIdentifier,
    InvalidMarker,
    UnknownField,
    TypeMismatch,
    EntityMismatch,
    Source,
}

#[derive(Error, Debug)]
pub enum WcGenError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Emit(#[from] EmitError),
    #[error(transparent)]
    Value(#[from] ValueError),
    #[cfg(feature = "toml-source")]
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl WcGenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WcGenError::Schema(e) => e.kind(),
            WcGenError::Emit(e) => e.kind(),
            WcGenError::Value(e) => e.kind(),
            #[cfg(feature = "toml-source")]
            WcGenError::Source(_) => ErrorKind::Source,
        }
    }
}

/// Malformed type reference in a schema source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeParseError {
    #[error("type name is empty")]
    Empty,
    #[error("unclosed list in type '{0}'")]
    UnclosedList(String),
    #[error("invalid entity name: {reason}")]
    InvalidIdentifier { name: String, reason: String },
}

/// Structural errors raised while defining or resolving schemas.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("duplicate field '{field}' in entity '{entity}'")]
    DuplicateField { entity: String, field: String },

    #[error("duplicate entity '{entity}'")]
    DuplicateEntity { entity: String },

    #[error("method '{method}' of entity '{entity}' clashes with another field or method")]
    DuplicateMethod { entity: String, method: String },

    #[error("duplicate parameter '{parameter}' in method '{method}' of entity '{entity}'")]
    DuplicateParameter {
        entity: String,
        method: String,
        parameter: String,
    },

    #[error("invalid identifier in entity '{entity}': {reason}")]
    InvalidIdentifier {
        entity: String,
        field: Option<String>,
        reason: String,
    },

    #[error("field '{field}' of entity '{entity}' has an invalid type: {source}")]
    InvalidType {
        entity: String,
        field: String,
        #[source]
        source: TypeParseError,
    },

    #[error("field '{field}' of entity '{entity}' references unknown entity '{target}'")]
    UnresolvedType {
        entity: String,
        field: String,
        target: String,
    },

    #[error("method '{method}' of entity '{entity}' references unknown entity '{target}'")]
    UnresolvedMethodType {
        entity: String,
        method: String,
        target: String,
    },

    #[error("entity '{entity}' is part of a composition cycle: {}", .path.join(" -> "))]
    CompositionCycle { entity: String, path: Vec<String> },

    #[error("unknown entity '{entity}'")]
    UnknownEntity { entity: String },
}

impl SchemaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SchemaError::DuplicateField { .. } => ErrorKind::DuplicateField,
            SchemaError::DuplicateEntity { .. } => ErrorKind::DuplicateEntity,
            SchemaError::DuplicateMethod { .. } => ErrorKind::DuplicateMethod,
            SchemaError::DuplicateParameter { .. } => ErrorKind::DuplicateParameter,
            SchemaError::InvalidIdentifier { .. } => ErrorKind::InvalidIdentifier,
            SchemaError::InvalidType { .. } => ErrorKind::InvalidType,
            SchemaError::UnresolvedType { .. } | SchemaError::UnresolvedMethodType { .. } => {
                ErrorKind::UnresolvedType
            }
            SchemaError::CompositionCycle { .. } => ErrorKind::CompositionCycle,
            SchemaError::UnknownEntity { .. } => ErrorKind::UnknownEntity,
        }
    }

    /// Name of the entity the error is attributed to.
    pub fn entity(&self) -> &str {
        match self {
            SchemaError::DuplicateField { entity, .. }
            | SchemaError::DuplicateEntity { entity }
            | SchemaError::DuplicateMethod { entity, .. }
            | SchemaError::DuplicateParameter { entity, .. }
            | SchemaError::InvalidIdentifier { entity, .. }
            | SchemaError::InvalidType { entity, .. }
            | SchemaError::UnresolvedType { entity, .. }
            | SchemaError::UnresolvedMethodType { entity, .. }
            | SchemaError::CompositionCycle { entity, .. }
            | SchemaError::UnknownEntity { entity } => entity,
        }
    }

    /// Offending field or method, when the error concerns a single member.
    pub fn field(&self) -> Option<&str> {
        match self {
            SchemaError::DuplicateField { field, .. }
            | SchemaError::InvalidType { field, .. }
            | SchemaError::UnresolvedType { field, .. } => Some(field),
            SchemaError::DuplicateMethod { method, .. }
            | SchemaError::DuplicateParameter { method, .. }
            | SchemaError::UnresolvedMethodType { method, .. } => Some(method),
            SchemaError::InvalidIdentifier { field, .. } => field.as_deref(),
            SchemaError::DuplicateEntity { .. }
            | SchemaError::CompositionCycle { .. }
            | SchemaError::UnknownEntity { .. } => None,
        }
    }
}

/// Errors raised while emitting one entity. None of them leave partial output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmitError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("field '{field}' of entity '{entity}' uses primitive '{kind}', which {language} output does not support")]
    UnsupportedPrimitive {
        entity: String,
        field: String,
        kind: PrimitiveKind,
        language: TargetLanguage,
    },

    #[error("identifier '{name}' in entity '{entity}' is reserved in generated {language} code")]
    ReservedIdentifier {
        entity: String,
        field: Option<String>,
        name: String,
        language: TargetLanguage,
    },

    #[error("generated-file marker for entity '{entity}' is unusable: {reason}")]
    InvalidMarker { entity: String, reason: String },
}

impl EmitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EmitError::Schema(e) => e.kind(),
            EmitError::UnsupportedPrimitive { .. } => ErrorKind::UnsupportedPrimitive,
            EmitError::ReservedIdentifier { .. } => ErrorKind::ReservedIdentifier,
            EmitError::InvalidMarker { .. } => ErrorKind::InvalidMarker,
        }
    }

    pub fn entity(&self) -> &str {
        match self {
            EmitError::Schema(e) => e.entity(),
            EmitError::UnsupportedPrimitive { entity, .. }
            | EmitError::ReservedIdentifier { entity, .. }
            | EmitError::InvalidMarker { entity, .. } => entity,
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            EmitError::Schema(e) => e.field(),
            EmitError::UnsupportedPrimitive { field, .. } => Some(field),
            EmitError::ReservedIdentifier { field, .. } => field.as_deref(),
            EmitError::InvalidMarker { .. } => None,
        }
    }
}

/// Errors raised by the in-memory value model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("field '{field}' of entity '{entity}' uses primitive '{kind}', which has no value")]
    UnsupportedPrimitive {
        entity: String,
        field: String,
        kind: PrimitiveKind,
    },

    #[error("entity '{entity}' has no field '{field}'")]
    UnknownField { entity: String, field: String },

    #[error("field '{field}' of entity '{entity}' expects {expected}, got {found}")]
    TypeMismatch {
        entity: String,
        field: String,
        expected: String,
        found: String,
    },

    #[error("cannot copy an instance of '{source_entity}' into an instance of '{entity}'")]
    EntityMismatch {
        entity: String,
        source_entity: String,
    },
}

impl ValueError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValueError::Schema(e) => e.kind(),
            ValueError::UnsupportedPrimitive { .. } => ErrorKind::UnsupportedPrimitive,
            ValueError::UnknownField { .. } => ErrorKind::UnknownField,
            ValueError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            ValueError::EntityMismatch { .. } => ErrorKind::EntityMismatch,
        }
    }
}

/// Errors raised while loading a TOML schema source.
#[cfg(feature = "toml-source")]
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read schema file '{}': {source}", .path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML schema: {0}")]
    Toml(#[from] toml::de::Error),
}
