use crate::error::TypeParseError;
use crate::schema::naming::validate_identifier;
use std::fmt;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

///
/// PrimitiveKind
///
/// Scalar kinds a field can hold. `Void` exists so schema sources can name it,
/// but no target can store a value of it.
///

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum PrimitiveKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    String,
    Void,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum PrimitiveCategory {
    Integer,
    Float,
    Boolean,
    Text,
    Void,
}

impl PrimitiveKind {
    pub const fn category(self) -> PrimitiveCategory {
        match self {
            PrimitiveKind::I8
            | PrimitiveKind::I16
            | PrimitiveKind::I32
            | PrimitiveKind::I64
            | PrimitiveKind::U8
            | PrimitiveKind::U16
            | PrimitiveKind::U32
            | PrimitiveKind::U64 => PrimitiveCategory::Integer,
            PrimitiveKind::F32 | PrimitiveKind::F64 => PrimitiveCategory::Float,
            PrimitiveKind::Bool => PrimitiveCategory::Boolean,
            PrimitiveKind::String => PrimitiveCategory::Text,
            PrimitiveKind::Void => PrimitiveCategory::Void,
        }
    }

    pub const fn is_signed_integer(self) -> bool {
        matches!(
            self,
            PrimitiveKind::I8 | PrimitiveKind::I16 | PrimitiveKind::I32 | PrimitiveKind::I64
        )
    }

    pub const fn is_unsigned_integer(self) -> bool {
        matches!(
            self,
            PrimitiveKind::U8 | PrimitiveKind::U16 | PrimitiveKind::U32 | PrimitiveKind::U64
        )
    }
}

///
/// FieldType
///
/// Entity references are kept by name and resolved through a `SchemaSet`,
/// never as live links between schemas.
///

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldType {
    Primitive(PrimitiveKind),
    Entity(String),
    List(Box<FieldType>),
}

impl FieldType {
    pub fn entity(name: impl Into<String>) -> Self {
        FieldType::Entity(name.into())
    }

    pub fn list(inner: FieldType) -> Self {
        FieldType::List(Box::new(inner))
    }

    /// Innermost element type, e.g. `i32` for `i32[][]`.
    pub fn element_type(&self) -> &FieldType {
        match self {
            FieldType::List(inner) => inner.element_type(),
            ty => ty,
        }
    }

    /// Entity named anywhere in the type, including as a list element.
    pub fn referenced_entity(&self) -> Option<&str> {
        match self.element_type() {
            FieldType::Entity(name) => Some(name),
            _ => None,
        }
    }

    /// Entity held by value without list indirection. Only these references
    /// are default-constructed eagerly.
    pub fn direct_entity(&self) -> Option<&str> {
        match self {
            FieldType::Entity(name) => Some(name),
            _ => None,
        }
    }

    /// Primitive at the bottom of the type, if any.
    pub fn primitive(&self) -> Option<PrimitiveKind> {
        match self.element_type() {
            FieldType::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, FieldType::List(_))
    }
}

impl From<PrimitiveKind> for FieldType {
    fn from(kind: PrimitiveKind) -> Self {
        FieldType::Primitive(kind)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Primitive(kind) => write!(f, "{kind}"),
            FieldType::Entity(name) => write!(f, "{name}"),
            FieldType::List(inner) => write!(f, "{inner}[]"),
        }
    }
}

impl FromStr for FieldType {
    type Err = TypeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty() {
            return Err(TypeParseError::Empty);
        }

        if let Some(inner) = value.strip_suffix("[]") {
            let inner = inner.parse::<FieldType>()?;
            return Ok(FieldType::list(inner));
        }

        if value.contains('[') {
            return Err(TypeParseError::UnclosedList(value.to_string()));
        }

        if let Ok(kind) = value.parse::<PrimitiveKind>() {
            return Ok(FieldType::Primitive(kind));
        }

        validate_identifier(value).map_err(|reason| TypeParseError::InvalidIdentifier {
            name: value.to_string(),
            reason,
        })?;

        Ok(FieldType::Entity(value.to_string()))
    }
}
