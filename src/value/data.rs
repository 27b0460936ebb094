use crate::schema::{FieldType, PrimitiveCategory, PrimitiveKind};
use crate::value::Instance;
use derive_more::From;

/// A field value held by an [`Instance`].
///
/// Signed integer kinds are stored as `Int`, unsigned ones as `UInt`; `f32`
/// fields round through `f32` on assignment.
///
/// Floats compare with IEEE semantics, as the generated `operator==` does:
/// `NaN` is unequal to itself and `-0.0 == 0.0`. That is why `Value` and
/// [`Instance`] are `PartialEq` but not `Eq`.
#[derive(Debug, Clone, PartialEq, From)]
pub enum Value {
    #[from]
    Int(i64),
    #[from]
    UInt(u64),
    #[from]
    Float(f64),
    #[from]
    Bool(bool),
    #[from]
    Text(String),
    #[from]
    List(Vec<Value>),
    Entity(Box<Instance>),
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::UInt(u64::from(n))
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Entity(Box::new(instance))
    }
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::UInt(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<&Instance> {
        match self {
            Value::Entity(instance) => Some(instance),
            _ => None,
        }
    }

    /// Short description used in type mismatch errors.
    pub fn describe(&self) -> String {
        match self {
            Value::Int(_) => "int".to_string(),
            Value::UInt(_) => "uint".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Text(_) => "string".to_string(),
            Value::List(_) => "list".to_string(),
            Value::Entity(instance) => instance.entity_name().to_string(),
        }
    }

    /// Zero value of a primitive or list type. `None` for entities, which
    /// need their schema, and for types that cannot hold a value.
    pub(crate) fn zero(ty: &FieldType) -> Option<Value> {
        match ty {
            FieldType::List(_) if ty.primitive() == Some(PrimitiveKind::Void) => None,
            FieldType::List(_) => Some(Value::List(Vec::new())),
            FieldType::Entity(_) => None,
            FieldType::Primitive(kind) => match kind.category() {
                PrimitiveCategory::Integer if kind.is_signed_integer() => Some(Value::Int(0)),
                PrimitiveCategory::Integer => Some(Value::UInt(0)),
                PrimitiveCategory::Float => Some(Value::Float(0.0)),
                PrimitiveCategory::Boolean => Some(Value::Bool(false)),
                PrimitiveCategory::Text => Some(Value::Text(String::new())),
                PrimitiveCategory::Void => None,
            },
        }
    }

    /// Convert `self` into the representation a field of type `ty` stores,
    /// or `None` when it does not fit.
    pub(crate) fn coerce(self, ty: &FieldType) -> Option<Value> {
        match (ty, self) {
            (FieldType::Primitive(kind), value) => value.coerce_primitive(*kind),
            (FieldType::List(inner), Value::List(items)) => items
                .into_iter()
                .map(|item| item.coerce(inner))
                .collect::<Option<Vec<_>>>()
                .map(Value::List),
            (FieldType::Entity(name), Value::Entity(instance))
                if instance.entity_name() == name =>
            {
                Some(Value::Entity(instance))
            }
            _ => None,
        }
    }

    fn coerce_primitive(self, kind: PrimitiveKind) -> Option<Value> {
        match (kind.category(), self) {
            (PrimitiveCategory::Integer, Value::Int(n)) if kind.is_signed_integer() => {
                fits_signed(kind, n).then_some(Value::Int(n))
            }
            (PrimitiveCategory::Integer, Value::UInt(n)) if kind.is_signed_integer() => {
                i64::try_from(n)
                    .ok()
                    .filter(|n| fits_signed(kind, *n))
                    .map(Value::Int)
            }
            (PrimitiveCategory::Integer, Value::UInt(n)) => {
                fits_unsigned(kind, n).then_some(Value::UInt(n))
            }
            (PrimitiveCategory::Integer, Value::Int(n)) => u64::try_from(n)
                .ok()
                .filter(|n| fits_unsigned(kind, *n))
                .map(Value::UInt),
            (PrimitiveCategory::Float, Value::Float(n)) if kind == PrimitiveKind::F32 => {
                Some(Value::Float(f64::from(n as f32)))
            }
            (PrimitiveCategory::Float, Value::Float(n)) => Some(Value::Float(n)),
            (PrimitiveCategory::Boolean, Value::Bool(b)) => Some(Value::Bool(b)),
            (PrimitiveCategory::Text, Value::Text(text)) => Some(Value::Text(text)),
            _ => None,
        }
    }
}

fn fits_signed(kind: PrimitiveKind, n: i64) -> bool {
    match kind {
        PrimitiveKind::I8 => i8::try_from(n).is_ok(),
        PrimitiveKind::I16 => i16::try_from(n).is_ok(),
        PrimitiveKind::I32 => i32::try_from(n).is_ok(),
        _ => true,
    }
}

fn fits_unsigned(kind: PrimitiveKind, n: u64) -> bool {
    match kind {
        PrimitiveKind::U8 => u8::try_from(n).is_ok(),
        PrimitiveKind::U16 => u16::try_from(n).is_ok(),
        PrimitiveKind::U32 => u32::try_from(n).is_ok(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_compare_like_the_generated_operator() {
        let nan = Value::Float(f64::NAN);
        assert_ne!(nan, nan.clone());
        assert_eq!(Value::Float(-0.0), Value::Float(0.0));

        let nested = Value::List(vec![Value::Int(1), nan]);
        assert_ne!(nested, nested.clone());
    }

    #[test]
    fn integers_are_range_checked_per_kind() {
        let i8_ty = FieldType::Primitive(PrimitiveKind::I8);
        assert_eq!(Value::Int(-128).coerce(&i8_ty), Some(Value::Int(-128)));
        assert_eq!(Value::Int(128).coerce(&i8_ty), None);
        assert_eq!(Value::UInt(5).coerce(&i8_ty), Some(Value::Int(5)));

        let u16_ty = FieldType::Primitive(PrimitiveKind::U16);
        assert_eq!(Value::Int(7).coerce(&u16_ty), Some(Value::UInt(7)));
        assert_eq!(Value::Int(-1).coerce(&u16_ty), None);
        assert_eq!(Value::UInt(65_536).coerce(&u16_ty), None);
    }

    #[test]
    fn f32_values_are_rounded() {
        let ty = FieldType::Primitive(PrimitiveKind::F32);
        let stored = Value::Float(0.1).coerce(&ty).unwrap();
        assert_eq!(stored, Value::Float(f64::from(0.1f32)));
    }

    #[test]
    fn lists_coerce_element_wise() {
        let ty = FieldType::list(PrimitiveKind::U8.into());
        assert_eq!(
            Value::List(vec![Value::Int(1), Value::UInt(2)]).coerce(&ty),
            Some(Value::List(vec![Value::UInt(1), Value::UInt(2)]))
        );
        assert_eq!(
            Value::List(vec![Value::Int(1), Value::from("x")]).coerce(&ty),
            None
        );
    }

    #[test]
    fn zero_values() {
        assert_eq!(
            Value::zero(&PrimitiveKind::I64.into()),
            Some(Value::Int(0))
        );
        assert_eq!(
            Value::zero(&PrimitiveKind::U8.into()),
            Some(Value::UInt(0))
        );
        assert_eq!(
            Value::zero(&PrimitiveKind::String.into()),
            Some(Value::Text(String::new()))
        );
        assert_eq!(Value::zero(&PrimitiveKind::Void.into()), None);
        assert_eq!(
            Value::zero(&FieldType::list(PrimitiveKind::Void.into())),
            None
        );
        assert_eq!(Value::zero(&FieldType::entity("Point3")), None);
    }

    #[test]
    fn void_accepts_nothing() {
        let ty = FieldType::Primitive(PrimitiveKind::Void);
        assert_eq!(Value::Int(0).coerce(&ty), None);
        assert_eq!(Value::Bool(false).coerce(&ty), None);
    }
}
