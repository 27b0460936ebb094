use crate::error::{SchemaError, ValueError};
use crate::schema::{EntitySchema, FieldType, PrimitiveKind, SchemaSet};
use crate::value::Value;

#[derive(Debug)]
struct Slot {
    name: String,
    ty: FieldType,
    value: Value,
}

///
/// Instance
///
/// A live value of one entity. Fields keep declaration order, and composed
/// entities are owned exclusively, so copying an instance never shares state
/// with the source.
///
/// ```
/// use wc_gen::schema::{EntitySchema, PrimitiveKind, SchemaSet};
/// use wc_gen::value::Instance;
///
/// let mut schemas = SchemaSet::new();
/// schemas
///     .declare(EntitySchema::define("Counter", [("hits", PrimitiveKind::U32.into())]).unwrap())
///     .unwrap();
///
/// let mut a = Instance::default_of(&schemas, "Counter").unwrap();
/// let b = a.clone();
/// assert_eq!(a, b);
///
/// a.set("hits", 3u32).unwrap();
/// assert_ne!(a, b);
/// ```
///

#[derive(Debug)]
pub struct Instance {
    entity: String,
    slots: Vec<Slot>,
}

impl Instance {
    /// Default-construct `entity`: every field holds its zero value and every
    /// composed entity is itself default-constructed.
    pub fn default_of(schemas: &SchemaSet, entity: &str) -> Result<Self, ValueError> {
        let schema = schemas.resolve(entity)?;
        Self::construct(schemas, schema)
    }

    fn construct(schemas: &SchemaSet, schema: &EntitySchema) -> Result<Self, ValueError> {
        let mut slots = Vec::with_capacity(schema.len());

        for field in schema.fields() {
            let value = match field.ty() {
                FieldType::Entity(target) => {
                    let nested = schemas.get(target).ok_or_else(|| SchemaError::UnresolvedType {
                        entity: schema.name().to_string(),
                        field: field.name().to_string(),
                        target: target.clone(),
                    })?;
                    Value::Entity(Box::new(Self::construct(schemas, nested)?))
                }
                ty => Value::zero(ty).ok_or_else(|| ValueError::UnsupportedPrimitive {
                    entity: schema.name().to_string(),
                    field: field.name().to_string(),
                    kind: ty.primitive().unwrap_or(PrimitiveKind::Void),
                })?,
            };

            slots.push(Slot {
                name: field.name().to_string(),
                ty: field.ty().clone(),
                value,
            });
        }

        Ok(Self {
            entity: schema.name().to_string(),
            slots,
        })
    }

    pub fn entity_name(&self) -> &str {
        &self.entity
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// `(field name, value)` pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.slots
            .iter()
            .map(|slot| (slot.name.as_str(), &slot.value))
    }

    pub fn get(&self, field: &str) -> Result<&Value, ValueError> {
        self.slot(field).map(|slot| &slot.value)
    }

    /// Replace the value of `field`. The value must fit the declared type;
    /// integers are range-checked against their kind.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<(), ValueError> {
        let entity = self.entity.clone();
        let slot = self.slot_mut(field)?;
        let value = value.into();
        let found = value.describe();

        slot.value = value
            .coerce(&slot.ty)
            .ok_or_else(|| ValueError::TypeMismatch {
                entity,
                field: field.to_string(),
                expected: slot.ty.to_string(),
                found,
            })?;

        Ok(())
    }

    /// The composed instance held by `field`.
    pub fn entity(&self, field: &str) -> Result<&Instance, ValueError> {
        let slot = self.slot(field)?;
        match &slot.value {
            Value::Entity(instance) => Ok(&**instance),
            other => Err(self.not_an_entity(slot, other)),
        }
    }

    pub fn entity_mut(&mut self, field: &str) -> Result<&mut Instance, ValueError> {
        let entity = self.entity.clone();
        let slot = self.slot_mut(field)?;
        match &mut slot.value {
            Value::Entity(instance) => Ok(&mut **instance),
            other => Err(ValueError::TypeMismatch {
                entity,
                field: slot.name.clone(),
                expected: "entity".to_string(),
                found: other.describe(),
            }),
        }
    }

    /// Deep-copy every field of `self` into `target`, in declaration order.
    /// Composed instances of the target are overwritten in place rather than
    /// replaced.
    pub fn copy_to(&self, target: &mut Instance) -> Result<(), ValueError> {
        if !self.same_shape(target) {
            return Err(ValueError::EntityMismatch {
                entity: target.entity.clone(),
                source_entity: self.entity.clone(),
            });
        }

        self.copy_fields(target);
        Ok(())
    }

    /// Overwrite `self` with a deep copy of `other` and return `self`.
    ///
    /// The borrow rules already forbid `a.assign(&a)`, so the identity check
    /// of the generated assignment operator has no runtime counterpart here.
    pub fn assign(&mut self, other: &Instance) -> Result<&mut Self, ValueError> {
        other.copy_to(self)?;
        Ok(self)
    }

    fn same_shape(&self, other: &Instance) -> bool {
        self.entity == other.entity
            && self.slots.len() == other.slots.len()
            && self
                .slots
                .iter()
                .zip(&other.slots)
                .all(|(a, b)| a.name == b.name && a.ty == b.ty)
    }

    // Callers guarantee both sides share a shape.
    fn copy_fields(&self, target: &mut Instance) {
        for (from, to) in self.slots.iter().zip(target.slots.iter_mut()) {
            match (&from.value, &mut to.value) {
                (Value::Entity(nested), Value::Entity(into)) if nested.same_shape(into) => {
                    nested.copy_fields(into)
                }
                (value, into) => *into = value.clone(),
            }
        }
    }

    // Same shape as `self` with every field back at its zero value. Composed
    // instances keep their shape and are zeroed recursively.
    fn zeroed(&self) -> Instance {
        let slots = self
            .slots
            .iter()
            .map(|slot| {
                let value = match &slot.value {
                    Value::Entity(nested) => Value::Entity(Box::new(nested.zeroed())),
                    other => Value::zero(&slot.ty).unwrap_or_else(|| other.clone()),
                };

                Slot {
                    name: slot.name.clone(),
                    ty: slot.ty.clone(),
                    value,
                }
            })
            .collect();

        Instance {
            entity: self.entity.clone(),
            slots,
        }
    }

    fn slot(&self, field: &str) -> Result<&Slot, ValueError> {
        self.slots
            .iter()
            .find(|slot| slot.name == field)
            .ok_or_else(|| self.unknown_field(field))
    }

    fn slot_mut(&mut self, field: &str) -> Result<&mut Slot, ValueError> {
        let unknown = self.unknown_field(field);
        self.slots
            .iter_mut()
            .find(|slot| slot.name == field)
            .ok_or(unknown)
    }

    fn unknown_field(&self, field: &str) -> ValueError {
        ValueError::UnknownField {
            entity: self.entity.clone(),
            field: field.to_string(),
        }
    }

    fn not_an_entity(&self, slot: &Slot, value: &Value) -> ValueError {
        ValueError::TypeMismatch {
            entity: self.entity.clone(),
            field: slot.name.clone(),
            expected: "entity".to_string(),
            found: value.describe(),
        }
    }
}

impl Clone for Instance {
    fn clone(&self) -> Self {
        let mut clone = self.zeroed();
        self.copy_fields(&mut clone);
        clone
    }
}

// Field by field in declaration order, short-circuiting like the generated
// `operator==`. A NaN field makes an instance unequal to its own clone.
impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.entity == other.entity
            && self.slots.len() == other.slots.len()
            && self
                .slots
                .iter()
                .zip(&other.slots)
                .all(|(a, b)| a.name == b.name && a.value == b.value)
    }
}
