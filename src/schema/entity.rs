use crate::error::SchemaError;
use crate::schema::naming::validate_identifier;
use crate::schema::{Field, FieldType, Fields, MethodSignature};
use std::collections::HashSet;

///
/// EntitySchema
///
/// One value-type definition: a name, its fields in declaration order and any
/// hand-written methods. Immutable once built.
///

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySchema {
    name: String,
    fields: Vec<Field>,
    methods: Vec<MethodSignature>,
}

impl EntitySchema {
    /// Define an entity from `(field name, field type)` pairs. Declaration
    /// order is the iteration order of `fields`.
    ///
    /// ```
    /// use wc_gen::schema::{EntitySchema, PrimitiveKind};
    ///
    /// let point = EntitySchema::define(
    ///     "Point3",
    ///     [
    ///         ("y", PrimitiveKind::F32.into()),
    ///         ("x", PrimitiveKind::F32.into()),
    ///         ("z", PrimitiveKind::F32.into()),
    ///     ],
    /// )
    /// .unwrap();
    ///
    /// let names: Vec<_> = point.fields().map(|f| f.name()).collect();
    /// assert_eq!(names, ["y", "x", "z"]);
    /// ```
    pub fn define<N, I, F>(name: N, fields: I) -> Result<Self, SchemaError>
    where
        N: Into<String>,
        I: IntoIterator<Item = (F, FieldType)>,
        F: Into<String>,
    {
        let name = name.into();

        validate_identifier(&name).map_err(|reason| SchemaError::InvalidIdentifier {
            entity: name.clone(),
            field: None,
            reason,
        })?;

        let mut seen = HashSet::new();
        let mut defined = Vec::new();

        for (order, (field_name, ty)) in fields.into_iter().enumerate() {
            let field_name = field_name.into();

            validate_identifier(&field_name).map_err(|reason| {
                SchemaError::InvalidIdentifier {
                    entity: name.clone(),
                    field: Some(field_name.clone()),
                    reason,
                }
            })?;

            if !seen.insert(field_name.clone()) {
                return Err(SchemaError::DuplicateField {
                    entity: name,
                    field: field_name,
                });
            }

            defined.push(Field::new(field_name, ty, order));
        }

        Ok(Self {
            name,
            fields: defined,
            methods: Vec::new(),
        })
    }

    /// Attach hand-written methods. Method names must be valid identifiers,
    /// unique, and distinct from every field; parameter names must be unique
    /// within their method. Overloads are not supported.
    pub fn with_methods<I>(mut self, methods: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = MethodSignature>,
    {
        for method in methods {
            let invalid = |name: &str, reason| SchemaError::InvalidIdentifier {
                entity: self.name.clone(),
                field: Some(name.to_string()),
                reason,
            };

            validate_identifier(method.name()).map_err(|reason| invalid(method.name(), reason))?;

            if self.field(method.name()).is_some() || self.method(method.name()).is_some() {
                return Err(SchemaError::DuplicateMethod {
                    entity: self.name.clone(),
                    method: method.name().to_string(),
                });
            }

            let mut seen = HashSet::new();
            for parameter in method.parameters() {
                validate_identifier(parameter.name())
                    .map_err(|reason| invalid(parameter.name(), reason))?;

                if !seen.insert(parameter.name()) {
                    return Err(SchemaError::DuplicateParameter {
                        entity: self.name.clone(),
                        method: method.name().to_string(),
                        parameter: parameter.name().to_string(),
                    });
                }
            }

            self.methods.push(method);
        }

        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> Fields<'_> {
        Fields::new(&self.fields)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the entity has no fields. Methods do not count.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Hand-written methods in declaration order.
    pub fn methods(&self) -> &[MethodSignature] {
        &self.methods
    }

    pub fn method(&self, name: &str) -> Option<&MethodSignature> {
        self.methods.iter().find(|method| method.name() == name)
    }

    /// Every `(field, entity name)` pair this entity references, list
    /// elements included, in declaration order.
    pub fn references(&self) -> impl Iterator<Item = (&Field, &str)> + '_ {
        self.fields
            .iter()
            .filter_map(|field| field.ty().referenced_entity().map(|target| (field, target)))
    }

    /// Entity names used in method signatures, paired with the method.
    pub fn method_references(&self) -> impl Iterator<Item = (&MethodSignature, &str)> + '_ {
        self.methods
            .iter()
            .flat_map(|method| method.references().map(move |target| (method, target)))
    }

    /// References held by value, which default construction follows eagerly.
    pub fn direct_references(&self) -> impl Iterator<Item = (&Field, &str)> + '_ {
        self.fields
            .iter()
            .filter_map(|field| field.ty().direct_entity().map(|target| (field, target)))
    }
}

/// Fields of `schema` in declaration order.
pub fn fields_of(schema: &EntitySchema) -> Fields<'_> {
    schema.fields()
}
