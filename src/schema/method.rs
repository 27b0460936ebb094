use crate::schema::{FieldType, PrimitiveKind};

/// A named, typed parameter of a [`MethodSignature`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    ty: FieldType,
}

impl Parameter {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &FieldType {
        &self.ty
    }
}

///
/// MethodSignature
///
/// A hand-written method declared on an entity. The generator declares it in
/// the class and emits a stub definition once; the body belongs to the user.
///

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    name: String,
    returns: FieldType,
    parameters: Vec<Parameter>,
}

impl MethodSignature {
    /// A method returning `void` with no parameters.
    ///
    /// ```
    /// use wc_gen::schema::{FieldType, MethodSignature, PrimitiveKind};
    ///
    /// let scale = MethodSignature::new("scale")
    ///     .returning(FieldType::entity("Point3"))
    ///     .parameter("factor", PrimitiveKind::F32.into());
    ///
    /// assert_eq!(scale.parameters().len(), 1);
    /// assert_eq!(scale.references().collect::<Vec<_>>(), ["Point3"]);
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            returns: FieldType::Primitive(PrimitiveKind::Void),
            parameters: Vec::new(),
        }
    }

    pub fn returning(mut self, ty: FieldType) -> Self {
        self.returns = ty;
        self
    }

    pub fn parameter(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            ty,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn returns(&self) -> &FieldType {
        &self.returns
    }

    /// Parameters in declaration order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Entity names used by the return type and the parameters.
    pub fn references(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(&self.returns)
            .chain(self.parameters.iter().map(Parameter::ty))
            .filter_map(FieldType::referenced_entity)
    }

    /// Every type in the signature, return type first.
    pub fn types(&self) -> impl Iterator<Item = &FieldType> + '_ {
        std::iter::once(&self.returns).chain(self.parameters.iter().map(Parameter::ty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_void_without_parameters() {
        let method = MethodSignature::new("reset");
        assert_eq!(method.returns(), &FieldType::Primitive(PrimitiveKind::Void));
        assert!(method.parameters().is_empty());
        assert_eq!(method.references().count(), 0);
    }

    #[test]
    fn references_cover_return_and_list_parameters() {
        let method = MethodSignature::new("merge")
            .returning(FieldType::entity("Mesh"))
            .parameter("others", FieldType::list(FieldType::entity("Mesh")))
            .parameter("weight", PrimitiveKind::F64.into())
            .parameter("at", FieldType::entity("Point3"));

        assert_eq!(
            method.references().collect::<Vec<_>>(),
            ["Mesh", "Mesh", "Point3"]
        );
        let names: Vec<_> = method.parameters().iter().map(Parameter::name).collect();
        assert_eq!(names, ["others", "weight", "at"]);
    }
}
