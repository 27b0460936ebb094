use crate::schema::FieldType;
use std::iter::FusedIterator;

/// A named, typed member of an entity. Constructed only through
/// [`EntitySchema::define`](crate::schema::EntitySchema::define), which assigns
/// the declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    name: String,
    ty: FieldType,
    declaration_order: usize,
}

impl Field {
    pub(crate) fn new(name: String, ty: FieldType, declaration_order: usize) -> Self {
        Self {
            name,
            ty,
            declaration_order,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &FieldType {
        &self.ty
    }

    pub fn declaration_order(&self) -> usize {
        self.declaration_order
    }
}

/// Fields of one entity in declaration order. Every call to
/// [`fields_of`](crate::schema::fields_of) starts a fresh pass.
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    inner: std::slice::Iter<'a, Field>,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(fields: &'a [Field]) -> Self {
        Self {
            inner: fields.iter(),
        }
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a Field;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Fields<'_> {}

impl FusedIterator for Fields<'_> {}
