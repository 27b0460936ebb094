use crate::error::SchemaError;
use crate::schema::EntitySchema;
use derive_more::Display;
use std::collections::{HashMap, HashSet, VecDeque};

/// Position of an entity in its `SchemaSet` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("#{_0}")]
pub struct EntityId(usize);

impl EntityId {
    pub const fn index(self) -> usize {
        self.0
    }
}

///
/// SchemaSet
///
/// Arena of entity schemas plus a name index. Entities may be declared before
/// the entities they reference; references are reconciled by `resolve` (one
/// entity) or `check` (the whole set) before emission.
///

#[derive(Debug, Clone, Default)]
pub struct SchemaSet {
    entities: Vec<EntitySchema>,
    index: HashMap<String, EntityId>,
}

impl SchemaSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, schema: EntitySchema) -> Result<EntityId, SchemaError> {
        if self.index.contains_key(schema.name()) {
            return Err(SchemaError::DuplicateEntity {
                entity: schema.name().to_string(),
            });
        }

        let id = EntityId(self.entities.len());
        self.index.insert(schema.name().to_string(), id);
        self.entities.push(schema);

        Ok(id)
    }

    pub fn get(&self, name: &str) -> Option<&EntitySchema> {
        self.id_of(name).map(|id| &self.entities[id.0])
    }

    pub fn id_of(&self, name: &str) -> Option<EntityId> {
        self.index.get(name).copied()
    }

    pub fn by_id(&self, id: EntityId) -> Option<&EntitySchema> {
        self.entities.get(id.0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Entities in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, EntitySchema> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Look up `name` and verify that everything its values are built from is
    /// declared and that default construction terminates.
    ///
    /// Fails with `UnknownEntity` if `name` itself is missing,
    /// `UnresolvedType` for the first dangling reference found in the
    /// composition closure (attributed to the entity that owns the field) or
    /// in the entity's own method signatures, or `CompositionCycle` when the
    /// entity reaches a cycle of by-value references.
    pub fn resolve(&self, name: &str) -> Result<&EntitySchema, SchemaError> {
        let schema = self.get(name).ok_or_else(|| SchemaError::UnknownEntity {
            entity: name.to_string(),
        })?;

        self.check_closure(schema)?;
        if let Some(err) = self.unresolved_method_types(schema).next() {
            return Err(err);
        }

        if let Some(path) = self.find_cycle(name, &mut HashSet::new()) {
            return Err(SchemaError::CompositionCycle {
                entity: name.to_string(),
                path,
            });
        }

        Ok(schema)
    }

    /// Validate the whole set, collecting every unresolved reference and every
    /// by-value cycle instead of stopping at the first.
    pub fn check(&self) -> Result<(), Vec<SchemaError>> {
        let mut errors = Vec::new();

        for schema in &self.entities {
            for (field, target) in schema.references() {
                if !self.contains(target) {
                    errors.push(SchemaError::UnresolvedType {
                        entity: schema.name().to_string(),
                        field: field.name().to_string(),
                        target: target.to_string(),
                    });
                }
            }
            errors.extend(self.unresolved_method_types(schema));
        }

        let mut done = HashSet::new();
        let mut reported = HashSet::new();
        for schema in &self.entities {
            if let Some(path) = self.find_cycle(schema.name(), &mut done) {
                let mut members: Vec<_> = path.iter().cloned().collect();
                members.sort();
                members.dedup();

                if reported.insert(members) {
                    errors.push(SchemaError::CompositionCycle {
                        entity: path[0].clone(),
                        path,
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    // Breadth-first walk over every reference reachable from `root`.
    fn check_closure(&self, root: &EntitySchema) -> Result<(), SchemaError> {
        let mut visited = HashSet::from([root.name()]);
        let mut queue = VecDeque::from([root]);

        while let Some(schema) = queue.pop_front() {
            for (field, target) in schema.references() {
                let Some(next) = self.get(target) else {
                    return Err(SchemaError::UnresolvedType {
                        entity: schema.name().to_string(),
                        field: field.name().to_string(),
                        target: target.to_string(),
                    });
                };

                if visited.insert(next.name()) {
                    queue.push_back(next);
                }
            }
        }

        Ok(())
    }

    // Method signatures only name their types; they are not composed, so the
    // targets must exist but their closure is not walked.
    fn unresolved_method_types<'s>(
        &'s self,
        schema: &'s EntitySchema,
    ) -> impl Iterator<Item = SchemaError> + 's {
        schema
            .method_references()
            .filter(|(_, target)| !self.contains(target))
            .map(|(method, target)| SchemaError::UnresolvedMethodType {
                entity: schema.name().to_string(),
                method: method.name().to_string(),
                target: target.to_string(),
            })
    }

    // Depth-first search over by-value references with an explicit stack, so
    // long composition chains cannot exhaust the call stack. Returns the cycle
    // as a path that starts and ends with the same entity, e.g. `[A, B, A]`.
    // Entities in `done` are known not to reach a cycle and are skipped.
    fn find_cycle<'s>(&'s self, root: &str, done: &mut HashSet<&'s str>) -> Option<Vec<String>> {
        let schema = self.get(root)?;
        if done.contains(schema.name()) {
            return None;
        }

        let mut path: Vec<&str> = vec![schema.name()];
        let mut on_path: HashSet<&str> = HashSet::from([schema.name()]);
        let mut pending: Vec<Vec<&str>> = vec![Self::targets_of(schema)];

        while let Some(targets) = pending.last_mut() {
            let Some(next) = targets.pop() else {
                pending.pop();
                if let Some(finished) = path.pop() {
                    on_path.remove(finished);
                    done.insert(finished);
                }
                continue;
            };

            if on_path.contains(next) {
                let start = path.iter().position(|entry| *entry == next)?;
                let mut cycle: Vec<String> = path[start..].iter().map(|s| s.to_string()).collect();
                cycle.push(next.to_string());
                return Some(cycle);
            }

            if done.contains(next) {
                continue;
            }

            let Some(schema) = self.get(next) else {
                continue;
            };

            path.push(schema.name());
            on_path.insert(schema.name());
            pending.push(Self::targets_of(schema));
        }

        None
    }

    // Direct targets reversed, so popping yields declaration order.
    fn targets_of(schema: &EntitySchema) -> Vec<&str> {
        let mut targets: Vec<&str> = schema.direct_references().map(|(_, t)| t).collect();
        targets.reverse();
        targets
    }
}

impl<'a> IntoIterator for &'a SchemaSet {
    type Item = &'a EntitySchema;
    type IntoIter = std::slice::Iter<'a, EntitySchema>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::schema::{FieldType, MethodSignature, PrimitiveKind};

    fn entity(name: &str, fields: &[(&str, FieldType)]) -> EntitySchema {
        EntitySchema::define(name, fields.iter().cloned()).unwrap()
    }

    #[test]
    fn declare_indexes_by_name_in_order() {
        let mut set = SchemaSet::new();
        let a = set.declare(entity("A", &[])).unwrap();
        let b = set.declare(entity("B", &[])).unwrap();

        assert_eq!(a.index(), 0);
        assert_eq!(b.to_string(), "#1");
        assert_eq!(set.id_of("B"), Some(b));
        assert_eq!(set.by_id(a).map(EntitySchema::name), Some("A"));

        let names: Vec<_> = set.iter().map(EntitySchema::name).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn duplicate_entity_is_rejected() {
        let mut set = SchemaSet::new();
        set.declare(entity("A", &[])).unwrap();
        let err = set.declare(entity("A", &[])).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DuplicateEntity);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn forward_references_resolve_after_declaration() {
        let mut set = SchemaSet::new();
        set.declare(entity("Line", &[("from", FieldType::entity("Point"))]))
            .unwrap();

        assert_eq!(
            set.resolve("Line").unwrap_err().kind(),
            ErrorKind::UnresolvedType
        );

        set.declare(entity("Point", &[("x", PrimitiveKind::F32.into())]))
            .unwrap();

        assert!(set.resolve("Line").is_ok());
        assert!(set.check().is_ok());
    }

    #[test]
    fn unresolved_reference_is_attributed_to_owning_entity() {
        let mut set = SchemaSet::new();
        set.declare(entity("Outer", &[("middle", FieldType::entity("Middle"))]))
            .unwrap();
        set.declare(entity(
            "Middle",
            &[("leaves", FieldType::list(FieldType::entity("Missing")))],
        ))
        .unwrap();

        let err = set.resolve("Outer").unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnresolvedType {
                entity: "Middle".to_string(),
                field: "leaves".to_string(),
                target: "Missing".to_string(),
            }
        );
    }

    #[test]
    fn unknown_entity_is_reported() {
        let set = SchemaSet::new();
        assert_eq!(
            set.resolve("Nope").unwrap_err().kind(),
            ErrorKind::UnknownEntity
        );
    }

    #[test]
    fn by_value_cycle_is_rejected() {
        let mut set = SchemaSet::new();
        set.declare(entity("A", &[("b", FieldType::entity("B"))]))
            .unwrap();
        set.declare(entity("B", &[("a", FieldType::entity("A"))]))
            .unwrap();

        let err = set.resolve("A").unwrap_err();
        assert_eq!(
            err,
            SchemaError::CompositionCycle {
                entity: "A".to_string(),
                path: vec!["A".to_string(), "B".to_string(), "A".to_string()],
            }
        );
    }

    #[test]
    fn entity_reaching_a_cycle_is_rejected() {
        let mut set = SchemaSet::new();
        set.declare(entity("Root", &[("node", FieldType::entity("Node"))]))
            .unwrap();
        set.declare(entity("Node", &[("next", FieldType::entity("Node"))]))
            .unwrap();

        let err = set.resolve("Root").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CompositionCycle);
        if let SchemaError::CompositionCycle { path, .. } = err {
            assert_eq!(path, ["Node", "Node"]);
        }
    }

    #[test]
    fn cycle_through_a_list_is_finite() {
        let mut set = SchemaSet::new();
        set.declare(entity(
            "Tree",
            &[
                ("value", PrimitiveKind::I32.into()),
                ("children", FieldType::list(FieldType::entity("Tree"))),
            ],
        ))
        .unwrap();

        assert!(set.resolve("Tree").is_ok());
        assert!(set.check().is_ok());
    }

    #[test]
    fn check_collects_every_problem_once() {
        let mut set = SchemaSet::new();
        set.declare(entity("A", &[("b", FieldType::entity("B"))]))
            .unwrap();
        set.declare(entity("B", &[("a", FieldType::entity("A"))]))
            .unwrap();
        set.declare(entity(
            "C",
            &[
                ("x", FieldType::entity("Missing")),
                ("y", FieldType::entity("AlsoMissing")),
            ],
        ))
        .unwrap();

        let errors = set.check().unwrap_err();
        let kinds: Vec<_> = errors.iter().map(SchemaError::kind).collect();
        assert_eq!(
            kinds,
            [
                ErrorKind::UnresolvedType,
                ErrorKind::UnresolvedType,
                ErrorKind::CompositionCycle,
            ]
        );
    }

    #[test]
    fn mutual_reference_through_a_list_is_finite() {
        let mut set = SchemaSet::new();
        set.declare(entity("Parent", &[("child", FieldType::entity("Child"))]))
            .unwrap();
        set.declare(entity(
            "Child",
            &[("siblings", FieldType::list(FieldType::entity("Parent")))],
        ))
        .unwrap();

        assert!(set.resolve("Parent").is_ok());
        assert!(set.resolve("Child").is_ok());
        assert!(set.check().is_ok());
    }

    #[test]
    fn long_composition_chain_resolves_without_recursion() {
        const DEPTH: usize = 50_000;

        let mut set = SchemaSet::new();
        for i in 0..DEPTH {
            let fields = if i + 1 < DEPTH {
                vec![("next", FieldType::entity(format!("Link{}", i + 1)))]
            } else {
                vec![("value", PrimitiveKind::I32.into())]
            };
            set.declare(entity(&format!("Link{i}"), &fields)).unwrap();
        }

        assert!(set.resolve("Link0").is_ok());
        assert!(set.check().is_ok());

        let last = format!("Link{}", DEPTH - 1);
        set.declare(entity("Closer", &[("head", FieldType::entity("Link0"))]))
            .unwrap();
        let mut looped = SchemaSet::new();
        for schema in set.iter().filter(|schema| schema.name() != last) {
            looped.declare(schema.clone()).unwrap();
        }
        looped
            .declare(entity(&last, &[("back", FieldType::entity("Link0"))]))
            .unwrap();

        let err = looped.resolve("Closer").unwrap_err();
        if let SchemaError::CompositionCycle { path, .. } = err {
            assert_eq!(path.len(), DEPTH + 1);
            assert_eq!(path.first(), path.last());
            assert_eq!(path[0], "Link0");
        } else {
            panic!("expected a composition cycle, got {err:?}");
        }
    }

    #[test]
    fn method_signatures_must_name_declared_entities() {
        let shape = entity("Shape", &[("id", PrimitiveKind::U32.into())])
            .with_methods([MethodSignature::new("anchor").returning(FieldType::entity("Anchor"))])
            .unwrap();

        let mut set = SchemaSet::new();
        set.declare(shape).unwrap();

        let err = set.resolve("Shape").unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnresolvedMethodType {
                entity: "Shape".to_string(),
                method: "anchor".to_string(),
                target: "Anchor".to_string(),
            }
        );
        assert_eq!(err.kind(), ErrorKind::UnresolvedType);
        assert_eq!(set.check().unwrap_err(), [err]);

        set.declare(entity("Anchor", &[])).unwrap();
        assert!(set.resolve("Shape").is_ok());
    }
}
