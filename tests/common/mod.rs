// Common test fixtures
#![allow(dead_code)]

use wc_gen::schema::{EntitySchema, FieldType, PrimitiveKind, SchemaSet};

/// Schema source with a plain entity, a composed one and an entity whose
/// reference never resolves.
pub const SHAPES_TOML: &str = r#"
[[entity]]
name = "Point3"
fields = [
    { name = "y", type = "f32" },
    { name = "x", type = "f32" },
    { name = "z", type = "f32" },
]

[[entity]]
name = "Scene"
fields = [
    { name = "name", type = "string" },
    { name = "origin", type = "Point3" },
    { name = "points", type = "Point3[]" },
    { name = "layer", type = "u16" },
]

[[entity]]
name = "Box"
fields = [{ name = "inner", type = "Missing" }]
"#;

pub fn point3() -> EntitySchema {
    EntitySchema::define(
        "Point3",
        [
            ("y", PrimitiveKind::F32.into()),
            ("x", PrimitiveKind::F32.into()),
            ("z", PrimitiveKind::F32.into()),
        ],
    )
    .unwrap()
}

pub fn scene() -> EntitySchema {
    EntitySchema::define(
        "Scene",
        [
            ("name", PrimitiveKind::String.into()),
            ("origin", FieldType::entity("Point3")),
            ("points", FieldType::list(FieldType::entity("Point3"))),
            ("layer", PrimitiveKind::U16.into()),
        ],
    )
    .unwrap()
}

/// Point3 and Scene, both resolvable.
pub fn shapes() -> SchemaSet {
    let mut set = SchemaSet::new();
    set.declare(point3()).unwrap();
    set.declare(scene()).unwrap();
    set
}
