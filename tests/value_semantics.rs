//! Value Model Property Tests
//!
//! Copies, clones and assignments of in-memory instances must be independent
//! of their source and structurally equal to it.

mod common;

use common::shapes;
use proptest::prelude::*;
use wc_gen::prelude::*;

fn point(schemas: &SchemaSet, (y, x, z): (f32, f32, f32)) -> Instance {
    let mut point = Instance::default_of(schemas, "Point3").unwrap();
    point.set("y", y).unwrap();
    point.set("x", x).unwrap();
    point.set("z", z).unwrap();
    point
}

fn scene(
    schemas: &SchemaSet,
    name: &str,
    origin: (f32, f32, f32),
    points: &[(f32, f32, f32)],
    layer: u16,
) -> Instance {
    let mut scene = Instance::default_of(schemas, "Scene").unwrap();
    scene.set("name", name).unwrap();
    scene
        .entity_mut("origin")
        .unwrap()
        .assign(&point(schemas, origin))
        .unwrap();
    scene
        .set(
            "points",
            points
                .iter()
                .map(|p| Value::from(point(schemas, *p)))
                .collect::<Vec<_>>(),
        )
        .unwrap();
    scene.set("layer", u32::from(layer)).unwrap();
    scene
}

fn arb_coords() -> impl Strategy<Value = (f32, f32, f32)> {
    (-1.0e6f32..1.0e6, -1.0e6f32..1.0e6, -1.0e6f32..1.0e6)
}

proptest! {
    #[test]
    fn clone_equals_source(
        name in "[a-z]{0,8}",
        origin in arb_coords(),
        points in prop::collection::vec(arb_coords(), 0..4),
        layer in any::<u16>(),
    ) {
        let schemas = shapes();
        let source = scene(&schemas, &name, origin, &points, layer);
        let copy = source.clone();

        prop_assert_eq!(&copy, &source);
        prop_assert!(!(copy != source));
    }

    #[test]
    fn mutating_a_copy_leaves_the_source_alone(
        origin in arb_coords(),
        shift in 1.0f32..100.0,
    ) {
        let schemas = shapes();
        let source = scene(&schemas, "a", origin, &[], 0);

        let mut copy = Instance::default_of(&schemas, "Scene").unwrap();
        source.copy_to(&mut copy).unwrap();
        copy.entity_mut("origin").unwrap().set("x", origin.1 + shift).unwrap();

        prop_assert_ne!(&copy, &source);
        prop_assert_eq!(
            source.entity("origin").unwrap().get("x").unwrap(),
            &Value::from(origin.1)
        );
    }

    #[test]
    fn assignment_makes_instances_equal(
        left in arb_coords(),
        right in arb_coords(),
    ) {
        let schemas = shapes();
        let mut a = point(&schemas, left);
        let b = point(&schemas, right);

        a.assign(&b).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn inequality_is_negated_equality(
        left in arb_coords(),
        right in arb_coords(),
    ) {
        let schemas = shapes();
        let a = point(&schemas, left);
        let b = point(&schemas, right);

        prop_assert_eq!(a != b, !(a == b));
        prop_assert_eq!(a == b, left == right);
    }
}

#[test]
fn test_default_instances_are_equal() {
    let schemas = shapes();
    let a = Instance::default_of(&schemas, "Scene").unwrap();
    let b = Instance::default_of(&schemas, "Scene").unwrap();

    assert_eq!(a, b);
    assert_eq!(a.get("layer").unwrap(), &Value::UInt(0));
}

#[test]
fn test_unresolved_instances_fail_like_emission() {
    let mut schemas = shapes();
    schemas
        .declare(EntitySchema::define("Box", [("inner", FieldType::entity("Missing"))]).unwrap())
        .unwrap();

    let value_err = Instance::default_of(&schemas, "Box").unwrap_err();
    let emit_err = emit(&schemas, "Box", &GeneratorConfig::default()).unwrap_err();

    assert_eq!(value_err.kind(), emit_err.kind());
    assert_eq!(value_err.kind(), ErrorKind::UnresolvedType);
}

#[test]
fn test_out_of_range_integer_is_a_type_mismatch() {
    let schemas = shapes();
    let mut scene = Instance::default_of(&schemas, "Scene").unwrap();

    let err = scene.set("layer", 70_000u32).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(scene.get("layer").unwrap(), &Value::UInt(0));
}

#[test]
fn test_point3_clone_scenario() {
    let schemas = shapes();

    let zero = Instance::default_of(&schemas, "Point3").unwrap();
    for (_, value) in zero.fields() {
        assert_eq!(value, &Value::Float(0.0));
    }

    let a = point(&schemas, (1.0, 2.0, 3.0));
    let mut b = a.clone();
    assert_eq!(b, a);

    b.set("x", 9.0f32).unwrap();
    assert_eq!(a.get("x").unwrap(), &Value::Float(2.0));
    assert_eq!(b.get("x").unwrap(), &Value::Float(9.0));
    assert!(a != b);
}

#[test]
fn test_assigning_an_equal_value_returns_the_receiver_unchanged() {
    let schemas = shapes();
    let mut a = scene(&schemas, "home", (1.0, 2.0, 3.0), &[(4.0, 5.0, 6.0)], 7);
    let snapshot = a.clone();

    let receiver: *const Instance = &a;
    let returned: *const Instance = a.assign(&snapshot).unwrap();

    assert_eq!(receiver, returned);
    assert_eq!(a, snapshot);
}

proptest! {
    #[test]
    fn equality_is_reflexive_and_symmetric(
        left in arb_coords(),
        right in arb_coords(),
    ) {
        let schemas = shapes();
        let a = point(&schemas, left);
        let b = point(&schemas, right);

        prop_assert_eq!(&a, &a);
        prop_assert_eq!(a == b, b == a);
    }
}
