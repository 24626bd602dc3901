use geocalc_core::{
    default_inputs, fields_for, CalcError, Dimension, InputError, InputSet, Operation, ShapeKind,
    ShapeMode,
};

fn required(shape: ShapeKind, operation: Operation) -> Vec<Dimension> {
    fields_for(shape, operation)
        .expect("reachable pair has a schema")
        .iter()
        .map(|field| field.dimension)
        .collect()
}

#[test]
fn fields_match_required_inputs_for_every_pair() {
    use Dimension::*;

    let expected: &[(ShapeKind, Operation, &[Dimension])] = &[
        (ShapeKind::Square, Operation::Area, &[Side]),
        (ShapeKind::Square, Operation::Perimeter, &[Side]),
        (ShapeKind::Rectangle, Operation::Area, &[Length, Width]),
        (ShapeKind::Rectangle, Operation::Perimeter, &[Length, Width]),
        (ShapeKind::Circle, Operation::Area, &[Radius]),
        (ShapeKind::Circle, Operation::Perimeter, &[Radius]),
        (ShapeKind::Triangle, Operation::Area, &[Base, Height]),
        (ShapeKind::Triangle, Operation::Perimeter, &[Base, SideB, SideC]),
        (ShapeKind::Cube, Operation::Volume, &[Side]),
        (ShapeKind::Cube, Operation::SurfaceArea, &[Side]),
        (ShapeKind::Cuboid, Operation::Volume, &[Length, Width, Height]),
        (ShapeKind::Cuboid, Operation::SurfaceArea, &[Length, Width, Height]),
        (ShapeKind::Sphere, Operation::Volume, &[Radius]),
        (ShapeKind::Sphere, Operation::SurfaceArea, &[Radius]),
        (ShapeKind::Cylinder, Operation::Volume, &[Radius, Height]),
        (ShapeKind::Cylinder, Operation::SurfaceArea, &[Radius, Height]),
    ];

    for (shape, operation, dimensions) in expected {
        assert_eq!(
            required(*shape, *operation),
            dimensions.to_vec(),
            "{shape:?}/{operation:?}"
        );
    }

    let reachable = [ShapeMode::TwoD, ShapeMode::ThreeD]
        .iter()
        .map(|mode| mode.shapes().len() * mode.operations().len())
        .sum::<usize>();
    assert_eq!(reachable, expected.len());
}

#[test]
fn schema_defaults_match_the_calculator_form() {
    let triangle = default_inputs(ShapeKind::Triangle, Operation::Perimeter).expect("defaults");
    assert_eq!(triangle.get(Dimension::Base), Some(10.0));
    assert_eq!(triangle.get(Dimension::SideB), Some(5.0));
    assert_eq!(triangle.get(Dimension::SideC), Some(5.0));
    assert_eq!(triangle.get(Dimension::Height), None);

    let rectangle = default_inputs(ShapeKind::Rectangle, Operation::Area).expect("defaults");
    assert_eq!(rectangle.get(Dimension::Length), Some(12.0));
    assert_eq!(rectangle.get(Dimension::Width), Some(5.0));
}

#[test]
fn triangle_extra_sides_use_zero_minimum() {
    let fields = fields_for(ShapeKind::Triangle, Operation::Perimeter).expect("schema");
    for field in fields {
        assert_eq!(field.minimum, 0.0, "{:?}", field.dimension);
    }
}

#[test]
fn negative_values_never_reach_the_formula_table() {
    let mut inputs = InputSet::new();
    let err = inputs
        .insert(Dimension::SideB, -5.0)
        .expect_err("negative side must be rejected");
    assert!(matches!(err, InputError::Negative { .. }));

    let err = geocalc_core::compute(ShapeKind::Triangle, Operation::Perimeter, &inputs, "cm")
        .expect_err("missing sides");
    assert_eq!(err, CalcError::InvalidInput(InputError::Missing(Dimension::Base)));
}

#[test]
fn deserialization_rejects_negative_values() {
    let value = serde_json::json!({ "radius": -1.0 });
    let err = serde_json::from_value::<InputSet>(value).expect_err("negative radius");
    assert!(
        err.to_string().contains("`radius` must be >= 0"),
        "unexpected error: {err}"
    );
}
