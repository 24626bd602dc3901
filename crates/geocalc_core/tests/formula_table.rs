use geocalc_core::{compute, Dimension, InputSet, Operation, ShapeKind};
use std::f64::consts::PI;

const TOLERANCE: f64 = 1e-9;

fn inputs(values: &[(Dimension, f64)]) -> InputSet {
    let mut set = InputSet::new();
    for (dimension, value) in values {
        set.insert(*dimension, *value).expect("valid input value");
    }
    set
}

fn value_of(shape: ShapeKind, operation: Operation, values: &[(Dimension, f64)]) -> f64 {
    compute(shape, operation, &inputs(values), "cm")
        .expect("formula should evaluate")
        .value
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn plane_formulas_match_closed_forms() {
    use Dimension::*;

    assert_close(value_of(ShapeKind::Square, Operation::Area, &[(Side, 3.0)]), 9.0);
    assert_close(
        value_of(ShapeKind::Square, Operation::Perimeter, &[(Side, 3.0)]),
        12.0,
    );
    assert_close(
        value_of(
            ShapeKind::Rectangle,
            Operation::Area,
            &[(Length, 12.0), (Width, 5.0)],
        ),
        60.0,
    );
    assert_close(
        value_of(
            ShapeKind::Rectangle,
            Operation::Perimeter,
            &[(Length, 12.0), (Width, 5.0)],
        ),
        34.0,
    );
    assert_close(
        value_of(ShapeKind::Circle, Operation::Area, &[(Radius, 2.0)]),
        PI * 4.0,
    );
    assert_close(
        value_of(ShapeKind::Circle, Operation::Perimeter, &[(Radius, 2.0)]),
        4.0 * PI,
    );
    assert_close(
        value_of(
            ShapeKind::Triangle,
            Operation::Area,
            &[(Base, 10.0), (Height, 8.0)],
        ),
        40.0,
    );
}

#[test]
fn solid_formulas_match_closed_forms() {
    use Dimension::*;

    assert_close(value_of(ShapeKind::Cube, Operation::Volume, &[(Side, 3.0)]), 27.0);
    assert_close(
        value_of(ShapeKind::Cube, Operation::SurfaceArea, &[(Side, 3.0)]),
        54.0,
    );
    assert_close(
        value_of(
            ShapeKind::Cuboid,
            Operation::Volume,
            &[(Length, 10.0), (Width, 5.0), (Height, 4.0)],
        ),
        200.0,
    );
    assert_close(
        value_of(ShapeKind::Sphere, Operation::Volume, &[(Radius, 3.0)]),
        36.0 * PI,
    );
    assert_close(
        value_of(ShapeKind::Sphere, Operation::SurfaceArea, &[(Radius, 3.0)]),
        36.0 * PI,
    );
    assert_close(
        value_of(
            ShapeKind::Cylinder,
            Operation::SurfaceArea,
            &[(Radius, 5.0), (Height, 10.0)],
        ),
        150.0 * PI,
    );
}

#[test]
fn documented_scenarios() {
    use Dimension::*;

    let square = compute(
        ShapeKind::Square,
        Operation::Area,
        &inputs(&[(Side, 10.0)]),
        "cm",
    )
    .expect("square area");
    assert_close(square.value, 100.0);
    assert_eq!(square.steps.last().expect("result step"), "A = 100.00 cm²");

    let circle = value_of(ShapeKind::Circle, Operation::Area, &[(Radius, 7.0)]);
    assert_close(circle, PI * 49.0);
    assert_eq!(format!("{circle:.2}"), "153.94");

    assert_close(
        value_of(
            ShapeKind::Triangle,
            Operation::Perimeter,
            &[(Base, 10.0), (SideB, 5.0), (SideC, 5.0)],
        ),
        20.0,
    );

    let cylinder = value_of(
        ShapeKind::Cylinder,
        Operation::Volume,
        &[(Radius, 5.0), (Height, 10.0)],
    );
    assert_close(cylinder, PI * 25.0 * 10.0);
    assert_eq!(format!("{cylinder:.2}"), "785.40");

    assert_close(
        value_of(
            ShapeKind::Cuboid,
            Operation::SurfaceArea,
            &[(Length, 10.0), (Width, 5.0), (Height, 4.0)],
        ),
        220.0,
    );
}

#[test]
fn compute_is_idempotent() {
    let set = inputs(&[(Dimension::Radius, 1.25), (Dimension::Height, 3.5)]);
    let first = compute(ShapeKind::Cylinder, Operation::SurfaceArea, &set, "mm").expect("first");
    let second = compute(ShapeKind::Cylinder, Operation::SurfaceArea, &set, "mm").expect("second");
    assert_eq!(first, second);
}

#[test]
fn unit_label_does_not_change_value() {
    let set = inputs(&[(Dimension::Side, 2.0)]);
    let in_cm = compute(ShapeKind::Cube, Operation::Volume, &set, "cm").expect("cm");
    let in_m = compute(ShapeKind::Cube, Operation::Volume, &set, "m").expect("m");
    assert_eq!(in_cm.value, in_m.value);
    assert_ne!(in_cm.steps, in_m.steps);
}

#[test]
fn zero_dimensions_yield_zero() {
    assert_close(
        value_of(ShapeKind::Sphere, Operation::Volume, &[(Dimension::Radius, 0.0)]),
        0.0,
    );
}
