use std::f64::consts::PI;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serial_arm_descriptors::joint_space::{to_joint_space, JointSpaceType};

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets =
        unbounded_normalize_angle,
        unbounded_shortest_angular_distance,
        revolute_minus_pi_to_pi_normalize_angle,
        revolute_minus_pi_to_pi_shortest_angular_distance,
        revolute_zero_to_two_pi_normalize_angle,
        revolute_zero_to_two_pi_shortest_angular_distance,
}

criterion_main!(benches);

pub fn unbounded_normalize_angle(c: &mut Criterion) {
    let joint_space = to_joint_space(JointSpaceType::Unbounded);

    c.bench_function("Unbounded::normalize_angle", |b| {
        b.iter(|| joint_space.normalize_angle(black_box(7.75 * PI)))
    });
}

pub fn unbounded_shortest_angular_distance(c: &mut Criterion) {
    let joint_space = to_joint_space(JointSpaceType::Unbounded);

    c.bench_function("Unbounded::shortest_angular_distance", |b| {
        b.iter(|| joint_space.shortest_angular_distance(black_box(0.25 * PI), black_box(1.25 * PI)))
    });
}

pub fn revolute_minus_pi_to_pi_normalize_angle(c: &mut Criterion) {
    let joint_space = to_joint_space(JointSpaceType::Revolute {
        start_angle_in_radians: -PI,
    });

    c.bench_function("Revolute::<-PI, PI>::normalize_angle", |b| {
        b.iter(|| joint_space.normalize_angle(black_box(7.75 * PI)))
    });
}

pub fn revolute_minus_pi_to_pi_shortest_angular_distance(c: &mut Criterion) {
    let joint_space = to_joint_space(JointSpaceType::Revolute {
        start_angle_in_radians: -PI,
    });

    c.bench_function("Revolute::<-PI, PI>::shortest_angular_distance", |b| {
        b.iter(|| joint_space.shortest_angular_distance(black_box(0.25 * PI), black_box(1.25 * PI)))
    });
}

pub fn revolute_zero_to_two_pi_normalize_angle(c: &mut Criterion) {
    let joint_space = to_joint_space(JointSpaceType::Revolute {
        start_angle_in_radians: 0.0,
    });

    c.bench_function("Revolute::<0.0, 2PI>::normalize_angle", |b| {
        b.iter(|| joint_space.normalize_angle(black_box(7.75 * PI)))
    });
}

pub fn revolute_zero_to_two_pi_shortest_angular_distance(c: &mut Criterion) {
    let joint_space = to_joint_space(JointSpaceType::Revolute {
        start_angle_in_radians: 0.0,
    });

    c.bench_function("Revolute::<0.0, 2PI>::shortest_angular_distance", |b| {
        b.iter(|| joint_space.shortest_angular_distance(black_box(0.25 * PI), black_box(1.25 * PI)))
    });
}
