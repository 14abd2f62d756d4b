use std::f64::consts::PI;

use float_cmp::{ApproxEq, F64Margin};

use crate::geometry::Pose;
use crate::hardware::motor_interface::ServoMotorDescriptor;
use crate::hardware::servo::{JointServoMap, ServoAngleToPwmCalculator};
use crate::model_elements::arm::ArmKinematics;
use crate::model_elements::chain_elements::{Frame, RotationAxis, SegmentID};
use crate::Error;

fn assert_pwm_matches(expected: f64, actual: f64) {
    assert!(
        expected.approx_eq(actual, F64Margin { ulps: 2, epsilon: 1e-9 }),
        "Expected the PWM value {} but got the PWM value {}",
        expected,
        actual
    );
}

/// A servo driving the turret of a small hobby arm.
fn create_turret_calculator() -> ServoAngleToPwmCalculator {
    ServoAngleToPwmCalculator::new(180.0, 590.0, -75.0, 90.0)
}

struct MockServoMotor {
    minimum_pwm: f64,
    maximum_pwm: f64,
    minimum_angle_in_degrees: f64,
    maximum_angle_in_degrees: f64,
}

impl ServoMotorDescriptor for MockServoMotor {
    fn maximum_angle_in_degrees(&self) -> f64 {
        self.maximum_angle_in_degrees
    }

    fn maximum_pwm(&self) -> f64 {
        self.maximum_pwm
    }

    fn minimum_angle_in_degrees(&self) -> f64 {
        self.minimum_angle_in_degrees
    }

    fn minimum_pwm(&self) -> f64 {
        self.minimum_pwm
    }
}

// ServoAngleToPwmCalculator tests

#[test]
fn test_pwm_at_the_calibration_points() {
    let calculator = create_turret_calculator();

    assert_pwm_matches(180.0, calculator.get_pwm_value((-75.0_f64).to_radians()));
    assert_pwm_matches(590.0, calculator.get_pwm_value(90.0_f64.to_radians()));
}

#[test]
fn test_pwm_between_the_calibration_points_is_linear() {
    let calculator = create_turret_calculator();

    // Half way and a quarter of the way through the 165 degree range
    assert_pwm_matches(385.0, calculator.get_pwm_value(7.5_f64.to_radians()));
    assert_pwm_matches(282.5, calculator.get_pwm_value((-33.75_f64).to_radians()));
}

#[test]
fn test_pwm_beyond_the_calibration_range_clamps() {
    let calculator = create_turret_calculator();

    assert_eq!(180.0, calculator.get_pwm_value(-PI));
    assert_eq!(590.0, calculator.get_pwm_value(PI));
    assert_eq!(180.0, calculator.get_pwm_value(-100.0));
    assert_eq!(590.0, calculator.get_pwm_value(100.0));
}

#[test]
fn test_pwm_with_an_inverted_pwm_range() {
    // The servo turns against the direction of the joint
    let calculator = ServoAngleToPwmCalculator::new(600.0, 110.0, 0.0, 180.0);

    assert_pwm_matches(600.0, calculator.get_pwm_value(0.0));
    assert_pwm_matches(110.0, calculator.get_pwm_value(PI));
    assert_eq!(600.0, calculator.get_pwm_value(-1.0));
    assert_eq!(110.0, calculator.get_pwm_value(4.0));
}

#[test]
fn test_from_motor_matches_the_direct_calibration() {
    let motor = MockServoMotor {
        minimum_pwm: 180.0,
        maximum_pwm: 590.0,
        minimum_angle_in_degrees: -75.0,
        maximum_angle_in_degrees: 90.0,
    };

    let from_motor = ServoAngleToPwmCalculator::from_motor(&motor);

    assert_eq!(create_turret_calculator(), from_motor);
}

// JointServoMap tests

fn create_arm_with_shoulder() -> (ArmKinematics, SegmentID) {
    let mut arm = ArmKinematics::new(Frame::new("arm-base-plate".to_string()), Pose::identity());
    let shoulder = arm
        .add_joint("shoulder".to_string(), RotationAxis::Z, 0.0, 0.0, 0.0)
        .unwrap();

    (arm, shoulder)
}

#[test]
fn test_new_map_is_empty() {
    let servos = JointServoMap::new();

    assert_eq!(0, servos.number_of_servos());

    let default_servos = JointServoMap::default();
    assert_eq!(0, default_servos.number_of_servos());
}

#[test]
fn test_assigning_a_servo_to_a_joint() {
    let (mut arm, shoulder) = create_arm_with_shoulder();
    let elbow = arm
        .add_joint("elbow".to_string(), RotationAxis::Y, 0.0, 0.0, 0.0)
        .unwrap();

    let mut servos = JointServoMap::new();
    servos.assign(shoulder, create_turret_calculator());

    assert_eq!(1, servos.number_of_servos());
    assert!(servos.has_servo_for(&shoulder));
    assert!(!servos.has_servo_for(&elbow));
}

#[test]
fn test_pwm_value_for_a_joint_uses_the_current_angle() {
    let (mut arm, shoulder) = create_arm_with_shoulder();
    let calculator = create_turret_calculator();

    let mut servos = JointServoMap::new();
    servos.assign(shoulder, calculator.clone());

    arm.set_joint_angle(&shoulder, 30.0_f64.to_radians()).unwrap();
    assert_eq!(
        calculator.get_pwm_value(30.0_f64.to_radians()),
        servos.get_pwm_value_for_joint(&arm, &shoulder).unwrap()
    );

    arm.set_joint_angle(&shoulder, (-45.0_f64).to_radians()).unwrap();
    assert_eq!(
        calculator.get_pwm_value((-45.0_f64).to_radians()),
        servos.get_pwm_value_for_joint(&arm, &shoulder).unwrap()
    );
}

#[test]
fn test_pwm_value_for_an_unassigned_segment_is_an_error() {
    let (arm, shoulder) = create_arm_with_shoulder();
    let servos = JointServoMap::new();

    let result = servos.get_pwm_value_for_joint(&arm, &shoulder);

    assert_eq!(
        Error::NoServoForSegment { id: shoulder },
        result.unwrap_err()
    );
}

#[test]
fn test_pwm_value_for_a_link_is_an_error() {
    let (mut arm, _shoulder) = create_arm_with_shoulder();
    let link = arm
        .add_link("upper-arm".to_string(), 5.0, 0.0, 0.0, 0.0, 0.0, 0.0)
        .unwrap();

    let mut servos = JointServoMap::new();
    servos.assign(link, create_turret_calculator());

    let result = servos.get_pwm_value_for_joint(&arm, &link);

    assert_eq!(Error::SegmentIsNotAJoint { id: link }, result.unwrap_err());
}

#[test]
fn test_pwm_value_for_an_unknown_segment_is_an_error() {
    let (arm, _shoulder) = create_arm_with_shoulder();
    let (_other_arm, foreign) = create_arm_with_shoulder();

    let mut servos = JointServoMap::new();
    servos.assign(foreign, create_turret_calculator());

    let result = servos.get_pwm_value_for_joint(&arm, &foreign);

    assert_eq!(Error::UnknownSegment { id: foreign }, result.unwrap_err());
}

#[test]
fn test_assign_replaces_the_previous_calculator() {
    let (mut arm, shoulder) = create_arm_with_shoulder();
    arm.set_joint_angle(&shoulder, 45.0_f64.to_radians()).unwrap();

    let replacement = ServoAngleToPwmCalculator::new(218.0, 560.0, -75.0, 45.0);

    let mut servos = JointServoMap::new();
    servos.assign(shoulder, create_turret_calculator());
    servos.assign(shoulder, replacement.clone());

    assert_eq!(1, servos.number_of_servos());
    assert_eq!(
        replacement.get_pwm_value(45.0_f64.to_radians()),
        servos.get_pwm_value_for_joint(&arm, &shoulder).unwrap()
    );
}
