//! Provides the translation from joint angles to servo PWM values

use std::collections::HashMap;

use crate::{
    hardware::motor_interface::ServoMotorDescriptor,
    model_elements::{arm::ArmKinematics, chain_elements::SegmentID},
    Error,
};

#[cfg(test)]
#[path = "servo_tests.rs"]
mod servo_tests;

/// Translates joint angles into the PWM values that hold a hobby servo at
/// those angles.
///
/// The translation is an affine map through two calibration points, each
/// pairing a mechanical angle with a measured PWM value. Calibration angles
/// are given in degrees, matching the way servo ranges are usually specified;
/// the angles handed to [ServoAngleToPwmCalculator::get_pwm_value] are in
/// radians, matching the rest of the crate. Angles outside the calibrated
/// range produce the PWM value of the nearest calibration point.
#[derive(Clone, Debug, PartialEq)]
pub struct ServoAngleToPwmCalculator {
    /// The change in the PWM value per radian of joint angle.
    slope: f64,

    /// The PWM value at an angle of zero radians.
    intercept: f64,

    /// The smallest PWM value the calculator returns.
    lower_pwm_bound: f64,

    /// The largest PWM value the calculator returns.
    upper_pwm_bound: f64,
}

impl ServoAngleToPwmCalculator {
    /// Creates a new calculator from the calibration of the given motor.
    ///
    /// ## Parameters
    ///
    /// * 'motor' - The descriptor of the servo motor that drives the joint.
    pub fn from_motor(motor: &impl ServoMotorDescriptor) -> Self {
        Self::new(
            motor.minimum_pwm(),
            motor.maximum_pwm(),
            motor.minimum_angle_in_degrees(),
            motor.maximum_angle_in_degrees(),
        )
    }

    /// Returns the PWM value at which the servo holds the given angle.
    ///
    /// ## Parameters
    ///
    /// * 'angle_in_radians' - The angle the servo should hold.
    ///
    /// ## Examples
    ///
    /// ```
    /// use serial_arm_descriptors::hardware::servo::ServoAngleToPwmCalculator;
    ///
    /// let calculator = ServoAngleToPwmCalculator::new(180.0, 590.0, -75.0, 90.0);
    ///
    /// let pwm = calculator.get_pwm_value(90.0_f64.to_radians());
    /// assert!((pwm - 590.0).abs() < 1e-9);
    /// ```
    pub fn get_pwm_value(&self, angle_in_radians: f64) -> f64 {
        (self.slope * angle_in_radians + self.intercept)
            .clamp(self.lower_pwm_bound, self.upper_pwm_bound)
    }

    /// Creates a new calculator from two calibration points.
    ///
    /// A servo that turns against the direction of the joint is calibrated
    /// with a maximum PWM value that is smaller than the minimum PWM value.
    /// The two calibration angles are assumed to be different.
    ///
    /// ## Parameters
    ///
    /// * 'minimum_pwm' - The PWM value at which the servo holds the minimum
    ///   angle.
    /// * 'maximum_pwm' - The PWM value at which the servo holds the maximum
    ///   angle.
    /// * 'minimum_angle_in_degrees' - The mechanical angle at the first
    ///   calibration point, in degrees.
    /// * 'maximum_angle_in_degrees' - The mechanical angle at the second
    ///   calibration point, in degrees.
    pub fn new(
        minimum_pwm: f64,
        maximum_pwm: f64,
        minimum_angle_in_degrees: f64,
        maximum_angle_in_degrees: f64,
    ) -> Self {
        let minimum_angle_in_radians = minimum_angle_in_degrees.to_radians();
        let maximum_angle_in_radians = maximum_angle_in_degrees.to_radians();

        let slope =
            (maximum_pwm - minimum_pwm) / (maximum_angle_in_radians - minimum_angle_in_radians);
        let intercept = minimum_pwm - minimum_angle_in_radians * slope;

        Self {
            slope,
            intercept,
            lower_pwm_bound: minimum_pwm.min(maximum_pwm),
            upper_pwm_bound: minimum_pwm.max(maximum_pwm),
        }
    }
}

/// Maps the joints of an arm to the servo calculators that drive them.
///
/// The kinematic chain itself does not know about actuators. Applications
/// that drive a physical arm assign a [ServoAngleToPwmCalculator] to each
/// actuated joint and ask the map for the PWM value that matches the current
/// angle of a joint.
///
/// ## Examples
///
/// ```
/// use serial_arm_descriptors::geometry::Pose;
/// use serial_arm_descriptors::hardware::servo::{JointServoMap, ServoAngleToPwmCalculator};
/// use serial_arm_descriptors::model_elements::arm::ArmKinematics;
/// use serial_arm_descriptors::model_elements::chain_elements::{Frame, RotationAxis};
///
/// let mut arm = ArmKinematics::new(Frame::new("arm-base-plate".to_string()), Pose::identity());
/// let shoulder = arm
///     .add_joint("shoulder".to_string(), RotationAxis::Z, 0.0, 0.0, 0.0)
///     .unwrap();
/// arm.set_joint_angle(&shoulder, 45.0_f64.to_radians()).unwrap();
///
/// let mut servos = JointServoMap::new();
/// servos.assign(shoulder, ServoAngleToPwmCalculator::new(218.0, 560.0, -75.0, 45.0));
///
/// let pwm = servos.get_pwm_value_for_joint(&arm, &shoulder).unwrap();
/// assert!((pwm - 560.0).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct JointServoMap {
    /// The calculator for each driven joint.
    servos: HashMap<SegmentID, ServoAngleToPwmCalculator>,
}

impl JointServoMap {
    /// Assigns a servo calculator to the joint with the given ID, replacing
    /// any calculator that was assigned before.
    ///
    /// ## Parameters
    ///
    /// * 'id' - The ID of the joint segment.
    /// * 'calculator' - The calculator for the servo that drives the joint.
    pub fn assign(&mut self, id: SegmentID, calculator: ServoAngleToPwmCalculator) {
        self.servos.insert(id, calculator);
    }

    /// Returns the PWM value that holds the servo of the given joint at the
    /// current angle of that joint.
    ///
    /// ## Parameters
    ///
    /// * 'arm' - The kinematic chain that owns the joint.
    /// * 'id' - The ID of the joint segment.
    ///
    /// ## Errors
    ///
    /// * [Error::NoServoForSegment] - Returned when no servo has been
    ///   assigned to the segment.
    /// * [Error::UnknownSegment] - Returned when the chain has no segment
    ///   with the given ID.
    /// * [Error::SegmentIsNotAJoint] - Returned when the segment is a link.
    pub fn get_pwm_value_for_joint(
        &self,
        arm: &ArmKinematics,
        id: &SegmentID,
    ) -> Result<f64, Error> {
        let calculator = match self.servos.get(id) {
            Some(calculator) => calculator,
            None => return Err(Error::NoServoForSegment { id: *id }),
        };

        let angle = arm.get_joint_angle(id)?;
        Ok(calculator.get_pwm_value(angle))
    }

    /// Returns a value indicating whether a servo calculator has been
    /// assigned to the segment with the given ID.
    pub fn has_servo_for(&self, id: &SegmentID) -> bool {
        self.servos.contains_key(id)
    }

    /// Creates a new, empty map.
    pub fn new() -> Self {
        Self {
            servos: HashMap::new(),
        }
    }

    /// Returns the number of joints that have a servo calculator assigned.
    pub fn number_of_servos(&self) -> usize {
        self.servos.len()
    }
}

impl Default for JointServoMap {
    fn default() -> Self {
        Self::new()
    }
}
