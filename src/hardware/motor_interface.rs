//! Defines the interface for servo motor descriptions

/// Defines the calibration of a hobby servo motor that drives a joint.
///
/// The calibration consists of two measured points, each pairing a mechanical
/// angle with the PWM value at which the servo holds that angle. The two
/// points are assumed to lie on the linear part of the servo response. A
/// servo that turns in the opposite direction of the joint is described by a
/// maximum PWM value that is smaller than the minimum PWM value.
pub trait ServoMotorDescriptor {
    /// Returns the mechanical angle, in degrees, at the second calibration
    /// point.
    fn maximum_angle_in_degrees(&self) -> f64;

    /// Returns the PWM value at which the servo holds the maximum angle.
    fn maximum_pwm(&self) -> f64;

    /// Returns the mechanical angle, in degrees, at the first calibration
    /// point.
    fn minimum_angle_in_degrees(&self) -> f64;

    /// Returns the PWM value at which the servo holds the minimum angle.
    fn minimum_pwm(&self) -> f64;
}
