//! Defines the value spaces in which joint positions live and how these spaces
//! behave at their boundaries.
//!
//! The chain accepts any finite value for a joint angle, so the stored joint
//! value lives in an unbounded space that runs from -infinity to +infinity and
//! never wraps around. A physical revolute joint on the other hand moves on a
//! circle: two angles that differ by a full turn describe the same
//! configuration, and the shortest way from one angle to another may cross the
//! boundary of the range. The wrapped space is used when reporting normalized
//! angles and when deciding the shortest rotation between two joint values.
//!
//! The [to_joint_space()] function is used to create either of these spaces.
//! For the revolute space the starting angle of the range is given by creating
//! the [JointSpaceType::Revolute] value with the desired start angle. The
//! revolute space is always 2 * [Pi](core::f64::consts::PI) in size.

use std::f64::consts::PI;

#[cfg(test)]
#[path = "joint_space_tests.rs"]
mod joint_space_tests;

/// Defines the different kinds of joint value spaces available.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JointSpaceType {
    /// Indicates that the joint value space is a linear space where values
    /// sequentially increase from -infinity to +infinity.
    Unbounded,

    /// Indicates that the joint value space is a circular space where values
    /// sequentially increase from the start angle to the start angle + 2 PI
    /// and then wrap around.
    Revolute {
        /// The starting angle of the range, in radians.
        start_angle_in_radians: f64,
    },
}

/// Defines an abstraction over joint value spaces.
pub trait JointValueSpace {
    /// Returns the value in the space that describes the same joint
    /// configuration as the given angle.
    ///
    /// For an unbounded space the angle is returned unchanged. For a revolute
    /// space the angle is brought into the half-open range
    /// `[start, start + 2 PI)`.
    ///
    /// ## Parameters
    ///
    /// * 'angle_in_radians' - The angle that should be normalized.
    ///
    /// ## Examples
    ///
    /// ```
    /// use core::f64::consts::PI;
    /// use serial_arm_descriptors::joint_space::{ JointSpaceType, to_joint_space };
    ///
    /// // Create an unbounded space
    /// let space = to_joint_space(JointSpaceType::Unbounded);
    /// assert_eq!(space.normalize_angle(5.0 * PI), 5.0 * PI);
    ///
    /// // Create a revolute space that runs from -PI to PI
    /// let space = to_joint_space(JointSpaceType::Revolute { start_angle_in_radians: -PI });
    /// let wrapped = space.normalize_angle(2.5 * PI);
    /// assert!((wrapped - 0.5 * PI).abs() < 1e-9);
    /// ```
    fn normalize_angle(&self, angle_in_radians: f64) -> f64;

    /// Returns the signed rotation with the smallest magnitude that moves a
    /// joint from the start angle to the end angle.
    ///
    /// For an unbounded space this is the plain difference between the two
    /// angles. For a revolute space the rotation across the range boundary may
    /// be shorter than the rotation through the range.
    ///
    /// ## Parameters
    ///
    /// * 'start_angle_in_radians' - The angle the joint starts at.
    /// * 'end_angle_in_radians' - The angle the joint should end at.
    ///
    /// ## Examples
    ///
    /// ```
    /// use core::f64::consts::PI;
    /// use serial_arm_descriptors::joint_space::{ JointSpaceType, to_joint_space };
    ///
    /// // Create an unbounded space
    /// let space = to_joint_space(JointSpaceType::Unbounded);
    /// assert_eq!(space.shortest_angular_distance(1.0, 3.0), 2.0);
    ///
    /// // Create a revolute space that runs from 0.0 to 2 * PI
    /// let space = to_joint_space(JointSpaceType::Revolute { start_angle_in_radians: 0.0 });
    /// let distance = space.shortest_angular_distance(0.0, 1.5 * PI);
    /// assert!((distance + 0.5 * PI).abs() < 1e-9);
    /// ```
    fn shortest_angular_distance(
        &self,
        start_angle_in_radians: f64,
        end_angle_in_radians: f64,
    ) -> f64;
}

/// Defines a linear unbounded joint value space with no boundaries.
///
/// The unbounded space is what the chain stores natively: any finite angle is
/// a valid joint value and no two distinct values are considered equal.
pub(crate) struct UnboundedAngleSpace {}

impl UnboundedAngleSpace {
    pub fn new() -> UnboundedAngleSpace {
        UnboundedAngleSpace {}
    }
}

impl JointValueSpace for UnboundedAngleSpace {
    fn normalize_angle(&self, angle_in_radians: f64) -> f64 {
        angle_in_radians
    }

    fn shortest_angular_distance(
        &self,
        start_angle_in_radians: f64,
        end_angle_in_radians: f64,
    ) -> f64 {
        end_angle_in_radians - start_angle_in_radians
    }
}

/// Defines a circular joint value space that wraps around after a full turn.
///
/// The wrapped space is used for calculations on revolute joints where angles
/// a full turn apart describe the same physical configuration.
pub(crate) struct WrappedAngleSpace {
    range_start_in_radians: f64,
    range_size: f64,
}

impl WrappedAngleSpace {
    pub fn new_with_two_pi_range(start_angle_in_radians: f64) -> WrappedAngleSpace {
        WrappedAngleSpace {
            range_start_in_radians: start_angle_in_radians,
            range_size: 2.0 * PI,
        }
    }
}

impl JointValueSpace for WrappedAngleSpace {
    fn normalize_angle(&self, angle_in_radians: f64) -> f64 {
        let offset = angle_in_radians - self.range_start_in_radians;

        let mut wrapped = offset.rem_euclid(self.range_size);

        // rem_euclid of a tiny negative offset can round up to the full range size
        if wrapped >= self.range_size {
            wrapped -= self.range_size;
        }

        self.range_start_in_radians + wrapped
    }

    fn shortest_angular_distance(
        &self,
        start_angle_in_radians: f64,
        end_angle_in_radians: f64,
    ) -> f64 {
        let difference =
            (end_angle_in_radians - start_angle_in_radians).rem_euclid(self.range_size);

        if difference > 0.5 * self.range_size {
            difference - self.range_size
        } else {
            difference
        }
    }
}

/// Returns a [JointValueSpace] instance for the given joint space type.
///
/// ```
/// use core::f64::consts::PI;
/// use serial_arm_descriptors::joint_space::{ JointSpaceType, to_joint_space };
///
/// // Create an unbounded space
/// let space = to_joint_space(JointSpaceType::Unbounded);
/// assert_eq!(space.normalize_angle(-7.0), -7.0);
///
/// // Create a revolute space that runs from -PI to PI
/// let space = to_joint_space(JointSpaceType::Revolute { start_angle_in_radians: -PI });
/// let wrapped = space.normalize_angle(3.5 * PI);
/// assert!((wrapped + 0.5 * PI).abs() < 1e-9);
/// ```
pub fn to_joint_space(joint_space_type: JointSpaceType) -> Box<dyn JointValueSpace> {
    match joint_space_type {
        JointSpaceType::Unbounded => Box::new(UnboundedAngleSpace::new()),
        JointSpaceType::Revolute {
            start_angle_in_radians,
        } => Box::new(WrappedAngleSpace::new_with_two_pi_range(
            start_angle_in_radians,
        )),
    }
}
