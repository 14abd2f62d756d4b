//! Defines the geometric primitives used to describe the pose of arm segments.
//!
//! A pose combines a translation and a rotation, both expressed relative to a
//! parent frame. Poses compose: walking a kinematic chain is a repeated
//! [Pose::compound] of the poses of the individual chain elements, each one
//! expressed in the frame of the element before it.

extern crate nalgebra as na;

use std::fmt::Display;

use na::{Isometry3, Matrix4, Translation3, Unit, UnitQuaternion, Vector3};

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod geometry_tests;

/// Defines the position and orientation of an element relative to a parent
/// frame.
///
/// The coordinate system is cartesian and right-handed. Orientations are
/// stored as unit quaternions; the roll, pitch and yaw angles accepted by the
/// constructors are applied about the X, Y and Z axes of the parent frame
/// respectively.
#[derive(Clone, Debug, PartialEq)]
pub struct Pose {
    /// The position of the pose origin relative to the parent frame.
    position: Translation3<f64>,

    /// The orientation of the pose relative to the parent frame.
    orientation: UnitQuaternion<f64>,
}

impl Pose {
    /// Returns the pose that is reached by applying `other` in the local
    /// frame of the current pose.
    ///
    /// The resulting translation is the current translation plus the rotated
    /// translation of `other`. The resulting rotation is the product of both
    /// rotations. Compounding with the identity pose, on either side, returns
    /// an equal pose.
    ///
    /// ## Parameters
    ///
    /// * 'other' - The pose to apply in the local frame of the current pose.
    ///
    /// ## Examples
    ///
    /// ```
    /// use std::f64::consts::FRAC_PI_2;
    /// use serial_arm_descriptors::geometry::Pose;
    ///
    /// // A quarter turn followed by a reach along the local X-axis ends up
    /// // on the Y-axis of the parent frame.
    /// let turn = Pose::new(0.0, 0.0, 0.0, 0.0, 0.0, FRAC_PI_2);
    /// let reach = Pose::new(5.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    ///
    /// let combined = turn.compound(&reach);
    /// assert!((combined.position().vector.x - 0.0).abs() < 1e-9);
    /// assert!((combined.position().vector.y - 5.0).abs() < 1e-9);
    /// ```
    pub fn compound(&self, other: &Pose) -> Pose {
        Pose {
            position: Translation3::from(
                self.position.vector + self.orientation * other.position.vector,
            ),
            orientation: self.orientation * other.orientation,
        }
    }

    /// Creates a new pose that rotates by the given angle around the given
    /// axis, without translation.
    ///
    /// ## Parameters
    ///
    /// * 'axis' - The unit vector, in the parent frame, to rotate around.
    /// * 'angle_in_radians' - The rotation angle in radians.
    pub fn from_axis_angle(axis: &Unit<Vector3<f64>>, angle_in_radians: f64) -> Pose {
        Pose {
            position: Translation3::identity(),
            orientation: UnitQuaternion::from_axis_angle(axis, angle_in_radians),
        }
    }

    /// Creates a new pose from a translation and an orientation.
    ///
    /// ## Parameters
    ///
    /// * 'position' - The position of the pose origin relative to the parent frame.
    /// * 'orientation' - The orientation of the pose relative to the parent frame.
    pub fn from_parts(position: Translation3<f64>, orientation: UnitQuaternion<f64>) -> Pose {
        Pose {
            position,
            orientation,
        }
    }

    /// Returns the pose with zero translation and zero rotation.
    pub fn identity() -> Pose {
        Pose {
            position: Translation3::identity(),
            orientation: UnitQuaternion::identity(),
        }
    }

    /// Returns the pose that undoes the current pose, such that compounding
    /// the current pose with its inverse returns the identity pose.
    ///
    /// ## Examples
    ///
    /// ```
    /// use serial_arm_descriptors::geometry::Pose;
    ///
    /// let pose = Pose::new(1.0, -2.0, 3.0, 0.3, -0.2, 0.1);
    /// let round_trip = pose.compound(&pose.inverse());
    ///
    /// assert!(round_trip.position().vector.norm() < 1e-9);
    /// assert!(round_trip.orientation().angle() < 1e-9);
    /// ```
    pub fn inverse(&self) -> Pose {
        let inverse_orientation = self.orientation.inverse();
        Pose {
            position: Translation3::from(inverse_orientation * (-self.position.vector)),
            orientation: inverse_orientation,
        }
    }

    /// Creates a new pose from a translation and a set of Euler angles.
    ///
    /// ## Parameters
    ///
    /// * 'x' - The translation along the X-axis of the parent frame.
    /// * 'y' - The translation along the Y-axis of the parent frame.
    /// * 'z' - The translation along the Z-axis of the parent frame.
    /// * 'roll' - The rotation around the X-axis of the parent frame, in radians.
    /// * 'pitch' - The rotation around the Y-axis of the parent frame, in radians.
    /// * 'yaw' - The rotation around the Z-axis of the parent frame, in radians.
    pub fn new(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Pose {
        Pose {
            position: Translation3::new(x, y, z),
            orientation: UnitQuaternion::from_euler_angles(roll, pitch, yaw),
        }
    }

    /// Returns the orientation of the pose relative to the parent frame.
    pub fn orientation(&self) -> &UnitQuaternion<f64> {
        &self.orientation
    }

    /// Returns the position of the pose origin relative to the parent frame.
    pub fn position(&self) -> &Translation3<f64> {
        &self.position
    }

    /// Returns the homogeneous transform matrix for the pose.
    ///
    /// The matrix is the 4x4 matrix with the rotation matrix and the
    /// translation column on top and [0 0 0 1] as the bottom row.
    pub fn to_homogeneous(&self) -> Matrix4<f64> {
        self.to_isometry().to_homogeneous()
    }

    /// Returns the pose as an isometry, for use with the linear algebra
    /// routines that operate on transforms.
    pub fn to_isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(self.position, self.orientation)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Display for Pose {
    #[cfg_attr(test, mutants::skip)] // Diagnostic formatting, not verified by the tests
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (roll, pitch, yaw) = self.orientation.euler_angles();
        write!(
            f,
            "Pose [x: {}, y: {}, z: {}, roll: {}, pitch: {}, yaw: {}]",
            self.position.vector.x, self.position.vector.y, self.position.vector.z, roll, pitch, yaw
        )
    }
}
