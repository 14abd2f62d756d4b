//! Defines the interface for inverse kinematics strategies

use crate::{geometry::Pose, model_elements::arm::ArmKinematics, Error};

/// Defines the interface for strategies that determine the joint angles that
/// bring the end effector of an arm to a requested pose.
///
/// A strategy receives the chain it operates on as part of the call; the
/// chain is never shared through global state. Implementations discover the
/// layout of the chain through the chain accessors and write the angles they
/// determine back with [ArmKinematics::set_joint_angle]. They should not
/// assume anything about the chain beyond what those accessors expose.
pub trait InverseKinematics {
    /// Determines the joint angles that bring the end effector of the given
    /// arm to the target pose, and stores those angles on the joints of the
    /// arm.
    ///
    /// When the target cannot be reached exactly the strategy either leaves
    /// the chain on the best achievable approximation or leaves it
    /// unchanged; it never leaves the chain in a partially updated state
    /// without reporting an error.
    ///
    /// ## Parameters
    ///
    /// * 'arm' - The kinematic chain to pose.
    /// * 'target' - The pose the end effector should reach, relative to the
    ///   frame of the chain.
    ///
    /// Returns an [Error::InverseKinematicsFailed] error if the strategy
    /// cannot determine a usable set of joint angles.
    fn determine(&self, arm: &mut ArmKinematics, target: &Pose) -> Result<(), Error>;
}
