#![warn(missing_docs)]

//! Kinematic model definition for a serial-link robot arm.
//!
//! Provides abstraction of the arm geometry, an ordered chain of rigid links
//! and rotational joints, aimed at calculating the pose of the end effector
//! or of any other segment of the chain for purposes of control.

use thiserror::Error;

use crate::model_elements::chain_elements::SegmentID;

/// Defines the geometric primitives used to describe an arm
pub mod geometry;

/// Provides types for translating joint angles into actuator commands
pub mod hardware;

/// Defines the interface for inverse kinematics strategies
pub mod inverse_kinematics;

/// Defines different joint value spaces
pub mod joint_space;

/// Defines the elements that are used to create an arm model
pub mod model_elements;

/// Defines the different errors for the arm model crate.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Indicates that no segments can be added to a chain because the chain
    /// layout was frozen by the first pose query.
    #[error("The chain poses have been computed so the chain no longer accepts new segments. Segment with name {name} was not added.")]
    ChainIsFrozen {
        /// The name of the segment that was rejected.
        name: String,
    },

    /// Indicates that the inverse kinematics strategy could not determine
    /// joint angles for the requested position.
    #[error("The inverse kinematics strategy failed to determine the joint angles. {reason}")]
    InverseKinematicsFailed {
        /// The reason the strategy gave up.
        reason: String,
    },

    /// Indicates that a position was requested before an inverse kinematics
    /// strategy was provided.
    #[error("No inverse kinematics strategy has been set for the chain.")]
    InverseKinematicsNotSet,

    /// Indicates that no servo calculator was assigned to the given segment.
    #[error("There is no servo calculator assigned to the segment with ID {id}.")]
    NoServoForSegment {
        /// The ID of the segment without a servo calculator.
        id: SegmentID,
    },

    /// Indicates that the segment with the given ID is a link and cannot be
    /// used where a joint is required.
    #[error("The segment with ID {id} is not a joint.")]
    SegmentIsNotAJoint {
        /// The ID of the segment that was expected to be a joint.
        id: SegmentID,
    },

    /// Indicates that the segment with the given ID is a joint and cannot be
    /// used where a link is required.
    #[error("The segment with ID {id} is not a link.")]
    SegmentIsNotALink {
        /// The ID of the segment that was expected to be a link.
        id: SegmentID,
    },

    /// Indicates that the chain does not contain a segment with the given ID.
    #[error("The chain does not contain a segment with ID {id}.")]
    UnknownSegment {
        /// The ID for which no segment exists.
        id: SegmentID,
    },
}
