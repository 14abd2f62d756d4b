//! Defines the different chain elements that are used to create an arm model

extern crate nalgebra as na;

use std::{
    fmt::Display,
    sync::atomic::{AtomicUsize, Ordering},
};

use na::{Unit, Vector3};

use crate::geometry::Pose;

#[cfg(test)]
#[path = "chain_elements_tests.rs"]
mod chain_elements_tests;

/// Defines the axis around which a joint rotates, relative to the mounting
/// pose of the joint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RotationAxis {
    /// The joint rotates around the X-axis of the joint mounting pose.
    X,
    /// The joint rotates around the Y-axis of the joint mounting pose.
    Y,
    /// The joint rotates around the Z-axis of the joint mounting pose.
    Z,
}

impl RotationAxis {
    /// Returns the unit vector for the axis.
    pub fn unit_vector(&self) -> Unit<Vector3<f64>> {
        match self {
            RotationAxis::X => Vector3::x_axis(),
            RotationAxis::Y => Vector3::y_axis(),
            RotationAxis::Z => Vector3::z_axis(),
        }
    }
}

/// Atomic counter for SegmentID instances
static SEGMENT_ID_COUNTER: AtomicUsize = AtomicUsize::new(1);

/// Defines a unique ID for the segments of a kinematic chain.
///
/// Segment IDs compare by identity only: two segments with equal names are
/// still different segments.
///
/// - Can be cloned safely
/// - Can be created safely across many threads
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SegmentID {
    /// The internal value that forms the actual ID. This is set in a
    /// thread-safe manner
    // Based on this StackOverflow answer: https://stackoverflow.com/a/32936288/539846
    id: usize,
}

impl SegmentID {
    /// Create a new ID in a thread safe manner.
    pub fn new() -> Self {
        Self {
            id: SEGMENT_ID_COUNTER.fetch_add(1, Ordering::SeqCst),
        }
    }
}

impl Default for SegmentID {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SegmentID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SegmentID [{}]", self.id)
    }
}

impl AsRef<SegmentID> for SegmentID {
    fn as_ref(&self) -> &SegmentID {
        self
    }
}

/// Defines the reference frame in which the poses of a kinematic chain are
/// expressed.
///
/// The frame is an opaque tag. The chain records which frame it was created
/// in and hands the frame back on request; nothing about the coordinate
/// system is derived from it.
pub struct Frame {
    /// The human readable name for the frame.
    name: String,
}

impl Frame {
    /// Returns the name of the frame.
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// Creates a new Frame.
    ///
    /// ## Parameters
    ///
    /// * 'name' - The name of the frame
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

impl Display for Frame {
    #[cfg_attr(test, mutants::skip)] // Diagnostic formatting, not verified by the tests
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Frame [{}]", self.name)
    }
}

/// Defines a rigid segment of a kinematic chain.
///
/// A link contributes a fixed pose to the chain: the pose of the far end of
/// the link relative to the chain element that comes before it.
#[derive(Debug)]
pub struct Link {
    /// The human readable name for the element.
    name: String,

    /// The pose of the far end of the link relative to the previous chain
    /// element.
    pose: Pose,
}

impl Link {
    /// Returns the name of the element.
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// Creates a new Link with the given fixed pose.
    ///
    /// ## Parameters
    ///
    /// * 'name' - The name of the element
    /// * 'pose' - The pose of the far end of the link relative to the previous
    ///   chain element
    pub(crate) fn new(name: String, pose: Pose) -> Self {
        Self { name, pose }
    }

    /// Returns the fixed pose of the link.
    pub fn pose(&self) -> &Pose {
        &self.pose
    }
}

/// Defines an articulated segment of a kinematic chain.
///
/// A joint contributes a pose that depends on its current angle: the fixed
/// mounting offset composed with the rotation of the current angle around
/// the rotation axis. The rotation is recomputed from the angle at
/// evaluation time, so changing the angle changes the pose of every chain
/// element that comes after the joint.
#[derive(Debug)]
pub struct Joint {
    /// The human readable name for the element.
    name: String,

    /// The fixed mounting offset of the joint relative to the previous chain
    /// element.
    mount: Pose,

    /// The axis around which the joint rotates, relative to the mounting
    /// offset.
    axis: RotationAxis,

    /// The current angle of the joint in radians. The chain places no
    /// structural limit on the range of the angle.
    angle_in_radians: f64,
}

impl Joint {
    /// Returns the current angle of the joint in radians.
    pub fn angle_in_radians(&self) -> f64 {
        self.angle_in_radians
    }

    /// Returns the axis around which the joint rotates.
    pub fn axis(&self) -> RotationAxis {
        self.axis
    }

    /// Returns the pose that the joint contributes to the chain at its
    /// current angle, being the mounting offset composed with the rotation
    /// of the current angle around the rotation axis.
    pub fn effective_pose(&self) -> Pose {
        self.mount.compound(&Pose::from_axis_angle(
            &self.axis.unit_vector(),
            self.angle_in_radians,
        ))
    }

    /// Returns the fixed mounting offset of the joint.
    pub fn mount_pose(&self) -> &Pose {
        &self.mount
    }

    /// Returns the name of the element.
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// Creates a new Joint with an angle of zero radians.
    ///
    /// ## Parameters
    ///
    /// * 'name' - The name of the element
    /// * 'axis' - The axis around which the joint rotates
    /// * 'mount' - The fixed mounting offset of the joint relative to the
    ///   previous chain element
    pub(crate) fn new(name: String, axis: RotationAxis, mount: Pose) -> Self {
        Self {
            name,
            mount,
            axis,
            angle_in_radians: 0.0,
        }
    }

    /// Sets the current angle of the joint.
    ///
    /// ## Parameters
    ///
    /// * 'angle_in_radians' - The new angle of the joint in radians
    pub(crate) fn set_angle_in_radians(&mut self, angle_in_radians: f64) {
        self.angle_in_radians = angle_in_radians;
    }
}

/// Defines a single element of a kinematic chain, either a rigid link or an
/// articulated joint.
pub enum ChainElement {
    /// The element is a rigid link that contributes a fixed pose.
    Link(Link),
    /// The element is a joint that contributes an angle dependent pose.
    Joint(Joint),
}

impl ChainElement {
    /// Returns the pose that the element contributes to the chain at
    /// evaluation time.
    pub fn effective_pose(&self) -> Pose {
        match self {
            ChainElement::Link(link) => link.pose().clone(),
            ChainElement::Joint(joint) => joint.effective_pose(),
        }
    }

    /// Returns a value indicating whether the element is a joint.
    pub fn is_joint(&self) -> bool {
        matches!(self, ChainElement::Joint(_))
    }

    /// Returns the name of the element.
    pub fn name(&self) -> &str {
        match self {
            ChainElement::Link(link) => link.name(),
            ChainElement::Joint(joint) => joint.name(),
        }
    }
}
