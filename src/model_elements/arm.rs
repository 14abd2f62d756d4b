//! Defines the kinematic chain for a serial arm.

use std::{cell::Cell, collections::HashMap, f64::consts::PI};

use crate::{
    geometry::Pose,
    inverse_kinematics::InverseKinematics,
    joint_space::{to_joint_space, JointSpaceType, JointValueSpace},
    model_elements::chain_elements::{ChainElement, Frame, Joint, Link, RotationAxis, SegmentID},
    Error,
};

#[cfg(test)]
#[path = "arm_tests.rs"]
mod arm_tests;

/// Stores a single chain element together with the ID under which it was
/// registered.
struct ChainEntry {
    /// The ID that was handed out when the element was added.
    id: SegmentID,

    /// The element itself.
    element: ChainElement,
}

/// Defines the kinematic chain of a serial arm, an ordered sequence of rigid
/// links and rotational joints.
///
/// Elements are added in kinematic order, from the element closest to the
/// mounting point of the arm to the element closest to the end effector. The
/// chain creates and owns all of its elements; callers address them through
/// the [SegmentID] handles that the add operations return. The pose of a
/// segment is found by compounding, starting from the identity pose, the
/// poses of all elements from the start of the chain up to and including the
/// segment.
///
/// ## Notes
///
/// * The first pose query fixes the chain layout. After that the add
///   operations are rejected; joint angles can still be changed at any time.
/// * Element names are labels only. Several elements may carry the same name
///   without their handles ever becoming interchangeable.
///
/// ## Examples
///
/// ```
/// use std::f64::consts::FRAC_PI_2;
/// use serial_arm_descriptors::geometry::Pose;
/// use serial_arm_descriptors::model_elements::arm::ArmKinematics;
/// use serial_arm_descriptors::model_elements::chain_elements::{Frame, RotationAxis};
///
/// let mut arm = ArmKinematics::new(Frame::new("arm-base-plate".to_string()), Pose::identity());
///
/// let base = arm
///     .add_link("base".to_string(), 0.0, 0.0, 10.0, 0.0, 0.0, 0.0)
///     .unwrap();
/// let shoulder = arm
///     .add_joint("shoulder".to_string(), RotationAxis::Z, 0.0, 0.0, 0.0)
///     .unwrap();
/// let upper_arm = arm
///     .add_link("upper-arm".to_string(), 5.0, 0.0, 0.0, 0.0, 0.0, 0.0)
///     .unwrap();
///
/// arm.set_joint_angle(&shoulder, FRAC_PI_2).unwrap();
///
/// let pose = arm.get_end_effector_pose();
/// assert!((pose.position().vector.x - 0.0).abs() < 1e-9);
/// assert!((pose.position().vector.y - 5.0).abs() < 1e-9);
/// assert!((pose.position().vector.z - 10.0).abs() < 1e-9);
/// ```
pub struct ArmKinematics {
    /// The reference frame in which the poses of the chain are expressed.
    frame: Frame,

    /// The pose of the mounting point of the arm in the reference frame.
    /// Recorded for the embedding application; the pose composition itself
    /// starts from the identity pose.
    base: Pose,

    /// The chain elements in kinematic order.
    elements: Vec<ChainEntry>,

    /// Maps a segment ID to the position of its element in the chain.
    index_for_segment: HashMap<SegmentID, usize>,

    /// Whether the chain layout has been fixed by a pose query. The latch
    /// only ever moves from `false` to `true`.
    is_frozen: Cell<bool>,

    /// The strategy that determines joint angles for a requested end
    /// effector pose, if one has been provided.
    inverse_kinematics: Option<Box<dyn InverseKinematics>>,

    /// The value space used to wrap joint angles onto a single turn when a
    /// normalized angle is requested.
    revolute_space: Box<dyn JointValueSpace>,
}

impl ArmKinematics {
    /// Adds a joint to the end of the chain and returns the ID under which
    /// the joint can be addressed.
    ///
    /// The joint starts at an angle of zero radians. The mounting offset of
    /// the joint carries no translation; a translation between a joint and
    /// the previous element is modelled with a link before the joint.
    ///
    /// ## Parameters
    ///
    /// * 'name' - The name of the joint. Names are labels only and do not
    ///   have to be unique.
    /// * 'axis' - The axis around which the joint rotates.
    /// * 'roll' - The rotation of the mounting offset around the X-axis of
    ///   the previous element, in radians.
    /// * 'pitch' - The rotation of the mounting offset around the Y-axis of
    ///   the previous element, in radians.
    /// * 'yaw' - The rotation of the mounting offset around the Z-axis of
    ///   the previous element, in radians.
    ///
    /// ## Errors
    ///
    /// * [Error::ChainIsFrozen] - Returned when a pose query has already
    ///   fixed the chain layout.
    pub fn add_joint(
        &mut self,
        name: String,
        axis: RotationAxis,
        roll: f64,
        pitch: f64,
        yaw: f64,
    ) -> Result<SegmentID, Error> {
        if self.is_frozen.get() {
            return Err(Error::ChainIsFrozen { name });
        }

        let mount = Pose::new(0.0, 0.0, 0.0, roll, pitch, yaw);
        Ok(self.append(ChainElement::Joint(Joint::new(name, axis, mount))))
    }

    /// Adds a rigid link to the end of the chain and returns the ID under
    /// which the link can be addressed.
    ///
    /// ## Parameters
    ///
    /// * 'name' - The name of the link. Names are labels only and do not
    ///   have to be unique.
    /// * 'x' - The translation of the link along the X-axis of the previous
    ///   element.
    /// * 'y' - The translation of the link along the Y-axis of the previous
    ///   element.
    /// * 'z' - The translation of the link along the Z-axis of the previous
    ///   element.
    /// * 'roll' - The rotation of the link around the X-axis of the previous
    ///   element, in radians.
    /// * 'pitch' - The rotation of the link around the Y-axis of the
    ///   previous element, in radians.
    /// * 'yaw' - The rotation of the link around the Z-axis of the previous
    ///   element, in radians.
    ///
    /// ## Errors
    ///
    /// * [Error::ChainIsFrozen] - Returned when a pose query has already
    ///   fixed the chain layout.
    #[allow(clippy::too_many_arguments)]
    pub fn add_link(
        &mut self,
        name: String,
        x: f64,
        y: f64,
        z: f64,
        roll: f64,
        pitch: f64,
        yaw: f64,
    ) -> Result<SegmentID, Error> {
        if self.is_frozen.get() {
            return Err(Error::ChainIsFrozen { name });
        }

        let pose = Pose::new(x, y, z, roll, pitch, yaw);
        Ok(self.append(ChainElement::Link(Link::new(name, pose))))
    }

    /// Stores the given element at the end of the chain under a fresh ID.
    fn append(&mut self, element: ChainElement) -> SegmentID {
        let id = SegmentID::new();
        self.index_for_segment.insert(id, self.elements.len());
        self.elements.push(ChainEntry { id, element });

        id
    }

    /// Compounds the effective poses of the chain elements, starting from
    /// the identity pose, up to and including the element at the given
    /// index, or over the whole chain if no index is given.
    fn fold_pose(&self, up_to_index: Option<usize>) -> Pose {
        // The first pose computation fixes the chain layout
        self.is_frozen.set(true);

        let end = match up_to_index {
            Some(index) => index + 1,
            None => self.elements.len(),
        };

        self.elements[..end]
            .iter()
            .fold(Pose::identity(), |pose, entry| {
                pose.compound(&entry.element.effective_pose())
            })
    }

    /// Returns the pose of the mounting point of the arm in the reference
    /// frame of the chain.
    pub fn get_base_pose(&self) -> &Pose {
        &self.base
    }

    /// Returns the chain element that is registered under the given ID.
    ///
    /// ## Parameters
    ///
    /// * 'id' - The ID of the segment.
    ///
    /// ## Errors
    ///
    /// * [Error::UnknownSegment] - Returned when no element is registered
    ///   under the given ID.
    pub fn get_element(&self, id: &SegmentID) -> Result<&ChainElement, Error> {
        let index = self.index_of(id)?;
        Ok(&self.elements[index].element)
    }

    /// Returns the pose of the end effector, the far end of the last chain
    /// element, in the reference frame of the chain.
    ///
    /// For a chain without elements this is the identity pose. The query
    /// fixes the chain layout.
    pub fn get_end_effector_pose(&self) -> Pose {
        self.fold_pose(None)
    }

    /// Returns the reference frame in which the poses of the chain are
    /// expressed.
    pub fn get_frame(&self) -> &Frame {
        &self.frame
    }

    /// Returns the joint that is registered under the given ID.
    ///
    /// The returned joint is read-only; angle changes go through
    /// [ArmKinematics::set_joint_angle].
    ///
    /// ## Parameters
    ///
    /// * 'id' - The ID of the segment.
    ///
    /// ## Errors
    ///
    /// * [Error::UnknownSegment] - Returned when no element is registered
    ///   under the given ID.
    /// * [Error::SegmentIsNotAJoint] - Returned when the element is a link.
    pub fn get_joint(&self, id: &SegmentID) -> Result<&Joint, Error> {
        match self.get_element(id)? {
            ChainElement::Joint(joint) => Ok(joint),
            ChainElement::Link(_) => Err(Error::SegmentIsNotAJoint { id: *id }),
        }
    }

    /// Returns the current angle of the joint that is registered under the
    /// given ID, in radians.
    ///
    /// The angle is the value most recently stored on the joint, whether it
    /// was set directly or computed by the inverse kinematics strategy.
    ///
    /// ## Parameters
    ///
    /// * 'id' - The ID of the segment.
    ///
    /// ## Errors
    ///
    /// * [Error::UnknownSegment] - Returned when no element is registered
    ///   under the given ID.
    /// * [Error::SegmentIsNotAJoint] - Returned when the element is a link.
    pub fn get_joint_angle(&self, id: &SegmentID) -> Result<f64, Error> {
        Ok(self.get_joint(id)?.angle_in_radians())
    }

    /// Returns the link that is registered under the given ID.
    ///
    /// ## Parameters
    ///
    /// * 'id' - The ID of the segment.
    ///
    /// ## Errors
    ///
    /// * [Error::UnknownSegment] - Returned when no element is registered
    ///   under the given ID.
    /// * [Error::SegmentIsNotALink] - Returned when the element is a joint.
    pub fn get_link(&self, id: &SegmentID) -> Result<&Link, Error> {
        match self.get_element(id)? {
            ChainElement::Link(link) => Ok(link),
            ChainElement::Joint(_) => Err(Error::SegmentIsNotALink { id: *id }),
        }
    }

    /// Returns the current angle of the joint that is registered under the
    /// given ID, wrapped onto the range [-PI, PI).
    ///
    /// The chain stores angles without a range limit; this accessor is for
    /// actuator layers that need a single-turn value. The stored angle is
    /// not changed.
    ///
    /// ## Parameters
    ///
    /// * 'id' - The ID of the segment.
    ///
    /// ## Errors
    ///
    /// * [Error::UnknownSegment] - Returned when no element is registered
    ///   under the given ID.
    /// * [Error::SegmentIsNotAJoint] - Returned when the element is a link.
    pub fn get_normalized_joint_angle(&self, id: &SegmentID) -> Result<f64, Error> {
        let angle = self.get_joint_angle(id)?;
        Ok(self.revolute_space.normalize_angle(angle))
    }

    /// Returns the name of the element that is registered under the given
    /// ID.
    ///
    /// ## Parameters
    ///
    /// * 'id' - The ID of the segment.
    ///
    /// ## Errors
    ///
    /// * [Error::UnknownSegment] - Returned when no element is registered
    ///   under the given ID.
    pub fn get_segment_name(&self, id: &SegmentID) -> Result<&str, Error> {
        Ok(self.get_element(id)?.name())
    }

    /// Returns the pose of the far end of the segment that is registered
    /// under the given ID, in the reference frame of the chain.
    ///
    /// The pose is found by compounding, starting from the identity pose,
    /// the effective poses of all elements from the start of the chain up to
    /// and including the segment. The query fixes the chain layout.
    ///
    /// ## Parameters
    ///
    /// * 'id' - The ID of the segment.
    ///
    /// ## Errors
    ///
    /// * [Error::UnknownSegment] - Returned when no element is registered
    ///   under the given ID.
    pub fn get_segment_pose(&self, id: &SegmentID) -> Result<Pose, Error> {
        let index = self.index_of(id)?;
        Ok(self.fold_pose(Some(index)))
    }

    /// Returns the IDs of all segments in kinematic order.
    pub fn get_segments(&self) -> Vec<SegmentID> {
        self.elements.iter().map(|entry| entry.id).collect()
    }

    /// Returns a value indicating whether the chain contains a segment with
    /// the given ID.
    pub fn has_segment(&self, id: &SegmentID) -> bool {
        self.index_for_segment.contains_key(id)
    }

    /// Returns the position of the segment in the chain for the given ID.
    fn index_of(&self, id: &SegmentID) -> Result<usize, Error> {
        match self.index_for_segment.get(id) {
            Some(index) => Ok(*index),
            None => Err(Error::UnknownSegment { id: *id }),
        }
    }

    /// Returns a value indicating whether the chain layout has been fixed by
    /// a pose query.
    pub fn is_frozen(&self) -> bool {
        self.is_frozen.get()
    }

    /// Returns a value indicating whether the segment with the given ID is a
    /// joint. Returns false if the chain has no segment with the given ID.
    pub fn is_joint(&self, id: &SegmentID) -> bool {
        match self.get_element(id) {
            Ok(element) => element.is_joint(),
            Err(_) => false,
        }
    }

    /// Returns a value indicating whether the segment with the given ID is a
    /// link. Returns false if the chain has no segment with the given ID.
    pub fn is_link(&self, id: &SegmentID) -> bool {
        match self.get_element(id) {
            Ok(element) => !element.is_joint(),
            Err(_) => false,
        }
    }

    /// Returns the joint that is registered under the given ID for
    /// modification.
    fn joint_for_mut(&mut self, id: &SegmentID) -> Result<&mut Joint, Error> {
        let index = self.index_of(id)?;
        match &mut self.elements[index].element {
            ChainElement::Joint(joint) => Ok(joint),
            ChainElement::Link(_) => Err(Error::SegmentIsNotAJoint { id: *id }),
        }
    }

    /// Creates a new, empty chain.
    ///
    /// ## Parameters
    ///
    /// * 'frame' - The reference frame in which the poses of the chain are
    ///   expressed.
    /// * 'base' - The pose of the mounting point of the arm in the reference
    ///   frame.
    pub fn new(frame: Frame, base: Pose) -> Self {
        Self {
            frame,
            base,
            elements: Vec::new(),
            index_for_segment: HashMap::new(),
            is_frozen: Cell::new(false),
            inverse_kinematics: None,
            revolute_space: to_joint_space(JointSpaceType::Revolute {
                start_angle_in_radians: -PI,
            }),
        }
    }

    /// Returns the number of joints in the chain.
    pub fn number_of_joints(&self) -> usize {
        self.elements
            .iter()
            .filter(|entry| entry.element.is_joint())
            .count()
    }

    /// Returns the number of segments in the chain.
    pub fn number_of_segments(&self) -> usize {
        self.elements.len()
    }

    /// Sets the angle of every joint in the chain back to zero radians,
    /// returning the chain to the configuration it had when it was built.
    /// Links are not affected.
    pub fn reset_joints_to_zero(&mut self) {
        for entry in self.elements.iter_mut() {
            if let ChainElement::Joint(joint) = &mut entry.element {
                joint.set_angle_in_radians(0.0);
            }
        }
    }

    /// Sets the strategy that determines joint angles when an end effector
    /// pose is requested through [ArmKinematics::set_position].
    ///
    /// ## Parameters
    ///
    /// * 'strategy' - The inverse kinematics strategy for the chain.
    pub fn set_inverse_kinematics(&mut self, strategy: Box<dyn InverseKinematics>) {
        self.inverse_kinematics = Some(strategy);
    }

    /// Sets the angle of the joint that is registered under the given ID.
    ///
    /// Any finite angle is accepted; the chain places no limit on the range
    /// of a joint. Angle changes are allowed both before and after the chain
    /// layout is fixed.
    ///
    /// ## Parameters
    ///
    /// * 'id' - The ID of the segment.
    /// * 'angle_in_radians' - The new angle of the joint in radians.
    ///
    /// ## Errors
    ///
    /// * [Error::UnknownSegment] - Returned when no element is registered
    ///   under the given ID.
    /// * [Error::SegmentIsNotAJoint] - Returned when the element is a link.
    pub fn set_joint_angle(&mut self, id: &SegmentID, angle_in_radians: f64) -> Result<(), Error> {
        self.joint_for_mut(id)?.set_angle_in_radians(angle_in_radians);
        Ok(())
    }

    /// Moves the end effector of the arm to the target pose by asking the
    /// inverse kinematics strategy for the matching joint angles.
    ///
    /// ## Parameters
    ///
    /// * 'target' - The pose the end effector should reach, relative to the
    ///   frame of the chain.
    ///
    /// ## Errors
    ///
    /// * [Error::InverseKinematicsNotSet] - Returned when no strategy has
    ///   been provided.
    /// * Any error the strategy itself reports, such as
    ///   [Error::InverseKinematicsFailed].
    pub fn set_position(&mut self, target: &Pose) -> Result<(), Error> {
        let strategy = match self.inverse_kinematics.take() {
            Some(strategy) => strategy,
            None => return Err(Error::InverseKinematicsNotSet),
        };

        // The strategy borrows the chain itself, so the strategy is moved
        // out of the chain for the duration of the call.
        let result = strategy.determine(self, target);
        self.inverse_kinematics = Some(strategy);

        result
    }
}
