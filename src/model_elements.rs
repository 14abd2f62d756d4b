/// Defines the different chain elements that are used to create an arm model
pub mod chain_elements;

/// Defines the kinematic chain for a serial arm.
pub mod arm;
