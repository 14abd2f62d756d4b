/// Defines the interface for servo motor descriptions
pub mod motor_interface;

/// Provides the translation from joint angles to servo PWM values
pub mod servo;
