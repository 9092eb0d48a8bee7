//! Core engine types and utilities for Rat Plague.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Transform and spatial components
//! - Frame timing
//! - Presentation components stored in the scene world

pub mod components;
pub mod time;
pub mod transform;

pub use components::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Quat, Vec2, Vec3};
pub use hecs::{Entity, World};
