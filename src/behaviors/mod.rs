//! One module per force acting on an agent. Every behavior returns the
//! change it wants to make to the velocity; the agent applies them in a
//! fixed order, each one seeing the velocity left by the previous.

pub(crate) mod alignment;
pub(crate) mod bias;
pub(crate) mod cohesion;
pub(crate) mod containment;
pub(crate) mod seek;
pub(crate) mod separation;
pub(crate) mod wander;
