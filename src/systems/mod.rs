//! Systems - behavior contracts and the built-in behaviors.

pub mod behaviors;
