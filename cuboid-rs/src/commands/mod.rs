//! Command implementations

pub mod edit;
pub mod gumball;
pub mod model;
