//! Level 4: End-to-End Scenario Tests
//!
//! Editing sessions as a modelling tool runs them.

pub mod editing_session;
