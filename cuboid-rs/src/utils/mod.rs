//! Shared utilities for the cuboid-rs CLI

pub mod io;
pub mod table;
pub mod tree;

pub use io::*;
pub use table::*;
pub use tree::*;
