//! Hierarchical cube transforms for box-based character rigs
//!
//! The crate keeps a tree of oriented boxes ([`Model`]) and edits it the way a
//! modelling tool does: gestures that translate, rotate or resize the
//! selection ([`Gumball`]), mirroring across a plane ([`mirror()`]), inverting
//! ([`invert`]), and locked cubes that keep their world pose while their
//! ancestors move ([`LockedCubes`], built on [`CubeLocker`]).
//!
//! ```rust
//! use cuboid_rig::{CubeDefinition, LockedCubes, Model, Selection};
//! use glam::DVec3;
//!
//! let mut model = Model::default();
//! let body = model.add_cube(None, CubeDefinition::new("body").with_identifier("body"))?;
//! let head = model.add_cube(
//!     Some(body),
//!     CubeDefinition::new("head")
//!         .with_identifier("head")
//!         .with_position(DVec3::new(0.0, 16.0, 0.0)),
//! )?;
//!
//! let mut locked = LockedCubes::new();
//! locked.lock_identifier("head");
//! let before = model.world_position(head)?;
//!
//! locked.edit_preserving_locks(&mut model, &Selection::from_ids([body]), |model| {
//!     model.set_position(body, DVec3::new(10.0, 0.0, 0.0))
//! })?;
//! assert!((model.world_position(head)? - before).length() < 1e-9);
//! # Ok::<(), cuboid_rig::RigError>(())
//! ```

pub mod animation;
pub mod error;
#[cfg(feature = "serde")]
pub mod format;
pub mod gumball;
pub mod invert;
pub mod locked;
pub mod locker;
pub mod math;
pub mod mirror;
pub mod model;
pub mod selection;

pub use error::{Result, RigError};
pub use gumball::{
    Gumball, GumballConfig, GumballMode, RotationAnchor, TransformSpace, TranslateTarget,
};
pub use locked::LockedCubes;
pub use locker::{CubeLocker, LockerCache, LockerType};
pub use mirror::{MirrorOperation, MirrorPlane, mirror};
pub use model::{Cube, CubeDefinition, CubeId, CubeLocalState, Model, ModelConfig};
pub use selection::Selection;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
