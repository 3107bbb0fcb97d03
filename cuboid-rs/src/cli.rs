//! Root CLI structure for cuboid-rs

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use cuboid_rig::{TransformSpace, TranslateTarget};
use glam::DVec3;

use crate::utils::parse_vec3;

#[derive(Parser)]
#[command(name = "cuboid-rs")]
#[command(about = "Command-line tools for cuboid rig models", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display a summary of a model file
    Info {
        /// Path to the model file (.json, .yaml or .yml)
        file: PathBuf,
    },

    /// Display the cube hierarchy as a tree
    Tree {
        /// Path to the model file
        file: PathBuf,

        /// Maximum depth to display
        #[arg(short, long)]
        depth: Option<usize>,

        /// Disable colored output
        #[arg(long, env = "NO_COLOR")]
        no_color: bool,

        /// Show local parameters of every cube
        #[arg(long)]
        details: bool,
    },

    /// Lock or unlock cubes by identifier
    Lock {
        #[command(flatten)]
        model: EditTarget,

        /// Cube identifiers
        #[arg(required = true)]
        ids: Vec<String>,

        /// Remove the lock instead of adding it
        #[arg(long)]
        unlock: bool,
    },

    /// Translate cubes along an axis
    Translate {
        #[command(flatten)]
        model: EditTarget,

        #[command(flatten)]
        cubes: CubeArgs,

        /// Direction as X,Y,Z
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        axis: DVec3,

        /// Distance in blocks
        #[arg(long, allow_hyphen_values = true)]
        length: f64,

        /// Local parameter to move
        #[arg(long, value_enum, default_value_t = TargetArg::Position)]
        target: TargetArg,

        /// Frame the axis is given in
        #[arg(long, value_enum, default_value_t = SpaceArg::World)]
        space: SpaceArg,

        /// Move every selected cube, not only those without a selected ancestor
        #[arg(long)]
        all_cubes: bool,
    },

    /// Rotate cubes around an axis
    Rotate {
        #[command(flatten)]
        model: EditTarget,

        #[command(flatten)]
        cubes: CubeArgs,

        /// Rotation axis as X,Y,Z
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        axis: DVec3,

        /// Angle in degrees
        #[arg(long, allow_hyphen_values = true)]
        angle: f64,

        /// Rotate around this world point instead of each cube origin
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        around_point: Option<DVec3>,

        /// Frame the axis is given in
        #[arg(long, value_enum, default_value_t = SpaceArg::World)]
        space: SpaceArg,
    },

    /// Grow or shrink cubes along an axis
    Resize {
        #[command(flatten)]
        model: EditTarget,

        #[command(flatten)]
        cubes: CubeArgs,

        /// Direction as X,Y,Z; snapped to the closest cube axis
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        axis: DVec3,

        /// Length in blocks, negative to shrink
        #[arg(long, allow_hyphen_values = true)]
        length: f64,

        /// Frame the axis is given in
        #[arg(long, value_enum, default_value_t = SpaceArg::World)]
        space: SpaceArg,
    },

    /// Mirror cubes across a plane
    Mirror {
        #[command(flatten)]
        model: EditTarget,

        #[command(flatten)]
        cubes: CubeArgs,

        /// A point on the plane, in blocks
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true, default_value = "0,0,0")]
        point: DVec3,

        /// Plane normal
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        normal: DVec3,
    },

    /// Invert cubes (half turn around their Z axis, boxes kept in place)
    Invert {
        #[command(flatten)]
        model: EditTarget,

        #[command(flatten)]
        cubes: CubeArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Model file an editing command reads and writes
#[derive(Args, Debug, Clone)]
pub struct EditTarget {
    /// Path to the model file
    pub file: PathBuf,

    /// Write the result here instead of overwriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl EditTarget {
    /// Where the edited model is written
    pub fn output_path(&self) -> &PathBuf {
        self.output.as_ref().unwrap_or(&self.file)
    }
}

/// Cubes an editing command applies to
#[derive(Args, Debug, Clone, Default)]
pub struct CubeArgs {
    /// Comma-separated cube identifiers; every cube when omitted
    #[arg(short, long, value_delimiter = ',')]
    pub cubes: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetArg {
    Position,
    Offset,
    RotationPoint,
}

impl From<TargetArg> for TranslateTarget {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Position => Self::Position,
            TargetArg::Offset => Self::Offset,
            TargetArg::RotationPoint => Self::RotationPoint,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceArg {
    World,
    Local,
}

impl From<SpaceArg> for TransformSpace {
    fn from(arg: SpaceArg) -> Self {
        match arg {
            SpaceArg::World => Self::World,
            SpaceArg::Local => Self::Local,
        }
    }
}
