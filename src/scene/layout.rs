//! On-disk layout of one simulation run.
//!
//! ```text
//! <root>/particles/BCE_Rigid<k>.csv   rigid (drum) particles
//! <root>/particles/fluid<k>.csv       fluid (soil) particles
//! <root>/rover/<component>_<k>.obj    rover meshes
//! <root>/images/<view>_<k:04>.png     rendered frames
//! ```

use std::path::{Path, PathBuf};

use crate::foundation::core::FrameIndex;

/// Rover components exported as one OBJ mesh per frame.
pub const ROVER_COMPONENTS: [&str; 9] = [
    "chassis", "arm_B", "arm_F", "Wheel_LF", "Wheel_RF", "Wheel_LB", "Wheel_RB", "razor_F",
    "razor_B",
];

/// Paths of a simulation output directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationLayout {
    root: PathBuf,
}

impl SimulationLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn particle_dir(&self) -> PathBuf {
        self.root.join("particles")
    }

    pub fn mesh_dir(&self) -> PathBuf {
        self.root.join("rover")
    }

    pub fn out_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    pub fn rigid_csv(&self, frame: FrameIndex) -> PathBuf {
        self.particle_dir().join(format!("BCE_Rigid{}.csv", frame.0))
    }

    pub fn fluid_csv(&self, frame: FrameIndex) -> PathBuf {
        self.particle_dir().join(format!("fluid{}.csv", frame.0))
    }

    pub fn mesh_path(&self, component: &str, frame: FrameIndex) -> PathBuf {
        self.mesh_dir().join(format!("{component}_{}.obj", frame.0))
    }

    /// `<root>/images/<file_name>_<k:04>.png`
    pub fn output_png(&self, file_name: &str, frame: FrameIndex) -> PathBuf {
        self.out_dir()
            .join(format!("{file_name}_{}.png", frame.padded()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/layout.rs"]
mod tests;
