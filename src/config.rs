//! Run configuration.
//!
//! Everything a batch render needs is carried in one [`RunConfig`] value. It can be loaded from a
//! JSON file (missing fields fall back to defaults) and then overridden field by field.

use std::path::{Path, PathBuf};

use crate::foundation::{
    core::{FrameIndex, FrameRange},
    error::{DrumviewError, DrumviewResult},
};
use crate::framing::views::{CameraView, ViewTable};
use crate::particles::classify::{DEFAULT_DRUM_MARGIN, SoilBound};
use crate::render::{pipeline::RenderThreading, preview::RenderSettings};
use crate::scene::{frame::FrameOpts, layout::SimulationLayout};

/// Complete configuration of a batch render.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Simulation output directory (contains `particles/`, `rover/`, `images/`).
    pub sim_root: PathBuf,
    /// Frames to render, end exclusive.
    pub frames: FrameRange,
    /// Id of the camera view to render.
    pub view: String,
    /// Available camera views.
    pub views: ViewTable,
    /// Drum/base separation margin above the rigid-body minimum y.
    pub drum_margin: f64,
    /// Soil particle absolute-y bound.
    pub soil_bound: SoilBound,
    /// Fail a frame when any rover mesh is missing.
    pub require_meshes: bool,
    /// Preview renderer settings.
    pub render: RenderSettings,
    /// Frame-level parallelism.
    pub threading: RenderThreading,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sim_root: PathBuf::from("."),
            frames: FrameRange::default(),
            view: "side_view".to_owned(),
            views: ViewTable::default(),
            drum_margin: DEFAULT_DRUM_MARGIN,
            soil_bound: SoilBound::default(),
            require_meshes: false,
            render: RenderSettings::default(),
            threading: RenderThreading::default(),
        }
    }
}

impl RunConfig {
    /// Load a JSON configuration file.
    pub fn from_path(path: &Path) -> DrumviewResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            DrumviewError::validation(format!("failed to read config '{}': {e}", path.display()))
        })?;
        serde_json::from_str(&text).map_err(|e| {
            DrumviewError::validation(format!("invalid run config '{}': {e}", path.display()))
        })
    }

    /// Parse a JSON configuration string.
    pub fn from_json(text: &str) -> DrumviewResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| DrumviewError::validation(format!("invalid run config JSON: {e}")))
    }

    /// Check every field a run depends on.
    pub fn validate(&self) -> DrumviewResult<()> {
        FrameRange::new(self.frames.start, self.frames.end)?;
        self.views.get(&self.view)?;
        if !self.drum_margin.is_finite() || self.drum_margin < 0.0 {
            return Err(DrumviewError::validation(format!(
                "drum_margin must be finite and >= 0, got {}",
                self.drum_margin
            )));
        }
        if let SoilBound::Fixed(b) = self.soil_bound
            && !(b.is_finite() && b > 0.0)
        {
            return Err(DrumviewError::validation(format!(
                "soil_bound must be finite and > 0, got {b}"
            )));
        }
        if let Some(0) = self.threading.threads {
            return Err(DrumviewError::validation(
                "render threading 'threads' must be >= 1 when set",
            ));
        }
        self.render.validate()
    }

    pub fn layout(&self) -> SimulationLayout {
        SimulationLayout::new(&self.sim_root)
    }

    pub fn frame_opts(&self) -> FrameOpts {
        FrameOpts {
            drum_margin: self.drum_margin,
            soil_bound: self.soil_bound,
            require_meshes: self.require_meshes,
        }
    }

    /// The configured camera view.
    pub fn active_view(&self) -> DrumviewResult<&CameraView> {
        self.views.get(&self.view)
    }

    /// Replace the frame range, validating its ordering.
    pub fn set_frames(&mut self, start: u64, end: u64) -> DrumviewResult<()> {
        self.frames = FrameRange::new(FrameIndex(start), FrameIndex(end))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
