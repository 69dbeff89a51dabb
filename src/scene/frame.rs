use std::path::PathBuf;

use crate::foundation::{
    core::{FrameIndex, Position3},
    error::{DrumviewError, DrumviewResult},
};
use crate::framing::{
    bounds::{Aabb3, bounding_box},
    views::{CameraPose, CameraView},
};
use crate::particles::classify::{
    DEFAULT_DRUM_MARGIN, DrumParticles, SoilBound, load_drum_particles, load_soil_for_drum,
};
use crate::scene::layout::{ROVER_COMPONENTS, SimulationLayout};

/// Per-frame classification options.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameOpts {
    /// Height above the rigid-body minimum treated as structural base.
    pub drum_margin: f64,
    /// Absolute-y bound for soil particles.
    pub soil_bound: SoilBound,
    /// Fail the frame when a rover mesh file is missing.
    pub require_meshes: bool,
}

impl Default for FrameOpts {
    fn default() -> Self {
        Self {
            drum_margin: DEFAULT_DRUM_MARGIN,
            soil_bound: SoilBound::default(),
            require_meshes: false,
        }
    }
}

/// A rover mesh the renderer is expected to import for this frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeshRef {
    pub component: &'static str,
    pub path: PathBuf,
}

/// Everything a renderer needs for one frame of one view.
#[derive(Clone, Debug)]
pub struct FrameScene {
    pub frame: FrameIndex,
    pub drum: DrumParticles,
    pub soil: Vec<Position3>,
    pub bounds: Aabb3,
    pub reference: Position3,
    pub camera: CameraPose,
    pub meshes: Vec<MeshRef>,
}

/// Compact, serializable description of a prepared frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameSummary {
    pub frame: u64,
    pub drum_particles: usize,
    pub soil_particles: usize,
    pub rigid_y_min: f64,
    pub bounds: Aabb3,
    pub reference: Position3,
    pub camera: CameraPose,
    pub camera_quat: [f64; 4],
}

impl FrameScene {
    pub fn summary(&self) -> FrameSummary {
        FrameSummary {
            frame: self.frame.0,
            drum_particles: self.drum.positions.len(),
            soil_particles: self.soil.len(),
            rigid_y_min: self.drum.y_min,
            bounds: self.bounds,
            reference: self.reference,
            camera: self.camera,
            camera_quat: self.camera.orientation.to_quat().to_array(),
        }
    }
}

/// Load, classify and frame one simulation frame.
///
/// Reads the rigid and fluid snapshots of `frame`, derives the drum bounding box and reference
/// point, and resolves `view` into a camera pose. Nothing is cached between calls.
#[tracing::instrument(skip(layout, view, opts), fields(root = %layout.root().display()))]
pub fn prepare_frame(
    layout: &SimulationLayout,
    frame: FrameIndex,
    view: &CameraView,
    opts: &FrameOpts,
) -> DrumviewResult<FrameScene> {
    let drum = load_drum_particles(&layout.rigid_csv(frame), opts.drum_margin)?;
    let bounds = bounding_box(&drum.positions).map_err(|e| match e {
        DrumviewError::EmptyInput(_) => DrumviewError::empty_input(format!(
            "frame {frame}: no drum particles above y_min + {}",
            opts.drum_margin
        )),
        other => other,
    })?;
    let reference = bounds.reference_point();

    let soil = load_soil_for_drum(&layout.fluid_csv(frame), opts.soil_bound, &drum)?;

    let camera = view.pose(reference)?;
    let meshes = mesh_refs(layout, frame, opts.require_meshes)?;

    Ok(FrameScene {
        frame,
        drum,
        soil,
        bounds,
        reference,
        camera,
        meshes,
    })
}

fn mesh_refs(
    layout: &SimulationLayout,
    frame: FrameIndex,
    require: bool,
) -> DrumviewResult<Vec<MeshRef>> {
    let mut out = Vec::with_capacity(ROVER_COMPONENTS.len());
    for component in ROVER_COMPONENTS {
        let path = layout.mesh_path(component, frame);
        if require && !path.is_file() {
            return Err(DrumviewError::asset(format!(
                "missing rover mesh '{}'",
                path.display()
            )));
        }
        out.push(MeshRef { component, path });
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/frame.rs"]
mod tests;
