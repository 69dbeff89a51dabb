//! drumview turns granular-soil / rover-drum simulation dumps into rendered frames.
//!
//! Per simulation frame `k` the pipeline is:
//!
//! 1. **Classify**: read `BCE_Rigid<k>.csv` and `fluid<k>.csv`, keep the drum shell (rigid
//!    particles more than a margin above the lowest rigid particle) and the soil inside an
//!    absolute-y bound.
//! 2. **Frame**: bound the drum, derive the reference point `(center_x, min_y, center_z)`, and aim
//!    the configured camera view at it with a track-to orientation.
//! 3. **Render**: hand the prepared [`FrameScene`] to a [`Renderer`]. The bundled
//!    [`PreviewRenderer`] splats particles into a PNG; a production path tracer plugs in through
//!    the same trait.
//!
//! Frames are independent: nothing is cached between them, and a failing frame is logged and
//! skipped by [`render_range`] without affecting its neighbours.
#![forbid(unsafe_code)]

mod config;
mod foundation;
mod framing;
mod particles;
mod render;
mod scene;

pub use config::RunConfig;
pub use foundation::core::{
    DMat3, DMat4, DQuat, DVec3, FrameIndex, FrameRange, Position3,
};
pub use foundation::error::{DrumviewError, DrumviewResult};
pub use framing::bounds::{Aabb3, bounding_box, reference_point};
pub use framing::look_at::{FALLBACK_UP, Orientation, WORLD_UP, look_at};
pub use framing::views::{CameraPose, CameraView, ViewTable};
pub use particles::classify::{
    DEFAULT_DRUM_MARGIN, DEFAULT_SOIL_BOUND, DrumParticles, SoilBound, filter_soil,
    load_drum_particles, load_soil_for_drum, load_soil_particles, split_drum,
};
pub use particles::snapshot::read_snapshot;
pub use render::backend::{FrameRGBA, RecordingRenderer, RenderTarget, Renderer};
pub use render::pipeline::{
    FrameFailure, RenderThreading, RunStats, render_one, render_range,
};
pub use render::preview::{PreviewRenderer, RenderSettings, write_png};
pub use scene::frame::{FrameOpts, FrameScene, FrameSummary, MeshRef, prepare_frame};
pub use scene::layout::{ROVER_COMPONENTS, SimulationLayout};
