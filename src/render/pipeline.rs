use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::config::RunConfig;
use crate::foundation::{
    core::{FrameIndex, FrameRange},
    error::{DrumviewError, DrumviewResult},
};
use crate::framing::views::CameraView;
use crate::render::backend::{RenderTarget, Renderer};
use crate::scene::{
    frame::{FrameScene, prepare_frame},
    layout::SimulationLayout,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Frame-level parallelism controls.
pub struct RenderThreading {
    /// Prepare frames on a worker pool when `true`.
    pub parallel: bool,
    /// Frames prepared per batch before handing them to the renderer.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 16,
            threads: None,
        }
    }
}

/// One frame that was skipped.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FrameFailure {
    pub frame: FrameIndex,
    /// [`DrumviewError::kind`] of the failure.
    pub kind: &'static str,
    pub message: String,
}

/// Aggregated counters of a batch render.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RunStats {
    pub frames_total: u64,
    pub frames_rendered: u64,
    pub frames_failed: u64,
    /// Skipped frames in frame order.
    pub failed: Vec<FrameFailure>,
}

/// Render every frame of `config.frames` with `renderer`.
///
/// Setup problems (invalid config, output directory, `begin`/`end`) are returned as errors. A
/// frame that fails to load, classify, frame or render is logged with its index and error kind,
/// recorded in [`RunStats::failed`], and skipped.
pub fn render_range(config: &RunConfig, renderer: &mut dyn Renderer) -> DrumviewResult<RunStats> {
    config.validate()?;
    let view = config.active_view()?;
    let layout = config.layout();
    let opts = config.frame_opts();

    let out_dir = ensure_out_dir(&layout)?;
    renderer.begin(&RenderTarget {
        out_dir,
        view: config.view.clone(),
        frames: config.frames,
    })?;
    tracing::info!(
        view = %config.view,
        start = config.frames.start.0,
        end = config.frames.end.0,
        parallel = config.threading.parallel,
        "rendering frame range"
    );

    let mut stats = RunStats::default();
    if config.threading.parallel && !config.frames.is_empty() {
        let pool = build_thread_pool(config.threading.threads)?;
        let chunk_size = normalized_chunk_size(config.threading.chunk_size);

        let mut chunk_start = config.frames.start.0;
        while chunk_start < config.frames.end.0 {
            let chunk_end = (chunk_start + chunk_size).min(config.frames.end.0);
            let prepared: Vec<(FrameIndex, DrumviewResult<FrameScene>)> = pool.install(|| {
                (chunk_start..chunk_end)
                    .into_par_iter()
                    .map(|f| {
                        let frame = FrameIndex(f);
                        (frame, prepare_frame(&layout, frame, view, &opts))
                    })
                    .collect()
            });
            for (frame, scene) in prepared {
                finish_frame(renderer, &layout, view, frame, scene, &mut stats);
            }
            chunk_start = chunk_end;
        }
    } else {
        for frame in config.frames.iter() {
            let scene = prepare_frame(&layout, frame, view, &opts);
            finish_frame(renderer, &layout, view, frame, scene, &mut stats);
        }
    }

    renderer.end()?;
    tracing::info!(
        total = stats.frames_total,
        rendered = stats.frames_rendered,
        failed = stats.frames_failed,
        "frame range finished"
    );
    Ok(stats)
}

/// Render a single frame, returning the output path. Errors are propagated, not skipped.
///
/// The frame is written to `out_path` when given, otherwise to the layout's output file for the
/// active view.
pub fn render_one(
    config: &RunConfig,
    frame: FrameIndex,
    out_path: Option<&Path>,
    renderer: &mut dyn Renderer,
) -> DrumviewResult<PathBuf> {
    config.validate()?;
    let end = frame
        .0
        .checked_add(1)
        .ok_or_else(|| DrumviewError::validation(format!("frame index {frame} is out of range")))?;
    let view = config.active_view()?;
    let layout = config.layout();
    let scene = prepare_frame(&layout, frame, view, &config.frame_opts())?;

    let out_dir = ensure_out_dir(&layout)?;
    let out_path = match out_path {
        Some(p) => {
            if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DrumviewError::asset(format!("create output dir '{}': {e}", parent.display()))
                })?;
            }
            p.to_path_buf()
        }
        None => layout.output_png(&view.file_name, frame),
    };
    renderer.begin(&RenderTarget {
        out_dir,
        view: config.view.clone(),
        frames: FrameRange::new(frame, FrameIndex(end))?,
    })?;
    renderer.render_frame(&scene, &out_path)?;
    renderer.end()?;
    Ok(out_path)
}

fn finish_frame(
    renderer: &mut dyn Renderer,
    layout: &SimulationLayout,
    view: &CameraView,
    frame: FrameIndex,
    scene: DrumviewResult<FrameScene>,
    stats: &mut RunStats,
) {
    stats.frames_total += 1;
    let out_path = layout.output_png(&view.file_name, frame);
    match scene.and_then(|scene| renderer.render_frame(&scene, &out_path)) {
        Ok(()) => {
            stats.frames_rendered += 1;
            tracing::debug!(frame = frame.0, path = %out_path.display(), "wrote frame");
        }
        Err(err) => {
            tracing::warn!(frame = frame.0, kind = err.kind(), error = %err, "skipping frame");
            stats.frames_failed += 1;
            stats.failed.push(FrameFailure {
                frame,
                kind: err.kind(),
                message: err.to_string(),
            });
        }
    }
}

fn ensure_out_dir(layout: &SimulationLayout) -> DrumviewResult<PathBuf> {
    let out_dir = layout.out_dir();
    std::fs::create_dir_all(&out_dir).map_err(|e| {
        DrumviewError::asset(format!("create output dir '{}': {e}", out_dir.display()))
    })?;
    Ok(out_dir)
}

fn build_thread_pool(threads: Option<usize>) -> DrumviewResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| DrumviewError::validation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
