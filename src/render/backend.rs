use std::path::{Path, PathBuf};

use crate::foundation::{
    core::{FrameIndex, FrameRange},
    error::DrumviewResult,
};
use crate::scene::frame::{FrameScene, FrameSummary};

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// Run-level information handed to a [`Renderer`] before the first frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderTarget {
    /// Directory frames are written into. Already exists when `begin` is called.
    pub out_dir: PathBuf,
    /// Camera view id being rendered.
    pub view: String,
    /// Requested frame range (start inclusive, end exclusive).
    pub frames: FrameRange,
}

/// Consumer of prepared frames.
///
/// Ordering contract: `render_frame` is called in strictly increasing [`FrameIndex`] order, and
/// only for frames whose preparation succeeded. An `Err` from `render_frame` fails that frame
/// only; the driver logs it and moves on.
pub trait Renderer {
    /// Called once before any frame.
    fn begin(&mut self, _target: &RenderTarget) -> DrumviewResult<()> {
        Ok(())
    }

    /// Render one frame and write it to `out_path`.
    fn render_frame(&mut self, scene: &FrameScene, out_path: &Path) -> DrumviewResult<()>;

    /// Called once after the last frame.
    fn end(&mut self) -> DrumviewResult<()> {
        Ok(())
    }
}

/// Renderer that only records what it was asked to draw. Useful for dry runs and tests.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    target: Option<RenderTarget>,
    pub(crate) frames: Vec<(FrameIndex, PathBuf, FrameSummary)>,
    ended: bool,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target captured in `begin`, if any.
    pub fn target(&self) -> Option<&RenderTarget> {
        self.target.as_ref()
    }

    /// Recorded frames in call order.
    pub fn frames(&self) -> &[(FrameIndex, PathBuf, FrameSummary)] {
        &self.frames
    }

    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl Renderer for RecordingRenderer {
    fn begin(&mut self, target: &RenderTarget) -> DrumviewResult<()> {
        self.target = Some(target.clone());
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn render_frame(&mut self, scene: &FrameScene, out_path: &Path) -> DrumviewResult<()> {
        self.frames
            .push((scene.frame, out_path.to_path_buf(), scene.summary()));
        Ok(())
    }

    fn end(&mut self) -> DrumviewResult<()> {
        self.ended = true;
        Ok(())
    }
}
