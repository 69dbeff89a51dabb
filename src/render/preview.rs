//! CPU point-splat preview renderer.
//!
//! Projects every particle through a pinhole camera and draws it as a filled disc, far to near.
//! Meshes are not drawn.

use std::path::Path;

use kurbo::Shape as _;

use crate::foundation::{
    core::Position3,
    error::{DrumviewError, DrumviewResult},
};
use crate::framing::views::CameraPose;
use crate::render::backend::{FrameRGBA, Renderer};
use crate::scene::frame::FrameScene;

/// Preview renderer settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Field of view across the larger image dimension, in radians.
    pub fov_rad: f64,
    /// Near clip distance.
    pub clip_start: f64,
    /// Far clip distance.
    pub clip_end: f64,
    /// Particle radius in simulation length units.
    pub particle_radius: f64,
    /// Drum particle color (straight RGBA8).
    pub drum_rgba: [u8; 4],
    /// Soil particle color (straight RGBA8).
    pub soil_rgba: [u8; 4],
    /// Opaque background color.
    pub background_rgba: [u8; 4],
    /// Draw drum particles as well as soil.
    pub draw_drum: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 960,
            // 50mm lens on a 36mm sensor.
            fov_rad: 2.0 * (18.0_f64 / 50.0).atan(),
            clip_start: 0.1,
            clip_end: 10.0,
            particle_radius: 0.002,
            drum_rgba: [77, 0, 0, 255],
            soil_rgba: [26, 26, 26, 255],
            background_rgba: [210, 212, 218, 255],
            draw_drum: true,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> DrumviewResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(DrumviewError::validation("render size must be non-zero"));
        }
        if u16::try_from(self.width).is_err() || u16::try_from(self.height).is_err() {
            return Err(DrumviewError::validation(format!(
                "render size {}x{} exceeds {}",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        if !(self.fov_rad > 0.0 && self.fov_rad < std::f64::consts::PI) {
            return Err(DrumviewError::validation("fov_rad must be in (0, pi)"));
        }
        if !(self.clip_start > 0.0 && self.clip_end > self.clip_start) {
            return Err(DrumviewError::validation(
                "clip range must satisfy 0 < clip_start < clip_end",
            ));
        }
        if !(self.particle_radius.is_finite() && self.particle_radius > 0.0) {
            return Err(DrumviewError::validation("particle_radius must be > 0"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Splat {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) radius: f64,
    pub(crate) depth: f64,
    pub(crate) rgba: [u8; 4],
}

/// Pinhole projection for one camera pose.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Projection {
    pose: CameraPose,
    focal_px: f64,
    half_w: f64,
    half_h: f64,
    clip_start: f64,
    clip_end: f64,
}

impl Projection {
    pub(crate) fn new(settings: &RenderSettings, pose: CameraPose) -> Self {
        let w = f64::from(settings.width);
        let h = f64::from(settings.height);
        Self {
            pose,
            focal_px: (w.max(h) * 0.5) / (settings.fov_rad * 0.5).tan(),
            half_w: w * 0.5,
            half_h: h * 0.5,
            clip_start: settings.clip_start,
            clip_end: settings.clip_end,
        }
    }

    /// Screen-space disc for a particle of world radius `radius`, or `None` when clipped.
    pub(crate) fn splat(&self, p: Position3, radius: f64, rgba: [u8; 4]) -> Option<Splat> {
        let c = self
            .pose
            .orientation
            .world_to_camera(self.pose.location, p);
        let depth = -c.z;
        if depth < self.clip_start || depth > self.clip_end {
            return None;
        }
        let x = self.half_w + self.focal_px * c.x / depth;
        let y = self.half_h - self.focal_px * c.y / depth;
        let r = (radius * self.focal_px / depth).max(0.5);
        let w = self.half_w * 2.0;
        let h = self.half_h * 2.0;
        if x + r < 0.0 || x - r > w || y + r < 0.0 || y - r > h {
            return None;
        }
        Some(Splat {
            x,
            y,
            radius: r,
            depth,
            rgba,
        })
    }
}

/// Renderer that rasterizes particle splats with `vello_cpu` and writes PNG files.
pub struct PreviewRenderer {
    settings: RenderSettings,
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for PreviewRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewRenderer")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl PreviewRenderer {
    pub fn new(settings: RenderSettings) -> DrumviewResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            ctx: None,
        })
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Depth-sorted (far to near) splats for a scene.
    pub(crate) fn splats(&self, scene: &FrameScene) -> Vec<Splat> {
        let proj = Projection::new(&self.settings, scene.camera);
        let radius = self.settings.particle_radius;

        let mut out = Vec::with_capacity(scene.soil.len() + scene.drum.positions.len());
        out.extend(
            scene
                .soil
                .iter()
                .filter_map(|p| proj.splat(*p, radius, self.settings.soil_rgba)),
        );
        if self.settings.draw_drum {
            out.extend(
                scene
                    .drum
                    .positions
                    .iter()
                    .filter_map(|p| proj.splat(*p, radius, self.settings.drum_rgba)),
            );
        }
        out.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        out
    }

    /// Rasterize one scene into premultiplied RGBA8 pixels.
    pub fn rasterize(&mut self, scene: &FrameScene) -> DrumviewResult<FrameRGBA> {
        let splats = self.splats(scene);
        let (w, h) = (self.settings.width, self.settings.height);
        let w16: u16 = w
            .try_into()
            .map_err(|_| DrumviewError::validation(format!("render width {w} exceeds u16")))?;
        let h16: u16 = h
            .try_into()
            .map_err(|_| DrumviewError::validation(format!("render height {h} exceeds u16")))?;

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w16 && ctx.height() == h16 => ctx,
            _ => vello_cpu::RenderContext::new(w16, h16),
        };
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let [r, g, b, a] = self.settings.background_rgba;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(w), f64::from(h)));

        for s in &splats {
            let [r, g, b, a] = s.rgba;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            let circle = kurbo::Circle::new((s.x, s.y), s.radius);
            let mut path = vello_cpu::kurbo::BezPath::new();
            for el in circle.path_elements(0.1) {
                path.push(el);
            }
            ctx.fill_path(&path);
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);

        tracing::debug!(frame = scene.frame.0, splats = splats.len(), "rasterized preview");
        Ok(FrameRGBA {
            width: w,
            height: h,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

impl Renderer for PreviewRenderer {
    fn render_frame(&mut self, scene: &FrameScene, out_path: &Path) -> DrumviewResult<()> {
        let frame = self.rasterize(scene)?;
        write_png(&frame, out_path)
    }
}

/// Write a frame as a straight-alpha RGBA PNG.
pub fn write_png(frame: &FrameRGBA, path: &Path) -> DrumviewResult<()> {
    let mut data = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_in_place(&mut data);
    }
    image::save_buffer_with_format(
        path,
        &data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| DrumviewError::asset(format!("write png '{}': {e}", path.display())))
}

fn unpremultiply_in_place(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/preview.rs"]
mod tests;
