//! Drum / soil particle classification.
//!
//! Rigid-body dumps contain both the flat structural base and the curved drum shell. The base
//! sits at (nearly) the lowest y of the dump, so everything within `margin` of the minimum is
//! dropped and the rest is kept as the drum.

use std::path::Path;

use crate::foundation::{
    core::Position3,
    error::{DrumviewError, DrumviewResult},
};
use crate::particles::snapshot::read_snapshot;

/// Height above the rigid-body minimum below which particles count as structural base.
pub const DEFAULT_DRUM_MARGIN: f64 = 0.02;

/// Default absolute-y bound for soil particles.
pub const DEFAULT_SOIL_BOUND: f64 = 0.65;

/// Drum shell particles of one rigid-body snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct DrumParticles {
    /// Kept positions, in file order.
    pub positions: Vec<Position3>,
    /// Minimum y over the whole unfiltered snapshot.
    pub y_min: f64,
}

/// How the soil filter picks its absolute-y bound.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilBound {
    /// A fixed bound in simulation length units.
    Fixed(f64),
    /// `|y_min|` of the drum snapshot of the same frame.
    DrumFloor,
}

impl Default for SoilBound {
    fn default() -> Self {
        Self::Fixed(DEFAULT_SOIL_BOUND)
    }
}

impl SoilBound {
    /// Resolve to a concrete bound for one frame.
    pub fn resolve(self, drum: &DrumParticles) -> f64 {
        match self {
            Self::Fixed(v) => v,
            Self::DrumFloor => drum.y_min.abs(),
        }
    }
}

/// Load a rigid-body CSV and keep the drum shell (`y > y_min + margin`).
pub fn load_drum_particles(path: &Path, margin: f64) -> DrumviewResult<DrumParticles> {
    let raw = read_snapshot(path)?;
    let drum = split_drum(&raw, margin)?;
    tracing::debug!(
        path = %path.display(),
        total = raw.len(),
        kept = drum.positions.len(),
        y_min = drum.y_min,
        "classified drum particles"
    );
    Ok(drum)
}

/// Load a fluid CSV and keep soil particles with `|y| <= bound`.
pub fn load_soil_particles(path: &Path, bound: f64) -> DrumviewResult<Vec<Position3>> {
    let raw = read_snapshot(path)?;
    let soil = filter_soil(&raw, bound)?;
    tracing::debug!(
        path = %path.display(),
        total = raw.len(),
        kept = soil.len(),
        bound,
        "classified soil particles"
    );
    Ok(soil)
}

/// Load a fluid CSV and keep soil particles within `bound`, resolved against `drum`.
///
/// A [`SoilBound::DrumFloor`] bound comes from the data rather than the configuration, so a drum
/// floor at `y = 0` is accepted and keeps only particles at `y = 0`.
pub fn load_soil_for_drum(
    path: &Path,
    bound: SoilBound,
    drum: &DrumParticles,
) -> DrumviewResult<Vec<Position3>> {
    let raw = read_snapshot(path)?;
    let limit = bound.resolve(drum);
    let soil = match bound {
        SoilBound::Fixed(b) => filter_soil(&raw, b)?,
        SoilBound::DrumFloor => within_bound(&raw, limit),
    };
    tracing::debug!(
        path = %path.display(),
        total = raw.len(),
        kept = soil.len(),
        bound = limit,
        "classified soil particles"
    );
    Ok(soil)
}

/// Split an already-parsed rigid-body snapshot.
pub fn split_drum(raw: &[Position3], margin: f64) -> DrumviewResult<DrumParticles> {
    if !margin.is_finite() || margin < 0.0 {
        return Err(DrumviewError::validation(format!(
            "drum margin must be finite and >= 0, got {margin}"
        )));
    }
    let y_min = raw
        .iter()
        .map(|p| p.y)
        .reduce(f64::min)
        .ok_or_else(|| DrumviewError::data_format("rigid-body snapshot has no data rows"))?;

    let threshold = y_min + margin;
    let positions = raw.iter().copied().filter(|p| p.y > threshold).collect();
    Ok(DrumParticles { positions, y_min })
}

/// Filter an already-parsed fluid snapshot.
pub fn filter_soil(raw: &[Position3], bound: f64) -> DrumviewResult<Vec<Position3>> {
    if !bound.is_finite() || bound <= 0.0 {
        return Err(DrumviewError::validation(format!(
            "soil bound must be finite and > 0, got {bound}"
        )));
    }
    Ok(within_bound(raw, bound))
}

fn within_bound(raw: &[Position3], bound: f64) -> Vec<Position3> {
    raw.iter().copied().filter(|p| p.y.abs() <= bound).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/particles/classify.rs"]
mod tests;
