use crate::foundation::{
    core::Position3,
    error::{DrumviewError, DrumviewResult},
};

/// Axis-aligned bounding box over a set of positions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Aabb3 {
    /// Per-axis minimum.
    pub min: Position3,
    /// Per-axis maximum.
    pub max: Position3,
}

impl Aabb3 {
    /// Midpoint of the box.
    pub fn center(&self) -> Position3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths along x, y and z.
    pub fn size(&self) -> Position3 {
        self.max - self.min
    }

    /// Whether `p` lies inside the box (boundary included).
    pub fn contains(&self, p: Position3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Camera anchor: centered in x and z, sitting at the lowest y.
    pub fn reference_point(&self) -> Position3 {
        let c = self.center();
        Position3::new(c.x, self.min.y, c.z)
    }
}

/// Per-axis min/max of `positions` in one linear scan.
///
/// Fails with [`DrumviewError::EmptyInput`] for an empty slice.
pub fn bounding_box(positions: &[Position3]) -> DrumviewResult<Aabb3> {
    let (first, rest) = positions
        .split_first()
        .ok_or_else(|| DrumviewError::empty_input("bounding box of zero positions"))?;

    let mut min = *first;
    let mut max = *first;
    for p in rest {
        min = min.min(*p);
        max = max.max(*p);
    }
    Ok(Aabb3 { min, max })
}

/// `(center_x, min_y, center_z)` of the bounding box of `positions`.
pub fn reference_point(positions: &[Position3]) -> DrumviewResult<Position3> {
    Ok(bounding_box(positions)?.reference_point())
}

#[cfg(test)]
#[path = "../../tests/unit/framing/bounds.rs"]
mod tests;
