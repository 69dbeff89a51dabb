//! Named camera framings, declared relative to the drum reference point.

use std::collections::BTreeMap;

use crate::foundation::{
    core::{DMat4, Position3},
    error::{DrumviewError, DrumviewResult},
};
use crate::framing::look_at::{Orientation, look_at};

/// One named camera framing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraView {
    /// Camera location relative to the reference point.
    pub location_offset: Position3,
    /// Look target relative to the reference point.
    pub target_offset: Position3,
    /// Roll about the viewing axis, in degrees.
    #[serde(default)]
    pub roll_deg: f64,
    /// Output file stem; frames are written as `<file_name>_<k:04>.png`.
    pub file_name: String,
}

/// A resolved camera: world location plus orientation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraPose {
    /// Camera location in world space.
    pub location: Position3,
    /// Point the camera is aimed at.
    pub target: Position3,
    /// Camera rotation.
    pub orientation: Orientation,
}

impl CameraPose {
    /// 4x4 camera-to-world transform.
    pub fn world_matrix(&self) -> DMat4 {
        self.orientation.to_world_matrix(self.location)
    }
}

impl CameraView {
    /// Resolve this framing against a reference point.
    pub fn pose(&self, reference: Position3) -> DrumviewResult<CameraPose> {
        let location = reference + self.location_offset;
        let target = reference + self.target_offset;
        let orientation = look_at(location, target, self.roll_deg.to_radians())?;
        Ok(CameraPose {
            location,
            target,
            orientation,
        })
    }
}

/// View id → framing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ViewTable(BTreeMap<String, CameraView>);

impl Default for ViewTable {
    fn default() -> Self {
        let mut views = BTreeMap::new();
        // Whole vehicle from the side.
        views.insert(
            "side_view".to_owned(),
            CameraView {
                location_offset: Position3::new(0.25, -3.0, 0.25),
                target_offset: Position3::new(0.0, 0.0, 0.0),
                roll_deg: 0.0,
                file_name: "side_view".to_owned(),
            },
        );
        // Close-up on the wheel and drum.
        views.insert(
            "focused_view".to_owned(),
            CameraView {
                location_offset: Position3::new(-0.1, -0.1, 0.5),
                target_offset: Position3::new(0.5, 0.1, -0.25),
                roll_deg: 0.0,
                file_name: "focused_view".to_owned(),
            },
        );
        Self(views)
    }
}

impl ViewTable {
    /// Table without any views.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Add or replace a view.
    pub fn insert(&mut self, id: impl Into<String>, view: CameraView) -> Option<CameraView> {
        self.0.insert(id.into(), view)
    }

    /// Look up a view by id.
    pub fn get(&self, id: &str) -> DrumviewResult<&CameraView> {
        self.0.get(id).ok_or_else(|| {
            let known = self.ids().collect::<Vec<_>>().join(", ");
            DrumviewError::validation(format!("unknown camera view '{id}' (known: {known})"))
        })
    }

    /// View ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `(id, view)` pairs in sorted id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CameraView)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/framing/views.rs"]
mod tests;
