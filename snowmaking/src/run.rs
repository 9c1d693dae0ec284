use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::geo::LatLng;

/// A ski run drawn as a polyline. Point order is drawing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRun")]
pub struct Run {
    name: String,
    points: Vec<LatLng>,
}

#[derive(Deserialize)]
struct RawRun {
    name: String,
    points: Vec<LatLng>,
}

impl TryFrom<RawRun> for Run {
    type Error = anyhow::Error;

    fn try_from(raw: RawRun) -> Result<Self> {
        Run::new(raw.name, raw.points)
    }
}

impl Run {
    /// Create a run; a polyline needs at least two points
    pub fn new(name: impl Into<String>, points: Vec<LatLng>) -> Result<Self> {
        let name = name.into();
        if points.len() < 2 {
            bail!("run {:?} needs at least 2 points, got {}", name, points.len());
        }
        Ok(Self { name, points })
    }

    /// Built-in catalog data, already known to be well formed
    pub(crate) fn from_trusted(name: &str, points: &[(f64, f64)]) -> Self {
        debug_assert!(points.len() >= 2);
        Self {
            name: name.to_string(),
            points: points.iter().copied().map(LatLng::from).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    pub fn start(&self) -> LatLng {
        self.points[0]
    }

    pub fn end(&self) -> LatLng {
        self.points[self.points.len() - 1]
    }
}
