use anyhow::{bail, Context, Result};
use log::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::geo::LatLng;
use crate::run::Run;
use crate::snowgun::{Snowgun, Status};
use crate::weather::WeatherReading;

/// A ski area shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkiArea {
    pub name: String,
    /// Map center when the area is selected
    pub location: LatLng,
    /// Map zoom level when the area is selected
    pub zoom_level: u32,
}

/// Everything the dashboard knows about one ski area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SiteEntry {
    #[serde(flatten)]
    site: SkiArea,
    #[serde(default)]
    snowguns: Vec<Snowgun>,
    #[serde(default)]
    runs: Vec<Run>,
}

/// Static reference data: ski areas with their snowguns and runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    sites: Vec<SiteEntry>,
}

impl Catalog {
    /// The built-in demo data for the Big Bear area
    pub fn demo() -> Self {
        let bear_mountain = SiteEntry {
            site: SkiArea {
                name: "Bear Mountain, CA".to_string(),
                location: LatLng::new(34.2439, -116.9114),
                zoom_level: 14,
            },
            snowguns: vec![Snowgun::new("RAT-001", LatLng::new(34.2439, -116.9114), Status::Active)
                .with_type("Compression Gun")
                .with_nozzle("Standard")
                .with_run("Summit Run")
                .with_hydrant_number(12)
                .with_weather(WeatherReading::new("RAT-001", 28.5, 65.0, 5.0, 90.0))],
            runs: vec![Run::from_trusted(
                "Chair 9 Run",
                &[(34.2420, -116.9130), (34.2430, -116.9120), (34.2440, -116.9110)],
            )],
        };

        let snow_valley = SiteEntry {
            site: SkiArea {
                name: "Snow Valley, CA".to_string(),
                location: LatLng::new(34.21979912472986, -117.03464925387631),
                zoom_level: 14,
            },
            snowguns: vec![Snowgun::new("SG-101", LatLng::new(34.2200, -117.0350), Status::Active)
                .with_type("Fan Gun")
                .with_nozzle("High-Efficiency")
                .with_run("Expert Run")
                .with_hydrant_number(5)
                .with_weather(WeatherReading::new("SG-101", 26.0, 70.0, 7.0, 80.0))],
            runs: vec![Run::from_trusted(
                "Expert Run",
                &[(34.2200, -117.0350), (34.2210, -117.0340), (34.2220, -117.0330)],
            )],
        };

        // Listed on the map, no equipment yet
        let snow_summit = SiteEntry {
            site: SkiArea {
                name: "Snow Summit, CA".to_string(),
                location: LatLng::new(34.230654, -116.891155),
                zoom_level: 14,
            },
            snowguns: Vec::new(),
            runs: Vec::new(),
        };

        Self {
            sites: vec![bear_mountain, snow_valley, snow_summit],
        }
    }

    /// Parse a catalog from JSON and check it for duplicate names and ids
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json).context("Invalid catalog JSON")?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading catalog from {:?}", path);
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {:?}", path))?;
        let catalog = Self::from_json_str(&content)?;
        info!("Loaded {} ski areas", catalog.sites.len());
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        if self.sites.is_empty() {
            bail!("catalog has no ski areas");
        }

        let mut names = HashSet::new();
        for entry in &self.sites {
            if !names.insert(entry.site.name.as_str()) {
                bail!("duplicate ski area {:?}", entry.site.name);
            }

            let mut ids = HashSet::new();
            for gun in &entry.snowguns {
                if !ids.insert(gun.id.as_str()) {
                    bail!("duplicate snowgun id {:?} in {:?}", gun.id, entry.site.name);
                }
            }
        }
        Ok(())
    }

    pub fn sites(&self) -> impl Iterator<Item = &SkiArea> {
        self.sites.iter().map(|entry| &entry.site)
    }

    /// First ski area, selected when the dashboard opens
    pub fn default_site(&self) -> Option<&SkiArea> {
        self.sites.first().map(|entry| &entry.site)
    }

    pub fn find_site(&self, name: &str) -> Option<&SkiArea> {
        self.entry(name).map(|entry| &entry.site)
    }

    /// A fresh copy of the snowguns for a ski area; unknown areas have none
    pub fn snowguns_for(&self, site_name: &str) -> Vec<Snowgun> {
        self.entry(site_name)
            .map(|entry| entry.snowguns.clone())
            .unwrap_or_default()
    }

    /// A fresh copy of the runs for a ski area; unknown areas have none
    pub fn runs_for(&self, site_name: &str) -> Vec<Run> {
        self.entry(site_name)
            .map(|entry| entry.runs.clone())
            .unwrap_or_default()
    }

    fn entry(&self, name: &str) -> Option<&SiteEntry> {
        self.sites.iter().find(|entry| entry.site.name == name)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::demo()
    }
}
