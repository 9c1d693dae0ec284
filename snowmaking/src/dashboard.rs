//! Selection state behind the dashboard.
//!
//! The state is a plain value: selecting a ski area swaps in fresh snowgun and
//! run lists from the [`Catalog`], and clicks on markers or routes only move
//! the selection. Renderers read [`MarkerStyle`] and [`RouteStyle`] back out.

use anyhow::{anyhow, Result};
use log::*;

use crate::catalog::{Catalog, SkiArea};
use crate::run::Run;
use crate::snowgun::Snowgun;

pub const WINDOW_TITLE: &str = "Snowmaking MVP Dashboard";

/// Colors used for markers and routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Red,
    Yellow,
    Black,
    Blue,
}

/// How a snowgun marker is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    /// The marker belongs to the selected snowgun
    pub selected: bool,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_thickness: f64,
    /// Circle diameter in pixels
    pub diameter: f64,
    /// Offset from the anchor so the circle is centered on the location
    pub offset: (f64, f64),
    pub tooltip: String,
}

/// How a run polyline is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStyle {
    pub stroke: Color,
    pub stroke_thickness: f64,
}

const MARKER_DIAMETER: f64 = 20.0;

#[derive(Debug, Clone)]
pub struct DashboardState {
    catalog: Catalog,
    current_site: Option<SkiArea>,
    snowguns: Vec<Snowgun>,
    runs: Vec<Run>,
    selected_snowgun: Option<String>,
    selected_run: Option<String>,
}

impl DashboardState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            current_site: None,
            snowguns: Vec::new(),
            runs: Vec::new(),
            selected_snowgun: None,
            selected_run: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current_site(&self) -> Option<&SkiArea> {
        self.current_site.as_ref()
    }

    pub fn snowguns(&self) -> &[Snowgun] {
        &self.snowguns
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Switch to another ski area.
    ///
    /// The snowgun and run lists are replaced, the first snowgun becomes the
    /// selection and any run highlight is cleared. An unknown name leaves the
    /// state untouched.
    pub fn select_site(&mut self, name: &str) -> Result<&SkiArea> {
        let site = self
            .catalog
            .find_site(name)
            .cloned()
            .ok_or_else(|| anyhow!("Unknown ski area: {}", name))?;

        self.snowguns = self.catalog.snowguns_for(&site.name);
        self.runs = self.catalog.runs_for(&site.name);
        self.selected_snowgun = self.snowguns.first().map(|gun| gun.id.clone());
        self.selected_run = None;

        info!(
            "Selected {} ({} snowguns, {} runs)",
            site.name,
            self.snowguns.len(),
            self.runs.len()
        );

        Ok(&*self.current_site.insert(site))
    }

    pub fn title(&self) -> String {
        match &self.current_site {
            Some(site) => format!("{} - {}", WINDOW_TITLE, site.name),
            None => WINDOW_TITLE.to_string(),
        }
    }

    pub fn select_snowgun(&mut self, id: &str) -> Result<&Snowgun> {
        let index = self
            .snowguns
            .iter()
            .position(|gun| gun.id == id)
            .ok_or_else(|| anyhow!("No snowgun {} at this ski area", id))?;
        debug!("Selected snowgun {}", id);
        self.selected_snowgun = Some(id.to_string());
        Ok(&self.snowguns[index])
    }

    pub fn selected_snowgun(&self) -> Option<&Snowgun> {
        let id = self.selected_snowgun.as_deref()?;
        self.snowguns.iter().find(|gun| gun.id == id)
    }

    fn selected_snowgun_mut(&mut self) -> Result<&mut Snowgun> {
        let id = self
            .selected_snowgun
            .as_deref()
            .ok_or_else(|| anyhow!("No snowgun selected"))?;
        self.snowguns
            .iter_mut()
            .find(|gun| gun.id == id)
            .ok_or_else(|| anyhow!("Selected snowgun {} is gone", id))
    }

    pub fn select_run(&mut self, name: &str) -> Result<&Run> {
        let index = self
            .runs
            .iter()
            .position(|run| run.name() == name)
            .ok_or_else(|| anyhow!("No run named {} at this ski area", name))?;
        debug!("Selected run {}", name);
        self.selected_run = Some(name.to_string());
        Ok(&self.runs[index])
    }

    pub fn selected_run(&self) -> Option<&Run> {
        let name = self.selected_run.as_deref()?;
        self.runs.iter().find(|run| run.name() == name)
    }

    /// Edit the run name of the selected snowgun
    pub fn update_selected_run_name(&mut self, text: &str) -> Result<()> {
        self.selected_snowgun_mut()?.set_run_name(text);
        Ok(())
    }

    /// Edit the hydrant number of the selected snowgun; invalid text keeps the old value
    pub fn update_selected_hydrant_number(&mut self, text: &str) -> Result<u32> {
        let gun = self.selected_snowgun_mut()?;
        match gun.set_hydrant_number_from_text(text) {
            Ok(number) => Ok(number),
            Err(e) => {
                warn!("Rejected hydrant number for {}: {}", gun.id, e);
                Err(e)
            }
        }
    }

    pub fn marker_style(&self, snowgun: &Snowgun) -> MarkerStyle {
        let selected = self.selected_snowgun.as_deref() == Some(snowgun.id.as_str());
        let (stroke, stroke_thickness) = if selected {
            (Color::Yellow, 3.0)
        } else {
            (Color::Black, 1.5)
        };

        MarkerStyle {
            selected,
            fill: if snowgun.status.is_active() { Color::Green } else { Color::Red },
            stroke,
            stroke_thickness,
            diameter: MARKER_DIAMETER,
            offset: (-MARKER_DIAMETER / 2.0, -MARKER_DIAMETER / 2.0),
            tooltip: format!("Snowgun {}\nStatus: {}", snowgun.id, snowgun.status),
        }
    }

    pub fn route_style(&self, run: &Run) -> RouteStyle {
        let selected = self.selected_run.as_deref() == Some(run.name());
        RouteStyle {
            stroke: if selected { Color::Red } else { Color::Blue },
            stroke_thickness: 3.0,
        }
    }
}
