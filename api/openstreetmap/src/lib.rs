use futures::future::try_join_all;
use image::{DynamicImage, GenericImage};
use log::*;
use reqwest::Client;
use snowmaking::{LatLng, SkiArea};
use std::path::Path;

pub const TILE_SIZE: u32 = 256;

/// Closest zoom the dashboard allows
pub const MAX_ZOOM: u32 = 18;
/// Farthest zoom the dashboard allows
pub const MIN_ZOOM: u32 = 13;

/// Deepest zoom level the tile servers publish
pub const MAX_TILE_ZOOM: u32 = 19;

/// What part of the map is on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: LatLng,
    zoom: u32,
    min_zoom: u32,
    max_zoom: u32,
}

impl MapView {
    /// A view clamped to the dashboard's zoom range
    pub fn new(center: LatLng, zoom: u32) -> Self {
        let mut view = Self {
            center,
            zoom,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        };
        view.set_zoom(zoom);
        view
    }

    /// The view shown before any ski area is picked (Big Bear Lake)
    pub fn initial() -> Self {
        Self::new(LatLng::new(34.2439, -116.9114), 15)
    }

    pub fn for_site(site: &SkiArea) -> Self {
        Self::new(site.location, site.zoom_level)
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn zoom_range(&self) -> (u32, u32) {
        (self.min_zoom, self.max_zoom)
    }

    pub fn set_zoom(&mut self, zoom: u32) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Move to another ski area's center and zoom
    pub fn show_site(&mut self, site: &SkiArea) {
        self.center = site.location;
        self.set_zoom(site.zoom_level);
    }

    /// Top-left corner of a `width` x `height` viewport, in global pixels
    fn origin(&self, width: u32, height: u32) -> (f64, f64) {
        let (cx, cy) = lat_lon_to_pixel(self.center, self.zoom);
        (cx - width as f64 / 2.0, cy - height as f64 / 2.0)
    }

    /// Where `point` lands inside a `width` x `height` viewport, in pixels from the top-left
    pub fn project(&self, point: LatLng, width: u32, height: u32) -> (f64, f64) {
        let (left, top) = self.origin(width, height);
        let (px, py) = lat_lon_to_pixel(point, self.zoom);
        (px - left, py - top)
    }

    /// Whether `point` falls inside a `width` x `height` viewport
    pub fn contains(&self, point: LatLng, width: u32, height: u32) -> bool {
        let (x, y) = self.project(point, width, height);
        x >= 0.0 && y >= 0.0 && x < width as f64 && y < height as f64
    }

    /// Inclusive tile ranges `(x_start, x_end, y_start, y_end)` covering the viewport
    pub fn tile_range(&self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let (left, top) = self.origin(width, height);
        let last = tiles_per_side(self.zoom) - 1;
        let to_tile = |pixel: f64| ((pixel / TILE_SIZE as f64).floor().max(0.0) as u32).min(last);

        (
            to_tile(left),
            to_tile(left + width as f64 - 1.0),
            to_tile(top),
            to_tile(top + height as f64 - 1.0),
        )
    }
}

/// Tiles along one edge of the world at zoom z; z is capped at [`MAX_TILE_ZOOM`]
fn tiles_per_side(zoom: u32) -> u32 {
    1 << zoom.min(MAX_TILE_ZOOM)
}

/// Convert lat/lon to OSM tile number at zoom z (capped at [`MAX_TILE_ZOOM`])
pub fn lat_lon_to_tile(point: LatLng, zoom: u32) -> (u32, u32) {
    let last = tiles_per_side(zoom) - 1;
    let (x, y) = lat_lon_to_pixel(point, zoom);
    let to_tile = |pixel: f64| ((pixel / TILE_SIZE as f64).floor().max(0.0) as u32).min(last);
    (to_tile(x), to_tile(y))
}

/// Convert lat/lon to global pixel coordinates at zoom z (Web Mercator,
/// z capped at [`MAX_TILE_ZOOM`])
pub fn lat_lon_to_pixel(point: LatLng, zoom: u32) -> (f64, f64) {
    let lat_rad = point.lat.to_radians();
    let n = TILE_SIZE as f64 * tiles_per_side(zoom) as f64;
    let x = ((point.lng + 180.0) / 360.0) * n;
    let y = ((1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0) * n;
    (x, y)
}

/// OpenStreetMap tile API client
pub struct OpenStreetMapAPI {
    client: Client,
    tile_url: String,
}

impl OpenStreetMapAPI {
    /// Create a new OpenStreetMapAPI instance
    pub fn new() -> Result<Self, anyhow::Error> {
        // The tile servers reject requests without an identifying user agent
        let client = Client::builder()
            .user_agent(concat!("snowmaking-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            tile_url: "https://tile.openstreetmap.org".to_string(),
        })
    }

    fn tile_url(&self, z: u32, x: u32, y: u32) -> String {
        format!("{}/{}/{}/{}.png", self.tile_url, z, x, y)
    }

    /// Download a single tile as an image
    pub async fn download_tile(&self, z: u32, x: u32, y: u32) -> Result<DynamicImage, anyhow::Error> {
        let url = self.tile_url(z, x, y);
        debug!("Downloading {}", url);
        let resp = self.client.get(&url).send().await?;
        if resp.status().is_success() {
            let bytes = resp.bytes().await?;
            Ok(image::load_from_memory(&bytes)?)
        } else {
            Err(anyhow::anyhow!("Failed to download tile: HTTP {} - URL: {}", resp.status(), url))
        }
    }

    /// Download the tiles behind a viewport and crop them to its exact size
    pub async fn download_view(&self, view: &MapView, width: u32, height: u32) -> Result<DynamicImage, anyhow::Error> {
        let zoom = view.zoom();
        let (x_start, x_end, y_start, y_end) = view.tile_range(width, height);

        let positions: Vec<(u32, u32)> = (y_start..=y_end)
            .flat_map(|y| (x_start..=x_end).map(move |x| (x, y)))
            .collect();
        info!("Downloading {} tiles at zoom {} around {}", positions.len(), zoom, view.center);

        let tiles = try_join_all(positions.iter().map(|&(x, y)| self.download_tile(zoom, x, y))).await?;

        let columns = x_end - x_start + 1;
        let rows = y_end - y_start + 1;
        let mut stitched = DynamicImage::new_rgb8(columns * TILE_SIZE, rows * TILE_SIZE);
        for (&(x, y), tile) in positions.iter().zip(tiles.iter()) {
            stitched.copy_from(tile, (x - x_start) * TILE_SIZE, (y - y_start) * TILE_SIZE)?;
        }

        let (left, top) = view.origin(width, height);
        let offset_x = (left - (x_start * TILE_SIZE) as f64).max(0.0) as u32;
        let offset_y = (top - (y_start * TILE_SIZE) as f64).max(0.0) as u32;

        Ok(stitched.crop_imm(offset_x, offset_y, width, height))
    }

    /// Download a viewport and save it as an image file
    pub async fn download_and_save_view(
        &self,
        view: &MapView,
        width: u32,
        height: u32,
        output_path: &Path,
    ) -> Result<(), anyhow::Error> {
        let image = self.download_view(view, width, height).await?;
        image.save(output_path)?;
        info!("Saved map to {:?}", output_path);
        Ok(())
    }
}
