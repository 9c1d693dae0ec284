use openstreetmap::{MapView, OpenStreetMapAPI};
use std::path::{Path, PathBuf};

/// Viewport size of the saved basemap
pub const MAP_WIDTH: u32 = 800;
pub const MAP_HEIGHT: u32 = 600;

const MAP_DIR: &str = "maps";

/// Cache file for a view: one image per center and zoom
pub fn map_file_path(view: &MapView) -> PathBuf {
    let filename = format!("{}_{}_{}.png", view.center.lat, view.center.lng, view.zoom());
    Path::new(MAP_DIR).join(filename)
}

/// Download the basemap behind a view, or reuse the one already on disk
pub async fn fetch_map_image(view: &MapView) -> Result<PathBuf, anyhow::Error> {
    let filepath = map_file_path(view);

    if filepath.exists() {
        info!("Map file {:?} already exists, loading from disk", filepath);
        return Ok(filepath);
    }

    info!("Map file {:?} does not exist, fetching from OpenStreetMap", filepath);
    std::fs::create_dir_all(MAP_DIR)?;

    let api = OpenStreetMapAPI::new()?;
    api.download_and_save_view(view, MAP_WIDTH, MAP_HEIGHT, &filepath).await?;

    Ok(filepath)
}
