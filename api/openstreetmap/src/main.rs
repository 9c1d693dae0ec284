use openstreetmap::{MapView, OpenStreetMapAPI};
use snowmaking::Catalog;
use std::env;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    pretty_env_logger::init();

    println!("OpenStreetMap Ski Area Map Downloader");

    let catalog = Catalog::demo();
    let args: Vec<String> = env::args().collect();
    let site = match args.get(1) {
        Some(name) => catalog
            .find_site(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown ski area: {}", name))?,
        None => catalog
            .default_site()
            .ok_or_else(|| anyhow::anyhow!("Catalog has no ski areas"))?,
    };

    let view = MapView::for_site(site);
    let (width, height) = (800, 600);

    println!("Ski area: {}", site.name);
    println!("Center: {}, zoom level: {}", view.center, view.zoom());

    let api = OpenStreetMapAPI::new()?;
    let output_path = Path::new("output.png");
    match api.download_and_save_view(&view, width, height, output_path).await {
        Ok(_) => {
            println!("Successfully downloaded and saved map!");
        }
        Err(e) => {
            println!("Error downloading map: {}", e);
        }
    }

    Ok(())
}
