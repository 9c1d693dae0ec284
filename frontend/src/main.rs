mod app;

extern crate pretty_env_logger;
#[macro_use] extern crate log;

use anyhow::{anyhow, Result};
use clap::Parser;
use openstreetmap::MapView;
use snowmaking::{Catalog, DashboardState};
use std::time::Duration;

use app::cli::Options;
use app::config::Config;

fn main() -> Result<()> {
    pretty_env_logger::init();

    let options = Options::parse();

    info!("Starting snowmaking dashboard...");

    let config = app::config::load_config()?;
    let catalog = match &config.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::demo(),
    };

    let mut state = DashboardState::new(catalog);
    let mut view = MapView::initial();
    select_from_options(&mut state, &mut view, &options)?;

    let rt = tokio::runtime::Runtime::new()?;

    let panel = rt.block_on(app::weather::update_weather_panel(&config));
    print!("{}", app::display::render_weather(&panel));
    println!();
    print!("{}", app::display::render_site(&state, &view));

    if options.map {
        match rt.block_on(app::map::fetch_map_image(&view)) {
            Ok(path) => println!("\nMap saved to {}", path.display()),
            Err(e) => {
                error!("Failed to load map image: {}", e);
                println!("\nFailed to load map image: {}", e);
            }
        }
    }

    if let Some(seconds) = options.watch {
        rt.block_on(watch_weather(&config, Duration::from_secs(seconds)))?;
    }

    info!("Snowmaking dashboard finished");
    Ok(())
}

/// Apply the site, selection and edits requested on the command line
fn select_from_options(state: &mut DashboardState, view: &mut MapView, options: &Options) -> Result<()> {
    let site_name = match &options.site {
        Some(name) => name.clone(),
        None => state
            .catalog()
            .default_site()
            .map(|site| site.name.clone())
            .ok_or_else(|| anyhow!("Catalog has no ski areas"))?,
    };

    let site = state.select_site(&site_name)?;
    view.show_site(site);

    if let Some(id) = &options.snowgun {
        state.select_snowgun(id)?;
    }
    if let Some(run) = &options.run {
        state.select_run(run)?;
    }
    if let Some(text) = &options.set_run {
        state.update_selected_run_name(text)?;
    }
    if let Some(text) = &options.set_hydrant {
        // Bad input is reported and the old number kept
        if let Err(e) = state.update_selected_hydrant_number(text) {
            println!("Invalid Input: {}", e);
        }
    }
    Ok(())
}

/// Re-fetch the weather on a fixed interval until Ctrl-C
async fn watch_weather(config: &Config, period: Duration) -> Result<()> {
    let mut interval = tokio::time::interval(period);
    interval.tick().await; // Skip immediate first trigger

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let panel = app::weather::update_weather_panel(config).await;
                println!();
                println!("[{}]", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
                print!("{}", app::display::render_weather(&panel));
            }
            result = tokio::signal::ctrl_c() => {
                result?;
                info!("Interrupted, stopping weather refresh");
                return Ok(());
            }
        }
    }
}
