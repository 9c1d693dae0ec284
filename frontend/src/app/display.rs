use openstreetmap::MapView;
use snowmaking::{DashboardState, Snowgun, WeatherReading};
use std::fmt::Write;

use crate::app::map::{MAP_HEIGHT, MAP_WIDTH};
use crate::app::utils::{
    color_name, format_humidity, format_temperature, format_wet_bulb, format_wind_direction,
    format_wind_speed,
};
use crate::app::weather::WeatherPanel;

pub fn render_weather(panel: &WeatherPanel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Weather");
    let _ = writeln!(
        out,
        "  {:<16} {:>10} {:>9} {:>10} {:>6} {:>10}",
        "Source", "Temp", "Humidity", "Wind", "Dir", "Wet bulb"
    );
    for reading in &panel.readings {
        let _ = writeln!(out, "  {}", weather_row(reading));
    }
    if let Some(message) = &panel.error_message {
        let _ = writeln!(out, "  ! {}", message);
    }
    out
}

fn weather_row(reading: &WeatherReading) -> String {
    format!(
        "{:<16} {:>10} {:>9} {:>10} {:>6} {:>10}",
        reading.source_name(),
        format_temperature(reading.temperature()),
        format_humidity(reading.humidity()),
        format_wind_speed(reading.wind_speed()),
        format_wind_direction(reading.wind_direction()),
        format_wet_bulb(reading.wet_bulb_temperature()),
    )
}

/// The info panel for one snowgun, as label/value rows
pub fn snowgun_details(snowgun: &Snowgun) -> Vec<(&'static str, String)> {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    let mut rows = vec![
        ("Id", snowgun.id.clone()),
        ("Status", snowgun.status.to_string()),
        ("Type", text(&snowgun.gun_type)),
        ("Nozzle", text(&snowgun.nozzle)),
        ("Run", text(&snowgun.run)),
        (
            "Hydrant",
            snowgun.hydrant_number.map(|n| n.to_string()).unwrap_or_default(),
        ),
    ];

    if let Some(weather) = &snowgun.weather {
        rows.push(("Temperature", format_temperature(weather.temperature())));
        rows.push(("Humidity", format_humidity(weather.humidity())));
        rows.push(("Wind speed", format_wind_speed(weather.wind_speed())));
        rows.push(("Wind direction", format_wind_direction(weather.wind_direction())));
        rows.push(("Wet bulb", format_wet_bulb(weather.wet_bulb_temperature())));
    }
    rows
}

/// Everything but the weather: title, map view, markers, details and runs
pub fn render_site(state: &DashboardState, view: &MapView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", state.title());

    let (min_zoom, max_zoom) = view.zoom_range();
    let _ = writeln!(
        out,
        "Map: center {}, zoom {} ({}-{})",
        view.center,
        view.zoom(),
        min_zoom,
        max_zoom
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Snowguns");
    if state.snowguns().is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for gun in state.snowguns() {
        let style = state.marker_style(gun);
        let (x, y) = view.project(gun.location, MAP_WIDTH, MAP_HEIGHT);
        let marker = if style.selected { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "  {} {:<10} {:<9} {} fill={} stroke={} at px ({:.0}, {:.0})",
            marker,
            gun.id,
            gun.status,
            gun.location,
            color_name(style.fill),
            color_name(style.stroke),
            x + style.offset.0,
            y + style.offset.1,
        );
    }

    if let Some(selected) = state.selected_snowgun() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Selected snowgun");
        for (label, value) in snowgun_details(selected) {
            let _ = writeln!(out, "  {:<15} {}", format!("{}:", label), value);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Runs");
    if state.runs().is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for run in state.runs() {
        let style = state.route_style(run);
        let points: Vec<String> = run.points().iter().map(ToString::to_string).collect();
        let _ = writeln!(
            out,
            "  {:<14} {:<5} {}",
            run.name(),
            color_name(style.stroke),
            points.join(" -> ")
        );
    }
    out
}
