//! Core of the snowmaking dashboard: the wet-bulb estimator, the weather,
//! snowgun and run records, the static ski-area catalog and the selection
//! state that ties them together.

pub mod catalog;
pub mod dashboard;
pub mod geo;
pub mod run;
pub mod snowgun;
pub mod weather;
pub mod wet_bulb;

pub use catalog::{Catalog, SkiArea};
pub use dashboard::{Color, DashboardState, MarkerStyle, RouteStyle};
pub use geo::LatLng;
pub use run::Run;
pub use snowgun::{Snowgun, Status};
pub use weather::WeatherReading;
pub use wet_bulb::{
    celsius_to_fahrenheit, estimate_wet_bulb_temperature, estimate_wet_bulb_temperature_checked,
    fahrenheit_to_celsius, DomainInputError,
};
