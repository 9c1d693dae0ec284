use openweathermap::{OpenWeatherMapAPI, DEFAULT_CITY};
use std::env;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    pretty_env_logger::init();

    let args: Vec<String> = env::args().collect();
    let city = args.get(1).map(String::as_str).unwrap_or(DEFAULT_CITY);

    let api_key = match env::var("OPENWEATHERMAP_API_KEY") {
        Ok(key) => key,
        Err(_) => {
            eprintln!("Usage: OPENWEATHERMAP_API_KEY=<key> {} [city]", args[0]);
            eprintln!("");
            eprintln!("Examples:");
            eprintln!("  {} \"Big Bear Lake,CA,US\"", args[0]);
            eprintln!("  {} \"Mammoth Lakes,CA,US\"", args[0]);
            std::process::exit(1);
        }
    };

    let api = OpenWeatherMapAPI::new(&api_key)?;

    println!("Fetching current weather for {}...", city);
    let weather = api.fetch_current_weather(city).await?;
    let reading = weather.to_reading();

    println!("{}", serde_json::to_string_pretty(&weather)?);
    println!("Temperature:    {} °F", reading.temperature());
    println!("Humidity:       {} %", reading.humidity());
    println!("Wind:           {} mph @ {}°", reading.wind_speed(), reading.wind_direction());
    println!("Wet bulb:       {:.2} °F", reading.wet_bulb_temperature());

    Ok(())
}
