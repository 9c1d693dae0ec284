use snowmaking::Color;

pub fn format_temperature(temp_f: f64) -> String {
    format!("{} °F", temp_f)
}

pub fn format_humidity(humidity: f64) -> String {
    format!("{} %", humidity)
}

pub fn format_wind_speed(speed: f64) -> String {
    format!("{} mph", speed)
}

pub fn format_wind_direction(degrees: f64) -> String {
    format!("{}°", degrees)
}

/// Wet bulb is the number operators act on, so it always shows two decimals
pub fn format_wet_bulb(temp_f: f64) -> String {
    format!("{:.2} °F", temp_f)
}

pub fn color_name(color: Color) -> &'static str {
    match color {
        Color::Green => "green",
        Color::Red => "red",
        Color::Yellow => "yellow",
        Color::Black => "black",
        Color::Blue => "blue",
    }
}
