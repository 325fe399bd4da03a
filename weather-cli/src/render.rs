//! Plain-text rendering of the view state.
//!
//! Everything here is pure: callers pass the clock in, and only
//! [`themed_header`] emits ANSI styling.

use chrono::{DateTime, Utc};
use crossterm::style::{Color, Stylize};
use weather_core::{DailyForecast, Theme, ViewState, WeatherPayload};

const TIME_FORMAT: &str = "%I:%M %p";

/// Whole screen: header, current metrics, forecast.
pub fn view(state: &ViewState, now: DateTime<Utc>) -> String {
    let mut out = themed_header(state.theme());
    out.push('\n');

    match state.weather() {
        Some(payload) => {
            out.push_str(&current(payload, now));
            out.push('\n');
            out.push_str(&forecast(payload));
        }
        None => out.push_str("  No weather loaded yet.\n"),
    }

    out
}

/// Banner coloured after the theme; unthemed conditions get no background.
pub fn themed_header(theme: Option<Theme>) -> String {
    let label = format!(" weather {} ", theme.map_or("", |t| t.tag()));

    let Some(theme) = theme else {
        return label.bold().to_string();
    };

    let fg = if theme.prefers_dark_foreground() { Color::Black } else { Color::White };
    label.with(fg).on(background(theme)).bold().to_string()
}

fn background(theme: Theme) -> Color {
    match theme {
        Theme::Clear => Color::DarkYellow,
        Theme::Cloudy => Color::DarkGrey,
        Theme::Rainy | Theme::Drizzle => Color::DarkBlue,
        Theme::Stormy | Theme::Squally => Color::DarkMagenta,
        Theme::Snowy | Theme::Blizzard => Color::White,
        Theme::Haze | Theme::Mist | Theme::Foggy => Color::Grey,
        Theme::Smoky | Theme::Ashy => Color::Black,
        Theme::Dusty | Theme::Sandy => Color::Yellow,
        Theme::Tornado | Theme::Hurricane => Color::DarkRed,
    }
}

/// Clock, current metrics, timezone and coordinates.
pub fn current(payload: &WeatherPayload, now: DateTime<Utc>) -> String {
    let local_now = now.with_timezone(&payload.offset());
    let at = |ts: Option<i64>| {
        ts.and_then(|ts| payload.local_time(ts))
            .map_or_else(|| "--".to_string(), |t| t.format(TIME_FORMAT).to_string())
    };
    let c = &payload.current;

    let mut out = String::new();
    out.push_str(&format!("  {}\n", local_now.format(TIME_FORMAT)));
    out.push_str(&format!("  {}\n\n", local_now.format("%A, %d %b")));
    out.push_str(&format!("  {:<12}{}%\n", "Humidity", c.humidity));
    out.push_str(&format!("  {:<12}{}\n", "Pressure", c.pressure));
    out.push_str(&format!("  {:<12}{}\n", "Wind Speed", c.wind_speed));
    out.push_str(&format!("  {:<12}{}\n", "Sunrise", at(c.sunrise)));
    out.push_str(&format!("  {:<12}{}\n\n", "Sunset", at(c.sunset)));
    out.push_str(&format!("  {:<12}{}\n", "Time Zone", payload.timezone));
    out.push_str(&format!("  {}\n", payload.coordinates()));
    out
}

/// "Today" block from the first daily entry, then one line per later day.
pub fn forecast(payload: &WeatherPayload) -> String {
    let Some(today) = payload.today() else {
        return String::new();
    };

    let mut out = format!(
        "  Today  {} {}  {}\n",
        day_name(payload, today, "%A"),
        icon_glyph(today.icon()),
        temps(today),
    );
    for line in forecast_strip(payload) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// One line per daily entry after today.
pub fn forecast_strip(payload: &WeatherPayload) -> Vec<String> {
    payload
        .upcoming()
        .iter()
        .map(|day| format!("  {:<5}  {}  {}", day_name(payload, day, "%a"), icon_glyph(day.icon()), temps(day)))
        .collect()
}

fn day_name(payload: &WeatherPayload, day: &DailyForecast, fmt: &str) -> String {
    payload.local_time(day.dt).map_or_else(|| "?".to_string(), |t| t.format(fmt).to_string())
}

fn temps(day: &DailyForecast) -> String {
    format!("Night - {}°C  Day - {}°C", day.temp.night, day.temp.day)
}

/// Terminal stand-in for the provider's icon images (`01d`, `10n`, ...).
pub fn icon_glyph(icon: Option<&str>) -> &'static str {
    match icon.and_then(|i| i.get(..2)) {
        Some("01") => "☀",
        Some("02") => "⛅",
        Some("03") | Some("04") => "☁",
        Some("09") | Some("10") => "🌧",
        Some("11") => "⛈",
        Some("13") => "❄",
        Some("50") => "🌫",
        _ => "·",
    }
}

/// Boxed popup around a notification message.
pub fn popup(message: &str) -> String {
    let width = message.chars().count() + 2;
    let bar = "─".repeat(width);
    format!("┌{bar}┐\n│ {message} │\n└{bar}┘")
}
