use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}N {}E", self.lat, self.lon)
    }
}

/// One entry of a provider `weather` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    #[serde(default)]
    pub temp: Option<f64>,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    /// Absent during polar night and midnight sun.
    #[serde(default)]
    pub sunrise: Option<i64>,
    #[serde(default)]
    pub sunset: Option<i64>,
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTemp {
    pub day: f64,
    pub night: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub dt: i64,
    pub weather: Vec<Condition>,
    pub temp: DailyTemp,
}

impl DailyForecast {
    pub fn icon(&self) -> Option<&str> {
        self.weather.first().map(|w| w.icon.as_str())
    }
}

/// Current + daily forecast for one location, as returned by the forecast endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPayload {
    pub lat: f64,
    pub lon: f64,
    pub timezone: String,
    /// Shift from UTC in seconds for `timezone`.
    #[serde(default)]
    pub timezone_offset: i32,
    pub current: CurrentConditions,
    pub daily: Vec<DailyForecast>,
}

impl WeatherPayload {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }

    /// The `main` field of the first current condition, if any.
    pub fn condition(&self) -> Option<&str> {
        self.current.weather.first().map(|w| w.main.as_str())
    }

    pub fn today(&self) -> Option<&DailyForecast> {
        self.daily.first()
    }

    /// Daily entries after today.
    pub fn upcoming(&self) -> &[DailyForecast] {
        self.daily.get(1..).unwrap_or_default()
    }

    /// UTC offset of the forecast location; falls back to UTC on out-of-range values.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.timezone_offset).unwrap_or_else(|| Utc.fix())
    }

    /// Converts a provider unix timestamp into the location's local time.
    pub fn local_time(&self, ts: i64) -> Option<DateTime<FixedOffset>> {
        DateTime::from_timestamp(ts, 0).map(|dt| dt.with_timezone(&self.offset()))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn condition(main: &str, icon: &str) -> Condition {
        Condition { main: main.to_string(), description: String::new(), icon: icon.to_string() }
    }

    pub fn day(dt: i64, icon: &str, day: f64, night: f64) -> DailyForecast {
        DailyForecast { dt, weather: vec![condition("Clear", icon)], temp: DailyTemp { day, night } }
    }

    pub fn payload(main: &str, days: usize) -> WeatherPayload {
        WeatherPayload {
            lat: 27.7172,
            lon: 85.324,
            timezone: "Asia/Kathmandu".to_string(),
            timezone_offset: 20_700,
            current: CurrentConditions {
                temp: Some(21.5),
                humidity: 60.0,
                pressure: 1012.0,
                wind_speed: 3.6,
                sunrise: Some(1_700_000_000),
                sunset: Some(1_700_040_000),
                weather: vec![condition(main, "01d")],
            },
            daily: (0..days)
                .map(|i| day(1_700_000_000 + i as i64 * 86_400, "01d", 22.0, 9.0))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_onecall_shape() {
        let json = r#"{
            "lat": 27.7172, "lon": 85.324,
            "timezone": "Asia/Kathmandu", "timezone_offset": 20700,
            "current": {
                "dt": 1700000000, "sunrise": 1699990000, "sunset": 1700030000,
                "temp": 18.2, "pressure": 1015, "humidity": 55, "wind_speed": 1.5,
                "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}]
            },
            "daily": [
                {"dt": 1700000000, "temp": {"day": 20.1, "min": 8.0, "max": 21.0, "night": 10.2},
                 "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}]},
                {"dt": 1700086400, "temp": {"day": 19.0, "night": 9.5},
                 "weather": [{"id": 500, "main": "Rain", "icon": "10d"}]}
            ]
        }"#;

        let payload: WeatherPayload = serde_json::from_str(json).expect("valid payload");

        assert_eq!(payload.condition(), Some("Clear"));
        assert_eq!(payload.current.pressure, 1015.0);
        assert_eq!(payload.daily.len(), 2);
        assert_eq!(payload.upcoming().len(), 1);
        assert_eq!(payload.upcoming()[0].icon(), Some("10d"));
        assert_eq!(payload.coordinates(), Coordinates::new(27.7172, 85.324));
    }

    #[test]
    fn decodes_polar_day_without_sun_times() {
        let json = r#"{
            "lat": 78.2232, "lon": 15.6267,
            "timezone": "Arctic/Longyearbyen", "timezone_offset": 7200,
            "current": {
                "dt": 1719835200, "temp": 7.1, "pressure": 1009, "humidity": 81, "wind_speed": 4.2,
                "weather": [{"id": 803, "main": "Clouds", "icon": "04d"}]
            },
            "daily": [
                {"dt": 1719835200, "temp": {"day": 7.5, "night": 5.9},
                 "weather": [{"id": 803, "main": "Clouds", "icon": "04d"}]}
            ]
        }"#;

        let payload: WeatherPayload = serde_json::from_str(json).expect("decodes without sun times");

        assert_eq!(payload.current.sunrise, None);
        assert_eq!(payload.current.sunset, None);
        assert_eq!(payload.condition(), Some("Clouds"));
    }

    #[test]
    fn missing_current_is_a_decode_error() {
        let json = r#"{"cod": 401, "message": "Invalid API key"}"#;
        assert!(serde_json::from_str::<WeatherPayload>(json).is_err());
    }

    #[test]
    fn upcoming_is_empty_for_single_day() {
        let payload = fixtures::payload("Clear", 1);
        assert!(payload.today().is_some());
        assert!(payload.upcoming().is_empty());

        let empty = fixtures::payload("Clear", 0);
        assert!(empty.today().is_none());
        assert!(empty.upcoming().is_empty());
    }

    #[test]
    fn local_time_applies_location_offset() {
        let payload = fixtures::payload("Clear", 1);
        let local = payload.local_time(0).expect("epoch is representable");
        assert_eq!(local.format("%H:%M").to_string(), "05:45");
    }

    #[test]
    fn coordinates_display() {
        assert_eq!(Coordinates::new(27.7172, 85.324).to_string(), "27.7172N 85.324E");
    }
}
