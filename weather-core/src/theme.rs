use crate::model::WeatherPayload;

/// Visual theme selected from the current weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Clear,
    Cloudy,
    Rainy,
    Stormy,
    Snowy,
    Haze,
    Mist,
    Drizzle,
    Foggy,
    Smoky,
    Dusty,
    Sandy,
    Ashy,
    Squally,
    Tornado,
    Hurricane,
    Blizzard,
}

impl Theme {
    pub fn tag(&self) -> &'static str {
        match self {
            Theme::Clear => "clear",
            Theme::Cloudy => "cloudy",
            Theme::Rainy => "rainy",
            Theme::Stormy => "stormy",
            Theme::Snowy => "snowy",
            Theme::Haze => "haze",
            Theme::Mist => "mist",
            Theme::Drizzle => "drizzle",
            Theme::Foggy => "foggy",
            Theme::Smoky => "smoky",
            Theme::Dusty => "dusty",
            Theme::Sandy => "sandy",
            Theme::Ashy => "ashy",
            Theme::Squally => "squally",
            Theme::Tornado => "tornado",
            Theme::Hurricane => "hurricane",
            Theme::Blizzard => "blizzard",
        }
    }

    /// Maps a provider condition (`weather[].main`) to a theme, ignoring case.
    pub fn from_condition(condition: &str) -> Option<Self> {
        let theme = match condition.to_lowercase().as_str() {
            "clear" => Theme::Clear,
            "clouds" => Theme::Cloudy,
            "rain" => Theme::Rainy,
            "thunderstorm" => Theme::Stormy,
            "snow" => Theme::Snowy,
            "haze" => Theme::Haze,
            "mist" => Theme::Mist,
            "drizzle" => Theme::Drizzle,
            "fog" => Theme::Foggy,
            "smoke" => Theme::Smoky,
            "dust" => Theme::Dusty,
            "sand" => Theme::Sandy,
            "ash" => Theme::Ashy,
            "squall" => Theme::Squally,
            "tornado" => Theme::Tornado,
            "hurricane" => Theme::Hurricane,
            "blizzard" => Theme::Blizzard,
            _ => return None,
        };

        Some(theme)
    }

    /// Light backgrounds need dark foreground controls.
    pub fn prefers_dark_foreground(&self) -> bool {
        matches!(self, Theme::Snowy | Theme::Haze | Theme::Mist)
    }

    pub const fn all() -> &'static [Theme] {
        &[
            Theme::Clear,
            Theme::Cloudy,
            Theme::Rainy,
            Theme::Stormy,
            Theme::Snowy,
            Theme::Haze,
            Theme::Mist,
            Theme::Drizzle,
            Theme::Foggy,
            Theme::Smoky,
            Theme::Dusty,
            Theme::Sandy,
            Theme::Ashy,
            Theme::Squally,
            Theme::Tornado,
            Theme::Hurricane,
            Theme::Blizzard,
        ]
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Theme for the first current condition of `payload`.
pub fn classify(payload: Option<&WeatherPayload>) -> Option<Theme> {
    payload?.condition().and_then(Theme::from_condition)
}

/// Same as [`classify`], but as a tag where "no theme" is the empty string.
pub fn theme_tag(payload: Option<&WeatherPayload>) -> &'static str {
    classify(payload).map_or("", |t| t.tag())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;

    const CONDITIONS: &[(&str, &str)] = &[
        ("Clear", "clear"),
        ("Clouds", "cloudy"),
        ("Rain", "rainy"),
        ("Thunderstorm", "stormy"),
        ("Snow", "snowy"),
        ("Haze", "haze"),
        ("Mist", "mist"),
        ("Drizzle", "drizzle"),
        ("Fog", "foggy"),
        ("Smoke", "smoky"),
        ("Dust", "dusty"),
        ("Sand", "sandy"),
        ("Ash", "ashy"),
        ("Squall", "squally"),
        ("Tornado", "tornado"),
        ("Hurricane", "hurricane"),
        ("Blizzard", "blizzard"),
    ];

    #[test]
    fn every_known_condition_maps_to_its_tag() {
        for (main, tag) in CONDITIONS {
            let payload = fixtures::payload(main, 2);
            assert_eq!(theme_tag(Some(&payload)), *tag, "condition {main}");
        }
        assert_eq!(CONDITIONS.len(), Theme::all().len());
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(Theme::from_condition("CLOUDS"), Some(Theme::Cloudy));
        assert_eq!(Theme::from_condition("thunderSTORM"), Some(Theme::Stormy));
    }

    #[test]
    fn unknown_condition_has_no_theme() {
        for main in ["Cloudy", "Sunny", "", " clear", "Rainy"] {
            let payload = fixtures::payload(main, 1);
            assert_eq!(classify(Some(&payload)), None, "condition {main:?}");
            assert_eq!(theme_tag(Some(&payload)), "");
        }
    }

    #[test]
    fn no_payload_has_no_theme() {
        assert_eq!(classify(None), None);
        assert_eq!(theme_tag(None), "");
    }

    #[test]
    fn empty_condition_list_has_no_theme() {
        let mut payload = fixtures::payload("Clear", 1);
        payload.current.weather.clear();
        assert_eq!(classify(Some(&payload)), None);
    }

    #[test]
    fn light_themes_prefer_dark_foreground() {
        let dark: Vec<_> = Theme::all().iter().filter(|t| t.prefers_dark_foreground()).collect();
        assert_eq!(dark, vec![&Theme::Snowy, &Theme::Haze, &Theme::Mist]);
    }
}
