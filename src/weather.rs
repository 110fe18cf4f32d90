//! Mock Weather Provider
//!
//! Fixed conditions and advisories keyed only on whether a location has been
//! marked — the sole upstream signal the aggregate provides. A live weather
//! service would slot in behind these two free functions.

use serde::Serialize;

use crate::location::MarkedLocation;

/// Advisory severity, with the panel accent colors for each level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorySeverity {
    Low,
    Medium,
    High,
}

impl AdvisorySeverity {
    pub fn label(&self) -> &'static str {
        match self {
            AdvisorySeverity::Low => "Low",
            AdvisorySeverity::Medium => "Medium",
            AdvisorySeverity::High => "High",
        }
    }

    /// Left-border accent of the advisory panel.
    pub fn css_class(&self) -> &'static str {
        match self {
            AdvisorySeverity::Low => "border-l-yellow-500 bg-yellow-50",
            AdvisorySeverity::Medium => "border-l-orange-500 bg-orange-50",
            AdvisorySeverity::High => "border-l-red-500 bg-red-50",
        }
    }

    /// Severity pill shown in the panel header.
    pub fn badge_class(&self) -> &'static str {
        match self {
            AdvisorySeverity::Low => "bg-yellow-100 text-yellow-700",
            AdvisorySeverity::Medium => "bg-orange-100 text-orange-700",
            AdvisorySeverity::High => "bg-red-100 text-red-700",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyForecast {
    pub day: &'static str,
    pub condition: &'static str,
    pub high_c: f64,
    pub low_c: f64,
    pub rain_chance_pct: u8,
}

/// Current conditions plus the 5-day forecast.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherSnapshot {
    pub location_label: String,
    pub condition: &'static str,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_kmh: f64,
    pub rainfall_mm: f64,
    pub visibility_km: f64,
    pub uv_index: u8,
    pub forecast: Vec<DailyForecast>,
}

/// Mock current conditions for a marked location.
pub fn current_outlook(location: &MarkedLocation) -> WeatherSnapshot {
    WeatherSnapshot {
        location_label: location.label().to_string(),
        condition: "Partly Cloudy",
        temperature_c: 28.0,
        feels_like_c: 32.0,
        humidity_pct: 68.0,
        wind_speed_kmh: 12.0,
        rainfall_mm: 2.5,
        visibility_km: 10.0,
        uv_index: 6,
        forecast: vec![
            DailyForecast {
                day: "Today",
                condition: "Partly Cloudy",
                high_c: 32.0,
                low_c: 24.0,
                rain_chance_pct: 20,
            },
            DailyForecast {
                day: "Tomorrow",
                condition: "Sunny",
                high_c: 30.0,
                low_c: 22.0,
                rain_chance_pct: 0,
            },
            DailyForecast {
                day: "Wednesday",
                condition: "Cloudy",
                high_c: 29.0,
                low_c: 21.0,
                rain_chance_pct: 40,
            },
            DailyForecast {
                day: "Thursday",
                condition: "Rainy",
                high_c: 27.0,
                low_c: 20.0,
                rain_chance_pct: 80,
            },
            DailyForecast {
                day: "Friday",
                condition: "Sunny",
                high_c: 31.0,
                low_c: 23.0,
                rain_chance_pct: 10,
            },
        ],
    }
}

/// One active advisory with its protective measures.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherAdvisory {
    pub kind: &'static str,
    pub severity: AdvisorySeverity,
    pub message: &'static str,
    pub measures: &'static [&'static str],
}

/// Mock advisory list for a marked location.
pub fn active_advisories(_location: &MarkedLocation) -> Vec<WeatherAdvisory> {
    vec![
        WeatherAdvisory {
            kind: "Heavy Rainfall",
            severity: AdvisorySeverity::High,
            message: "Heavy rainfall expected in the next 24 hours. 50-80mm precipitation predicted.",
            measures: &[
                "Ensure proper drainage in fields",
                "Cover harvested crops",
                "Avoid field operations during heavy rain",
                "Check irrigation systems for potential flooding",
            ],
        },
        WeatherAdvisory {
            kind: "Heat Wave",
            severity: AdvisorySeverity::Medium,
            message: "Temperature may rise above 40°C for the next 3 days.",
            measures: &[
                "Increase irrigation frequency",
                "Provide shade for sensitive crops",
                "Apply mulching to retain soil moisture",
                "Monitor crops for heat stress symptoms",
            ],
        },
        WeatherAdvisory {
            kind: "Frost Warning",
            severity: AdvisorySeverity::Low,
            message: "Frost possible in early morning hours next week.",
            measures: &[
                "Cover young plants overnight",
                "Use frost protection cloth",
                "Avoid overhead irrigation before dawn",
                "Harvest mature crops if possible",
            ],
        },
    ]
}
