//! Soil Analysis Form
//!
//! Same whole-struct replace-on-every-edit contract as the farm details
//! form, plus the derived qualitative bands shown next to each reading.
//! Bands are recomputed on demand and never stored.
//!
//! Numeric ranges (pH 0–14, nutrients 0–100, organic matter 0–10) are input
//! hints only: out-of-range values are accepted as-is and merely shift the
//! displayed band.

use serde::{Deserialize, Serialize};

/// Overall soil quality grade, picked directly by the user. Carries no
/// derived computation, only a badge color lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl SoilQuality {
    pub fn all() -> &'static [SoilQuality] {
        &[
            SoilQuality::Excellent,
            SoilQuality::Good,
            SoilQuality::Fair,
            SoilQuality::Poor,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SoilQuality::Excellent => "Excellent",
            SoilQuality::Good => "Good",
            SoilQuality::Fair => "Fair",
            SoilQuality::Poor => "Poor",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "excellent" => Some(SoilQuality::Excellent),
            "good" => Some(SoilQuality::Good),
            "fair" => Some(SoilQuality::Fair),
            "poor" => Some(SoilQuality::Poor),
            _ => None,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            SoilQuality::Excellent => "text-green-600 bg-green-50 border-green-200",
            SoilQuality::Good => "text-blue-600 bg-blue-50 border-blue-200",
            SoilQuality::Fair => "text-yellow-600 bg-yellow-50 border-yellow-200",
            SoilQuality::Poor => "text-red-600 bg-red-50 border-red-200",
        }
    }
}

/// pH band: Acidic below 6.0, Neutral through 8.0 inclusive, Alkaline above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhBand {
    Acidic,
    Neutral,
    Alkaline,
}

impl PhBand {
    pub fn from_ph(ph: f64) -> Self {
        if ph < 6.0 {
            PhBand::Acidic
        } else if ph > 8.0 {
            PhBand::Alkaline
        } else {
            PhBand::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PhBand::Acidic => "Acidic",
            PhBand::Neutral => "Neutral",
            PhBand::Alkaline => "Alkaline",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            PhBand::Acidic => "text-red-500",
            PhBand::Neutral => "text-green-500",
            PhBand::Alkaline => "text-blue-500",
        }
    }
}

/// Nutrient band over percentage readings: Low below 30, Medium through 70
/// inclusive, High above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientBand {
    Low,
    Medium,
    High,
}

impl NutrientBand {
    pub fn from_percent(value: f64) -> Self {
        if value < 30.0 {
            NutrientBand::Low
        } else if value > 70.0 {
            NutrientBand::High
        } else {
            NutrientBand::Medium
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NutrientBand::Low => "Low",
            NutrientBand::Medium => "Medium",
            NutrientBand::High => "High",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            NutrientBand::Low => "text-red-500",
            NutrientBand::Medium => "text-yellow-500",
            NutrientBand::High => "text-green-500",
        }
    }
}

/// Organic matter band: Low below 2.0, Medium through 4.0 inclusive, High
/// above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganicMatterBand {
    Low,
    Medium,
    High,
}

impl OrganicMatterBand {
    pub fn from_percent(value: f64) -> Self {
        if value < 2.0 {
            OrganicMatterBand::Low
        } else if value > 4.0 {
            OrganicMatterBand::High
        } else {
            OrganicMatterBand::Medium
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrganicMatterBand::Low => "Low",
            OrganicMatterBand::Medium => "Medium",
            OrganicMatterBand::High => "High",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            OrganicMatterBand::Low => "text-red-500",
            OrganicMatterBand::Medium => "text-yellow-500",
            OrganicMatterBand::High => "text-green-500",
        }
    }
}

/// The soil profile value handed to the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoilProfile {
    pub quality: Option<SoilQuality>,
    pub ph: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub organic_matter: f64,
}

impl Default for SoilProfile {
    /// Starting values match a typical mid-range sample so the band
    /// readouts mean something before the first edit.
    fn default() -> Self {
        SoilProfile {
            quality: None,
            ph: 7.0,
            nitrogen: 50.0,
            phosphorus: 30.0,
            potassium: 40.0,
            organic_matter: 3.5,
        }
    }
}

impl SoilProfile {
    /// Minimal validity for the prediction gate: an overall quality grade
    /// has been picked.
    pub fn is_minimally_valid(&self) -> bool {
        self.quality.is_some()
    }

    pub fn ph_band(&self) -> PhBand {
        PhBand::from_ph(self.ph)
    }

    pub fn nitrogen_band(&self) -> NutrientBand {
        NutrientBand::from_percent(self.nitrogen)
    }

    pub fn phosphorus_band(&self) -> NutrientBand {
        NutrientBand::from_percent(self.phosphorus)
    }

    pub fn potassium_band(&self) -> NutrientBand {
        NutrientBand::from_percent(self.potassium)
    }

    pub fn organic_matter_band(&self) -> OrganicMatterBand {
        OrganicMatterBand::from_percent(self.organic_matter)
    }
}

/// Edit buffer for the soil analysis panel.
#[derive(Debug, Default)]
pub struct SoilAnalysisForm {
    profile: SoilProfile,
}

impl SoilAnalysisForm {
    pub fn new() -> Self {
        SoilAnalysisForm::default()
    }

    pub fn profile(&self) -> &SoilProfile {
        &self.profile
    }

    pub fn set_quality(&mut self, quality: Option<SoilQuality>) -> SoilProfile {
        self.profile.quality = quality;
        self.profile.clone()
    }

    pub fn set_ph(&mut self, ph: f64) -> SoilProfile {
        self.profile.ph = ph;
        self.profile.clone()
    }

    pub fn set_nitrogen(&mut self, value: f64) -> SoilProfile {
        self.profile.nitrogen = value;
        self.profile.clone()
    }

    pub fn set_phosphorus(&mut self, value: f64) -> SoilProfile {
        self.profile.phosphorus = value;
        self.profile.clone()
    }

    pub fn set_potassium(&mut self, value: f64) -> SoilProfile {
        self.profile.potassium = value;
        self.profile.clone()
    }

    pub fn set_organic_matter(&mut self, value: f64) -> SoilProfile {
        self.profile.organic_matter = value;
        self.profile.clone()
    }

    /// Text-input variants: unparseable text keeps the prior reading.
    pub fn set_ph_input(&mut self, input: &str) -> SoilProfile {
        self.profile.ph = parse_reading(input, self.profile.ph);
        self.profile.clone()
    }

    pub fn set_nitrogen_input(&mut self, input: &str) -> SoilProfile {
        self.profile.nitrogen = parse_reading(input, self.profile.nitrogen);
        self.profile.clone()
    }

    pub fn set_phosphorus_input(&mut self, input: &str) -> SoilProfile {
        self.profile.phosphorus = parse_reading(input, self.profile.phosphorus);
        self.profile.clone()
    }

    pub fn set_potassium_input(&mut self, input: &str) -> SoilProfile {
        self.profile.potassium = parse_reading(input, self.profile.potassium);
        self.profile.clone()
    }

    pub fn set_organic_matter_input(&mut self, input: &str) -> SoilProfile {
        self.profile.organic_matter = parse_reading(input, self.profile.organic_matter);
        self.profile.clone()
    }
}

fn parse_reading(input: &str, prior: f64) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(prior)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ph_band_boundaries() {
        assert_eq!(PhBand::from_ph(5.9), PhBand::Acidic);
        assert_eq!(PhBand::from_ph(6.0), PhBand::Neutral);
        assert_eq!(PhBand::from_ph(8.0), PhBand::Neutral);
        assert_eq!(PhBand::from_ph(8.1), PhBand::Alkaline);
    }

    #[test]
    fn test_nutrient_band_boundaries() {
        assert_eq!(NutrientBand::from_percent(29.0), NutrientBand::Low);
        assert_eq!(NutrientBand::from_percent(30.0), NutrientBand::Medium);
        assert_eq!(NutrientBand::from_percent(70.0), NutrientBand::Medium);
        assert_eq!(NutrientBand::from_percent(71.0), NutrientBand::High);
    }

    #[test]
    fn test_organic_matter_band_boundaries() {
        assert_eq!(OrganicMatterBand::from_percent(1.9), OrganicMatterBand::Low);
        assert_eq!(OrganicMatterBand::from_percent(2.0), OrganicMatterBand::Medium);
        assert_eq!(OrganicMatterBand::from_percent(4.0), OrganicMatterBand::Medium);
        assert_eq!(OrganicMatterBand::from_percent(4.1), OrganicMatterBand::High);
    }

    #[test]
    fn test_out_of_range_readings_are_kept_as_is() {
        let mut form = SoilAnalysisForm::new();

        let profile = form.set_ph(15.5);
        assert_eq!(profile.ph, 15.5);
        assert_eq!(profile.ph_band(), PhBand::Alkaline);

        let profile = form.set_nitrogen(130.0);
        assert_eq!(profile.nitrogen, 130.0);
        assert_eq!(profile.nitrogen_band(), NutrientBand::High);
    }

    #[test]
    fn test_unparseable_input_retains_prior_reading() {
        let mut form = SoilAnalysisForm::new();
        form.set_ph(6.4);

        let profile = form.set_ph_input("acidic-ish");
        assert_eq!(profile.ph, 6.4);

        let profile = form.set_ph_input("5.1");
        assert_eq!(profile.ph, 5.1);

        let profile = form.set_nitrogen_input("");
        assert_eq!(profile.nitrogen, 50.0);
    }

    #[test]
    fn test_default_profile_bands() {
        let profile = SoilProfile::default();
        assert_eq!(profile.ph_band(), PhBand::Neutral);
        assert_eq!(profile.nitrogen_band(), NutrientBand::Medium);
        assert_eq!(profile.phosphorus_band(), NutrientBand::Medium);
        assert_eq!(profile.potassium_band(), NutrientBand::Medium);
        assert_eq!(profile.organic_matter_band(), OrganicMatterBand::Medium);
    }

    #[test]
    fn test_minimal_validity_requires_quality_grade() {
        let mut form = SoilAnalysisForm::new();
        assert!(!form.profile().is_minimally_valid());

        form.set_quality(Some(SoilQuality::Fair));
        assert!(form.profile().is_minimally_valid());

        form.set_quality(None);
        assert!(!form.profile().is_minimally_valid());
    }
}
