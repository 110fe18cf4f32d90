//! View Models
//!
//! Serializable read models for the rendering layer. Everything here is
//! derived on demand from core state; nothing is stored back. CSS classes
//! are emitted alongside the values so the renderer stays a dumb template.

use serde::Serialize;

use crate::advisor::CompletionStage;

/// One row of the completeness checklist.
#[derive(Debug, Clone, Serialize)]
pub struct ChecklistItemView {
    pub label: &'static str,
    pub fulfilled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationView {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
    /// Pin offset within the map surface, in percent of width/height.
    pub marker_left_pct: f64,
    pub marker_top_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CropChoiceView {
    pub category: &'static str,
    pub name: String,
}

/// A numeric soil reading with its derived band.
#[derive(Debug, Clone, Serialize)]
pub struct SoilReadingView {
    pub value: f64,
    pub band: &'static str,
    pub css_class: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SoilQualityView {
    pub label: &'static str,
    pub css_class: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SoilAnalysisView {
    pub quality: Option<SoilQualityView>,
    pub ph: SoilReadingView,
    pub nitrogen: SoilReadingView,
    pub phosphorus: SoilReadingView,
    pub potassium: SoilReadingView,
    pub organic_matter: SoilReadingView,
}

#[derive(Debug, Clone, Serialize)]
pub struct FarmDetailsView {
    pub season: Option<&'static str>,
    pub soil_type: Option<&'static str>,
    pub area_hectares: f64,
    pub state: String,
    pub city: String,
    /// The summary card lines, present only for fields that are filled.
    pub summary_lines: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskFactorView {
    pub factor: &'static str,
    pub level: &'static str,
    pub css_class: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionView {
    pub survival_probability: f64,
    pub survival_css_class: &'static str,
    pub yield_quantity: f64,
    pub yield_unit: &'static str,
    pub market_price_per_unit: f64,
    pub market_total_value: f64,
    pub currency: &'static str,
    pub harvest_duration_days: u32,
    pub harvest_optimal_month: &'static str,
    pub net_profit: f64,
    pub roi_percent: f64,
    pub risk_factors: Vec<RiskFactorView>,
    pub recommendations: Vec<&'static str>,
}

/// The complete render model for one session.
#[derive(Debug, Clone, Serialize)]
pub struct AdvisorView {
    pub stage: CompletionStage,
    pub stage_label: &'static str,
    pub location: Option<LocationView>,
    pub crop: Option<CropChoiceView>,
    pub farm: Option<FarmDetailsView>,
    pub soil: Option<SoilAnalysisView>,
    pub checklist: Vec<ChecklistItemView>,
    /// Present only when the prediction provider reported a result.
    pub prediction: Option<PredictionView>,
}

/// Tile colors for the survival probability metric.
pub fn probability_css_class(percent: f64) -> &'static str {
    if percent >= 80.0 {
        "text-green-600 bg-green-50"
    } else if percent >= 60.0 {
        "text-yellow-600 bg-yellow-50"
    } else {
        "text-red-600 bg-red-50"
    }
}
