//! Prediction Provider
//!
//! `Predictor` is the seam for a future model-backed implementation; the
//! shipped `StubPredictor` gates on input completeness and returns a fixed
//! result set regardless of the actual input values. Replacing the stub must
//! preserve the signature and the completeness gate exactly.

use serde::Serialize;

use crate::crop_picker::CropChoice;
use crate::farm_details::FarmDetails;
use crate::location::MarkedLocation;
use crate::soil_analysis::SoilProfile;

/// Severity of a predicted risk factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            RiskLevel::Low => "bg-green-100 text-green-700 border-green-200",
            RiskLevel::Medium => "bg-yellow-100 text-yellow-700 border-yellow-200",
            RiskLevel::High => "bg-red-100 text-red-700 border-red-200",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskFactor {
    pub factor: &'static str,
    pub level: RiskLevel,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ExpectedYield {
    pub quantity: f64,
    pub unit: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MarketValue {
    pub price_per_unit: f64,
    pub total_value: f64,
    pub currency: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct HarvestWindow {
    pub duration_days: u32,
    pub optimal_month: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProfitEstimate {
    pub amount: f64,
    pub roi_percent: f64,
}

/// The full prediction payload. In the stub these are constant literals.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub survival_probability: f64,
    pub expected_yield: ExpectedYield,
    pub market_value: MarketValue,
    pub harvest: HarvestWindow,
    pub net_profit: ProfitEstimate,
    pub risk_factors: Vec<RiskFactor>,
    pub recommendations: Vec<&'static str>,
}

/// Which of the four inputs currently satisfy the completeness rule:
/// present, and minimally valid for the types that define validity (farm
/// details need a state, soil profiles need a quality grade).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Checklist {
    pub location: bool,
    pub crop: bool,
    pub farm_details: bool,
    pub soil_analysis: bool,
}

impl Checklist {
    pub fn from_slots(
        location: Option<&MarkedLocation>,
        crop: Option<&CropChoice>,
        farm: Option<&FarmDetails>,
        soil: Option<&SoilProfile>,
    ) -> Self {
        Checklist {
            location: location.is_some(),
            crop: crop.is_some(),
            farm_details: farm.is_some_and(FarmDetails::is_minimally_valid),
            soil_analysis: soil.is_some_and(SoilProfile::is_minimally_valid),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.location && self.crop && self.farm_details && self.soil_analysis
    }

    /// Checklist rows in display order.
    pub fn items(&self) -> [(&'static str, bool); 4] {
        [
            ("Select location on map", self.location),
            ("Choose crop type", self.crop),
            ("Enter farm details", self.farm_details),
            ("Provide soil analysis", self.soil_analysis),
        ]
    }
}

/// Outcome published after every aggregate transition: either the defined
/// waiting state with its checklist, or a result.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PredictionOutcome {
    Incomplete(Checklist),
    Ready(PredictionResult),
}

impl PredictionOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, PredictionOutcome::Ready(_))
    }

    pub fn checklist(&self) -> Option<&Checklist> {
        match self {
            PredictionOutcome::Incomplete(checklist) => Some(checklist),
            PredictionOutcome::Ready(_) => None,
        }
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            PredictionOutcome::Ready(result) => Some(result),
            PredictionOutcome::Incomplete(_) => None,
        }
    }
}

/// Strategy seam for prediction backends.
///
/// Implementations must keep the completeness gate: any missing input yields
/// `Incomplete`, and the aggregator never needs to know which backend is
/// plugged in.
pub trait Predictor: Send + Sync {
    fn predict(
        &self,
        location: Option<&MarkedLocation>,
        crop: Option<&CropChoice>,
        farm: Option<&FarmDetails>,
        soil: Option<&SoilProfile>,
    ) -> PredictionOutcome;
}

/// Fixed-output predictor standing in for the real model.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubPredictor;

impl Predictor for StubPredictor {
    fn predict(
        &self,
        location: Option<&MarkedLocation>,
        crop: Option<&CropChoice>,
        farm: Option<&FarmDetails>,
        soil: Option<&SoilProfile>,
    ) -> PredictionOutcome {
        let checklist = Checklist::from_slots(location, crop, farm, soil);
        if !checklist.is_complete() {
            return PredictionOutcome::Incomplete(checklist);
        }
        PredictionOutcome::Ready(stub_result())
    }
}

/// The constant payload the stub publishes once every input is in.
fn stub_result() -> PredictionResult {
    PredictionResult {
        survival_probability: 85.0,
        expected_yield: ExpectedYield {
            quantity: 2.8,
            unit: "tonnes/hectare",
        },
        market_value: MarketValue {
            price_per_unit: 45_000.0,
            total_value: 126_000.0,
            currency: "INR",
        },
        harvest: HarvestWindow {
            duration_days: 120,
            optimal_month: "March 2025",
        },
        net_profit: ProfitEstimate {
            amount: 78_000.0,
            roi_percent: 62.0,
        },
        risk_factors: vec![
            RiskFactor {
                factor: "Weather Dependency",
                level: RiskLevel::Medium,
                description: "Monsoon variations may affect yield",
            },
            RiskFactor {
                factor: "Soil pH Imbalance",
                level: RiskLevel::Low,
                description: "Current pH levels are within acceptable range",
            },
            RiskFactor {
                factor: "Market Volatility",
                level: RiskLevel::High,
                description: "Price fluctuations expected during harvest season",
            },
            RiskFactor {
                factor: "Pest & Disease",
                level: RiskLevel::Medium,
                description: "Regular monitoring required for common pests",
            },
        ],
        recommendations: vec![
            "Apply organic fertilizer to improve soil health",
            "Install drip irrigation system for water efficiency",
            "Use integrated pest management practices",
            "Consider crop insurance for weather protection",
            "Plan harvest timing based on market prices",
            "Maintain soil moisture during flowering stage",
        ],
    }
}
