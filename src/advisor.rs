//! Aggregator State Machine
//!
//! `CropAdvisor` exclusively owns the four input slots. Each slot update is
//! a whole-value replacement — the aggregator never merges partial structs —
//! and is idempotent and independent of the other three slots. After every
//! transition the prediction provider is re-invoked and the outcome
//! republished, so readers always see a consistent aggregate.
//!
//! Stage derivation is by slot presence only; no stage is terminal, since
//! any slot can be cleared or replaced at any time.

use serde::Serialize;

use crate::crop_picker::CropChoice;
use crate::farm_details::FarmDetails;
use crate::location::MarkedLocation;
use crate::prediction::{Checklist, PredictionOutcome, Predictor, StubPredictor};
use crate::soil_analysis::SoilProfile;

/// Fill stage derived purely from how many slots hold a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStage {
    Empty,
    PartiallyFilled,
    Complete,
}

impl CompletionStage {
    pub fn label(&self) -> &'static str {
        match self {
            CompletionStage::Empty => "Empty",
            CompletionStage::PartiallyFilled => "Partially filled",
            CompletionStage::Complete => "Complete",
        }
    }
}

/// The four-slot aggregate behind the prediction display.
pub struct CropAdvisor {
    location: Option<MarkedLocation>,
    crop: Option<CropChoice>,
    farm: Option<FarmDetails>,
    soil: Option<SoilProfile>,
    predictor: Box<dyn Predictor>,
    outcome: PredictionOutcome,
}

impl CropAdvisor {
    pub fn new() -> Self {
        Self::with_predictor(Box::new(StubPredictor))
    }

    /// Build with an injected prediction backend. The state machine is
    /// identical whichever backend is plugged in.
    pub fn with_predictor(predictor: Box<dyn Predictor>) -> Self {
        let outcome = predictor.predict(None, None, None, None);
        CropAdvisor {
            location: None,
            crop: None,
            farm: None,
            soil: None,
            predictor,
            outcome,
        }
    }

    // ========================================================================
    // Slot updates (whole-value replacement, one notification per event)
    // ========================================================================

    pub fn update_location(&mut self, location: MarkedLocation) {
        self.location = Some(location);
        self.republish("location");
    }

    pub fn clear_location(&mut self) {
        self.location = None;
        self.republish("location");
    }

    pub fn update_crop(&mut self, crop: CropChoice) {
        self.crop = Some(crop);
        self.republish("crop");
    }

    pub fn clear_crop(&mut self) {
        self.crop = None;
        self.republish("crop");
    }

    pub fn update_farm_details(&mut self, details: FarmDetails) {
        self.farm = Some(details);
        self.republish("farm_details");
    }

    pub fn clear_farm_details(&mut self) {
        self.farm = None;
        self.republish("farm_details");
    }

    pub fn update_soil_profile(&mut self, profile: SoilProfile) {
        self.soil = Some(profile);
        self.republish("soil_analysis");
    }

    pub fn clear_soil_profile(&mut self) {
        self.soil = None;
        self.republish("soil_analysis");
    }

    fn republish(&mut self, slot: &str) {
        self.outcome = self.predictor.predict(
            self.location.as_ref(),
            self.crop.as_ref(),
            self.farm.as_ref(),
            self.soil.as_ref(),
        );
        tracing::debug!(
            slot,
            stage = self.stage().label(),
            ready = self.outcome.is_ready(),
            "slot updated, prediction republished"
        );
    }

    // ========================================================================
    // Read surface
    // ========================================================================

    pub fn location(&self) -> Option<&MarkedLocation> {
        self.location.as_ref()
    }

    pub fn crop(&self) -> Option<&CropChoice> {
        self.crop.as_ref()
    }

    pub fn farm_details(&self) -> Option<&FarmDetails> {
        self.farm.as_ref()
    }

    pub fn soil_profile(&self) -> Option<&SoilProfile> {
        self.soil.as_ref()
    }

    pub fn stage(&self) -> CompletionStage {
        let filled = [
            self.location.is_some(),
            self.crop.is_some(),
            self.farm.is_some(),
            self.soil.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count();

        match filled {
            0 => CompletionStage::Empty,
            4 => CompletionStage::Complete,
            _ => CompletionStage::PartiallyFilled,
        }
    }

    pub fn checklist(&self) -> Checklist {
        Checklist::from_slots(
            self.location.as_ref(),
            self.crop.as_ref(),
            self.farm.as_ref(),
            self.soil.as_ref(),
        )
    }

    /// The outcome published at the last transition.
    pub fn outcome(&self) -> &PredictionOutcome {
        &self.outcome
    }
}

impl Default for CropAdvisor {
    fn default() -> Self {
        Self::new()
    }
}
