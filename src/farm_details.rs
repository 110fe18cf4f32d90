//! Farm Details Form
//!
//! Field-level updates over a single owned struct. Every edit replaces the
//! whole value and returns the full snapshot so the caller can hand it
//! upward — the aggregator never sees diffs and never merges.
//!
//! State and city are dependent: changing the state force-clears the city in
//! the same update, and only cities listed for the current state are
//! accepted.

use std::sync::Arc;

use serde::Serialize;

use crate::data::{ReferenceData, Season, SoilType};

/// The farm details value handed to the aggregator.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FarmDetails {
    pub season: Option<Season>,
    pub soil_type: Option<SoilType>,
    pub area_hectares: f64,
    pub state: String,
    pub city: String,
}

impl FarmDetails {
    /// Minimal validity for the prediction gate: a state has been picked.
    pub fn is_minimally_valid(&self) -> bool {
        !self.state.is_empty()
    }
}

/// Edit buffer for the farm details panel.
pub struct FarmDetailsForm {
    reference: Arc<ReferenceData>,
    details: FarmDetails,
}

impl FarmDetailsForm {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        FarmDetailsForm {
            reference,
            details: FarmDetails::default(),
        }
    }

    pub fn details(&self) -> &FarmDetails {
        &self.details
    }

    pub fn set_season(&mut self, season: Option<Season>) -> FarmDetails {
        self.details.season = season;
        self.details.clone()
    }

    pub fn set_soil_type(&mut self, soil_type: Option<SoilType>) -> FarmDetails {
        self.details.soil_type = soil_type;
        self.details.clone()
    }

    /// Set the land area from raw text input. Non-numeric, empty, or
    /// negative input coerces to zero — never an error state.
    pub fn set_area_input(&mut self, input: &str) -> FarmDetails {
        self.details.area_hectares = parse_area(input);
        self.details.clone()
    }

    pub fn set_area(&mut self, hectares: f64) -> FarmDetails {
        self.details.area_hectares = if hectares.is_finite() {
            hectares.max(0.0)
        } else {
            0.0
        };
        self.details.clone()
    }

    /// Change the state. The city is force-cleared in the same update so it
    /// can never refer to a city outside the new state's list.
    pub fn set_state(&mut self, state: impl Into<String>) -> FarmDetails {
        self.details.state = state.into();
        self.details.city.clear();
        self.details.clone()
    }

    /// Pick a city. Only cities listed for the current state are accepted
    /// (empty clears); anything else leaves the form unchanged.
    pub fn set_city(&mut self, city: impl Into<String>) -> FarmDetails {
        let city = city.into();
        let allowed = city.is_empty() || self.available_cities().iter().any(|c| *c == city);
        if allowed {
            self.details.city = city;
        }
        self.details.clone()
    }

    /// Valid city choices for the current state; empty when no state is
    /// picked or the state is unknown.
    pub fn available_cities(&self) -> &[String] {
        self.reference.cities_for_state(&self.details.state)
    }
}

fn parse_area(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> FarmDetailsForm {
        let reference = Arc::new(
            ReferenceData::load(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
                .expect("reference data should load"),
        );
        FarmDetailsForm::new(reference)
    }

    #[test]
    fn test_every_update_returns_the_whole_struct() {
        let mut form = form();
        let snapshot = form.set_season(Some(Season::Kharif));
        assert_eq!(snapshot, *form.details());

        let snapshot = form.set_area(2.5);
        assert_eq!(snapshot.season, Some(Season::Kharif));
        assert_eq!(snapshot.area_hectares, 2.5);
    }

    #[test]
    fn test_state_change_always_clears_city() {
        let mut form = form();
        form.set_state("Punjab");
        form.set_city("Ludhiana");
        assert_eq!(form.details().city, "Ludhiana");

        // A different state clears the city
        let snapshot = form.set_state("Kerala");
        assert_eq!(snapshot.city, "");

        // So does re-selecting the same state
        form.set_city("Kochi");
        let snapshot = form.set_state("Kerala");
        assert_eq!(snapshot.city, "");

        // And clearing the state entirely
        form.set_city("Kochi");
        let snapshot = form.set_state("");
        assert_eq!(snapshot.city, "");
    }

    #[test]
    fn test_city_must_belong_to_the_current_state() {
        let mut form = form();
        form.set_state("Punjab");

        // Kochi is a Kerala city; rejected while Punjab is selected
        let snapshot = form.set_city("Kochi");
        assert_eq!(snapshot.city, "");

        let snapshot = form.set_city("Amritsar");
        assert_eq!(snapshot.city, "Amritsar");

        // Empty always clears
        let snapshot = form.set_city("");
        assert_eq!(snapshot.city, "");
    }

    #[test]
    fn test_no_state_means_no_city_choices() {
        let mut form = form();
        assert!(form.available_cities().is_empty());

        let snapshot = form.set_city("Ludhiana");
        assert_eq!(snapshot.city, "");

        form.set_state("Narnia");
        assert!(form.available_cities().is_empty());
    }

    #[test]
    fn test_area_input_coercion() {
        let mut form = form();

        assert_eq!(form.set_area_input("3.5").area_hectares, 3.5);
        assert_eq!(form.set_area_input("not a number").area_hectares, 0.0);
        assert_eq!(form.set_area_input("").area_hectares, 0.0);
        assert_eq!(form.set_area_input("-2").area_hectares, 0.0);
        assert_eq!(form.set_area_input(" 12 ").area_hectares, 12.0);
    }

    #[test]
    fn test_minimal_validity_requires_state() {
        let mut form = form();
        assert!(!form.details().is_minimally_valid());

        form.set_area(4.0);
        assert!(!form.details().is_minimally_valid());

        form.set_state("Bihar");
        assert!(form.details().is_minimally_valid());
    }
}
