//! Advisor Session Root
//!
//! Wires the pickers and forms into the aggregator the way the UI root
//! does: every component edit is handled synchronously and to completion —
//! the derived bands and the published prediction are up to date before the
//! call returns, so no partial update is ever visible.
//!
//! The session owns each component's private edit buffer; components never
//! read each other's state, they only hand whole-value snapshots upward.

use std::sync::Arc;

use crate::advisor::CropAdvisor;
use crate::crop_picker::{CategoryFilter, CropPicker};
use crate::data::{CropCategory, CropRecord, ReferenceData, Season, SoilType};
use crate::farm_details::FarmDetailsForm;
use crate::location::MapSurface;
use crate::prediction::Predictor;
use crate::soil_analysis::{SoilAnalysisForm, SoilQuality};
use crate::weather::{self, WeatherAdvisory, WeatherSnapshot};

pub struct AdvisorSession {
    reference: Arc<ReferenceData>,
    crop_picker: CropPicker,
    farm_form: FarmDetailsForm,
    soil_form: SoilAnalysisForm,
    advisor: CropAdvisor,
}

impl AdvisorSession {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        AdvisorSession {
            crop_picker: CropPicker::new(reference.clone()),
            farm_form: FarmDetailsForm::new(reference.clone()),
            soil_form: SoilAnalysisForm::new(),
            advisor: CropAdvisor::new(),
            reference,
        }
    }

    /// Build a session around a custom prediction backend.
    pub fn with_predictor(reference: Arc<ReferenceData>, predictor: Box<dyn Predictor>) -> Self {
        AdvisorSession {
            crop_picker: CropPicker::new(reference.clone()),
            farm_form: FarmDetailsForm::new(reference.clone()),
            soil_form: SoilAnalysisForm::new(),
            advisor: CropAdvisor::with_predictor(predictor),
            reference,
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn advisor(&self) -> &CropAdvisor {
        &self.advisor
    }

    // ========================================================================
    // Location
    // ========================================================================

    /// Handle a pointer gesture on the map surface: derive the location and
    /// replace the previous mark.
    pub fn mark_location(&mut self, surface: MapSurface, x: f64, y: f64) {
        let location = surface.location_at(x, y);
        tracing::info!(
            lat = location.latitude,
            lng = location.longitude,
            "location marked"
        );
        self.advisor.update_location(location);
    }

    pub fn clear_location(&mut self) {
        self.advisor.clear_location();
    }

    // ========================================================================
    // Crop picking
    // ========================================================================

    pub fn set_crop_search(&mut self, term: impl Into<String>) {
        self.crop_picker.set_search(term);
    }

    pub fn set_crop_category(&mut self, filter: CategoryFilter) {
        self.crop_picker.set_category(filter);
    }

    pub fn crop_picker(&self) -> &CropPicker {
        &self.crop_picker
    }

    /// Catalog entries currently passing the picker's filters.
    pub fn visible_crops(&self) -> Vec<&CropRecord> {
        self.crop_picker.visible_crops()
    }

    /// Select a catalog entry by joint (category, name). Unknown pairs are
    /// ignored — only listed entries are selectable — and `false` is
    /// returned so callers can surface that nothing changed.
    pub fn choose_crop(&mut self, category: CropCategory, name: &str) -> bool {
        match self.reference.find_crop(category, name) {
            Some(record) => {
                let choice = CropPicker::choice_for(record);
                tracing::info!(crop = %choice.name, category = choice.category.key(), "crop chosen");
                self.advisor.update_crop(choice);
                true
            }
            None => false,
        }
    }

    pub fn clear_crop(&mut self) {
        self.advisor.clear_crop();
    }

    // ========================================================================
    // Farm details (every edit forwards the full snapshot)
    // ========================================================================

    pub fn set_farm_season(&mut self, season: Option<Season>) {
        let details = self.farm_form.set_season(season);
        self.advisor.update_farm_details(details);
    }

    pub fn set_farm_soil_type(&mut self, soil_type: Option<SoilType>) {
        let details = self.farm_form.set_soil_type(soil_type);
        self.advisor.update_farm_details(details);
    }

    pub fn set_farm_area(&mut self, hectares: f64) {
        let details = self.farm_form.set_area(hectares);
        self.advisor.update_farm_details(details);
    }

    pub fn set_farm_area_input(&mut self, input: &str) {
        let details = self.farm_form.set_area_input(input);
        self.advisor.update_farm_details(details);
    }

    pub fn set_farm_state(&mut self, state: impl Into<String>) {
        let details = self.farm_form.set_state(state);
        self.advisor.update_farm_details(details);
    }

    pub fn set_farm_city(&mut self, city: impl Into<String>) {
        let details = self.farm_form.set_city(city);
        self.advisor.update_farm_details(details);
    }

    /// Valid city choices for the currently selected state.
    pub fn available_cities(&self) -> &[String] {
        self.farm_form.available_cities()
    }

    // ========================================================================
    // Soil analysis (same forwarding pattern)
    // ========================================================================

    pub fn set_soil_quality(&mut self, quality: Option<SoilQuality>) {
        let profile = self.soil_form.set_quality(quality);
        self.advisor.update_soil_profile(profile);
    }

    pub fn set_soil_ph(&mut self, ph: f64) {
        let profile = self.soil_form.set_ph(ph);
        self.advisor.update_soil_profile(profile);
    }

    pub fn set_soil_ph_input(&mut self, input: &str) {
        let profile = self.soil_form.set_ph_input(input);
        self.advisor.update_soil_profile(profile);
    }

    pub fn set_soil_nitrogen(&mut self, value: f64) {
        let profile = self.soil_form.set_nitrogen(value);
        self.advisor.update_soil_profile(profile);
    }

    pub fn set_soil_nitrogen_input(&mut self, input: &str) {
        let profile = self.soil_form.set_nitrogen_input(input);
        self.advisor.update_soil_profile(profile);
    }

    pub fn set_soil_phosphorus(&mut self, value: f64) {
        let profile = self.soil_form.set_phosphorus(value);
        self.advisor.update_soil_profile(profile);
    }

    pub fn set_soil_phosphorus_input(&mut self, input: &str) {
        let profile = self.soil_form.set_phosphorus_input(input);
        self.advisor.update_soil_profile(profile);
    }

    pub fn set_soil_potassium(&mut self, value: f64) {
        let profile = self.soil_form.set_potassium(value);
        self.advisor.update_soil_profile(profile);
    }

    pub fn set_soil_potassium_input(&mut self, input: &str) {
        let profile = self.soil_form.set_potassium_input(input);
        self.advisor.update_soil_profile(profile);
    }

    pub fn set_soil_organic_matter(&mut self, value: f64) {
        let profile = self.soil_form.set_organic_matter(value);
        self.advisor.update_soil_profile(profile);
    }

    pub fn set_soil_organic_matter_input(&mut self, input: &str) {
        let profile = self.soil_form.set_organic_matter_input(input);
        self.advisor.update_soil_profile(profile);
    }

    // ========================================================================
    // Weather (derived from the location slot)
    // ========================================================================

    pub fn weather(&self) -> Option<WeatherSnapshot> {
        self.advisor
            .location()
            .map(|location| weather::current_outlook(location))
    }

    pub fn advisories(&self) -> Vec<WeatherAdvisory> {
        self.advisor
            .location()
            .map(|location| weather::active_advisories(location))
            .unwrap_or_default()
    }
}
