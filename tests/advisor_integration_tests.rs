//! Advisor Integration Tests
//!
//! Drives a full session the way the UI would — gesture, pick, field edits —
//! and checks the aggregate behaviour end to end: completeness gating, the
//! constant stub prediction, idempotence, and the dependent-city rule.

use std::sync::Arc;

use approx::assert_relative_eq;
use crop_predictor_rust::soil_analysis::SoilQuality;
use crop_predictor_rust::{
    build_view, AdvisorSession, CategoryFilter, CompletionStage, CropCategory, MapSurface,
    ReferenceData, Season, SoilType,
};

fn reference() -> Arc<ReferenceData> {
    Arc::new(
        ReferenceData::load(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
            .expect("reference data should load"),
    )
}

fn session() -> AdvisorSession {
    AdvisorSession::new(reference())
}

/// Fill all four slots with a plausible set of inputs.
fn fill_all(session: &mut AdvisorSession) {
    session.mark_location(MapSurface::new(400.0, 300.0), 200.0, 150.0);
    session.choose_crop(CropCategory::Grains, "Rice");
    session.set_farm_season(Some(Season::Kharif));
    session.set_farm_area(2.5);
    session.set_farm_state("Punjab");
    session.set_farm_city("Ludhiana");
    session.set_soil_quality(Some(SoilQuality::Good));
    session.set_soil_ph(6.8);
}

#[test]
fn empty_session_is_a_defined_waiting_state() {
    let session = session();
    let advisor = session.advisor();

    assert_eq!(advisor.stage(), CompletionStage::Empty);
    assert!(!advisor.outcome().is_ready());

    let checklist = advisor.outcome().checklist().expect("waiting state");
    assert!(checklist.items().iter().all(|(_, fulfilled)| !fulfilled));
    assert!(session.weather().is_none());
    assert!(session.advisories().is_empty());
}

#[test]
fn center_gesture_marks_the_bounding_box_midpoint() {
    let mut session = session();
    session.mark_location(MapSurface::new(400.0, 300.0), 200.0, 150.0);

    let location = session.advisor().location().expect("location marked");
    assert_relative_eq!(location.latitude, 10.5937, epsilon = 1e-9);
    assert_relative_eq!(location.longitude, 83.1773, epsilon = 1e-9);
    assert_eq!(location.label(), "Location 10.59, 83.18");
}

#[test]
fn full_session_reaches_the_constant_prediction() {
    let mut session = session();
    fill_all(&mut session);

    let advisor = session.advisor();
    assert_eq!(advisor.stage(), CompletionStage::Complete);

    let result = advisor.outcome().result().expect("ready outcome");
    assert_eq!(result.survival_probability, 85.0);
    assert_eq!(result.expected_yield.quantity, 2.8);
    assert_eq!(result.expected_yield.unit, "tonnes/hectare");
    assert_eq!(result.market_value.price_per_unit, 45_000.0);
    assert_eq!(result.market_value.total_value, 126_000.0);
    assert_eq!(result.harvest.duration_days, 120);
    assert_eq!(result.harvest.optimal_month, "March 2025");
    assert_eq!(result.net_profit.amount, 78_000.0);
    assert_eq!(result.net_profit.roi_percent, 62.0);
    assert_eq!(result.risk_factors.len(), 4);
    assert_eq!(result.recommendations.len(), 6);
}

#[test]
fn prediction_is_independent_of_the_input_values() {
    let mut first = session();
    fill_all(&mut first);

    let mut second = session();
    second.mark_location(MapSurface::new(800.0, 600.0), 100.0, 500.0);
    second.choose_crop(CropCategory::Fruits, "Mango");
    second.set_farm_state("Kerala");
    second.set_farm_area(40.0);
    second.set_soil_quality(Some(SoilQuality::Poor));
    second.set_soil_ph(4.2);
    second.set_soil_nitrogen(5.0);

    let first_result =
        serde_json::to_value(first.advisor().outcome().result().expect("ready")).unwrap();
    let second_result =
        serde_json::to_value(second.advisor().outcome().result().expect("ready")).unwrap();
    assert_eq!(first_result, second_result);
}

#[test]
fn clearing_any_slot_loops_back_to_waiting() {
    let mut session = session();
    fill_all(&mut session);
    assert!(session.advisor().outcome().is_ready());

    session.clear_crop();

    let advisor = session.advisor();
    assert_eq!(advisor.stage(), CompletionStage::PartiallyFilled);
    let checklist = advisor.outcome().checklist().expect("waiting again");
    assert!(!checklist.crop);
    assert!(checklist.location && checklist.farm_details && checklist.soil_analysis);

    // Re-selecting completes it again; no stage is terminal
    session.choose_crop(CropCategory::Vegetables, "Tomato");
    assert!(session.advisor().outcome().is_ready());
}

#[test]
fn repeating_a_field_update_is_idempotent() {
    let mut session = session();
    fill_all(&mut session);

    let before = serde_json::to_value(build_view(&session)).unwrap();
    session.set_farm_state("Punjab");
    session.set_farm_city("Ludhiana");
    session.set_soil_ph(6.8);
    let after = serde_json::to_value(build_view(&session)).unwrap();

    assert_eq!(before, after);
}

#[test]
fn state_change_clears_city_for_every_transition() {
    let mut session = session();
    let states: Vec<String> = reference().states().to_vec();

    for pair in states.windows(2) {
        session.set_farm_state(pair[0].clone());
        let city = session.available_cities()[0].clone();
        session.set_farm_city(city);
        assert!(!session.advisor().farm_details().unwrap().city.is_empty());

        session.set_farm_state(pair[1].clone());
        assert_eq!(session.advisor().farm_details().unwrap().city, "");
    }
}

#[test]
fn present_but_invalid_slots_do_not_satisfy_the_gate() {
    let mut session = session();
    fill_all(&mut session);

    // Farm details stay present but lose their state
    session.set_farm_state("");
    let advisor = session.advisor();
    assert_eq!(advisor.stage(), CompletionStage::Complete); // presence only
    let checklist = advisor.outcome().checklist().expect("gate holds");
    assert!(!checklist.farm_details);

    // Same rule for an ungraded soil profile
    session.set_farm_state("Punjab");
    session.set_soil_quality(None);
    let checklist = session.advisor().outcome().checklist().expect("gate holds");
    assert!(!checklist.soil_analysis);
}

#[test]
fn crop_search_filters_by_name_across_categories() {
    let mut session = session();
    session.set_crop_search("rice");
    session.set_crop_category(CategoryFilter::All);

    let visible = session.visible_crops();
    assert!(!visible.is_empty());
    for crop in visible {
        assert!(
            crop.name.to_lowercase().contains("rice"),
            "unexpected match: {}",
            crop.name
        );
    }

    // Picker filters never touch the aggregate
    assert!(session.advisor().crop().is_none());
}

#[test]
fn choosing_an_unlisted_crop_changes_nothing() {
    let mut session = session();
    assert!(!session.choose_crop(CropCategory::Fruits, "Rice"));
    assert!(session.advisor().crop().is_none());

    assert!(session.choose_crop(CropCategory::Grains, "Rice"));
    let choice = session.advisor().crop().expect("crop chosen");
    assert_eq!(choice.category, CropCategory::Grains);
    assert_eq!(choice.name, "Rice");
}

#[test]
fn weather_follows_the_location_slot() {
    let mut session = session();
    assert!(session.weather().is_none());

    session.mark_location(MapSurface::new(400.0, 300.0), 10.0, 10.0);
    let snapshot = session.weather().expect("weather available");
    assert_eq!(snapshot.condition, "Partly Cloudy");
    assert_eq!(session.advisories().len(), 3);

    session.clear_location();
    assert!(session.weather().is_none());
    assert!(session.advisories().is_empty());
}

#[test]
fn farm_soil_type_and_crop_soil_taxonomy_agree() {
    let session = session();

    // Every soil type referenced by the catalog is a valid form option
    for crop in session.reference().crops() {
        for soil_type in &crop.soil_types {
            assert!(SoilType::all().contains(soil_type));
        }
    }
}
