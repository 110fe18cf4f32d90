//! View Builder
//!
//! Assembles the full `AdvisorView` from a session. Pure read path: bands,
//! summary lines and color classes are recomputed on every call and never
//! cached, so the view always reflects the aggregate as of the last event.

use crate::farm_details::FarmDetails;
use crate::location::MarkedLocation;
use crate::prediction::PredictionResult;
use crate::session::AdvisorSession;
use crate::soil_analysis::SoilProfile;
use crate::view_models::{
    probability_css_class, AdvisorView, ChecklistItemView, CropChoiceView, FarmDetailsView,
    LocationView, PredictionView, RiskFactorView, SoilAnalysisView, SoilQualityView,
    SoilReadingView,
};

/// Build the render model for the whole session.
pub fn build_view(session: &AdvisorSession) -> AdvisorView {
    let advisor = session.advisor();
    let stage = advisor.stage();

    let checklist = advisor
        .checklist()
        .items()
        .into_iter()
        .map(|(label, fulfilled)| ChecklistItemView { label, fulfilled })
        .collect();

    AdvisorView {
        stage,
        stage_label: stage.label(),
        location: advisor.location().map(location_view),
        crop: advisor.crop().map(|choice| CropChoiceView {
            category: choice.category.label(),
            name: choice.name.clone(),
        }),
        farm: advisor.farm_details().map(farm_view),
        soil: advisor.soil_profile().map(soil_view),
        checklist,
        prediction: advisor.outcome().result().map(prediction_view),
    }
}

fn location_view(location: &MarkedLocation) -> LocationView {
    let (marker_left_pct, marker_top_pct) = location.marker_percent();
    LocationView {
        latitude: location.latitude,
        longitude: location.longitude,
        label: location.label().to_string(),
        marker_left_pct,
        marker_top_pct,
    }
}

fn farm_view(details: &FarmDetails) -> FarmDetailsView {
    let mut summary_lines = Vec::new();
    if details.area_hectares > 0.0 {
        summary_lines.push(format!("Land Area: {} hectares", details.area_hectares));
    }
    if let Some(soil_type) = details.soil_type {
        summary_lines.push(format!("Soil Type: {}", soil_type.label()));
    }
    if let Some(season) = details.season {
        summary_lines.push(format!("Growing Season: {}", season.label()));
    }
    if !details.state.is_empty() && !details.city.is_empty() {
        summary_lines.push(format!("Location: {}, {}", details.city, details.state));
    }

    FarmDetailsView {
        season: details.season.map(|s| s.label()),
        soil_type: details.soil_type.map(|s| s.label()),
        area_hectares: details.area_hectares,
        state: details.state.clone(),
        city: details.city.clone(),
        summary_lines,
    }
}

fn soil_view(profile: &SoilProfile) -> SoilAnalysisView {
    let ph_band = profile.ph_band();
    let nitrogen_band = profile.nitrogen_band();
    let phosphorus_band = profile.phosphorus_band();
    let potassium_band = profile.potassium_band();
    let organic_band = profile.organic_matter_band();

    SoilAnalysisView {
        quality: profile.quality.map(|quality| SoilQualityView {
            label: quality.label(),
            css_class: quality.css_class(),
        }),
        ph: SoilReadingView {
            value: profile.ph,
            band: ph_band.label(),
            css_class: ph_band.css_class(),
        },
        nitrogen: SoilReadingView {
            value: profile.nitrogen,
            band: nitrogen_band.label(),
            css_class: nitrogen_band.css_class(),
        },
        phosphorus: SoilReadingView {
            value: profile.phosphorus,
            band: phosphorus_band.label(),
            css_class: phosphorus_band.css_class(),
        },
        potassium: SoilReadingView {
            value: profile.potassium,
            band: potassium_band.label(),
            css_class: potassium_band.css_class(),
        },
        organic_matter: SoilReadingView {
            value: profile.organic_matter,
            band: organic_band.label(),
            css_class: organic_band.css_class(),
        },
    }
}

fn prediction_view(result: &PredictionResult) -> PredictionView {
    PredictionView {
        survival_probability: result.survival_probability,
        survival_css_class: probability_css_class(result.survival_probability),
        yield_quantity: result.expected_yield.quantity,
        yield_unit: result.expected_yield.unit,
        market_price_per_unit: result.market_value.price_per_unit,
        market_total_value: result.market_value.total_value,
        currency: result.market_value.currency,
        harvest_duration_days: result.harvest.duration_days,
        harvest_optimal_month: result.harvest.optimal_month,
        net_profit: result.net_profit.amount,
        roi_percent: result.net_profit.roi_percent,
        risk_factors: result
            .risk_factors
            .iter()
            .map(|risk| RiskFactorView {
                factor: risk.factor,
                level: risk.level.label(),
                css_class: risk.level.css_class(),
                description: risk.description,
            })
            .collect(),
        recommendations: result.recommendations.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CropCategory, ReferenceData, Season, SoilType};
    use crate::location::MapSurface;
    use crate::soil_analysis::SoilQuality;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn session() -> AdvisorSession {
        let reference = Arc::new(
            ReferenceData::load(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
                .expect("reference data should load"),
        );
        AdvisorSession::new(reference)
    }

    #[test]
    fn test_empty_session_view() {
        let view = build_view(&session());

        assert_eq!(view.stage_label, "Empty");
        assert!(view.location.is_none());
        assert!(view.prediction.is_none());
        assert_eq!(view.checklist.len(), 4);
        assert!(view.checklist.iter().all(|item| !item.fulfilled));
    }

    #[test]
    fn test_soil_bands_carry_matching_classes() {
        let mut session = session();
        session.set_soil_quality(Some(SoilQuality::Excellent));
        session.set_soil_ph(5.2);
        session.set_soil_nitrogen(80.0);

        let view = build_view(&session);
        let soil = view.soil.expect("soil view");

        assert_eq!(soil.ph.band, "Acidic");
        assert_eq!(soil.ph.css_class, "text-red-500");
        assert_eq!(soil.nitrogen.band, "High");
        assert_eq!(soil.nitrogen.css_class, "text-green-500");
        assert_eq!(
            soil.quality.expect("quality badge").css_class,
            "text-green-600 bg-green-50 border-green-200"
        );
    }

    #[test]
    fn test_farm_summary_lines_track_filled_fields() {
        let mut session = session();
        session.set_farm_area(2.0);
        session.set_farm_soil_type(Some(SoilType::Alluvial));
        session.set_farm_season(Some(Season::Rabi));
        session.set_farm_state("Punjab");
        session.set_farm_city("Patiala");

        let view = build_view(&session);
        let farm = view.farm.expect("farm view");

        assert_eq!(
            farm.summary_lines,
            vec![
                "Land Area: 2 hectares".to_string(),
                "Soil Type: Alluvial Soil".to_string(),
                "Growing Season: Rabi (November - April)".to_string(),
                "Location: Patiala, Punjab".to_string(),
            ]
        );
    }

    #[test]
    fn test_complete_session_exposes_prediction_card() {
        let mut session = session();
        session.mark_location(MapSurface::new(400.0, 300.0), 200.0, 150.0);
        session.choose_crop(CropCategory::Grains, "Rice");
        session.set_farm_state("Punjab");
        session.set_soil_quality(Some(SoilQuality::Good));

        let view = build_view(&session);
        let prediction = view.prediction.expect("prediction view");

        assert_eq!(prediction.survival_probability, 85.0);
        assert_eq!(prediction.survival_css_class, "text-green-600 bg-green-50");
        assert_eq!(prediction.risk_factors.len(), 4);
        assert_eq!(prediction.recommendations.len(), 6);

        let location = view.location.expect("location view");
        assert_relative_eq!(location.marker_left_pct, 50.0, epsilon = 1e-6);
        assert_relative_eq!(location.marker_top_pct, 50.0, epsilon = 1e-6);
    }
}
