//! Crop Prediction Advisor
//!
//! Core state-aggregation library behind a farm advisory UI: four
//! independent input components (map location, crop pick, farm details,
//! soil analysis) feed a single aggregator that tracks completeness and
//! derives the color-coded summaries and the (stubbed) prediction shown to
//! the user.
//!
//! Module map:
//! - `data`: immutable reference tables (crop catalog, state → city lookup)
//! - `location` / `crop_picker` / `farm_details` / `soil_analysis`: the four
//!   input components and their derived bands
//! - `prediction`: the `Predictor` seam plus the stub implementation
//! - `advisor`: the four-slot aggregator state machine
//! - `session`: root wiring of pickers and forms into the aggregator
//! - `weather`: mocked conditions/advisories keyed on a marked location
//! - `view_models` / `view_builder`: serialized read models for rendering
//! - `api_server` (feature `api`): Axum JSON surface over one session

pub mod advisor;
pub mod crop_picker;
pub mod data;
pub mod farm_details;
pub mod location;
pub mod prediction;
pub mod session;
pub mod soil_analysis;
pub mod view_builder;
pub mod view_models;
pub mod weather;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use advisor::{CompletionStage, CropAdvisor};
pub use crop_picker::{CategoryFilter, CropChoice, CropPicker};
pub use data::{CropCategory, CropRecord, ReferenceData, Season, SoilType};
pub use farm_details::{FarmDetails, FarmDetailsForm};
pub use location::{MapSurface, MarkedLocation};
pub use prediction::{
    Checklist, PredictionOutcome, PredictionResult, Predictor, StubPredictor,
};
pub use session::AdvisorSession;
pub use soil_analysis::{SoilAnalysisForm, SoilProfile, SoilQuality};
pub use view_builder::build_view;
pub use view_models::AdvisorView;

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
