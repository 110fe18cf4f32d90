//! Reference Data Loading
//!
//! Loads the immutable reference tables with Polars: the crop catalog and the
//! state → city lookup. Also carries the fixed option taxonomies (growing
//! seasons, soil types, water requirements) the catalog and forms share.
//!
//! All tables are read-only after load; nothing in the crate mutates them.

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parse failure for a taxonomy token in the catalog CSV.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown crop category: {0}")]
    UnknownCategory(String),
    #[error("unknown growing season: {0}")]
    UnknownSeason(String),
    #[error("unknown soil type: {0}")]
    UnknownSoilType(String),
    #[error("unknown water requirement: {0}")]
    UnknownWaterRequirement(String),
}

/// Crop category taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropCategory {
    Fruits,
    Vegetables,
    Grains,
    Pulses,
}

impl CropCategory {
    pub fn all() -> &'static [CropCategory] {
        &[
            CropCategory::Fruits,
            CropCategory::Vegetables,
            CropCategory::Grains,
            CropCategory::Pulses,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            CropCategory::Fruits => "Fruits",
            CropCategory::Vegetables => "Vegetables",
            CropCategory::Grains => "Grains",
            CropCategory::Pulses => "Pulses",
        }
    }

    /// Stable key used in CSV data and API payloads.
    pub fn key(&self) -> &'static str {
        match self {
            CropCategory::Fruits => "fruits",
            CropCategory::Vegetables => "vegetables",
            CropCategory::Grains => "grains",
            CropCategory::Pulses => "pulses",
        }
    }

    pub fn parse(token: &str) -> std::result::Result<Self, CatalogError> {
        match token.trim().to_lowercase().as_str() {
            "fruits" => Ok(CropCategory::Fruits),
            "vegetables" => Ok(CropCategory::Vegetables),
            "grains" => Ok(CropCategory::Grains),
            "pulses" => Ok(CropCategory::Pulses),
            other => Err(CatalogError::UnknownCategory(other.to_string())),
        }
    }
}

/// Indian growing seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Kharif,
    Rabi,
    Zaid,
    YearRound,
}

impl Season {
    pub fn all() -> &'static [Season] {
        &[Season::Kharif, Season::Rabi, Season::Zaid, Season::YearRound]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::Kharif => "Kharif (June - October)",
            Season::Rabi => "Rabi (November - April)",
            Season::Zaid => "Zaid (April - June)",
            Season::YearRound => "Year Round",
        }
    }

    pub fn parse(token: &str) -> std::result::Result<Self, CatalogError> {
        match token.trim().to_lowercase().as_str() {
            "kharif" => Ok(Season::Kharif),
            "rabi" => Ok(Season::Rabi),
            "zaid" => Ok(Season::Zaid),
            "year_round" => Ok(Season::YearRound),
            other => Err(CatalogError::UnknownSeason(other.to_string())),
        }
    }
}

/// Soil type taxonomy shared by the catalog and the farm details form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilType {
    Alluvial,
    BlackCotton,
    RedSandy,
    Laterite,
    Mountain,
    Desert,
    Clay,
    Loamy,
}

impl SoilType {
    pub fn all() -> &'static [SoilType] {
        &[
            SoilType::Alluvial,
            SoilType::BlackCotton,
            SoilType::RedSandy,
            SoilType::Laterite,
            SoilType::Mountain,
            SoilType::Desert,
            SoilType::Clay,
            SoilType::Loamy,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SoilType::Alluvial => "Alluvial Soil",
            SoilType::BlackCotton => "Black Cotton Soil",
            SoilType::RedSandy => "Red Sandy Soil",
            SoilType::Laterite => "Laterite Soil",
            SoilType::Mountain => "Mountain Soil",
            SoilType::Desert => "Desert Soil",
            SoilType::Clay => "Clay Soil",
            SoilType::Loamy => "Loamy Soil",
        }
    }

    pub fn parse(token: &str) -> std::result::Result<Self, CatalogError> {
        match token.trim().to_lowercase().as_str() {
            "alluvial" => Ok(SoilType::Alluvial),
            "black_cotton" => Ok(SoilType::BlackCotton),
            "red_sandy" => Ok(SoilType::RedSandy),
            "laterite" => Ok(SoilType::Laterite),
            "mountain" => Ok(SoilType::Mountain),
            "desert" => Ok(SoilType::Desert),
            "clay" => Ok(SoilType::Clay),
            "loamy" => Ok(SoilType::Loamy),
            other => Err(CatalogError::UnknownSoilType(other.to_string())),
        }
    }
}

/// Irrigation demand class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterRequirement {
    Low,
    Medium,
    High,
}

impl WaterRequirement {
    pub fn label(&self) -> &'static str {
        match self {
            WaterRequirement::Low => "Low",
            WaterRequirement::Medium => "Medium",
            WaterRequirement::High => "High",
        }
    }

    pub fn parse(token: &str) -> std::result::Result<Self, CatalogError> {
        match token.trim().to_lowercase().as_str() {
            "low" => Ok(WaterRequirement::Low),
            "medium" => Ok(WaterRequirement::Medium),
            "high" => Ok(WaterRequirement::High),
            other => Err(CatalogError::UnknownWaterRequirement(other.to_string())),
        }
    }
}

/// One row of the crop catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CropRecord {
    pub id: String,
    pub name: String,
    pub category: CropCategory,
    pub seasons: Vec<Season>,
    pub soil_types: Vec<SoilType>,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub water_requirement: WaterRequirement,
    pub growth_days: u32,
    pub avg_yield_t_ha: Option<f64>,
    pub market_price_per_kg: f64,
    pub image: String,
}

/// Immutable reference tables: crop catalog + state → city lookup.
pub struct ReferenceData {
    crops: Vec<CropRecord>,
    cities_by_state: FxHashMap<String, Vec<String>>,
    states: Vec<String>,
}

impl ReferenceData {
    /// Load all reference tables from a data directory containing
    /// `crops.csv` and `state_cities.csv`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let crops = Self::load_crops(&dir.join("crops.csv"))?;
        let cities_by_state = Self::load_cities(&dir.join("state_cities.csv"))?;

        let mut states: Vec<String> = cities_by_state.keys().cloned().collect();
        states.sort();

        tracing::info!(
            crops = crops.len(),
            states = states.len(),
            "reference data loaded"
        );

        Ok(ReferenceData {
            crops,
            cities_by_state,
            states,
        })
    }

    /// Load the crop catalog CSV.
    ///
    /// Pipe-separated list columns (`seasons`, `soil_types`) are split here;
    /// rows with missing mandatory cells are skipped.
    fn load_crops(path: &Path) -> Result<Vec<CropRecord>> {
        let df = read_csv(path)?;

        let ids = str_col(&df, "id")?;
        let names = str_col(&df, "name")?;
        let categories = str_col(&df, "category")?;
        let season_lists = str_col(&df, "seasons")?;
        let soil_lists = str_col(&df, "soil_types")?;
        let min_temps = f64_col(&df, "min_temp_c")?;
        let max_temps = f64_col(&df, "max_temp_c")?;
        let waters = str_col(&df, "water_requirement")?;
        let growth_days = i64_col(&df, "growth_days")?;
        let yields = f64_col(&df, "avg_yield_t_ha")?;
        let prices = f64_col(&df, "market_price_per_kg")?;
        let images = str_col(&df, "image")?;

        let mut crops = Vec::with_capacity(df.height());

        for idx in 0..df.height() {
            let row = (
                ids.get(idx),
                names.get(idx),
                categories.get(idx),
                season_lists.get(idx),
                soil_lists.get(idx),
                min_temps.get(idx),
                max_temps.get(idx),
                waters.get(idx),
                growth_days.get(idx),
                prices.get(idx),
                images.get(idx),
            );

            if let (
                Some(id),
                Some(name),
                Some(category),
                Some(season_list),
                Some(soil_list),
                Some(min_temp_c),
                Some(max_temp_c),
                Some(water),
                Some(days),
                Some(price),
                Some(image),
            ) = row
            {
                let seasons = season_list
                    .split('|')
                    .filter(|s| !s.is_empty())
                    .map(Season::parse)
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .with_context(|| format!("Bad seasons for crop '{}'", name))?;

                let soil_types = soil_list
                    .split('|')
                    .filter(|s| !s.is_empty())
                    .map(SoilType::parse)
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .with_context(|| format!("Bad soil types for crop '{}'", name))?;

                crops.push(CropRecord {
                    id: id.to_string(),
                    name: name.to_string(),
                    category: CropCategory::parse(category)
                        .with_context(|| format!("Bad category for crop '{}'", name))?,
                    seasons,
                    soil_types,
                    min_temp_c,
                    max_temp_c,
                    water_requirement: WaterRequirement::parse(water)
                        .with_context(|| format!("Bad water requirement for crop '{}'", name))?,
                    growth_days: days as u32,
                    avg_yield_t_ha: yields.get(idx),
                    market_price_per_kg: price,
                    image: image.to_string(),
                });
            }
        }

        Ok(crops)
    }

    /// Load the state → city lookup: `state` column maps to a pipe-separated
    /// `cities` column.
    fn load_cities(path: &Path) -> Result<FxHashMap<String, Vec<String>>> {
        let df = read_csv(path)?;

        let states = str_col(&df, "state")?;
        let city_lists = str_col(&df, "cities")?;

        let mut map = FxHashMap::default();

        for idx in 0..df.height() {
            if let (Some(state), Some(city_list)) = (states.get(idx), city_lists.get(idx)) {
                let cities: Vec<String> = city_list
                    .split('|')
                    .filter(|s| !s.is_empty())
                    .map(|s| s.to_string())
                    .collect();

                if !cities.is_empty() {
                    map.insert(state.to_string(), cities);
                }
            }
        }

        Ok(map)
    }

    pub fn crops(&self) -> &[CropRecord] {
        &self.crops
    }

    /// Look up a catalog entry by category and name jointly.
    pub fn find_crop(&self, category: CropCategory, name: &str) -> Option<&CropRecord> {
        self.crops
            .iter()
            .find(|c| c.category == category && c.name.eq_ignore_ascii_case(name))
    }

    /// All states with city data, sorted alphabetically.
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Cities for a state. Empty or unknown states yield an empty slice,
    /// never an error.
    pub fn cities_for_state(&self, state: &str) -> &[String] {
        if state.is_empty() {
            return &[];
        }
        self.cities_by_state
            .get(state)
            .map(|cities| cities.as_slice())
            .unwrap_or(&[])
    }
}

// ============================================================================
// CSV column helpers
// ============================================================================

fn read_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to load CSV: {}", path.display()))
}

fn str_col(df: &DataFrame, name: &str) -> Result<StringChunked> {
    let col = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?;
    Ok(col
        .str()
        .with_context(|| format!("Column '{}' is not string type", name))?
        .clone())
}

fn f64_col(df: &DataFrame, name: &str) -> Result<Float64Chunked> {
    let col = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?;
    let casted = col
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' is not numeric", name))?;
    Ok(casted
        .f64()
        .with_context(|| format!("Column '{}' cast to f64 failed", name))?
        .clone())
}

fn i64_col(df: &DataFrame, name: &str) -> Result<Int64Chunked> {
    let col = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?;
    let casted = col
        .cast(&DataType::Int64)
        .with_context(|| format!("Column '{}' is not an integer column", name))?;
    Ok(casted
        .i64()
        .with_context(|| format!("Column '{}' cast to i64 failed", name))?
        .clone())
}
