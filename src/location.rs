//! Map Location Picker
//!
//! Converts a pointer gesture on the rendered map surface into a marked
//! geocoordinate via a fixed affine mapping onto the service's bounding box
//! (lat 0.5937–20.5937 from the surface's y axis, lng 68.1773–98.1773 from
//! its x axis). Gestures cannot fall outside the surface — the surface
//! itself is the gesture source — so no bounds checking is needed.

use serde::Serialize;

/// Northern latitude of the bounding box (top edge of the surface).
pub const LAT_NORTH: f64 = 20.5937;

/// Latitude span covered by the surface height.
pub const LAT_SPAN: f64 = 20.0;

/// Western longitude of the bounding box (left edge of the surface).
pub const LNG_WEST: f64 = 68.1773;

/// Longitude span covered by the surface width.
pub const LNG_SPAN: f64 = 30.0;

/// Rendered dimensions of the surface a gesture was captured on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapSurface {
    pub width: f64,
    pub height: f64,
}

impl MapSurface {
    pub fn new(width: f64, height: f64) -> Self {
        MapSurface { width, height }
    }

    /// Map a gesture at `(x, y)` — measured from the surface's top-left
    /// corner — to a marked location, rounded to 4 decimal places.
    pub fn location_at(&self, x: f64, y: f64) -> MarkedLocation {
        let latitude = LAT_NORTH - (y / self.height) * LAT_SPAN;
        let longitude = LNG_WEST + (x / self.width) * LNG_SPAN;
        MarkedLocation::from_coords(round4(latitude), round4(longitude))
    }
}

/// A single marked location. Each new gesture replaces the previous mark
/// wholesale; no history is kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkedLocation {
    pub latitude: f64,
    pub longitude: f64,
    label: String,
}

impl MarkedLocation {
    /// Build a location with its derived display label. The label is always
    /// computed from the coordinates and cannot be set independently.
    pub fn from_coords(latitude: f64, longitude: f64) -> Self {
        let label = format!("Location {:.2}, {:.2}", latitude, longitude);
        MarkedLocation {
            latitude,
            longitude,
            label,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Marker offset within the surface as `(left %, top %)` — the inverse
    /// of the gesture mapping, used to place the pin on the rendered map.
    pub fn marker_percent(&self) -> (f64, f64) {
        (
            (self.longitude - LNG_WEST) / LNG_SPAN * 100.0,
            (LAT_NORTH - self.latitude) / LAT_SPAN * 100.0,
        )
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_center_gesture_hits_bounding_box_midpoint() {
        let surface = MapSurface::new(400.0, 300.0);
        let location = surface.location_at(200.0, 150.0);

        assert_relative_eq!(location.latitude, 10.5937, epsilon = 1e-9);
        assert_relative_eq!(location.longitude, 83.1773, epsilon = 1e-9);
    }

    #[test]
    fn test_corners_map_to_bounding_box_extremes() {
        let surface = MapSurface::new(640.0, 480.0);

        let top_left = surface.location_at(0.0, 0.0);
        assert_relative_eq!(top_left.latitude, 20.5937, epsilon = 1e-9);
        assert_relative_eq!(top_left.longitude, 68.1773, epsilon = 1e-9);

        let bottom_right = surface.location_at(640.0, 480.0);
        assert_relative_eq!(bottom_right.latitude, 0.5937, epsilon = 1e-9);
        assert_relative_eq!(bottom_right.longitude, 98.1773, epsilon = 1e-9);
    }

    #[test]
    fn test_coordinates_round_to_four_decimals() {
        let surface = MapSurface::new(700.0, 450.0);
        let location = surface.location_at(123.0, 321.0);

        assert_relative_eq!(location.latitude, round4(location.latitude), epsilon = 0.0);
        assert_relative_eq!(location.longitude, round4(location.longitude), epsilon = 0.0);
    }

    #[test]
    fn test_label_is_derived_from_coordinates() {
        let location = MarkedLocation::from_coords(10.5937, 83.1773);
        assert_eq!(location.label(), "Location 10.59, 83.18");
    }

    #[test]
    fn test_marker_percent_inverts_the_gesture_mapping() {
        let surface = MapSurface::new(500.0, 400.0);
        let location = surface.location_at(125.0, 300.0);

        let (left, top) = location.marker_percent();
        assert_relative_eq!(left, 25.0, epsilon = 1e-6);
        assert_relative_eq!(top, 75.0, epsilon = 1e-6);
    }
}
