//! Pickup locations for listings.

use serde::{Deserialize, Serialize};

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Coordinates {
    /// Create coordinates.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Where the map opens when the device location is unknown (New Delhi).
pub const DEFAULT_COORDINATES: Coordinates = Coordinates::new(28.6139, 77.2090);

/// What a reverse geocoder knows about a point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placemark {
    /// Full street address.
    pub address_line: Option<String>,
    /// City or town.
    pub locality: Option<String>,
    /// State or province.
    pub admin_area: Option<String>,
    /// Country name.
    pub country: Option<String>,
}

/// A resolved pickup location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationData {
    /// Street address.
    pub address: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Short name shown on listings, e.g. "Pune, Maharashtra, India".
    pub place_name: String,
}

impl LocationData {
    /// Create location data.
    #[must_use]
    pub fn new(
        address: impl Into<String>,
        latitude: f64,
        longitude: f64,
        place_name: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            latitude,
            longitude,
            place_name: place_name.into(),
        }
    }

    /// Build location data from a reverse geocoding result.
    ///
    /// `None` means the geocoder returned nothing for `coords`.
    #[must_use]
    pub fn from_placemark(coords: Coordinates, placemark: Option<&Placemark>) -> Self {
        let Some(placemark) = placemark else {
            return Self::new(
                "Unknown Address",
                coords.latitude,
                coords.longitude,
                "Selected Location",
            );
        };

        let address = non_empty(placemark.address_line.as_deref()).unwrap_or("Unknown Address");
        let place_name = [
            placemark.locality.as_deref(),
            placemark.admin_area.as_deref(),
            placemark.country.as_deref(),
        ]
        .into_iter()
        .filter_map(non_empty)
        .collect::<Vec<_>>()
        .join(", ");

        Self::new(
            address,
            coords.latitude,
            coords.longitude,
            if place_name.is_empty() {
                "Unknown Place".to_string()
            } else {
                place_name
            },
        )
    }

    /// The point this location refers to.
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_placemark_joins_parts() {
        let placemark = Placemark {
            address_line: Some("12 MG Road".to_string()),
            locality: Some("Bengaluru".to_string()),
            admin_area: None,
            country: Some("India".to_string()),
        };
        let location = LocationData::from_placemark(Coordinates::new(12.9, 77.6), Some(&placemark));
        assert_eq!(location.address, "12 MG Road");
        assert_eq!(location.place_name, "Bengaluru, India");
        assert_eq!(location.coordinates(), Coordinates::new(12.9, 77.6));
    }

    #[test]
    fn test_from_empty_placemark() {
        let location =
            LocationData::from_placemark(DEFAULT_COORDINATES, Some(&Placemark::default()));
        assert_eq!(location.address, "Unknown Address");
        assert_eq!(location.place_name, "Unknown Place");
    }

    #[test]
    fn test_without_placemark() {
        let location = LocationData::from_placemark(DEFAULT_COORDINATES, None);
        assert_eq!(location.address, "Unknown Address");
        assert_eq!(location.place_name, "Selected Location");
        assert!((location.latitude - 28.6139).abs() < f64::EPSILON);
    }
}
