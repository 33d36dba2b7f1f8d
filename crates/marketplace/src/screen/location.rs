//! Location picker.
//!
//! The device position and reverse geocoding results are supplied by the
//! platform layer; this holder only tracks what the user picked.

use marketplace_core::{Coordinates, DEFAULT_COORDINATES, LocationData, Placemark};
use tokio::sync::watch;
use tracing::debug;

/// State of the location picker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationPickerState {
    /// Where the map is centred.
    pub current_location: Option<Coordinates>,
    /// Location picked so far.
    pub selected: Option<LocationData>,
    /// Problem to show the user.
    pub error: Option<String>,
}

/// State holder for the location picker.
pub struct LocationPickerScreen {
    state: watch::Sender<LocationPickerState>,
}

impl Default for LocationPickerScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationPickerScreen {
    /// Create the picker with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(LocationPickerState::default());
        Self { state }
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LocationPickerState> {
        self.state.subscribe()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> LocationPickerState {
        self.state.borrow().clone()
    }

    /// Centre on the device position.
    ///
    /// `position` is `None` when the platform could not determine it, in
    /// which case the map falls back to [`DEFAULT_COORDINATES`].
    pub fn use_current_location(&self, position: Option<Coordinates>, permission_granted: bool) {
        self.state.send_modify(|s| {
            if !permission_granted {
                s.error = Some("Location permission not granted.".to_string());
                return;
            }
            match position {
                Some(coords) => {
                    s.current_location = Some(coords);
                    s.selected = Some(LocationData::from_placemark(coords, None));
                    s.error = None;
                }
                None => {
                    s.current_location = Some(DEFAULT_COORDINATES);
                    s.error =
                        Some("Could not get current location. Please select manually.".to_string());
                }
            }
        });
    }

    /// Pick a point on the map, with whatever the geocoder found for it.
    pub fn select(&self, coords: Coordinates, placemark: Option<&Placemark>) {
        let location = LocationData::from_placemark(coords, placemark);
        debug!("Location selected: {}", location.place_name);
        self.state.send_modify(|s| {
            s.selected = Some(location);
            s.error = None;
        });
    }

    /// Dismiss the current error.
    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }

    /// The location to hand back to the sell form.
    #[must_use]
    pub fn confirm(&self) -> Option<LocationData> {
        self.state.borrow().selected.clone()
    }
}
