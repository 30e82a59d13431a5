//! Effects - side effects declared by the reducer
//!
//! Effects are returned from the reducer and executed by the controller.
//! This keeps the reducer pure while making async operations explicit.

use crate::location::{Coordinates, LocationQuery};
use crate::state::RequestId;
use crate::units::UnitMode;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Ask the geolocation capability for the current position
    Locate { request: RequestId },

    /// Fetch current conditions by coordinates or by city name
    FetchCurrent {
        request: RequestId,
        query: LocationQuery,
        unit: UnitMode,
    },

    /// Fetch the daily forecast for resolved coordinates
    FetchForecast {
        request: RequestId,
        coords: Coordinates,
        unit: UnitMode,
    },
}
