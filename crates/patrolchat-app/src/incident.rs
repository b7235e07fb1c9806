//! Incident location lookup.
//!
//! Incidents arrive with loosely typed coordinates (numbers or strings, under
//! either `location` or `coordinates`). This module resolves them to a
//! [`LocationView`] that is either a usable position or an explicit
//! "no coordinates" state; missing data is never an error.

use std::fmt;

use serde::Deserialize;

/// Zoom level used for external map links.
const MAPS_ZOOM: u8 = 16;

/// A coordinate value as delivered upstream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CoordinateValue {
    /// Numeric value.
    Number(f64),
    /// Textual value, parsed leniently.
    Text(String),
}

impl CoordinateValue {
    /// Parsed value, or `None` when missing.
    ///
    /// A numeric zero counts as missing. Text is present whenever it is
    /// non-empty, so `"0"` resolves to a real zero coordinate. Unparseable and
    /// non-finite values are missing either way.
    fn resolve(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) if *n == 0.0 => return None,
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// Raw `{lat, lng}` pair.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCoordinates {
    /// Latitude.
    #[serde(default)]
    pub lat: Option<CoordinateValue>,
    /// Longitude.
    #[serde(default)]
    pub lng: Option<CoordinateValue>,
}

impl RawCoordinates {
    fn resolve(&self) -> Option<Coordinates> {
        let lat = self.lat.as_ref()?.resolve()?;
        let lng = self.lng.as_ref()?.resolve()?;
        Some(Coordinates { lat, lng })
    }
}

/// A resolved position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Coordinates {
    /// Web-maps link for this position.
    pub fn maps_url(&self) -> String {
        format!("https://www.google.com/maps?q={},{}&z={MAPS_ZOOM}", self.lat, self.lng)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// Incident urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    /// Immediate response.
    High,
    /// Prompt response.
    Medium,
    /// Routine.
    Low,
    /// Anything else, including no priority.
    #[default]
    Normal,
}

impl Priority {
    /// Classify a free-form priority string.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::to_lowercase).as_deref() {
            Some("high") => Self::High,
            Some("medium") => Self::Medium,
            Some("low") => Self::Low,
            _ => Self::Normal,
        }
    }
}

/// An incident record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Incident {
    /// Short title.
    #[serde(default)]
    pub title: Option<String>,
    /// Street address.
    #[serde(default)]
    pub address: Option<String>,
    /// Free-form priority.
    #[serde(default)]
    pub priority: Option<String>,
    /// Preferred coordinate source.
    #[serde(default)]
    pub location: Option<RawCoordinates>,
    /// Fallback coordinate source.
    #[serde(default)]
    pub coordinates: Option<RawCoordinates>,
}

impl Incident {
    /// Position from `location`, falling back to `coordinates`.
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.location
            .as_ref()
            .and_then(RawCoordinates::resolve)
            .or_else(|| self.coordinates.as_ref().and_then(RawCoordinates::resolve))
    }

    /// Classified priority.
    pub fn priority(&self) -> Priority {
        Priority::parse(self.priority.as_deref())
    }

    /// Badge text, e.g. `HIGH PRIORITÄT`.
    pub fn priority_label(&self) -> String {
        let raw = self.priority.as_deref().filter(|p| !p.is_empty()).unwrap_or("normal");
        format!("{} PRIORITÄT", raw.to_uppercase())
    }

    /// What a location panel should show.
    pub fn location_view(&self) -> LocationView {
        self.coordinates().map_or(LocationView::Unavailable, |coordinates| {
            LocationView::Located { coordinates, priority: self.priority() }
        })
    }
}

/// Render state of a location panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationView {
    /// No usable coordinates.
    Unavailable,
    /// Position known.
    Located {
        /// Resolved position.
        coordinates: Coordinates,
        /// Incident priority, for the marker color.
        priority: Priority,
    },
}
