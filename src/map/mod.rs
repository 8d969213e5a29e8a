//! Map view state: the base layer, the static zone overlay and the single
//! query marker.
//!
//! Drawing is delegated to a [`MapSurface`], which wraps whatever mapping
//! library hosts the view. [`MapView`] owns the surface together with the
//! current marker, so placing a marker is the only way the marker changes.

pub mod marker;
pub mod recording;
pub mod zones;

use serde::{Deserialize, Serialize};

use crate::risk::RiskScore;

pub use marker::{Marker, MarkerIcon, BLUE_ICON};
pub use recording::RecordingSurface;
pub use zones::ZoneLayer;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// Los Angeles.
pub const DEFAULT_CENTER: LatLng = LatLng::new(34.0522, -118.2437);
pub const DEFAULT_ZOOM: u8 = 10;
pub const MARKER_ZOOM: u8 = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub url_template: &'static str,
    pub max_zoom: u8,
    pub attribution: &'static str,
}

pub const OSM_TILES: TileLayer = TileLayer {
    url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
    max_zoom: 19,
    attribution: "&copy; <a href=\"http://www.openstreetmap.org/copyright\">OpenStreetMap</a>",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(pub u64);

/// The mapping library. Errors are rendering failures and are not expected
/// in normal operation.
pub trait MapSurface {
    fn set_view(&mut self, center: LatLng, zoom: u8) -> anyhow::Result<()>;
    fn add_tile_layer(&mut self, layer: &TileLayer) -> anyhow::Result<()>;
    fn add_zone_layer(&mut self, layer: &ZoneLayer) -> anyhow::Result<()>;
    fn add_marker(&mut self, marker: Marker) -> anyhow::Result<MarkerId>;
    fn remove_marker(&mut self, id: MarkerId) -> anyhow::Result<()>;
    fn open_popup(&mut self, id: MarkerId) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedMarker {
    pub id: MarkerId,
    pub position: LatLng,
}

pub struct MapView<S> {
    surface: S,
    current: Option<PlacedMarker>,
}

impl<S: MapSurface> MapView<S> {
    /// Startup hook. Centers the surface on the default view, adds the base
    /// tiles and the static risk zones.
    pub fn initialize(mut surface: S) -> anyhow::Result<Self> {
        surface.set_view(DEFAULT_CENTER, DEFAULT_ZOOM)?;
        surface.add_tile_layer(&OSM_TILES)?;
        surface.add_zone_layer(&ZoneLayer::simulated())?;

        log::debug!("map initialized at {DEFAULT_CENTER} zoom {DEFAULT_ZOOM}");

        Ok(Self {
            surface,
            current: None,
        })
    }

    /// Replaces the current marker with one at `position`, opens its popup and
    /// recenters on it.
    pub fn place_marker(
        &mut self,
        position: LatLng,
        score: RiskScore,
        message: &str,
    ) -> anyhow::Result<MarkerId> {
        self.clear()?;

        let marker = Marker::new(position, score, message);
        let id = self.surface.add_marker(marker)?;
        self.current = Some(PlacedMarker { id, position });

        self.surface.open_popup(id)?;
        self.surface.set_view(position, MARKER_ZOOM)?;

        Ok(id)
    }

    pub fn clear(&mut self) -> anyhow::Result<()> {
        if let Some(old) = self.current {
            self.surface.remove_marker(old.id)?;
            self.current = None;
        }

        Ok(())
    }

    pub fn current_marker(&self) -> Option<PlacedMarker> {
        self.current
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
