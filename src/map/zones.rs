//! Demonstration flood zones drawn under every query. They are fixed data and
//! have no relation to the predictions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub ty: String,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub ty: String,
    pub properties: ZoneProperties,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneProperties {
    pub risk: String,
}

/// Polygon geometry; rings are `[lon, lat]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub ty: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneStyle {
    pub fill_color: String,
    pub weight: u32,
    pub opacity: f64,
    pub color: String,
    pub fill_opacity: f64,
}

impl Default for ZoneStyle {
    fn default() -> Self {
        Self {
            fill_color: "#ff0000".into(),
            weight: 2,
            opacity: 0.7,
            color: "#990000".into(),
            fill_opacity: 0.3,
        }
    }
}

const HIGH_RING: [[f64; 2]; 5] = [
    [-118.295, 34.010],
    [-118.305, 34.015],
    [-118.310, 34.005],
    [-118.300, 34.000],
    [-118.295, 34.010],
];

const MODERATE_RING: [[f64; 2]; 5] = [
    [-118.225, 34.055],
    [-118.235, 34.060],
    [-118.240, 34.050],
    [-118.230, 34.045],
    [-118.225, 34.055],
];

/// Zones plus the style every zone is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneLayer {
    pub zones: FeatureCollection,
    pub style: ZoneStyle,
}

impl ZoneLayer {
    pub fn simulated() -> Self {
        let polygon = |risk: &str, ring: &[[f64; 2]]| Feature {
            ty: "Feature".into(),
            properties: ZoneProperties { risk: risk.into() },
            geometry: Geometry {
                ty: "Polygon".into(),
                coordinates: vec![ring.to_vec()],
            },
        };

        Self {
            zones: FeatureCollection {
                ty: "FeatureCollection".into(),
                features: vec![
                    polygon("High", &HIGH_RING[..]),
                    polygon("Moderate", &MODERATE_RING[..]),
                ],
            },
            style: ZoneStyle::default(),
        }
    }

    /// Popup text for each feature, in feature order.
    pub fn popups(&self) -> Vec<String> {
        self.zones
            .features
            .iter()
            .map(|f| format!("Simulated Risk: {}", f.properties.risk))
            .collect()
    }
}
