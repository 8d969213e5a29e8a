use crate::html;
use crate::risk::RiskScore;

use super::LatLng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerIcon {
    pub icon_url: &'static str,
    pub shadow_url: &'static str,
    pub icon_size: [i32; 2],
    pub icon_anchor: [i32; 2],
    pub popup_anchor: [i32; 2],
    pub shadow_size: [i32; 2],
}

pub const BLUE_ICON: MarkerIcon = MarkerIcon {
    icon_url: "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-2x-blue.png",
    shadow_url: "https://cdnjs.cloudflare.com/ajax/libs/leaflet/0.7.7/images/marker-shadow.png",
    icon_size: [25, 41],
    icon_anchor: [12, 41],
    popup_anchor: [1, -34],
    shadow_size: [41, 41],
};

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: LatLng,
    pub icon: MarkerIcon,
    pub popup: String,
}

impl Marker {
    pub fn new(position: LatLng, score: RiskScore, message: &str) -> Self {
        Self {
            position,
            icon: BLUE_ICON,
            popup: popup_content(position, score, message),
        }
    }
}

pub fn popup_content(position: LatLng, score: RiskScore, message: &str) -> String {
    format!(
        "<strong>Risk Score:</strong> {score}/100<br>\
         <strong>Assessment:</strong> {}<br>\
         <strong>Coordinates:</strong> {position}",
        html::escape(message)
    )
}
