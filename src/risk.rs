use serde::{Deserialize, Serialize};

/// Flood risk score in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskScore(u8);

impl RiskScore {
    pub const MAX: u8 = 100;

    /// Clamps a raw prediction into range and truncates it.
    pub fn from_prediction(prediction: f64) -> Option<Self> {
        if !prediction.is_finite() {
            return None;
        }

        Some(Self(prediction.clamp(0.0, Self::MAX as f64) as u8))
    }

    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn severity(self) -> Severity {
        Severity::from_score(self.0 as i64)
    }
}

impl std::fmt::Display for RiskScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Extreme,
    High,
    Moderate,
    Low,
}

impl Severity {
    /// Bands are inclusive lower bounds checked from the top down.
    pub fn from_score(score: i64) -> Self {
        if score >= 80 {
            Severity::Extreme
        } else if score >= 60 {
            Severity::High
        } else if score >= 40 {
            Severity::Moderate
        } else {
            Severity::Low
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Severity::Extreme => "darkred",
            Severity::High => "red",
            Severity::Moderate => "orange",
            Severity::Low => "green",
        }
    }

    pub fn assessment(self) -> &'static str {
        match self {
            Severity::Extreme => "Extremely High Risk: Immediate action is advised.",
            Severity::High => "High Risk: Vigilance and planning required.",
            Severity::Moderate => "Moderate Risk: Monitor local advisories.",
            Severity::Low => "Low Risk: Generally safe, but be aware.",
        }
    }
}
