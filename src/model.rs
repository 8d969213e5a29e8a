pub mod dataset;

use std::path::Path;

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

use crate::risk::RiskScore;
use dataset::Sample;

pub const NEIGHBOURS: usize = 5;

/// Values used for the non-location features at prediction time.
pub const DEFAULT_ELEVATION_M: f64 = 70.0;
pub const DEFAULT_RIVER_PROXIMITY_KM: f64 = 1.5;
pub const DEFAULT_RAINFALL_ANNUAL_MM: f64 = 500.0;

/// k-nearest-neighbours regressor over standardized features.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskModel {
    k: usize,
    means: [f64; 5],
    scales: [f64; 5],
    samples: Vec<Sample>,
}

impl RiskModel {
    pub fn train(samples: Vec<Sample>) -> anyhow::Result<Self> {
        if samples.is_empty() {
            return Err(anyhow!("no training samples"));
        }

        let n = samples.len() as f64;
        let mut means = [0.0; 5];
        let mut scales = [0.0; 5];

        for i in 0..5 {
            let mean = samples.iter().map(|s| s.features[i]).sum::<f64>() / n;
            let variance = samples
                .iter()
                .map(|s| (s.features[i] - mean).powi(2))
                .sum::<f64>()
                / n;

            means[i] = mean;
            scales[i] = if variance > 0.0 { variance.sqrt() } else { 1.0 };
        }

        Ok(Self {
            k: NEIGHBOURS.min(samples.len()),
            means,
            scales,
            samples,
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Raw regression output for a full feature vector.
    pub fn predict_features(&self, features: [f64; 5]) -> anyhow::Result<f64> {
        if features.iter().any(|f| !f.is_finite()) {
            return Err(anyhow!("non-finite feature in {features:?}"));
        }
        if self.k == 0 || self.samples.is_empty() {
            return Err(anyhow!("model has no training samples"));
        }

        let query = self.standardize(&features);

        let mut distances: Vec<(f64, f64)> = self
            .samples
            .iter()
            .map(|s| {
                let point = self.standardize(&s.features);
                let d = point
                    .iter()
                    .zip(&query)
                    .map(|(a, b)| (a - b).powi(2))
                    .sum::<f64>();
                (d, s.risk_score)
            })
            .collect();

        distances.sort_by(|(d1, _), (d2, _)| d1.total_cmp(d2));

        let k = self.k.min(distances.len());
        let total: f64 = distances[..k].iter().map(|(_, score)| score).sum();

        Ok(total / k as f64)
    }

    pub fn predict(&self, lat: f64, lon: f64) -> anyhow::Result<RiskScore> {
        let prediction = self.predict_features([
            lat,
            lon,
            DEFAULT_ELEVATION_M,
            DEFAULT_RIVER_PROXIMITY_KM,
            DEFAULT_RAINFALL_ANNUAL_MM,
        ])?;

        RiskScore::from_prediction(prediction)
            .ok_or_else(|| anyhow!("model produced {prediction} for ({lat}, {lon})"))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let json = serde_json::to_vec(self)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;

        Ok(())
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let model: Self = serde_json::from_slice(&bytes)
            .with_context(|| format!("decoding {}", path.display()))?;

        if model.samples.is_empty() || model.k == 0 {
            return Err(anyhow!("{} holds an empty model", path.display()));
        }

        Ok(model)
    }

    /// Loads the persisted model, retraining from `data_path` when it is
    /// missing or unreadable.
    pub fn load_or_train(data_path: &Path, model_path: &Path) -> anyhow::Result<Self> {
        if model_path.exists() {
            match Self::load(model_path) {
                Ok(model) => {
                    log::info!("model loaded from {}", model_path.display());
                    return Ok(model);
                }
                Err(e) => log::warn!("could not load model: {e:#}, retraining"),
            }
        }

        Self::train_and_save(data_path, model_path)
    }

    pub fn train_and_save(data_path: &Path, model_path: &Path) -> anyhow::Result<Self> {
        let samples = dataset::load(data_path)?;
        let model = Self::train(samples)?;
        model.save(model_path)?;

        log::info!(
            "model trained on {} samples and saved to {}",
            model.len(),
            model_path.display()
        );

        Ok(model)
    }

    fn standardize(&self, features: &[f64; 5]) -> [f64; 5] {
        let mut out = [0.0; 5];
        for i in 0..5 {
            out[i] = (features[i] - self.means[i]) / self.scales[i];
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(lat: f64, lon: f64, risk: f64) -> Sample {
        Sample {
            features: [
                lat,
                lon,
                DEFAULT_ELEVATION_M,
                DEFAULT_RIVER_PROXIMITY_KM,
                DEFAULT_RAINFALL_ANNUAL_MM,
            ],
            risk_score: risk,
        }
    }

    #[test]
    fn training_requires_samples() {
        assert!(RiskModel::train(Vec::new()).is_err());
    }

    #[test]
    fn averages_nearest_neighbours() {
        let mut samples: Vec<Sample> = (0..5).map(|i| sample(34.0 + i as f64 * 0.001, -118.2, 90.0)).collect();
        samples.extend((0..5).map(|i| sample(35.0 + i as f64 * 0.001, -117.0, 10.0)));

        let model = RiskModel::train(samples).unwrap();

        assert_eq!(model.predict(34.002, -118.2).unwrap().value(), 90);
        assert_eq!(model.predict(35.002, -117.0).unwrap().value(), 10);
    }

    #[test]
    fn small_training_sets_use_every_sample() {
        let model = RiskModel::train(vec![sample(34.0, -118.0, 30.0), sample(34.1, -118.1, 61.0)]).unwrap();
        assert_eq!(model.predict(34.0, -118.0).unwrap().value(), 45);
    }

    #[test]
    fn rejects_non_finite_input() {
        let model = RiskModel::train(vec![sample(34.0, -118.0, 30.0)]).unwrap();
        assert!(model.predict(f64::NAN, -118.0).is_err());
    }

    #[test]
    fn synthetic_model_scores_stay_in_range() {
        let model = RiskModel::train(dataset::synthetic(dataset::SYNTHETIC_SEED, 100)).unwrap();

        for (lat, lon) in [(34.05, -118.25), (33.9, -118.4), (0.0, 0.0), (-89.0, 179.0)] {
            let score = model.predict(lat, lon).unwrap();
            assert!(score.value() <= 100);
        }
    }

    #[test]
    fn save_then_load_predicts_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("model.json");

        let model = RiskModel::train(dataset::synthetic(7, 40)).unwrap();
        model.save(&path).unwrap();

        let loaded = RiskModel::load(&path).unwrap();
        assert_eq!(loaded.len(), 40);
        assert_eq!(
            loaded.predict(34.05, -118.25).unwrap(),
            model.predict(34.05, -118.25).unwrap()
        );
    }

    #[test]
    fn corrupt_model_file_is_retrained() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model.json");
        std::fs::write(&model_path, b"not json").unwrap();

        let model = RiskModel::load_or_train(&dir.path().join("missing.csv"), &model_path).unwrap();
        assert_eq!(model.len(), dataset::SYNTHETIC_SAMPLES);

        // The retrained model replaced the corrupt file.
        assert!(RiskModel::load(&model_path).is_ok());
    }
}
