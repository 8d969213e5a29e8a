use std::env::VarError;
use std::path::PathBuf;

use anyhow::anyhow;

pub const DEFAULT_LISTEN_PORT: u16 = 5000;
pub const DEFAULT_MODEL_PATH: &str = "data/trained_model.json";
pub const DEFAULT_DATA_PATH: &str = "data/sample_flood_data.csv";

pub const VARIABLES: [&str; 3] = ["LISTEN_PORT", "MODEL_PATH", "DATA_PATH"];

pub struct Config {
    pub listen_port: u16,
    pub model_path: PathBuf,
    pub data_path: PathBuf,
}

impl Config {
    pub fn env() -> anyhow::Result<Self> {
        let listen_port = match env_opt("LISTEN_PORT")? {
            Some(port) => port
                .parse()
                .map_err(|e| anyhow!("LISTEN_PORT {port:?} is not a valid port: {e}"))?,
            None => DEFAULT_LISTEN_PORT,
        };

        let model_path = env_opt("MODEL_PATH")?
            .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string())
            .into();

        let data_path = env_opt("DATA_PATH")?
            .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string())
            .into();

        Ok(Self {
            listen_port,
            model_path,
            data_path,
        })
    }

    pub fn log(&self) {
        log::info!("listen port: {}", self.listen_port);
        log::info!("model path: {}", self.model_path.display());
        log::info!("training data path: {}", self.data_path.display());
    }
}

fn env_opt(name: &str) -> anyhow::Result<Option<String>> {
    match std::env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(anyhow!("{name} value is not valid unicode")),
    }
}
