use std::{env, fs, io, path::PathBuf};

use tracing::{info, warn};

use crate::Food;

pub struct Config {
    pub port: u16,
    /// JSON array of foods served from startup.
    pub seed_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: load_port("PORT", 3333),
            seed_path: env::var("FOODS_SEED").ok().map(PathBuf::from),
        }
    }

    pub fn seed(&self) -> Result<Vec<Food>, io::Error> {
        let Some(path) = &self.seed_path else {
            return Ok(Vec::new());
        };
        let raw = fs::read_to_string(path)?;
        let foods: Vec<Food> = serde_json::from_str(&raw)?;
        info!("Seeded {} foods from {}", foods.len(), path.display());
        Ok(foods)
    }
}

fn load_port(key: &str, default: u16) -> u16 {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}
