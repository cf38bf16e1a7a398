use super::{
    cost::CostConfig, genetic::GeneticSearchConfig, grid::GridSearchConfig, traits::ConfigSection,
};
use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub genetic: GeneticSearchConfig,
    #[serde(default)]
    pub grid: GridSearchConfig,
    #[serde(default)]
    pub cost: CostConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), SearchError> {
        self.genetic.validate()?;
        self.grid.validate()?;
        self.cost.validate()?;
        Ok(())
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, SearchError> {
        let config: AppConfig = toml::from_str(contents)
            .map_err(|e| SearchError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, SearchError> {
        toml::to_string_pretty(self)
            .map_err(|e| SearchError::Configuration(format!("Failed to serialize: {}", e)))
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SearchError> {
        let contents = std::fs::read_to_string(path)?;

        let config = AppConfig::from_toml_str(&contents)?;

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SearchError> {
        let toml_str = self.get().to_toml_string()?;

        std::fs::write(path, toml_str)?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply `f` and keep the result only if it validates
    pub fn update<F>(&self, f: F) -> Result<(), SearchError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        let mut updated = config.clone();
        f(&mut updated);
        updated.validate()?;
        *config = updated;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
