pub mod cost;
pub mod genetic;
pub mod grid;
pub mod manager;
pub mod traits;

pub use cost::{CostConfig, TieBreak};
pub use genetic::GeneticSearchConfig;
pub use grid::GridSearchConfig;
pub use manager::{AppConfig, ConfigManager};
pub use traits::ConfigSection;
