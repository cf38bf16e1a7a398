use crate::error::SearchError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), SearchError>;
}

pub(crate) fn invalid(section: &str, message: impl AsRef<str>) -> SearchError {
    SearchError::Configuration(format!("[{}] {}", section, message.as_ref()))
}
