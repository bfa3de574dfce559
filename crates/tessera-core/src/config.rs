//! # Classifier Configuration
//!
//! Everything the classification pipeline needs besides its search backend.
//! Deserializable from JSON; missing fields take defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::default_workflow;

/// Engine and workflow settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Multi-file torrents with more files than this are `OverThreshold`.
    pub files_threshold: usize,
    /// Rule definition compiled into the workflow.
    pub workflow: Value,
    /// Upper bound on one search call, in milliseconds; `null` disables it.
    #[serde(with = "millis")]
    pub search_timeout: Option<Duration>,
    /// Keys of classifiers to leave out of the engine.
    pub disabled_classifiers: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            files_threshold: 100,
            workflow: default_workflow(),
            search_timeout: Some(Duration::from_secs(10)),
            disabled_classifiers: Vec::new(),
        }
    }
}

impl ClassifierConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_files_threshold(mut self, threshold: usize) -> Self {
        self.files_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_workflow(mut self, workflow: Value) -> Self {
        self.workflow = workflow;
        self
    }

    #[must_use]
    pub fn with_search_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.search_timeout = timeout;
        self
    }

    /// Leaves the classifier with this key out of the engine.
    #[must_use]
    pub fn with_disabled_classifier(mut self, key: impl Into<String>) -> Self {
        self.disabled_classifiers.push(key.into());
        self
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => serializer.serialize_some(&u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn defaults() {
        let config = ClassifierConfig::new();
        assert_eq!(config.files_threshold, 100);
        assert_eq!(config.workflow, default_workflow());
        assert_eq!(config.search_timeout, Some(Duration::from_millis(10_000)));
        assert!(config.disabled_classifiers.is_empty());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: ClassifierConfig =
            serde_json::from_value(json!({"files_threshold": 5, "search_timeout": 250})).unwrap();
        assert_eq!(config.files_threshold, 5);
        assert_eq!(config.search_timeout, Some(Duration::from_millis(250)));
        assert_eq!(config.workflow, default_workflow());

        let config: ClassifierConfig = serde_json::from_value(json!({"search_timeout": null})).unwrap();
        assert_eq!(config.search_timeout, None);
    }

    #[test]
    fn builders_and_serialization() {
        let config = ClassifierConfig::new()
            .with_files_threshold(3)
            .with_workflow(json!(["parse_video_content"]))
            .with_search_timeout(Some(Duration::from_millis(1500)))
            .with_disabled_classifier("release");
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["search_timeout"], 1500);
        assert_eq!(value["disabled_classifiers"], json!(["release"]));

        let back: ClassifierConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(serde_json::from_value::<ClassifierConfig>(json!({"files_threshold": "many"})).is_err());
    }
}
