//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::LoadedConfig;
use crate::application::config::Config;

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub raw: Config,
    pub effective: EffectiveSettings,
}

/// 기본값까지 반영한 최종 값.
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveSettings {
    pub base_url: String,
    pub request_timeout_ms: u64,
    pub prompt: String,
    pub greeting: String,
    pub open_command: Option<Vec<String>>,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = &loaded.config;
        Self {
            searched_paths: display_paths(&loaded.searched_paths),
            loaded_paths: display_paths(&loaded.loaded_paths),
            effective: EffectiveSettings {
                base_url: config.base_url(),
                request_timeout_ms: config.request_timeout_ms(),
                prompt: config.prompt(),
                greeting: config.greeting(),
                open_command: config.open_command(),
            },
            raw: loaded.config,
        }
    }
}

fn display_paths(paths: &[std::path::PathBuf]) -> Vec<String> {
    paths.iter().map(|p| p.display().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn effective_values_fall_back_to_defaults() {
        let inspection = ConfigInspection::from_loaded(LoadedConfig {
            config: Config::default(),
            searched_paths: vec![PathBuf::from(".siteterm/config.json")],
            loaded_paths: Vec::new(),
        });

        let json = serde_json::to_value(&inspection).unwrap();
        assert_eq!(
            json.pointer("/effective/base_url").and_then(|v| v.as_str()),
            Some(crate::application::config::DEFAULT_BASE_URL)
        );
        assert_eq!(json["loaded_paths"].as_array().map(Vec::len), Some(0));
    }
}
