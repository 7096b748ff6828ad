//! 설정 파일 탐색/병합 로더.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::config::Config;

pub const CONFIG_ENV: &str = "SITETERM_CONFIG";

#[derive(Debug, Clone)]
pub(crate) struct LoadedConfig {
    pub config: Config,
    pub searched_paths: Vec<PathBuf>,
    pub loaded_paths: Vec<PathBuf>,
}

/// 우선순위 경로를 순회해 JSON 설정을 병합한다.
pub(crate) fn load_merged_config() -> Result<LoadedConfig> {
    load_from_paths(config_paths())
}

/// 주어진 경로를 낮은 우선순위부터 병합한다. 없는 파일은 건너뛴다.
pub(crate) fn load_from_paths(paths: Vec<PathBuf>) -> Result<LoadedConfig> {
    let mut merged = Config::default();
    let mut loaded_paths = Vec::new();

    for path in &paths {
        if !path.exists() {
            continue;
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let parsed: Config = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))?;
        merged.merge_from(parsed);
        loaded_paths.push(path.to_path_buf());
        tracing::debug!(path = %path.display(), "config loaded");
    }

    Ok(LoadedConfig {
        config: merged,
        searched_paths: paths,
        loaded_paths,
    })
}

/// 시스템 + 사용자 + 프로젝트 + 명시 경로 순으로 병합 경로를 구성한다.
pub fn config_paths() -> Vec<PathBuf> {
    // 낮은 우선순위 -> 높은 우선순위 순서로 병합됨.
    let mut paths = vec![PathBuf::from("/etc/siteterm/config.json")];

    if let Some(base) = dirs::config_dir() {
        paths.push(base.join("siteterm").join("config.json"));
    }

    paths.push(PathBuf::from(".siteterm/config.json"));

    if let Ok(path) = env::var(CONFIG_ENV) {
        paths.push(Path::new(&path).to_path_buf());
    }

    dedup_paths(paths)
}

fn dedup_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for p in paths {
        if !out.contains(&p) {
            out.push(p);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn merges_in_priority_order_and_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        let low = write(
            dir.path(),
            "low.json",
            r#"{"site": {"base_url": "https://low.example", "request_timeout_ms": 900}}"#,
        );
        let high = write(
            dir.path(),
            "high.json",
            r#"{"site": {"base_url": "https://high.example"}}"#,
        );
        let missing = dir.path().join("missing.json");

        let loaded = load_from_paths(vec![low.clone(), missing, high.clone()]).unwrap();

        assert_eq!(loaded.config.base_url(), "https://high.example");
        assert_eq!(loaded.config.request_timeout_ms(), 900);
        assert_eq!(loaded.loaded_paths, vec![low, high]);
        assert_eq!(loaded.searched_paths.len(), 3);
    }

    #[test]
    fn invalid_json_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let broken = write(dir.path(), "broken.json", "{ nope");

        let err = load_from_paths(vec![broken]).unwrap_err();

        assert!(format!("{err:#}").contains("broken.json"));
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let paths = dedup_paths(vec![
            PathBuf::from("a"),
            PathBuf::from("b"),
            PathBuf::from("a"),
        ]);
        assert_eq!(paths, vec![PathBuf::from("a"), PathBuf::from("b")]);
    }
}
