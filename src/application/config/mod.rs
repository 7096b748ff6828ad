//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_PROMPT: &str = "preston@blackburn:~$ ";
pub const DEFAULT_GREETING: &str = "try running `help` for more info";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 콘텐츠 API와 이동 대상이 되는 사이트
    #[serde(default)]
    pub site: SiteConfig,
    /// 터미널 표시 설정
    #[serde(default)]
    pub terminal: TerminalConfig,
    /// 이동(navigation) 처리 설정
    #[serde(default)]
    pub navigation: NavigationConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SiteConfig {
    /// 사이트 base URL (예: https://example.com)
    pub base_url: Option<String>,
    /// 콘텐츠 목록 조회 타임아웃(ms)
    pub request_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct TerminalConfig {
    pub prompt: Option<String>,
    /// 세션 시작 시 한 번 출력하는 안내 문구
    pub greeting: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct NavigationConfig {
    /// 이동 URL을 열 명령. URL이 마지막 인자로 붙는다 (예: ["xdg-open"])
    pub open_command: Option<Vec<String>>,
}

impl Config {
    pub fn base_url(&self) -> String {
        self.site
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn request_timeout_ms(&self) -> u64 {
        self.site
            .request_timeout_ms
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS)
    }

    pub fn prompt(&self) -> String {
        self.terminal
            .prompt
            .clone()
            .unwrap_or_else(|| DEFAULT_PROMPT.to_string())
    }

    pub fn greeting(&self) -> String {
        self.terminal
            .greeting
            .clone()
            .unwrap_or_else(|| DEFAULT_GREETING.to_string())
    }

    /// 비어 있는 항목을 걸러낸 open 명령. 설정이 없으면 `None`.
    pub fn open_command(&self) -> Option<Vec<String>> {
        self.navigation
            .open_command
            .as_ref()
            .filter(|argv| argv.iter().any(|s| !s.trim().is_empty()))
            .cloned()
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.site.merge_from(other.site);
        self.terminal.merge_from(other.terminal);
        self.navigation.merge_from(other.navigation);
    }
}

impl SiteConfig {
    pub fn merge_from(&mut self, other: SiteConfig) {
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.request_timeout_ms.is_some() {
            self.request_timeout_ms = other.request_timeout_ms;
        }
    }
}

impl TerminalConfig {
    pub fn merge_from(&mut self, other: TerminalConfig) {
        if other.prompt.is_some() {
            self.prompt = other.prompt;
        }
        if other.greeting.is_some() {
            self.greeting = other.greeting;
        }
    }
}

impl NavigationConfig {
    pub fn merge_from(&mut self, other: NavigationConfig) {
        if other.open_command.is_some() {
            self.open_command = other.open_command;
        }
    }
}
