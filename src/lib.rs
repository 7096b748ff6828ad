//! siteterm library root.
//! 사이트용 터미널 명령 인터프리터를 Clean Architecture 계층으로 노출한다.

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use interface::cli::{AppComposition, SessionOptions};

/// 라이브러리 직접 호출용: 명령줄들을 순서대로 실행한다.
pub async fn run_lines(options: SessionOptions, lines: &[String]) -> Result<()> {
    let composition = AppComposition::default();
    interface::cli::run_script(&composition, &options, lines).await
}

/// 설정 점검 JSON 출력용 함수.
pub fn inspect_config_pretty_json() -> Result<String> {
    let composition = AppComposition::default();
    composition.inspect_config_usecase().execute()
}
