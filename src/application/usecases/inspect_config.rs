//! 적용 중인 설정을 확인하는 유스케이스.

use anyhow::Result;

use crate::application::ports::ConfigRepository;

/// 병합된 설정과 탐색 경로를 JSON으로 보여준다.
pub struct InspectConfigUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
}

impl InspectConfigUseCase<'_> {
    pub fn execute(&self) -> Result<String> {
        self.config_repo.inspect_pretty_json()
    }
}
