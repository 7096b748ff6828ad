//! 애플리케이션 조립(composition root) 모듈.

use std::sync::Arc;

use anyhow::{Context, Result};
use url::Url;

use crate::application::config::Config;
use crate::application::interpreter::{Interpreter, SessionSettings};
use crate::application::ports::{ConfigRepository, Terminal};
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::infrastructure::adapters::{ConsoleTerminal, JsonConfigRepository, OpenNavigator};
use crate::infrastructure::site_api::SiteApiClient;
use crate::interface::cli::command::SessionOptions;

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    terminal: Arc<dyn Terminal>,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self {
            config_repo: JsonConfigRepository,
            terminal: Arc::new(ConsoleTerminal::new()),
        }
    }
}

impl AppComposition {
    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    /// 설정과 CLI 옵션으로 인터프리터 세션을 구성한다.
    pub fn interpreter(&self, options: &SessionOptions) -> Result<Interpreter> {
        let mut config = self.config_repo.load()?;
        apply_options(&mut config, options);

        let raw_base = config.base_url();
        let base_url =
            Url::parse(&raw_base).with_context(|| format!("invalid site base URL: {raw_base}"))?;
        tracing::debug!(%base_url, "session configured");

        let directory = SiteApiClient::new(base_url.clone(), config.request_timeout_ms())?;
        let navigator = OpenNavigator::new(self.terminal.clone(), config.open_command());

        Ok(Interpreter::new(
            self.terminal.clone(),
            Arc::new(directory),
            Arc::new(navigator),
            SessionSettings {
                base_url,
                prompt: config.prompt(),
                greeting: config.greeting(),
            },
        ))
    }
}

fn apply_options(config: &mut Config, options: &SessionOptions) {
    if let Some(base_url) = &options.base_url {
        config.site.base_url = Some(base_url.clone());
    }
}
