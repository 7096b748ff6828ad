//! 이동 포트 구현 어댑터.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use tokio::process::Command;
use url::Url;

use crate::application::ports::{Navigator, Terminal};

/// 이동 URL을 출력하고, 설정된 경우 외부 명령으로 연다.
pub struct OpenNavigator {
    terminal: Arc<dyn Terminal>,
    open_command: Option<Vec<String>>,
}

impl OpenNavigator {
    pub fn new(terminal: Arc<dyn Terminal>, open_command: Option<Vec<String>>) -> Self {
        Self {
            terminal,
            open_command,
        }
    }
}

#[async_trait]
impl Navigator for OpenNavigator {
    async fn navigate(&self, url: &Url) -> Result<()> {
        self.terminal.write_line(&format!("-> {url}"));

        let Some(argv) = &self.open_command else {
            return Ok(());
        };
        let Some((program, args)) = argv.split_first() else {
            return Ok(());
        };

        let status = Command::new(program)
            .args(args)
            .arg(url.as_str())
            .status()
            .await
            .with_context(|| format!("failed to launch {program}"))?;

        if !status.success() {
            bail!("{program} exited with: {status}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Captured(Mutex<String>);

    impl Terminal for Captured {
        fn write(&self, text: &str) {
            self.0.lock().unwrap().push_str(text);
        }

        fn write_line(&self, text: &str) {
            self.write(text);
            self.write("\n");
        }

        fn clear(&self) {}
    }

    #[tokio::test]
    async fn prints_url_without_open_command() {
        let terminal = Arc::new(Captured::default());
        let navigator = OpenNavigator::new(terminal.clone(), None);

        let url = Url::parse("https://example.com/blog/alpha").unwrap();
        navigator.navigate(&url).await.unwrap();

        assert_eq!(
            *terminal.0.lock().unwrap(),
            "-> https://example.com/blog/alpha\n"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_open_command_is_reported() {
        let terminal = Arc::new(Captured::default());
        let navigator = OpenNavigator::new(terminal, Some(vec!["false".to_string()]));

        let url = Url::parse("https://example.com/").unwrap();
        let err = navigator.navigate(&url).await.unwrap_err();

        assert!(err.to_string().contains("false exited with"));
    }
}
