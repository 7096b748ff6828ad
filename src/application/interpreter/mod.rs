//! 명령 인터프리터.
//! 원시 입력 덩어리를 받아 버퍼를 편집하고, 제출된 줄을 명령 테이블로 실행한다.

mod listing;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use url::Url;

use crate::application::commands::{CommandContext, Listing, Reply, dispatch};
use crate::application::ports::{ContentDirectory, Navigator, Terminal};
use crate::application::schedule::{Stage, StagedAction};
use crate::domain::catalog::BlogCatalog;
use crate::domain::command::Command;
use crate::domain::input::{InputBuffer, Keystroke, decode_chunk};
use crate::domain::navigation::NavigationTarget;

use listing::run_listing;

/// 이동 전 점 3개를 찍는 시점(시작 기준).
pub const DOT_DELAYS_MS: [u64; 3] = [150, 300, 500];
/// 실제 이동 시점(시작 기준). 마지막 점과 같은 시점이다.
pub const NAVIGATE_AT_MS: u64 = 500;

const BACKSPACE_ECHO: &str = "\x08 \x08";

/// 관찰 가능한 인터프리터 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Accepting,
    /// 목록 조회가 진행 중. 입력은 계속 받는다.
    Awaiting,
}

/// 세션별 표시/이동 설정.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub base_url: Url,
    pub prompt: String,
    pub greeting: String,
}

pub struct Interpreter {
    terminal: Arc<dyn Terminal>,
    directory: Arc<dyn ContentDirectory>,
    navigator: Arc<dyn Navigator>,
    settings: SessionSettings,
    buffer: InputBuffer,
    catalog: Arc<Mutex<BlogCatalog>>,
    in_flight: Arc<AtomicUsize>,
    fetches: Vec<JoinHandle<()>>,
    staged: Vec<StagedAction>,
    navigated: Arc<watch::Sender<Option<Url>>>,
}

impl Interpreter {
    pub fn new(
        terminal: Arc<dyn Terminal>,
        directory: Arc<dyn ContentDirectory>,
        navigator: Arc<dyn Navigator>,
        settings: SessionSettings,
    ) -> Self {
        let (navigated, _) = watch::channel(None);
        Self {
            terminal,
            directory,
            navigator,
            settings,
            buffer: InputBuffer::new(),
            catalog: Arc::new(Mutex::new(BlogCatalog::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            fetches: Vec::new(),
            staged: Vec::new(),
            navigated: Arc::new(navigated),
        }
    }

    /// 안내 문구와 첫 프롬프트를 출력한다.
    pub fn start(&self) {
        self.terminal.write_line(&self.settings.greeting);
        self.prompt();
    }

    /// 입력 덩어리 하나를 처리한다. 여러 키 입력이 섞여 있어도 된다.
    pub fn feed(&mut self, chunk: &str) {
        for key in decode_chunk(chunk) {
            match key {
                Keystroke::Char(ch) => {
                    self.buffer.push(ch);
                    self.terminal.write(ch.encode_utf8(&mut [0; 4]));
                }
                Keystroke::Backspace => {
                    if self.buffer.pop().is_some() {
                        self.terminal.write(BACKSPACE_ECHO);
                    }
                }
                Keystroke::Submit => self.submit(),
            }
        }
    }

    pub fn mode(&self) -> Mode {
        if self.in_flight.load(Ordering::SeqCst) > 0 {
            Mode::Awaiting
        } else {
            Mode::Accepting
        }
    }

    /// 아직 제출되지 않은 입력.
    pub fn pending_input(&self) -> String {
        self.buffer.as_string()
    }

    /// 현재 블로그 캐시 스냅샷.
    pub fn blog_titles(&self) -> Vec<String> {
        self.lock_catalog().titles().to_vec()
    }

    /// 마지막으로 이동한 URL을 구독한다. 이동이 일어나면 세션이 끝난다.
    pub fn subscribe_navigation(&self) -> watch::Receiver<Option<Url>> {
        self.navigated.subscribe()
    }

    /// 진행 중인 조회와 지연 이동이 모두 끝날 때까지 기다린다.
    pub async fn wait_idle(&mut self) {
        for handle in self.fetches.drain(..) {
            if let Err(err) = handle.await
                && err.is_panic()
            {
                tracing::warn!("listing task panicked: {err}");
            }
        }
        for action in self.staged.drain(..) {
            action.wait().await;
        }
    }

    /// 남은 작업을 모두 취소한다. 세션을 강제로 끝낼 때만 사용한다.
    pub fn shutdown(&mut self) {
        for handle in self.fetches.drain(..) {
            handle.abort();
        }
        for action in self.staged.drain(..) {
            action.cancel();
        }
    }

    fn prompt(&self) {
        self.terminal.write(&format!("\r\n{}", self.settings.prompt));
    }

    fn submit(&mut self) {
        self.terminal.write_line("");
        let line = self.buffer.take();
        self.fetches.retain(|handle| !handle.is_finished());
        self.staged.retain(|action| !action.is_finished());

        let deferred = match Command::parse(&line) {
            Some(command) => self.execute(&command),
            None => false,
        };

        if !deferred {
            self.prompt();
        }
    }

    /// 명령을 실행하고, 프롬프트를 비동기 조회 뒤로 미뤘으면 `true`.
    fn execute(&mut self, command: &Command) -> bool {
        tracing::debug!(verb = %command.verb, sub_verb = ?command.sub_verb, "dispatch");
        let reply = {
            let catalog = self.lock_catalog();
            dispatch(command, &CommandContext { catalog: &catalog })
        };

        match reply {
            Reply::Lines(lines) => {
                for line in &lines {
                    self.terminal.write_line(line);
                }
                false
            }
            Reply::Clear => {
                self.terminal.clear();
                false
            }
            Reply::Navigate { announce, target } => {
                self.begin_navigation(&announce, &target);
                false
            }
            Reply::Fetch(listing) => {
                self.begin_listing(listing);
                true
            }
        }
    }

    fn begin_listing(&mut self, listing: Listing) {
        let terminal = self.terminal.clone();
        let directory = self.directory.clone();
        let catalog = self.catalog.clone();
        let in_flight = self.in_flight.clone();
        let prompt = self.settings.prompt.clone();

        let pending = InFlight::enter(in_flight);
        let handle = tokio::spawn(async move {
            let _pending = pending;
            run_listing(listing, directory.as_ref(), terminal.as_ref(), &catalog).await;
            terminal.write(&format!("\r\n{prompt}"));
        });
        self.fetches.push(handle);
    }

    fn begin_navigation(&mut self, announce: &str, target: &NavigationTarget) {
        let url = match target.resolve(&self.settings.base_url) {
            Ok(url) => url,
            Err(err) => {
                self.terminal.write_line(&format!("Error: {err:#}"));
                return;
            }
        };

        self.terminal.write_line(announce);

        let mut stages: Vec<Stage> = DOT_DELAYS_MS
            .iter()
            .enumerate()
            .map(|(idx, ms)| {
                let terminal = self.terminal.clone();
                let dot = if idx + 1 == DOT_DELAYS_MS.len() { ".\r\n" } else { "." };
                Stage::new(Duration::from_millis(*ms), move || async move {
                    terminal.write(dot);
                })
            })
            .collect();

        let terminal = self.terminal.clone();
        let navigator = self.navigator.clone();
        let navigated = self.navigated.clone();
        stages.push(Stage::new(
            Duration::from_millis(NAVIGATE_AT_MS),
            move || async move {
                tracing::debug!(%url, "navigating");
                if let Err(err) = navigator.navigate(&url).await {
                    tracing::warn!(%url, "navigation failed: {err:#}");
                    terminal.write_line(&format!("Error: navigation failed: {err:#}"));
                    return;
                }
                navigated.send_replace(Some(url));
            },
        ));

        self.staged.push(StagedAction::spawn(stages));
    }

    fn lock_catalog(&self) -> std::sync::MutexGuard<'_, BlogCatalog> {
        self.catalog.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// 진행 중인 조회 수. 작업이 끝나거나 취소되면 drop에서 감소한다.
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn enter(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
