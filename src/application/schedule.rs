//! 시작 시각 기준 고정 오프셋으로 실행되는 단계적 지연 작업.

use std::future::Future;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

type StageFn = Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send>;

/// 시작 후 `at` 시점에 실행할 한 단계.
pub struct Stage {
    at: Duration,
    run: StageFn,
}

impl Stage {
    pub fn new<F, Fut>(at: Duration, run: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            at,
            run: Box::new(move || run().boxed()),
        }
    }
}

/// 취소 가능한 단계적 작업 하나.
/// 여러 작업 사이에 상호 배제는 없다. 동시에 시작된 작업은 각자 끝까지 실행된다.
pub struct StagedAction {
    handle: JoinHandle<()>,
}

impl StagedAction {
    /// 단계들을 오프셋 순서로 정렬해 백그라운드에서 실행한다.
    pub fn spawn(mut stages: Vec<Stage>) -> Self {
        stages.sort_by_key(|stage| stage.at);
        let start = Instant::now();

        let handle = tokio::spawn(async move {
            for stage in stages {
                sleep_until(start + stage.at).await;
                (stage.run)().await;
            }
        });

        Self { handle }
    }

    /// 아직 실행되지 않은 단계를 모두 버린다.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// 완료(또는 취소)될 때까지 기다린다.
    pub async fn wait(self) {
        if let Err(err) = self.handle.await
            && err.is_panic()
        {
            tracing::warn!("staged action panicked: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, impl Fn(&'static str) -> Stage) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let shared = log.clone();
        let stage_at = move |label: &'static str| {
            let log = shared.clone();
            let ms = match label {
                "a" => 150,
                "b" => 300,
                _ => 500,
            };
            Stage::new(Duration::from_millis(ms), move || async move {
                log.lock().unwrap().push(label);
            })
        };
        (log, stage_at)
    }

    #[tokio::test(start_paused = true)]
    async fn runs_stages_in_offset_order() {
        let (log, stage) = recorder();
        let action = StagedAction::spawn(vec![stage("c"), stage("a"), stage("b")]);

        action.wait().await;

        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test(start_paused = true)]
    async fn offsets_are_measured_from_start() {
        let (log, stage) = recorder();
        let action = StagedAction::spawn(vec![stage("a"), stage("b"), stage("c")]);

        tokio::time::sleep(Duration::from_millis(320)).await;
        assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);

        action.wait().await;
        assert_eq!(log.lock().unwrap().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_remaining_stages() {
        let (log, stage) = recorder();
        let action = StagedAction::spawn(vec![stage("a"), stage("c")]);

        tokio::time::sleep(Duration::from_millis(200)).await;
        action.cancel();
        action.wait().await;

        assert_eq!(*log.lock().unwrap(), vec!["a"]);
    }
}
