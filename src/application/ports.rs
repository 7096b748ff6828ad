//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use anyhow::Result;
use async_trait::async_trait;
use url::Url;

use crate::application::config::Config;

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 한 줄 입출력 화면 포트. 명령 개념은 없다.
pub trait Terminal: Send + Sync {
    /// 줄바꿈 없이 출력
    fn write(&self, text: &str);
    /// 출력 후 줄바꿈
    fn write_line(&self, text: &str);
    /// 표시된 출력 전체 지우기
    fn clear(&self);
}

/// 페이지/블로그 목록을 제공하는 콘텐츠 디렉터리 포트.
#[async_trait]
pub trait ContentDirectory: Send + Sync {
    async fn list_pages(&self) -> Result<Vec<String>>;
    async fn list_blogs(&self) -> Result<Vec<String>>;
}

/// 세션을 끝내는 이동 포트. 되돌릴 수 없다.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn navigate(&self, url: &Url) -> Result<()>;
}
