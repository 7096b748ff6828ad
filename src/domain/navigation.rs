//! 사용자 입력에서 이동 대상 경로를 만드는 규칙.

use anyhow::{Context, Result};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use url::Url;

// URL path segment 하나에 그대로 둘 수 없는 문자 집합.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// 소문자화, `'` 제거, 공백을 `-`로 치환한다.
pub fn normalize_slug(raw: &str) -> String {
    raw.to_lowercase().replace('\'', "").replace(' ', "-")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    Home,
    Page(String),
    Blog(String),
}

impl NavigationTarget {
    /// 원시 인자를 정규화해 페이지 대상을 만든다.
    pub fn page(raw: &str) -> Self {
        Self::Page(normalize_slug(raw))
    }

    /// 원시 인자를 정규화해 블로그 대상을 만든다.
    pub fn blog(raw: &str) -> Self {
        Self::Blog(normalize_slug(raw))
    }

    /// 사이트 루트 기준 경로.
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Page(slug) => format!("/{}", encode_segment(slug)),
            Self::Blog(slug) => format!("/blog/{}", encode_segment(slug)),
        }
    }

    /// 사이트 base URL에 경로를 붙여 최종 이동 URL을 만든다.
    pub fn resolve(&self, base_url: &Url) -> Result<Url> {
        base_url
            .join(&self.path())
            .with_context(|| format!("failed to build navigation URL for {}", self.path()))
    }
}

fn encode_segment(slug: &str) -> String {
    utf8_percent_encode(slug, SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_quotes_case_and_spaces() {
        assert_eq!(normalize_slug("'My Page'"), "my-page");
        assert_eq!(normalize_slug("Don't Panic Now"), "dont-panic-now");
    }

    #[test]
    fn builds_paths_per_target_kind() {
        assert_eq!(NavigationTarget::Home.path(), "/");
        assert_eq!(NavigationTarget::page("'My Page'").path(), "/my-page");
        assert_eq!(NavigationTarget::blog("Beta").path(), "/blog/beta");
    }

    #[test]
    fn encodes_characters_that_would_break_the_path() {
        assert_eq!(NavigationTarget::page("a/b?c").path(), "/a%2Fb%3Fc");
    }

    #[test]
    fn resolves_against_base_url() {
        let base = Url::parse("https://example.com/").unwrap();
        let url = NavigationTarget::blog("Alpha").resolve(&base).unwrap();
        assert_eq!(url.as_str(), "https://example.com/blog/alpha");

        let home = NavigationTarget::Home.resolve(&base).unwrap();
        assert_eq!(home.as_str(), "https://example.com/");
    }
}
