//! 마지막으로 조회한 블로그 제목 캐시.

/// 화면에는 1부터 번호를 매겨 보여주는 블로그 제목 목록.
/// 새로 조회할 때마다 병합하지 않고 통째로 교체한다.
#[derive(Debug, Clone, Default)]
pub struct BlogCatalog {
    titles: Vec<String>,
}

impl BlogCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, titles: Vec<String>) {
        self.titles = titles;
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// 1부터 시작하는 번호로 제목을 찾는다.
    pub fn title_at(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|idx| self.titles.get(idx))
            .map(String::as_str)
    }

    /// 숫자로만 된 참조는 현재 캐시의 제목으로 바꾼다.
    /// 범위를 벗어나거나 캐시가 비어 있으면 입력을 그대로 돌려준다.
    pub fn resolve_reference(&self, raw: &str) -> String {
        if !is_numeric(raw) {
            return raw.to_string();
        }

        let resolved = raw.parse::<usize>().ok().and_then(|idx| self.title_at(idx));
        match resolved {
            Some(title) => title.to_string(),
            None => {
                tracing::debug!(
                    reference = raw,
                    cached = self.titles.len(),
                    "numeric blog reference not in cache; using it literally"
                );
                raw.to_string()
            }
        }
    }
}

fn is_numeric(raw: &str) -> bool {
    !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(titles: &[&str]) -> BlogCatalog {
        let mut catalog = BlogCatalog::new();
        catalog.replace(titles.iter().map(ToString::to_string).collect());
        catalog
    }

    #[test]
    fn title_lookup_is_one_based() {
        let catalog = catalog(&["Alpha", "Beta"]);
        assert_eq!(catalog.title_at(1), Some("Alpha"));
        assert_eq!(catalog.title_at(2), Some("Beta"));
        assert_eq!(catalog.title_at(0), None);
        assert_eq!(catalog.title_at(3), None);
    }

    #[test]
    fn numeric_reference_resolves_to_title() {
        assert_eq!(catalog(&["Alpha", "Beta"]).resolve_reference("2"), "Beta");
    }

    #[test]
    fn out_of_range_reference_falls_through_literally() {
        let catalog = catalog(&["Alpha", "Beta"]);
        assert_eq!(catalog.resolve_reference("5"), "5");
        assert_eq!(catalog.resolve_reference("0"), "0");
        assert_eq!(BlogCatalog::new().resolve_reference("1"), "1");
    }

    #[test]
    fn non_numeric_reference_is_unchanged() {
        let catalog = catalog(&["Alpha"]);
        assert_eq!(catalog.resolve_reference("1 Alpha"), "1 Alpha");
        assert_eq!(catalog.resolve_reference("-1"), "-1");
    }

    #[test]
    fn replace_overwrites_instead_of_merging() {
        let mut catalog = catalog(&["Alpha", "Beta"]);
        catalog.replace(vec!["Gamma".to_string()]);
        assert_eq!(catalog.titles(), ["Gamma".to_string()]);
        assert_eq!(catalog.resolve_reference("2"), "2");
    }
}
