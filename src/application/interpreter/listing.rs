//! `ls` 계열 비동기 목록 조회 단계.

use std::sync::{Mutex, PoisonError};

use anyhow::Result;

use crate::application::commands::Listing;
use crate::application::ports::{ContentDirectory, Terminal};
use crate::domain::catalog::BlogCatalog;

/// 조회 결과를 출력하고, 블로그 목록이면 캐시를 교체한다.
/// 실패는 오류 한 줄로 바뀌며 재시도하지 않는다.
pub(super) async fn run_listing(
    listing: Listing,
    directory: &dyn ContentDirectory,
    terminal: &dyn Terminal,
    catalog: &Mutex<BlogCatalog>,
) {
    tracing::debug!(?listing, "listing started");

    let result = match listing {
        Listing::Pages => directory
            .list_pages()
            .await
            .map(|pages| write_pages(terminal, &pages)),
        Listing::Blogs => directory.list_blogs().await.map(|blogs| {
            replace_catalog(catalog, blogs.clone());
            write_blogs(terminal, &blogs);
        }),
        Listing::All => fetch_all(directory).await.map(|(pages, blogs)| {
            replace_catalog(catalog, blogs.clone());
            write_pages(terminal, &pages);
            write_blogs(terminal, &blogs);
        }),
    };

    if let Err(err) = result {
        tracing::warn!(?listing, "listing failed: {err:#}");
        terminal.write_line(&format!(
            "Error: failed to list {}: {err:#}",
            listing_label(listing)
        ));
    }
}

// 두 조회를 동시에 시작하고 둘 다 끝난 뒤에만 결과를 돌려준다.
// 하나라도 실패하면 성공한 쪽 결과도 버린다.
async fn fetch_all(directory: &dyn ContentDirectory) -> Result<(Vec<String>, Vec<String>)> {
    futures::try_join!(directory.list_pages(), directory.list_blogs())
}

fn replace_catalog(catalog: &Mutex<BlogCatalog>, blogs: Vec<String>) {
    let count = blogs.len();
    catalog
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .replace(blogs);
    tracing::debug!(count, "blog catalog replaced");
}

fn write_pages(terminal: &dyn Terminal, pages: &[String]) {
    terminal.write_line("Pages:");
    if pages.is_empty() {
        terminal.write_line("  (none)");
    }
    for page in pages {
        terminal.write_line(&format!("  {page}"));
    }
}

fn write_blogs(terminal: &dyn Terminal, blogs: &[String]) {
    terminal.write_line("Blogs:");
    if blogs.is_empty() {
        terminal.write_line("  (none)");
    }
    for (idx, title) in blogs.iter().enumerate() {
        terminal.write_line(&format!("  {}. {title}", idx + 1));
    }
}

fn listing_label(listing: Listing) -> &'static str {
    match listing {
        Listing::Pages => "pages",
        Listing::Blogs => "blogs",
        Listing::All => "content",
    }
}
