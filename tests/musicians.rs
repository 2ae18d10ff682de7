mod common;

use common::{config, fixture, listing_page, musician, CountingFetcher, BASE_URL};
use scaruffi::{ErrorKind, Scaruffi};

const PER_PAGE: usize = 1000;
const TOTAL: usize = 7300;

/// A listing split over 8 pages of 1000 names (the last one partial).
fn paged_listing() -> (CountingFetcher, Vec<String>) {
    let mut fetcher = CountingFetcher::new();
    let mut paths = Vec::new();
    for (page, start) in (0..TOTAL).step_by(PER_PAGE).enumerate() {
        let path = format!("/music/groups{page}.html");
        fetcher = fetcher.with_page(&path, listing_page(start..(start + PER_PAGE).min(TOTAL)));
        paths.push(path);
    }
    (fetcher, paths)
}

#[tokio::test]
async fn single_index_page() {
    let fetcher = CountingFetcher::new().with_page("/music/groups.html", fixture("musicians.html"));
    let site = Scaruffi::with_fetcher(config(), &fetcher);

    let all = site.get_musicians(0, None).await.unwrap();
    assert_eq!(
        all,
        ["Captain Beefheart", "Velvet Underground", "Doors", "Can", "Faust", "Tim Buckley"]
    );
    assert_eq!(site.get_musicians(2, Some(2)).await.unwrap(), ["Doors", "Can"]);
    assert_eq!(site.get_musicians(5, Some(20)).await.unwrap(), ["Tim Buckley"]);
    assert!(site.get_musicians(6, Some(20)).await.unwrap().is_empty());
}

#[tokio::test]
async fn deep_window_only_fetches_needed_pages() {
    let (fetcher, paths) = paged_listing();
    let site = Scaruffi::with_fetcher(config().with_musician_pages(paths), &fetcher);

    let window = site.get_musicians(5555, Some(5)).await.unwrap();
    let expected: Vec<_> = (5555..5560).map(musician).collect();
    assert_eq!(window, expected);

    let calls = fetcher.calls();
    assert_eq!(calls.len(), 6);
    assert_eq!(calls.last().unwrap(), &format!("{BASE_URL}/music/groups5.html"));
}

#[tokio::test]
async fn windows_agree_with_the_full_listing() {
    let (fetcher, paths) = paged_listing();
    let site = Scaruffi::with_fetcher(config().with_musician_pages(paths), &fetcher);

    let all = site.get_musicians(0, None).await.unwrap();
    assert_eq!(all.len(), TOTAL);

    for (offset, limit) in [(0, 1), (999, 2), (1000, 1000), (7295, 20), (8000, 3)] {
        let window = site.get_musicians(offset, Some(limit)).await.unwrap();
        let end = (offset + limit).min(all.len());
        let start = offset.min(end);
        assert!(window.len() <= limit);
        assert_eq!(window, all[start..end], "offset {offset}, limit {limit}");
    }

    for n in [1, 20, 1000, 7299] {
        assert!(all.len() >= site.get_musicians(0, Some(n)).await.unwrap().len());
    }
}

#[tokio::test]
async fn zero_limit_is_rejected_before_fetching() {
    let fetcher = CountingFetcher::new();
    let site = Scaruffi::with_fetcher(config(), &fetcher);

    let err = site.get_musicians(0, Some(0)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(fetcher.call_count(), 0);
}

#[tokio::test]
async fn broken_page_aborts_the_whole_listing() {
    let fetcher = CountingFetcher::new()
        .with_page("/p0.html", listing_page(0..10))
        .with_page("/p1.html", "<html><body><p>Under maintenance</p></body></html>");
    let config = config().with_musician_pages(["/p0.html", "/p1.html"]);
    let site = Scaruffi::with_fetcher(config, &fetcher);

    assert_eq!(site.get_musicians(0, Some(5)).await.unwrap().len(), 5);
    let err = site.get_musicians(8, Some(5)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[tokio::test]
async fn page_sequence_is_restartable() {
    let (fetcher, paths) = paged_listing();
    let site = Scaruffi::with_fetcher(config().with_musician_pages(paths), &fetcher);

    let mut pages = site.musician_pages();
    let first = pages.next_page().await.unwrap().unwrap();
    assert_eq!(first.len(), PER_PAGE);
    assert_eq!(pages.pages_fetched(), 1);

    let mut again = site.musician_pages();
    assert_eq!(again.next_page().await.unwrap().unwrap(), first);

    let mut total = first.len();
    while let Some(page) = pages.next_page().await.unwrap() {
        total += page.len();
    }
    assert_eq!(total, TOTAL);
    assert_eq!(pages.musicians_seen(), TOTAL);
    assert_eq!(pages.pages_fetched(), 8);
}
