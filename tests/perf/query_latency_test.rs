use std::time::Instant;

use crate::model::{RawBookmark, SearchRecord};
use crate::search::search;

fn bookmark(i: usize, title: &str, url: &str) -> SearchRecord {
    SearchRecord::from_raw(&RawBookmark {
        id: format!("bm-{i}"),
        url: url.to_string(),
        title: title.to_string(),
        labels: vec!["reading".to_string()],
        is_marked: false,
        is_archived: false,
        href: format!("http://localhost:8000/api/bookmarks/bm-{i}"),
    })
}

fn p95_ms(samples: &mut [f64]) -> f64 {
    samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let last = samples.len().saturating_sub(1);
    let idx = ((last as f64) * 0.95).round() as usize;
    samples[idx.min(last)]
}

#[test]
fn warm_query_p95_under_15ms() {
    let mut records: Vec<SearchRecord> = (0..10_000)
        .map(|i| {
            bookmark(
                i,
                &format!("Saved Article {i:05}"),
                &format!("https://example.com/articles/{i:05}"),
            )
        })
        .collect();

    records.push(bookmark(
        10_000,
        "Quarterly Planning Guide",
        "https://blog.example.org/quarterly-planning",
    ));

    for _ in 0..30 {
        let _ = search(&records, "quarterly guide", 20);
    }

    let mut batch_p95 = Vec::with_capacity(5);
    for _ in 0..5 {
        let mut samples = Vec::with_capacity(80);
        for _ in 0..80 {
            let start = Instant::now();
            let _ = search(&records, "quarterly guide", 20);
            samples.push(start.elapsed().as_secs_f64() * 1000.0);
        }
        batch_p95.push(p95_ms(&mut samples));
    }

    batch_p95.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median_p95 = batch_p95[batch_p95.len() / 2];

    assert!(
        median_p95 <= 15.0,
        "median batch p95 too high: {median_p95:.3}ms (budget 15.0ms); batches={batch_p95:?}",
    );
}
