#![allow(dead_code)]

use shoplist_core::LiveQuery;
use std::time::Duration;

const LIVE_TIMEOUT: Duration = Duration::from_secs(5);

/// Pulls items until one satisfies `predicate`; panics on error, end or timeout.
pub async fn next_matching<T: Send + 'static>(
    query: &mut LiveQuery<T>,
    mut predicate: impl FnMut(&T) -> bool,
) -> T {
    tokio::time::timeout(LIVE_TIMEOUT, async {
        loop {
            let value = query
                .next()
                .await
                .expect("live query ended early")
                .expect("live query failed");
            if predicate(&value) {
                return value;
            }
        }
    })
    .await
    .expect("timed out waiting for live query")
}

/// First item of a live query.
pub async fn first<T: Send + 'static>(query: &mut LiveQuery<T>) -> T {
    next_matching(query, |_| true).await
}

/// Polls `condition` until it holds; panics on timeout.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(LIVE_TIMEOUT, async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("timed out waiting for condition")
}
