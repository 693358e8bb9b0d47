//! Live queries: long-lived result streams that re-emit when their tables change.
//!
//! # Responsibility
//! - Own one tokio task per subscription; dropping the handle cancels it.
//! - Re-run table queries on invalidation (`observe`).
//! - Compose parent/child subscriptions (`switch_combine`) for the
//!   list-with-items aggregation.
//!
//! # Invariants
//! - An `Err` item is always the last item of a stream.
//! - `switch_combine` never emits values from a superseded child generation.
//! - `observe` never emits two equal results in a row.
//! - Every function here must be called from inside a tokio runtime.

use crate::db::{Database, Table};
use crate::repo::RepoResult;
use log::debug;
use rusqlite::Connection;
use std::future::Future;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const LIVE_BUFFER: usize = 16;

/// Owns a spawned task and aborts it when dropped.
#[derive(Debug)]
pub struct AbortOnDrop(JoinHandle<()>);

impl AbortOnDrop {
    /// Spawns `future` on the current runtime.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self(tokio::spawn(future))
    }
}

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Sending half handed to the body of a live query.
pub struct Emitter<T> {
    tx: mpsc::Sender<RepoResult<T>>,
}

impl<T> Emitter<T> {
    /// Delivers one item. Returns `false` once the subscriber has gone away.
    pub async fn emit(&self, value: RepoResult<T>) -> bool {
        self.tx.send(value).await.is_ok()
    }
}

/// Subscription handle for a stream of query results.
pub struct LiveQuery<T> {
    rx: mpsc::Receiver<RepoResult<T>>,
    _task: AbortOnDrop,
}

impl<T: Send + 'static> LiveQuery<T> {
    /// Runs `body` as the producer of a new stream.
    pub fn spawn<F, Fut>(body: F) -> Self
    where
        F: FnOnce(Emitter<T>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(LIVE_BUFFER);
        let task = AbortOnDrop::spawn(body(Emitter { tx }));
        Self { rx, _task: task }
    }

    /// A stream with exactly one item.
    pub fn once(value: RepoResult<T>) -> Self {
        Self::spawn(|emitter| async move {
            emitter.emit(value).await;
        })
    }

    /// Waits for the next item. `None` means the stream has ended.
    pub async fn next(&mut self) -> Option<RepoResult<T>> {
        self.rx.recv().await
    }

    /// Transforms every successful item, passing errors through.
    pub fn map<U, F>(mut self, transform: F) -> LiveQuery<U>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + 'static,
    {
        LiveQuery::spawn(move |emitter| async move {
            while let Some(value) = self.next().await {
                let failed = value.is_err();
                if !emitter.emit(value.map(&transform)).await || failed {
                    return;
                }
            }
        })
    }
}

/// Runs `query` now and again after every invalidation of `table`.
///
/// A re-run whose result equals the previous emission is not emitted, so
/// observers of untouched rows stay quiet when other rows of `table` change.
pub fn observe<T, F>(db: &Database, table: Table, query: F) -> LiveQuery<T>
where
    T: Clone + PartialEq + Send + 'static,
    F: Fn(&Connection) -> RepoResult<T> + Send + Sync + 'static,
{
    let db = db.clone();
    let mut versions = db.tracker().subscribe(table);
    LiveQuery::spawn(move |emitter| async move {
        let mut last: Option<T> = None;
        loop {
            // Mark seen before querying so a write racing the query re-runs it.
            let _ = versions.borrow_and_update();
            let result = db.read(|conn| query(conn)).await;
            let failed = result.is_err();
            let unchanged = matches!(&result, Ok(value) if last.as_ref() == Some(value));
            if unchanged {
                if versions.changed().await.is_err() {
                    return;
                }
                continue;
            }
            if let Ok(value) = &result {
                last = Some(value.clone());
            }
            if !emitter.emit(result).await || failed {
                debug!(
                    "event=live_query_end module=live table={} failed={failed}",
                    table.name()
                );
                return;
            }
            if versions.changed().await.is_err() {
                return;
            }
        }
    })
}

struct ChildEvent<C> {
    generation: u64,
    index: usize,
    value: RepoResult<C>,
}

/// Switch-map followed by combine-latest.
///
/// Every emission of `parents` cancels all child subscriptions created for
/// the previous emission and calls `subscribe` once per parent. A combined
/// snapshot (in parent order) is emitted whenever a child of the current
/// generation reports and every child of that generation has reported at
/// least once. An empty parent emission yields an empty snapshot directly.
///
/// `combine` returning `None` marks the parent as stale (its child saw the
/// parent row disappear before the parent stream re-emitted); no snapshot is
/// emitted until the next parent emission replaces it.
pub fn switch_combine<P, C, R, S, J>(
    mut parents: LiveQuery<Vec<P>>,
    subscribe: S,
    combine: J,
) -> LiveQuery<Vec<R>>
where
    P: Send + 'static,
    C: Send + 'static,
    R: Send + 'static,
    S: Fn(&P) -> LiveQuery<C> + Send + 'static,
    J: Fn(&P, &C) -> Option<R> + Send + 'static,
{
    LiveQuery::spawn(move |emitter| async move {
        let (child_tx, mut child_rx) = mpsc::channel::<ChildEvent<C>>(LIVE_BUFFER);
        let mut generation = 0_u64;
        let mut current: Vec<P> = Vec::new();
        let mut latest: Vec<Option<C>> = Vec::new();
        let mut children: Vec<AbortOnDrop> = Vec::new();

        loop {
            tokio::select! {
                // Parent changes win over child reports queued at the same time.
                biased;
                next = parents.next() => {
                    let values = match next {
                        None => return,
                        Some(Err(err)) => {
                            emitter.emit(Err(err)).await;
                            return;
                        }
                        Some(Ok(values)) => values,
                    };

                    // Cancel the old generation before the new one can report.
                    children.clear();
                    generation = generation.wrapping_add(1);
                    latest = values.iter().map(|_| None).collect();
                    children = values
                        .iter()
                        .enumerate()
                        .map(|(index, parent)| {
                            forward_child(subscribe(parent), generation, index, child_tx.clone())
                        })
                        .collect();
                    current = values;
                    debug!(
                        "event=live_switch module=live generation={generation} children={}",
                        children.len()
                    );

                    if current.is_empty() && !emitter.emit(Ok(Vec::new())).await {
                        return;
                    }
                }
                Some(event) = child_rx.recv() => {
                    if event.generation != generation {
                        continue;
                    }
                    match event.value {
                        Ok(value) => latest[event.index] = Some(value),
                        Err(err) => {
                            emitter.emit(Err(err)).await;
                            return;
                        }
                    }
                    if let Some(snapshot) = combine_latest(&current, &latest, &combine) {
                        if !emitter.emit(Ok(snapshot)).await {
                            return;
                        }
                    }
                }
            }
        }
    })
}

fn forward_child<C: Send + 'static>(
    mut child: LiveQuery<C>,
    generation: u64,
    index: usize,
    tx: mpsc::Sender<ChildEvent<C>>,
) -> AbortOnDrop {
    AbortOnDrop::spawn(async move {
        while let Some(value) = child.next().await {
            let event = ChildEvent {
                generation,
                index,
                value,
            };
            if tx.send(event).await.is_err() {
                return;
            }
        }
    })
}

fn combine_latest<P, C, R>(
    parents: &[P],
    latest: &[Option<C>],
    combine: &impl Fn(&P, &C) -> Option<R>,
) -> Option<Vec<R>> {
    parents
        .iter()
        .zip(latest)
        .map(|(parent, child)| child.as_ref().and_then(|child| combine(parent, child)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{combine_latest, switch_combine, LiveQuery};
    use crate::repo::RepoError;
    use tokio::sync::watch;

    fn from_watch<T: Clone + Send + Sync + 'static>(mut rx: watch::Receiver<T>) -> LiveQuery<T> {
        LiveQuery::spawn(move |emitter| async move {
            loop {
                let value = rx.borrow_and_update().clone();
                if !emitter.emit(Ok(value)).await {
                    return;
                }
                if rx.changed().await.is_err() {
                    return;
                }
            }
        })
    }

    #[test]
    fn combine_latest_waits_for_every_child() {
        let parents = vec![1, 2];
        let partial = vec![Some("a"), None];
        assert!(combine_latest(&parents, &partial, &|p, c| Some(format!("{p}{c}"))).is_none());

        let full = vec![Some("a"), Some("b")];
        assert_eq!(
            combine_latest(&parents, &full, &|p, c| Some(format!("{p}{c}"))),
            Some(vec!["1a".to_string(), "2b".to_string()])
        );
    }

    #[test]
    fn combine_latest_holds_back_stale_parents() {
        let parents = vec![1, 2];
        let full = vec![Some(10), Some(-1)];
        let combined = combine_latest(&parents, &full, &|p, c| (*c >= 0).then_some(p + c));
        assert!(combined.is_none());
    }

    #[tokio::test]
    async fn map_passes_errors_through_and_ends() {
        let mut mapped = LiveQuery::<i32>::once(Err(RepoError::InvalidData("boom".to_string())))
            .map(|value| value * 2);
        assert!(matches!(mapped.next().await, Some(Err(RepoError::InvalidData(_)))));
        assert!(mapped.next().await.is_none());
    }

    #[tokio::test]
    async fn switch_combine_emits_empty_snapshot_without_children() {
        let (_parent_tx, parent_rx) = watch::channel(Vec::<i32>::new());
        let mut combined = switch_combine(
            from_watch(parent_rx),
            |_| LiveQuery::<i32>::once(Ok(0)),
            |p, c| Some(p + c),
        );
        assert_eq!(combined.next().await.unwrap().unwrap(), Vec::<i32>::new());
    }

    #[tokio::test]
    async fn switch_combine_resubscribes_on_parent_change() {
        let (parent_tx, parent_rx) = watch::channel(vec![1]);
        let (child_tx, child_rx) = watch::channel(10);
        let mut combined = switch_combine(
            from_watch(parent_rx),
            move |_| from_watch(child_rx.clone()),
            |p, c| Some(p + c),
        );
        assert_eq!(combined.next().await.unwrap().unwrap(), vec![11]);

        child_tx.send(20).unwrap();
        assert_eq!(combined.next().await.unwrap().unwrap(), vec![21]);

        parent_tx.send(vec![1, 2]).unwrap();
        assert_eq!(combined.next().await.unwrap().unwrap(), vec![21, 22]);

        parent_tx.send(Vec::new()).unwrap();
        assert_eq!(combined.next().await.unwrap().unwrap(), Vec::<i32>::new());
    }
}
