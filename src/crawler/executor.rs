//! Execution strategies for driving the pipeline over many URLs
//!
//! Both strategies take the same records and return one page result per
//! record. The sequential strategy preserves input order; the concurrent one
//! makes no completion-order promise, though results are handed back in input
//! order for convenience.

use crate::config::ConcurrencyConfig;
use crate::crawler::{PageResult, Pipeline, Shutdown};
use crate::sitemap::UrlRecord;
use async_trait::async_trait;
use std::time::Instant;
use tokio::task::JoinSet;

/// How often progress is logged, in pages
const PROGRESS_EVERY: usize = 10;

/// Results of driving the pipeline over a batch
#[derive(Debug, Clone, Default)]
pub struct Execution {
    /// One entry per processed record
    pub page_results: Vec<PageResult>,

    /// True when the run was interrupted and `page_results` is partial
    pub cancelled: bool,
}

/// A strategy for running the pipeline over a batch of records
#[async_trait]
pub trait Executor: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Maximum number of pages in flight at once
    fn parallelism(&self) -> usize;

    /// Processes every record, stopping early if `shutdown` fires
    async fn execute(
        &self,
        pipeline: &Pipeline,
        records: Vec<UrlRecord>,
        shutdown: &Shutdown,
    ) -> Execution;
}

/// Chooses the strategy for a batch
///
/// Concurrency only pays off with more than one worker and more than one
/// record, so anything smaller runs sequentially.
pub fn executor_for(config: &ConcurrencyConfig, batch_size: usize) -> Box<dyn Executor> {
    if !config.enabled {
        return Box::new(Sequential);
    }

    let workers = config.workers.resolve().min(batch_size);
    if workers <= 1 {
        Box::new(Sequential)
    } else {
        Box::new(Concurrent::new(workers))
    }
}

/// Processes records one at a time, in input order, on the calling task
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

#[async_trait]
impl Executor for Sequential {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn parallelism(&self) -> usize {
        1
    }

    async fn execute(
        &self,
        pipeline: &Pipeline,
        records: Vec<UrlRecord>,
        shutdown: &Shutdown,
    ) -> Execution {
        let total = records.len();
        let started_at = Instant::now();
        let mut page_results = Vec::with_capacity(total);

        for record in &records {
            if shutdown.is_triggered() {
                return cancelled(page_results, total);
            }

            tokio::select! {
                biased;
                _ = shutdown.triggered() => {
                    return cancelled(page_results, total);
                }
                result = pipeline.process(record) => page_results.push(result),
            }

            log_progress(page_results.len(), total, started_at);
        }

        Execution {
            page_results,
            cancelled: false,
        }
    }
}

/// Processes records on a bounded pool of tasks
///
/// Workers share only the pipeline, whose fetcher and registry are read-only.
#[derive(Debug, Clone, Copy)]
pub struct Concurrent {
    workers: usize,
}

impl Concurrent {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }
}

#[async_trait]
impl Executor for Concurrent {
    fn name(&self) -> &'static str {
        "concurrent"
    }

    fn parallelism(&self) -> usize {
        self.workers
    }

    async fn execute(
        &self,
        pipeline: &Pipeline,
        records: Vec<UrlRecord>,
        shutdown: &Shutdown,
    ) -> Execution {
        let total = records.len();
        let started_at = Instant::now();

        // Used to report a record whose task died without producing a result.
        let fallback_paths: Vec<String> = records
            .iter()
            .map(|record| {
                record
                    .request_path()
                    .unwrap_or_else(|_| record.target_url.clone())
            })
            .collect();

        let mut slots: Vec<Option<PageResult>> = vec![None; total];
        let mut pending = records.into_iter().enumerate();
        let mut join_set = JoinSet::new();
        let mut cancelled = false;
        let mut done = 0usize;

        tracing::info!(workers = self.workers, pages = total, "starting worker pool");

        loop {
            if !cancelled && shutdown.is_triggered() {
                cancelled = true;
                join_set.abort_all();
            }

            if !cancelled {
                while join_set.len() < self.workers {
                    let Some((index, record)) = pending.next() else {
                        break;
                    };
                    let pipeline = pipeline.clone();
                    join_set.spawn(async move { (index, pipeline.process(&record).await) });
                }
            }

            if join_set.is_empty() {
                break;
            }

            tokio::select! {
                biased;
                _ = shutdown.triggered(), if !cancelled => {
                    cancelled = true;
                    join_set.abort_all();
                }
                joined = join_set.join_next() => match joined {
                    Some(Ok((index, result))) => {
                        slots[index] = Some(result);
                        done += 1;
                        log_progress(done, total, started_at);
                    }
                    Some(Err(e)) if e.is_cancelled() => {}
                    Some(Err(e)) => tracing::error!("Worker task failed: {}", e),
                    None => break,
                },
            }
        }

        if cancelled {
            let page_results: Vec<PageResult> = slots.into_iter().flatten().collect();
            tracing::warn!(
                "Run interrupted: {} of {} pages completed",
                page_results.len(),
                total
            );
            return Execution {
                page_results,
                cancelled: true,
            };
        }

        let page_results = slots
            .into_iter()
            .zip(fallback_paths)
            .map(|(slot, path)| {
                slot.unwrap_or_else(|| {
                    let page = PageResult::fetch_failed(path, "worker task failed");
                    pipeline.notify(&page);
                    page
                })
            })
            .collect();

        Execution {
            page_results,
            cancelled: false,
        }
    }
}

fn cancelled(page_results: Vec<PageResult>, total: usize) -> Execution {
    tracing::warn!(
        "Run interrupted: {} of {} pages completed",
        page_results.len(),
        total
    );
    Execution {
        page_results,
        cancelled: true,
    }
}

fn log_progress(done: usize, total: usize, started_at: Instant) {
    if done % PROGRESS_EVERY == 0 || done == total {
        let elapsed = started_at.elapsed();
        let rate = done as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
        tracing::info!(
            "Progress: {}/{} pages checked, {:.2} pages/sec",
            done,
            total,
            rate
        );
    }
}
