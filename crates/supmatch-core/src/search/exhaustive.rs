//! Exhaustive search: stream the whole catalog through a pool of workers.
//!
//! A blocking producer feeds catalog entries into a bounded channel; a full
//! channel blocks the producer. Workers pull one entry at a time, test it
//! against every page, and the first match fires the shared stop signal.
//! Which worker wins when several entries match is unspecified.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, trace, warn};

use super::signal::StopSignal;
use super::{Scan, SearchOutcome};
use crate::error::{Result, SupmatchError};
use crate::layout::InvoiceLayout;
use crate::matcher::{MatcherKind, PageMatcher};
use crate::models::{SearchConfig, Supplier};

type CatalogRx = Arc<Mutex<mpsc::Receiver<Result<Supplier>>>>;

/// Worker pool racing over a streamed catalog.
#[derive(Debug, Clone)]
pub struct ExhaustiveSearch {
    workers: usize,
    channel_capacity: usize,
    matcher: MatcherKind,
}

impl ExhaustiveSearch {
    /// Create a search with `workers` concurrent workers.
    pub fn new(workers: usize) -> Result<Self> {
        Self::from_config(&SearchConfig {
            workers,
            ..SearchConfig::default()
        })
    }

    /// Create a search from configuration.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            workers: config.workers,
            channel_capacity: config.channel_capacity,
            matcher: config.matcher,
        })
    }

    /// Set the producer/worker buffer size.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    /// Set the matcher applied to each entry.
    pub fn with_matcher(mut self, matcher: MatcherKind) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Search `layout` for any supplier produced by `catalog`.
    ///
    /// `catalog` is drained on a blocking thread. A catalog error is handed to
    /// whichever worker receives it and becomes the result of the search
    /// unless another worker already found a match.
    pub async fn run<I>(&self, layout: Arc<InvoiceLayout>, catalog: I) -> Result<Scan>
    where
        I: IntoIterator<Item = Result<Supplier>> + Send + 'static,
        I::IntoIter: Send,
    {
        let (tx, rx) = mpsc::channel(self.channel_capacity);
        let producer = tokio::task::spawn_blocking(move || produce(catalog, tx));

        let rx: CatalogRx = Arc::new(Mutex::new(rx));
        let stop = StopSignal::new();
        let evaluated = Arc::new(AtomicUsize::new(0));
        let matcher = self.matcher.matcher();

        debug!(
            "Starting {} workers with {} matcher",
            self.workers,
            matcher.name()
        );

        let mut workers = JoinSet::new();
        for worker_id in 0..self.workers {
            workers.spawn(run_worker(
                worker_id,
                Arc::clone(&layout),
                Arc::clone(&rx),
                stop.clone(),
                Arc::clone(&evaluated),
                matcher,
            ));
        }
        // workers hold the only receivers; once they exit the producer unblocks
        drop(rx);

        let mut found = None;
        let mut failure = None;
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(Ok(Some(supplier))) => {
                    found.get_or_insert(supplier);
                }
                Ok(Ok(None)) => {}
                Ok(Err(e)) => {
                    failure.get_or_insert(e);
                }
                Err(e) => {
                    stop.fire();
                    failure.get_or_insert(SupmatchError::Worker(e.to_string()));
                }
            }
        }

        if let Err(e) = producer.await {
            failure.get_or_insert(SupmatchError::Worker(e.to_string()));
        }

        let candidates = evaluated.load(Ordering::Relaxed);
        match (found, failure) {
            (Some(supplier), _) => Ok(Scan {
                outcome: SearchOutcome::Found(supplier),
                candidates,
            }),
            (None, Some(e)) => Err(e),
            (None, None) => Ok(Scan {
                outcome: SearchOutcome::NotFound,
                candidates,
            }),
        }
    }
}

/// Push every catalog item into the channel, stopping after the first error
/// or once no worker is listening.
fn produce<I>(catalog: I, tx: mpsc::Sender<Result<Supplier>>)
where
    I: IntoIterator<Item = Result<Supplier>>,
{
    let mut sent = 0usize;
    for item in catalog {
        let failed = item.is_err();
        if tx.blocking_send(item).is_err() {
            debug!("Catalog producer stopped after {} entries: workers finished", sent);
            return;
        }
        if failed {
            return;
        }
        sent += 1;
    }
    debug!("Catalog producer exhausted after {} entries", sent);
}

async fn run_worker(
    worker_id: usize,
    layout: Arc<InvoiceLayout>,
    rx: CatalogRx,
    stop: StopSignal,
    evaluated: Arc<AtomicUsize>,
    matcher: &'static dyn PageMatcher,
) -> Result<Option<Supplier>> {
    loop {
        if stop.is_fired() {
            stop.fire();
            trace!("Worker {} observed stop", worker_id);
            return Ok(None);
        }

        let next = {
            let mut rx = rx.lock().await;
            tokio::select! {
                biased;
                _ = stop.fired() => None,
                item = rx.recv() => item,
            }
        };

        let supplier = match next {
            Some(Ok(supplier)) => supplier,
            Some(Err(e)) => {
                warn!("Worker {} received catalog error: {}", worker_id, e);
                stop.fire();
                return Err(e);
            }
            None if stop.is_fired() => continue,
            None => return Ok(None),
        };

        evaluated.fetch_add(1, Ordering::Relaxed);
        let name = supplier.name_tokens();
        if name.is_empty() {
            trace!("Worker {} skipped supplier {} with a blank name", worker_id, supplier.id);
            continue;
        }
        let page_id = layout.find_page(&name, matcher).map(|page| page.id());

        if let Some(page_id) = page_id {
            debug!(
                "Worker {} matched supplier {} on page {}",
                worker_id, supplier, page_id
            );
            stop.fire();
            return Ok(Some(supplier));
        }
    }
}
