//! File-backed page source.
//!
//! Serves pages of a parsed feed as if they came over the network: each request is
//! answered on a background thread, optionally after a delay, through an mpsc channel
//! the TUI loop drains.

use super::Feed;
use crate::model::{ContinuationToken, LivingDocViewModel, RevisionPage};
use crate::state::pagination::LivingDocDelegate;
use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info};

/// Answer to a page request.
#[derive(Debug, Clone)]
pub enum PageDelivery {
    /// The requested page.
    Page(RevisionPage),
    /// No page exists for the requested token.
    Missing(ContinuationToken),
}

/// [`LivingDocDelegate`] over an in-memory feed.
///
/// Each token is served at most once; repeated requests for a token already asked for
/// are ignored.
#[derive(Debug)]
pub struct FilePageSource {
    view_model: LivingDocViewModel,
    pages: HashMap<ContinuationToken, RevisionPage>,
    requested: Mutex<HashSet<ContinuationToken>>,
    sender: Sender<PageDelivery>,
    latency: Duration,
}

impl FilePageSource {
    /// Create the source and the receiving end for its deliveries.
    ///
    /// Later pages repeating a token already seen are dropped.
    pub fn new(feed: Feed, latency: Duration) -> (Arc<Self>, Receiver<PageDelivery>) {
        let (sender, receiver) = mpsc::channel();
        let mut pages = HashMap::with_capacity(feed.pages.len());
        for page in feed.pages {
            pages.entry(page.rv_start_id).or_insert(page);
        }
        let source = Self {
            view_model: LivingDocViewModel::from(feed.initial),
            pages,
            requested: Mutex::new(HashSet::new()),
            sender,
            latency,
        };
        (Arc::new(source), receiver)
    }

    /// Number of distinct tokens requested so far.
    pub fn requested_count(&self) -> usize {
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn deliver(&self, delivery: PageDelivery) {
        let sender = self.sender.clone();
        let latency = self.latency;
        let spawned = thread::Builder::new()
            .name("page-fetch".to_string())
            .spawn(move || {
                if !latency.is_zero() {
                    thread::sleep(latency);
                }
                if sender.send(delivery).is_err() {
                    debug!("Page receiver dropped before delivery");
                }
            });
        if let Err(e) = spawned {
            error!(error = %e, "Failed to spawn page fetch thread");
        }
    }
}

impl LivingDocDelegate for FilePageSource {
    fn fetch_next_page(&self, next_rv_start_id: ContinuationToken) {
        let first_request = self
            .requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(next_rv_start_id);
        if !first_request {
            debug!(rv_start_id = %next_rv_start_id, "Page already requested");
            return;
        }

        let delivery = match self.pages.get(&next_rv_start_id) {
            Some(page) => {
                info!(rv_start_id = %next_rv_start_id, "Fetching page");
                PageDelivery::Page(page.clone())
            }
            None => PageDelivery::Missing(next_rv_start_id),
        };
        self.deliver(delivery);
    }

    fn view_model(&self) -> Option<LivingDocViewModel> {
        Some(self.view_model.clone())
    }
}
