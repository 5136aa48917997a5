use crate::host::{HostEndpoint, UiMessage};
use crate::links::{entries_from_host, HostLink, InvalidLink};
use crate::store::{LinkStore, StoreReader};
use std::time::{Duration, Instant};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Why a refresh did not update the store. The store keeps its last good list
/// in every case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshError {
    Disconnected,
    /// A response arrived for a request that is no longer pending.
    Stale { request_id: u64 },
    Malformed(InvalidLink),
    HostFailed { request_id: u64, reason: String },
    TimedOut { request_id: u64 },
}

impl std::fmt::Display for RefreshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefreshError::Disconnected => write!(f, "host is not connected"),
            RefreshError::Stale { request_id } => {
                write!(f, "ignored response to request {request_id}")
            }
            RefreshError::Malformed(e) => write!(f, "malformed shortcut list: {e}"),
            RefreshError::HostFailed { request_id, reason } => {
                write!(f, "host failed request {request_id}: {reason}")
            }
            RefreshError::TimedOut { request_id } => {
                write!(f, "request {request_id} timed out")
            }
        }
    }
}

impl std::error::Error for RefreshError {}

struct Pending {
    request_id: u64,
    issued: Instant,
}

/// Keeps the link store in step with the host's configuration. Owns the
/// store and is the only code that replaces its contents.
pub struct RefreshService {
    store: LinkStore,
    timeout: Duration,
    next_id: u64,
    pending: Option<Pending>,
}

impl RefreshService {
    pub fn new(timeout: Duration) -> Self {
        Self {
            store: LinkStore::new(),
            timeout,
            next_id: 1,
            pending: None,
        }
    }

    pub fn reader(&self) -> StoreReader {
        self.store.reader()
    }

    /// Id of the request currently awaiting a reply.
    pub fn in_flight(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.request_id)
    }

    /// Ask the host for its current list. Does nothing while a request is
    /// already pending and returns that request's id instead.
    pub fn refresh(&mut self, host: &dyn HostEndpoint) -> Result<u64, RefreshError> {
        self.refresh_at(host, Instant::now())
    }

    pub fn refresh_at(&mut self, host: &dyn HostEndpoint, now: Instant) -> Result<u64, RefreshError> {
        if let Some(pending) = &self.pending {
            tracing::debug!(request_id = pending.request_id, "list request already in flight");
            return Ok(pending.request_id);
        }

        let request_id = self.next_id;
        self.next_id += 1;
        host.send(UiMessage::ListRequest { request_id })
            .map_err(|_| RefreshError::Disconnected)?;
        tracing::debug!(request_id, "list requested");
        self.pending = Some(Pending {
            request_id,
            issued: now,
        });
        Ok(request_id)
    }

    /// Apply a list response. Returns the number of entries now in the store.
    pub fn on_response(&mut self, request_id: u64, links: Vec<HostLink>) -> Result<usize, RefreshError> {
        if self.in_flight() != Some(request_id) {
            return Err(RefreshError::Stale { request_id });
        }
        self.pending = None;

        let entries = entries_from_host(links).map_err(RefreshError::Malformed)?;
        let count = entries.len();
        self.store.replace(entries);
        tracing::info!(request_id, count, "shortcut list refreshed");
        Ok(count)
    }

    pub fn on_failure(&mut self, request_id: u64, reason: String) -> RefreshError {
        if self.in_flight() == Some(request_id) {
            self.pending = None;
            RefreshError::HostFailed { request_id, reason }
        } else {
            RefreshError::Stale { request_id }
        }
    }

    /// Abandon the pending request if it has waited longer than the timeout.
    pub fn poll_timeout(&mut self, now: Instant) -> Option<RefreshError> {
        let pending = self.pending.as_ref()?;
        if now.saturating_duration_since(pending.issued) < self.timeout {
            return None;
        }
        let request_id = pending.request_id;
        self.pending = None;
        Some(RefreshError::TimedOut { request_id })
    }
}
