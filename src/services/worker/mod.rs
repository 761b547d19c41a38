//! Background execution of store requests.
//!
//! The UI thread never blocks on SQLite. Requests are sent to a single worker
//! thread that owns the [`SlotStore`]; responses are polled once per frame.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use crate::models::coach::Coach;
use crate::models::slot::Slot;
use crate::services::store::{apply_mutation, MutationOutcome, SlotMutation, SlotStore};

/// Which interaction issued a mutation, so its response can be routed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOrigin {
    Editor,
    Drag,
}

#[derive(Debug)]
pub enum StoreRequest {
    LoadWeek(NaiveDate),
    LoadCoaches { active_only: bool },
    Apply {
        origin: MutationOrigin,
        mutation: SlotMutation,
    },
}

#[derive(Debug)]
pub enum StoreResponse {
    Week {
        week_start: NaiveDate,
        result: Result<Vec<Slot>, String>,
    },
    Coaches(Result<Vec<Coach>, String>),
    Applied {
        origin: MutationOrigin,
        slot_id: Option<i64>,
        result: Result<MutationOutcome, String>,
    },
}

pub struct StoreWorker {
    requests: Option<Sender<StoreRequest>>,
    responses: Receiver<StoreResponse>,
    handle: Option<JoinHandle<()>>,
}

impl StoreWorker {
    /// Move `store` onto a new worker thread.
    pub fn spawn(store: Box<dyn SlotStore + Send>) -> Result<Self> {
        let (request_tx, request_rx) = mpsc::channel::<StoreRequest>();
        let (response_tx, response_rx) = mpsc::channel::<StoreResponse>();

        let handle = thread::Builder::new()
            .name("slot-store".to_string())
            .spawn(move || {
                for request in request_rx {
                    let response = handle_request(store.as_ref(), request);
                    if response_tx.send(response).is_err() {
                        break;
                    }
                }
                log::debug!("Slot store worker stopped");
            })
            .map_err(|err| anyhow!("Failed to start store worker: {}", err))?;

        Ok(Self {
            requests: Some(request_tx),
            responses: response_rx,
            handle: Some(handle),
        })
    }

    pub fn send(&self, request: StoreRequest) -> Result<()> {
        let sender = self
            .requests
            .as_ref()
            .ok_or_else(|| anyhow!("Store worker is shut down"))?;
        sender
            .send(request)
            .map_err(|_| anyhow!("Store worker is not running"))
    }

    /// Drain every response that has arrived since the last poll.
    pub fn poll(&self) -> Vec<StoreResponse> {
        let mut responses = Vec::new();
        loop {
            match self.responses.try_recv() {
                Ok(response) => responses.push(response),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::error!("Slot store worker disconnected");
                    break;
                }
            }
        }
        responses
    }

    /// Block until one response arrives or `timeout` elapses.
    pub fn wait(&self, timeout: Duration) -> Option<StoreResponse> {
        match self.responses.recv_timeout(timeout) {
            Ok(response) => Some(response),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Drop for StoreWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop.
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Slot store worker panicked");
            }
        }
    }
}

fn handle_request(store: &dyn SlotStore, request: StoreRequest) -> StoreResponse {
    match request {
        StoreRequest::LoadWeek(week_start) => {
            let result = store.list_slots_for_week(week_start).map_err(|err| {
                log::error!("Failed to load week {}: {:#}", week_start, err);
                err.to_string()
            });
            StoreResponse::Week { week_start, result }
        }
        StoreRequest::LoadCoaches { active_only } => {
            let result = store.list_coaches(active_only).map_err(|err| {
                log::error!("Failed to load coaches: {:#}", err);
                err.to_string()
            });
            StoreResponse::Coaches(result)
        }
        StoreRequest::Apply { origin, mutation } => {
            let slot_id = mutation.slot_id();
            let action = mutation.describe();
            let result = apply_mutation(store, mutation).map_err(|err| {
                log::error!("Slot {} failed for {:?}: {:#}", action, slot_id, err);
                err.to_string()
            });
            if result.is_ok() {
                log::info!("Slot {} succeeded for {:?}", action, slot_id);
            }
            StoreResponse::Applied {
                origin,
                slot_id,
                result,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::slot::SlotChanges;
    use crate::services::store::SqliteStore;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn worker() -> StoreWorker {
        let store = SqliteStore::open(":memory:").unwrap();
        StoreWorker::spawn(Box::new(store)).unwrap()
    }

    fn week() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 26).unwrap()
    }

    #[test]
    fn loads_coaches_on_worker_thread() {
        let worker = worker();
        worker
            .send(StoreRequest::LoadCoaches { active_only: true })
            .unwrap();

        match worker.wait(TIMEOUT) {
            Some(StoreResponse::Coaches(Ok(coaches))) => assert_eq!(coaches.len(), 3),
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn week_response_is_tagged_with_its_week() {
        let worker = worker();
        worker.send(StoreRequest::LoadWeek(week())).unwrap();

        match worker.wait(TIMEOUT) {
            Some(StoreResponse::Week { week_start, result }) => {
                assert_eq!(week_start, week());
                assert!(result.unwrap().is_empty());
            }
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn failed_mutation_reports_error_with_origin() {
        let worker = worker();
        worker
            .send(StoreRequest::Apply {
                origin: MutationOrigin::Drag,
                mutation: SlotMutation::Update {
                    id: 77,
                    changes: SlotChanges::relocation(1, "09:00", "09:30"),
                },
            })
            .unwrap();

        match worker.wait(TIMEOUT) {
            Some(StoreResponse::Applied {
                origin,
                slot_id,
                result,
            }) => {
                assert_eq!(origin, MutationOrigin::Drag);
                assert_eq!(slot_id, Some(77));
                assert!(result.unwrap_err().contains("not found"));
            }
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn poll_is_empty_without_requests() {
        let worker = worker();
        assert!(worker.poll().is_empty());
    }
}
