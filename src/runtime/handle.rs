use tokio::sync::{broadcast, mpsc, oneshot};

use crate::{
    core::store::{SchoolStore, StoreError},
    criteria::{CriteriaError, CriteriaPatch, FilterCriteria, FilterKey, FilterValue},
    engine::{
        compile::{compile, Predicate},
        query::{evaluate, ResultSet},
    },
    school::{GeoPoint, SchoolRecord},
    types::{Facility, Revision, SchoolId},
};

use super::events::ViewEvent;

/// Failures surfaced through handle calls.
#[derive(Debug)]
pub enum RuntimeError {
    /// Rejected criteria mutation; session state is unchanged.
    Criteria(CriteriaError),
    /// Store lookup or load failure.
    Store(StoreError),
    /// The session loop has shut down.
    ChannelClosed,
}

impl From<CriteriaError> for RuntimeError {
    fn from(value: CriteriaError) -> Self {
        Self::Criteria(value)
    }
}

impl From<StoreError> for RuntimeError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Session loop tuning knobs.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Command queue depth.
    pub cmd_queue_bound: usize,
    /// Broadcast event buffer size.
    pub events_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cmd_queue_bound: 256,
            events_capacity: 1024,
        }
    }
}

/// Cloneable handle onto one filter session.
pub struct EduViewHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<ViewEvent>,
}

impl Clone for EduViewHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    Apply {
        patch: CriteriaPatch,
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    SetField {
        key: FilterKey,
        value: Option<FilterValue>,
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    RequireFacility {
        facility: Facility,
        required: bool,
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    SetScoreRange {
        min: u8,
        max: u8,
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    SetSearch {
        token: String,
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    LoadFeed {
        records: Vec<SchoolRecord>,
        resp: oneshot::Sender<Result<usize, RuntimeError>>,
    },
    Results {
        resp: oneshot::Sender<(Revision, ResultSet)>,
    },
    Criteria {
        resp: oneshot::Sender<FilterCriteria>,
    },
    Get {
        id: SchoolId,
        resp: oneshot::Sender<Result<SchoolRecord, RuntimeError>>,
    },
    Select {
        id: Option<SchoolId>,
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    Viewport {
        center: GeoPoint,
        zoom: f64,
        resp: oneshot::Sender<()>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

struct SessionState {
    store: SchoolStore,
    criteria: FilterCriteria,
    predicate: Predicate,
    results: ResultSet,
    revision: Revision,
    selected: Option<SchoolId>,
}

impl SessionState {
    /// Recompiles, reevaluates against the current snapshot, and publishes
    /// the new result set under the next revision.
    fn reevaluate(&mut self, events_tx: &broadcast::Sender<ViewEvent>) {
        self.predicate = compile(&self.criteria);
        let snapshot = self.store.snapshot();
        self.results = evaluate(&snapshot, &self.predicate);
        self.revision += 1;
        let _ = events_tx.send(ViewEvent::ResultsChanged {
            revision: self.revision,
            ids: self.results.ids().to_vec(),
        });
    }
}

/// Spawns the single-writer session loop and returns its handle.
///
/// Commands are processed sequentially to completion, so every listener
/// observes result sets computed from one criteria version against one
/// store snapshot.
pub fn spawn_eduview(
    store: SchoolStore,
    criteria: FilterCriteria,
    config: SessionConfig,
) -> EduViewHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.cmd_queue_bound);
    let (events_tx, _) = broadcast::channel::<ViewEvent>(config.events_capacity);

    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let predicate = compile(&criteria);
        let results = evaluate(&store.snapshot(), &predicate);
        let mut state = SessionState {
            store,
            criteria,
            predicate,
            results,
            revision: 0,
            selected: None,
        };

        while let Some(cmd) = cmd_rx.recv().await {
            if handle_command(cmd, &mut state, &events_tx_loop) {
                break;
            }
        }
    });

    EduViewHandle { cmd_tx, events_tx }
}

impl EduViewHandle {
    /// Subscribes to the session event stream. Dropping the receiver
    /// unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.events_tx.subscribe()
    }

    /// Applies a batched criteria patch; recompiles and reevaluates once.
    pub async fn apply(&self, patch: CriteriaPatch) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Apply { patch, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Sets or clears one single-select filter.
    pub async fn set_field(
        &self,
        key: FilterKey,
        value: Option<FilterValue>,
    ) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::SetField {
                key,
                value,
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Toggles one required-facility flag.
    pub async fn require_facility(
        &self,
        facility: Facility,
        required: bool,
    ) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::RequireFacility {
                facility,
                required,
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Replaces the suitability score window.
    pub async fn set_score_range(&self, min: u8, max: u8) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::SetScoreRange { min, max, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Replaces the free-text search token.
    pub async fn set_search(&self, token: impl Into<String>) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::SetSearch {
                token: token.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Restores the default criteria and reevaluates.
    pub async fn reset(&self) -> Result<(), RuntimeError> {
        self.apply(CriteriaPatch::reset()).await
    }

    /// Atomically replaces the record store and reevaluates the current
    /// criteria against the new snapshot.
    pub async fn load_feed(&self, records: Vec<SchoolRecord>) -> Result<usize, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::LoadFeed { records, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Latest result set and its revision.
    pub async fn results(&self) -> Result<(Revision, ResultSet), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Results { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Current criteria snapshot.
    pub async fn criteria(&self) -> Result<FilterCriteria, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Criteria { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Record by id from the current snapshot.
    pub async fn get(&self, id: SchoolId) -> Result<SchoolRecord, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Get { id, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Marks a marker as selected (`None` deselects). The id is validated
    /// against the current snapshot.
    pub async fn select(&self, id: Option<SchoolId>) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Select { id, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Reports a map viewport move.
    pub async fn viewport(&self, center: GeoPoint, zoom: f64) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Viewport {
                center,
                zoom,
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Stops the session loop.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

fn handle_command(
    cmd: Command,
    state: &mut SessionState,
    events_tx: &broadcast::Sender<ViewEvent>,
) -> bool {
    match cmd {
        Command::Apply { patch, resp } => {
            let res = patch
                .apply_to(&mut state.criteria)
                .map_err(RuntimeError::from);
            if res.is_ok() {
                state.reevaluate(events_tx);
            }
            let _ = resp.send(res);
        }
        Command::SetField { key, value, resp } => {
            let res = state
                .criteria
                .set_field(key, value)
                .map_err(RuntimeError::from);
            if res.is_ok() {
                state.reevaluate(events_tx);
            }
            let _ = resp.send(res);
        }
        Command::RequireFacility {
            facility,
            required,
            resp,
        } => {
            state.criteria.set_facility_required(facility, required);
            state.reevaluate(events_tx);
            let _ = resp.send(Ok(()));
        }
        Command::SetScoreRange { min, max, resp } => {
            let res = state
                .criteria
                .set_score_range(min, max)
                .map_err(RuntimeError::from);
            if res.is_ok() {
                state.reevaluate(events_tx);
            }
            let _ = resp.send(res);
        }
        Command::SetSearch { token, resp } => {
            state.criteria.set_search_text(&token);
            state.reevaluate(events_tx);
            let _ = resp.send(Ok(()));
        }
        Command::LoadFeed { records, resp } => {
            let res = state.store.load(records).map_err(RuntimeError::from);
            if let Ok(total) = &res {
                // Selection may no longer exist in the new snapshot.
                if let Some(id) = state.selected {
                    if state.store.snapshot().get(id).is_err() {
                        state.selected = None;
                        let _ = events_tx.send(ViewEvent::SelectionChanged { id: None });
                    }
                }
                let _ = events_tx.send(ViewEvent::StoreReplaced { total: *total });
                state.reevaluate(events_tx);
            }
            let _ = resp.send(res);
        }
        Command::Results { resp } => {
            let _ = resp.send((state.revision, state.results.clone()));
        }
        Command::Criteria { resp } => {
            let _ = resp.send(state.criteria.clone());
        }
        Command::Get { id, resp } => {
            let _ = resp.send(state.store.get_cloned(id).map_err(RuntimeError::from));
        }
        Command::Select { id, resp } => {
            let res = match id {
                Some(id) => state
                    .store
                    .snapshot()
                    .get(id)
                    .map(|_| ())
                    .map_err(RuntimeError::from),
                None => Ok(()),
            };
            if res.is_ok() {
                state.selected = id;
                let _ = events_tx.send(ViewEvent::SelectionChanged { id });
            }
            let _ = resp.send(res);
        }
        Command::Viewport { center, zoom, resp } => {
            let scale = (zoom * 5_000.0).round().max(0.0) as u32;
            let _ = events_tx.send(ViewEvent::ViewportChanged {
                center,
                zoom,
                scale,
            });
            let _ = resp.send(());
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}
