//! Test support: an in-memory advisory-lock backend
//!
//! `FakeLockTable` stands in for the database cluster: independent
//! `FakeSession`s contend over one shared lock table with the same
//! semantics as session-scoped advisory locks (non-blocking grants,
//! same-session reentry, release-all on session teardown). An event log
//! lets tests assert exactly which requests reached the "server".

use async_trait::async_trait;
use pdl_domain::error::{Error, Result};
use pdl_domain::ports::AdvisorySession;
use pdl_domain::value_objects::LockId;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// A request observed by the fake lock table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockEvent {
    Acquired { session: u64, id: i64 },
    Rejected { session: u64, id: i64 },
    Released { session: u64, id: i64, held: bool },
}

#[derive(Default)]
struct TableState {
    /// lock key -> (owning session, reentry count)
    held: HashMap<i64, (u64, u32)>,
    events: Vec<LockEvent>,
    /// session -> number of effective (non-idempotent) closes
    closes: HashMap<u64, u32>,
}

/// Shared advisory-lock table standing in for the database cluster
#[derive(Clone, Default)]
pub struct FakeLockTable {
    state: Arc<Mutex<TableState>>,
    next_session: Arc<AtomicU64>,
}

impl FakeLockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new independent session against this table
    pub fn session(&self) -> FakeSession {
        FakeSession {
            table: self.clone(),
            session_id: self.next_session.fetch_add(1, Ordering::SeqCst) + 1,
            open: true,
            injector: FailureInjector::default(),
        }
    }

    /// Whether any session currently holds `id`
    pub fn is_held(&self, id: LockId) -> bool {
        self.state.lock().unwrap().held.contains_key(&id.value())
    }

    /// How many releases of `id` actually released a held lock
    pub fn release_count(&self, id: LockId) -> usize {
        self.state
            .lock()
            .unwrap()
            .events
            .iter()
            .filter(|event| {
                matches!(
                    event,
                    LockEvent::Released { id: key, held: true, .. } if *key == id.value()
                )
            })
            .count()
    }

    /// Every request the table has observed, in order
    pub fn events(&self) -> Vec<LockEvent> {
        self.state.lock().unwrap().events.clone()
    }

    /// How many times `session` performed an effective close
    pub fn close_count(&self, session: u64) -> u32 {
        self.state
            .lock()
            .unwrap()
            .closes
            .get(&session)
            .copied()
            .unwrap_or(0)
    }
}

/// Switches for making a fake session misbehave on demand
///
/// Cloned handles stay wired to the session after it moves into a lock
/// object.
#[derive(Clone, Default)]
pub struct FailureInjector {
    pub fail_next_acquire: Arc<AtomicBool>,
    pub fail_next_release: Arc<AtomicBool>,
}

/// One session against the fake lock table
pub struct FakeSession {
    table: FakeLockTable,
    session_id: u64,
    open: bool,
    injector: FailureInjector,
}

impl FakeSession {
    pub fn id(&self) -> u64 {
        self.session_id
    }

    pub fn injector(&self) -> FailureInjector {
        self.injector.clone()
    }
}

#[async_trait]
impl AdvisorySession for FakeSession {
    async fn try_acquire(&mut self, id: LockId) -> Result<bool> {
        if !self.open {
            return Err(Error::session("Session is closed"));
        }
        if self.injector.fail_next_acquire.swap(false, Ordering::SeqCst) {
            return Err(Error::session("injected acquire failure"));
        }

        let mut state = self.table.state.lock().unwrap();
        let granted = match state.held.entry(id.value()) {
            Entry::Occupied(mut entry) => {
                let (owner, count) = entry.get_mut();
                if *owner == self.session_id {
                    // Same-session reentry stacks, as pg_try_advisory_lock does
                    *count += 1;
                    true
                } else {
                    false
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert((self.session_id, 1));
                true
            }
        };
        let event = if granted {
            LockEvent::Acquired {
                session: self.session_id,
                id: id.value(),
            }
        } else {
            LockEvent::Rejected {
                session: self.session_id,
                id: id.value(),
            }
        };
        state.events.push(event);
        Ok(granted)
    }

    async fn release(&mut self, id: LockId) -> Result<bool> {
        if !self.open {
            return Err(Error::session("Session is closed"));
        }
        if self.injector.fail_next_release.swap(false, Ordering::SeqCst) {
            return Err(Error::session("injected release failure"));
        }

        let mut state = self.table.state.lock().unwrap();
        let released = match state.held.entry(id.value()) {
            Entry::Occupied(mut entry) => {
                let (owner, count) = *entry.get();
                if owner == self.session_id {
                    if count > 1 {
                        entry.get_mut().1 = count - 1;
                    } else {
                        entry.remove();
                    }
                    true
                } else {
                    false
                }
            }
            Entry::Vacant(_) => false,
        };
        state.events.push(LockEvent::Released {
            session: self.session_id,
            id: id.value(),
            held: released,
        });
        Ok(released)
    }

    async fn close(&mut self) -> Result<()> {
        if self.open {
            self.open = false;
            let mut state = self.table.state.lock().unwrap();
            state.held.retain(|_, (owner, _)| *owner != self.session_id);
            *state.closes.entry(self.session_id).or_insert(0) += 1;
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
