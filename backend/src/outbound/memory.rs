//! In-process `CandidateRepository` used when no database is configured and
//! by the HTTP behaviour suites.
//!
//! State sits behind one mutex so every operation is atomic with respect to
//! the others, matching the single-statement guarantees of the SQL adapter.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{CandidatePersistenceError, CandidateRepository};
use crate::domain::{
    Candidate, CandidateId, CandidateListQuery, CandidateUpdate, Email, NewCandidate,
};

#[derive(Default)]
struct Store {
    last_id: i32,
    last_created_at: Option<DateTime<Utc>>,
    rows: BTreeMap<CandidateId, Candidate>,
    failure: Option<CandidatePersistenceError>,
}

impl Store {
    fn check(&self) -> Result<(), CandidatePersistenceError> {
        self.failure.clone().map_or(Ok(()), Err)
    }

    fn email_owner(&self, email: &str) -> Option<&Candidate> {
        let wanted = email.to_lowercase();
        self.rows
            .values()
            .find(|candidate| candidate.email().as_str().to_lowercase() == wanted)
    }

    fn next_id(&mut self) -> Result<CandidateId, CandidatePersistenceError> {
        let next = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| CandidatePersistenceError::query("candidate id sequence exhausted"))?;
        let id = CandidateId::new(next)
            .map_err(|err| CandidatePersistenceError::query(err.to_string()))?;
        self.last_id = next;
        Ok(id)
    }

    fn next_created_at(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = self.last_created_at.map_or(now, |last| last.max(now));
        self.last_created_at = Some(stamp);
        stamp
    }
}

/// Candidate storage held in memory. Contents vanish with the process.
#[derive(Default)]
pub struct InMemoryCandidateRepository {
    store: Mutex<Store>,
}

impl InMemoryCandidateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `failure`; `None` restores service.
    pub fn set_failure(&self, failure: Option<CandidatePersistenceError>) {
        if let Ok(mut store) = self.store.lock() {
            store.failure = failure;
        }
    }

    /// Number of stored candidates.
    pub fn len(&self) -> usize {
        self.store.lock().map_or(0, |store| store.rows.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, CandidatePersistenceError> {
        let store = self
            .store
            .lock()
            .map_err(|_| CandidatePersistenceError::query("in-memory candidate store poisoned"))?;
        store.check()?;
        Ok(store)
    }
}

#[async_trait]
impl CandidateRepository for InMemoryCandidateRepository {
    async fn insert(
        &self,
        candidate: &NewCandidate,
    ) -> Result<Candidate, CandidatePersistenceError> {
        let mut store = self.lock()?;
        let email = candidate.email().as_str();
        if store.email_owner(email).is_some() {
            return Err(CandidatePersistenceError::duplicate_email(email));
        }

        let id = store.next_id()?;
        let created_at = store.next_created_at();
        let stored = Candidate::new(id, candidate.clone(), created_at);
        store.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(
        &self,
        id: CandidateId,
    ) -> Result<Option<Candidate>, CandidatePersistenceError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Candidate>, CandidatePersistenceError> {
        Ok(self.lock()?.email_owner(email.as_str()).cloned())
    }

    async fn list(
        &self,
        query: &CandidateListQuery,
    ) -> Result<Vec<Candidate>, CandidatePersistenceError> {
        let store = self.lock()?;
        let page = query.page();
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);

        Ok(store
            .rows
            .values()
            .filter(|candidate| query.matches(candidate))
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: CandidateId,
        changes: &CandidateUpdate,
    ) -> Result<Option<Candidate>, CandidatePersistenceError> {
        let mut store = self.lock()?;
        if let Some(email) = &changes.email {
            let taken = store
                .email_owner(email.as_str())
                .is_some_and(|owner| owner.id() != id);
            if taken {
                return Err(CandidatePersistenceError::duplicate_email(email.as_str()));
            }
        }

        let Some(current) = store.rows.get(&id) else {
            return Ok(None);
        };
        let updated = current.with_changes(changes);
        store.rows.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: CandidateId) -> Result<bool, CandidatePersistenceError> {
        Ok(self.lock()?.rows.remove(&id).is_some())
    }
}
