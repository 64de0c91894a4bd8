//! Candidate domain service.
//!
//! Implements the candidate driving ports over any [`CandidateRepository`].
//! Storage faults are logged with their full context here and replaced by a
//! generic message before they leave the domain.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info};

use crate::domain::ports::{
    CandidatePersistenceError, CandidateRepository, CandidatesCommand, CandidatesQuery,
};
use crate::domain::{
    Candidate, CandidateId, CandidateListQuery, CandidateUpdate, Email, Error, NewCandidate,
};

const DUPLICATE_EMAIL_MESSAGE: &str = "Candidate with this email already exists.";

#[derive(Debug, Clone, Copy)]
enum Operation {
    Create,
    Get,
    List,
    Update,
    Delete,
}

impl Operation {
    fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Get => "get",
            Self::List => "list",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Self::Create => "Error creating candidate. Please try again later.",
            Self::Get => "Error retrieving candidate. Please try again later.",
            Self::List => "Error retrieving candidates. Please try again later.",
            Self::Update => "Error updating candidate. Please try again later.",
            Self::Delete => "Error deleting candidate. Please try again later.",
        }
    }
}

/// Error returned when a candidate id does not resolve to a stored record.
pub fn candidate_not_found(id: CandidateId) -> Error {
    Error::not_found(format!("Candidate with ID {id} not found"))
}

fn duplicate_email(email: &str) -> Error {
    info!(email, "rejected candidate with duplicate email");
    Error::conflict(DUPLICATE_EMAIL_MESSAGE)
        .with_details(json!({ "field": "email", "code": "duplicate_email" }))
}

fn storage_fault(operation: Operation, err: CandidatePersistenceError) -> Error {
    error!(
        operation = operation.as_str(),
        kind = err.kind(),
        error = %err,
        "candidate storage fault"
    );
    Error::internal(operation.failure_message())
}

fn map_persistence_error(operation: Operation, err: CandidatePersistenceError) -> Error {
    match err {
        CandidatePersistenceError::DuplicateEmail { email } => duplicate_email(&email),
        other => storage_fault(operation, other),
    }
}

/// Candidate service implementing [`CandidatesCommand`] and [`CandidatesQuery`].
#[derive(Clone)]
pub struct CandidateService<R> {
    repository: Arc<R>,
}

impl<R> CandidateService<R> {
    /// Create a service backed by `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> CandidateService<R>
where
    R: CandidateRepository,
{
    async fn ensure_email_free(
        &self,
        operation: Operation,
        email: &Email,
        owner: Option<CandidateId>,
    ) -> Result<(), Error> {
        let existing = self
            .repository
            .find_by_email(email)
            .await
            .map_err(|err| storage_fault(operation, err))?;
        match existing {
            Some(other) if Some(other.id()) != owner => Err(duplicate_email(email.as_str())),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<R> CandidatesCommand for CandidateService<R>
where
    R: CandidateRepository,
{
    async fn create(&self, candidate: NewCandidate) -> Result<Candidate, Error> {
        self.ensure_email_free(Operation::Create, candidate.email(), None)
            .await?;

        let created = self
            .repository
            .insert(&candidate)
            .await
            .map_err(|err| map_persistence_error(Operation::Create, err))?;
        info!(candidate_id = %created.id(), "candidate created");
        Ok(created)
    }

    async fn update(
        &self,
        candidate: Candidate,
        changes: CandidateUpdate,
    ) -> Result<Candidate, Error> {
        if changes.is_empty() {
            return Err(Error::invalid_request("no updatable fields supplied")
                .with_details(json!({ "code": "empty_update" })));
        }
        let id = candidate.id();
        if let Some(email) = changes.email.as_ref().filter(|email| *email != candidate.email()) {
            self.ensure_email_free(Operation::Update, email, Some(id))
                .await?;
        }

        let updated = self
            .repository
            .update(id, &changes)
            .await
            .map_err(|err| map_persistence_error(Operation::Update, err))?
            .ok_or_else(|| candidate_not_found(id))?;
        info!(candidate_id = %id, "candidate updated");
        Ok(updated)
    }

    async fn delete(&self, candidate: Candidate) -> Result<(), Error> {
        let id = candidate.id();
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(|err| storage_fault(Operation::Delete, err))?;
        if !removed {
            return Err(candidate_not_found(id));
        }
        info!(candidate_id = %id, "candidate deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> CandidatesQuery for CandidateService<R>
where
    R: CandidateRepository,
{
    async fn get(&self, id: CandidateId) -> Result<Option<Candidate>, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|err| storage_fault(Operation::Get, err))
    }

    async fn list(&self, query: CandidateListQuery) -> Result<Vec<Candidate>, Error> {
        self.repository
            .list(&query)
            .await
            .map_err(|err| storage_fault(Operation::List, err))
    }
}

#[cfg(test)]
#[path = "candidate_service_tests.rs"]
mod tests;
