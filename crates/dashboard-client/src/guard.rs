//! Per-entity fence for in-flight mutations.
//!
//! Each user action acquires a ticket keyed by (entity id, operation)
//! and stamped with a fresh idempotency key. A second acquisition for
//! the same key while the first is outstanding is refused without a
//! request being made. Tickets release on drop.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::error::ClientError;

/// Mutating operations the guard fences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    UpdateState,
    Update,
    Delete,
    GenerateContract,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::UpdateState => "update-state",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::GenerateContract => "generate-contract",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Default)]
pub struct InFlightGuard {
    outstanding: Arc<Mutex<HashSet<(String, Operation)>>>,
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mutation. Fails with [`ClientError::AlreadyInFlight`]
    /// if the same (entity, operation) pair is still outstanding.
    pub fn acquire(
        &self,
        entity_id: &str,
        operation: Operation,
    ) -> Result<MutationTicket, ClientError> {
        let key = (entity_id.to_string(), operation);
        let mut outstanding = self.outstanding.lock().expect("guard lock poisoned");
        if !outstanding.insert(key) {
            return Err(ClientError::AlreadyInFlight {
                entity_id: entity_id.to_string(),
                operation,
            });
        }
        Ok(MutationTicket {
            entity_id: entity_id.to_string(),
            operation,
            idempotency_key: Uuid::new_v4(),
            registry: Arc::clone(&self.outstanding),
        })
    }

    pub fn is_in_flight(&self, entity_id: &str, operation: Operation) -> bool {
        self.outstanding
            .lock()
            .expect("guard lock poisoned")
            .contains(&(entity_id.to_string(), operation))
    }
}

/// Held for the lifetime of one mutation request.
pub struct MutationTicket {
    entity_id: String,
    operation: Operation,
    idempotency_key: Uuid,
    registry: Arc<Mutex<HashSet<(String, Operation)>>>,
}

impl MutationTicket {
    /// Key sent as `X-Idempotency-Key` so a duplicate submission can be
    /// recognized upstream.
    pub fn idempotency_key(&self) -> Uuid {
        self.idempotency_key
    }
}

impl Drop for MutationTicket {
    fn drop(&mut self) {
        if let Ok(mut outstanding) = self.registry.lock() {
            outstanding.remove(&(self.entity_id.clone(), self.operation));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_is_refused_while_outstanding() {
        let guard = InFlightGuard::new();
        let ticket = guard.acquire("q1", Operation::UpdateState).unwrap();

        let second = guard.acquire("q1", Operation::UpdateState);
        assert!(matches!(second, Err(ClientError::AlreadyInFlight { .. })));

        drop(ticket);
        assert!(guard.acquire("q1", Operation::UpdateState).is_ok());
    }

    #[test]
    fn different_entities_do_not_fence_each_other() {
        let guard = InFlightGuard::new();
        let _a = guard.acquire("q1", Operation::UpdateState).unwrap();
        assert!(guard.acquire("q2", Operation::UpdateState).is_ok());
    }

    #[test]
    fn different_operations_do_not_fence_each_other() {
        let guard = InFlightGuard::new();
        let _a = guard.acquire("q1", Operation::UpdateState).unwrap();
        assert!(guard.acquire("q1", Operation::GenerateContract).is_ok());
    }

    #[test]
    fn each_ticket_gets_a_fresh_idempotency_key() {
        let guard = InFlightGuard::new();
        let a = guard.acquire("q1", Operation::Delete).unwrap();
        let b = guard.acquire("q2", Operation::Delete).unwrap();
        assert_ne!(a.idempotency_key(), b.idempotency_key());
    }
}
