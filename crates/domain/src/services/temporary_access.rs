//! Temporary access grant validation with lazy expiry.
//!
//! A read-with-lazy-write operation, not a background sweep: an expired
//! grant is rewritten to `expired` the first time it is read past its
//! expiry. The rewrite is idempotent, so concurrent validations racing on
//! the same record converge to the same terminal state without locking.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::system_config::parse_flexible_timestamp;
use crate::models::temporary_access::GrantStatus;
use crate::ports::GrantStore;

/// Validates temporary access grants against the grant store.
pub struct GrantValidator {
    store: Arc<dyn GrantStore>,
}

impl GrantValidator {
    pub fn new(store: Arc<dyn GrantStore>) -> Self {
        Self { store }
    }

    /// Whether the user currently holds an active, unexpired grant.
    ///
    /// Any failure (missing record, non-active status, unparseable or
    /// past expiry, store error) answers `false`; this check can widen
    /// access, so it fails closed.
    pub async fn has_active_grant(&self, user_id: Uuid, now: DateTime<Utc>) -> bool {
        let grant = match self.store.get(user_id).await {
            Ok(Some(grant)) => grant,
            Ok(None) => return false,
            Err(err) => {
                tracing::warn!(%user_id, error = %err, "grant lookup failed");
                return false;
            }
        };

        if grant.status != GrantStatus::Active {
            return false;
        }

        let Some(expires_at) = parse_flexible_timestamp(&grant.expires_at) else {
            tracing::warn!(
                %user_id,
                expires_at = %grant.expires_at,
                "grant has unparseable expiry, treating as inactive"
            );
            return false;
        };

        if expires_at <= now {
            // Lazy expiry: mark the record so later reads short-circuit.
            // Losing this write to a concurrent validation is harmless.
            if let Err(err) = self.store.put(grant.expired()).await {
                tracing::warn!(%user_id, error = %err, "failed to mark grant expired");
            }
            return false;
        }

        true
    }
}
