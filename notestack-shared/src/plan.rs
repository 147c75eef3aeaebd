/// Plan enforcement for multi-tenant note limits
///
/// This module enforces the per-plan note quota at creation time.
///
/// # Limits by Plan
///
/// **Free Plan:**
/// - Notes: 3
///
/// **Pro Plan:**
/// - Notes: unlimited
///
/// The count and the subsequent insert run outside a transaction, so
/// concurrent creates against the same tenant can briefly exceed the cap.
/// The limit is soft; there is no retroactive enforcement.
///
/// # Example
///
/// ```no_run
/// use notestack_shared::plan::PlanEnforcer;
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, tenant_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let enforcer = PlanEnforcer::new(pool);
///
/// // Errors with PlanError::LimitReached when a FREE tenant is at the cap
/// enforcer.check_note_create(tenant_id).await?;
///
/// // Insert the note...
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::note::Note;
use crate::models::tenant::{Tenant, TenantPlan};

/// Maximum notes a FREE tenant may hold
pub const FREE_NOTE_LIMIT: i64 = 3;

/// Plan enforcement error
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// The tenant's plan does not allow another note
    #[error("Free plan limit reached ({current}/{limit}). Upgrade to Pro.")]
    LimitReached {
        /// Maximum notes allowed by the plan
        limit: i64,
        /// Notes the tenant currently holds
        current: i64,
    },

    /// The acting tenant no longer exists (token references a deleted tenant)
    #[error("Tenant not found: {0}")]
    TenantNotFound(Uuid),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Per-plan note limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanLimits {
    /// Maximum notes, None = unlimited
    pub max_notes: Option<i64>,
}

impl PlanLimits {
    /// Gets the limits for a tenant plan
    pub fn for_plan(plan: TenantPlan) -> Self {
        match plan {
            TenantPlan::Free => PlanLimits {
                max_notes: Some(FREE_NOTE_LIMIT),
            },
            TenantPlan::Pro => PlanLimits { max_notes: None },
        }
    }
}

/// Plan enforcement service
///
/// Checks note counts against plan-based limits before creation.
pub struct PlanEnforcer {
    db: PgPool,
}

impl PlanEnforcer {
    /// Creates a new plan enforcer
    pub fn new(db: PgPool) -> Self {
        PlanEnforcer { db }
    }

    /// Checks whether the tenant may create another note
    ///
    /// Looks up the tenant, resolves its plan limits, and counts existing
    /// notes when the plan is capped. A tenant with an unparseable plan
    /// value is treated as FREE.
    ///
    /// # Errors
    ///
    /// - `PlanError::TenantNotFound` if the tenant record is missing
    /// - `PlanError::LimitReached` if the plan cap is already met
    /// - `PlanError::Database` if a query fails
    pub async fn check_note_create(&self, tenant_id: Uuid) -> Result<(), PlanError> {
        let tenant = Tenant::find_by_id(&self.db, tenant_id)
            .await?
            .ok_or(PlanError::TenantNotFound(tenant_id))?;

        let plan = tenant.get_plan().unwrap_or(TenantPlan::Free);
        let limits = PlanLimits::for_plan(plan);

        let Some(limit) = limits.max_notes else {
            return Ok(());
        };

        // Not atomic with the caller's insert: concurrent creates may land
        // between this count and the insert, briefly exceeding the cap.
        let current = Note::count_for_tenant(&self.db, tenant_id).await?;

        if current >= limit {
            return Err(PlanError::LimitReached { limit, current });
        }

        Ok(())
    }
}
