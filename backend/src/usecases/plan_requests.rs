use anyhow::Result as AnyResult;
use chrono::Utc;
use crates::domain::{
    entities::plan_requests::{
        InsertPlanRequestEntity, PlanRequestEntity, PlanRequestWithPlan, UpdatePlanRequestEntity,
    },
    repositories::plan_requests::PlanRequestRepository,
    value_objects::{
        coercion::{coerce_date_time, coerce_plan_id, parse_int},
        enums::plan_request_statuses::PlanRequestStatus,
        patch::Patch,
        plan_requests::{CreatePlanRequestModel, DEFAULT_BILLING_CYCLE, UpdatePlanRequestModel},
    },
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum PlanRequestError {
    #[error("Plan request not found")]
    NotFound(i32),

    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

/// Coerces a raw path segment into a plan request id.
pub fn parse_plan_request_id(raw: &str) -> Result<i32, PlanRequestError> {
    parse_int(raw).ok_or_else(|| {
        warn!(raw_id = raw, "plan_requests: malformed id");
        PlanRequestError::InvalidInput(format!("Invalid plan request id: {raw:?}"))
    })
}

pub struct PlanRequestUseCase<T>
where
    T: PlanRequestRepository + Send + Sync + 'static,
{
    plan_request_repository: Arc<T>,
}

impl<T> PlanRequestUseCase<T>
where
    T: PlanRequestRepository + Send + Sync + 'static,
{
    pub fn new(plan_request_repository: Arc<T>) -> Self {
        Self {
            plan_request_repository,
        }
    }

    pub async fn create(
        &self,
        model: CreatePlanRequestModel,
    ) -> Result<PlanRequestEntity, PlanRequestError> {
        let now = Utc::now();

        let plan_id = coerce_plan_id(&model.plan_id).map_err(invalid_input("create"))?;
        let start_date = coerce_date_time(&model.start_date)
            .map_err(invalid_input("create"))?
            .unwrap_or(now);
        let billing_cycle = model
            .billing_cycle
            .filter(|cycle| !cycle.is_empty())
            .unwrap_or_else(|| DEFAULT_BILLING_CYCLE.to_string());

        let insert_plan_request_entity = InsertPlanRequestEntity {
            company_name: model.company_name,
            email: model.email,
            plan_id,
            plan_name: model.plan_name,
            billing_cycle,
            start_date,
            status: PlanRequestStatus::Pending.to_string(),
            created_at: now,
        };

        let plan_request = self
            .plan_request_repository
            .create(insert_plan_request_entity)
            .await
            .map_err(log_repository_error("create", None))?;

        info!(
            plan_request_id = plan_request.id,
            plan_id = ?plan_request.plan_id,
            "plan_requests: created"
        );

        Ok(plan_request)
    }

    pub async fn list(&self) -> Result<Vec<PlanRequestWithPlan>, PlanRequestError> {
        let plan_requests = self
            .plan_request_repository
            .list_with_plans()
            .await
            .map_err(log_repository_error("list", None))?;

        info!(count = plan_requests.len(), "plan_requests: listed");

        Ok(plan_requests)
    }

    pub async fn get_by_id(
        &self,
        plan_request_id: i32,
    ) -> Result<PlanRequestWithPlan, PlanRequestError> {
        self.plan_request_repository
            .find_by_id_with_plan(plan_request_id)
            .await
            .map_err(log_repository_error("get_by_id", Some(plan_request_id)))?
            .ok_or_else(|| not_found("get_by_id", plan_request_id))
    }

    pub async fn update(
        &self,
        plan_request_id: i32,
        model: UpdatePlanRequestModel,
    ) -> Result<PlanRequestEntity, PlanRequestError> {
        let update_plan_request_entity =
            build_changeset(model).map_err(invalid_input("update"))?;

        // Nothing to write: report the stored row as is.
        if update_plan_request_entity.is_empty() {
            return self
                .plan_request_repository
                .find_by_id(plan_request_id)
                .await
                .map_err(log_repository_error("update", Some(plan_request_id)))?
                .ok_or_else(|| not_found("update", plan_request_id));
        }

        let plan_request = self
            .plan_request_repository
            .update(plan_request_id, update_plan_request_entity)
            .await
            .map_err(log_repository_error("update", Some(plan_request_id)))?
            .ok_or_else(|| not_found("update", plan_request_id))?;

        info!(plan_request_id, "plan_requests: updated");

        Ok(plan_request)
    }

    pub async fn delete(&self, plan_request_id: i32) -> Result<(), PlanRequestError> {
        let deleted = self
            .plan_request_repository
            .delete(plan_request_id)
            .await
            .map_err(log_repository_error("delete", Some(plan_request_id)))?;

        if !deleted {
            return Err(not_found("delete", plan_request_id));
        }

        info!(plan_request_id, "plan_requests: deleted");

        Ok(())
    }

    pub async fn approve(&self, plan_request_id: i32) -> Result<PlanRequestEntity, PlanRequestError> {
        self.set_status("approve", plan_request_id, PlanRequestStatus::Accepted)
            .await
    }

    pub async fn reject(&self, plan_request_id: i32) -> Result<PlanRequestEntity, PlanRequestError> {
        self.set_status("reject", plan_request_id, PlanRequestStatus::Rejected)
            .await
    }

    async fn set_status(
        &self,
        operation: &'static str,
        plan_request_id: i32,
        status: PlanRequestStatus,
    ) -> Result<PlanRequestEntity, PlanRequestError> {
        let plan_request = self
            .plan_request_repository
            .update_status(plan_request_id, status)
            .await
            .map_err(log_repository_error(operation, Some(plan_request_id)))?
            .ok_or_else(|| not_found(operation, plan_request_id))?;

        info!(plan_request_id, %status, "plan_requests: status changed");

        Ok(plan_request)
    }
}

/// Maps the patch body onto column updates. Only `planId` may be cleared;
/// an explicit null on any other field is rejected.
fn build_changeset(model: UpdatePlanRequestModel) -> AnyResult<UpdatePlanRequestEntity> {
    let plan_id = match model.plan_id {
        Patch::Missing => None,
        Patch::Null => Some(None),
        Patch::Value(value) => Some(coerce_plan_id(&value)?),
    };

    // A falsy startDate leaves the stored date alone.
    let start_date = match model.start_date {
        Patch::Missing | Patch::Null => None,
        Patch::Value(value) => coerce_date_time(&value)?,
    };

    Ok(UpdatePlanRequestEntity {
        company_name: required_text("companyName", model.company_name)?,
        email: required_text("email", model.email)?,
        plan_id,
        plan_name: required_text("planName", model.plan_name)?,
        billing_cycle: required_text("billingCycle", model.billing_cycle)?,
        start_date,
        status: match model.status {
            Patch::Missing => None,
            Patch::Null => anyhow::bail!("status cannot be null"),
            Patch::Value(status) => Some(status.to_string()),
        },
    })
}

fn required_text(field: &str, patch: Patch<String>) -> AnyResult<Option<String>> {
    match patch {
        Patch::Missing => Ok(None),
        Patch::Null => anyhow::bail!("{field} cannot be null"),
        Patch::Value(value) => Ok(Some(value)),
    }
}

fn invalid_input(operation: &'static str) -> impl Fn(anyhow::Error) -> PlanRequestError {
    move |err| {
        warn!(operation, error = %err, "plan_requests: rejected input");
        PlanRequestError::InvalidInput(err.to_string())
    }
}

fn log_repository_error(
    operation: &'static str,
    plan_request_id: Option<i32>,
) -> impl Fn(anyhow::Error) -> PlanRequestError {
    move |err| {
        error!(
            operation,
            plan_request_id = ?plan_request_id,
            db_error = ?err,
            "plan_requests: repository call failed"
        );
        PlanRequestError::Repository(err)
    }
}

fn not_found(operation: &'static str, plan_request_id: i32) -> PlanRequestError {
    warn!(operation, plan_request_id, "plan_requests: not found");
    PlanRequestError::NotFound(plan_request_id)
}
