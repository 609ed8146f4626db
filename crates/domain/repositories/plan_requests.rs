use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::{
    entities::plan_requests::{
        InsertPlanRequestEntity, PlanRequestEntity, PlanRequestWithPlan, UpdatePlanRequestEntity,
    },
    value_objects::enums::plan_request_statuses::PlanRequestStatus,
};

/// Absence is reported as `Ok(None)` / `Ok(false)`; `Err` is reserved for
/// store failures.
#[automock]
#[async_trait]
pub trait PlanRequestRepository {
    async fn create(
        &self,
        insert_plan_request_entity: InsertPlanRequestEntity,
    ) -> Result<PlanRequestEntity>;

    /// Newest first by `created_at`, each row joined with its plan.
    async fn list_with_plans(&self) -> Result<Vec<PlanRequestWithPlan>>;

    async fn find_by_id(&self, plan_request_id: i32) -> Result<Option<PlanRequestEntity>>;

    async fn find_by_id_with_plan(
        &self,
        plan_request_id: i32,
    ) -> Result<Option<PlanRequestWithPlan>>;

    async fn update(
        &self,
        plan_request_id: i32,
        update_plan_request_entity: UpdatePlanRequestEntity,
    ) -> Result<Option<PlanRequestEntity>>;

    async fn update_status(
        &self,
        plan_request_id: i32,
        status: PlanRequestStatus,
    ) -> Result<Option<PlanRequestEntity>>;

    async fn delete(&self, plan_request_id: i32) -> Result<bool>;
}
