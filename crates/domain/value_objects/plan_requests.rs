use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    entities::plan_requests::{PlanRequestEntity, PlanRequestWithPlan},
    value_objects::{
        enums::plan_request_statuses::PlanRequestStatus, patch::Patch, plans::PlanDto,
    },
};

/// Billing cycle stored when the client leaves it out.
pub const DEFAULT_BILLING_CYCLE: &str = "Monthly";

/// Body of `POST /`. `planId` and `startDate` stay loosely typed until the
/// use case coerces them; a client-supplied `status` is never read.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanRequestModel {
    pub company_name: String,
    pub email: String,
    #[serde(default)]
    pub plan_id: Value,
    pub plan_name: String,
    #[serde(default)]
    pub billing_cycle: Option<String>,
    #[serde(default)]
    pub start_date: Value,
}

/// Body of `PUT /:id`. Absent keys leave the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanRequestModel {
    #[serde(default)]
    pub company_name: Patch<String>,
    #[serde(default)]
    pub email: Patch<String>,
    #[serde(default)]
    pub plan_id: Patch<Value>,
    #[serde(default)]
    pub plan_name: Patch<String>,
    #[serde(default)]
    pub billing_cycle: Patch<String>,
    #[serde(default)]
    pub start_date: Patch<Value>,
    #[serde(default)]
    pub status: Patch<PlanRequestStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequestDto {
    pub id: i32,
    pub company_name: String,
    pub email: String,
    pub plan_id: Option<i32>,
    pub plan_name: String,
    pub billing_cycle: String,
    pub start_date: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<PlanRequestEntity> for PlanRequestDto {
    fn from(value: PlanRequestEntity) -> Self {
        Self {
            id: value.id,
            company_name: value.company_name,
            email: value.email,
            plan_id: value.plan_id,
            plan_name: value.plan_name,
            billing_cycle: value.billing_cycle,
            start_date: value.start_date,
            status: value.status,
            created_at: value.created_at,
        }
    }
}

/// Request record with its plan embedded under `plan` (null when the
/// request has no plan or the plan row is gone).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanRequestWithPlanDto {
    #[serde(flatten)]
    pub plan_request: PlanRequestDto,
    pub plan: Option<PlanDto>,
}

impl From<PlanRequestWithPlan> for PlanRequestWithPlanDto {
    fn from(value: PlanRequestWithPlan) -> Self {
        Self {
            plan_request: value.plan_request.into(),
            plan: value.plan.map(PlanDto::from),
        }
    }
}
