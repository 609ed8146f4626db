use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::{domain::entities::plans::PlanEntity, infra::db::postgres::schema::plan_requests};

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = plan_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PlanRequestEntity {
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

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = plan_requests)]
pub struct InsertPlanRequestEntity {
    pub company_name: String,
    pub email: String,
    pub plan_id: Option<i32>,
    pub plan_name: String,
    pub billing_cycle: String,
    pub start_date: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Column-level patch. `None` leaves the column untouched; for `plan_id`,
/// `Some(None)` writes NULL.
#[derive(Debug, Clone, Default, PartialEq, AsChangeset)]
#[diesel(table_name = plan_requests)]
pub struct UpdatePlanRequestEntity {
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub plan_id: Option<Option<i32>>,
    pub plan_name: Option<String>,
    pub billing_cycle: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

impl UpdatePlanRequestEntity {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A request joined with its plan, if the foreign key resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequestWithPlan {
    pub plan_request: PlanRequestEntity,
    pub plan: Option<PlanEntity>,
}

impl From<(PlanRequestEntity, Option<PlanEntity>)> for PlanRequestWithPlan {
    fn from((plan_request, plan): (PlanRequestEntity, Option<PlanEntity>)) -> Self {
        Self { plan_request, plan }
    }
}
