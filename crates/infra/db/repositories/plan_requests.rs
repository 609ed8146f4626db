use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;

use crate::domain;
use crate::infra::db::postgres::{
    postgres_connection::PgPoolSquad,
    schema::{plan_requests, plans},
};
use domain::{
    entities::{
        plan_requests::{
            InsertPlanRequestEntity, PlanRequestEntity, PlanRequestWithPlan,
            UpdatePlanRequestEntity,
        },
        plans::PlanEntity,
    },
    repositories::plan_requests::PlanRequestRepository,
    value_objects::enums::plan_request_statuses::PlanRequestStatus,
};

pub struct PlanRequestPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PlanRequestPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PlanRequestRepository for PlanRequestPostgres {
    async fn create(
        &self,
        insert_plan_request_entity: InsertPlanRequestEntity,
    ) -> Result<PlanRequestEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(plan_requests::table)
            .values(&insert_plan_request_entity)
            .returning(PlanRequestEntity::as_returning())
            .get_result::<PlanRequestEntity>(&mut conn)?;

        Ok(result)
    }

    async fn list_with_plans(&self) -> Result<Vec<PlanRequestWithPlan>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = plan_requests::table
            .left_join(plans::table)
            .order((plan_requests::created_at.desc(), plan_requests::id.desc()))
            .select((
                PlanRequestEntity::as_select(),
                Option::<PlanEntity>::as_select(),
            ))
            .load::<(PlanRequestEntity, Option<PlanEntity>)>(&mut conn)?;

        Ok(rows.into_iter().map(PlanRequestWithPlan::from).collect())
    }

    async fn find_by_id(&self, plan_request_id: i32) -> Result<Option<PlanRequestEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = plan_requests::table
            .find(plan_request_id)
            .select(PlanRequestEntity::as_select())
            .first::<PlanRequestEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_by_id_with_plan(
        &self,
        plan_request_id: i32,
    ) -> Result<Option<PlanRequestWithPlan>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = plan_requests::table
            .left_join(plans::table)
            .filter(plan_requests::id.eq(plan_request_id))
            .select((
                PlanRequestEntity::as_select(),
                Option::<PlanEntity>::as_select(),
            ))
            .first::<(PlanRequestEntity, Option<PlanEntity>)>(&mut conn)
            .optional()?;

        Ok(row.map(PlanRequestWithPlan::from))
    }

    async fn update(
        &self,
        plan_request_id: i32,
        update_plan_request_entity: UpdatePlanRequestEntity,
    ) -> Result<Option<PlanRequestEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(plan_requests::table.find(plan_request_id))
            .set(&update_plan_request_entity)
            .returning(PlanRequestEntity::as_returning())
            .get_result::<PlanRequestEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn update_status(
        &self,
        plan_request_id: i32,
        status: PlanRequestStatus,
    ) -> Result<Option<PlanRequestEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(plan_requests::table.find(plan_request_id))
            .set(plan_requests::status.eq(status.to_string()))
            .returning(PlanRequestEntity::as_returning())
            .get_result::<PlanRequestEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn delete(&self, plan_request_id: i32) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(plan_requests::table.find(plan_request_id)).execute(&mut conn)?;

        Ok(deleted > 0)
    }
}
