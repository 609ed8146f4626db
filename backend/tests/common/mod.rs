#![allow(dead_code)]

use std::{
    convert::Infallible,
    sync::{Arc, Mutex},
};

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
    response::Response,
};
use backend::{
    auth::AccessClaims,
    axum_http::{http_serve, routers::plan_requests},
    config::config_model::Auth,
    usecases::plan_requests::PlanRequestUseCase,
};
use chrono::{DateTime, Utc};
use crates::domain::{
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
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use tower::{Service, ServiceExt};
use tower_http::normalize_path::NormalizePath;

pub const JWT_SECRET: &str = "plan-request-api-test-secret";
pub const PRIVILEGED_ROLE: &str = "SUPERADMIN";
pub const PREFIX: &str = "/api/v1/plan-requests";

/// Store double that keeps rows in memory and joins plans the way the
/// Postgres adapter does.
#[derive(Default)]
pub struct InMemoryPlanRequests {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    next_id: i32,
    rows: Vec<PlanRequestEntity>,
    plans: Vec<PlanEntity>,
}

impl InMemoryPlanRequests {
    pub fn with_plans(plans: Vec<PlanEntity>) -> Self {
        Self {
            state: Mutex::new(State {
                plans,
                ..State::default()
            }),
        }
    }

    fn joined(state: &State, row: &PlanRequestEntity) -> PlanRequestWithPlan {
        let plan = row
            .plan_id
            .and_then(|plan_id| state.plans.iter().find(|plan| plan.id == plan_id))
            .cloned();
        PlanRequestWithPlan {
            plan_request: row.clone(),
            plan,
        }
    }
}

#[async_trait]
impl PlanRequestRepository for InMemoryPlanRequests {
    async fn create(&self, insert: InsertPlanRequestEntity) -> Result<PlanRequestEntity> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let row = PlanRequestEntity {
            id: state.next_id,
            company_name: insert.company_name,
            email: insert.email,
            plan_id: insert.plan_id,
            plan_name: insert.plan_name,
            billing_cycle: insert.billing_cycle,
            start_date: insert.start_date,
            status: insert.status,
            created_at: insert.created_at,
        };
        state.rows.push(row.clone());
        Ok(row)
    }

    async fn list_with_plans(&self) -> Result<Vec<PlanRequestWithPlan>> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<_> = state.rows.iter().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows.into_iter().map(|row| Self::joined(&state, row)).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<PlanRequestEntity>> {
        let state = self.state.lock().unwrap();
        Ok(state.rows.iter().find(|row| row.id == id).cloned())
    }

    async fn find_by_id_with_plan(&self, id: i32) -> Result<Option<PlanRequestWithPlan>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .rows
            .iter()
            .find(|row| row.id == id)
            .map(|row| Self::joined(&state, row)))
    }

    async fn update(
        &self,
        id: i32,
        changes: UpdatePlanRequestEntity,
    ) -> Result<Option<PlanRequestEntity>> {
        // Same refusal Diesel gives for an empty SET clause.
        anyhow::ensure!(!changes.is_empty(), "no columns to update");
        let mut state = self.state.lock().unwrap();
        let Some(row) = state.rows.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };
        if let Some(company_name) = changes.company_name {
            row.company_name = company_name;
        }
        if let Some(email) = changes.email {
            row.email = email;
        }
        if let Some(plan_id) = changes.plan_id {
            row.plan_id = plan_id;
        }
        if let Some(plan_name) = changes.plan_name {
            row.plan_name = plan_name;
        }
        if let Some(billing_cycle) = changes.billing_cycle {
            row.billing_cycle = billing_cycle;
        }
        if let Some(start_date) = changes.start_date {
            row.start_date = start_date;
        }
        if let Some(status) = changes.status {
            row.status = status;
        }
        Ok(Some(row.clone()))
    }

    async fn update_status(
        &self,
        id: i32,
        status: PlanRequestStatus,
    ) -> Result<Option<PlanRequestEntity>> {
        let mut state = self.state.lock().unwrap();
        Ok(state.rows.iter_mut().find(|row| row.id == id).map(|row| {
            row.status = status.to_string();
            row.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.rows.len();
        state.rows.retain(|row| row.id != id);
        Ok(state.rows.len() < before)
    }
}

pub fn sample_plan(id: i32) -> PlanEntity {
    PlanEntity {
        id,
        name: format!("Plan {id}"),
        price_minor: 4900,
        duration_days: 30,
        is_active: true,
        created_at: DateTime::<Utc>::UNIX_EPOCH,
    }
}

pub fn app_with<T>(repository: T) -> Router
where
    T: PlanRequestRepository + Send + Sync + 'static,
{
    let auth = Arc::new(Auth {
        jwt_secret: JWT_SECRET.to_string(),
        privileged_role: PRIVILEGED_ROLE.to_string(),
    });
    let usecase = Arc::new(PlanRequestUseCase::new(Arc::new(repository)));

    Router::new().nest(PREFIX, plan_requests::router(usecase, auth))
}

/// Router as served, with trailing slashes trimmed before routing.
pub fn served_app_with<T>(repository: T) -> NormalizePath<Router>
where
    T: PlanRequestRepository + Send + Sync + 'static,
{
    http_serve::trim_trailing_slash(app_with(repository))
}

pub fn token_for(role: &str) -> String {
    let claims = AccessClaims {
        sub: "1".to_string(),
        role: role.to_string(),
        email: Some("root@example.com".to_string()),
        exp: 9999999999,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn admin_token() -> String {
    token_for(PRIVILEGED_ROLE)
}

pub async fn send_as(
    app: &Router,
    token: Option<&str>,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let uri = match path {
        "/" => PREFIX.to_string(),
        _ => format!("{PREFIX}{path}"),
    };
    send_to(app, token, method, &uri, body).await
}

/// Sends to a full URI on any router-shaped service.
pub async fn send_to<S>(
    app: &S,
    token: Option<&str>,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value)
where
    S: Service<Request<Body>, Response = Response, Error = Infallible> + Clone,
{
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, json)
}

pub async fn send(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    send_as(app, Some(&admin_token()), method, path, body).await
}
