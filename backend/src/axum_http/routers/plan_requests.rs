use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use crates::{
    domain::{
        repositories::plan_requests::PlanRequestRepository,
        value_objects::plan_requests::{
            CreatePlanRequestModel, PlanRequestDto, PlanRequestWithPlanDto,
            UpdatePlanRequestModel,
        },
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::plan_requests::PlanRequestPostgres,
    },
};

use crate::{
    auth::require_privileged_role,
    axum_http::error_responses::{AppError, MessageResponse},
    config::config_model::Auth,
    usecases::plan_requests::{PlanRequestUseCase, parse_plan_request_id},
};

pub fn routes(db_pool: Arc<PgPoolSquad>, auth: Arc<Auth>) -> Router {
    let plan_request_repository = PlanRequestPostgres::new(Arc::clone(&db_pool));
    let plan_request_usecase = PlanRequestUseCase::new(Arc::new(plan_request_repository));

    router(Arc::new(plan_request_usecase), auth)
}

/// Every route sits behind the bearer-token and privileged-role gate.
pub fn router<T>(plan_request_usecase: Arc<PlanRequestUseCase<T>>, auth: Arc<Auth>) -> Router
where
    T: PlanRequestRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/", post(create::<T>).get(list::<T>))
        .route(
            "/:id",
            get(get_by_id::<T>).put(update::<T>).delete(delete::<T>),
        )
        .route("/:id/approve", put(approve::<T>))
        .route("/:id/reject", put(reject::<T>))
        .route_layer(middleware::from_fn_with_state(auth, require_privileged_role))
        .with_state(plan_request_usecase)
}

pub async fn create<T>(
    State(plan_request_usecase): State<Arc<PlanRequestUseCase<T>>>,
    payload: Result<Json<CreatePlanRequestModel>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    T: PlanRequestRepository + Send + Sync + 'static,
{
    let Json(model) = payload?;

    let plan_request = plan_request_usecase.create(model).await?;

    Ok((StatusCode::CREATED, Json(PlanRequestDto::from(plan_request))))
}

pub async fn list<T>(
    State(plan_request_usecase): State<Arc<PlanRequestUseCase<T>>>,
) -> Result<impl IntoResponse, AppError>
where
    T: PlanRequestRepository + Send + Sync + 'static,
{
    let plan_requests = plan_request_usecase.list().await?;

    let body: Vec<PlanRequestWithPlanDto> = plan_requests
        .into_iter()
        .map(PlanRequestWithPlanDto::from)
        .collect();

    Ok(Json(body))
}

pub async fn get_by_id<T>(
    State(plan_request_usecase): State<Arc<PlanRequestUseCase<T>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError>
where
    T: PlanRequestRepository + Send + Sync + 'static,
{
    let plan_request_id = parse_plan_request_id(&id)?;

    let plan_request = plan_request_usecase.get_by_id(plan_request_id).await?;

    Ok(Json(PlanRequestWithPlanDto::from(plan_request)))
}

pub async fn update<T>(
    State(plan_request_usecase): State<Arc<PlanRequestUseCase<T>>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePlanRequestModel>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    T: PlanRequestRepository + Send + Sync + 'static,
{
    let plan_request_id = parse_plan_request_id(&id)?;
    let Json(model) = payload?;

    let plan_request = plan_request_usecase.update(plan_request_id, model).await?;

    Ok(Json(PlanRequestDto::from(plan_request)))
}

pub async fn delete<T>(
    State(plan_request_usecase): State<Arc<PlanRequestUseCase<T>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError>
where
    T: PlanRequestRepository + Send + Sync + 'static,
{
    let plan_request_id = parse_plan_request_id(&id)?;

    plan_request_usecase.delete(plan_request_id).await?;

    Ok(Json(MessageResponse::new("Plan request deleted successfully")))
}

pub async fn approve<T>(
    State(plan_request_usecase): State<Arc<PlanRequestUseCase<T>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError>
where
    T: PlanRequestRepository + Send + Sync + 'static,
{
    let plan_request_id = parse_plan_request_id(&id)?;

    let plan_request = plan_request_usecase.approve(plan_request_id).await?;

    Ok(Json(PlanRequestDto::from(plan_request)))
}

pub async fn reject<T>(
    State(plan_request_usecase): State<Arc<PlanRequestUseCase<T>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError>
where
    T: PlanRequestRepository + Send + Sync + 'static,
{
    let plan_request_id = parse_plan_request_id(&id)?;

    let plan_request = plan_request_usecase.reject(plan_request_id).await?;

    Ok(Json(PlanRequestDto::from(plan_request)))
}
