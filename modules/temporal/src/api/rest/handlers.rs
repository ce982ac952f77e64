//! Axum handlers for the temporal retrieval operations.
//!
//! Every failure leaving a handler goes through the [`ProblemTranslator`];
//! no error path produces anything but a ProblemDetail body.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Extension, Path, Query};
use axum::response::{IntoResponse, Response};
use ngsild_errors::ErrorType;

use crate::api::problem::{ProblemResponse, ProblemTranslator};
use crate::domain::service::EntityTemporalService;

use super::dto::{TemporalEntitiesQuery, TemporalEntityDto};
use super::link;
use super::request_context::RequestContext;

/// GET /temporal/entities
///
/// Query the temporal evolution of entities.
#[utoipa::path(
    get,
    path = "/temporal/entities",
    tag = "Temporal Retrieval",
    params(TemporalEntitiesQuery),
    responses(
        (status = 200, description = "Temporal entity representations", body = [TemporalEntityDto]),
        (status = 400, description = "Invalid request data", body = ngsild_errors::ProblemDetail),
        (status = 500, description = "Internal error", body = ngsild_errors::ProblemDetail),
        (status = 503, description = "LD context not available", body = ngsild_errors::ProblemDetail),
    )
)]
pub async fn query_temporal_entities(
    Extension(service): Extension<Arc<EntityTemporalService>>,
    Extension(translator): Extension<Arc<ProblemTranslator>>,
    ctx: RequestContext,
    query: Result<Query<TemporalEntitiesQuery>, QueryRejection>,
) -> Response {
    let Ok(Query(query)) = query else {
        return invalid_query(&ctx);
    };

    let reference = match link::context_reference(ctx.link.as_deref()) {
        Ok(reference) => reference,
        Err(failure) => return translator.reject(&ctx, &failure).into_response(),
    };

    match service
        .query_entities(reference.as_ref(), &query.into_params())
        .await
    {
        Ok(entities) => {
            let dtos: Vec<TemporalEntityDto> = entities.into_iter().map(Into::into).collect();
            Json(dtos).into_response()
        }
        Err(failure) => translator.reject(&ctx, &failure).into_response(),
    }
}

/// GET /temporal/entities/{entityId}
///
/// Retrieve the temporal evolution of a single entity.
#[utoipa::path(
    get,
    path = "/temporal/entities/{entityId}",
    tag = "Temporal Retrieval",
    params(
        ("entityId" = String, Path, description = "Entity id"),
        TemporalEntitiesQuery,
    ),
    responses(
        (status = 200, description = "Temporal entity representation", body = TemporalEntityDto),
        (status = 400, description = "Invalid request data", body = ngsild_errors::ProblemDetail),
        (status = 404, description = "Entity not found", body = ngsild_errors::ProblemDetail),
        (status = 500, description = "Internal error", body = ngsild_errors::ProblemDetail),
        (status = 503, description = "LD context not available", body = ngsild_errors::ProblemDetail),
    )
)]
pub async fn retrieve_temporal_entity(
    Extension(service): Extension<Arc<EntityTemporalService>>,
    Extension(translator): Extension<Arc<ProblemTranslator>>,
    ctx: RequestContext,
    Path(entity_id): Path<String>,
    query: Result<Query<TemporalEntitiesQuery>, QueryRejection>,
) -> Response {
    let Ok(Query(query)) = query else {
        return invalid_query(&ctx);
    };

    let reference = match link::context_reference(ctx.link.as_deref()) {
        Ok(reference) => reference,
        Err(failure) => return translator.reject(&ctx, &failure).into_response(),
    };

    match service
        .query_entity_by_id(reference.as_ref(), &entity_id, &query.into_params())
        .await
    {
        Ok(entity) => Json(TemporalEntityDto::from(entity)).into_response(),
        Err(failure) => translator.reject(&ctx, &failure).into_response(),
    }
}

/// Unparseable query strings are client errors with a problem body, not a
/// framework rejection page.
fn invalid_query(ctx: &RequestContext) -> Response {
    let error_type = ErrorType::InvalidRequest;
    ProblemResponse(
        error_type.status(),
        error_type
            .problem()
            .with_detail("The query string could not be parsed.")
            .with_instance(ctx.path.clone()),
    )
    .into_response()
}
