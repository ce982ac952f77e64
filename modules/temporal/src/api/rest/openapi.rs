//! OpenAPI document for the temporal REST surface.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tempus NGSI-LD Temporal API",
        description = "Retrieval of temporal entity histories per the NGSI-LD Temporal API",
        version = "0.1.0"
    ),
    paths(
        super::handlers::query_temporal_entities,
        super::handlers::retrieve_temporal_entity,
    ),
    components(schemas(
        super::dto::TemporalEntityDto,
        super::dto::AttributeInstanceDto,
        ngsild_errors::ProblemDetail,
    ))
)]
pub struct ApiDoc;
