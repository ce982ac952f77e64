//! Closed catalog of NGSI-LD error kinds.
//!
//! Every failure the API can surface maps to exactly one [`ErrorType`]. The
//! catalog is exhaustive by construction: lookups are `match` expressions over
//! the enum, so an unhandled kind is a compile error, not a runtime one.

use http::StatusCode;

use crate::problem::ProblemDetail;

/// The closed set of NGSI-LD error kinds.
///
/// Each kind carries a fixed HTTP status, a stable type URI from the ETSI
/// NGSI-LD error vocabulary, and a default human-readable title. None of
/// these can change at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    InvalidRequest,
    BadRequestData,
    AlreadyExists,
    OperationNotSupported,
    ResourceNotFound,
    InternalError,
    TooComplexQuery,
    TooManyResults,
    LdContextNotAvailable,
    NoMultiTenantSupport,
    NonExistentTenant,
}

impl ErrorType {
    /// The kind used for failures nothing else classifies.
    pub const CATCH_ALL: Self = Self::InternalError;

    /// All catalog entries, in vocabulary order.
    pub const ALL: [Self; 11] = [
        Self::InvalidRequest,
        Self::BadRequestData,
        Self::AlreadyExists,
        Self::OperationNotSupported,
        Self::ResourceNotFound,
        Self::InternalError,
        Self::TooComplexQuery,
        Self::TooManyResults,
        Self::LdContextNotAvailable,
        Self::NoMultiTenantSupport,
        Self::NonExistentTenant,
    ];

    /// The default HTTP status for this kind.
    #[must_use]
    pub fn status(self) -> StatusCode {
        match self {
            Self::InvalidRequest | Self::BadRequestData => StatusCode::BAD_REQUEST,
            Self::AlreadyExists => StatusCode::CONFLICT,
            Self::OperationNotSupported => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ResourceNotFound | Self::NonExistentTenant => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::TooComplexQuery | Self::TooManyResults => StatusCode::FORBIDDEN,
            Self::LdContextNotAvailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::NoMultiTenantSupport => StatusCode::NOT_IMPLEMENTED,
        }
    }

    /// The stable type URI identifying this kind on the wire.
    #[must_use]
    pub fn type_uri(self) -> &'static str {
        match self {
            Self::InvalidRequest => "https://uri.etsi.org/ngsi-ld/errors/InvalidRequest",
            Self::BadRequestData => "https://uri.etsi.org/ngsi-ld/errors/BadRequestData",
            Self::AlreadyExists => "https://uri.etsi.org/ngsi-ld/errors/AlreadyExists",
            Self::OperationNotSupported => {
                "https://uri.etsi.org/ngsi-ld/errors/OperationNotSupported"
            }
            Self::ResourceNotFound => "https://uri.etsi.org/ngsi-ld/errors/ResourceNotFound",
            Self::InternalError => "https://uri.etsi.org/ngsi-ld/errors/InternalError",
            Self::TooComplexQuery => "https://uri.etsi.org/ngsi-ld/errors/TooComplexQuery",
            Self::TooManyResults => "https://uri.etsi.org/ngsi-ld/errors/TooManyResults",
            Self::LdContextNotAvailable => {
                "https://uri.etsi.org/ngsi-ld/errors/LdContextNotAvailable"
            }
            Self::NoMultiTenantSupport => {
                "https://uri.etsi.org/ngsi-ld/errors/NoMultiTenantSupport"
            }
            Self::NonExistentTenant => "https://uri.etsi.org/ngsi-ld/errors/NonexistentTenant",
        }
    }

    /// The default human-readable title for this kind.
    #[must_use]
    pub fn default_title(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid request.",
            Self::BadRequestData => "Bad request data.",
            Self::AlreadyExists => "Already exists.",
            Self::OperationNotSupported => "Operation not supported.",
            Self::ResourceNotFound => "Resource not found.",
            Self::InternalError => "Internal error.",
            Self::TooComplexQuery => "Too complex query.",
            Self::TooManyResults => "Too many results.",
            Self::LdContextNotAvailable => "The LD context is not available.",
            Self::NoMultiTenantSupport => "No multi tenant support.",
            Self::NonExistentTenant => "Tenant does not exist.",
        }
    }

    /// Build a [`ProblemDetail`] seeded with this kind's status, type URI and
    /// default title.
    pub fn problem(self) -> ProblemDetail {
        ProblemDetail::new(self.status(), self.default_title()).with_type(self.type_uri())
    }
}
