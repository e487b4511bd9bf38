//! Predefined errors for every registered 4xx and 5xx status code.
//!
//! ```rust
//! use jsonwrap::{ApiError, Request};
//!
//! async fn get_user(req: Request) -> ApiError {
//!     if req.header("authorization").is_none() {
//!         return ApiError::UNAUTHORIZED;
//!     }
//!     ApiError::NOT_FOUND.with_message("No such user.")
//! }
//! ```

use http::StatusCode;

use crate::api_error::ApiError;

#[rustfmt::skip]
impl ApiError {
    // ── 4xx Client errors ─────────────────────────────────────────────────────
    pub const BAD_REQUEST:                      Self = Self::from_static(400, "Bad request.");
    pub const UNAUTHORIZED:                     Self = Self::from_static(401, "Unauthorized.");
    pub const PAYMENT_REQUIRED:                 Self = Self::from_static(402, "Payment required.");
    pub const FORBIDDEN:                        Self = Self::from_static(403, "Forbidden.");
    pub const NOT_FOUND:                        Self = Self::from_static(404, "Not found.");
    pub const METHOD_NOT_ALLOWED:               Self = Self::from_static(405, "Method not allowed.");
    pub const NOT_ACCEPTABLE:                   Self = Self::from_static(406, "Not acceptable.");
    pub const PROXY_AUTH_REQUIRED:              Self = Self::from_static(407, "Proxy auth required.");
    pub const REQUEST_TIMEOUT:                  Self = Self::from_static(408, "Request timeout.");
    pub const CONFLICT:                         Self = Self::from_static(409, "Conflict.");
    pub const GONE:                             Self = Self::from_static(410, "Gone.");
    pub const LENGTH_REQUIRED:                  Self = Self::from_static(411, "Length required.");
    pub const PRECONDITION_FAILED:              Self = Self::from_static(412, "Precondition failed.");
    pub const REQUEST_ENTITY_TOO_LARGE:         Self = Self::from_static(413, "Request entity too large.");
    pub const REQUEST_URI_TOO_LONG:             Self = Self::from_static(414, "Request URI too long.");
    pub const UNSUPPORTED_MEDIA_TYPE:           Self = Self::from_static(415, "Unsupported media type.");
    pub const REQUESTED_RANGE_NOT_SATISFIABLE:  Self = Self::from_static(416, "Requested range not satisfiable.");
    pub const EXPECTATION_FAILED:               Self = Self::from_static(417, "Expectation failed.");
    pub const TEAPOT:                           Self = Self::from_static(418, "I'm a teapot.");
    pub const MISDIRECTED_REQUEST:              Self = Self::from_static(421, "Misdirected request.");
    pub const UNPROCESSABLE_ENTITY:             Self = Self::from_static(422, "Unprocessable entity.");
    pub const LOCKED:                           Self = Self::from_static(423, "Locked.");
    pub const FAILED_DEPENDENCY:                Self = Self::from_static(424, "Failed dependency.");
    pub const TOO_EARLY:                        Self = Self::from_static(425, "Too early.");
    pub const UPGRADE_REQUIRED:                 Self = Self::from_static(426, "Upgrade required.");
    pub const PRECONDITION_REQUIRED:            Self = Self::from_static(428, "Precondition required.");
    pub const TOO_MANY_REQUESTS:                Self = Self::from_static(429, "Too many requests.");
    pub const REQUEST_HEADER_FIELDS_TOO_LARGE:  Self = Self::from_static(431, "Request header fields too large.");
    pub const UNAVAILABLE_FOR_LEGAL_REASONS:    Self = Self::from_static(451, "Unavailable for legal reasons.");

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    pub const INTERNAL_SERVER_ERROR:            Self = Self::from_static(500, "Internal server error.");
    pub const NOT_IMPLEMENTED:                  Self = Self::from_static(501, "Not implemented.");
    pub const BAD_GATEWAY:                      Self = Self::from_static(502, "Bad gateway.");
    pub const SERVICE_UNAVAILABLE:              Self = Self::from_static(503, "Service unavailable.");
    pub const GATEWAY_TIMEOUT:                  Self = Self::from_static(504, "Gateway timeout.");
    pub const HTTP_VERSION_NOT_SUPPORTED:       Self = Self::from_static(505, "HTTP version not supported.");
    pub const VARIANT_ALSO_NEGOTIATES:          Self = Self::from_static(506, "Variant also negotiates.");
    pub const INSUFFICIENT_STORAGE:             Self = Self::from_static(507, "Insufficient storage.");
    pub const LOOP_DETECTED:                    Self = Self::from_static(508, "Loop detected.");
    pub const NOT_EXTENDED:                     Self = Self::from_static(510, "Not extended.");
    pub const NETWORK_AUTHENTICATION_REQUIRED:  Self = Self::from_static(511, "Network authentication required.");
}

static CATALOG: [ApiError; 40] = [
    ApiError::BAD_REQUEST,
    ApiError::UNAUTHORIZED,
    ApiError::PAYMENT_REQUIRED,
    ApiError::FORBIDDEN,
    ApiError::NOT_FOUND,
    ApiError::METHOD_NOT_ALLOWED,
    ApiError::NOT_ACCEPTABLE,
    ApiError::PROXY_AUTH_REQUIRED,
    ApiError::REQUEST_TIMEOUT,
    ApiError::CONFLICT,
    ApiError::GONE,
    ApiError::LENGTH_REQUIRED,
    ApiError::PRECONDITION_FAILED,
    ApiError::REQUEST_ENTITY_TOO_LARGE,
    ApiError::REQUEST_URI_TOO_LONG,
    ApiError::UNSUPPORTED_MEDIA_TYPE,
    ApiError::REQUESTED_RANGE_NOT_SATISFIABLE,
    ApiError::EXPECTATION_FAILED,
    ApiError::TEAPOT,
    ApiError::MISDIRECTED_REQUEST,
    ApiError::UNPROCESSABLE_ENTITY,
    ApiError::LOCKED,
    ApiError::FAILED_DEPENDENCY,
    ApiError::TOO_EARLY,
    ApiError::UPGRADE_REQUIRED,
    ApiError::PRECONDITION_REQUIRED,
    ApiError::TOO_MANY_REQUESTS,
    ApiError::REQUEST_HEADER_FIELDS_TOO_LARGE,
    ApiError::UNAVAILABLE_FOR_LEGAL_REASONS,
    ApiError::INTERNAL_SERVER_ERROR,
    ApiError::NOT_IMPLEMENTED,
    ApiError::BAD_GATEWAY,
    ApiError::SERVICE_UNAVAILABLE,
    ApiError::GATEWAY_TIMEOUT,
    ApiError::HTTP_VERSION_NOT_SUPPORTED,
    ApiError::VARIANT_ALSO_NEGOTIATES,
    ApiError::INSUFFICIENT_STORAGE,
    ApiError::LOOP_DETECTED,
    ApiError::NOT_EXTENDED,
    ApiError::NETWORK_AUTHENTICATION_REQUIRED,
];

impl ApiError {
    /// Every predefined error, ordered by status code.
    pub fn catalog() -> &'static [ApiError] {
        &CATALOG
    }

    /// The predefined error for `status`, if there is one.
    pub fn lookup(status: StatusCode) -> Option<&'static ApiError> {
        CATALOG.iter().find(|err| err.status_code() == status)
    }
}
