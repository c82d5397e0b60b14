//! Reusable OpenAPI response types for consistent API documentation.

use super::ProblemDetails;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/problem+json",
    example = json!({
        "status": 500,
        "title": "An unexpected error occurred.",
        "type": "https://httpstatuses.com/500",
        "instance": "/api/users",
        "traceId": "0b6f3c5e-8f2a-4d0e-9a63-2f1c1e4b7d90"
    })
)]
pub struct InternalServerErrorResponse(pub ProblemDetails);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/problem+json",
    example = json!({
        "status": 400,
        "title": "One or more validation errors occurred.",
        "type": "https://httpstatuses.com/400",
        "instance": "/api/users",
        "traceId": "0b6f3c5e-8f2a-4d0e-9a63-2f1c1e4b7d90",
        "errors": {
            "firstName": ["First name must be between 2 and 50 characters."]
        }
    })
)]
pub struct BadRequestValidationResponse(pub ProblemDetails);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/problem+json",
    example = json!({
        "status": 404,
        "title": "Not Found",
        "type": "https://httpstatuses.com/404",
        "instance": "/api/users/99",
        "traceId": "0b6f3c5e-8f2a-4d0e-9a63-2f1c1e4b7d90",
        "detail": "User not found."
    })
)]
pub struct NotFoundResponse(pub ProblemDetails);

#[derive(ToResponse)]
#[response(
    description = "Conflict - Email already in use",
    content_type = "application/problem+json",
    example = json!({
        "status": 409,
        "title": "Conflict",
        "type": "https://httpstatuses.com/409",
        "instance": "/api/users",
        "traceId": "0b6f3c5e-8f2a-4d0e-9a63-2f1c1e4b7d90",
        "detail": "Email already exists."
    })
)]
pub struct ConflictResponse(pub ProblemDetails);

#[derive(ToResponse)]
#[response(
    description = "Unauthorized - Missing or wrong X-Api-Password",
    content_type = "text/plain",
    example = json!("Unauthorized")
)]
pub struct UnauthorizedResponse(pub String);
