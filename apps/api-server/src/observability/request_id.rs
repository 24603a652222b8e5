//! Echo the per-request ID assigned by `TracingLogger` back to the client.

use actix_web::{
    Error, HttpMessage,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderName, HeaderValue},
    middleware::Next,
};
use tracing_actix_web::RequestId;

/// Header name for request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Sets the `X-Request-ID` response header so that a client report can be
/// matched with the server's request span.
///
/// A caller-supplied `X-Request-ID` is echoed unchanged; otherwise the ID
/// generated by `TracingLogger` is used, so this must be wrapped inside it.
pub async fn echo_request_id(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let header = HeaderName::from_static(REQUEST_ID_HEADER);
    let request_id = match req.headers().get(&header) {
        Some(value) => Some(value.clone()),
        None => req
            .extensions()
            .get::<RequestId>()
            .and_then(|id| HeaderValue::from_str(&id.to_string()).ok()),
    };

    let mut res = next.call(req).await?;

    if let Some(value) = request_id {
        res.headers_mut().insert(header, value);
    }

    Ok(res)
}
