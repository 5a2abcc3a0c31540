use actix_web::{
    Error,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};
use tracing::debug;

/**
 * Middleware logging method, path, status and duration of every request.
 */
pub async fn request_timing(request: ServiceRequest, next: Next<impl MessageBody>) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let start_time = std::time::Instant::now();
    let path = request.path().to_owned();
    let method = request.method().to_owned();
    let response = next.call(request).await;
    let status = match &response {
        Ok(service_response) => service_response.status().as_u16(),
        Err(err) => err.as_response_error().status_code().as_u16(),
    };
    debug!(target: "performance", %method, %path, status, elapsed_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX), "Request processed");
    response
}
