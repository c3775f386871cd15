/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = String)
    ),
    tag = "Health"
)]
pub async fn health() -> &'static str {
    "OK"
}
