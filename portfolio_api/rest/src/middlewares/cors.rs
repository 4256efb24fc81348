use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Allow browsers on `allowed_origins` to call the api.
pub fn add<S: Clone + Send + Sync + 'static>(
    allowed_origins: &[HeaderValue],
) -> impl FnOnce(Router<S>) -> Router<S> {
    let layer = (!allowed_origins.is_empty()).then(|| {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed_origins.iter().cloned()))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
    });

    move |router| match layer {
        Some(layer) => router.layer(layer),
        None => router,
    }
}
