use std::{collections::HashMap, sync::Arc};

use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
};
use serde::Serialize;
use tokio::net::TcpListener;

use crate::{
    app::App,
    error::AppErr,
    input::{FeatureValues, Interaction},
    predictor::Predictor,
    provider::Availability,
};

/// Successful response of the JSON endpoint.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub value: f64,
    pub formatted: String,
    pub features: HashMap<&'static str, i64>,
}

/// Error body of the JSON endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_available: bool,
    pub version: &'static str,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Creates the router serving the form and the JSON endpoints.
pub fn router(app: Arc<App>) -> Router {
    Router::new()
        .route("/", get(page).post(interact))
        .route("/api/predict", post(predict))
        .route("/health", get(health))
        .with_state(app)
}

/// Serves `app` on `listener` until the future is dropped or the listener fails.
pub async fn serve(listener: TcpListener, app: Arc<App>) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        log::info!("listening at http://{addr}");
    }
    axum::serve(listener, router(app)).await
}

async fn page(State(app): State<Arc<App>>) -> Html<String> {
    log::debug!("page load");
    Html(app.handle(Interaction::Load))
}

async fn interact(
    State(app): State<Arc<App>>,
    Form(form): Form<HashMap<String, String>>,
) -> Html<String> {
    let interaction = Interaction::from_form(app.schema(), &form);
    log::debug!("interaction: {interaction:?}");
    Html(app.handle(interaction))
}

async fn predict(
    State(app): State<Arc<App>>,
    Json(numbers): Json<HashMap<String, f64>>,
) -> Result<Json<PredictResponse>, ApiError> {
    let predictor = match app.availability() {
        Availability::Ready(model) => Predictor::new(model.regressor.clone()),
        Availability::Unavailable(reason) => {
            return Err(api_error(
                StatusCode::SERVICE_UNAVAILABLE,
                AppErr::ModelUnavailable(reason.clone()),
            ));
        }
    };

    let values = FeatureValues::from_numbers(app.schema(), &numbers);
    let result = predictor
        .predict(&values)
        .map_err(|e| api_error(StatusCode::UNPROCESSABLE_ENTITY, e))?;

    Ok(Json(PredictResponse {
        value: result.value,
        formatted: result.formatted,
        features: values.iter().map(|(f, v)| (f.name(), v)).collect(),
    }))
}

async fn health(State(app): State<Arc<App>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model_available: app.availability().is_available(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn api_error(status: StatusCode, err: AppErr) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}
