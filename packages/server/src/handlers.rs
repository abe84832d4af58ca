//! HTTP handler functions for the conflict dashboard API.

use actix_web::{HttpResponse, web};
use conflict_dash_analytics::{
    AnalyticsError, clusters::event_clusters, options::build_options, series::build_series,
    summary::build_summary,
};
use conflict_dash_analytics_models::{ClusterParams, SeriesParams, SummaryParams};
use conflict_dash_forecast::ForecastError;
use conflict_dash_server_models::{ApiError, ApiHealth, ClusterQuery, SeriesQuery, SummaryQuery};

use crate::AppState;

fn analytics_error(e: &AnalyticsError) -> HttpResponse {
    match e {
        AnalyticsError::UnknownDate(_) | AnalyticsError::UnknownColumn(_) => {
            log::warn!("Query rejected: {e}");
            HttpResponse::NotFound().json(ApiError::new(e))
        }
        AnalyticsError::MissingReferenceDate { .. } => {
            log::error!("Query failed: {e}");
            HttpResponse::InternalServerError().json(ApiError::new(e))
        }
    }
}

fn forecast_error(e: &ForecastError) -> HttpResponse {
    match e {
        ForecastError::ArtifactNotFound { .. } => {
            log::warn!("{e}");
            HttpResponse::NotFound().json(ApiError::new(e))
        }
        ForecastError::InvalidModelName(_) => {
            log::warn!("{e}");
            HttpResponse::BadRequest().json(ApiError::new(e))
        }
        ForecastError::Io { .. } => {
            log::error!("{e}");
            HttpResponse::InternalServerError().json(ApiError::new("Failed to read forecast"))
        }
    }
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/options`
///
/// Dates, columns and forecast models for the UI selectors.
pub async fn options(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(build_options(&state.dataset, &state.config))
}

/// `GET /api/clusters?date=`
pub async fn clusters(
    state: web::Data<AppState>,
    query: web::Query<ClusterQuery>,
) -> HttpResponse {
    let params = ClusterParams::from(query.into_inner());
    HttpResponse::Ok().json(event_clusters(&state.dataset.events, &params))
}

/// `GET /api/series?column=&date=`
pub async fn series(state: web::Data<AppState>, query: web::Query<SeriesQuery>) -> HttpResponse {
    let params = SeriesParams::from(query.into_inner());
    match build_series(
        &state.dataset.indicators,
        &state.config.series,
        &state.config.country,
        &params,
    ) {
        Ok(series) => HttpResponse::Ok().json(series),
        Err(e) => analytics_error(&e),
    }
}

/// `GET /api/summary?date=`
pub async fn summary(
    state: web::Data<AppState>,
    query: web::Query<SummaryQuery>,
) -> HttpResponse {
    let params = SummaryParams::from(query.into_inner());
    match build_summary(
        &state.dataset.indicators,
        &state.config.summary,
        &state.config.country,
        &params,
    ) {
        Ok(table) => HttpResponse::Ok().json(table),
        Err(e) => analytics_error(&e),
    }
}

/// `GET /api/forecasts/{model}`
///
/// Returns the pre-rendered forecast document as stored.
pub async fn forecast(state: web::Data<AppState>, model: web::Path<String>) -> HttpResponse {
    match state.forecasts.read(&model).await {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(state.forecasts.content_type())
            .body(bytes),
        Err(e) => forecast_error(&e),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test};
    use conflict_dash_analytics_models::{
        AnnotatedSeries, ClusterResult, DashboardOptions, SummaryTable,
    };
    use conflict_dash_event_models::SummaryValue;
    use tempfile::TempDir;

    use super::*;
    use crate::{configure, fixtures};

    macro_rules! app {
        ($dir:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(fixtures::state($dir)))
                    .configure(configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir.path());
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["healthy"], true);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn options_lists_selectors() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir.path());
        let req = test::TestRequest::get().uri("/api/options").to_request();
        let options: DashboardOptions = test::call_and_read_body_json(&app, req).await;
        assert_eq!(options.event_dates.len(), 2);
        assert_eq!(
            options.columns,
            vec![
                "violence index",
                "violence index_moving_avg",
                "fatalities_battles"
            ]
        );
        assert_eq!(options.forecast_models, vec!["TiDE"]);
    }

    #[actix_web::test]
    async fn clusters_for_date() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir.path());
        let req = test::TestRequest::get()
            .uri("/api/clusters?date=2021-08-13")
            .to_request();
        let result: ClusterResult = test::call_and_read_body_json(&app, req).await;
        assert_eq!(result.total_events, 2);
        assert_eq!(result.clusters.len(), 1);
        assert_eq!(result.clusters[0].fatalities_sum, 7);
    }

    #[actix_web::test]
    async fn malformed_date_is_bad_request() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir.path());
        let req = test::TestRequest::get()
            .uri("/api/clusters?date=13-08-2021")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ApiError = test::read_body_json(resp).await;
        assert!(!body.error.is_empty());
    }

    #[actix_web::test]
    async fn series_with_markers() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir.path());
        let req = test::TestRequest::get()
            .uri("/api/series?column=violence%20index&date=2021-08-13")
            .to_request();
        let series: AnnotatedSeries = test::call_and_read_body_json(&app, req).await;
        assert_eq!(series.points.len(), 4);
        assert_eq!(series.overlays.len(), 1);
        assert_eq!(series.markers.len(), 5);
    }

    #[actix_web::test]
    async fn unknown_date_and_column_are_not_found() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir.path());
        for uri in [
            "/api/series?column=violence%20index&date=2021-08-14",
            "/api/series?column=nope&date=2021-08-13",
            "/api/summary?date=2021-08-14",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[actix_web::test]
    async fn summary_table() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir.path());
        let req = test::TestRequest::get()
            .uri("/api/summary?date=2021-05-07")
            .to_request();
        let table: SummaryTable = test::call_and_read_body_json(&app, req).await;
        assert_eq!(table.value_header, "Afghanistan");
        let labels: Vec<&str> = table.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["violence index", "Violence index 1 Year moving average"]
        );
        assert_eq!(table.rows[0].value, SummaryValue::Number(100));
    }

    #[actix_web::test]
    async fn forecast_document_passes_through() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Afghanistan_TiDE.html"), "<html>TiDE</html>").unwrap();
        let app = app!(dir.path());

        let req = test::TestRequest::get()
            .uri("/api/forecasts/TiDE")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        let body = test::read_body(resp).await;
        assert_eq!(body.as_ref(), b"<html>TiDE</html>");

        let req = test::TestRequest::get()
            .uri("/api/forecasts/NBEATS")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/api/forecasts/TiDE..old")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
