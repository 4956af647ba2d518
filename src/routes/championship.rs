// src/routes/championship.rs
use actix_web::{get, post, put, route, web, HttpResponse, Result};
use sqlx::PgPool;

use crate::handlers::championship_handler;
use crate::models::championship::*;
use crate::models::common::OneOrMany;

/// Publish one result or a list of results
#[post("/fixture/result/publish")]
async fn publish_fixture_results(
    body: web::Json<OneOrMany<FixtureResultSubmission>>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    championship_handler::publish_fixture_results(body, pool).await
}

/// Get all tables, or the tables named in the request body
#[route("/table/{mode}", method = "GET", method = "POST")]
async fn get_tables(
    path: web::Path<String>,
    targets: Option<web::Json<Vec<TableTarget>>>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let mode = path.into_inner();
    championship_handler::get_tables(mode, targets, pool).await
}

/// Filter results by query string
#[get("/fixture/result/filter")]
async fn filter_results_by_query(
    query: web::Query<FilterCriteria>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    championship_handler::filter_results(query.into_inner(), pool).await
}

/// Filter results by JSON body; a missing body filters nothing out
#[post("/fixture/result/filter")]
async fn filter_results_by_body(
    criteria: Option<web::Json<FilterCriteria>>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let criteria = criteria.map(|c| c.into_inner()).unwrap_or_default();
    championship_handler::filter_results(criteria, pool).await
}

/// Update the score of one result or a list of results
#[put("/result/update")]
async fn update_results(
    body: web::Json<OneOrMany<ScoreUpdate>>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    championship_handler::update_results(body, pool).await
}
