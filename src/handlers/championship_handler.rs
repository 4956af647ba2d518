use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;

use crate::championship::{ingest, tables, update, ChampionshipError};
use crate::db::championship::PgStore;
use crate::models::championship::*;
use crate::models::common::{ApiResponse, OneOrMany};

/// Which tables a `/table/{mode}` request asks for
pub enum TableMode {
    All,
    Specific,
}

impl TableMode {
    pub fn parse(mode: &str) -> Option<Self> {
        match mode {
            "all" => Some(TableMode::All),
            "specific" => Some(TableMode::Specific),
            _ => None,
        }
    }
}

/// Map a workflow error to its HTTP response. Storage details stay in the logs.
fn error_response(message: &str, error: &ChampionshipError) -> HttpResponse {
    match error {
        ChampionshipError::NotFound { .. } => {
            HttpResponse::NotFound().json(ApiResponse::<()>::error_with_message(message, error.to_string()))
        }
        ChampionshipError::MalformedScore { .. }
        | ChampionshipError::MalformedTimestamp { .. }
        | ChampionshipError::InvalidSubmission(_) => {
            HttpResponse::BadRequest().json(ApiResponse::<()>::error_with_message(message, error.to_string()))
        }
        ChampionshipError::Persistence(e) => {
            tracing::error!("{}: {}", message, e);
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_with_message(message, "Database error"))
        }
    }
}

#[tracing::instrument(
    name = "Publish fixture results",
    skip(body, pool)
)]
pub async fn publish_fixture_results(
    body: web::Json<OneOrMany<FixtureResultSubmission>>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let submissions = body.into_inner().into_vec();
    let store = PgStore::new(pool.get_ref().clone());

    match ingest::ingest(&store, &submissions).await {
        Ok(tables) => {
            tracing::info!("Published {} results, {} tables updated", submissions.len(), tables.len());
            Ok(HttpResponse::Ok().json(ApiResponse::success("Results published", tables)))
        }
        Err(e) => {
            tracing::warn!("Failed to publish results: {}", e);
            Ok(error_response("Failed to publish results", &e))
        }
    }
}

#[tracing::instrument(
    name = "Get tables",
    skip(targets, pool)
)]
pub async fn get_tables(
    mode: String,
    targets: Option<web::Json<Vec<TableTarget>>>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let targets = match TableMode::parse(&mode) {
        Some(TableMode::All) => None,
        Some(TableMode::Specific) => match targets {
            Some(targets) => Some(targets.into_inner()),
            None => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error_with_message(
                    "Failed to get tables",
                    "Expected a JSON list of {leagueName, group} targets",
                )));
            }
        },
        None => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_with_message(
                "Unknown table mode",
                format!("{} is neither `all` nor `specific`", mode),
            )));
        }
    };

    let store = PgStore::new(pool.get_ref().clone());
    match tables::get_tables(&store, targets.as_deref()).await {
        Ok(tables) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            format!("{} tables", tables.len()),
            tables,
        ))),
        Err(e) => Ok(error_response("Failed to get tables", &e)),
    }
}

#[tracing::instrument(
    name = "Filter results",
    skip(criteria, pool),
    fields(
        group = ?criteria.group_title,
        team = ?criteria.team_name
    )
)]
pub async fn filter_results(
    criteria: FilterCriteria,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let store = PgStore::new(pool.get_ref().clone());

    match tables::filter_results(&store, &criteria).await {
        Ok(results) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            format!("{} results", results.len()),
            results,
        ))),
        Err(e) => Ok(error_response("Failed to filter results", &e)),
    }
}

#[tracing::instrument(
    name = "Update results",
    skip(body, pool)
)]
pub async fn update_results(
    body: web::Json<OneOrMany<ScoreUpdate>>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let updates = body.into_inner().into_vec();
    let store = PgStore::new(pool.get_ref().clone());

    let outcomes = update::update_scores(&store, &updates).await;
    let updated = outcomes.iter().filter(|o| o.updated).count();
    tracing::info!("Updated {} of {} results", updated, outcomes.len());

    let response = ApiResponse {
        success: updated == outcomes.len(),
        message: format!("Updated {} of {} results", updated, outcomes.len()),
        data: Some(outcomes),
        error: None,
    };
    Ok(HttpResponse::Ok().json(response))
}
