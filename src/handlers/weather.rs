//! Weather endpoints beyond plain CRUD: latest reading and the synthetic forecast.

use crate::config::{FilterOp, WEATHER};
use crate::error::AppError;
use crate::response::now_iso;
use crate::service::CrudService;
use crate::sql::{Condition, ListQuery, SqlValue};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Duration, NaiveDate, Utc};
use rand::Rng;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;

pub const DEFAULT_FORECAST_DAYS: u32 = 5;
pub const MAX_FORECAST_DAYS: u32 = 14;
pub const DEFAULT_FORECAST_LOCATION: &str = "Default Location";

const CONDITIONS: [&str; 6] = ["Sunny", "Cloudy", "Rainy", "Stormy", "Windy", "Partly Cloudy"];

/// GET /api/weather/current?location=: most recent reading, optionally filtered by location substring.
pub async fn current(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, AppError> {
    let mut list = ListQuery::new("timestamp", true).paginate(Some(1), None);
    if let Some(location) = params.get("location").map(|s| s.trim()).filter(|s| !s.is_empty()) {
        list.conditions.push(Condition {
            columns: vec!["location"],
            op: FilterOp::Contains,
            value: SqlValue::Text(location.to_string()),
        });
    }
    let latest = CrudService::list(&state.pool, &WEATHER, &list)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound("No weather data found".into()))?;
    Ok(Json(json!({
        "success": true,
        "data": {
            "location": latest["location"],
            "timestamp": latest["timestamp"],
            "current": {
                "temperature": latest["temperature"],
                "humidity": latest["humidity"],
                "windSpeed": latest["wind_speed"],
                "conditions": latest["conditions"],
            },
        },
    })))
}

#[derive(Debug, Serialize)]
pub struct TemperatureRange {
    pub min: u32,
    pub max: u32,
    pub avg: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    pub date: String,
    pub day: String,
    pub temperature: TemperatureRange,
    pub conditions: &'static str,
    pub humidity: u32,
    pub wind_speed: u32,
    pub precipitation: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub location: String,
    pub forecast: Vec<ForecastDay>,
    pub last_updated: String,
}

fn day_label(offset: u32, date: NaiveDate) -> String {
    match offset {
        0 => "Today".into(),
        1 => "Tomorrow".into(),
        _ => date.format("%A").to_string(),
    }
}

/// Random forecast for `days` days starting at `today`. Values carry no meaning.
pub fn generate_forecast<R: Rng>(rng: &mut R, today: NaiveDate, days: u32) -> Vec<ForecastDay> {
    (0..days)
        .map(|i| {
            let date = today + Duration::days(i64::from(i));
            ForecastDay {
                date: date.format("%Y-%m-%d").to_string(),
                day: day_label(i, date),
                temperature: TemperatureRange {
                    min: rng.gen_range(18..28),
                    max: rng.gen_range(28..38),
                    avg: rng.gen_range(23..33),
                },
                conditions: CONDITIONS[rng.gen_range(0..CONDITIONS.len())],
                humidity: rng.gen_range(60..90),
                wind_speed: rng.gen_range(10..50),
                precipitation: rng.gen_range(0..80),
            }
        })
        .collect()
}

/// GET /api/weather/forecast?location=&days=
pub async fn forecast(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let location = params
        .get("location")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_FORECAST_LOCATION)
        .to_string();
    let days = params
        .get("days")
        .and_then(|d| d.trim().parse::<u32>().ok())
        .unwrap_or(DEFAULT_FORECAST_DAYS)
        .min(MAX_FORECAST_DAYS);
    let forecast = generate_forecast(&mut rand::thread_rng(), Utc::now().date_naive(), days);
    Json(json!({
        "success": true,
        "data": Forecast {
            location,
            forecast,
            last_updated: now_iso(),
        },
    }))
}
