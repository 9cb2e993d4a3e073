//! Sample dashboard dataset, written into empty tables at startup when seeding is enabled.
//! Records go straight to the store; the request validator is not involved.

use crate::config::{ResourceDef, ALERTS, EMERGENCY_CONTACTS, EVACUATION_ROUTES, SHELTERS, STATS, WEATHER};
use crate::config::ResolvedModel;
use crate::error::AppError;
use crate::service::{CrudService, Record};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{json, Value};
use sqlx::SqlitePool;

fn iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn minutes_ago(now: DateTime<Utc>, minutes: i64) -> String {
    iso(now - Duration::minutes(minutes))
}

fn alerts(now: DateTime<Utc>) -> Vec<Value> {
    vec![
        json!({
            "type": "Hurricane Warning",
            "location": "Coastal Region A",
            "severity": "critical",
            "description": "Category 3 hurricane approaching coast. Evacuation orders in effect for zones 1-3.",
            "timestamp": minutes_ago(now, 120),
            "is_active": true,
        }),
        json!({
            "type": "Flood Advisory",
            "location": "River Valley B",
            "severity": "warning",
            "description": "Heavy rainfall causing river levels to rise. Monitor conditions and avoid low-lying areas.",
            "timestamp": minutes_ago(now, 60),
            "is_active": true,
        }),
        json!({
            "type": "Wildfire Alert",
            "location": "Forest Area C",
            "severity": "critical",
            "description": "Fast-moving wildfire spreading east. Immediate evacuation required for Mountain Ridge communities.",
            "timestamp": minutes_ago(now, 30),
            "is_active": true,
        }),
        json!({
            "type": "Earthquake Warning",
            "location": "Metropolitan Area",
            "severity": "advisory",
            "description": "Seismic activity detected. Be prepared for potential aftershocks in the next 24 hours.",
            "timestamp": minutes_ago(now, 15),
            "is_active": true,
        }),
    ]
}

fn contacts() -> Vec<Value> {
    [
        ("Emergency Services", "911 Emergency", "911", "phone"),
        ("Emergency Services", "Fire Department", "(555) 123-4567", "phone"),
        ("Emergency Services", "Police Department", "(555) 234-5678", "shield"),
        ("Emergency Services", "Emergency Medical Services", "(555) 345-6789", "medical"),
        ("Disaster Response", "FEMA Regional Office", "1-800-621-3362", "building"),
        ("Disaster Response", "Red Cross Emergency", "1-800-733-2767", "heart"),
        ("Disaster Response", "Emergency Management", "(555) 456-7890", "alert-triangle"),
        ("Disaster Response", "National Weather Service", "(555) 567-8901", "cloud"),
        ("Support Services", "Crisis Counseling", "1-800-985-5990", "user-heart"),
        ("Support Services", "Disaster Relief Hotline", "1-800-453-7381", "headphones"),
        ("Support Services", "Pet Rescue Services", "(555) 678-9012", "pet"),
        ("Support Services", "Food & Water Distribution", "(555) 789-0123", "truck"),
    ]
    .into_iter()
    .map(|(category, name, number, icon)| {
        json!({ "category": category, "name": name, "number": number, "icon_name": icon })
    })
    .collect()
}

fn shelters() -> Vec<Value> {
    vec![
        json!({
            "name": "Central Community Shelter",
            "address": "123 Main Street, Downtown",
            "latitude": 40.7589,
            "longitude": -73.9851,
            "capacity": 500,
            "available": 320,
            "amenities": ["Food", "Medical", "WiFi", "Security"],
            "contact": "(555) 123-4567",
            "status": "open",
            "distance": "0.8 miles",
        }),
        json!({
            "name": "North District Emergency Center",
            "address": "456 North Avenue, North Side",
            "latitude": 40.7831,
            "longitude": -73.9712,
            "capacity": 350,
            "available": 180,
            "amenities": ["Food", "Medical", "Bedding", "Showers"],
            "contact": "(555) 234-5678",
            "status": "open",
            "distance": "2.1 miles",
        }),
        json!({
            "name": "Riverside Evacuation Hub",
            "address": "789 River Road, Riverside",
            "latitude": 40.7505,
            "longitude": -74.0134,
            "capacity": 600,
            "available": 450,
            "amenities": ["Food", "Medical", "WiFi", "Showers", "Pet Friendly"],
            "contact": "(555) 345-6789",
            "status": "open",
            "distance": "1.5 miles",
        }),
        json!({
            "name": "West End Relief Station",
            "address": "321 West Boulevard, West End",
            "latitude": 40.7410,
            "longitude": -74.0123,
            "capacity": 400,
            "available": 280,
            "amenities": ["Food", "Medical", "Bedding", "WiFi"],
            "contact": "(555) 456-7890",
            "status": "open",
            "distance": "3.2 miles",
        }),
        json!({
            "name": "East Side Support Center",
            "address": "987 East Street, East Side",
            "latitude": 40.7614,
            "longitude": -73.9776,
            "capacity": 450,
            "available": 120,
            "amenities": ["Food", "Medical", "Security", "Childcare"],
            "contact": "(555) 567-8901",
            "status": "limited",
            "distance": "1.8 miles",
        }),
    ]
}

fn routes() -> Vec<Value> {
    vec![
        json!({
            "name": "Route A - Coastal Exit",
            "route_from": "Coastal Areas",
            "route_to": "Highland Safety Zone",
            "status": "open",
            "traffic": "light",
            "distance": "15 km",
            "description": "Primary coastal evacuation route via Highway 1",
        }),
        json!({
            "name": "Route B - Highway 45",
            "route_from": "City Center",
            "route_to": "Mountain Refuge",
            "status": "congested",
            "traffic": "heavy",
            "distance": "22 km",
            "description": "Main highway route to mountain safe zone",
        }),
        json!({
            "name": "Route C - Valley Road",
            "route_from": "Valley Region",
            "route_to": "Northern Safe Zone",
            "status": "closed",
            "traffic": "blocked",
            "distance": "18 km",
            "description": "CLOSED: Bridge damage from recent flooding",
        }),
    ]
}

fn weather(now: DateTime<Utc>) -> Vec<Value> {
    [
        (22.2, 24.1, 65, "Partly Cloudy", "Metropolitan Area"),
        (18.5, 12.8, 72, "Cloudy", "Downtown District"),
        (25.3, 8.2, 58, "Sunny", "Suburban Area"),
        (20.1, 32.4, 78, "Light Rain", "Coastal Region"),
        (16.7, 45.6, 85, "Thunderstorm", "Industrial Zone"),
        (28.9, 6.5, 42, "Clear", "Airport Area"),
        (14.2, 18.7, 91, "Heavy Rain", "Mountain Region"),
    ]
    .into_iter()
    .zip(0i64..)
    .map(|((temperature, wind_speed, humidity, conditions, location), hours)| {
        json!({
            "temperature": temperature,
            "wind_speed": wind_speed,
            "humidity": humidity,
            "conditions": conditions,
            "location": location,
            "timestamp": minutes_ago(now, hours * 60),
        })
    })
    .collect()
}

fn stats(now: DateTime<Utc>) -> Vec<Value> {
    vec![json!({
        "active_incidents": 12,
        "people_assisted": 1234,
        "shelters_active": 8,
        "coverage_areas": 25,
        "last_updated": iso(now),
    })]
}

/// Sample rows for a resource, keyed by column name.
pub fn sample_rows(def: &ResourceDef, now: DateTime<Utc>) -> Vec<Value> {
    match def.name {
        n if n == ALERTS.name => alerts(now),
        n if n == EMERGENCY_CONTACTS.name => contacts(),
        n if n == SHELTERS.name => shelters(),
        n if n == EVACUATION_ROUTES.name => routes(),
        n if n == WEATHER.name => weather(now),
        n if n == STATS.name => stats(now),
        _ => Vec::new(),
    }
}

fn to_record(row: Value) -> Record {
    match row {
        Value::Object(map) => map.into_iter().collect(),
        _ => Record::new(),
    }
}

/// Insert the sample rows into every resource table that is still empty. Returns the number
/// of rows written.
pub async fn seed_if_empty(pool: &SqlitePool, model: &ResolvedModel) -> Result<usize, AppError> {
    let now = Utc::now();
    let mut written = 0;
    for &def in model.resources() {
        if CrudService::count(pool, def).await? > 0 {
            tracing::debug!(resource = def.name, "table not empty, skipping seed");
            continue;
        }
        let rows = sample_rows(def, now);
        let n = rows.len();
        for row in rows {
            CrudService::create(pool, def, &to_record(row)).await?;
        }
        tracing::info!(resource = def.name, rows = n, "seeded");
        written += n;
    }
    Ok(written)
}
