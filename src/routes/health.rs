use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;

use crate::app::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}***{}", head, tail)
    } else {
        "***".to_string()
    }
}

pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let store_result = check_store(&state).await;
    health
        .services
        .insert("mongodb".to_string(), store_result.clone());

    let gemini_result = check_gemini(&state);
    health
        .services
        .insert("gemini".to_string(), gemini_result.clone());

    let qloo_result = check_qloo(&state);
    health.services.insert("qloo".to_string(), qloo_result);

    // Qloo has a local fallback, so only the store and Gemini degrade the service
    if store_result.status != "ok" || gemini_result.status != "ok" {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

async fn check_store(state: &AppState) -> ServiceStatus {
    match state.store.ping().await {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: Some("Connected successfully to MongoDB".to_string()),
        },
        Err(e) => {
            log::error!("MongoDB health check failed: {}", e);

            ServiceStatus {
                status: "error".to_string(),
                details: Some(format!("Failed to connect: {}", e)),
            }
        }
    }
}

fn check_gemini(state: &AppState) -> ServiceStatus {
    match &state.config.gemini.api_key {
        Some(key) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!(
                "Gemini API key configured ({}), model {}",
                mask(key),
                state.gemini.model()
            )),
        },
        None => ServiceStatus {
            status: "error".to_string(),
            details: Some("GEMINI_API_KEY not configured".to_string()),
        },
    }
}

fn check_qloo(state: &AppState) -> ServiceStatus {
    match &state.config.qloo.api_key {
        Some(key) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!("Qloo API key configured ({})", mask(key))),
        },
        None => ServiceStatus {
            status: "fallback".to_string(),
            details: Some("QLOO_API_KEY not configured, using local recommendations".to_string()),
        },
    }
}
