use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::models::{conversation::ConversationState, destination::Destination};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub state: ConversationState,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    #[serde(default)]
    pub state: ConversationState,
    pub destination: Destination,
}

/*
    /api/chat
*/
pub async fn send_message(
    state: web::Data<AppState>,
    input: web::Json<ChatRequest>,
) -> ApiResult<HttpResponse> {
    let request = input.into_inner();
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ApiError::InvalidInput("message is required".to_string()));
    }

    let turn = state
        .conversation
        .respond(request.state, message, state.store.as_ref())
        .await;
    Ok(HttpResponse::Ok().json(turn))
}

/*
    /api/chat/select
*/
pub async fn select_destination(
    state: web::Data<AppState>,
    input: web::Json<SelectRequest>,
) -> ApiResult<HttpResponse> {
    let request = input.into_inner();
    if request.destination.key().is_empty() {
        return Err(ApiError::InvalidInput("destination id is required".to_string()));
    }

    let turn = state
        .conversation
        .select(request.state, request.destination, state.store.as_ref())
        .await;
    Ok(HttpResponse::Ok().json(turn))
}
