use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::ChatHandler;

pub fn chat_routes(chat_handler: Arc<ChatHandler>) -> Router {
    Router::new()
        .route("/chat/{document_id}", post(ChatHandler::chat))
        .route(
            "/chat/{document_id}/{user_id}",
            get(ChatHandler::get_history),
        )
        .route(
            "/chat/{document_id}/{user_id}",
            delete(ChatHandler::delete_history),
        )
        .with_state(chat_handler)
}
