use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::services::ChatService;
use crate::domain::repositories::ChatRepository;
use crate::presentation::http::dto::{
    ChatRequestDto, ChatResponseDto, ChatTurnDto, DeleteHistoryResponseDto,
};
use crate::presentation::http::errors::AppError;

pub struct ChatHandler {
    chat_service: Arc<ChatService>,
    chat_repository: Arc<dyn ChatRepository>,
}

impl ChatHandler {
    pub fn new(chat_service: Arc<ChatService>, chat_repository: Arc<dyn ChatRepository>) -> Self {
        Self {
            chat_service,
            chat_repository,
        }
    }

    pub async fn chat(
        State(handler): State<Arc<ChatHandler>>,
        Path(document_id): Path<Uuid>,
        Json(request): Json<ChatRequestDto>,
    ) -> Result<impl IntoResponse, AppError> {
        if request.query.trim().is_empty() {
            return Err(AppError::BadRequest("Query cannot be empty".to_string()));
        }

        let response = handler
            .chat_service
            .answer(document_id, request.user_id, &request.query)
            .await?;

        Ok(Json(ChatResponseDto { response }))
    }

    pub async fn get_history(
        State(handler): State<Arc<ChatHandler>>,
        Path((document_id, user_id)): Path<(Uuid, Uuid)>,
    ) -> Result<impl IntoResponse, AppError> {
        let history = handler.chat_repository.history(document_id, user_id).await?;

        let turns: Vec<ChatTurnDto> = history.into_iter().map(ChatTurnDto::from).collect();

        Ok(Json(turns))
    }

    pub async fn delete_history(
        State(handler): State<Arc<ChatHandler>>,
        Path((document_id, user_id)): Path<(Uuid, Uuid)>,
    ) -> Result<impl IntoResponse, AppError> {
        let deleted = handler
            .chat_repository
            .delete_history(document_id, user_id)
            .await?;

        Ok(Json(DeleteHistoryResponseDto {
            message: format!("Deleted {} messages.", deleted),
        }))
    }
}
