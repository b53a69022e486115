use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::ChatMessage;
use crate::domain::repositories::chat_repository::{ChatRepository, ChatRepositoryError};
use crate::infrastructure::database::models::ChatModel;
use crate::infrastructure::database::schema::chats::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresChatRepository {
    pool: DbPool,
}

impl PostgresChatRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatRepository for PostgresChatRepository {
    async fn save_exchange(
        &self,
        user_turn: &ChatMessage,
        assistant_turn: &ChatMessage,
    ) -> Result<(), ChatRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChatRepositoryError::DatabaseError(e.to_string()))?;

        let user_model = ChatModel::from(user_turn);
        let assistant_model = ChatModel::from(assistant_turn);

        // One transaction so a failure cannot leave a dangling user turn in
        // the replayed history.
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::insert_into(chats).values(&user_model).execute(conn)?;
            diesel::insert_into(chats)
                .values(&assistant_model)
                .execute(conn)?;
            Ok(())
        })
        .map_err(|e| ChatRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn history(
        &self,
        document_id_param: Uuid,
        user_id_param: Uuid,
    ) -> Result<Vec<ChatMessage>, ChatRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChatRepositoryError::DatabaseError(e.to_string()))?;

        let models = chats
            .filter(document_id.eq(document_id_param))
            .filter(user_id.eq(user_id_param))
            .order(timestamp.asc())
            .load::<ChatModel>(&mut conn)
            .map_err(|e| ChatRepositoryError::DatabaseError(e.to_string()))?;

        models
            .into_iter()
            .map(|model| ChatMessage::try_from(model).map_err(ChatRepositoryError::DatabaseError))
            .collect()
    }

    async fn delete_history(
        &self,
        document_id_param: Uuid,
        user_id_param: Uuid,
    ) -> Result<u64, ChatRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChatRepositoryError::DatabaseError(e.to_string()))?;

        let deleted = diesel::delete(
            chats
                .filter(document_id.eq(document_id_param))
                .filter(user_id.eq(user_id_param)),
        )
        .execute(&mut conn)
        .map_err(|e| ChatRepositoryError::DatabaseError(e.to_string()))?;

        Ok(deleted as u64)
    }
}
