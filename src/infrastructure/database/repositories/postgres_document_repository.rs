use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{Document, DocumentStatus};
use crate::domain::repositories::document_repository::{
    DocumentRepository, DocumentRepositoryError,
};
use crate::infrastructure::database::models::DocumentModel;
use crate::infrastructure::database::schema::documents::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresDocumentRepository {
    pool: DbPool,
}

impl PostgresDocumentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_domain(models: Vec<DocumentModel>) -> Result<Vec<Document>, DocumentRepositoryError> {
    models
        .into_iter()
        .map(|model| Document::try_from(model).map_err(DocumentRepositoryError::DatabaseError))
        .collect()
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn create(&self, document: &Document) -> Result<(), DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let model = DocumentModel::from(document);

        diesel::insert_into(documents)
            .values(&model)
            .execute(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        document_id: Uuid,
    ) -> Result<Option<Document>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let result = documents
            .find(document_id)
            .first::<DocumentModel>(&mut conn)
            .optional()
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        result
            .map(|model| Document::try_from(model).map_err(DocumentRepositoryError::DatabaseError))
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<Document>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let models = documents
            .order(created_at.desc())
            .load::<DocumentModel>(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        to_domain(models)
    }

    async fn list_by_status(
        &self,
        status_filter: DocumentStatus,
    ) -> Result<Vec<Document>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let models = documents
            .filter(status.eq(status_filter.as_i32()))
            .order(created_at.asc())
            .load::<DocumentModel>(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        to_domain(models)
    }

    async fn list_by_year(
        &self,
        year_filter: i32,
    ) -> Result<Vec<Document>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let models = documents
            .filter(year.eq(year_filter))
            .order(created_at.desc())
            .load::<DocumentModel>(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        to_domain(models)
    }

    async fn transition_status(
        &self,
        document_id: Uuid,
        from: DocumentStatus,
        to: DocumentStatus,
    ) -> Result<bool, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        // The status predicate makes this a claim: a concurrent run that
        // already advanced the document updates zero rows here.
        let updated = diesel::update(
            documents
                .find(document_id)
                .filter(status.eq(from.as_i32())),
        )
        .set((status.eq(to.as_i32()), updated_at.eq(Utc::now())))
        .execute(&mut conn)
        .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(updated > 0)
    }
}
