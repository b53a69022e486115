use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pipeline stage of a document. Strictly forward-moving; this field is the
/// only coordination signal between the background jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentStatus {
    Uploaded,
    Embedded,
    MetricsExtracted,
}

impl DocumentStatus {
    pub fn as_i32(self) -> i32 {
        match self {
            DocumentStatus::Uploaded => 1,
            DocumentStatus::Embedded => 2,
            DocumentStatus::MetricsExtracted => 3,
        }
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(DocumentStatus::Uploaded),
            2 => Some(DocumentStatus::Embedded),
            3 => Some(DocumentStatus::MetricsExtracted),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: Uuid,
    name: String,
    year: i32,
    description: Option<String>,
    file_url: String,
    uploaded_by: Option<Uuid>,
    status: DocumentStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Document {
    pub fn new(
        name: String,
        year: i32,
        description: Option<String>,
        file_url: String,
        uploaded_by: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            year,
            description,
            file_url,
            uploaded_by,
            status: DocumentStatus::Uploaded,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a document from a persisted row.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: Uuid,
        name: String,
        year: i32,
        description: Option<String>,
        file_url: String,
        uploaded_by: Option<Uuid>,
        status: DocumentStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            year,
            description,
            file_url,
            uploaded_by,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn file_url(&self) -> &str {
        &self.file_url
    }

    pub fn uploaded_by(&self) -> Option<Uuid> {
        self.uploaded_by
    }

    pub fn status(&self) -> DocumentStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Conditionally advance the status. Returns false when the document is
    /// not in the expected `from` stage, which means another run already
    /// claimed it.
    pub fn transition(&mut self, from: DocumentStatus, to: DocumentStatus) -> bool {
        if self.status != from {
            return false;
        }

        self.status = to;
        self.updated_at = Utc::now();
        true
    }
}
