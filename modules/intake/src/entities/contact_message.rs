use framework::sqlx::DatabaseProcessor;
use kanau::processor::Processor;
use time::PrimitiveDateTime;
use tracing::instrument;

/// A message from the public contact form, read by admins in the inbox.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: PrimitiveDateTime,
}

const CONTACT_COLUMNS: &str = "id, name, email, subject, message, created_at";

#[derive(Debug, Clone)]
pub struct InsertContactMessage {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

impl Processor<InsertContactMessage, Result<ContactMessage, sqlx::Error>> for DatabaseProcessor {
    #[instrument(skip_all, name = "SQL:InsertContactMessage", err)]
    async fn process(&self, input: InsertContactMessage) -> Result<ContactMessage, sqlx::Error> {
        sqlx::query_as::<_, ContactMessage>(&format!(
            r#"
            INSERT INTO "intake"."contact_message" (name, email, subject, message)
            VALUES ($1, $2, $3, $4)
            RETURNING {CONTACT_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.subject)
        .bind(&input.message)
        .fetch_one(self.db())
        .await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListContactMessages;

impl Processor<ListContactMessages, Result<Vec<ContactMessage>, sqlx::Error>> for DatabaseProcessor {
    #[instrument(skip_all, name = "SQL:ListContactMessages", err)]
    async fn process(
        &self,
        _input: ListContactMessages,
    ) -> Result<Vec<ContactMessage>, sqlx::Error> {
        sqlx::query_as::<_, ContactMessage>(&format!(
            r#"
            SELECT {CONTACT_COLUMNS}
            FROM "intake"."contact_message"
            ORDER BY id DESC
            "#
        ))
        .fetch_all(self.db())
        .await
    }
}
