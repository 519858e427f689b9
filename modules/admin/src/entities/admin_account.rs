use framework::sqlx::DatabaseProcessor;
use kanau::processor::Processor;
use time::PrimitiveDateTime;
use tracing::instrument;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AdminAccount {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: PrimitiveDateTime,
}

const ADMIN_COLUMNS: &str = "id, name, email, password_hash, created_at";

#[derive(Debug, Clone)]
pub struct FindAdminByEmail {
    pub email: String,
}

impl Processor<FindAdminByEmail, Result<Option<AdminAccount>, sqlx::Error>> for DatabaseProcessor {
    #[instrument(skip_all, name = "SQL:FindAdminByEmail", err)]
    async fn process(&self, input: FindAdminByEmail) -> Result<Option<AdminAccount>, sqlx::Error> {
        sqlx::query_as::<_, AdminAccount>(&format!(
            r#"
            SELECT {ADMIN_COLUMNS}
            FROM "admin"."admin_account"
            WHERE email = $1
            "#
        ))
        .bind(&input.email)
        .fetch_optional(self.db())
        .await
    }
}

#[derive(Debug, Clone)]
pub struct InsertAdminAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl Processor<InsertAdminAccount, Result<AdminAccount, sqlx::Error>> for DatabaseProcessor {
    #[instrument(skip_all, name = "SQL:InsertAdminAccount", err)]
    async fn process(&self, input: InsertAdminAccount) -> Result<AdminAccount, sqlx::Error> {
        sqlx::query_as::<_, AdminAccount>(&format!(
            r#"
            INSERT INTO "admin"."admin_account" (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING {ADMIN_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.password_hash)
        .fetch_one(self.db())
        .await
    }
}
