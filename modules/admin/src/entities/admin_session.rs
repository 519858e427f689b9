use argon2::password_hash::rand_core::{OsRng, RngCore};
use framework::sqlx::DatabaseProcessor;
use kanau::processor::Processor;
use time::PrimitiveDateTime;
use tracing::instrument;
use uuid::Uuid;

/// Opaque 256-bit session token, carried as 64 hex characters in the
/// `x-admin-authorization` header. Minted lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminSessionId(pub [u8; 32]);

#[derive(Debug, thiserror::Error)]
#[error("invalid session token")]
pub struct InvalidSessionToken;

impl AdminSessionId {
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn to_ascii_string(&self) -> String {
        hex::encode(self.0)
    }

    pub fn try_from_ascii_string(token: &str) -> Result<Self, InvalidSessionToken> {
        let bytes = hex::decode(token).map_err(|_| InvalidSessionToken)?;
        let array = bytes.try_into().map_err(|_| InvalidSessionToken)?;
        Ok(Self(array))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AdminSession {
    pub token: String,
    pub admin_id: Uuid,
    pub created_at: PrimitiveDateTime,
    pub expires_at: PrimitiveDateTime,
}

#[derive(Debug, Clone)]
pub struct InsertAdminSession {
    pub token: String,
    pub admin_id: Uuid,
    pub expires_at: PrimitiveDateTime,
}

impl Processor<InsertAdminSession, Result<(), sqlx::Error>> for DatabaseProcessor {
    #[instrument(skip_all, name = "SQL:InsertAdminSession", err)]
    async fn process(&self, input: InsertAdminSession) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO "admin"."admin_session" (token, admin_id, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&input.token)
        .bind(input.admin_id)
        .bind(input.expires_at)
        .execute(self.db())
        .await?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FindLiveAdminSession {
    pub token: String,
}

impl Processor<FindLiveAdminSession, Result<Option<AdminSession>, sqlx::Error>> for DatabaseProcessor {
    /// Expired sessions are treated as absent; a periodic sweep (or the
    /// next login) is free to garbage-collect the rows.
    #[instrument(skip_all, name = "SQL:FindLiveAdminSession", err)]
    async fn process(&self, input: FindLiveAdminSession) -> Result<Option<AdminSession>, sqlx::Error> {
        sqlx::query_as::<_, AdminSession>(
            r#"
            SELECT token, admin_id, created_at, expires_at
            FROM "admin"."admin_session"
            WHERE token = $1 AND expires_at > (now() at time zone 'utc')
            "#,
        )
        .bind(&input.token)
        .fetch_optional(self.db())
        .await
    }
}

#[derive(Debug, Clone)]
pub struct DeleteAdminSession {
    pub token: String,
}

impl Processor<DeleteAdminSession, Result<bool, sqlx::Error>> for DatabaseProcessor {
    #[instrument(skip_all, name = "SQL:DeleteAdminSession", err)]
    async fn process(&self, input: DeleteAdminSession) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM "admin"."admin_session"
            WHERE token = $1
            "#,
        )
        .bind(&input.token)
        .execute(self.db())
        .await?;
        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_token_hex_codec_round_trips() {
        let id = AdminSessionId::generate();
        let ascii = id.to_ascii_string();
        assert_eq!(ascii.len(), 64);
        assert!(ascii.bytes().all(|b| b.is_ascii_hexdigit()));
        let parsed = AdminSessionId::try_from_ascii_string(&ascii).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn malformed_session_tokens_are_rejected() {
        assert!(AdminSessionId::try_from_ascii_string("").is_err());
        assert!(AdminSessionId::try_from_ascii_string("abc123").is_err());
        let not_hex = "zz".repeat(32);
        assert!(AdminSessionId::try_from_ascii_string(&not_hex).is_err());
    }

    #[test]
    fn tokens_are_minted_lowercase() {
        let ascii = AdminSessionId::generate().to_ascii_string();
        assert_eq!(ascii, ascii.to_lowercase());
    }

    #[test]
    fn generated_tokens_are_distinct() {
        assert_ne!(AdminSessionId::generate(), AdminSessionId::generate());
    }
}
