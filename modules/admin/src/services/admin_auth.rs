use framework::sqlx::DatabaseProcessor;
use kanau::processor::Processor;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::entities::admin_account::{FindAdminByEmail, InsertAdminAccount};
use crate::entities::admin_session::{
    AdminSessionId, DeleteAdminSession, FindLiveAdminSession, InsertAdminSession,
};
use crate::utils::password::{hash_password, verify_password};

const SESSION_TTL: time::Duration = time::Duration::hours(24);

#[derive(Clone)]
pub struct AdminAuthService {
    pub db: DatabaseProcessor,
}

#[derive(Debug, Clone)]
pub struct AdminLogin {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminLoginResult {
    Success(AdminSessionId),
    WrongCredential,
}

impl Processor<AdminLogin, Result<AdminLoginResult, framework::Error>> for AdminAuthService {
    #[instrument(skip_all, err)]
    async fn process(&self, input: AdminLogin) -> Result<AdminLoginResult, framework::Error> {
        // Find admin by email
        let Some(account) = self
            .db
            .process(FindAdminByEmail { email: input.email })
            .await?
        else {
            return Ok(AdminLoginResult::WrongCredential);
        };

        // Verify password; the result never says which check failed
        if verify_password(&input.password, &account.password_hash).is_err() {
            return Ok(AdminLoginResult::WrongCredential);
        }

        // Create session
        let session_id = AdminSessionId::generate();
        self.db
            .process(InsertAdminSession {
                token: session_id.to_ascii_string(),
                admin_id: account.id,
                expires_at: framework::now_time() + SESSION_TTL,
            })
            .await?;

        Ok(AdminLoginResult::Success(session_id))
    }
}

#[derive(Debug, Clone)]
pub struct AdminLogout {
    pub session_id: AdminSessionId,
}

impl Processor<AdminLogout, Result<(), framework::Error>> for AdminAuthService {
    #[instrument(skip_all, err)]
    async fn process(&self, input: AdminLogout) -> Result<(), framework::Error> {
        self.db
            .process(DeleteAdminSession {
                token: input.session_id.to_ascii_string(),
            })
            .await?;
        Ok(())
    }
}

/// Resolves a presented session token to the admin it belongs to.
#[derive(Debug, Clone)]
pub struct AuthenticateSession {
    pub session_id: AdminSessionId,
}

impl Processor<AuthenticateSession, Result<Option<Uuid>, framework::Error>> for AdminAuthService {
    #[instrument(skip_all, err)]
    async fn process(&self, input: AuthenticateSession) -> Result<Option<Uuid>, framework::Error> {
        let session = self
            .db
            .process(FindLiveAdminSession {
                token: input.session_id.to_ascii_string(),
            })
            .await?;
        Ok(session.map(|s| s.admin_id))
    }
}

/// Startup bootstrap: creates the configured admin account when no account
/// with that email exists yet.
#[derive(Debug, Clone)]
pub struct EnsureAdminAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Processor<EnsureAdminAccount, Result<(), framework::Error>> for AdminAuthService {
    #[instrument(skip_all, err)]
    async fn process(&self, input: EnsureAdminAccount) -> Result<(), framework::Error> {
        let existing = self
            .db
            .process(FindAdminByEmail {
                email: input.email.clone(),
            })
            .await?;
        if existing.is_some() {
            return Ok(());
        }

        let password_hash =
            hash_password(&input.password).map_err(framework::Error::PasswordHash)?;
        let account = self
            .db
            .process(InsertAdminAccount {
                name: input.name,
                email: input.email,
                password_hash,
            })
            .await?;
        info!(admin_id = %account.id, "bootstrapped admin account");
        Ok(())
    }
}
