#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hash error: {0}")]
    PasswordHash(argon2::password_hash::Error),

    #[error("permission denied")]
    PermissionsDenied,
}
