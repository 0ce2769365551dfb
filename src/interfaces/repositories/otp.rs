use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::otp::OtpCode, errors::AppError, repositories::sqlx_repo::SqlxOtpRepo,
};

#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Stores a fresh code for the user, replacing any earlier one.
    async fn store_code(&self, otp: &OtpCode) -> Result<(), AppError>;
    async fn get_active_code(&self, user_id: &Uuid) -> Result<Option<OtpCode>, AppError>;
}

impl SqlxOtpRepo {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        SqlxOtpRepo { pool }
    }
}

#[async_trait]
impl OtpRepository for SqlxOtpRepo {
    async fn store_code(&self, otp: &OtpCode) -> Result<(), AppError> {
        sqlx::query(
            r#"INSERT INTO otp_codes (id, user_id, code, expires_at, consumed, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT (user_id) DO UPDATE SET
                code = excluded.code,
                expires_at = excluded.expires_at,
                consumed = 0,
                created_at = excluded.created_at
            "#,
        )
        .bind(otp.id)
        .bind(otp.user_id)
        .bind(&otp.code)
        .bind(otp.expires_at)
        .bind(otp.consumed)
        .bind(otp.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_active_code(&self, user_id: &Uuid) -> Result<Option<OtpCode>, AppError> {
        sqlx::query_as::<_, OtpCode>(
            "SELECT * FROM otp_codes WHERE user_id = ? AND consumed = 0",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }
}
