use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::password::{hash_password, verify_password};
use crate::entities::otp::{OtpCode, ResendOtpRequest, VerifyOtpRequest};
use crate::entities::token::AuthResponse;
use crate::entities::user::{
    NewUser, NewUserResponse, PublicUser, Role, UpdateProfileRequest, User,
};
use crate::errors::{AppError, AuthError};
use crate::interfaces::repositories::otp::OtpRepository;
use crate::interfaces::repositories::user::UserRepository;
use crate::repositories::token::TokenServiceRepository;
use crate::settings::AppConfig;
use crate::use_cases::extractors::AuthContext;

pub struct AuthHandler<R, O, T>
where
    R: UserRepository,
    O: OtpRepository,
    T: TokenServiceRepository,
{
    pub user_repo: R,
    pub otp_repo: O,
    pub token_service: T,
    otp_expiration_minutes: i64,
    otp_resend_expiration_minutes: i64,
    /// Testing runs have no mail sink; the code is echoed in the response.
    expose_otp: bool,
}

impl<R, O, T> AuthHandler<R, O, T>
where
    R: UserRepository,
    O: OtpRepository,
    T: TokenServiceRepository,
{
    pub fn new(user_repo: R, otp_repo: O, token_service: T, config: &AppConfig) -> Self {
        AuthHandler {
            user_repo,
            otp_repo,
            token_service,
            otp_expiration_minutes: config.otp_expiration_minutes,
            otp_resend_expiration_minutes: config.otp_resend_expiration_minutes,
            expose_otp: config.is_testing(),
        }
    }

    /// Registers an unverified user and issues their first OTP.
    pub async fn register(&self, request: NewUser) -> Result<NewUserResponse, AppError> {
        request.validate()?;

        if request.role == Some(Role::Admin) {
            return Err(AppError::validation(
                "role",
                "Admin accounts cannot be self-registered",
            ));
        }

        let hashed_password = hash_password(&request.password)?;
        let user_insert = request.prepare_for_insert(hashed_password);

        let user_id = self.user_repo.create_user(&user_insert).await?;
        let otp = self.issue_otp(user_id, self.otp_expiration_minutes).await?;

        Ok(NewUserResponse {
            id: user_id,
            message: "User created. Verify your email with the code we sent.".to_string(),
            debug_otp: self.expose_otp.then(|| otp.code),
        })
    }

    /// Promotes an unverified user on a correct, unexpired code.
    pub async fn verify_otp(&self, request: VerifyOtpRequest) -> Result<PublicUser, AppError> {
        request.validate()?;

        let user = self
            .user_repo
            .get_user_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if user.is_verified {
            return Err(AppError::Conflict("Account is already verified".to_string()));
        }

        let otp = self
            .otp_repo
            .get_active_code(&user.id)
            .await?
            .ok_or_else(|| AppError::validation("code", "No active code; request a new one"))?;

        if otp.is_expired(Utc::now()) {
            return Err(AppError::validation("code", "Code has expired"));
        }
        if otp.code != request.code {
            return Err(AppError::validation("code", "Incorrect code"));
        }

        self.user_repo.mark_verified(&user.id).await?;

        let user = self
            .user_repo
            .get_user_by_id(&user.id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::info!("User {} verified their email", user.id);
        Ok(user.into())
    }

    /// Replaces the user's code with a short-lived fresh one.
    pub async fn resend_otp(&self, request: ResendOtpRequest) -> Result<NewUserResponse, AppError> {
        request.validate()?;

        let user = self
            .user_repo
            .get_user_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if user.is_verified {
            return Err(AppError::Conflict("Account is already verified".to_string()));
        }

        let otp = self
            .issue_otp(user.id, self.otp_resend_expiration_minutes)
            .await?;

        Ok(NewUserResponse {
            id: user.id,
            message: "A new code was sent.".to_string(),
            debug_otp: self.expose_otp.then(|| otp.code),
        })
    }

    async fn issue_otp(&self, user_id: Uuid, valid_minutes: i64) -> Result<OtpCode, AppError> {
        let otp = OtpCode::issue(user_id, valid_minutes);
        self.otp_repo.store_code(&otp).await?;

        // Email delivery is a thin external concern; the delivery hook is
        // this log line.
        tracing::info!(
            user_id = %user_id,
            expires_at = %otp.expires_at,
            "OTP issued"
        );
        Ok(otp)
    }

    /// Logs in a user by validating credentials and generating JWTs
    pub async fn login(&self, request: crate::entities::user::LoginUser) -> Result<AuthResponse, AuthError> {
        request.validate()?;

        let user = self
            .user_repo
            .get_user_by_email(&request.email)
            .await
            .map_err(|_e| AuthError::WrongCredentials)?
            .ok_or(AuthError::WrongCredentials)?;

        let is_password_valid = verify_password(&request.password, &user.password_hash)
            .map_err(|_| AuthError::WrongCredentials)?;
        if !is_password_valid {
            return Err(AuthError::WrongCredentials);
        }

        if !user.is_verified {
            return Err(AuthError::AccountNotVerified);
        }

        let response = self.create_auth_response(&user)?;

        tracing::info!("User logged in successfully");
        Ok(response)
    }

    pub fn create_auth_response(&self, user: &User) -> Result<AuthResponse, AuthError> {
        let access_token = self.token_service.create_jwt(user).map_err(|e| {
            tracing::warn!("Failed to create JWT: {}", e);
            AuthError::TokenCreation
        })?;

        let refresh_token = self.token_service.create_refresh_jwt(&user.id).map_err(|e| {
            tracing::warn!("Failed to create refresh JWT: {}", e);
            AuthError::TokenCreation
        })?;
        Ok(AuthResponse::new(access_token, refresh_token))
    }

    /// Refreshes the access token using the refresh token
    pub async fn refresh_token(&self, token: &str) -> Result<AuthResponse, AuthError> {
        let decoded = self.token_service.decode_refresh_jwt(token)?;
        let user_id =
            Uuid::parse_str(&decoded.claims.sub).map_err(|_| AuthError::InvalidUserId)?;

        let user = self
            .user_repo
            .get_user_by_id(&user_id)
            .await
            .map_err(|_| AuthError::WrongCredentials)?
            .ok_or(AuthError::WrongCredentials)?;

        self.create_auth_response(&user)
    }

    pub async fn me(&self, ctx: &AuthContext) -> Result<PublicUser, AppError> {
        self.user_repo
            .get_user_by_id(&ctx.user_id)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn update_profile(
        &self,
        ctx: &AuthContext,
        request: UpdateProfileRequest,
    ) -> Result<PublicUser, AppError> {
        request.validate()?;

        self.user_repo
            .update_profile(&ctx.user_id, &request)
            .await
            .map(PublicUser::from)
    }

    pub async fn get_user(&self, ctx: &AuthContext, id: &Uuid) -> Result<PublicUser, AppError> {
        // Profiles are visible to their owner and to admins.
        if !ctx.owns_or_admin(id) {
            return Err(AppError::ForbiddenAccess);
        }

        self.user_repo
            .get_user_by_id(id)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
