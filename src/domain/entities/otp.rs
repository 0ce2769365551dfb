use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::constants::OTP_CODE_LEN;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OtpCode {
    pub id: Uuid,
    pub user_id: Uuid,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub consumed: bool,
    pub created_at: DateTime<Utc>,
}

impl OtpCode {
    /// Fresh numeric code for a user, valid for `valid_minutes` from now.
    pub fn issue(user_id: Uuid, valid_minutes: i64) -> Self {
        let now = Utc::now();
        OtpCode {
            id: Uuid::new_v4(),
            user_id,
            code: generate_code(),
            expires_at: now + Duration::minutes(valid_minutes),
            consumed: false,
            created_at: now,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..OTP_CODE_LEN)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(equal = 6, message = "Code must be 6 digits"))]
    pub code: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResendOtpRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_code_is_six_digits() {
        let otp = OtpCode::issue(Uuid::new_v4(), 5);
        assert_eq!(otp.code.len(), 6);
        assert!(otp.code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn expiry_window_is_respected() {
        let otp = OtpCode::issue(Uuid::new_v4(), 5);
        assert!(!otp.is_expired(Utc::now()));
        assert!(otp.is_expired(Utc::now() + Duration::minutes(6)));
    }
}
