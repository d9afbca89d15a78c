//! 请求/响应载荷与客户端校验
//!
//! 对应远端 REST 服务的接口约定。非 2xx 响应统一携带
//! `{"error": "..."}` 形式的错误体。

use crate::{Role, User};
use serde::{Deserialize, Serialize};
use std::fmt;

// =========================================================
// 请求/响应定义 (Request / Response)
// =========================================================

/// POST /api/auth/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/register 与 POST /api/auth/admin/register
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// 登录/注册成功的响应体
///
/// 注意：admin/register 返回的是**新建用户**的 token 和档案，
/// 而不是执行操作的管理员；调用方应丢弃该 token 以保持管理员会话。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// POST /api/parking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSpotRequest {
    pub number: String,
    pub location: String,
}

/// POST /api/bookings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub spot_id: String,
    pub vehicle_number: String,
}

/// 非 2xx 响应的错误体约定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// =========================================================
// 客户端校验 (Validation)
// =========================================================

/// 注册表单校验失败
///
/// 校验不通过时不会构造任何请求，也就不可能发出网络调用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NameRequired,
    NameTooShort,
    InvalidEmail,
    PasswordTooShort,
    PasswordMismatch,
    RoleNotAllowed,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ValidationError::NameRequired => "Name is required",
            ValidationError::NameTooShort => "Name must be at least 2 characters",
            ValidationError::InvalidEmail => "Invalid email format",
            ValidationError::PasswordTooShort => "Password must be at least 6 characters",
            ValidationError::PasswordMismatch => "Passwords do not match",
            ValidationError::RoleNotAllowed => "Non-admin users can only register as user",
        };
        write!(f, "{}", msg)
    }
}

impl std::error::Error for ValidationError {}

/// 注册表单的原始输入
#[derive(Debug, Clone)]
pub struct RegistrationInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

impl RegistrationInput {
    /// 校验并转换为注册请求
    ///
    /// `allow_role_selection` 仅在管理员代注册时为 true；
    /// 普通自助注册只允许 `user` 角色。
    pub fn validate(&self, allow_role_selection: bool) -> Result<RegisterRequest, ValidationError> {
        // 必填检查忽略空白，但长度按原始输入算，提交时也不做修剪
        if self.name.trim().is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if self.name.chars().count() < 2 {
            return Err(ValidationError::NameTooShort);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.password.chars().count() < 6 {
            return Err(ValidationError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if !allow_role_selection && self.role != Role::User {
            return Err(ValidationError::RoleNotAllowed);
        }
        Ok(RegisterRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            role: self.role,
        })
    }
}

/// 邮箱形状校验：`local@domain.tld`，任何一段不得为空或含空白
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || local.chars().any(char::is_whitespace) {
        return false;
    }
    if domain.chars().any(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((head, tld)) => !head.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> RegistrationInput {
        RegistrationInput {
            name: "Sudhir".to_string(),
            email: "user1@example.com".to_string(),
            password: "user123".to_string(),
            confirm_password: "user123".to_string(),
            role: Role::User,
        }
    }

    #[test]
    fn valid_input_builds_request() {
        let req = input().validate(false).unwrap();
        assert_eq!(req.email, "user1@example.com");
        assert_eq!(req.role, Role::User);
    }

    #[test]
    fn mismatched_passwords_block_submission() {
        let mut bad = input();
        bad.confirm_password = "user124".to_string();
        assert_eq!(bad.validate(false), Err(ValidationError::PasswordMismatch));
    }

    #[test]
    fn password_mismatch_message_is_verbatim() {
        assert_eq!(
            ValidationError::PasswordMismatch.to_string(),
            "Passwords do not match"
        );
    }

    #[test]
    fn name_rules() {
        let mut bad = input();
        bad.name = "   ".to_string();
        assert_eq!(bad.validate(false), Err(ValidationError::NameRequired));
        bad.name = "A".to_string();
        assert_eq!(bad.validate(false), Err(ValidationError::NameTooShort));
    }

    #[test]
    fn name_length_counts_raw_input_and_is_submitted_untrimmed() {
        // 长度按原始输入算，提交时也不修剪
        let mut padded = input();
        padded.name = " A ".to_string();
        let req = padded.validate(false).unwrap();
        assert_eq!(req.name, " A ");
    }

    #[test]
    fn email_shape_is_checked() {
        for bad_email in ["", "noat.example.com", "a@b", "a b@c.com", "a@@b.com", "a@.com", "a@b."] {
            let mut bad = input();
            bad.email = bad_email.to_string();
            assert_eq!(
                bad.validate(false),
                Err(ValidationError::InvalidEmail),
                "email {:?} should be rejected",
                bad_email
            );
        }
        assert!(is_valid_email("attendant@carparking.com"));
    }

    #[test]
    fn short_password_is_rejected() {
        let mut bad = input();
        bad.password = "12345".to_string();
        bad.confirm_password = "12345".to_string();
        assert_eq!(bad.validate(false), Err(ValidationError::PasswordTooShort));
    }

    #[test]
    fn privileged_role_requires_admin_context() {
        let mut privileged = input();
        privileged.role = Role::Attendant;
        assert_eq!(privileged.validate(false), Err(ValidationError::RoleNotAllowed));
        assert!(privileged.validate(true).is_ok());
    }

    #[test]
    fn booking_request_serializes_camel_case() {
        let req = CreateBookingRequest {
            spot_id: "s1".to_string(),
            vehicle_number: "ABC-1234".to_string(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"spotId":"s1","vehicleNumber":"ABC-1234"}"#);
    }

    #[test]
    fn error_body_parses() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"Spot already occupied"}"#).unwrap();
        assert_eq!(body.error, "Spot already occupied");
    }

    #[test]
    fn auth_response_parses() {
        let json = r#"{
            "token": "eyJhbGciOiJIUzI1NiJ9.payload.sig",
            "user": {
                "_id": "u1", "name": "Admin", "email": "admin@carparking.com",
                "role": "admin", "isActive": true, "createdAt": "2025-01-15T08:30:00Z"
            }
        }"#;
        let res: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(res.user.role, Role::Admin);
        assert!(res.token.starts_with("eyJ"));
    }
}
