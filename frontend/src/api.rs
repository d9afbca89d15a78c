//! API 客户端
//!
//! 封装对远端 REST 服务的所有出站请求：
//! - 存在 token 时附加 `Authorization: Bearer <token>`
//! - 非 2xx 响应解析 `{"error": "..."}` 错误体，缺失时回退到通用消息
//! - 网络层失败（完全无响应）与服务端拒绝在类型上区分开

use carpark_shared::protocol::{
    AuthResponse, CreateBookingRequest, CreateSpotRequest, ErrorBody, LoginRequest,
    RegisterRequest,
};
use carpark_shared::{Booking, ParkingSpot, User};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::fmt;

/// 编译期注入的后端地址，未设置时指向本地开发服务
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// 读取配置的 API 基地址（去掉尾部斜杠）
pub fn api_base() -> String {
    option_env!("CARPARK_API_BASE")
        .unwrap_or(DEFAULT_API_BASE)
        .trim_end_matches('/')
        .to_string()
}

// =========================================================
// 错误类型
// =========================================================

/// API 调用失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 服务端返回了非 2xx 响应，携带提取出的错误消息
    Request { status: u16, message: String },
    /// 网络层失败，没有收到任何响应
    Transport(String),
}

impl ApiError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Request { message, .. } => write!(f, "{}", message),
            ApiError::Transport(msg) => write!(f, "Network error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

fn transport(e: gloo_net::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

// =========================================================
// 客户端
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CarParkApi {
    base_url: String,
    token: Option<String>,
}

impl CarParkApi {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url, token }
    }

    /// 未登录客户端（登录/自助注册）
    pub fn anonymous() -> Self {
        Self::new(api_base(), None)
    }

    /// 携带会话 token 的客户端
    pub fn with_token(token: impl Into<String>) -> Self {
        Self::new(api_base(), Some(token.into()))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 存在 token 时附加 Bearer 认证头
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// 从非 2xx 响应中提取错误消息
    async fn request_error(res: Response) -> ApiError {
        let status = res.status();
        let message = match res.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("Request failed with status {}", status),
        };
        ApiError::Request { status, message }
    }

    async fn parse<T: DeserializeOwned>(res: Response) -> Result<T, ApiError> {
        if !res.ok() {
            return Err(Self::request_error(res).await);
        }
        res.json::<T>().await.map_err(transport)
    }

    /// 200/204 无响应体的成功
    async fn expect_ok(res: Response) -> Result<(), ApiError> {
        if !res.ok() {
            return Err(Self::request_error(res).await);
        }
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let res = self
            .authorize(Request::get(&self.url(path)))
            .send()
            .await
            .map_err(transport)?;
        Self::parse(res).await
    }

    async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let res = self
            .authorize(Request::post(&self.url(path)))
            .json(body)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        Self::parse(res).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let res = self
            .authorize(Request::delete(&self.url(path)))
            .send()
            .await
            .map_err(transport)?;
        Self::expect_ok(res).await
    }

    // =====================================================
    // 认证
    // =====================================================

    /// POST /api/auth/login
    pub async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("/api/auth/login", req).await
    }

    /// POST /api/auth/register（自助注册，服务端只接受 role=user）
    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("/api/auth/register", req).await
    }

    /// POST /api/auth/admin/register
    ///
    /// 返回的是**新建用户**的 token/档案；调用方应丢弃该 token，
    /// 保持当前管理员会话不变。
    pub async fn admin_register(&self, req: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("/api/auth/admin/register", req).await
    }

    // =====================================================
    // 车位
    // =====================================================

    /// GET /api/parking
    pub async fn spots(&self) -> Result<Vec<ParkingSpot>, ApiError> {
        self.get_json("/api/parking").await
    }

    /// POST /api/parking
    pub async fn add_spot(&self, req: &CreateSpotRequest) -> Result<ParkingSpot, ApiError> {
        self.post_json("/api/parking", req).await
    }

    // =====================================================
    // 预订
    // =====================================================

    /// GET /api/bookings
    pub async fn bookings(&self) -> Result<Vec<Booking>, ApiError> {
        self.get_json("/api/bookings").await
    }

    /// POST /api/bookings
    pub async fn book_spot(&self, req: &CreateBookingRequest) -> Result<Booking, ApiError> {
        self.post_json("/api/bookings", req).await
    }

    /// DELETE /api/bookings/:id
    pub async fn cancel_booking(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/api/bookings/{}", id)).await
    }

    // =====================================================
    // 用户（仅 admin）
    // =====================================================

    /// GET /api/users
    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json("/api/users").await
    }

    /// DELETE /api/users/:id
    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/api/users/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_error_displays_server_message() {
        let err = ApiError::Request {
            status: 409,
            message: "Spot already occupied".to_string(),
        };
        assert_eq!(err.to_string(), "Spot already occupied");
        assert!(!err.is_transport());
    }

    #[test]
    fn transport_error_is_distinct() {
        let err = ApiError::Transport("connection refused".to_string());
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = CarParkApi::new("http://localhost:5000/".to_string(), None);
        assert_eq!(api.url("/api/parking"), "http://localhost:5000/api/parking");
    }
}
