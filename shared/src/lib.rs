//! CarPark 共享领域模型
//!
//! 前端与远端 REST 服务之间共享的数据结构：
//! - 领域模型（用户、车位、预订）
//! - 角色能力表（客户端授权门控的唯一数据源）
//! - `protocol`: 请求/响应载荷与客户端校验
//! - `session`: 会话模型与持久化存储

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod protocol;
pub mod session;

// =========================================================
// 角色与能力表 (Roles & Capabilities)
// =========================================================

/// 用户角色
///
/// 服务端是权限的最终仲裁者，客户端仅据此决定渲染哪些面板。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Attendant,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Attendant => "attendant",
            Role::User => "user",
        }
    }

    /// 角色对应的能力集
    ///
    /// 新增角色时只需在这里补一行数据，渲染逻辑无需改动。
    pub fn capabilities(self) -> Capabilities {
        match self {
            Role::Admin => Capabilities {
                manage_users: true,
                manage_spots: true,
                view_spots: true,
                view_bookings: true,
                cancel_any_booking: true,
            },
            Role::Attendant => Capabilities {
                manage_users: false,
                manage_spots: true,
                view_spots: true,
                view_bookings: true,
                cancel_any_booking: true,
            },
            Role::User => Capabilities {
                manage_users: false,
                manage_spots: false,
                view_spots: true,
                view_bookings: true,
                cancel_any_booking: false,
            },
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 未知角色字符串
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "attendant" => Ok(Role::Attendant),
            "user" => Ok(Role::User),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// 角色能力集
///
/// 对应能力表：
///
/// | 角色 | 用户管理 | 添加车位 | 查看车位 | 查看预订 | 取消任意预订 |
/// |---|---|---|---|---|---|
/// | admin | ✓ | ✓ | ✓ | ✓ | ✓ |
/// | attendant | ✗ | ✓ | ✓ | ✓ | ✓ |
/// | user | ✗ | ✗ | ✓ | ✓ | 仅自己的 |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// 用户管理面板（增删用户）
    pub manage_users: bool,
    /// 添加车位表单
    pub manage_spots: bool,
    /// 车位列表（所有角色可见，user 仅可预订）
    pub view_spots: bool,
    /// 预订列表
    pub view_bookings: bool,
    /// 可取消任意人的预订（user 只能取消自己的，由服务端裁决）
    pub cancel_any_booking: bool,
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 用户档案
///
/// 由远端服务持有；客户端只缓存一份用于展示和本地授权判断。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// 停车位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingSpot {
    #[serde(rename = "_id")]
    pub id: String,
    pub number: String,
    pub location: String,
    pub occupied: bool,
}

/// 预订记录
///
/// 仅在一次拉取周期内存在于客户端，不做任何本地持久化。
/// `spot` 为服务端内嵌对象；车位被删除后可能为 null。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    pub vehicle_number: String,
    #[serde(default)]
    pub spot: Option<ParkingSpot>,
    pub start_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in [Role::Admin, Role::Attendant, Role::User] {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
        }
        assert!(Role::from_str("manager").is_err());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Attendant).unwrap(), "\"attendant\"");
        assert_eq!(serde_json::from_str::<Role>("\"admin\"").unwrap(), Role::Admin);
    }

    #[test]
    fn capability_table_matches_design() {
        let admin = Role::Admin.capabilities();
        assert!(admin.manage_users && admin.manage_spots && admin.view_bookings);
        assert!(admin.cancel_any_booking);

        let attendant = Role::Attendant.capabilities();
        assert!(!attendant.manage_users);
        assert!(attendant.manage_spots && attendant.view_spots);
        assert!(attendant.view_bookings && attendant.cancel_any_booking);

        let user = Role::User.capabilities();
        assert!(!user.manage_users && !user.manage_spots);
        assert!(user.view_spots && user.view_bookings);
        assert!(!user.cancel_any_booking);
    }

    #[test]
    fn user_deserializes_from_server_shape() {
        let json = r#"{
            "_id": "665f1a2b3c4d5e6f7a8b9c0d",
            "name": "Admin",
            "email": "admin@carparking.com",
            "role": "admin",
            "isActive": true,
            "createdAt": "2025-01-15T08:30:00.000Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "665f1a2b3c4d5e6f7a8b9c0d");
        assert_eq!(user.role, Role::Admin);
        assert!(user.is_active);
    }

    #[test]
    fn spot_deserializes_from_server_shape() {
        let json = r#"{"_id":"s1","number":"P-001","location":"Level 1","occupied":false}"#;
        let spot: ParkingSpot = serde_json::from_str(json).unwrap();
        assert_eq!(spot.number, "P-001");
        assert!(!spot.occupied);
    }

    #[test]
    fn booking_deserializes_with_embedded_spot() {
        let json = r#"{
            "_id": "b1",
            "vehicleNumber": "ABC-1234",
            "spot": {"_id":"s1","number":"P-001","location":"Level 1","occupied":true},
            "startTime": "2025-02-01T10:00:00.000Z"
        }"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.vehicle_number, "ABC-1234");
        assert_eq!(booking.spot.unwrap().number, "P-001");
    }

    #[test]
    fn booking_tolerates_null_spot() {
        let json = r#"{"_id":"b2","vehicleNumber":"XYZ-9","spot":null,"startTime":"2025-02-01T10:00:00Z"}"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert!(booking.spot.is_none());
    }
}
