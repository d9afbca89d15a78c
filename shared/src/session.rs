//! 会话模型与持久化存储
//!
//! 会话以带标签的变体建模：token 与用户档案要么同时存在，
//! 要么同时缺失，"只有一半"的状态在类型上不可表示。
//!
//! 持久化后端抽象为 [`SessionBackend`]，浏览器端由前端提供
//! LocalStorage 实现，测试中使用内存实现。

use crate::User;

/// 持久化键：不透明凭证
pub const STORAGE_TOKEN_KEY: &str = "token";
/// 持久化键：序列化的用户档案
pub const STORAGE_USER_KEY: &str = "user";

/// 客户端会话
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    #[default]
    Unauthenticated,
    Authenticated {
        token: String,
        user: User,
    },
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            Session::Unauthenticated => None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Authenticated { user, .. } => Some(user),
            Session::Unauthenticated => None,
        }
    }
}

/// 字符串 KV 持久化后端
pub trait SessionBackend {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// 加载结果：会话本身，以及持久化数据是否损坏
///
/// 损坏的会话静默降级为未登录，但调用方可以据此打一条警告日志。
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSession {
    pub session: Session,
    pub was_malformed: bool,
}

/// 会话存储
///
/// 进程内单实例语义：所有读写都落在同一组持久化键上。
/// 不做任何过期检查；过期 token 会保留到服务端拒绝为止。
pub struct SessionStore<B: SessionBackend> {
    backend: B,
}

impl<B: SessionBackend> SessionStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// 进程启动时恢复会话
    ///
    /// 两个键任一缺失即视为未登录；用户 JSON 无法解析时
    /// 清掉残留数据并降级为未登录，绝不 panic。
    pub fn load(&self) -> LoadedSession {
        let token = self.backend.get(STORAGE_TOKEN_KEY);
        let user_json = self.backend.get(STORAGE_USER_KEY);

        let (Some(token), Some(user_json)) = (token, user_json) else {
            return LoadedSession {
                session: Session::Unauthenticated,
                was_malformed: false,
            };
        };

        match serde_json::from_str::<User>(&user_json) {
            Ok(user) => LoadedSession {
                session: Session::Authenticated { token, user },
                was_malformed: false,
            },
            Err(_) => {
                self.clear();
                LoadedSession {
                    session: Session::Unauthenticated,
                    was_malformed: true,
                }
            }
        }
    }

    /// 持久化会话（对调用方而言是原子的：两个键一起写）
    pub fn save(&self, token: &str, user: &User) {
        // User 派生了 Serialize，序列化不会失败
        if let Ok(user_json) = serde_json::to_string(user) {
            self.backend.set(STORAGE_TOKEN_KEY, token);
            self.backend.set(STORAGE_USER_KEY, &user_json);
        }
    }

    /// 清除会话
    pub fn clear(&self) {
        self.backend.remove(STORAGE_TOKEN_KEY);
        self.backend.remove(STORAGE_USER_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use chrono::TimeZone;
    use chrono::Utc;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// 内存后端，模拟一次"进程生命周期"内的 LocalStorage
    #[derive(Default)]
    struct MemoryBackend {
        map: RefCell<HashMap<String, String>>,
    }

    impl SessionBackend for MemoryBackend {
        fn get(&self, key: &str) -> Option<String> {
            self.map.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.map.borrow_mut().insert(key.to_string(), value.to_string());
        }

        fn remove(&self, key: &str) {
            self.map.borrow_mut().remove(key);
        }
    }

    fn sample_user() -> User {
        User {
            id: "u1".to_string(),
            name: "Admin".to_string(),
            email: "admin@carparking.com".to_string(),
            role: Role::Admin,
            is_active: true,
            created_at: Utc.with_ymd_and_hms(2025, 1, 15, 8, 30, 0).unwrap(),
        }
    }

    #[test]
    fn empty_backend_loads_unauthenticated() {
        let store = SessionStore::new(MemoryBackend::default());
        let loaded = store.load();
        assert_eq!(loaded.session, Session::Unauthenticated);
        assert!(!loaded.was_malformed);
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = SessionStore::new(MemoryBackend::default());
        let user = sample_user();
        store.save("tok-123", &user);

        // 重新 load 等价于一次新的进程启动
        let loaded = store.load();
        assert_eq!(
            loaded.session,
            Session::Authenticated {
                token: "tok-123".to_string(),
                user,
            }
        );
        assert!(!loaded.was_malformed);
    }

    #[test]
    fn clear_removes_both_keys() {
        let store = SessionStore::new(MemoryBackend::default());
        store.save("tok-123", &sample_user());
        store.clear();
        assert_eq!(store.load().session, Session::Unauthenticated);
    }

    #[test]
    fn token_without_user_is_unauthenticated() {
        let backend = MemoryBackend::default();
        backend.set(STORAGE_TOKEN_KEY, "orphan-token");
        let store = SessionStore::new(backend);
        assert_eq!(store.load().session, Session::Unauthenticated);
    }

    #[test]
    fn malformed_user_json_degrades_silently() {
        let backend = MemoryBackend::default();
        backend.set(STORAGE_TOKEN_KEY, "tok-123");
        backend.set(STORAGE_USER_KEY, "{not valid json");
        let store = SessionStore::new(backend);

        let loaded = store.load();
        assert_eq!(loaded.session, Session::Unauthenticated);
        assert!(loaded.was_malformed);
        // 残留数据已被清理，下次加载不再报告损坏
        assert!(!store.load().was_malformed);
    }

    #[test]
    fn session_accessors() {
        let user = sample_user();
        let session = Session::Authenticated {
            token: "t".to_string(),
            user: user.clone(),
        };
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("t"));
        assert_eq!(session.user(), Some(&user));
        assert_eq!(Session::Unauthenticated.token(), None);
    }
}
