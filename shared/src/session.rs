//! 会话状态机
//!
//! ```text
//! LoggedOut --sign_in--> Active --lock--> Locked --unlock--> Active
//!     ^                    |                 |
//!     +-----sign_out-------+-----------------+
//! ```
//!
//! 会话对象由调用方持有并注入（前端放在一个 signal 里），没有全局单例。

use serde::{Deserialize, Serialize};

use crate::models::{AuthResponse, Credentials, Tenant, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    LoggedOut,
    Active,
    Locked,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    phase: SessionPhase,
    user: Option<User>,
    tenant: Option<Tenant>,
    token: Option<String>,
}

/// 刷新页面后恢复会话所需的最小快照；令牌单独存放
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub user: User,
    pub tenant: Tenant,
    /// 锁定状态也要保存，否则刷新页面就能绕过锁屏
    #[serde(default)]
    pub locked: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::LoggedOut,
            user: None,
            tenant: None,
            token: None,
        }
    }

    /// 从持久化数据恢复；令牌或快照缺一不可
    pub fn restore(token: Option<String>, snapshot: Option<PersistedSession>) -> Self {
        match (token, snapshot) {
            (Some(token), Some(snapshot)) if !token.is_empty() => Self {
                phase: if snapshot.locked {
                    SessionPhase::Locked
                } else {
                    SessionPhase::Active
                },
                user: Some(snapshot.user),
                tenant: Some(snapshot.tenant),
                token: Some(token),
            },
            _ => Self::new(),
        }
    }

    pub fn snapshot(&self) -> Option<PersistedSession> {
        match (&self.user, &self.tenant, self.phase) {
            (Some(user), Some(tenant), phase) if phase != SessionPhase::LoggedOut => {
                Some(PersistedSession {
                    user: user.clone(),
                    tenant: tenant.clone(),
                    locked: phase == SessionPhase::Locked,
                })
            }
            _ => None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase != SessionPhase::LoggedOut
    }

    pub fn is_locked(&self) -> bool {
        self.phase == SessionPhase::Locked
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn tenant(&self) -> Option<&Tenant> {
        self.tenant.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn accept(&mut self, auth: AuthResponse) {
        self.token = Some(auth.access_token);
        self.user = Some(auth.user);
        self.tenant = Some(auth.tenant);
        self.phase = SessionPhase::Active;
    }

    /// 登录成功
    pub fn sign_in(&mut self, auth: AuthResponse) {
        log::info!("signed in as {}", auth.user.email);
        self.accept(auth);
    }

    /// 空闲锁定；只有活动会话才能被锁定，返回状态是否改变
    pub fn lock(&mut self) -> bool {
        if self.phase != SessionPhase::Active {
            return false;
        }
        log::info!("session locked after inactivity");
        self.phase = SessionPhase::Locked;
        true
    }

    /// 用于锁屏复核的凭据：当前会话的邮箱加上输入的密码
    pub fn unlock_credentials(&self, password: &str) -> Option<Credentials> {
        if self.phase != SessionPhase::Locked {
            return None;
        }
        self.user.as_ref().map(|user| Credentials {
            email: user.email.clone(),
            password: password.to_string(),
        })
    }

    /// 密码复核通过；只有锁定中的同一用户才能解锁
    pub fn unlock(&mut self, auth: AuthResponse) -> bool {
        let same_user = self.user.as_ref().is_some_and(|u| u.id == auth.user.id);
        if self.phase != SessionPhase::Locked || !same_user {
            return false;
        }
        log::info!("session unlocked");
        self.accept(auth);
        true
    }

    /// 主动登出或令牌失效
    pub fn sign_out(&mut self) {
        if self.is_authenticated() {
            log::info!("signed out");
        }
        *self = Self::new();
    }

    pub fn update_tenant(&mut self, tenant: Tenant) {
        if self.is_authenticated() {
            self.tenant = Some(tenant);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockBackend, TEST_EMAIL, TEST_PASSWORD, test_client};
    use crate::models::Category;
    use crate::protocol::NoFilter;

    fn auth(token: &str) -> AuthResponse {
        serde_json::from_value(serde_json::json!({
            "access_token": token,
            "user": crate::testing::user_json(),
            "tenant": crate::testing::tenant_json(),
        }))
        .unwrap()
    }

    #[test]
    fn test_lifecycle() {
        let mut session = Session::new();
        assert!(!session.lock());
        session.sign_in(auth("a"));
        assert_eq!(session.phase(), SessionPhase::Active);
        assert!(session.lock());
        assert!(!session.lock());
        assert!(session.is_locked() && session.is_authenticated());
        assert!(session.unlock(auth("b")));
        assert_eq!(session.token(), Some("b"));
        session.sign_out();
        assert_eq!(session, Session::new());
    }

    #[test]
    fn test_unlock_requires_locked_session() {
        let mut session = Session::new();
        session.sign_in(auth("a"));
        assert_eq!(session.unlock_credentials("pw"), None);
        assert!(!session.unlock(auth("b")));
        assert_eq!(session.token(), Some("a"));

        session.lock();
        let creds = session.unlock_credentials("pw").unwrap();
        assert_eq!(creds.email, TEST_EMAIL);
    }

    #[test]
    fn test_restore_keeps_lock() {
        let mut session = Session::new();
        session.sign_in(auth("a"));
        session.lock();
        let snapshot = session.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored = Session::restore(
            Some("a".to_string()),
            serde_json::from_str(&json).unwrap(),
        );
        assert_eq!(restored.phase(), SessionPhase::Locked);
        assert_eq!(restored.user().map(|u| u.id.as_str()), Some("u-1"));

        assert_eq!(Session::restore(None, snapshot.clone()).phase(), SessionPhase::LoggedOut);
        assert_eq!(
            Session::restore(Some("a".into()), None).phase(),
            SessionPhase::LoggedOut
        );
        assert_eq!(Session::new().snapshot(), None);
    }

    #[tokio::test]
    async fn test_unlock_against_backend() {
        let client = test_client(MockBackend::new());
        let mut session = Session::new();
        let creds = Credentials {
            email: TEST_EMAIL.to_string(),
            password: TEST_PASSWORD.to_string(),
        };
        session.sign_in(client.login(&creds).await.unwrap());
        session.lock();

        // 错误密码：保持锁定，不限次数
        for _ in 0..5 {
            let creds = session.unlock_credentials("wrong").unwrap();
            let err = client.login(&creds).await.unwrap_err();
            assert!(!err.is_session_expired());
            assert!(session.is_locked());
        }
        assert_eq!(client.token().as_deref(), session.token());

        let creds = session.unlock_credentials(TEST_PASSWORD).unwrap();
        assert!(session.unlock(client.login(&creds).await.unwrap()));
        assert_eq!(session.phase(), SessionPhase::Active);
        assert!(client.list::<Category>(NoFilter).await.is_ok());
    }
}
