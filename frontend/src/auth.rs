//! 认证模块
//!
//! 管理会话状态，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。
//!
//! 会话对象本身是 `ledger_shared::Session`，这里负责把它放进 signal、
//! 同步到 LocalStorage，以及把 API 客户端的 401 回调接到登出上。

use std::rc::Rc;

use ledger_shared::models::{Credentials, Tenant};
use ledger_shared::session::PersistedSession;
use ledger_shared::validation::Validate;
use ledger_shared::{
    STORAGE_FISCAL_YEAR_KEY, STORAGE_SESSION_KEY, STORAGE_TOKEN_KEY, SaveError, Session,
    SessionPhase,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiContext;
use crate::web::LocalStorage;

/// 会话上下文
#[derive(Clone, Copy)]
pub struct SessionContext {
    session: RwSignal<Session>,
    phase: Memo<SessionPhase>,
    api: ApiContext,
}

impl SessionContext {
    /// 从 LocalStorage 恢复会话，并注册令牌失效时的处理
    pub fn new(api: ApiContext) -> Self {
        let token = LocalStorage::get(STORAGE_TOKEN_KEY);
        let snapshot = LocalStorage::get_json::<PersistedSession>(STORAGE_SESSION_KEY);
        let restored = Session::restore(token, snapshot);
        if restored.is_authenticated() {
            log::info!("restored session ({:?})", restored.phase());
        }

        let client = api.client();
        client.set_token(restored.token().map(str::to_string));

        let session = RwSignal::new(restored);
        let phase = Memo::new(move |_| session.with(Session::phase));

        let weak = Rc::downgrade(&client);
        client.on_unauthorized(move || {
            log::warn!("token rejected, signing out");
            if let Some(client) = weak.upgrade() {
                client.set_token(None);
            }
            session.update(Session::sign_out);
        });

        let ctx = Self {
            session,
            phase,
            api,
        };
        ctx.persist();
        ctx
    }

    /// 会话变化时写回 LocalStorage；登出时清除所有相关键
    fn persist(&self) {
        let session = self.session;
        Effect::new(move |_| {
            session.with(|s| match (s.snapshot(), s.token()) {
                (Some(snapshot), Some(token)) => {
                    LocalStorage::set(STORAGE_TOKEN_KEY, token);
                    LocalStorage::set_json(STORAGE_SESSION_KEY, &snapshot);
                }
                _ => {
                    LocalStorage::delete(STORAGE_TOKEN_KEY);
                    LocalStorage::delete(STORAGE_SESSION_KEY);
                    LocalStorage::delete(STORAGE_FISCAL_YEAR_KEY);
                }
            })
        });
    }

    pub fn phase(&self) -> Memo<SessionPhase> {
        self.phase
    }

    /// 认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let phase = self.phase;
        Signal::derive(move || phase.get() != SessionPhase::LoggedOut)
    }

    pub fn is_locked_signal(&self) -> Signal<bool> {
        let phase = self.phase;
        Signal::derive(move || phase.get() == SessionPhase::Locked)
    }

    pub fn user_name(&self) -> Signal<String> {
        let session = self.session;
        Signal::derive(move || session.with(|s| s.user().map(|u| u.name.clone()).unwrap_or_default()))
    }

    pub fn user_email(&self) -> Signal<String> {
        let session = self.session;
        Signal::derive(move || {
            session.with(|s| s.user().map(|u| u.email.clone()).unwrap_or_default())
        })
    }

    pub fn tenant(&self) -> Signal<Option<Tenant>> {
        let session = self.session;
        Signal::derive(move || session.with(|s| s.tenant().cloned()))
    }

    /// 金额显示所用的币种
    pub fn currency(&self) -> Signal<String> {
        let session = self.session;
        Signal::derive(move || {
            session.with(|s| {
                s.tenant()
                    .map(|t| t.currency.clone())
                    .unwrap_or_else(|| "USD".to_string())
            })
        })
    }

    /// 登录；校验失败不会发出请求
    pub async fn login(&self, credentials: Credentials) -> Result<(), SaveError> {
        credentials.validate()?;
        let auth = self.api.client().login(&credentials).await?;
        self.session.update(|s| s.sign_in(auth));
        Ok(())
    }

    /// 空闲锁定
    pub fn lock(&self) {
        self.session.update(|s| {
            s.lock();
        });
    }

    /// 锁屏复核密码；失败时保持锁定并返回提示文本，不限制尝试次数
    pub async fn unlock(&self, password: &str) -> Result<(), String> {
        let Some(credentials) = self
            .session
            .with_untracked(|s| s.unlock_credentials(password))
        else {
            return Ok(());
        };
        if password.is_empty() {
            return Err("Please enter your password".to_string());
        }

        let auth = self
            .api
            .client()
            .login(&credentials)
            .await
            .map_err(|e| e.user_message("Incorrect password. Please try again."))?;

        let mut unlocked = false;
        self.session.update(|s| unlocked = s.unlock(auth));
        if unlocked {
            Ok(())
        } else {
            Err("This session belongs to another user. Please sign in again.".to_string())
        }
    }

    /// 登出：本地状态立即清除，服务器通知尽力而为
    pub fn logout(&self) {
        let client = self.api.client();
        self.session.update(Session::sign_out);
        spawn_local(async move {
            client.logout().await;
        });
    }

    pub fn update_tenant(&self, tenant: Tenant) {
        self.session.update(|s| s.update_tenant(tenant));
    }
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}
