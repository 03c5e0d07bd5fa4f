//! 财年选择上下文
//!
//! 登录后拉取一次财年列表；选择保存在 LocalStorage，刷新页面后恢复。

use ledger_shared::fiscal::load_fiscal_years;
use ledger_shared::models::FiscalYear;
use ledger_shared::{STORAGE_FISCAL_YEAR_KEY, SessionPhase};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiContext;
use crate::auth::SessionContext;
use crate::web::LocalStorage;

#[derive(Clone, Copy)]
pub struct FiscalContext {
    years: RwSignal<Vec<FiscalYear>>,
    selected: RwSignal<Option<FiscalYear>>,
    error: RwSignal<Option<String>>,
}

impl FiscalContext {
    pub fn new(api: ApiContext, session: SessionContext) -> Self {
        let ctx = Self {
            years: RwSignal::new(Vec::new()),
            selected: RwSignal::new(None),
            error: RwSignal::new(None),
        };

        // 登录（或恢复会话）时加载，登出时清空；锁定与解锁不重新加载
        let signed_in = Memo::new(move |_| session.phase().get() != SessionPhase::LoggedOut);
        Effect::new(move |_| {
            if signed_in.get() {
                ctx.load(api);
            } else {
                ctx.years.set(Vec::new());
                ctx.selected.set(None);
            }
        });
        ctx
    }

    fn load(&self, api: ApiContext) {
        let client = api.client();
        let ctx = *self;
        spawn_local(async move {
            let stored = LocalStorage::get_json::<FiscalYear>(STORAGE_FISCAL_YEAR_KEY);
            match load_fiscal_years(&*client, stored.as_ref()).await {
                Ok((years, selected)) => {
                    if let Some(year) = &selected {
                        LocalStorage::set_json(STORAGE_FISCAL_YEAR_KEY, year);
                    }
                    ctx.years.set(years);
                    ctx.selected.set(selected);
                    ctx.error.set(None);
                }
                Err(e) => {
                    ctx.error
                        .set(Some(e.user_message("Failed to load fiscal years")));
                }
            }
        });
    }

    pub fn years(&self) -> ReadSignal<Vec<FiscalYear>> {
        self.years.read_only()
    }

    pub fn selected(&self) -> ReadSignal<Option<FiscalYear>> {
        self.selected.read_only()
    }

    pub fn error(&self) -> ReadSignal<Option<String>> {
        self.error.read_only()
    }

    pub fn select(&self, id: &str) {
        let year = self
            .years
            .with_untracked(|years| years.iter().find(|y| y.id == id).cloned());
        if let Some(year) = year {
            log::info!("fiscal year switched to {}", year.year_name);
            LocalStorage::set_json(STORAGE_FISCAL_YEAR_KEY, &year);
            self.selected.set(Some(year));
        }
    }
}

pub fn use_fiscal() -> FiscalContext {
    expect_context::<FiscalContext>()
}
