//! 空闲锁屏接入
//!
//! 在 window 上监听输入事件驱动 [`IdleMonitor`]，倒计时只在会话处于 `Active` 时运行。

use std::time::Duration;

use ledger_shared::{ActivityEvent, IdleMonitor, SessionPhase};
use leptos::prelude::*;

use crate::auth::SessionContext;
use crate::web::{BrowserScheduler, EventListener};

pub fn provide_idle_lock(session: SessionContext, timeout: Duration) {
    let monitor = IdleMonitor::new(BrowserScheduler, timeout, move || session.lock());

    let Some(window) = web_sys::window() else {
        log::error!("no window, idle lock disabled");
        return;
    };
    let listeners: Vec<EventListener> = ActivityEvent::ALL
        .into_iter()
        .filter_map(|event| {
            let monitor = monitor.clone();
            EventListener::new(&window, event.dom_name(), move || monitor.activity(event))
        })
        .collect();
    if listeners.len() < ActivityEvent::ALL.len() {
        log::warn!("some activity listeners could not be registered");
    }
    // 监听器与 App 同生命周期
    StoredValue::new_local(listeners);

    let phase = session.phase();
    Effect::new(move |_| match phase.get() {
        SessionPhase::Active => monitor.start(),
        SessionPhase::Locked | SessionPhase::LoggedOut => monitor.stop(),
    });
}
