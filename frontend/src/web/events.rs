//! DOM 事件监听封装
//!
//! `EventListener` 在 drop 时自动移除监听器，不需要 `forget` 闭包。

use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, EventTarget};

pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn Fn()>,
}

impl EventListener {
    /// 以 passive 方式监听，适合 scroll/touch 这类高频事件
    pub fn new<F>(target: &EventTarget, event: &'static str, callback: F) -> Option<Self>
    where
        F: Fn() + 'static,
    {
        let closure = Closure::<dyn Fn()>::new(callback);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .ok()?;
        Some(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}
