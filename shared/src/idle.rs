//! 空闲检测
//!
//! [`IdleMonitor`] 维护一个可重置的倒计时：每次用户输入都会重新计时，静默超过
//! 设定时长后回调恰好触发一次，直到再次 [`IdleMonitor::start`]。
//! 计时器由 [`Scheduler`] 提供，浏览器里是 `setTimeout`，测试中是手动时钟。

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

/// 默认静默时长
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(3 * 60);

/// 一次性定时器
pub trait Scheduler {
    /// 定时器句柄
    type Handle;

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Self::Handle;

    fn cancel(&self, handle: Self::Handle);
}

/// 视为用户活动的输入事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityEvent {
    PointerDown,
    PointerMove,
    KeyDown,
    Scroll,
    Touch,
    Click,
}

impl ActivityEvent {
    pub const ALL: [ActivityEvent; 6] = [
        ActivityEvent::PointerDown,
        ActivityEvent::PointerMove,
        ActivityEvent::KeyDown,
        ActivityEvent::Scroll,
        ActivityEvent::Touch,
        ActivityEvent::Click,
    ];

    /// DOM 事件名
    pub fn dom_name(&self) -> &'static str {
        match self {
            ActivityEvent::PointerDown => "mousedown",
            ActivityEvent::PointerMove => "mousemove",
            ActivityEvent::KeyDown => "keydown",
            ActivityEvent::Scroll => "scroll",
            ActivityEvent::Touch => "touchstart",
            ActivityEvent::Click => "click",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleState {
    /// 未启用（未登录）
    Stopped,
    /// 正在倒计时
    Armed,
    /// 已触发，等待重新启动
    Fired,
}

struct Inner<S: Scheduler> {
    scheduler: S,
    timeout: Cell<Duration>,
    state: Cell<IdleState>,
    // 每次重新计时递增，过期的回调据此作废
    generation: Cell<u64>,
    pending: RefCell<Option<S::Handle>>,
    on_idle: Box<dyn Fn()>,
}

pub struct IdleMonitor<S: Scheduler + 'static> {
    inner: Rc<Inner<S>>,
}

impl<S: Scheduler + 'static> Clone for IdleMonitor<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: Scheduler + 'static> IdleMonitor<S> {
    pub fn new(scheduler: S, timeout: Duration, on_idle: impl Fn() + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                scheduler,
                timeout: Cell::new(timeout),
                state: Cell::new(IdleState::Stopped),
                generation: Cell::new(0),
                pending: RefCell::new(None),
                on_idle: Box::new(on_idle),
            }),
        }
    }

    pub fn state(&self) -> IdleState {
        self.inner.state.get()
    }

    pub fn timeout(&self) -> Duration {
        self.inner.timeout.get()
    }

    /// 修改静默时长，正在倒计时的话立即按新时长重新计时
    pub fn set_timeout(&self, timeout: Duration) {
        self.inner.timeout.set(timeout);
        if self.state() == IdleState::Armed {
            Inner::arm(&self.inner);
        }
    }

    /// 开始（或在解锁后重新开始）倒计时
    pub fn start(&self) {
        log::debug!("idle monitor armed for {:?}", self.timeout());
        self.inner.state.set(IdleState::Armed);
        Inner::arm(&self.inner);
    }

    /// 记录一次用户活动；只有倒计时中才会重新计时
    pub fn activity(&self, _event: ActivityEvent) {
        if self.state() == IdleState::Armed {
            Inner::arm(&self.inner);
        }
    }

    /// 停止并撤销挂起的定时器
    pub fn stop(&self) {
        if self.state() != IdleState::Stopped {
            log::debug!("idle monitor stopped");
        }
        self.inner.state.set(IdleState::Stopped);
        self.inner.disarm();
    }
}

impl<S: Scheduler + 'static> Inner<S> {
    fn disarm(&self) {
        self.generation.set(self.generation.get() + 1);
        let pending = self.pending.borrow_mut().take();
        if let Some(handle) = pending {
            self.scheduler.cancel(handle);
        }
    }

    fn arm(this: &Rc<Self>) {
        this.disarm();
        let generation = this.generation.get();
        let weak: Weak<Self> = Rc::downgrade(this);
        let handle = this.scheduler.schedule(
            this.timeout.get(),
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.fire(generation);
                }
            }),
        );
        *this.pending.borrow_mut() = Some(handle);
    }

    fn fire(&self, generation: u64) {
        if generation != self.generation.get() || self.state.get() != IdleState::Armed {
            return;
        }
        self.state.set(IdleState::Fired);
        log::info!("no activity for {:?}, idle callback fired", self.timeout.get());
        (self.on_idle)();
    }
}

#[cfg(test)]
mod tests;
