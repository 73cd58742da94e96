//! 请求生命周期 - 流程层
//!
//! 一个实例只管一类请求（分析或导出）：同一时刻最多一个在途请求，
//! 不支持取消，失败需要显式确认后才回到空闲。
//!
//! ```text
//! Idle ──submit──▶ Running ──succeed──▶ Idle
//!   ▲                 │
//!   │                 └──fail──▶ Failed { reason } ──acknowledge──▶ Idle
//!   │                                  │
//!   └──────────────────────────────────┴──submit──▶ Running
//! ```

use std::fmt;

/// 生命周期管的是哪一类请求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleKind {
    Analyze,
    Export,
}

impl LifecycleKind {
    /// 忙碌时的提示文字
    pub fn busy_label(self) -> &'static str {
        match self {
            LifecycleKind::Analyze => "Analyzing…",
            LifecycleKind::Export => "Preparing PDF…",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleState {
    /// 没有在途请求
    Idle,
    /// 请求在途
    Running,
    /// 上一次请求失败，等待确认
    Failed { reason: String },
}

/// 提交时发放的凭据，结算时必须交回
///
/// 代数不匹配的凭据会被忽略，迟到的旧响应不会覆盖新状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    kind: LifecycleKind,
    generation: u64,
}

impl RequestTicket {
    pub fn kind(&self) -> LifecycleKind {
        self.kind
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone)]
pub struct RequestLifecycle {
    kind: LifecycleKind,
    state: LifecycleState,
    generation: u64,
}

impl RequestLifecycle {
    pub fn new(kind: LifecycleKind) -> Self {
        Self {
            kind,
            state: LifecycleState::Idle,
            generation: 0,
        }
    }

    pub fn kind(&self) -> LifecycleKind {
        self.kind
    }

    pub fn state(&self) -> &LifecycleState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LifecycleState::Running
    }

    /// 失败原因（仅在 `Failed` 时有值）
    pub fn failure(&self) -> Option<&str> {
        match &self.state {
            LifecycleState::Failed { reason } => Some(reason),
            _ => None,
        }
    }

    /// 开始一次请求；已有在途请求时拒绝并返回 `None`
    pub fn submit(&mut self) -> Option<RequestTicket> {
        if self.is_running() {
            return None;
        }
        self.generation += 1;
        self.state = LifecycleState::Running;
        Some(RequestTicket {
            kind: self.kind,
            generation: self.generation,
        })
    }

    /// 请求成功，回到空闲；凭据无效时不改变状态并返回 `false`
    pub fn succeed(&mut self, ticket: RequestTicket) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.state = LifecycleState::Idle;
        true
    }

    /// 请求失败，进入 `Failed`；凭据无效时不改变状态并返回 `false`
    pub fn fail(&mut self, ticket: RequestTicket, reason: impl Into<String>) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.state = LifecycleState::Failed {
            reason: reason.into(),
        };
        true
    }

    /// 确认失败，回到空闲；不在 `Failed` 时什么也不做
    pub fn acknowledge(&mut self) -> bool {
        if matches!(self.state, LifecycleState::Failed { .. }) {
            self.state = LifecycleState::Idle;
            true
        } else {
            false
        }
    }

    /// 状态栏文字
    pub fn status_label(&self) -> &'static str {
        match self.state {
            LifecycleState::Idle => "Idle",
            LifecycleState::Running => self.kind.busy_label(),
            LifecycleState::Failed { .. } => "Failed",
        }
    }

    fn accepts(&self, ticket: RequestTicket) -> bool {
        self.is_running() && ticket.kind == self.kind && ticket.generation == self.generation
    }
}

impl fmt::Display for RequestLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            LifecycleState::Failed { reason } => write!(f, "● Failed: {}", reason),
            _ => write!(f, "● {}", self.status_label()),
        }
    }
}
