pub mod lifecycle;

pub use lifecycle::{LifecycleKind, LifecycleState, RequestLifecycle, RequestTicket};
