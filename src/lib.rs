//! Grade aggregation and ranking engine for the school dashboard, plus the
//! JSON-lines sidecar protocol that exposes it to the UI and exporters.

pub mod calc;
pub mod ipc;
