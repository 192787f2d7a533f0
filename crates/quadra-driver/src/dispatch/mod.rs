//! Single-thread dispatcher.
//!
//! Every native GPU call is funneled through one worker thread which owns the
//! device state. Callers post closures and block until the worker has run
//! them, so effects are observed in submission order.

mod worker;

pub use worker::{DispatchError, Dispatcher};
