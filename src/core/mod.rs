//! Framework primitives shared by the engine:
//! - event: typed emitters and subscriptions
//! - gate: single-resolution readiness gates

pub mod event;
pub mod gate;

pub use event::{Emitter, Subscription};
pub use gate::Gate;
