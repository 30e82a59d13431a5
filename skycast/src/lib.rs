//! skycast terminal front end
//!
//! Presentational components, the event poller and the render loop. The
//! fetch logic lives in `skycast-core`.

pub mod components;
pub mod event;
pub mod icons;
pub mod runtime;
pub mod testing;
