//! The command protocol: parsing and dispatch.
//!
//! - [`parser`] - `sidekick:[//]path[?query]` grammar
//! - [`dispatcher`] - fixed action table against the host façade
//! - [`context`] - legacy stateful field accumulator (compat only)

pub mod context;
pub mod dispatcher;
pub mod parser;

pub use dispatcher::{CallOutcome, Dispatcher};
pub use parser::{ParsedCommand, Params, parse};
