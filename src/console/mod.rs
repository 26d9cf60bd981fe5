//! Console Module
//!
//! Interactive command layer over the embedding store.

mod command;
mod dispatch;

pub use command::{CommandId, Reply};
pub use dispatch::{dispatch_table, Handler, Session, DEFAULT_TOP_N};
