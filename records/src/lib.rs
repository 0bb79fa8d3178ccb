//! Persistent settings and best-time tables for sapper.

pub use cipher::*;
pub use difficulty::*;
pub use error::*;
pub use record::*;
pub use scoreboard::*;
pub use store::*;

mod cipher;
mod difficulty;
mod error;
mod record;
mod scoreboard;
mod store;
