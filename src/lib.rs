pub mod collision;
pub mod config;
pub mod director;
pub mod engine;
pub mod entities;
pub mod registry;
pub mod session;
pub mod ship;

pub use engine::{FixedStage, Key, Stage};
pub use session::{GameSession, TickReport};
