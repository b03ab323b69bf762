mod engine;
pub mod reconcile;

pub use engine::SyncEngine;
