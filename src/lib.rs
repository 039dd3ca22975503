// Domain layer - Life rules, stepping and the generation history
pub mod domain;

// Rendering layer - Instance arena and sculpture drawing
pub mod rendering;

// Application layer - Session coordination and background compute
pub mod application;

// Re-exports for convenience
pub use domain::{Algorithm, Cell, Grid, LifeEngine, LifeError, Rule, presets};
pub use rendering::{DisplayWindow, InstanceBufferCache, SyncOutcome};
pub use application::{Session, SessionConfig, SessionError};
