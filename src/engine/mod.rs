//! Simulation engine and the run loop that drives it

pub mod error;
pub mod life_engine;
pub mod run_loop;
pub mod speed;

pub use error::EngineError;
pub use life_engine::{LifeEngine, DEFAULT_ALIVE_PROBABILITY, DEFAULT_COLUMNS, DEFAULT_ROWS};
pub use run_loop::{RunLoop, SharedEngine, StepObserver};
pub use speed::Speed;
