//! Caller-owned scheduler that steps a shared engine at a fixed interval

use super::{EngineError, LifeEngine, Speed};
use crate::game_of_life::Grid;
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Engine handle shared between the run loop and display code.
/// Every read and write goes through the one lock, so a half-stepped grid is never visible.
pub type SharedEngine = Arc<Mutex<LifeEngine>>;

/// Called with the generation number and a copy of the grid after every
/// scheduled step. The engine lock is released first, so the observer may
/// lock a [`SharedEngine`] handle itself.
pub type StepObserver = Box<dyn FnMut(u64, &Grid) -> ControlFlow<()> + Send>;

#[derive(Debug)]
struct LoopState {
    running: AtomicBool,
    speed_ms: AtomicU64,
}

impl LoopState {
    fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    fn speed(&self) -> Speed {
        Speed::clamped(self.speed_ms.load(Ordering::Acquire))
    }
}

/// Repeatedly calls [`LifeEngine::step`] on a background thread.
///
/// The `running` flag is checked before every scheduled step and while
/// waiting between steps, so [`RunLoop::stop`] returns as soon as any
/// in-progress step has been published.
pub struct RunLoop {
    engine: SharedEngine,
    state: Arc<LoopState>,
    worker: Option<JoinHandle<()>>,
}

impl RunLoop {
    pub fn new(engine: LifeEngine, speed: Speed) -> Self {
        Self::from_shared(Arc::new(Mutex::new(engine)), speed)
    }

    pub fn from_shared(engine: SharedEngine, speed: Speed) -> Self {
        Self {
            engine,
            state: Arc::new(LoopState {
                running: AtomicBool::new(false),
                speed_ms: AtomicU64::new(speed.as_millis()),
            }),
            worker: None,
        }
    }

    /// Another handle to the engine this loop drives
    pub fn engine(&self) -> SharedEngine {
        Arc::clone(&self.engine)
    }

    /// Run `f` with exclusive access to the engine
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut LifeEngine) -> R) -> R {
        f(&mut self.engine.lock())
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn speed(&self) -> Speed {
        self.state.speed()
    }

    /// Change the interval used for waits that start after this call
    pub fn set_speed(&self, speed: Speed) {
        debug!("Speed set to {}", speed);
        self.state.speed_ms.store(speed.as_millis(), Ordering::Release);
    }

    pub fn faster(&self) -> Speed {
        let speed = self.speed().faster();
        self.set_speed(speed);
        speed
    }

    pub fn slower(&self) -> Speed {
        let speed = self.speed().slower();
        self.set_speed(speed);
        speed
    }

    /// Start stepping in the background
    pub fn start(&mut self) -> Result<(), EngineError> {
        self.start_with(Box::new(|_, _| ControlFlow::Continue(())))
    }

    /// Start stepping in the background, reporting each new generation to `observer`.
    /// The loop ends on its own when the observer returns `ControlFlow::Break`.
    pub fn start_with(&mut self, observer: StepObserver) -> Result<(), EngineError> {
        if self.is_running() {
            return Err(EngineError::AlreadyRunning);
        }
        // Reap a worker that stopped itself
        self.join_worker();

        self.state.running.store(true, Ordering::Release);
        let engine = Arc::clone(&self.engine);
        let state = Arc::clone(&self.state);
        self.worker = Some(thread::spawn(move || drive(engine, state, observer)));

        info!("Run loop started at {}", self.speed());
        Ok(())
    }

    /// Clear the running flag and wait for the worker to exit
    pub fn stop(&mut self) {
        let was_running = self.state.running.swap(false, Ordering::AcqRel);
        if let Some(worker) = self.worker.as_ref() {
            worker.thread().unpark();
        }
        self.join_worker();
        if was_running {
            info!("Run loop stopped at generation {}", self.engine.lock().generation());
        }
    }

    /// Block until the worker ends by itself (observer break or `stop` from another handle)
    pub fn wait(&mut self) {
        self.join_worker();
    }

    /// Advance a single generation by hand; refused while the loop is running
    pub fn step_once(&self) -> Result<u64, EngineError> {
        if self.is_running() {
            return Err(EngineError::AlreadyRunning);
        }
        let mut engine = self.engine.lock();
        engine.step();
        Ok(engine.generation())
    }

    /// Stop the loop and take the engine back
    pub fn into_engine(mut self) -> LifeEngine {
        self.stop();
        let engine = Arc::clone(&self.engine);
        drop(self);
        match Arc::try_unwrap(engine) {
            Ok(engine) => engine.into_inner(),
            Err(shared) => shared.lock().clone(),
        }
    }

    fn join_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Run loop worker panicked");
                self.state.running.store(false, Ordering::Release);
            }
        }
    }
}

impl Drop for RunLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn drive(engine: SharedEngine, state: Arc<LoopState>, mut observer: StepObserver) {
    while state.is_running() {
        let (generation, grid) = {
            let mut engine = engine.lock();
            engine.step();
            (engine.generation(), engine.snapshot())
        };
        if observer(generation, &grid).is_break() {
            state.running.store(false, Ordering::Release);
            break;
        }

        let deadline = Instant::now() + state.speed().interval();
        loop {
            if !state.is_running() {
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::park_timeout(deadline - now);
        }
    }
}
