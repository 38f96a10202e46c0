//! Host integration
//!
//! Applications implement [`ImmediateApp`] and hand it to a [`TickDriver`],
//! which runs one variable-rate context per tick and as many fixed-step
//! contexts as the accumulated time allows, then reclaims stale windows.

use crate::config::{ConfigError, DriverConfig};
use crate::imgui::Session;
use crate::tree::{WidgetId, WidgetTree};
use thiserror::Error;

/// Application declaring immediate-mode UI
pub trait ImmediateApp<T: WidgetTree> {
    /// Declare UI for the variable-rate update
    ///
    /// # Arguments
    /// * `ui` - Session with the update context already open
    /// * `delta_time` - Time since last tick in seconds
    fn update(&mut self, ui: &mut Session<T>, delta_time: f32) -> Result<(), HostError>;

    /// Declare UI for one fixed step
    fn fixed_update(&mut self, _ui: &mut Session<T>, _step: f32) -> Result<(), HostError> {
        Ok(())
    }
}

/// Host-level errors
#[derive(Error, Debug)]
pub enum HostError {
    /// Driver configuration rejected
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Application callback failed
    #[error("Application error: {0}")]
    App(String),
}

/// What one tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Fixed-step passes run
    pub fixed_passes: u32,
    /// Windows destroyed by the end-of-tick cleanup
    pub windows_reclaimed: usize,
}

/// Drives frame contexts and cleanup for a session
#[derive(Debug)]
pub struct TickDriver {
    config: DriverConfig,
    accumulator: f32,
    scene: Option<WidgetId>,
    tick_count: u64,
}

impl TickDriver {
    /// Create a driver from a validated configuration
    pub fn new(config: DriverConfig) -> Result<Self, HostError> {
        config.validate()?;
        Ok(Self {
            config,
            accumulator: 0.0,
            scene: None,
            tick_count: 0,
        })
    }

    /// Set the scene new windows are parented to
    pub fn set_scene(&mut self, scene: Option<WidgetId>) {
        self.scene = scene;
    }

    /// Driver configuration
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Ticks run so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Time carried over to the next fixed step
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Run one engine tick
    ///
    /// An application error closes the open context and skips the cleanup,
    /// so nothing declared this tick is reclaimed because of it. Negative
    /// deltas count as zero and non-finite ones are ignored.
    pub fn tick<T, A>(
        &mut self,
        ui: &mut Session<T>,
        app: &mut A,
        delta_time: f32,
    ) -> Result<TickReport, HostError>
    where
        T: WidgetTree,
        A: ImmediateApp<T>,
    {
        self.tick_count += 1;
        let mut report = TickReport::default();
        let delta_time = if delta_time.is_finite() {
            delta_time.max(0.0)
        } else {
            log::warn!("Tick {}: ignoring non-finite delta {}", self.tick_count, delta_time);
            0.0
        };

        let variable = self.config.variable_context.clone();
        ui.open_frame(&variable, self.scene);
        let result = app.update(ui, delta_time);
        ui.close_frame(&variable);
        result?;

        let step = self.config.fixed_step;
        let fixed = self.config.fixed_context.clone();
        self.accumulator += delta_time;
        while self.accumulator >= step {
            if report.fixed_passes >= self.config.max_fixed_steps_per_tick {
                log::warn!(
                    "Tick {}: fixed step backlog of {:.3}s dropped",
                    self.tick_count,
                    self.accumulator
                );
                self.accumulator %= step;
                break;
            }
            ui.open_frame(&fixed, self.scene);
            let result = app.fixed_update(ui, step);
            ui.close_frame(&fixed);
            result?;
            self.accumulator -= step;
            report.fixed_passes += 1;
        }

        report.windows_reclaimed = ui.perform_global_cleanup();
        if report.windows_reclaimed > 0 {
            log::debug!("Tick {}: reclaimed {} windows", self.tick_count, report.windows_reclaimed);
        }
        Ok(report)
    }
}
