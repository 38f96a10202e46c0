//! Immediate-mode UI demo
//!
//! Runs a handful of simulated engine ticks against an in-memory widget tree.
//! A variable-rate loop owns a settings window, a fixed-step loop owns a
//! physics readout, and both write into a shared debug window. Input is
//! faked by editing retained widgets between ticks.
//!
//! Usage: `imui_demo [driver-config.toml|driver-config.ron]`

use imui_core::foundation::logging;
use imui_core::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
enum DemoError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Widget missing: {0}")]
    MissingWidget(String),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

struct DemoApp {
    volume: f32,
    difficulty: i32,
    player_name: String,
    tint: Color,
    show_debug: bool,
    settings_open: bool,
    body_height: f32,
    body_velocity: f32,
    resets: u32,
}

impl DemoApp {
    fn new() -> Self {
        Self {
            volume: 0.5,
            difficulty: 1,
            player_name: "Player".to_string(),
            tint: rgba(1.0, 1.0, 1.0, 1.0),
            show_debug: true,
            settings_open: true,
            body_height: 10.0,
            body_velocity: 0.0,
            resets: 0,
        }
    }
}

impl ImmediateApp<MemoryTree> for DemoApp {
    fn update(&mut self, ui: &mut Session<MemoryTree>, _delta_time: f32) -> Result<(), HostError> {
        if ui.begin("Settings", &mut self.settings_open, WindowFlags::NO_RESIZE) {
            ui.label("Audio");
            if ui.slider_float("Volume", &mut self.volume, 0.0, 1.0, 0.05) {
                log::info!("Volume changed to {:.2}", self.volume);
            }
            ui.separator();
            ui.label("Gameplay");
            if ui.slider_int("Difficulty", &mut self.difficulty, 0, 3, 1) {
                log::info!("Difficulty changed to {}", self.difficulty);
            }
            if ui.input_text("Name", &mut self.player_name) {
                log::info!("Player renamed to {}", self.player_name);
            }
            ui.color_picker("Tint", &mut self.tint);
            ui.checkbox("Show debug", &mut self.show_debug);
            ui.end();
        }

        if self.show_debug && ui.begin("Debug", &mut true, WindowFlags::NO_INPUTS) {
            ui.push_id("frame");
            ui.label("variable pass");
            ui.pop_id();
            ui.end();
        }
        Ok(())
    }

    fn fixed_update(&mut self, ui: &mut Session<MemoryTree>, step: f32) -> Result<(), HostError> {
        const GRAVITY: f32 = -9.81;
        self.body_velocity += GRAVITY * step;
        self.body_height += self.body_velocity * step;
        if self.body_height < 0.0 {
            self.body_height = 0.0;
            self.body_velocity = -self.body_velocity * 0.5;
        }

        if ui.begin("Physics", &mut true, WindowFlags::NO_TITLE_BAR | WindowFlags::NO_MOVE) {
            ui.label(&format!("height {:.2}", self.body_height));
            if ui.button("Reset") {
                self.body_height = 10.0;
                self.body_velocity = 0.0;
                self.resets += 1;
                log::info!("Body reset ({} so far)", self.resets);
            }
            ui.end();
        }

        if self.show_debug && ui.begin("Debug", &mut true, WindowFlags::NO_INPUTS) {
            ui.push_id("physics");
            ui.label(&format!("velocity {:.2}", self.body_velocity));
            ui.pop_id();
            ui.end();
        }
        Ok(())
    }
}

/// Find a declared control's widget
fn widget(ui: &Session<MemoryTree>, window: &str, identity: &str) -> Result<WidgetId, DemoError> {
    ui.element_widget(window, identity)
        .ok_or_else(|| DemoError::MissingWidget(identity.to_string()))
}

/// Fake user input for a given tick
fn simulate_input(ui: &mut Session<MemoryTree>, tick: u32) -> Result<(), DemoError> {
    match tick {
        3 => {
            let slider = widget(ui, "Settings", "Settings/SliderFloat_0")?;
            ui.tree_mut().set_value(slider, Value::Float(0.8))?;
        }
        5 => {
            let button = widget(ui, "Physics", "Physics/Button_0")?;
            ui.tree_mut().set_value(button, Value::Bool(true))?;
        }
        6 => {
            let button = widget(ui, "Physics", "Physics/Button_0")?;
            ui.tree_mut().set_value(button, Value::Bool(false))?;
            let checkbox = widget(ui, "Settings", "Settings/Checkbox_0")?;
            ui.tree_mut().set_value(checkbox, Value::Bool(false))?;
        }
        8 => {
            // User clicks the close button on the settings window
            let window = ui
                .window_widget("Settings")
                .ok_or_else(|| DemoError::MissingWidget("Settings".to_string()))?;
            ui.tree_mut().set_value(window, Value::Bool(false))?;
        }
        _ => {}
    }
    Ok(())
}

fn load_driver_config() -> Result<DriverConfig, DemoError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading driver config from {}", path);
            Ok(DriverConfig::load_from_file(&path)?)
        }
        None => Ok(DriverConfig::default()),
    }
}

fn run() -> Result<(), DemoError> {
    let mut driver = TickDriver::new(load_driver_config()?)?;
    let mut tree = MemoryTree::new();
    let scene = tree.create(WidgetKind::Content, None)?;
    driver.set_scene(Some(scene));
    let mut ui = Session::new(tree);
    let mut app = DemoApp::new();
    let delta_time = 1.0 / 30.0;

    for tick in 0..12 {
        simulate_input(&mut ui, tick)?;
        let report = driver.tick(&mut ui, &mut app, delta_time)?;
        log::debug!(
            "Tick {}: {} fixed passes, {} windows reclaimed",
            tick,
            report.fixed_passes,
            report.windows_reclaimed
        );
    }

    let stats = ui.stats().clone();
    log::info!("Windows: {:?}", ui.window_names());
    log::info!(
        "Elements created {}, reused {}, swept {}, windows reclaimed {} (reuse {:.0}%)",
        stats.elements_created,
        stats.elements_reused,
        stats.elements_swept,
        stats.windows_reclaimed,
        stats.reuse_ratio() * 100.0
    );
    log::info!(
        "Final settings: volume {:.2}, difficulty {}, name {}, debug {}, settings open {}",
        app.volume,
        app.difficulty,
        app.player_name,
        app.show_debug,
        app.settings_open
    );

    let tree = ui.into_tree();
    log::info!(
        "Widgets alive: {} ({} under the scene)",
        tree.len(),
        tree.children(scene).len()
    );
    Ok(())
}

fn main() {
    logging::init();
    log::info!("Starting immediate-mode UI demo");

    if let Err(e) = run() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}
