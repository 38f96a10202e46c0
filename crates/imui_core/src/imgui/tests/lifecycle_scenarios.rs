//! Element and window lifecycle scenarios

use crate::config::SessionConfig;
use crate::foundation::value::Value;
use crate::imgui::{Session, UiError, WindowFlags};
use crate::tree::{MemoryTree, PropertySlot, WidgetKind, WidgetProperty, WidgetTree};

fn tick(ui: &mut Session<MemoryTree>, context: &str, windows: &[&str]) {
    ui.open_frame(context, None);
    for name in windows {
        assert!(ui.begin(name, &mut true, WindowFlags::empty()));
        ui.label(name);
        ui.button("OK");
        ui.end();
    }
    ui.close_frame(context);
}

#[test]
fn test_redeclared_element_is_never_deleted() {
    let mut ui = Session::new(MemoryTree::new());
    tick(&mut ui, "update", &["W"]);
    let widget = ui.element_widget("W", "W/Button_0").unwrap();

    for _ in 0..10 {
        tick(&mut ui, "update", &["W"]);
        ui.perform_global_cleanup();
    }
    assert_eq!(ui.element_widget("W", "W/Button_0"), Some(widget));
    assert!(ui.tree().is_valid(widget));
    assert_eq!(ui.stats().elements_swept, 0);
}

#[test]
fn test_at_most_one_widget_per_identity() {
    let mut ui = Session::new(MemoryTree::new());
    for _ in 0..5 {
        ui.open_frame("update", None);
        assert!(ui.begin("W", &mut true, WindowFlags::empty()));
        for _ in 0..3 {
            ui.button("Again");
        }
        ui.end();
        ui.close_frame("update");
    }
    assert_eq!(ui.tree().count_of_kind(WidgetKind::Button), 3);
    assert_eq!(ui.element_count("W"), 3);
    assert_eq!(ui.stats().elements_created, 3);
    assert_eq!(ui.stats().elements_reused, 12);
}

#[test]
fn test_window_only_declared_by_idle_context_survives() {
    let mut ui = Session::new(MemoryTree::new());
    tick(&mut ui, "update", &["Hud"]);
    tick(&mut ui, "fixed_update", &["Physics"]);
    ui.perform_global_cleanup();

    // The fixed loop does not run this tick; its last cycle still counts
    tick(&mut ui, "update", &["Hud"]);
    assert_eq!(ui.perform_global_cleanup(), 0);
    assert_eq!(ui.window_names(), vec!["Hud", "Physics"]);

    // It runs again without declaring the window
    tick(&mut ui, "fixed_update", &[]);
    assert_eq!(ui.perform_global_cleanup(), 1);
    assert_eq!(ui.window_names(), vec!["Hud"]);
}

#[test]
fn test_window_closed_externally_is_recreated_with_state() {
    let mut ui = Session::new(MemoryTree::new());
    let mut sound = true;

    ui.open_frame("update", None);
    assert!(ui.begin("Options", &mut true, WindowFlags::empty()));
    ui.checkbox("Sound", &mut sound);
    ui.end();
    ui.close_frame("update");

    let checkbox = ui.element_widget("Options", "Options/Checkbox_0").unwrap();
    ui.tree_mut().set_value(checkbox, Value::Bool(false)).unwrap();
    let old_window = ui.window_widget("Options").unwrap();
    ui.tree_mut().delete(old_window);

    ui.open_frame("update", None);
    assert!(ui.begin("Options", &mut true, WindowFlags::empty()));
    // The user edit was lost with the widget; the persisted value comes back
    assert!(!ui.checkbox("Sound", &mut sound));
    ui.end();
    ui.close_frame("update");

    let new_window = ui.window_widget("Options").unwrap();
    assert_ne!(new_window, old_window);
    let checkbox = ui.element_widget("Options", "Options/Checkbox_0").unwrap();
    assert_eq!(ui.tree().value(checkbox), Some(Value::Bool(true)));
    assert!(sound);
}

#[test]
fn test_detached_window_is_purged_and_rebuilt() {
    let mut ui = Session::new(MemoryTree::new());
    tick(&mut ui, "update", &["W"]);
    let old = ui.window_widget("W").unwrap();
    ui.tree_mut().detach(old);

    tick(&mut ui, "update", &["W"]);
    assert!(!ui.tree().is_valid(old));
    let new = ui.window_widget("W").unwrap();
    assert!(ui.tree().is_attached(new));
    assert_eq!(ui.tree().count_of_kind(WidgetKind::Window), 1);
}

#[test]
fn test_close_request_clears_open_flag() {
    let mut ui = Session::new(MemoryTree::new());
    let mut open = true;

    ui.open_frame("update", None);
    assert!(ui.begin("Dialog", &mut open, WindowFlags::empty()));
    ui.end();
    ui.close_frame("update");
    ui.perform_global_cleanup();

    // Close button pressed in the retained window
    let widget = ui.window_widget("Dialog").unwrap();
    ui.tree_mut().set_value(widget, Value::Bool(false)).unwrap();

    ui.open_frame("update", None);
    assert!(!ui.begin("Dialog", &mut open, WindowFlags::empty()));
    ui.close_frame("update");
    assert!(!open);
    assert!(!ui.tree().is_visible(widget));

    assert_eq!(ui.perform_global_cleanup(), 1);
    assert!(!ui.has_window("Dialog"));
}

#[test]
fn test_flags_and_size_apply_only_at_creation() {
    let config = SessionConfig::default().with_window_size(640.0, 480.0);
    let mut ui = Session::with_config(MemoryTree::new(), config);

    ui.open_frame("update", None);
    assert!(ui.begin("Hud", &mut true, WindowFlags::NO_TITLE_BAR | WindowFlags::NO_MOVE));
    ui.end();
    ui.close_frame("update");

    let widget = ui.window_widget("Hud").unwrap();
    ui.tree_mut().set_property(widget, WidgetProperty::Size(100.0, 50.0)).unwrap();

    ui.open_frame("update", None);
    assert!(ui.begin("Hud", &mut true, WindowFlags::empty()));
    ui.end();
    ui.close_frame("update");

    let property = |slot: PropertySlot| ui.tree().property(widget, slot).cloned();
    assert_eq!(property(PropertySlot::TitleBar), Some(WidgetProperty::TitleBar(false)));
    assert_eq!(property(PropertySlot::Draggable), Some(WidgetProperty::Draggable(false)));
    assert_eq!(property(PropertySlot::Resizable), Some(WidgetProperty::Resizable(true)));
    assert_eq!(property(PropertySlot::Size), Some(WidgetProperty::Size(100.0, 50.0)));
    let tree = ui.tree();
    assert_eq!(tree.text(widget), Some("Hud"));
}

#[test]
fn test_new_window_takes_focus() {
    let mut ui = Session::new(MemoryTree::new());
    tick(&mut ui, "update", &["A", "B"]);
    assert_eq!(ui.tree().focused(), ui.window_widget("B"));

    let quiet = SessionConfig::default().with_focus_new_windows(false);
    let mut ui = Session::with_config(MemoryTree::new(), quiet);
    tick(&mut ui, "update", &["A"]);
    assert_eq!(ui.tree().focused(), None);
}

#[test]
fn test_missing_content_container_fails_once_then_recovers() {
    let mut ui = Session::new(MemoryTree::new());
    tick(&mut ui, "update", &["W"]);
    let window = ui.window_widget("W").unwrap();
    let content = ui.tree().find_child_by_tag(window, "content").unwrap();
    ui.tree_mut().delete(content);

    ui.open_frame("update", None);
    assert_eq!(
        ui.try_begin("W", &mut true, WindowFlags::empty()),
        Err(UiError::MissingContentContainer("W".to_string()))
    );
    assert!(!ui.button("OK"));
    ui.close_frame("update");

    tick(&mut ui, "update", &["W"]);
    assert_eq!(ui.element_count("W"), 2);
    assert_eq!(ui.tree().count_of_kind(WidgetKind::Window), 1);
}

#[test]
fn test_windows_attach_to_context_scene() {
    let mut tree = MemoryTree::new();
    let scene = tree.create(WidgetKind::Content, None).unwrap();
    let mut ui = Session::new(tree);

    ui.open_frame("update", Some(scene));
    assert!(ui.begin("W", &mut true, WindowFlags::empty()));
    ui.end();
    ui.close_frame("update");

    let window = ui.window_widget("W").unwrap();
    assert_eq!(ui.tree().parent(window), Some(scene));

    // Reclaiming the window leaves the host scene alone
    ui.open_frame("update", Some(scene));
    ui.close_frame("update");
    ui.perform_global_cleanup();
    assert!(ui.tree().is_valid(scene));
    assert_eq!(ui.tree().len(), 1);
}

/// Declares `W` with one float slider and returns whether it reported a change
fn slider_tick(ui: &mut Session<MemoryTree>, volume: &mut f32) -> bool {
    let mut changed = false;
    ui.open_frame("update", None);
    if ui.begin("W", &mut true, WindowFlags::empty()) {
        changed = ui.slider_float("Volume", volume, 0.0, 1.0, 0.0);
        ui.end();
    }
    ui.close_frame("update");
    ui.perform_global_cleanup();
    changed
}

/// Deletes the content container of `W` and runs the failing tick
fn break_content(ui: &mut Session<MemoryTree>, volume: &mut f32) {
    let window = ui.window_widget("W").unwrap();
    let content = ui.tree().find_child_by_tag(window, "content").unwrap();
    ui.tree_mut().delete(content);
    assert!(!slider_tick(ui, volume));
    assert!(!ui.has_window("W"));
}

#[test]
fn test_state_of_broken_window_survives_until_redeclared() {
    let mut ui = Session::new(MemoryTree::new());
    let mut volume = 0.5;
    slider_tick(&mut ui, &mut volume);
    let slider = ui.element_widget("W", "W/SliderFloat_0").unwrap();
    ui.tree_mut().set_value(slider, Value::Float(0.75)).unwrap();
    assert!(slider_tick(&mut ui, &mut volume));

    break_content(&mut ui, &mut volume);
    assert_eq!(
        ui.element_state("W", "W/SliderFloat_0").and_then(|state| state.get("value")),
        Some(&Value::Float(0.75))
    );

    assert!(!slider_tick(&mut ui, &mut volume));
    let slider = ui.element_widget("W", "W/SliderFloat_0").unwrap();
    assert_eq!(ui.tree().value(slider), Some(Value::Float(0.75)));
    assert_eq!(volume, 0.75);
}

#[test]
fn test_state_of_broken_window_is_dropped_when_not_redeclared() {
    let mut ui = Session::new(MemoryTree::new());
    let mut volume = 0.5;
    slider_tick(&mut ui, &mut volume);
    break_content(&mut ui, &mut volume);
    assert!(ui.element_state("W", "W/SliderFloat_0").is_some());

    // A tick that no longer declares the window
    ui.open_frame("update", None);
    ui.close_frame("update");
    assert_eq!(ui.perform_global_cleanup(), 0);
    assert!(ui.element_state("W", "W/SliderFloat_0").is_none());
}
