//! Identity and frame-context scenarios

use crate::imgui::{Session, UiError, WindowFlags};
use crate::tree::{MemoryTree, WidgetKind, WidgetTree};

fn ids_for_frame(ui: &mut Session<MemoryTree>, show_extra: bool, scoped: bool) -> Vec<String> {
    let mut ids = Vec::new();
    ui.open_frame("update", None);
    assert!(ui.begin("W", &mut true, WindowFlags::empty()));
    ids.push(ui.generate_id(WidgetKind::Button, "first").unwrap());
    if scoped {
        ui.push_id("extra");
    }
    if show_extra {
        ids.push(ui.generate_id(WidgetKind::Button, "extra").unwrap());
    }
    if scoped {
        ui.pop_id();
    }
    ids.push(ui.generate_id(WidgetKind::Button, "last").unwrap());
    ui.end();
    ui.close_frame("update");
    ids
}

#[test]
fn test_identities_are_stable_frame_over_frame() {
    let mut ui = Session::new(MemoryTree::new());
    let first = ids_for_frame(&mut ui, true, false);
    let second = ids_for_frame(&mut ui, true, false);
    assert_eq!(first, second);
    assert_eq!(first, vec!["W/Button_0", "W/Button_1", "W/Button_2"]);
}

#[test]
fn test_label_is_not_part_of_identity() {
    let mut ui = Session::new(MemoryTree::new());
    ui.open_frame("update", None);
    assert!(ui.begin("W", &mut true, WindowFlags::empty()));
    let a = ui.generate_id(WidgetKind::Label, "Same").unwrap();
    let b = ui.generate_id(WidgetKind::Label, "Same").unwrap();
    assert_ne!(a, b);
    ui.end();
    ui.close_frame("update");
}

#[test]
fn test_conditional_declaration_shifts_later_ordinals() {
    let mut ui = Session::new(MemoryTree::new());
    let with = ids_for_frame(&mut ui, true, false);
    let without = ids_for_frame(&mut ui, false, false);
    // "last" took over the ordinal "extra" had
    assert_eq!(without[1], with[1]);
    assert_ne!(without[1], with[2]);
}

#[test]
fn test_push_id_isolates_conditional_section() {
    let mut ui = Session::new(MemoryTree::new());
    let with = ids_for_frame(&mut ui, true, true);
    let without = ids_for_frame(&mut ui, false, true);
    assert_eq!(with[1], "W/extra/Button_0");
    assert_eq!(with[2], without[1]);
    assert_eq!(without[1], "W/Button_1");
}

#[test]
fn test_cross_context_counters_are_independent() {
    let mut ui = Session::new(MemoryTree::new());

    ui.open_frame("update", None);
    assert!(ui.begin("Shared", &mut true, WindowFlags::empty()));
    ui.generate_id(WidgetKind::Label, "a");
    ui.generate_id(WidgetKind::Label, "b");
    ui.end();
    ui.close_frame("update");

    ui.open_frame("fixed_update", None);
    assert!(ui.begin("Shared", &mut true, WindowFlags::empty()));
    let fixed_id = ui.generate_id(WidgetKind::Label, "a").unwrap();
    ui.end();
    ui.close_frame("fixed_update");

    // The fixed pass started its own count at zero
    assert_eq!(fixed_id, "Shared/Label_0");

    // And did not disturb the update pass's table
    let update = ui.contexts.get("update").unwrap();
    assert_eq!(update.peek_ordinal("Shared", "Shared/Label"), 2);
    let fixed = ui.contexts.get("fixed_update").unwrap();
    assert_eq!(fixed.peek_ordinal("Shared", "Shared/Label"), 1);
}

#[test]
fn test_contexts_share_retained_widgets() {
    let mut ui = Session::new(MemoryTree::new());

    ui.open_frame("update", None);
    assert!(ui.begin("Shared", &mut true, WindowFlags::empty()));
    ui.label("from update");
    ui.end();
    ui.close_frame("update");
    let widget = ui.element_widget("Shared", "Shared/Label_0").unwrap();

    ui.open_frame("fixed_update", None);
    assert!(ui.begin("Shared", &mut true, WindowFlags::empty()));
    ui.label("from fixed");
    ui.end();
    ui.close_frame("fixed_update");

    assert_eq!(ui.element_widget("Shared", "Shared/Label_0"), Some(widget));
    assert_eq!(ui.tree().text(widget), Some("from fixed"));
    assert_eq!(ui.tree().count_of_kind(WidgetKind::Label), 1);
}

#[test]
fn test_second_pass_sweeps_elements_it_did_not_declare() {
    let mut ui = Session::new(MemoryTree::new());
    let mut volume = 0.25_f32;

    ui.open_frame("update", None);
    assert!(ui.begin("Shared", &mut true, WindowFlags::empty()));
    ui.slider_float("Volume", &mut volume, 0.0, 1.0, 0.0);
    ui.end();
    ui.close_frame("update");

    ui.open_frame("fixed_update", None);
    assert!(ui.begin("Shared", &mut true, WindowFlags::empty()));
    ui.end();
    ui.close_frame("fixed_update");
    assert_eq!(ui.tree().count_of_kind(WidgetKind::SliderFloat), 0);

    // Next update pass rebuilds it from persisted state
    ui.open_frame("update", None);
    assert!(ui.begin("Shared", &mut true, WindowFlags::empty()));
    ui.slider_float("Volume", &mut volume, 0.0, 1.0, 0.0);
    ui.end();
    ui.close_frame("update");
    assert_eq!(ui.tree().count_of_kind(WidgetKind::SliderFloat), 1);
}

#[test]
fn test_sequencing_violations_are_rejected() {
    let mut ui = Session::new(MemoryTree::new());

    assert_eq!(
        ui.try_begin("W", &mut true, WindowFlags::empty()),
        Err(UiError::NoOpenContext)
    );
    assert_eq!(ui.try_end(), Err(UiError::NoOpenWindow));
    assert_eq!(ui.try_open_frame("", None), Err(UiError::EmptyContextName));
    assert!(ui.try_close_frame("update").is_ok());

    ui.open_frame("update", None);
    assert!(matches!(
        ui.try_open_frame("fixed_update", None),
        Err(UiError::ContextAlreadyOpen { .. })
    ));
    assert_eq!(ui.generate_id(WidgetKind::Button, "no window"), None);
    assert!(matches!(
        ui.try_close_frame("fixed_update"),
        Err(UiError::ContextMismatch { .. })
    ));
    assert_eq!(ui.current_context(), Some("update"));
    ui.close_frame("update");
    assert_eq!(ui.current_context(), None);
    assert!(ui.tree().is_empty());
}

#[test]
fn test_closed_flag_skips_window() {
    let mut ui = Session::new(MemoryTree::new());
    ui.open_frame("update", None);
    let mut open = false;
    assert!(!ui.begin("W", &mut open, WindowFlags::empty()));
    assert!(!ui.has_window("W"));
    ui.close_frame("update");
}

#[test]
fn test_forgotten_end_self_heals_on_next_begin() {
    let mut ui = Session::new(MemoryTree::new());
    ui.open_frame("update", None);
    assert!(ui.begin("A", &mut true, WindowFlags::empty()));
    ui.label("a");
    // no end()
    assert!(ui.begin("B", &mut true, WindowFlags::empty()));
    assert_eq!(ui.current_window(), Some("B"));
    ui.end();
    ui.close_frame("update");

    ui.open_frame("update", None);
    assert!(ui.begin("A", &mut true, WindowFlags::empty()));
    ui.label("a");
    ui.end();
    ui.close_frame("update");
    assert_eq!(ui.element_count("A"), 1);
}
