//! Garbage Collector
//!
//! Two flag-based sweeps, no reference counting:
//! - window-close sweep inside `end()`: elements not redeclared since
//!   `begin` are still hidden and get deleted;
//! - cycle sweep in `perform_global_cleanup()`: windows no context declared
//!   during its last cycle are destroyed together with their state.

use super::session::Session;
use super::window::Window;
use crate::tree::WidgetTree;
use std::collections::HashSet;

impl<T: WidgetTree> Session<T> {
    /// Delete every element of a window that was not touched since `begin`
    pub(crate) fn sweep_window(&mut self, name: &str) -> usize {
        let Some(window) = self.windows.get_mut(name) else {
            log::debug!("Window \"{}\" vanished before its sweep", name);
            return 0;
        };

        let before = window.elements.len();
        let tree = &mut self.tree;
        window.elements.retain(|element| {
            let keep = tree.is_valid(element.widget) && tree.is_visible(element.widget);
            if !keep {
                log::trace!("Sweeping {}", element.identity);
                tree.delete(element.widget);
            }
            keep
        });
        let swept = before - window.elements.len();

        self.stats.elements_swept += swept as u64;
        self.refresh_counts();
        swept
    }

    /// Destroy every window that no context declared during its last cycle
    ///
    /// Run once per engine tick after all contexts have closed. Calling it
    /// with a context open is logged; the window being declared is spared and
    /// everything else is still collected. Returns the number of windows
    /// reclaimed.
    pub fn perform_global_cleanup(&mut self) -> usize {
        if let Some(context) = self.contexts.current_name() {
            log::warn!("perform_global_cleanup called while frame context \"{}\" is open", context);
        }

        let mut keep: HashSet<String> = self.contexts.active_union();
        if let Some(current) = &self.current_window {
            keep.insert(current.name.clone());
        }

        let stale: Vec<String> = self
            .windows
            .names()
            .into_iter()
            .filter(|name| !keep.contains(name))
            .collect();

        for name in &stale {
            if let Some(window) = self.windows.remove(name) {
                self.destroy_window(window);
            }
        }

        // States of windows purged earlier (closed by the user) and never redeclared
        self.states.retain_windows(|name| keep.contains(name));

        self.stats.windows_reclaimed += stale.len() as u64;
        self.refresh_counts();
        stale.len()
    }

    fn destroy_window(&mut self, window: Window) {
        log::debug!(
            "Reclaiming window \"{}\" ({} elements)",
            window.name,
            window.elements.len()
        );
        self.tree.delete(window.widget);
        self.states.remove_window(&window.name);
        self.contexts.forget_window(&window.name);
    }
}
