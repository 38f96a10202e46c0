//! Session statistics

/// Bookkeeping counters for one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Windows currently registered
    pub window_count: usize,

    /// Elements currently tracked across all windows
    pub element_count: usize,

    /// Widgets created by the reconciler
    pub elements_created: u64,

    /// Reconciler hits that reused an existing widget
    pub elements_reused: u64,

    /// Elements deleted by window-close sweeps
    pub elements_swept: u64,

    /// Windows reclaimed by global cleanup
    pub windows_reclaimed: u64,
}

impl SessionStats {
    /// Fraction of reconciliations that reused a widget
    pub fn reuse_ratio(&self) -> f32 {
        let total = self.elements_created + self.elements_reused;
        if total == 0 {
            0.0
        } else {
            self.elements_reused as f32 / total as f32
        }
    }
}
