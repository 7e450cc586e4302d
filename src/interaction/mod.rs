use serde::{Deserialize, Serialize};

/// Public hover state exposed to host applications.
///
/// `point_index` addresses the date-sorted series held by the engine. Pixel
/// positions are derived at frame-build time so a resize never leaves the
/// guideline at a stale x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HoverState {
    pub visible: bool,
    pub point_index: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    cursor_x: f64,
    cursor_y: f64,
    hover: HoverState,
}

impl InteractionState {
    #[must_use]
    pub fn cursor(self) -> (f64, f64) {
        (self.cursor_x, self.cursor_y)
    }

    #[must_use]
    pub fn hover(self) -> HoverState {
        self.hover
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    /// Selects a point and shows guideline and tooltip.
    pub fn select(&mut self, point_index: usize) {
        self.hover.visible = true;
        self.hover.point_index = Some(point_index);
    }

    pub fn on_pointer_leave(&mut self) {
        self.hover.visible = false;
    }

    /// Drops any selection, used when the underlying series is replaced.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
