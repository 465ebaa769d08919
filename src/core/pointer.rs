/// Turns absolute pointer/touch positions into per-move deltas while a drag is active
#[derive(Debug, Clone, Copy, Default)]
pub struct DragTracker {
    last: Option<(f32, f32)>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, x: f32, y: f32) {
        self.last = Some((x, y));
    }

    /// Delta since the previous position, `None` when no drag is active
    pub fn move_to(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        let (lx, ly) = self.last?;
        self.last = Some((x, y));
        Some((x - lx, y - ly))
    }

    pub fn end(&mut self) {
        self.last = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }
}
