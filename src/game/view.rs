use super::holes::{HOLE_COUNT, HoleId};

/// Rendering surface the controller reads and writes. It never owns game state.
pub trait View {
    /// Flip the hole's shown state, returning the new value.
    fn toggle(&mut self, hole: HoleId) -> bool;
    fn is_visible(&self, hole: HoleId) -> bool;
    fn show_score(&mut self, score: u32);
    fn show_time(&mut self, remaining_secs: u32);
    /// (Re)attach the whack handler to every mole. Replaces earlier bindings.
    fn bind_whack_handlers(&mut self);
}

/// Headless view that just remembers what it was told.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryView {
    pub visible: [bool; HOLE_COUNT],
    pub score_text: Option<String>,
    pub time_text: Option<String>,
    pub handlers_bound: bool,
    pub bind_calls: u32,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible_holes(&self) -> Vec<HoleId> {
        HoleId::all().filter(|h| self.visible[h.index()]).collect()
    }
}

impl View for MemoryView {
    fn toggle(&mut self, hole: HoleId) -> bool {
        let slot = &mut self.visible[hole.index()];
        *slot = !*slot;
        *slot
    }

    fn is_visible(&self, hole: HoleId) -> bool {
        self.visible[hole.index()]
    }

    fn show_score(&mut self, score: u32) {
        self.score_text = Some(score.to_string());
    }

    fn show_time(&mut self, remaining_secs: u32) {
        self.time_text = Some(remaining_secs.to_string());
    }

    fn bind_whack_handlers(&mut self) {
        self.handlers_bound = true;
        self.bind_calls += 1;
    }
}
