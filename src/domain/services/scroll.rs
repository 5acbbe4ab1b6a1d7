use ratatui::widgets::ScrollbarState;

/// Scroll position of the card preview grid.
#[derive(Default)]
pub struct Scroll {
    content_length: u16,
    viewport_length: u16,
    pub position: u16,
    pub scrollbar_state: ScrollbarState,
}

impl Scroll {
    fn max_position(&self) -> u16 {
        return self.content_length.saturating_sub(self.viewport_length);
    }

    pub fn up(&mut self) {
        self.position = self.position.saturating_sub(1);
        self.scrollbar_state = self.scrollbar_state.position(self.position);
    }

    pub fn down(&mut self) {
        self.position = self.position.saturating_add(1).min(self.max_position());
        self.scrollbar_state = self.scrollbar_state.position(self.position);
    }

    /// Called on every draw so the position stays valid when the grid or the
    /// terminal changes size.
    pub fn set_lengths(&mut self, content_length: u16, viewport_length: u16) {
        self.content_length = content_length;
        self.viewport_length = viewport_length;
        self.position = self.position.min(self.max_position());
        self.scrollbar_state = self
            .scrollbar_state
            .content_length(content_length)
            .viewport_content_length(viewport_length)
            .position(self.position);
    }
}
