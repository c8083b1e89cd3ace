use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Page
    pub background: Color,
    pub text: Color,
    pub muted: Color,

    // Header bar
    pub header_bg: Color,
    pub header_fg: Color,
    pub header_active: Color,

    // Semantic colors
    pub accent: Color,
    pub selection: Color,
    pub error: Color,
    pub status_bg: Color,
    pub status_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        crate::themes::mars::light()
    }
}
