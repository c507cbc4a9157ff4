pub const PRESET_STATUSES: [&str; 8] = [
    "Available",
    "Busy",
    "At work",
    "Battery about to die",
    "Can't talk, Parley only",
    "In a meeting",
    "At the movies",
    "At the gym",
];

/// Editor state for the status dialog. Accepted values are returned to the
/// caller, which owns the session status line.
#[derive(Debug, Clone, Default)]
pub struct StatusEditor {
    open: bool,
    draft: String,
}

impl StatusEditor {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.draft.clear();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Whether the custom-status submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    pub fn choose_preset(&mut self, preset: &str) -> Option<String> {
        if !PRESET_STATUSES.contains(&preset) {
            log::debug!("ignoring unknown preset status {preset:?}");
            return None;
        }
        self.close();
        Some(preset.to_string())
    }

    pub fn submit_custom(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        let status = self.draft.trim().to_string();
        self.close();
        Some(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_closes_editor() {
        let mut editor = StatusEditor::default();
        editor.open();
        editor.set_draft("half typed");
        assert_eq!(editor.choose_preset("Busy").as_deref(), Some("Busy"));
        assert!(!editor.is_open());
        assert_eq!(editor.draft(), "");
    }

    #[test]
    fn unknown_preset_is_ignored() {
        let mut editor = StatusEditor::default();
        editor.open();
        assert_eq!(editor.choose_preset("Sleeping"), None);
        assert!(editor.is_open());
    }

    #[test]
    fn custom_status_is_trimmed() {
        let mut editor = StatusEditor::default();
        editor.open();
        editor.set_draft("  Out for lunch ");
        assert!(editor.can_submit());
        assert_eq!(editor.submit_custom().as_deref(), Some("Out for lunch"));
        assert!(!editor.is_open());
    }

    #[test]
    fn blank_custom_status_keeps_editor_open() {
        let mut editor = StatusEditor::default();
        editor.open();
        editor.set_draft("   ");
        assert!(!editor.can_submit());
        assert_eq!(editor.submit_custom(), None);
        assert!(editor.is_open());
        assert_eq!(editor.draft(), "   ");
    }
}
