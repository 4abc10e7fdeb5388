//! Tab-completion state kept per buffer.
//!
//! Word sources and matching live in the completion engine; this struct only
//! holds what must survive between two presses of the completion key.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub base_command: Option<String>,
    pub base_command_arg: usize,
    pub base_word: Option<String>,
    pub base_word_pos: usize,
    pub position: Option<usize>,
    pub words: Vec<String>,
    pub word_found: Option<String>,
}

impl Completion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the current cycle so the next press starts over.
    pub fn stop(&mut self) {
        self.position = None;
        self.word_found = None;
    }

    pub fn is_active(&self) -> bool {
        self.position.is_some()
    }

    /// Drop every recorded word and base.
    pub fn free(&mut self) {
        *self = Self::default();
    }
}

/// Direction of an in-progress text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSearchMode {
    #[default]
    Disabled,
    Backward,
    Forward,
}

/// Scratch state of the "search text in buffer" mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextSearch {
    pub mode: TextSearchMode,
    pub exact: bool,
    pub found: bool,
    /// Input line saved while searching, restored afterwards.
    pub saved_input: Option<String>,
}

impl TextSearch {
    pub fn free(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_keeps_words() {
        let mut completion = Completion::new();
        completion.words = vec!["alice".to_string(), "alfred".to_string()];
        completion.position = Some(1);
        completion.stop();
        assert!(!completion.is_active());
        assert_eq!(completion.words.len(), 2);

        completion.free();
        assert!(completion.words.is_empty());
    }
}
