//! Input line state owned by a buffer.

/// Editable input line with its color mask.
///
/// The cursor and first displayed position count characters, not bytes.
/// `alloc` mirrors the block-rounded capacity the line editor reserves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    text: String,
    color_mask: String,
    pos: usize,
    first_display: usize,
    alloc: usize,
    block_size: usize,
    pub(crate) nick: Option<String>,
}

impl InputState {
    /// Empty input pre-sized to one block.
    pub fn new(block_size: usize) -> Self {
        let block_size = block_size.max(1);
        Self {
            text: String::with_capacity(block_size),
            color_mask: String::with_capacity(block_size),
            pos: 0,
            first_display: 0,
            alloc: block_size,
            block_size,
            nick: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color_mask(&self) -> &str {
        &self.color_mask
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn first_display(&self) -> usize {
        self.first_display
    }

    pub fn alloc(&self) -> usize {
        self.alloc
    }

    pub fn nick(&self) -> Option<&str> {
        self.nick.as_deref()
    }

    /// Number of characters in the line.
    pub fn length(&self) -> usize {
        self.text.chars().count()
    }

    /// Insert `value` at char position `at`, or at the cursor when `None`.
    /// The cursor ends after the inserted text.
    pub fn insert_str(&mut self, value: &str, at: Option<usize>) {
        if value.is_empty() {
            return;
        }
        let at = at.unwrap_or(self.pos).min(self.length());
        let byte = char_to_byte(&self.text, at);
        self.text.insert_str(byte, value);

        let inserted = value.chars().count();
        let mask_byte = char_to_byte(&self.color_mask, at);
        self.color_mask
            .insert_str(mask_byte, &" ".repeat(inserted));

        self.pos = at + inserted;
        self.optimize_size();
    }

    /// Clear the whole line and move the cursor home.
    pub fn delete_line(&mut self) {
        self.text.clear();
        self.color_mask.clear();
        self.pos = 0;
        self.first_display = 0;
        self.optimize_size();
    }

    /// Release text, mask and nick. Used when the buffer is closed.
    pub fn release(&mut self) {
        self.text = String::new();
        self.color_mask = String::new();
        self.nick = None;
        self.pos = 0;
        self.first_display = 0;
        self.alloc = 0;
    }

    fn optimize_size(&mut self) {
        let needed = self.text.len() + 1;
        self.alloc = needed.div_ceil(self.block_size) * self.block_size;
    }
}

fn char_to_byte(value: &str, chars: usize) -> usize {
    value
        .char_indices()
        .nth(chars)
        .map_or(value.len(), |(index, _)| index)
}
