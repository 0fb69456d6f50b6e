/// Mutable holder of the raw text that gets decorated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSource {
    text: String,
}

impl ContentSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
