#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenizer {
    model_identifier: String,
    alphabet: Option<String>,
}

impl Tokenizer {
    pub fn new(model_identifier: &str, alphabet: Option<String>) -> Self {
        Self {
            model_identifier: model_identifier.to_string(),
            alphabet: alphabet.filter(|chars| !chars.is_empty()),
        }
    }

    pub fn model_identifier(&self) -> &str {
        &self.model_identifier
    }

    /// `None` means the recognition model's built-in vocabulary.
    pub fn alphabet(&self) -> Option<&str> {
        self.alphabet.as_deref()
    }
}
