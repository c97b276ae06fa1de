use std::sync::{Arc, Mutex};

use bytes::Bytes;
use lesson_forge::{DocumentError, DocumentParser};

#[derive(Clone, Default)]
pub struct MockDocumentParser {
    pub text: String,
    pub calls: Arc<Mutex<Vec<Bytes>>>,
    pub fail_with: Option<String>,
}

impl MockDocumentParser {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Default::default()
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

impl DocumentParser for MockDocumentParser {
    async fn parse_text(&self, document: Bytes) -> Result<String, DocumentError> {
        self.calls.lock().unwrap().push(document);
        if let Some(ref msg) = self.fail_with {
            return Err(DocumentError::Malformed(msg.clone()));
        }
        Ok(self.text.clone())
    }
}
