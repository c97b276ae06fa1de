use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use lesson_forge::{ContentGenerator, ContentKind, GenerationRequest};
use tokio::sync::Barrier;

pub const LESSON_JSON: &str = r#"{"flowchart":["What is ownership","Borrowing"],"slides":[{"title":"What is ownership","content":"Every value has a single owner."},{"title":"Borrowing","content":"References let you use a value without owning it."}]}"#;
pub const QUIZ_JSON: &str = r#"[{"question":"Why can a value only have one owner?","options":["Speed","To know when to free it","Style","Legacy"],"answer":"To know when to free it"}]"#;
pub const ASSIGNMENT_TEXT: &str = "1. Refactor a function to borrow instead of clone.\n2. Explain a move error to a peer.";

#[derive(Clone)]
pub struct MockGenerator {
    pub replies: HashMap<ContentKind, Result<String, String>>,
    pub calls: Arc<Mutex<Vec<(ContentKind, String)>>>,
    /// When set, every call waits until all three are in flight
    pub barrier: Option<Arc<Barrier>>,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self {
            replies: HashMap::from([
                (ContentKind::Lesson, Ok(LESSON_JSON.to_string())),
                (ContentKind::Quiz, Ok(QUIZ_JSON.to_string())),
                (ContentKind::Assignment, Ok(ASSIGNMENT_TEXT.to_string())),
            ]),
            calls: Arc::new(Mutex::new(Vec::new())),
            barrier: None,
        }
    }
}

impl MockGenerator {
    pub fn reply(mut self, kind: ContentKind, output: &str) -> Self {
        self.replies.insert(kind, Ok(output.to_string()));
        self
    }

    pub fn failing(mut self, kind: ContentKind, msg: &str) -> Self {
        self.replies.insert(kind, Err(msg.to_string()));
        self
    }

    pub fn in_lockstep(mut self) -> Self {
        self.barrier = Some(Arc::new(Barrier::new(ContentKind::ALL.len())));
        self
    }

    pub fn prompt_for(&self, kind: ContentKind) -> Option<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, prompt)| prompt.clone())
    }
}

/// Tells the prompt templates apart by their opening line, which never
/// contains the embedded text
fn kind_of(prompt: &str) -> ContentKind {
    ContentKind::ALL
        .into_iter()
        .find(|kind| {
            let template = GenerationRequest::new(*kind, "").prompt;
            template.lines().next() == prompt.lines().next()
        })
        .unwrap_or_else(|| panic!("unrecognised prompt: {prompt}"))
}

impl ContentGenerator for MockGenerator {
    type Error = anyhow::Error;

    async fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        let kind = kind_of(prompt);
        self.calls.lock().unwrap().push((kind, prompt.to_string()));

        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }

        match &self.replies[&kind] {
            Ok(output) => Ok(output.clone()),
            Err(msg) => Err(anyhow::anyhow!("{}", msg)),
        }
    }
}
