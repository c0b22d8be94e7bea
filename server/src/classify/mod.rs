//! Item classification
//!
//! Turns a free-text item name into a section via a text generator.
//! Classification never fails: every provider problem yields `Other`.

pub mod gemini;
pub mod prompt;
pub mod traits;

pub use gemini::GeminiClient;
pub use traits::{ProviderError, TextGenerator};

use grocery_ai::SectionKey;
use std::sync::Arc;

#[derive(Clone)]
pub struct Classifier {
    generator: Arc<dyn TextGenerator>,
}

impl Classifier {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn classify(&self, item: &str) -> SectionKey {
        let prompt = prompt::build_prompt(item);
        match self.generator.generate(&prompt).await {
            Ok(reply) => {
                let section = prompt::parse_reply(&reply);
                log::info!("Classified {:?} as {}", item, section.as_str());
                section
            }
            Err(e) => {
                log::warn!("Classification of {:?} failed, using fallback: {}", item, e);
                SectionKey::FALLBACK
            }
        }
    }
}
