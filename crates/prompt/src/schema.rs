use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of words in a Connections board.
pub const WORD_COUNT: usize = 16;

/// The 16 words of one puzzle, in submission order.
///
/// Deserializing goes through [`TryFrom<Vec<String>>`], so a JSON array of
/// any other length (or with non-string items) is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct AnalysisRequest {
    words: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected {expected} words, got {found}", expected = WORD_COUNT)]
pub struct WordCountError {
    pub found: usize,
}

impl AnalysisRequest {
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl TryFrom<Vec<String>> for AnalysisRequest {
    type Error = WordCountError;

    fn try_from(words: Vec<String>) -> Result<Self, Self::Error> {
        if words.len() != WORD_COUNT {
            return Err(WordCountError { found: words.len() });
        }
        Ok(Self { words })
    }
}

impl From<AnalysisRequest> for Vec<String> {
    fn from(request: AnalysisRequest) -> Self {
        request.words
    }
}
