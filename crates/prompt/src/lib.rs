pub mod prompt;
pub mod schema;

pub use prompt::{build_prompt, OUTPUT_FORMAT, WORKED_EXAMPLES};
pub use schema::{AnalysisRequest, WordCountError, WORD_COUNT};
