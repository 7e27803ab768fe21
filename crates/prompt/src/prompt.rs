/// Solved puzzles sent with every request to anchor the answer layout.
pub const WORKED_EXAMPLES: &str = include_str!("../data/worked_examples.txt");

/// Line-format instruction the model is asked to follow, one line per group.
pub const OUTPUT_FORMAT: &str = r#"Format as "GROUP NAME: [WORDS] - CONNECTION EXPLANATION""#;

/// Render the full instruction text for one board.
///
/// The caller is expected to pass the 16 board words; nothing is checked here.
pub fn build_prompt(words: &[String]) -> String {
    format!(
        r#"Analyze these 16 words from the NYT Connections puzzle:
{words}

Find 4 groups of 4 related words. Each word belongs to exactly one group.

IMPORTANT: The connections can be subtle and require lateral thinking. Consider:
- Common phrases, idioms, or expressions
- Words that can precede or follow a common word
- Words belonging to a specific category or domain
- Words with similar patterns or structures
- Homonyms or different meanings of the same word
- Parts of a sequence or set

Here are several SOLVED examples to understand the pattern of connections:

{examples}
For each group you identify, provide:
1. The four words
2. The specific theme/connection
3. A brief explanation of how each word fits

{format}
Give exactly 4 groups, one per line, with exactly 4 words in each group.
Every word must appear in exactly one group."#,
        words = words.join(", "),
        examples = WORKED_EXAMPLES,
        format = OUTPUT_FORMAT,
    )
}
