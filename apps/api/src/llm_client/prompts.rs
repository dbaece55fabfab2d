// Shared prompt fragments.
// Each feature that needs chat calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments only.

/// Appended to every rated prompt. The response parser depends on the
/// `Rating: N/10` line, followed by the feedback on the next lines.
pub const RATING_LINE_INSTRUCTION: &str = "\
    Begin your reply with a single line of the exact form `Rating: N/10`, \
    where N is a whole number from 0 to 10. \
    Put all feedback and suggestions on the lines that follow.";
