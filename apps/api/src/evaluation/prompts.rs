// All chat prompt templates for the evaluation panels.
// Placeholders in `{braces}` are filled by `render` in a single pass.
// Rated prompts get `llm_client::prompts::RATING_LINE_INSTRUCTION` appended.

/// CV match prompt. Replace: {job_description}, {cv_text}
pub const CV_MATCH_PROMPT_TEMPLATE: &str = "Evaluate this CV against the following job description. \
Provide a detailed rating out of 10, specific feedback, and suggestions for improving the CV \
to better match the role:\n\nJob Description:\n{job_description}\n\nCV:\n{cv_text}";

/// Case study generation prompt.
/// Replace: {years_of_experience}, {industry}, {difficulty}, {job_description}
pub const CASE_STUDY_GENERATION_PROMPT_TEMPLATE: &str = "Based on the following job description and \
{years_of_experience} years of experience in the {industry} industry, generate a set of case study \
questions. Ensure the questions reflect a {difficulty} difficulty level and challenge critical thinking. \
Additionally, provide suggestions for how these questions could assess key competencies relevant \
to the role:\n\nJob Description:\n{job_description}";

/// Case study answer evaluation prompt. Replace: {question}, {answer}
pub const CASE_STUDY_EVALUATION_PROMPT_TEMPLATE: &str = "Evaluate the following case study question \
and answer. Provide a rating out of 10, detailed feedback on the strengths and weaknesses of the \
response, and suggestions for improvement:\n\nQuestion:\n{question}\n\nAnswer:\n{answer}";

/// Question/solution document comparison prompt. Replace: {question_text}, {solution_text}
pub const DOCUMENT_COMPARISON_PROMPT_TEMPLATE: &str = "Compare the following question document with \
the solution document. Provide detailed feedback on the alignment between the two, a rating out of 10, \
and specific suggestions for improving the solution document based on the question:\n\n\
Question Document:\n{question_text}\n\nSolution Document:\n{solution_text}";

/// Fills `{name}` placeholders in one left-to-right pass. Substituted values
/// are never rescanned; unknown `{...}` sequences are kept as-is.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, value)| value.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let filled = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (close, *value))
        });
        match filled {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
