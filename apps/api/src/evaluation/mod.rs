//! Evaluation pipeline: prompt assembly → chat call → response parsing →
//! rating classification.
//!
//! All chat calls go through `llm_client::ChatCompletion` — no direct HTTP here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::llm_client::prompts::RATING_LINE_INSTRUCTION;
use crate::llm_client::{ChatCompletion, ChatError};

pub mod parser;
pub mod prompts;
pub mod rating;

use parser::parse_rated_reply;
use prompts::{
    render, CASE_STUDY_EVALUATION_PROMPT_TEMPLATE, CASE_STUDY_GENERATION_PROMPT_TEMPLATE,
    CV_MATCH_PROMPT_TEMPLATE, DOCUMENT_COMPARISON_PROMPT_TEMPLATE,
};
use rating::RatingLabel;

/// Difficulty level requested for generated case study questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Intermediate,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Rendered result of a rated panel (CV match, case study evaluation,
/// document comparison).
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub evaluation_id: Uuid,
    /// `None` when the reply carried no `Rating: N/10` line.
    pub rating: Option<u32>,
    pub feedback: String,
    pub label: Option<RatingLabel>,
    pub label_emoji: Option<&'static str>,
    pub evaluated_at: DateTime<Utc>,
}

impl EvaluationReport {
    /// Parses a raw assistant reply and classifies its rating.
    pub fn from_reply(reply: &str) -> Self {
        let parsed = parse_rated_reply(reply);
        let label = parsed.rating.map(RatingLabel::classify);
        Self {
            evaluation_id: Uuid::new_v4(),
            rating: parsed.rating,
            feedback: parsed.feedback,
            label,
            label_emoji: label.map(|l| l.emoji()),
            evaluated_at: Utc::now(),
        }
    }
}

/// Rendered result of the case study generation panel. Content is unparsed.
#[derive(Debug, Clone, Serialize)]
pub struct CaseStudyQuestions {
    pub generation_id: Uuid,
    pub difficulty: Difficulty,
    pub questions: String,
    pub generated_at: DateTime<Utc>,
}

fn rated(prompt: String) -> String {
    format!("{prompt}\n\n{RATING_LINE_INSTRUCTION}")
}

pub fn build_cv_match_prompt(cv_text: &str, job_description: &str) -> String {
    rated(render(
        CV_MATCH_PROMPT_TEMPLATE,
        &[("job_description", job_description), ("cv_text", cv_text)],
    ))
}

pub fn build_case_study_generation_prompt(
    job_description: &str,
    years_of_experience: &str,
    industry: &str,
    difficulty: Difficulty,
) -> String {
    render(
        CASE_STUDY_GENERATION_PROMPT_TEMPLATE,
        &[
            ("years_of_experience", years_of_experience),
            ("industry", industry),
            ("difficulty", difficulty.as_str()),
            ("job_description", job_description),
        ],
    )
}

pub fn build_case_study_evaluation_prompt(question: &str, answer: &str) -> String {
    rated(render(
        CASE_STUDY_EVALUATION_PROMPT_TEMPLATE,
        &[("question", question), ("answer", answer)],
    ))
}

pub fn build_document_comparison_prompt(question_text: &str, solution_text: &str) -> String {
    rated(render(
        DOCUMENT_COMPARISON_PROMPT_TEMPLATE,
        &[("question_text", question_text), ("solution_text", solution_text)],
    ))
}

/// Asks the model to rate a CV against a job description. Returns the raw reply.
pub async fn evaluate_cv_match(
    chat: &dyn ChatCompletion,
    cv_text: &str,
    job_description: &str,
) -> Result<String, ChatError> {
    info!(
        "Evaluating CV match: cv_chars={}, jd_chars={}",
        cv_text.len(),
        job_description.len()
    );
    chat.complete(&build_cv_match_prompt(cv_text, job_description))
        .await
}

/// Asks the model for case study questions. Returns the raw reply, unparsed.
pub async fn generate_case_study_questions(
    chat: &dyn ChatCompletion,
    job_description: &str,
    years_of_experience: &str,
    industry: &str,
    difficulty: Difficulty,
) -> Result<String, ChatError> {
    info!(
        "Generating case study questions: difficulty={}, jd_chars={}",
        difficulty.as_str(),
        job_description.len()
    );
    let prompt = build_case_study_generation_prompt(
        job_description,
        years_of_experience,
        industry,
        difficulty,
    );
    chat.complete(&prompt).await
}

/// Asks the model to rate a case study answer. Returns the raw reply.
pub async fn evaluate_case_study_answer(
    chat: &dyn ChatCompletion,
    question: &str,
    answer: &str,
) -> Result<String, ChatError> {
    info!(
        "Evaluating case study answer: question_chars={}, answer_chars={}",
        question.len(),
        answer.len()
    );
    chat.complete(&build_case_study_evaluation_prompt(question, answer))
        .await
}

/// Asks the model to rate how well a solution document answers a question
/// document. Returns the raw reply.
pub async fn compare_documents(
    chat: &dyn ChatCompletion,
    question_text: &str,
    solution_text: &str,
) -> Result<String, ChatError> {
    info!(
        "Comparing documents: question_chars={}, solution_chars={}",
        question_text.len(),
        solution_text.len()
    );
    chat.complete(&build_document_comparison_prompt(question_text, solution_text))
        .await
}
