//! Axum route handlers for the four panels.

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::{
    compare_documents, evaluate_case_study_answer, evaluate_cv_match,
    generate_case_study_questions, CaseStudyQuestions, Difficulty, EvaluationReport,
};
use crate::extraction::MediaType;
use crate::forms::upload::{extract_text, require_media_type, UploadForm};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateCaseStudyRequest {
    pub job_description: String,
    /// Free text, passed through unvalidated.
    #[serde(default)]
    pub years_of_experience: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub difficulty: Difficulty,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateCaseStudyRequest {
    pub question: String,
    pub answer: String,
}

const CV_TYPES: &[MediaType] = &[MediaType::Pdf, MediaType::WordDocument];
const COMPARISON_TYPES: &[MediaType] = &[
    MediaType::Pdf,
    MediaType::WordDocument,
    MediaType::Presentation,
];

fn require_text(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cv-match
///
/// Multipart: `cv` (PDF or Word file) and `job_description` (text).
/// Extracts the CV, asks for a rated match, and returns the parsed report.
pub async fn handle_cv_match(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EvaluationReport>, AppError> {
    let mut form = UploadForm::read(multipart).await?;

    let job_description = form.text("job_description").unwrap_or_default().to_string();
    require_text(&job_description, "job_description")?;

    let cv = form
        .take_file("cv")
        .ok_or_else(|| AppError::Validation("cv file is required".to_string()))?;
    require_media_type(&cv, CV_TYPES, "a PDF or Word document")?;

    info!("CV match requested for {}", cv.display_name());
    let cv_name = cv.display_name().to_string();
    let cv_text = extract_text(cv).await?;
    if cv_text.trim().is_empty() {
        return Err(AppError::EmptyExtraction(format!(
            "no text found in CV '{cv_name}'"
        )));
    }

    let reply = evaluate_cv_match(state.chat.as_ref(), &cv_text, &job_description).await?;
    Ok(Json(EvaluationReport::from_reply(&reply)))
}

/// POST /api/v1/case-studies/generate
///
/// Returns the generated questions as raw text; no rating is parsed.
pub async fn handle_generate_case_study(
    State(state): State<AppState>,
    Json(request): Json<GenerateCaseStudyRequest>,
) -> Result<Json<CaseStudyQuestions>, AppError> {
    require_text(&request.job_description, "job_description")?;

    let questions = generate_case_study_questions(
        state.chat.as_ref(),
        &request.job_description,
        &request.years_of_experience,
        &request.industry,
        request.difficulty,
    )
    .await?;

    Ok(Json(CaseStudyQuestions {
        generation_id: Uuid::new_v4(),
        difficulty: request.difficulty,
        questions,
        generated_at: Utc::now(),
    }))
}

/// POST /api/v1/case-studies/evaluate
pub async fn handle_evaluate_case_study(
    State(state): State<AppState>,
    Json(request): Json<EvaluateCaseStudyRequest>,
) -> Result<Json<EvaluationReport>, AppError> {
    require_text(&request.question, "question")?;
    require_text(&request.answer, "answer")?;

    let reply =
        evaluate_case_study_answer(state.chat.as_ref(), &request.question, &request.answer)
            .await?;
    Ok(Json(EvaluationReport::from_reply(&reply)))
}

/// POST /api/v1/documents/compare
///
/// Multipart: `question_doc` and `solution_doc` (PDF, Word, or PowerPoint).
/// Both documents must yield text before the chat API is called.
pub async fn handle_compare_documents(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EvaluationReport>, AppError> {
    let mut form = UploadForm::read(multipart).await?;

    let mut texts = Vec::with_capacity(2);
    for field in ["question_doc", "solution_doc"] {
        let document = form
            .take_file(field)
            .ok_or_else(|| AppError::Validation(format!("{field} file is required")))?;
        require_media_type(&document, COMPARISON_TYPES, "a PDF, Word, or PowerPoint document")?;

        let name = document.display_name().to_string();
        let text = extract_text(document).await?;
        if text.trim().is_empty() {
            return Err(AppError::EmptyExtraction(format!(
                "no text found in {field} '{name}'"
            )));
        }
        texts.push(text);
    }

    info!("Document comparison requested");
    let reply = compare_documents(state.chat.as_ref(), &texts[0], &texts[1]).await?;
    Ok(Json(EvaluationReport::from_reply(&reply)))
}
