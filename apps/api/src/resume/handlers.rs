use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::resume::{
    EntryId, EntrySection, PersonalField, Section, SectionValue, SkillCategory,
};
use crate::models::settings::{ProofField, ProofLinks, Template};
use crate::resume::migration::upgrade_legacy_projects;
use crate::resume::scoring::ScoreResult;
use crate::resume::session::ResumeView;
use crate::resume::validation::{validate_document, ValidationReport};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PersonalUpdate {
    pub field: PersonalField,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct SkillRequest {
    pub skill: String,
}

#[derive(Debug, Deserialize)]
pub struct TechTagRequest {
    pub tag: String,
}

#[derive(Debug, Deserialize)]
pub struct TemplateRequest {
    pub template: String,
}

#[derive(Debug, Deserialize)]
pub struct ProofUpdate {
    pub field: ProofField,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct NewEntryResponse {
    pub id: EntryId,
    #[serde(flatten)]
    pub view: ResumeView,
}

#[derive(Debug, Serialize)]
pub struct TemplateResponse {
    pub template: Template,
    pub available: [Template; 3],
}

#[derive(Debug, Serialize)]
pub struct ProofResponse {
    pub links: ProofLinks,
    pub complete: bool,
    pub submission_text: String,
}

fn parse_section(name: &str) -> Result<Section, AppError> {
    Section::from_name(name).ok_or_else(|| AppError::NotFound(format!("Unknown section '{name}'")))
}

fn parse_entry_section(name: &str) -> Result<EntrySection, AppError> {
    EntrySection::from_name(name)
        .ok_or_else(|| AppError::NotFound(format!("Section '{name}' has no entries")))
}

fn parse_category(name: &str) -> Result<SkillCategory, AppError> {
    SkillCategory::from_name(name)
        .ok_or_else(|| AppError::NotFound(format!("Unknown skill category '{name}'")))
}

fn proof_response(links: &ProofLinks) -> ProofResponse {
    ProofResponse {
        links: links.clone(),
        complete: links.is_complete(),
        submission_text: links.submission_text(),
    }
}

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<ResumeView> {
    Json(state.session.lock().await.view())
}

/// GET /api/v1/resume/score
pub async fn handle_get_score(State(state): State<AppState>) -> Json<ScoreResult> {
    Json(state.session.lock().await.score().clone())
}

/// GET /api/v1/resume/validation
pub async fn handle_validate(State(state): State<AppState>) -> Json<ValidationReport> {
    let session = state.session.lock().await;
    Json(validate_document(session.document()))
}

/// PATCH /api/v1/resume/personal
pub async fn handle_update_personal(
    State(state): State<AppState>,
    Json(req): Json<PersonalUpdate>,
) -> Json<ResumeView> {
    let mut session = state.session.lock().await;
    session.set_personal_field(req.field, req.value).await;
    Json(session.view())
}

/// PUT /api/v1/resume/sections/:section
pub async fn handle_replace_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
    Json(mut raw): Json<Value>,
) -> Result<Json<ResumeView>, AppError> {
    let section = parse_section(&section)?;
    if section == Section::Projects {
        upgrade_legacy_projects(&mut raw);
    }
    let value = SectionValue::decode(section, raw).map_err(|e| {
        AppError::Validation(format!("Invalid value for '{}': {e}", section.as_str()))
    })?;
    let mut session = state.session.lock().await;
    session.replace_section(value).await;
    Ok(Json(session.view()))
}

/// POST /api/v1/resume/sample
pub async fn handle_load_sample(State(state): State<AppState>) -> Json<ResumeView> {
    let mut session = state.session.lock().await;
    session.load_sample().await;
    Json(session.view())
}

/// POST /api/v1/resume/entries/:section
pub async fn handle_add_entry(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Result<Json<NewEntryResponse>, AppError> {
    let section = parse_entry_section(&section)?;
    let mut session = state.session.lock().await;
    let id = session.add_entry(section).await;
    Ok(Json(NewEntryResponse {
        id,
        view: session.view(),
    }))
}

/// DELETE /api/v1/resume/entries/:section/:id
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    Path((section, id)): Path<(String, EntryId)>,
) -> Result<Json<ResumeView>, AppError> {
    let section = parse_entry_section(&section)?;
    let mut session = state.session.lock().await;
    session.remove_entry(section, id).await;
    Ok(Json(session.view()))
}

/// POST /api/v1/resume/skills/:category
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Json(req): Json<SkillRequest>,
) -> Result<Json<ResumeView>, AppError> {
    let category = parse_category(&category)?;
    let mut session = state.session.lock().await;
    session.add_skill(category, &req.skill).await;
    Ok(Json(session.view()))
}

/// DELETE /api/v1/resume/skills/:category/:index
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path((category, index)): Path<(String, usize)>,
) -> Result<Json<ResumeView>, AppError> {
    let category = parse_category(&category)?;
    let mut session = state.session.lock().await;
    session.remove_skill(category, index).await;
    Ok(Json(session.view()))
}

/// POST /api/v1/resume/suggested-skills
pub async fn handle_suggest_skills(State(state): State<AppState>) -> Json<ResumeView> {
    let mut session = state.session.lock().await;
    session.apply_suggested_skills().await;
    Json(session.view())
}

/// POST /api/v1/resume/projects/:id/tech
pub async fn handle_add_tech_tag(
    State(state): State<AppState>,
    Path(project): Path<EntryId>,
    Json(req): Json<TechTagRequest>,
) -> Json<ResumeView> {
    let mut session = state.session.lock().await;
    session.add_tech_tag(project, &req.tag).await;
    Json(session.view())
}

/// DELETE /api/v1/resume/projects/:id/tech/:index
pub async fn handle_remove_tech_tag(
    State(state): State<AppState>,
    Path((project, index)): Path<(EntryId, usize)>,
) -> Json<ResumeView> {
    let mut session = state.session.lock().await;
    session.remove_tech_tag(project, index).await;
    Json(session.view())
}

/// GET /api/v1/template
pub async fn handle_get_template(State(state): State<AppState>) -> Json<TemplateResponse> {
    let template = state.session.lock().await.template();
    Json(TemplateResponse {
        template,
        available: Template::ALL,
    })
}

/// PUT /api/v1/template
pub async fn handle_set_template(
    State(state): State<AppState>,
    Json(req): Json<TemplateRequest>,
) -> Result<Json<TemplateResponse>, AppError> {
    let template = Template::from_name(&req.template)
        .ok_or_else(|| AppError::Validation(format!("Unknown template '{}'", req.template)))?;
    state.session.lock().await.set_template(template).await;
    Ok(Json(TemplateResponse {
        template,
        available: Template::ALL,
    }))
}

/// GET /api/v1/proof
pub async fn handle_get_proof(State(state): State<AppState>) -> Json<ProofResponse> {
    let session = state.session.lock().await;
    Json(proof_response(session.proof()))
}

/// PATCH /api/v1/proof
pub async fn handle_update_proof(
    State(state): State<AppState>,
    Json(req): Json<ProofUpdate>,
) -> Json<ProofResponse> {
    let mut session = state.session.lock().await;
    session.set_proof_link(req.field, req.value).await;
    Json(proof_response(session.proof()))
}
