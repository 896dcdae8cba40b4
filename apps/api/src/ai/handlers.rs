//! AI-proxy routes. Thin pass-throughs to the generative API; when no key is
//! configured they serve canned fallback content instead of failing.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ai::{prompts, GenAiError};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsRequest {
    pub action: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub employee_role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProfile {
    pub name: String,
    pub role: String,
    pub profile_url: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum InsightsResponse {
    Employees { employees: Vec<EmployeeProfile> },
    Message { message: String },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsRequest {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralSuggestion {
    pub name: String,
    pub title: String,
    pub department: String,
    pub years_at_company: u32,
    pub linkedin_url: String,
    pub summary: String,
    pub why_contact: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsResponse {
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    pub suggestions: Vec<ReferralSuggestion>,
    pub disclaimer: String,
}

const DISCLAIMER: &str = "These are AI-generated suggestions based on typical company structures. \
Please verify profiles on LinkedIn before reaching out.";

fn profile(name: &str, role: &str, slug: &str) -> EmployeeProfile {
    EmployeeProfile {
        name: name.to_string(),
        role: role.to_string(),
        profile_url: format!("https://linkedin.com/in/{slug}"),
    }
}

fn fallback_employees() -> Vec<EmployeeProfile> {
    vec![
        profile("John Doe", "Software Engineer", "johndoe-example"),
        profile("Sarah Smith", "Talent Acquisition", "sarahsmith-example"),
        profile("Mike Johnson", "Engineering Manager", "mikejohnson-example"),
    ]
}

/// Served when the model answers with something that is not parseable JSON.
fn unparseable_employees() -> Vec<EmployeeProfile> {
    vec![
        profile("Alex Rivera", "Senior Developer", "alex-rivera"),
        profile("Casey Jordan", "Tech Lead", "casey-jordan"),
    ]
}

fn fallback_message(req: &InsightsRequest) -> String {
    let name = req.employee_name.as_deref().unwrap_or("there");
    let role = req.employee_role.as_deref().unwrap_or("Current Role");
    let company = req.company.as_deref().unwrap_or_default();
    let job_title = req.job_title.as_deref().unwrap_or_default();
    format!(
        "Hi {name},\n\nI noticed you're working as a {role} at {company}, and I've been \
        following the company's work in [mention specific achievement if possible].\n\n\
        I recently saw an opening for the {job_title} position and believe my background \
        would be a great fit. I would really appreciate it if you could refer me for this \
        role or spare a few minutes to chat about your experience at {company}.\n\n\
        Here is my portfolio/resume link: [Link]\n\nBest regards,\n[Your Name]"
    )
}

fn fallback_suggestions(company: &str) -> Vec<ReferralSuggestion> {
    vec![
        ReferralSuggestion {
            name: "Priya Raman".to_string(),
            title: "Senior Software Engineer".to_string(),
            department: "Platform Engineering".to_string(),
            years_at_company: 4,
            linkedin_url: "https://linkedin.com/in/priya-raman".to_string(),
            summary: format!(
                "Backend engineer on the platform team at {company}, working on service \
                reliability and developer tooling."
            ),
            why_contact: "Regularly refers engineers into her own team.".to_string(),
        },
        ReferralSuggestion {
            name: "Marcus Webb".to_string(),
            title: "Engineering Manager".to_string(),
            department: "Product Engineering".to_string(),
            years_at_company: 6,
            linkedin_url: "https://linkedin.com/in/marcus-webb".to_string(),
            summary: format!(
                "Leads a product engineering group at {company} and is involved in hiring \
                across several teams."
            ),
            why_contact: "Hiring manager for multiple open roles.".to_string(),
        },
        ReferralSuggestion {
            name: "Elena Fischer".to_string(),
            title: "Technical Recruiter".to_string(),
            department: "Talent Acquisition".to_string(),
            years_at_company: 3,
            linkedin_url: "https://linkedin.com/in/elena-fischer".to_string(),
            summary: format!(
                "Recruits for engineering roles at {company} and responds quickly to \
                candidate outreach."
            ),
            why_contact: "First point of contact for the referral pipeline.".to_string(),
        },
    ]
}

/// POST /api/ai-insights
pub async fn ai_insights(
    State(state): State<AppState>,
    Json(req): Json<InsightsRequest>,
) -> Result<Json<InsightsResponse>, AppError> {
    match req.action.as_str() {
        "find_employees" => {
            if !state.ai.has_key() {
                return Ok(Json(InsightsResponse::Employees {
                    employees: fallback_employees(),
                }));
            }
            let company = req.company.as_deref().unwrap_or_default();
            let prompt = prompts::find_employees(company);
            match state.ai.generate_json::<Vec<EmployeeProfile>>(&prompt).await {
                Ok(employees) => Ok(Json(InsightsResponse::Employees { employees })),
                Err(GenAiError::Parse(e)) => {
                    warn!("Model returned unparseable employee JSON: {e}");
                    Ok(Json(InsightsResponse::Employees {
                        employees: unparseable_employees(),
                    }))
                }
                Err(e) => Err(AppError::Ai(e.to_string())),
            }
        }
        "generate_message" => {
            if !state.ai.has_key() {
                return Ok(Json(InsightsResponse::Message {
                    message: fallback_message(&req),
                }));
            }
            let prompt = prompts::referral_message(
                req.job_title.as_deref().unwrap_or_default(),
                req.company.as_deref().unwrap_or_default(),
                req.location.as_deref().unwrap_or_default(),
                req.employee_name.as_deref().unwrap_or_default(),
                req.employee_role.as_deref().unwrap_or_default(),
            );
            let message = state
                .ai
                .generate(&prompt)
                .await
                .map_err(|e| AppError::Ai(e.to_string()))?;
            Ok(Json(InsightsResponse::Message { message }))
        }
        _ => Err(AppError::BadRequest("Invalid action".to_string())),
    }
}

/// POST /api/referral-suggestions
pub async fn referral_suggestions(
    State(state): State<AppState>,
    Json(req): Json<SuggestionsRequest>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let company = req
        .company
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("Company name is required".to_string()))?
        .to_string();

    let suggestions = if state.ai.has_key() {
        let prompt = prompts::referral_suggestions(&company, req.job_title.as_deref());
        state
            .ai
            .generate_json::<Vec<ReferralSuggestion>>(&prompt)
            .await
            .map_err(|e| AppError::Ai(e.to_string()))?
    } else {
        fallback_suggestions(&company)
    };

    Ok(Json(SuggestionsResponse {
        company,
        job_title: req.job_title,
        suggestions,
        disclaimer: DISCLAIMER.to_string(),
    }))
}
