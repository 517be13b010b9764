use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::counselor::{AiContext, CounselorReply, PromptMode};
use crate::errors::AppError;
use crate::state::AppState;

const MAX_CONTEXT_FIELD: usize = 5000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounselRequest {
    #[serde(default)]
    pub mode: String,
    pub context: Option<AiContext>,
    /// Used only when `context` is omitted.
    #[serde(default)]
    pub target_role: String,
    #[serde(default)]
    pub question: Option<String>,
}

/// POST /api/ai/counsel
///
/// Model failures are answered with the mode's static reply, never an error.
pub async fn handle_counsel(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CounselRequest>,
) -> Result<Json<CounselorReply>, AppError> {
    let mode: PromptMode = request.mode.parse()?;

    let mut context = match request.context {
        Some(ctx) => ctx,
        None => {
            let resume = state.resumes.load(&user.uid).await?;
            match resume {
                Some(stored) => AiContext::from_resume(&stored.resume, request.target_role),
                None => AiContext {
                    target_role: request.target_role,
                    ..Default::default()
                },
            }
        }
    };
    if context.question.is_none() {
        context.question = request.question;
    }
    validate_context(&context)?;

    Ok(Json(state.counselor.respond(mode, &context).await))
}

fn validate_context(ctx: &AiContext) -> Result<(), AppError> {
    let over = |s: &str| s.chars().count() > MAX_CONTEXT_FIELD;
    let too_long = over(&ctx.experience)
        || over(&ctx.target_role)
        || ctx.question.as_deref().is_some_and(over)
        || ctx
            .skills
            .iter()
            .chain(ctx.projects.iter())
            .any(|s| over(s));
    if too_long {
        return Err(AppError::Validation(format!(
            "context fields must be at most {MAX_CONTEXT_FIELD} characters"
        )));
    }
    Ok(())
}
