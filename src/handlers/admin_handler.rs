use actix_web::{delete, get, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{CreateQuestionRequest, UpdateQuestionRequest},
        response::{DevTokenResponse, MessageResponse, QuestionMutationResponse},
    },
};

/// Issues a short-lived admin token for local testing. Disabled in production.
#[get("/admin/token")]
pub async fn issue_dev_token(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    if !state.config.dev_tokens_enabled {
        return Err(AppError::NotFound("Dev token endpoint is disabled".to_string()));
    }

    let token = state
        .jwt_service
        .create_token(&state.config.admin_subject)?;
    log::warn!("Issued dev admin token for '{}'", state.config.admin_subject);

    Ok(HttpResponse::Ok().json(DevTokenResponse {
        message: "Use this token in the Authorization: Bearer header for admin routes."
            .to_string(),
        token,
        note: format!(
            "Expires in {} hour(s). Issue real tokens from an admin login in production.",
            state.jwt_service.expiration_hours()
        ),
    }))
}

/// Mounted at the root of the admin questions scope.
pub async fn create_question(
    state: web::Data<AppState>,
    request: web::Json<CreateQuestionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let question = state
        .question_service
        .create_question(request.into_inner())
        .await?;
    log::info!("Question {} added by '{}'", question.id, auth.0.sub);

    Ok(HttpResponse::Created().json(QuestionMutationResponse {
        message: "Question added successfully".to_string(),
        question,
    }))
}

#[put("/{id}")]
pub async fn update_question(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateQuestionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let question = state
        .question_service
        .update_question(&id, request.into_inner())
        .await?;
    log::info!("Question {} updated by '{}'", question.id, auth.0.sub);

    Ok(HttpResponse::Ok().json(QuestionMutationResponse {
        message: "Question updated successfully".to_string(),
        question,
    }))
}

#[delete("/{id}")]
pub async fn delete_question(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.question_service.delete_question(&id).await?;
    log::info!("Question {} deleted by '{}'", id, auth.0.sub);

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Question deleted successfully".to_string(),
    }))
}
