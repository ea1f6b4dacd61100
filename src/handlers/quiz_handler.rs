use actix_web::{post, web, HttpRequest, HttpResponse};
use serde_json::Value;

use crate::{app_state::AppState, errors::AppError, middleware::get_request_id};

/// Random question set without correct answers. Mounted at the scope root.
pub async fn get_quiz(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let quiz = state.question_service.draw_quiz().await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[post("/submit")]
pub async fn submit_quiz(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let report = state.question_service.submit(body.into_inner()).await?;

    log::debug!(
        "Submission [{}] scored {} of {}",
        get_request_id(&req).unwrap_or_default(),
        report.score,
        report.total_questions
    );

    Ok(HttpResponse::Ok().json(report))
}
