pub mod admin_handler;
pub mod health_handler;
pub mod quiz_handler;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::{auth::AuthMiddleware, errors::AppError};

/// Malformed JSON bodies are reported as `InvalidInput` with the usual error body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        AppError::InvalidInput(err.to_string()).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_handler::health_check)
        .service(health_handler::health_check_ready)
        .service(health_handler::health_check_live)
        .service(
            web::scope("/api/quizzes")
                .service(web::resource("").route(web::get().to(quiz_handler::get_quiz)))
                .service(quiz_handler::submit_quiz)
                .service(admin_handler::issue_dev_token)
                .service(
                    web::scope("/admin/questions")
                        .wrap(AuthMiddleware)
                        .service(
                            web::resource("")
                                .route(web::post().to(admin_handler::create_question)),
                        )
                        .service(admin_handler::update_question)
                        .service(admin_handler::delete_question),
                ),
        );
}
