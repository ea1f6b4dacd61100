pub mod question_service;
pub mod scoring;
