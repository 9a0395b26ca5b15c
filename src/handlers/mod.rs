pub mod editor_handler;
pub mod quiz_handler;
pub mod session_handler;

use actix_web::web;

/// Mounts every route on the app; `main` and the integration tests share it.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(quiz_handler::list_quizzes)
        .service(quiz_handler::create_quiz)
        .service(quiz_handler::get_quiz)
        .service(quiz_handler::delete_quiz)
        .service(quiz_handler::duplicate_quiz)
        .service(quiz_handler::toggle_favorite)
        .service(quiz_handler::update_title)
        .service(quiz_handler::update_settings)
        .service(quiz_handler::quiz_results)
        .service(editor_handler::add_step)
        .service(editor_handler::remove_step)
        .service(editor_handler::update_step)
        .service(editor_handler::add_component)
        .service(editor_handler::update_component)
        .service(editor_handler::remove_component)
        .service(editor_handler::reorder_components)
        .service(session_handler::start_session)
        .service(session_handler::get_session)
        .service(session_handler::interact)
        .service(session_handler::go_back)
        .service(session_handler::restart);
}
