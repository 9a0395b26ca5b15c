use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{InteractionRequest, StartSessionRequest},
};

#[post("/api/sessions")]
pub async fn start_session(
    state: web::Data<AppState>,
    request: web::Json<StartSessionRequest>,
) -> Result<HttpResponse, AppError> {
    let view = state
        .session_service
        .start(&request.quiz_id, request.mode)
        .await?;
    Ok(HttpResponse::Created().json(view))
}

#[get("/api/sessions/{id}")]
pub async fn get_session(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let view = state.session_service.view(&id).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[post("/api/sessions/{id}/interactions")]
pub async fn interact(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<InteractionRequest>,
) -> Result<HttpResponse, AppError> {
    let view = state
        .session_service
        .interact(&id, &request.component_id, request.option_id.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

#[post("/api/sessions/{id}/back")]
pub async fn go_back(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let view = state.session_service.back(&id).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[post("/api/sessions/{id}/restart")]
pub async fn restart(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let view = state.session_service.restart(&id).await?;
    Ok(HttpResponse::Ok().json(view))
}
