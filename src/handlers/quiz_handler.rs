use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{
        CreateQuizRequest, ListQuizzesQuery, UpdateSettingsRequest, UpdateTitleRequest,
    },
};

#[get("/api/quizzes")]
pub async fn list_quizzes(
    state: web::Data<AppState>,
    query: web::Query<ListQuizzesQuery>,
) -> Result<HttpResponse, AppError> {
    let summaries = state.quiz_service.list_quizzes(&query.into_inner()).await;
    Ok(HttpResponse::Ok().json(summaries))
}

#[post("/api/quizzes")]
pub async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<CreateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let quiz = state
        .quiz_service
        .create_quiz(request.into_inner().title)
        .await?;
    Ok(HttpResponse::Created().json(quiz))
}

#[get("/api/quizzes/{id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[delete("/api/quizzes/{id}")]
pub async fn delete_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.quiz_service.delete_quiz(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/api/quizzes/{id}/duplicate")]
pub async fn duplicate_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let copy = state.quiz_service.duplicate_quiz(&id).await?;
    Ok(HttpResponse::Created().json(copy))
}

#[post("/api/quizzes/{id}/favorite")]
pub async fn toggle_favorite(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.toggle_favorite(&id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[put("/api/quizzes/{id}/title")]
pub async fn update_title(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateTitleRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let quiz = state.quiz_service.update_title(&id, &request.title).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[put("/api/quizzes/{id}/settings")]
pub async fn update_settings(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateSettingsRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let quiz = state
        .quiz_service
        .update_settings(&id, &request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[get("/api/quizzes/{id}/results")]
pub async fn quiz_results(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let results = state.session_service.results(&id).await?;
    Ok(HttpResponse::Ok().json(results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::{make_state, read_json};
    use actix_web::{test, App};

    #[actix_web::test]
    async fn create_then_get_round_trip() {
        let state = make_state();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(create_quiz)
                .service(get_quiz),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/quizzes")
            .set_json(serde_json::json!({ "title": "Minha pesquisa" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
        let created = read_json(resp).await;
        let id = created["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri(&format!("/api/quizzes/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let fetched = read_json(resp).await;
        assert_eq!(fetched["title"], "Minha pesquisa");
    }

    #[actix_web::test]
    async fn get_missing_quiz_is_404() {
        let state = make_state();
        let app = test::init_service(App::new().app_data(state).service(get_quiz)).await;

        let req = test::TestRequest::get()
            .uri("/api/quizzes/missing")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn listing_reflects_created_quizzes() {
        let state = make_state();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(create_quiz)
                .service(list_quizzes),
        )
        .await;

        for title in ["A", "B"] {
            let req = test::TestRequest::post()
                .uri("/api/quizzes")
                .set_json(serde_json::json!({ "title": title }))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get().uri("/api/quizzes").to_request();
        let resp = test::call_service(&app, req).await;
        let listed = read_json(resp).await;
        assert_eq!(listed.as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn delete_then_listing_is_empty() {
        let state = make_state();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(create_quiz)
                .service(delete_quiz)
                .service(list_quizzes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/quizzes")
            .set_json(serde_json::json!({}))
            .to_request();
        let created = read_json(test::call_service(&app, req).await).await;
        let id = created["id"].as_str().unwrap();

        let req = test::TestRequest::delete()
            .uri(&format!("/api/quizzes/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::NO_CONTENT);

        let req = test::TestRequest::get().uri("/api/quizzes").to_request();
        let listed = read_json(test::call_service(&app, req).await).await;
        assert!(listed.as_array().unwrap().is_empty());
    }
}
