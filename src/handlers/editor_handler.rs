use actix_web::{delete, patch, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{
        AddComponentRequest, ComponentPatch, EditorSelection, ReorderComponentsRequest, StepPatch,
    },
    services::Selection,
};

impl From<EditorSelection> for Selection {
    fn from(body: EditorSelection) -> Self {
        Selection {
            step_id: body.selected_step_id,
            component_id: body.selected_component_id,
        }
    }
}

#[post("/api/quizzes/{id}/steps")]
pub async fn add_step(
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Json<EditorSelection>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .editor_service
        .add_step(&id, body.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(response))
}

#[delete("/api/quizzes/{id}/steps/{step_id}")]
pub async fn remove_step(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Json<EditorSelection>,
) -> Result<HttpResponse, AppError> {
    let (id, step_id) = path.into_inner();
    let response = state
        .editor_service
        .remove_step(&id, &step_id, body.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[patch("/api/quizzes/{id}/steps/{step_id}")]
pub async fn update_step(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Json<StepPatch>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let (id, step_id) = path.into_inner();
    let response = state
        .editor_service
        .update_step(
            &id,
            &step_id,
            &body.into_inner(),
            Selection {
                step_id: Some(step_id.clone()),
                component_id: None,
            },
        )
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/quizzes/{id}/steps/{step_id}/components")]
pub async fn add_component(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Json<AddComponentRequest>,
) -> Result<HttpResponse, AppError> {
    let (id, step_id) = path.into_inner();
    let body = body.into_inner();
    let selection = Selection {
        step_id: body.selected_step_id.or_else(|| Some(step_id.clone())),
        component_id: body.selected_component_id,
    };
    let response = state
        .editor_service
        .add_component(&id, &step_id, body.kind, selection)
        .await?;
    Ok(HttpResponse::Created().json(response))
}

#[patch("/api/quizzes/{id}/steps/{step_id}/components/{component_id}")]
pub async fn update_component(
    state: web::Data<AppState>,
    path: web::Path<(String, String, String)>,
    body: web::Json<ComponentPatch>,
) -> Result<HttpResponse, AppError> {
    let (id, step_id, component_id) = path.into_inner();
    let response = state
        .editor_service
        .update_component(
            &id,
            &step_id,
            &component_id,
            &body.into_inner(),
            Selection {
                step_id: Some(step_id.clone()),
                component_id: Some(component_id.clone()),
            },
        )
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/api/quizzes/{id}/steps/{step_id}/components/{component_id}")]
pub async fn remove_component(
    state: web::Data<AppState>,
    path: web::Path<(String, String, String)>,
    body: web::Json<EditorSelection>,
) -> Result<HttpResponse, AppError> {
    let (id, step_id, component_id) = path.into_inner();
    let response = state
        .editor_service
        .remove_component(&id, &step_id, &component_id, body.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/quizzes/{id}/steps/{step_id}/components/reorder")]
pub async fn reorder_components(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Json<ReorderComponentsRequest>,
) -> Result<HttpResponse, AppError> {
    let (id, step_id) = path.into_inner();
    let response = state
        .editor_service
        .reorder_components(
            &id,
            &step_id,
            body.from_index,
            body.to_index,
            Selection {
                step_id: Some(step_id.clone()),
                component_id: None,
            },
        )
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::quiz_handler::create_quiz;
    use crate::test_utils::test_helpers::{make_state, read_json};
    use actix_web::{test, App};

    #[actix_web::test]
    async fn add_step_returns_selection_on_new_step() {
        let state = make_state();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(create_quiz)
                .service(add_step),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/quizzes")
            .set_json(serde_json::json!({}))
            .to_request();
        let quiz = read_json(test::call_service(&app, req).await).await;
        let id = quiz["id"].as_str().unwrap();

        let req = test::TestRequest::post()
            .uri(&format!("/api/quizzes/{}/steps", id))
            .set_json(serde_json::json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);

        let body = read_json(resp).await;
        assert_eq!(body["quiz"]["steps"].as_array().unwrap().len(), 2);
        assert_eq!(body["selectedStepId"], body["quiz"]["steps"][1]["id"]);
    }

    #[actix_web::test]
    async fn component_lifecycle_over_http() {
        let state = make_state();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(create_quiz)
                .service(add_component)
                .service(update_component)
                .service(remove_component),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/quizzes")
            .set_json(serde_json::json!({}))
            .to_request();
        let quiz = read_json(test::call_service(&app, req).await).await;
        let quiz_id = quiz["id"].as_str().unwrap();
        let step_id = quiz["steps"][0]["id"].as_str().unwrap();

        let req = test::TestRequest::post()
            .uri(&format!(
                "/api/quizzes/{}/steps/{}/components",
                quiz_id, step_id
            ))
            .set_json(serde_json::json!({ "kind": "Button" }))
            .to_request();
        let body = read_json(test::call_service(&app, req).await).await;
        let component_id = body["selectedComponentId"].as_str().unwrap().to_string();
        assert_eq!(body["quiz"]["steps"][0]["components"][0]["type"], "Button");

        // rename the button
        let req = test::TestRequest::patch()
            .uri(&format!(
                "/api/quizzes/{}/steps/{}/components/{}",
                quiz_id, step_id, component_id
            ))
            .set_json(serde_json::json!({ "type": "Button", "text": "Avançar" }))
            .to_request();
        let body = read_json(test::call_service(&app, req).await).await;
        assert_eq!(body["quiz"]["steps"][0]["components"][0]["text"], "Avançar");

        // remove it again
        let req = test::TestRequest::delete()
            .uri(&format!(
                "/api/quizzes/{}/steps/{}/components/{}",
                quiz_id, step_id, component_id
            ))
            .set_json(serde_json::json!({}))
            .to_request();
        let body = read_json(test::call_service(&app, req).await).await;
        assert!(body["quiz"]["steps"][0]["components"]
            .as_array()
            .unwrap()
            .is_empty());
    }

    #[actix_web::test]
    async fn removing_unknown_step_is_404() {
        let state = make_state();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(create_quiz)
                .service(remove_step),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/quizzes")
            .set_json(serde_json::json!({}))
            .to_request();
        let quiz = read_json(test::call_service(&app, req).await).await;
        let id = quiz["id"].as_str().unwrap();

        let req = test::TestRequest::delete()
            .uri(&format!("/api/quizzes/{}/steps/missing", id))
            .set_json(serde_json::json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
