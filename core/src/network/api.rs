use actix_web::http::header::{self, ContentType};
use actix_web::web::{Data, Form, Json};
use actix_web::{HttpResponse, Responder, get, post};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::app::App;
use crate::entry::{DeleteForm, EntryForm, FitnessEntry};
use crate::error::AppError;
use crate::export::{CSV_FILE_NAME, to_csv};
use crate::pages;

/**
 * Application API
 *
 *  - `GET  /`              renders the log.
 *  - `POST /add`           appends an entry from the form and redirects to `/`.
 *  - `POST /delete`        removes the first entry with the given date and redirects to `/`.
 *  - `POST /chat`          relays `{message}` to the model, replies `{response}`.
 *  - `GET  /export`        all entries as a csv attachment, 404 when there are none.
 *  - `GET  /stats`         entry count plus first and last entries.
 *  - `GET  /chat`, `/device`, `/documentation` are static pages.
 */

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Stats {
    pub count: usize,
    pub first: Option<FitnessEntry>,
    pub last: Option<FitnessEntry>,
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

fn redirect_home() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

#[get("/")]
pub async fn index(app: Data<App>) -> Result<HttpResponse, AppError> {
    let list = app.entries().await?;
    debug!("rendering {} entries", list.count());
    Ok(html(pages::index_page(list.as_slice())))
}

#[post("/add")]
pub async fn add(app: Data<App>, form: Form<EntryForm>) -> Result<HttpResponse, AppError> {
    let entry = form.into_inner().parse()?;
    let date = entry.date.clone();
    let count = app
        .modify(|list| {
            list.append(entry);
            list.count()
        })
        .await?;
    info!("added entry for {date}, {count} stored");
    Ok(redirect_home())
}

#[post("/delete")]
pub async fn delete(app: Data<App>, form: Form<DeleteForm>) -> Result<HttpResponse, AppError> {
    let date = form.into_inner().date;
    let key = date.clone();
    let removed = app.modify(move |list| list.delete_by_date(&key)).await?;
    if removed {
        info!("deleted entry for {date}");
    } else {
        debug!("no entry for {date} to delete");
    }
    Ok(redirect_home())
}

#[get("/chat")]
pub async fn chat_page() -> impl Responder {
    html(pages::chat_page())
}

#[post("/chat")]
pub async fn chat(app: Data<App>, req: Json<ChatRequest>) -> Result<Json<ChatResponse>, AppError> {
    let response = app.relay.generate(&req.message).await?;
    Ok(Json(ChatResponse { response }))
}

#[get("/device")]
pub async fn device() -> impl Responder {
    html(pages::device_page())
}

#[get("/documentation")]
pub async fn documentation() -> impl Responder {
    html(pages::documentation_page())
}

#[get("/export")]
pub async fn export(app: Data<App>) -> Result<HttpResponse, AppError> {
    let list = app.entries().await?;
    if list.is_empty() {
        return Ok(HttpResponse::NotFound()
            .content_type(ContentType::plaintext())
            .body("No data to export"));
    }

    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{CSV_FILE_NAME}\""),
        ))
        .body(to_csv(list.as_slice())))
}

#[get("/stats")]
pub async fn stats(app: Data<App>) -> Result<Json<Stats>, AppError> {
    let list = app.entries().await?;
    Ok(Json(Stats {
        count: list.count(),
        first: list.first().cloned(),
        last: list.last().cloned(),
    }))
}

#[cfg(test)]
mod tests {
    use super::{ChatResponse, Stats};
    use crate::app::App;
    use crate::chat::ChatRelay;
    use crate::entry::FitnessEntry;
    use crate::error::ChatError;
    use crate::network::configure;
    use crate::store::RecordStore;
    use actix_web::http::{StatusCode, header};
    use actix_web::web::Data;
    use actix_web::dev::ServiceResponse;
    use actix_web::test;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::{TempDir, tempdir};

    struct Echo;

    #[async_trait]
    impl ChatRelay for Echo {
        async fn generate(&self, message: &str) -> Result<String, ChatError> {
            Ok(format!("echo: {message}"))
        }
    }

    struct Down;

    #[async_trait]
    impl ChatRelay for Down {
        async fn generate(&self, _message: &str) -> Result<String, ChatError> {
            Err(ChatError::Status {
                status: 503,
                body: "unavailable".into(),
            })
        }
    }

    fn state(dir: &TempDir, relay: Arc<dyn ChatRelay>) -> Data<App> {
        Data::new(App::new(
            RecordStore::new(dir.path().join("data.json")),
            relay,
        ))
    }

    fn add_req(date: &str, steps: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/add")
            .set_form([
                ("date", date),
                ("steps", steps),
                ("calories", "200"),
                ("distance", "3.5"),
                ("active_minutes", "30"),
            ])
    }

    fn delete_req(date: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/delete")
            .set_form([("date", date)])
    }

    fn assert_redirect(resp: &ServiceResponse) {
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
    }

    #[actix_web::test]
    async fn add_then_delete() {
        let dir = tempdir().unwrap();
        let data = state(&dir, Arc::new(Echo));
        let svc =
            test::init_service(actix_web::App::new().app_data(data.clone()).configure(configure))
                .await;

        let resp = test::call_service(&svc, add_req("2024-01-01", "5000").to_request()).await;
        assert_redirect(&resp);
        let resp = test::call_service(&svc, add_req("2024-01-02", "7000").to_request()).await;
        assert_redirect(&resp);

        let req = test::TestRequest::get().uri("/stats").to_request();
        let stats: Stats = test::call_and_read_body_json(&svc, req).await;
        assert_eq!(stats.count, 2);
        assert_eq!(
            stats.first,
            Some(FitnessEntry::new("2024-01-01", 5000, 200, 3.5, 30))
        );
        assert_eq!(stats.last.unwrap().date, "2024-01-02");

        let resp = test::call_service(&svc, delete_req("2024-01-01").to_request()).await;
        assert_redirect(&resp);

        let remaining = data.store.load();
        assert_eq!(
            remaining,
            vec![FitnessEntry::new("2024-01-02", 7000, 200, 3.5, 30)]
        );

        let req = test::TestRequest::get().uri("/stats").to_request();
        let stats: Stats = test::call_and_read_body_json(&svc, req).await;
        assert_eq!(stats.count, 1);
        assert_eq!(stats.first, stats.last);
    }

    #[actix_web::test]
    async fn delete_unknown_date_keeps_entries() {
        let dir = tempdir().unwrap();
        let data = state(&dir, Arc::new(Echo));
        let svc =
            test::init_service(actix_web::App::new().app_data(data.clone()).configure(configure))
                .await;

        test::call_service(&svc, add_req("2024-01-01", "5000").to_request()).await;
        let before = data.store.load();

        let resp = test::call_service(&svc, delete_req("1999-01-01").to_request()).await;
        assert_redirect(&resp);
        assert_eq!(data.store.load(), before);
    }

    #[actix_web::test]
    async fn non_numeric_field_is_bad_request() {
        let dir = tempdir().unwrap();
        let data = state(&dir, Arc::new(Echo));
        let svc =
            test::init_service(actix_web::App::new().app_data(data.clone()).configure(configure))
                .await;

        let resp = test::call_service(&svc, add_req("2024-01-01", "many").to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(data.store.load().is_empty());

        let req = test::TestRequest::post()
            .uri("/add")
            .set_form([("date", "2024-01-01")])
            .to_request();
        let resp = test::call_service(&svc, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn non_finite_distance_keeps_stored_entries() {
        let dir = tempdir().unwrap();
        let data = state(&dir, Arc::new(Echo));
        let svc =
            test::init_service(actix_web::App::new().app_data(data.clone()).configure(configure))
                .await;

        test::call_service(&svc, add_req("2024-01-01", "5000").to_request()).await;
        let before = data.store.load();
        assert_eq!(before.len(), 1);

        let req = test::TestRequest::post()
            .uri("/add")
            .set_form([
                ("date", "2024-01-02"),
                ("steps", "1"),
                ("calories", "1"),
                ("distance", "nan"),
                ("active_minutes", "1"),
            ])
            .to_request();
        let resp = test::call_service(&svc, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(data.store.load(), before);

        test::call_service(&svc, add_req("2024-01-03", "6000").to_request()).await;
        assert_eq!(data.store.load().len(), 2);
    }

    #[actix_web::test]
    async fn export_empty_is_not_found() {
        let dir = tempdir().unwrap();
        let svc = test::init_service(
            actix_web::App::new()
                .app_data(state(&dir, Arc::new(Echo)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/export").to_request();
        let resp = test::call_service(&svc, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(test::read_body(resp).await, "No data to export");
    }

    #[actix_web::test]
    async fn export_returns_csv_attachment() {
        let dir = tempdir().unwrap();
        let svc = test::init_service(
            actix_web::App::new()
                .app_data(state(&dir, Arc::new(Echo)))
                .configure(configure),
        )
        .await;
        test::call_service(&svc, add_req("2024-01-01", "5000").to_request()).await;

        let req = test::TestRequest::get().uri("/export").to_request();
        let resp = test::call_service(&svc, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv"
        );
        assert_eq!(
            resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"fitness_data.csv\""
        );
        assert_eq!(
            test::read_body(resp).await,
            "date,steps,calories,distance,active_minutes\n2024-01-01,5000,200,3.5,30\n"
        );
    }

    #[actix_web::test]
    async fn chat_relays_message() {
        let dir = tempdir().unwrap();
        let svc = test::init_service(
            actix_web::App::new()
                .app_data(state(&dir, Arc::new(Echo)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/chat")
            .set_json(json!({ "message": "how many steps today?" }))
            .to_request();
        let resp: ChatResponse = test::call_and_read_body_json(&svc, req).await;
        assert_eq!(resp.response, "echo: how many steps today?");
    }

    #[actix_web::test]
    async fn chat_failure_is_bad_gateway() {
        let dir = tempdir().unwrap();
        let svc = test::init_service(
            actix_web::App::new()
                .app_data(state(&dir, Arc::new(Down)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/chat")
            .set_json(json!({ "message": "hi" }))
            .to_request();
        let resp = test::call_service(&svc, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("503"));

        let req = test::TestRequest::post()
            .uri("/chat")
            .set_json(json!({ "text": "hi" }))
            .to_request();
        let resp = test::call_service(&svc, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn pages_render() {
        let dir = tempdir().unwrap();
        let svc = test::init_service(
            actix_web::App::new()
                .app_data(state(&dir, Arc::new(Echo)))
                .configure(configure),
        )
        .await;
        test::call_service(&svc, add_req("2024-05-05", "1234").to_request()).await;

        for uri in ["/", "/chat", "/device", "/documentation"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&svc, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        }

        let req = test::TestRequest::get().uri("/").to_request();
        let body = test::call_and_read_body(&svc, req).await;
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains("2024-05-05"));
        assert!(body.contains("<td>1234</td>"));
    }
}
