use axum::http::StatusCode;
use axum_test::TestServer;
use lumber_ledger::api::{create_router, AppState};
use lumber_ledger::models::*;
use lumber_ledger::report::{FontProvider, ReportBuilder, ReportLabels};
use uuid::Uuid;

fn setup() -> TestServer {
    let reports = ReportBuilder::new(ReportLabels::default(), "YAFT", FontProvider::disabled());
    let app = create_router(AppState::new(reports));
    TestServer::new(app).expect("Failed to create test server")
}

async fn start_session(server: &TestServer) -> Uuid {
    let response = server.post("/api/v1/sessions").await;
    response.assert_status(StatusCode::CREATED);
    response.json::<SessionCreated>().id
}

async fn add(server: &TestServer, session: Uuid, input: NewRecordInput) -> axum_test::TestResponse {
    server
        .post(&format!("/api/v1/sessions/{}/records", session))
        .json(&input)
        .await
}

async fn view(server: &TestServer, session: Uuid) -> SessionView {
    let response = server.get(&format!("/api/v1/sessions/{}", session)).await;
    response.assert_status_ok();
    response.json::<SessionView>()
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let server = setup();
        let response = server.get("/api/v1/health").await;
        response.assert_status_ok();
    }
}

mod species {
    use super::*;

    #[tokio::test]
    async fn lists_the_fixed_vocabulary() {
        let server = setup();
        let response = server.get("/api/v1/species").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        let choices = body["choices"].as_array().expect("choices array");
        assert_eq!(choices.len(), SPECIES_CHOICES.len());
        assert_eq!(choices[1], "Çam");
        assert_eq!(body["free_text_choice"], "Diğer");
    }
}

mod sessions {
    use super::*;

    #[tokio::test]
    async fn starts_empty() {
        let server = setup();
        let session = start_session(&server).await;

        let view = view(&server, session).await;

        assert_eq!(view.id, session);
        assert!(view.records.is_empty());
        assert!(view.summary.species.is_empty());
        assert!(!view.can_export);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let server = setup();
        let response = server.get(&format!("/api/v1/sessions/{}", Uuid::new_v4())).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn ended_session_is_gone() {
        let server = setup();
        let session = start_session(&server).await;

        let response = server.delete(&format!("/api/v1/sessions/{}", session)).await;
        response.assert_status(StatusCode::NO_CONTENT);

        let response = server.get(&format!("/api/v1/sessions/{}", session)).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn sessions_do_not_share_records() {
        let server = setup();
        let first = start_session(&server).await;
        let second = start_session(&server).await;

        add(&server, first, NewRecordInput::new("Çam", 2, 10.0, 5.0, 400.0)).await;

        assert_eq!(view(&server, first).await.records.len(), 1);
        assert!(view(&server, second).await.records.is_empty());
    }
}

mod records {
    use super::*;

    #[tokio::test]
    async fn adds_a_record_with_derived_volume() {
        let server = setup();
        let session = start_session(&server).await;

        let response = add(&server, session, NewRecordInput::new("Çam", 2, 10.0, 5.0, 400.0)).await;

        response.assert_status(StatusCode::CREATED);
        let added: RecordAdded = response.json();
        assert_eq!(added.record.species, "Çam");
        assert_eq!(added.record.volume_m3, 0.04);
        assert!(added.notice.contains("Çam"));
    }

    #[tokio::test]
    async fn count_defaults_to_one() {
        let server = setup();
        let session = start_session(&server).await;

        let response = server
            .post(&format!("/api/v1/sessions/{}/records", session))
            .json(&serde_json::json!({
                "species": "Ladin",
                "width_cm": 10.0,
                "thickness_cm": 5.0,
                "length_cm": 200.0
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<RecordAdded>().record.count, 1);
    }

    #[tokio::test]
    async fn rejects_zero_width_without_changing_the_list() {
        let server = setup();
        let session = start_session(&server).await;
        add(&server, session, NewRecordInput::new("Meşe", 1, 10.0, 5.0, 100.0)).await;

        let response = add(&server, session, NewRecordInput::new("Meşe", 1, 0.0, 5.0, 100.0)).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("width_cm"));
        assert_eq!(view(&server, session).await.records.len(), 1);
    }

    #[tokio::test]
    async fn summary_groups_by_species() {
        let server = setup();
        let session = start_session(&server).await;
        add(&server, session, NewRecordInput::new("Meşe", 1, 10.0, 5.0, 1000.0)).await;
        add(&server, session, NewRecordInput::new("Meşe", 1, 10.0, 3.0, 1000.0)).await;

        let view = view(&server, session).await;

        assert_eq!(view.summary.species.len(), 1);
        assert_eq!(format_volume(view.summary.species[0].volume_m3), "0.0800");
        assert_eq!(format_volume(view.summary.grand_total_m3), "0.0800");
        assert!(view.can_export);
    }

    #[tokio::test]
    async fn clear_empties_the_list() {
        let server = setup();
        let session = start_session(&server).await;
        for _ in 0..5 {
            add(&server, session, NewRecordInput::new("Kavak", 1, 10.0, 5.0, 100.0)).await;
        }

        let response = server
            .delete(&format!("/api/v1/sessions/{}/records", session))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<ListCleared>().removed, 5);

        let view = view(&server, session).await;
        assert!(view.records.is_empty());
        assert!(!view.can_export);
    }
}

mod export {
    use super::*;

    #[tokio::test]
    async fn downloads_a_pdf() {
        let server = setup();
        let session = start_session(&server).await;
        add(&server, session, NewRecordInput::new("Çam", 2, 10.0, 5.0, 400.0)).await;

        let response = server
            .get(&format!("/api/v1/sessions/{}/report", session))
            .await;

        response.assert_status_ok();
        assert_eq!(response.header("content-type"), "application/pdf");

        let disposition = response.header("content-disposition");
        let disposition = disposition.to_str().expect("ascii header");
        assert!(disposition.starts_with("attachment; filename=\"YAFT_"));
        assert!(disposition.ends_with(".pdf\""));

        assert!(response.as_bytes().starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn refuses_an_empty_list() {
        let server = setup();
        let session = start_session(&server).await;

        let response = server
            .get(&format!("/api/v1/sessions/{}/report", session))
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn refuses_after_clear() {
        let server = setup();
        let session = start_session(&server).await;
        add(&server, session, NewRecordInput::new("Çam", 1, 10.0, 5.0, 400.0)).await;
        server
            .delete(&format!("/api/v1/sessions/{}/records", session))
            .await;

        let response = server
            .get(&format!("/api/v1/sessions/{}/report", session))
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }
}
