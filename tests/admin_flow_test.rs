use anyhow::Result;
use httpmock::prelude::*;
use httpmock::Method::PATCH;
use serde_json::json;
use site_admin::adapters::console::RecordingNotifier;
use site_admin::config::{AdminConfig, FirestoreConfig};
use site_admin::core::hero::HERO_SAVE_FAILED;
use site_admin::core::services::SERVICE_SAVE_FAILED;
use site_admin::app::build_uploader_with;
use site_admin::core::ServiceIcon;
use site_admin::{AdminContentEditor, FirestoreStore};
use std::sync::Arc;

const DOCS: &str = "/v1/projects/demo/databases/(default)/documents";

fn store(server: &MockServer) -> FirestoreStore {
    FirestoreStore::new(&FirestoreConfig {
        project_id: "demo".to_string(),
        database: None,
        base_url: Some(server.url("/v1")),
        api_key: None,
        auth_token: None,
    })
}

fn uploader_config() -> AdminConfig {
    AdminConfig::from_toml_str(
        r#"
[firestore]
project_id = "demo"

[background_removal]
api_key = ""
"#,
    )
    .unwrap()
}

fn mock_initial_reads(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path(format!("{}/hero/main", DOCS));
        then.status(200).json_body(json!({
            "name": "projects/demo/databases/(default)/documents/hero/main",
            "fields": {
                "title": {"stringValue": "Precision Parts"},
                "subtitle": {"stringValue": "Since 1990"},
                "description": {"stringValue": "CNC machining"}
            }
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path(format!("{}/services", DOCS));
        then.status(200).json_body(json!({
            "documents": [
                {
                    "name": "projects/demo/databases/(default)/documents/services/s2",
                    "fields": {
                        "title": {"stringValue": "Welding"},
                        "description": {"stringValue": "TIG and MIG"},
                        "imageUrl": {"stringValue": "https://img.example/weld.jpg"},
                        "icon": {"stringValue": "Zap"},
                        "orderIndex": {"integerValue": "2"}
                    }
                },
                {
                    "name": "projects/demo/databases/(default)/documents/services/s1",
                    "fields": {
                        "title": {"stringValue": "Milling"},
                        "description": {"stringValue": "5-axis"},
                        "imageUrl": {"stringValue": "https://img.example/mill.jpg"},
                        "icon": {"stringValue": "Shield"},
                        "orderIndex": {"integerValue": "1"}
                    }
                }
            ]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path(format!("{}/materials", DOCS));
        then.status(200).json_body(json!({
            "documents": [{
                "name": "projects/demo/databases/(default)/documents/materials/m1",
                "fields": {
                    "name": {"stringValue": "Aluminium 6061"},
                    "orderIndex": {"integerValue": "1"}
                }
            }]
        }));
    });
}

async fn loaded_editor(
    server: &MockServer,
    notifier: Arc<RecordingNotifier>,
) -> AdminContentEditor<FirestoreStore, Arc<RecordingNotifier>> {
    let mut editor = AdminContentEditor::new(
        store(server),
        notifier,
        build_uploader_with(&uploader_config(), |_| None),
    );
    editor.load().await.unwrap();
    editor
}

#[tokio::test]
async fn test_load_sorts_services_by_order_index() {
    let server = MockServer::start();
    mock_initial_reads(&server);

    let editor = loaded_editor(&server, Arc::new(RecordingNotifier::default())).await;

    assert_eq!(editor.hero.content().title, "Precision Parts");
    let titles: Vec<&str> = editor
        .services
        .items()
        .iter()
        .map(|entry| entry.value.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Milling", "Welding"]);
    assert_eq!(editor.services.items()[1].value.icon, ServiceIcon::Zap);
    assert_eq!(editor.materials.items()[0].value.name, "Aluminium 6061");
}

#[tokio::test]
async fn test_hero_save_writes_whole_document() {
    let server = MockServer::start();
    mock_initial_reads(&server);
    let write = server.mock(|when, then| {
        when.method(PATCH)
            .path(format!("{}/hero/main", DOCS))
            .body_contains("\"Tight tolerances\"")
            .body_contains("\"Since 1990\"");
        then.status(200).json_body(json!({
            "name": "projects/demo/databases/(default)/documents/hero/main"
        }));
    });

    let mut editor = loaded_editor(&server, Arc::new(RecordingNotifier::default())).await;
    editor.hero.begin_edit();
    editor.hero.draft_mut().unwrap().title = "Tight tolerances".to_string();
    editor.hero.save().await.unwrap();

    write.assert();
    assert!(!editor.hero.is_editing());
    assert_eq!(editor.hero.content().title, "Tight tolerances");
}

#[tokio::test]
async fn test_hero_save_failure_alerts_once_and_keeps_draft() {
    let server = MockServer::start();
    mock_initial_reads(&server);
    server.mock(|when, then| {
        when.method(PATCH).path(format!("{}/hero/main", DOCS));
        then.status(403)
            .json_body(json!({"error": {"code": 403, "message": "Missing or insufficient permissions."}}));
    });

    let notifier = Arc::new(RecordingNotifier::default());
    let mut editor = loaded_editor(&server, notifier.clone()).await;
    editor.hero.begin_edit();
    editor.hero.draft_mut().unwrap().subtitle = "Changed".to_string();

    assert!(editor.hero.save().await.is_err());

    assert_eq!(notifier.alerts(), vec![HERO_SAVE_FAILED.to_string()]);
    assert!(editor.hero.is_editing());
    assert_eq!(editor.hero.content().subtitle, "Since 1990");
}

#[tokio::test]
async fn test_service_create_posts_to_collection() {
    let server = MockServer::start();
    mock_initial_reads(&server);
    let create = server.mock(|when, then| {
        when.method(POST)
            .path(format!("{}/services", DOCS))
            .body_contains("\"Laser cutting\"")
            .body_contains("\"orderIndex\":{\"integerValue\":\"3\"}");
        then.status(200).json_body(json!({
            "name": "projects/demo/databases/(default)/documents/services/new-id",
            "fields": {}
        }));
    });

    let mut editor = loaded_editor(&server, Arc::new(RecordingNotifier::default())).await;
    editor.services.open_create();
    {
        let form = editor.services.form_mut().unwrap();
        form.title = "Laser cutting".to_string();
        form.description = "Fibre laser up to 20mm".to_string();
        form.image_url = "https://img.example/laser.jpg".to_string();
    }

    let id = editor.services.submit().await.unwrap();

    create.assert();
    assert_eq!(id, "new-id");
    assert!(!editor.services.modal().is_open());
}

#[tokio::test]
async fn test_service_update_requires_existing_document() {
    let server = MockServer::start();
    mock_initial_reads(&server);
    let update = server.mock(|when, then| {
        when.method(PATCH)
            .path(format!("{}/services/s1", DOCS))
            .query_param("currentDocument.exists", "true")
            .body_contains("\"Milling and turning\"");
        then.status(200).json_body(json!({
            "name": "projects/demo/databases/(default)/documents/services/s1"
        }));
    });

    let mut editor = loaded_editor(&server, Arc::new(RecordingNotifier::default())).await;
    editor.services.open_edit("s1").unwrap();
    editor.services.form_mut().unwrap().title = "Milling and turning".to_string();

    assert_eq!(editor.services.submit().await.unwrap(), "s1");
    update.assert();
}

#[tokio::test]
async fn test_service_create_failure_keeps_modal_open() {
    let server = MockServer::start();
    mock_initial_reads(&server);
    server.mock(|when, then| {
        when.method(POST).path(format!("{}/services", DOCS));
        then.status(500);
    });

    let notifier = Arc::new(RecordingNotifier::default());
    let mut editor = loaded_editor(&server, notifier.clone()).await;
    editor.services.open_create();
    {
        let form = editor.services.form_mut().unwrap();
        form.title = "Anodising".to_string();
        form.description = "Type II and III".to_string();
        form.image_url = "https://img.example/anod.jpg".to_string();
    }

    assert!(editor.services.submit().await.is_err());

    assert_eq!(notifier.alerts(), vec![SERVICE_SAVE_FAILED.to_string()]);
    assert!(editor.services.modal().is_open());
    assert_eq!(editor.services.items().len(), 2);
}

#[tokio::test]
async fn test_material_delete_after_confirmation() -> Result<()> {
    let server = MockServer::start();
    mock_initial_reads(&server);
    let delete = server.mock(|when, then| {
        when.method(DELETE).path(format!("{}/materials/m1", DOCS));
        then.status(200).json_body(json!({}));
    });

    let mut editor = loaded_editor(&server, Arc::new(RecordingNotifier::default())).await;

    assert!(editor.materials.delete("m1").await?);
    delete.assert();
    Ok(())
}

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let server = MockServer::start();
    mock_initial_reads(&server);
    let delete = server.mock(|when, then| {
        when.method(DELETE).path(format!("{}/services/s1", DOCS));
        then.status(200).json_body(json!({}));
    });

    let notifier = Arc::new(RecordingNotifier::answering(false));
    let mut editor = loaded_editor(&server, notifier.clone()).await;

    assert!(!editor.services.delete("s1").await.unwrap());
    delete.assert_hits(0);
    assert_eq!(notifier.confirmations().len(), 1);
    assert!(notifier.alerts().is_empty());
}
