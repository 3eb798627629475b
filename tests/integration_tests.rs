//! Integration tests using wiremock to simulate a Redmine server.

use http::Method;
use redmine_client::resources::{
    IssueFields, IssueGetParams, IssueListParams, ProjectFields, UploadRef, WikiPageFields,
};
use redmine_client::{Client, ClientConfig, Error, ErrorKind, RequestDescriptor};
use serde_json::{json, Value};
use wiremock::matchers::{body_bytes, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Client {
    Client::new(
        ClientConfig::builder()
            .base_url(server.uri())
            .build()
            .unwrap(),
    )
}

#[tokio::test]
async fn test_get_sends_params_as_query_without_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/issues.json"))
        .and(query_param("limit", "5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "issues": [], "total_count": 0 })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let descriptor = RequestDescriptor::new(Method::GET, "issues")
        .with_params(json!({ "params": { "limit": 5 } }));

    let response = client.request(descriptor).await.unwrap();
    assert_eq!(response, json!({ "issues": [], "total_count": 0 }));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_get_joins_sequences_in_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/issues.json"))
        .and(query_param("tracker_id", "1,2,3"))
        .and(query_param("include", "journals"))
        .and(query_param("project_id", "website"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "issues": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let params = IssueListParams {
        project_id: Some("website".into()),
        tracker_id: vec![1, 2, 3],
        include: vec!["journals".to_string()],
        ..Default::default()
    };

    client.issues().list(&params).await.unwrap();
}

#[tokio::test]
async fn test_post_keeps_arrays_in_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/issues.json"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "issue": { "subject": "x", "watcher_user_ids": [1, 2] }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "issue": { "id": 7 } })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let issue = IssueFields {
        subject: Some("x".to_string()),
        watcher_user_ids: vec![1, 2],
        ..Default::default()
    };

    let created = client.issues().create(&issue).await.unwrap();
    assert_eq!(created["issue"]["id"], 7);
}

#[tokio::test]
async fn test_low_level_post_is_not_normalized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/issues.json"))
        .and(body_json(json!({
            "issue": { "subject": "x", "watcher_user_ids": [1, 2] }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "issue": { "id": 8 } })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let descriptor = RequestDescriptor::new(Method::POST, "issues")
        .with_params(json!({ "issue": { "subject": "x", "watcher_user_ids": [1, 2] } }));

    client.request(descriptor).await.unwrap();
}

#[tokio::test]
async fn test_api_key_and_impersonation_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/current.json"))
        .and(header("X-Redmine-API-Key", "K"))
        .and(header("X-Redmine-Switch-User", "bob"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "user": { "login": "bob" } })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(
        ClientConfig::builder()
            .base_url(mock_server.uri())
            .api_key("K")
            .basic_auth("u", "p")
            .impersonate_user("bob")
            .build()
            .unwrap(),
    );

    let user = client.users().current(&[]).await.unwrap();
    assert_eq!(user["user"]["login"], "bob");

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_basic_credentials() {
    let mock_server = MockServer::start().await;

    // base64("u:p")
    Mock::given(method("GET"))
        .and(path("/projects.json"))
        .and(header("authorization", "Basic dTpw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "projects": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(
        ClientConfig::builder()
            .base_url(mock_server.uri())
            .basic_auth("u", "p")
            .build()
            .unwrap(),
    );

    client.projects().list(&Default::default()).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("x-redmine-api-key").is_none());
}

#[tokio::test]
async fn test_anonymous_requests_work() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/public.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "project": { "id": 1 } })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let project = client
        .projects()
        .get("public", &Default::default())
        .await
        .unwrap();
    assert_eq!(project["project"]["id"], 1);

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
    assert!(requests[0].headers.get("x-redmine-api-key").is_none());
}

#[tokio::test]
async fn test_upload_sends_octet_stream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/uploads.json"))
        .and(header("content-type", "application/octet-stream"))
        .and(body_bytes(b"file content".to_vec()))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "upload": { "id": 1, "token": "1.7b962f" } })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let token = client
        .uploads()
        .upload_token(b"file content".to_vec())
        .await
        .unwrap();

    assert_eq!(token.as_deref(), Some("1.7b962f"));
}

#[tokio::test]
async fn test_upload_token_is_referenced_on_create() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/issues.json"))
        .and(body_json(json!({
            "issue": {
                "project_id": 1,
                "subject": "Screenshot",
                "uploads": [{
                    "token": "1.7b962f",
                    "filename": "shot.png",
                    "content_type": "image/png",
                    "description": "the crash"
                }]
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "issue": { "id": 3 } })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let issue = IssueFields {
        project_id: Some(1_u64.into()),
        subject: Some("Screenshot".to_string()),
        uploads: vec![
            UploadRef::new("1.7b962f", "shot.png", "image/png").with_description("the crash"),
        ],
        ..Default::default()
    };

    client.issues().create(&issue).await.unwrap();
}

#[tokio::test]
async fn test_oversized_upload_is_not_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/uploads.json"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = Client::new(
        ClientConfig::builder()
            .base_url(mock_server.uri())
            .max_upload_size(4)
            .build()
            .unwrap(),
    );

    let result = client.uploads().upload(vec![0_u8; 5]).await;

    match result {
        Err(Error::Connection { code, .. }) => assert_eq!(code, "body_limit_exceeded"),
        _ => panic!("Expected Connection error, got {:?}", result),
    }
}

#[tokio::test]
async fn test_connection_failure_names_base_url() {
    let base_url = "http://127.0.0.1:1";
    let client = Client::new(ClientConfig::builder().base_url(base_url).build().unwrap());

    let result = client.issues().list(&Default::default()).await;

    match result {
        Err(err) => {
            assert_eq!(err.kind(), ErrorKind::Connection);
            assert!(err.to_string().contains(base_url));
            assert_eq!(err.status(), None);
        }
        Ok(value) => panic!("Expected Connection error, got {:?}", value),
    }
}

#[tokio::test]
async fn test_validation_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/issues.json"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({ "errors": ["Subject can't be blank"] })),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.issues().create(&IssueFields::default()).await;

    match result {
        Err(err @ Error::Validation { .. }) => {
            assert_eq!(err.to_string(), "Subject can't be blank");
            assert_eq!(err.messages(), ["Subject can't be blank".to_string()]);
            assert_eq!(err.status().map(|s| s.as_u16()), Some(422));
        }
        _ => panic!("Expected Validation error, got {:?}", result),
    }
}

#[tokio::test]
async fn test_http_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/issues/999.json"))
        .respond_with(ResponseTemplate::new(404).set_body_string(""))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.issues().get(999, &IssueGetParams::default()).await;

    match result {
        Err(Error::HttpStatus {
            status,
            status_text,
            path,
        }) => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(status_text, "Not Found");
            assert_eq!(path, "issues/999.json");
        }
        _ => panic!("Expected HttpStatus error, got {:?}", result),
    }
}

#[tokio::test]
async fn test_non_json_success_is_unclassified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trackers.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.catalog().trackers().await;

    match result {
        Err(err) => assert_eq!(err.kind(), ErrorKind::Unclassified),
        Ok(value) => panic!("Expected Unclassified error, got {:?}", value),
    }
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/issues/5.json"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.issues().delete(5).await.unwrap();
    assert_eq!(response, Value::Null);
}

#[tokio::test]
async fn test_session_is_created_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trackers.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "trackers": [] })))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(format!("{:?}", client).contains("session_created: false"));

    client.catalog().trackers().await.unwrap();
    let first = client.session().unwrap() as *const _;

    client.catalog().trackers().await.unwrap();
    client.clone().catalog().trackers().await.unwrap();
    let last = client.session().unwrap() as *const _;

    assert!(std::ptr::eq(first, last));
    assert!(format!("{:?}", client).contains("session_created: true"));
}

#[tokio::test]
async fn test_concurrent_requests_share_the_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/issue_statuses.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "issue_statuses": [] })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/enumerations/issue_priorities.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "issue_priorities": [] })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let catalog = client.catalog();

    let (statuses, priorities) = tokio::join!(catalog.issue_statuses(), catalog.issue_priorities());

    assert_eq!(statuses.unwrap(), json!({ "issue_statuses": [] }));
    assert_eq!(priorities.unwrap(), json!({ "issue_priorities": [] }));
}

#[tokio::test]
async fn test_base_url_with_sub_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/redmine/projects/web.json"))
        .and(body_json(json!({ "project": { "name": "Web" } })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(
        ClientConfig::builder()
            .base_url(format!("{}/redmine/", mock_server.uri()))
            .build()
            .unwrap(),
    );

    let project = ProjectFields {
        name: Some("Web".to_string()),
        ..Default::default()
    };
    client.projects().update("web", &project).await.unwrap();
}

#[tokio::test]
async fn test_watchers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/issues/1/watchers.json"))
        .and(body_json(json!({ "user_id": 5 })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/issues/1/watchers/5.json"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.issues().add_watcher(1, 5).await.unwrap();
    client.issues().remove_watcher(1, 5).await.unwrap();
}

#[tokio::test]
async fn test_wiki_title_is_encoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/projects/docs/wiki/Getting%20Started.json"))
        .and(body_json(json!({ "wiki_page": { "text": "h1. Hello" } })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "wiki_page": { "version": 1 } })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = WikiPageFields {
        text: "h1. Hello".to_string(),
        ..Default::default()
    };

    let response = client
        .wiki()
        .create_or_update("docs", "Getting Started", &page)
        .await
        .unwrap();
    assert_eq!(response["wiki_page"]["version"], 1);
}

#[tokio::test]
async fn test_raw_payload_outside_uploads_is_rejected() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    let descriptor = RequestDescriptor::new(Method::POST, "issues").with_bytes(b"raw".to_vec());
    let result = client.request(descriptor).await;
    assert!(matches!(result, Err(Error::ConfigurationError(_))));

    let descriptor = RequestDescriptor::new(Method::GET, "issues").with_bytes(b"raw".to_vec());
    let result = client.request(descriptor).await;
    assert!(matches!(result, Err(Error::ConfigurationError(_))));

    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_wiki_title_ending_in_json_keeps_its_suffix() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/docs/wiki/schema.json.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "wiki_page": { "title": "schema.json" } })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/projects/docs/wiki/schema.json.json"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let page = client
        .wiki()
        .get("docs", "schema.json", None, false)
        .await
        .unwrap();
    assert_eq!(page["wiki_page"]["title"], "schema.json");

    client.wiki().delete("docs", "schema.json").await.unwrap();
}

#[tokio::test]
async fn test_category_delete_sends_reassignment_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/issue_categories/4.json"))
        .and(body_json(json!({ "reassign_to_id": 7 })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.issue_categories().delete(4, Some(7)).await.unwrap();
    assert_eq!(response, Value::Null);
}

#[tokio::test]
async fn test_category_delete_without_reassignment_has_no_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/issue_categories/4.json"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.issue_categories().delete(4, None).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_archive_and_unarchive_send_empty_put() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/projects/website/archive.json"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/projects/website/unarchive.json"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.projects().archive("website").await.unwrap();
    client.projects().unarchive("website").await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|request| request.body.is_empty()));
}
