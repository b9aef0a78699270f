use serde_json::json;
use tahfeez_application::{ApiMethod, ApiRequest, ApiTransport};
use tahfeez_core::{AppError, Locale};
use tahfeez_domain::{FilePart, MultipartForm, RequestBody};
use wiremock::matchers::{body_json, header, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{HttpApiClient, interpret_response};

fn request(method: ApiMethod, path: &str) -> ApiRequest {
    ApiRequest {
        method,
        path: path.to_owned(),
        query: Vec::new(),
        body: None,
        locale: Locale::Ar,
        bearer_token: None,
    }
}

fn client_for(server: &MockServer) -> HttpApiClient {
    let Ok(client) = HttpApiClient::new(&format!("{}/api/", server.uri()), None) else {
        unreachable!("mock server URI is a valid base URL")
    };
    client
}

#[tokio::test]
async fn sends_locale_accept_and_bearer_headers_with_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/students"))
        .and(query_param("page", "2"))
        .and(query_param("search", "عمر"))
        .and(header("accept", "application/json"))
        .and(header("lang", "en"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "students": [{"id": 1}],
            "pagination": {"total_pages": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let mut outgoing = request(ApiMethod::Get, "admin/students");
    outgoing.query = vec![
        ("search".to_owned(), "عمر".to_owned()),
        ("page".to_owned(), "2".to_owned()),
    ];
    outgoing.locale = Locale::En;
    outgoing.bearer_token = Some("secret-token".to_owned());

    let response = client.send(outgoing).await;

    assert!(matches!(response, Ok(body) if body["students"][0]["id"] == 1));
}

#[tokio::test]
async fn unauthenticated_requests_carry_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/packages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let client = client_for(&server);

    assert!(client.send(request(ApiMethod::Get, "packages")).await.is_ok());

    let received = server.received_requests().await.unwrap_or_default();
    assert_eq!(received.len(), 1);
    assert!(
        received
            .iter()
            .all(|request| request.headers.get("authorization").is_none())
    );
}

#[tokio::test]
async fn json_bodies_are_serialized_and_envelope_unwrapped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/login"))
        .and(body_json(json!({"email": "admin@academy.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "message": "تم تسجيل الدخول",
            "data": {"token": "abc"}
        })))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let mut outgoing = request(ApiMethod::Post, "admin/login");
    outgoing.body = Some(RequestBody::Json(
        json!({"email": "admin@academy.com", "password": "secret"}),
    ));

    let response = client.send(outgoing).await;

    assert!(matches!(response, Ok(body) if body == json!({"token": "abc"})));
}

#[tokio::test]
async fn multipart_bodies_keep_the_generated_boundary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/teachers/4"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"teacher": {"id": 4}})))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let form = MultipartForm::new()
        .text("name", "الأستاذ خالد")
        .text("_method", "PUT")
        .file(FilePart::new(
            "image",
            "avatar.png",
            "image/png",
            vec![0x89, 0x50, 0x4e, 0x47],
        ));
    let mut outgoing = request(ApiMethod::Post, "admin/teachers/4");
    outgoing.body = Some(RequestBody::Multipart(form));

    assert!(client.send(outgoing).await.is_ok());

    let received = server.received_requests().await.unwrap_or_default();
    let body = received
        .first()
        .map(|request| String::from_utf8_lossy(&request.body).into_owned())
        .unwrap_or_default();
    assert!(body.contains("name=\"_method\""));
    assert!(body.contains("filename=\"avatar.png\""));
}

#[tokio::test]
async fn validation_failure_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/teachers"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "البريد مستخدم من قبل",
            "errors": {"email": ["البريد مستخدم من قبل"]}
        })))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let response = client.send(request(ApiMethod::Post, "admin/teachers")).await;

    assert!(matches!(
        response,
        Err(AppError::Validation(message)) if message == "البريد مستخدم من قبل"
    ));
}

#[tokio::test]
async fn server_errors_without_body_use_generic_status_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/lessons/9"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let response = client
        .send(request(ApiMethod::Delete, "admin/lessons/9"))
        .await;

    assert!(matches!(
        response,
        Err(AppError::Http { status: 500, message }) if message == "HTTP error! status: 500"
    ));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let Ok(client) = HttpApiClient::new("http://127.0.0.1:1/api", None) else {
        unreachable!("valid base URL")
    };

    let response = client.send(request(ApiMethod::Get, "features")).await;

    assert!(matches!(response, Err(AppError::Transport(_))));
}

#[test]
fn status_codes_map_to_error_variants() {
    assert!(matches!(
        interpret_response(401, ""),
        Err(AppError::Unauthorized(_))
    ));
    assert!(matches!(
        interpret_response(403, r#"{"message": "ممنوع"}"#),
        Err(AppError::Forbidden(message)) if message == "ممنوع"
    ));
    assert!(matches!(
        interpret_response(404, "<html>not found</html>"),
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        interpret_response(503, r#"{"message": "الخادم في وضع الصيانة"}"#),
        Err(AppError::Http { status: 503, message }) if message == "الخادم في وضع الصيانة"
    ));
}

#[test]
fn validation_falls_back_to_first_field_error() {
    let response = interpret_response(422, r#"{"errors": {"phone": ["رقم الهاتف مطلوب"]}}"#);

    assert!(matches!(
        response,
        Err(AppError::Validation(message)) if message == "رقم الهاتف مطلوب"
    ));
}

#[test]
fn success_bodies_without_envelope_are_returned_raw() {
    assert!(matches!(interpret_response(204, ""), Ok(serde_json::Value::Null)));
    assert!(matches!(
        interpret_response(200, r#"{"status": "ok"}"#),
        Ok(body) if body == json!({"status": "ok"})
    ));
    assert!(matches!(
        interpret_response(200, "not json"),
        Err(AppError::Decode(_))
    ));
}

#[test]
fn base_url_is_normalized_with_trailing_slash() {
    let Ok(client) = HttpApiClient::new("http://127.0.0.1:8000/api//", None) else {
        unreachable!("valid base URL")
    };

    assert_eq!(client.base_url().as_str(), "http://127.0.0.1:8000/api/");
    assert!(HttpApiClient::new("not a url", None).is_err());
}
