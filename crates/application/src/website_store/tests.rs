use std::sync::Arc;

use serde_json::{Value, json};
use tahfeez_core::{AppError, Locale};
use tahfeez_domain::RegistrationForm;

use super::WebsiteStore;
use crate::test_support::{FakeSessionStorage, FakeTransport};
use crate::ui_ports::LOCALE_STORAGE_KEY;
use crate::{ApiGateway, ApiMethod, CommandOutcome};

fn store(transport: Arc<FakeTransport>, storage: Arc<FakeSessionStorage>) -> WebsiteStore {
    WebsiteStore::new(ApiGateway::new(transport, Locale::Ar), storage)
}

fn valid_form() -> RegistrationForm {
    RegistrationForm {
        name: "يوسف".to_owned(),
        phone: "+201000000000".to_owned(),
        age: Some(9),
        package_id: Some(2),
        ..RegistrationForm::default()
    }
}

#[tokio::test]
async fn set_locale_persists_and_rebinds_gateway() {
    let transport = FakeTransport::new(|_| Ok(json!([])));
    let storage = Arc::new(FakeSessionStorage::default());
    let mut store = store(transport.clone(), storage.clone());

    assert!(store.set_locale(Locale::En).await.is_ok());
    store.fetch_home().await;

    assert_eq!(store.locale(), Locale::En);
    assert_eq!(
        storage.values.lock().await.get(LOCALE_STORAGE_KEY).cloned(),
        Some("en".to_owned())
    );
    let requests = transport.requests().await;
    assert!(requests.iter().all(|request| request.locale == Locale::En));
}

#[tokio::test]
async fn restore_locale_ignores_unknown_values() {
    let transport = FakeTransport::new(|_| Ok(Value::Null));
    let storage = Arc::new(FakeSessionStorage::default());
    storage
        .values
        .lock()
        .await
        .insert(LOCALE_STORAGE_KEY.to_owned(), "fr".to_owned());
    let mut store = store(transport, storage.clone());

    assert_eq!(store.restore_locale().await, Locale::Ar);

    storage
        .values
        .lock()
        .await
        .insert(LOCALE_STORAGE_KEY.to_owned(), "en".to_owned());
    assert_eq!(store.restore_locale().await, Locale::En);
}

#[tokio::test]
async fn unreadable_locale_storage_keeps_current_language() {
    let transport = FakeTransport::new(|_| Ok(Value::Null));
    let storage = Arc::new(FakeSessionStorage::default());
    *storage.unreadable.lock().await = true;
    let mut store = WebsiteStore::new(ApiGateway::new(transport, Locale::En), storage.clone());

    assert_eq!(store.restore_locale().await, Locale::En);
    assert!(!*storage.unreadable.lock().await);
}

#[tokio::test]
async fn home_sections_load_independently() {
    let transport = FakeTransport::new(|request| match request.path.as_str() {
        "packages" => Ok(json!({
            "packages": [{"id": 1, "name_ar": "الباقة الذهبية", "price": "30"}]
        })),
        "features" => Ok(json!([{"id": 1, "title": "معلمون مجازون"}])),
        "lessons" => Err(AppError::Transport("timed out".to_owned())),
        _ => Ok(json!({"data": [{"id": 5, "name": "أم أحمد"}]})),
    });
    let mut store = store(transport, Arc::new(FakeSessionStorage::default()));

    store.fetch_home().await;

    let home = store.home();
    assert_eq!(home.packages.data.as_ref().map(Vec::len), Some(1));
    assert_eq!(home.features.data.as_ref().map(Vec::len), Some(1));
    assert_eq!(home.testimonials.data.as_ref().map(Vec::len), Some(1));
    assert!(home.lessons.data.is_none());
    assert_eq!(home.lessons.error.as_deref(), Some("تعذر الاتصال بالخادم"));
    assert!(!home.lessons.loading);
}

#[tokio::test]
async fn invalid_registration_never_reaches_api() {
    let transport = FakeTransport::new(|_| Ok(Value::Null));
    let mut store = store(transport.clone(), Arc::new(FakeSessionStorage::default()));
    let form = RegistrationForm {
        age: Some(2),
        ..valid_form()
    };

    let result = store.submit_registration(&form).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(store.registration().error.is_some());
    assert!(!store.registration().submitted);
    assert!(transport.requests().await.is_empty());
}

#[tokio::test]
async fn successful_registration_marks_form_submitted() {
    let transport = FakeTransport::new(|_| Ok(json!({"message": "تم التسجيل"})));
    let mut store = store(transport.clone(), Arc::new(FakeSessionStorage::default()));

    let outcome = store.submit_registration(&valid_form()).await;

    assert!(matches!(outcome, Ok(CommandOutcome::Completed)));

    assert!(store.registration().submitted);
    assert!(store.registration().error.is_none());
    assert_eq!(transport.count(ApiMethod::Post, "register").await, 1);
}

#[tokio::test]
async fn server_rejection_is_recorded_verbatim() {
    let transport = FakeTransport::new(|_| {
        Err(AppError::Validation("رقم الهاتف مستخدم مسبقا".to_owned()))
    });
    let mut store = store(transport, Arc::new(FakeSessionStorage::default()));

    let result = store.submit_registration(&valid_form()).await;

    assert!(result.is_err());
    assert!(!store.registration().submitting);
    assert_eq!(
        store.registration().error.as_deref(),
        Some("رقم الهاتف مستخدم مسبقا")
    );
}

#[tokio::test]
async fn submit_while_in_flight_is_ignored() {
    let transport = FakeTransport::new(|_| Ok(Value::Null));
    let mut store = store(transport.clone(), Arc::new(FakeSessionStorage::default()));
    store.registration.submitting = true;

    let outcome = store.submit_registration(&valid_form()).await;

    assert!(matches!(outcome, Ok(CommandOutcome::Ignored)));
    assert!(!store.registration().submitted);
    assert!(transport.requests().await.is_empty());
}
