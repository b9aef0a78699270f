use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use tahfeez_core::{AppError, AppResult, Locale};

use crate::{
    ApiGateway, ApiMethod, ApiRequest, ApiTransport, Confirmation, Notifier, SessionStorage,
};

type Handler = Box<dyn Fn(&ApiRequest) -> AppResult<Value> + Send + Sync>;

pub(crate) struct FakeTransport {
    handler: Handler,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub(crate) fn new(
        handler: impl Fn(&ApiRequest) -> AppResult<Value> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) async fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().await.clone()
    }

    pub(crate) async fn count(&self, method: ApiMethod, path: &str) -> usize {
        self.requests
            .lock()
            .await
            .iter()
            .filter(|request| request.method == method && request.path == path)
            .count()
    }
}

#[async_trait]
impl ApiTransport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> AppResult<Value> {
        self.requests.lock().await.push(request.clone());
        (self.handler)(&request)
    }
}

pub(crate) fn authorized_gateway(transport: Arc<FakeTransport>) -> ApiGateway {
    ApiGateway::new(transport, Locale::Ar).with_token(Some("test-token".to_owned()))
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    pub(crate) alerts: Mutex<Vec<String>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn alert(&self, message: &str) {
        self.alerts.lock().await.push(message.to_owned());
    }
}

pub(crate) struct ScriptedConfirmation {
    answer: bool,
    pub(crate) prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirmation {
    pub(crate) fn answering(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Confirmation for ScriptedConfirmation {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().await.push(prompt.to_owned());
        self.answer
    }
}

#[derive(Default)]
pub(crate) struct FakeSessionStorage {
    pub(crate) values: Mutex<HashMap<String, String>>,
    /// Makes `load` fail until the next `remove`, like a corrupt file.
    pub(crate) unreadable: Mutex<bool>,
}

#[async_trait]
impl SessionStorage for FakeSessionStorage {
    async fn load(&self, key: &str) -> AppResult<Option<String>> {
        if *self.unreadable.lock().await {
            return Err(AppError::Storage("session file is corrupt".to_owned()));
        }
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> AppResult<()> {
        self.values
            .lock()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        *self.unreadable.lock().await = false;
        self.values.lock().await.remove(key);
        Ok(())
    }
}
