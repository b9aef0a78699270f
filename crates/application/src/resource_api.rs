use std::marker::PhantomData;

use serde_json::Value;
use tahfeez_core::AppResult;
use tahfeez_domain::{
    PageRequest, Pagination, RequestBody, Resource, ResourceDraft, ResourceFilter,
};

use crate::api_ports::{ApiGateway, ApiMethod, decode, decode_collection};

mod record_action;

pub use record_action::RecordAction;

/// Form field carrying the method override on multipart updates.
pub const METHOD_OVERRIDE_FIELD: &str = "_method";

/// One page of a list response.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<R> {
    /// Records of this page.
    pub items: Vec<R>,
    /// Server pagination, or a synthetic single page when none was sent.
    pub pagination: Pagination,
}

/// Pass-through CRUD endpoints of one resource.
#[derive(Debug, Clone)]
pub struct ResourceApi<R: Resource> {
    gateway: ApiGateway,
    resource: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourceApi<R> {
    /// Creates the API bound to a gateway.
    #[must_use]
    pub fn new(gateway: ApiGateway) -> Self {
        Self {
            gateway,
            resource: PhantomData,
        }
    }

    /// Returns the gateway this API sends through.
    #[must_use]
    pub fn gateway(&self) -> &ApiGateway {
        &self.gateway
    }

    /// Fetches one filtered page.
    pub async fn list(&self, filter: &R::Filter, page: PageRequest) -> AppResult<ListPage<R>> {
        let mut query = filter.query_pairs();
        query.push(("page", page.page().to_string()));
        query.push(("per_page", page.per_page().to_string()));

        let value = self.gateway.get(R::PATH, query).await?;
        decode_page(value)
    }

    /// Fetches one record.
    pub async fn get(&self, id: u64) -> AppResult<R> {
        let value = self.gateway.get(record_path::<R>(id), Vec::new()).await?;
        decode(value, R::PATH)
    }

    /// Creates a record from a draft.
    pub async fn create(&self, draft: R::Draft) -> AppResult<Value> {
        let body = <R::Draft as ResourceDraft<R>>::into_body(draft)?;
        self.gateway
            .send_body(ApiMethod::Post, R::PATH, Some(body))
            .await
    }

    /// Updates a record from a draft.
    ///
    /// Multipart bodies go out as `POST` with `_method=PUT` because the
    /// backend does not parse multipart payloads on `PUT`.
    pub async fn update(&self, id: u64, draft: R::Draft) -> AppResult<Value> {
        let body = <R::Draft as ResourceDraft<R>>::into_body(draft)?;
        let (method, body) = match body {
            RequestBody::Multipart(form) => (
                ApiMethod::Post,
                RequestBody::Multipart(form.text(METHOD_OVERRIDE_FIELD, "PUT")),
            ),
            json @ RequestBody::Json(_) => (ApiMethod::Put, json),
        };

        self.gateway
            .send_body(method, record_path::<R>(id), Some(body))
            .await
    }

    /// Deletes a record.
    pub async fn delete(&self, id: u64) -> AppResult<()> {
        self.gateway
            .send_body(ApiMethod::Delete, record_path::<R>(id), None)
            .await
            .map(|_| ())
    }

    /// Runs a workflow action on a record.
    pub async fn perform(&self, id: u64, action: &RecordAction) -> AppResult<Value> {
        action.validate()?;
        self.gateway
            .send_body(
                action.method(),
                format!("{}/{}", record_path::<R>(id), action.segment()),
                Some(RequestBody::Json(action.payload())),
            )
            .await
    }
}

fn record_path<R: Resource>(id: u64) -> String {
    format!("{}/{id}", R::PATH)
}

fn decode_page<R: Resource>(mut value: Value) -> AppResult<ListPage<R>> {
    let pagination = value
        .get_mut("pagination")
        .map(Value::take)
        .filter(|pagination| !pagination.is_null());
    let items = decode_collection::<R>(value, R::COLLECTION_KEY)?;
    let pagination = match pagination {
        Some(pagination) => decode::<Pagination>(pagination, "pagination")?,
        None => Pagination::single_page(items.len()),
    };

    Ok(ListPage { items, pagination })
}
