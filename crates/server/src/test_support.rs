//! Router harness for handler tests

use crate::{
    auth::{JwtKeys, password::hash_password},
    integrations::{
        AdvisorError, GatewayError, LanguageModel, PaymentGateway, PaymentIntent,
    },
    routes,
    state::AppState,
};
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use booking::{MemoryStore, ReservationStore};
use chrono::Utc;
use database::entities::users;
use http_body_util::BodyExt;
use models::{table::DiningTable, user::UserRole};
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

pub fn user_model(email: &str, password: &str, role: UserRole) -> users::Model {
    users::Model {
        id: Uuid::new_v4(),
        email: email.to_string(),
        password_hash: hash_password(password).unwrap(),
        name: "Test User".to_string(),
        role,
        created_at: Utc::now(),
    }
}

/// Records calls and answers with a canned intent
#[derive(Default)]
pub struct FakeGateway {
    pub intent_status: Mutex<String>,
    pub refunds: Mutex<Vec<(String, Option<i64>)>>,
}

impl FakeGateway {
    pub fn with_status(status: &str) -> Self {
        Self {
            intent_status: Mutex::new(status.to_string()),
            refunds: Mutex::default(),
        }
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_intent(
        &self,
        amount: i64,
        currency: &str,
        _order_id: Uuid,
    ) -> Result<PaymentIntent, GatewayError> {
        Ok(PaymentIntent {
            id: "pi_test".to_string(),
            client_secret: Some("pi_test_secret".to_string()),
            status: self.intent_status.lock().unwrap().clone(),
            amount,
            currency: currency.to_string(),
        })
    }

    async fn retrieve_intent(&self, intent_id: &str) -> Result<PaymentIntent, GatewayError> {
        Ok(PaymentIntent {
            id: intent_id.to_string(),
            client_secret: None,
            status: self.intent_status.lock().unwrap().clone(),
            amount: 0,
            currency: "eur".to_string(),
        })
    }

    async fn refund(&self, intent_id: &str, amount: Option<i64>) -> Result<(), GatewayError> {
        self.refunds
            .lock()
            .unwrap()
            .push((intent_id.to_string(), amount));
        Ok(())
    }
}

/// Returns a fixed answer, or fails when `answer` is `None`
pub struct FakeModel {
    pub answer: Option<Value>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    pub fn answering(answer: Value) -> Self {
        Self {
            answer: Some(answer),
            prompts: Mutex::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            prompts: Mutex::default(),
        }
    }
}

#[async_trait]
impl LanguageModel for FakeModel {
    async fn complete_json(&self, _system: &str, prompt: &str) -> Result<Value, AdvisorError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer.clone().ok_or(AdvisorError::Upstream {
            status: 500,
            message: "model overloaded".to_string(),
        })
    }
}

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    router: Router,
}

impl TestApp {
    /// Fresh in-memory reservation store and a mock database prepared by `setup`
    pub fn with_db(setup: impl FnOnce(MockDatabase) -> MockDatabase) -> Self {
        Self::build(setup, None, None)
    }

    pub fn build(
        setup: impl FnOnce(MockDatabase) -> MockDatabase,
        payments: Option<Arc<dyn PaymentGateway>>,
        advisor: Option<Arc<dyn LanguageModel>>,
    ) -> Self {
        let db = Arc::new(setup(MockDatabase::new(DatabaseBackend::Postgres)).into_connection());
        let store = Arc::new(MemoryStore::new());
        let state = AppState::with_parts(
            db,
            Arc::clone(&store) as Arc<dyn ReservationStore>,
            JwtKeys::new("test-secret", 60),
            payments,
            advisor,
        );
        let router = routes::api_router().with_state(state.clone());

        Self {
            state,
            store,
            router,
        }
    }

    pub async fn add_table(&self, number: i32, seats: i32) -> DiningTable {
        let table = DiningTable::new(number, seats);
        self.store.add_table(table.clone()).await;
        table
    }

    pub fn token(&self, user_id: Uuid, role: UserRole) -> String {
        self.state.jwt.issue(user_id, role).unwrap()
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        (status, bytes.to_vec())
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, bytes) = self.request(method, uri, token, body).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, token, None).await
    }
}
