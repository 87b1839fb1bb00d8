#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use triptych_api::{
    auth::{AuthGate, StaticKeySource},
    config::{map_lookup, AppConfig},
    database::{
        models::{Category, Question},
        MemoryStore, Stores,
    },
    router, AppState,
};

pub const KID: &str = "test-kid";
pub const SECRET: &[u8] = b"integration-secret";
pub const ISSUER: &str = "https://triptych.test/";
pub const AUDIENCE: &str = "triptych";

pub const BARISTA: &[&str] = &["get:drinks-detail"];
pub const MANAGER: &[&str] = &["get:drinks-detail", "post:drinks", "patch:drinks", "delete:drinks"];

/// Router over `store`, verifying HS256 tokens signed with `SECRET`
pub fn app(store: &MemoryStore) -> Result<Router> {
    let config = AppConfig::from_lookup(map_lookup(HashMap::new()))?;
    let keys = StaticKeySource::new().with_secret(KID, SECRET);
    let gate = AuthGate::new(Arc::new(keys), ISSUER, AUDIENCE, vec![Algorithm::HS256]);
    Ok(router(AppState::new(config, Stores::memory(store), gate)))
}

/// Six categories and `questions` science questions, plus two fixed ones
pub fn trivia_store(questions: usize) -> MemoryStore {
    let store = MemoryStore::new();
    store.categories.seed(
        ["Science", "Art", "Geography", "History", "Entertainment", "Sports"].map(Category::new),
    );
    store.questions.seed((1..=questions).map(|i| Question {
        id: 0,
        question: format!("Science question number {}?", i),
        answer: format!("answer {}", i),
        category: 1,
        difficulty: 1 + (i % 5) as i32,
    }));
    store.questions.seed([
        Question {
            id: 0,
            question: "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?".into(),
            answer: "Maya Angelou".into(),
            category: 4,
            difficulty: 2,
        },
        Question {
            id: 0,
            question: "What boxer's original name is Cassius Clay?".into(),
            answer: "Muhammad Ali".into(),
            category: 4,
            difficulty: 1,
        },
    ]);
    store
}

pub fn claims(permissions: &[&str]) -> Value {
    json!({
        "sub": "auth0|tester",
        "iss": ISSUER,
        "aud": AUDIENCE,
        "exp": Utc::now().timestamp() + 3600,
        "iat": Utc::now().timestamp(),
        "permissions": permissions,
    })
}

pub fn sign(kid: Option<&str>, secret: &[u8], claims: &Value) -> Result<String> {
    let mut header = Header::new(Algorithm::HS256);
    header.kid = kid.map(str::to_string);
    Ok(encode(&header, claims, &EncodingKey::from_secret(secret))?)
}

pub fn token(permissions: &[&str]) -> Result<String> {
    sign(Some(KID), SECRET, &claims(permissions))
}

pub fn request(method: Method, uri: &str, bearer: Option<&str>, body: Option<Value>) -> Result<Request<Body>> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&value)?)
        }
        None => Body::empty(),
    };
    Ok(builder.body(body)?)
}

pub async fn send(app: &Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

pub async fn get(app: &Router, uri: &str) -> Result<(StatusCode, Value)> {
    send(app, request(Method::GET, uri, None, None)?).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
    send(app, request(Method::POST, uri, None, Some(body))?).await
}
