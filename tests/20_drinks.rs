mod common;

use anyhow::Result;
use axum::http::{header, Method, Request, StatusCode};
use axum::body::Body;
use chrono::Utc;
use serde_json::{json, Value};
use triptych_api::database::MemoryStore;

use common::{request, send, BARISTA, KID, MANAGER, SECRET};

fn latte() -> Value {
    json!({
        "title": "Latte",
        "recipe": [
            { "name": "espresso", "color": "#3b2313", "parts": 1 },
            { "name": "milk", "color": "#fdfff5", "parts": 3 }
        ]
    })
}

async fn create_latte(app: &axum::Router) -> Result<i64> {
    let token = common::token(MANAGER)?;
    let (status, body) = send(app, request(Method::POST, "/drinks", Some(&token), Some(latte()))?).await?;
    assert_eq!(status, StatusCode::OK, "create failed: {}", body);
    Ok(body["drinks"][0]["id"].as_i64().unwrap_or_default())
}

/// Each gate failure renders its code and never reaches the store
async fn assert_rejected(req: Request<Body>, status: StatusCode, code: &str) -> Result<()> {
    let store = MemoryStore::new();
    let app = common::app(&store)?;
    let (got, body) = send(&app, req).await?;
    assert_eq!(got, status, "unexpected body: {}", body);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], code);
    assert_eq!(store.calls(), 0, "store was touched before the gate passed");
    Ok(())
}

#[tokio::test]
async fn missing_header_is_401() -> Result<()> {
    assert_rejected(
        request(Method::POST, "/drinks", None, Some(latte()))?,
        StatusCode::UNAUTHORIZED,
        "authorization_header_missing",
    )
    .await
}

#[tokio::test]
async fn malformed_headers_are_invalid() -> Result<()> {
    for value in ["Basic abc123", "Bearer", "Bearer a b", "token"] {
        let req = Request::builder()
            .method(Method::GET)
            .uri("/drinks-detail")
            .header(header::AUTHORIZATION, value)
            .body(Body::empty())?;
        assert_rejected(req, StatusCode::UNAUTHORIZED, "invalid_header").await?;
    }
    Ok(())
}

#[tokio::test]
async fn token_without_kid_or_known_key_is_invalid() -> Result<()> {
    let no_kid = common::sign(None, SECRET, &common::claims(MANAGER))?;
    assert_rejected(
        request(Method::GET, "/drinks-detail", Some(&no_kid), None)?,
        StatusCode::UNAUTHORIZED,
        "invalid_header",
    )
    .await?;

    let store = MemoryStore::new();
    let app = common::app(&store)?;
    let other_kid = common::sign(Some("rotated-away"), SECRET, &common::claims(MANAGER))?;
    let (status, body) = send(&app, request(Method::GET, "/drinks-detail", Some(&other_kid), None)?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "invalid_header");
    assert_eq!(body["message"], "Unable to find the appropriate key.");

    assert_rejected(
        request(Method::GET, "/drinks-detail", Some("not.a.jwt"), None)?,
        StatusCode::UNAUTHORIZED,
        "invalid_header",
    )
    .await
}

#[tokio::test]
async fn wrong_signature_is_401() -> Result<()> {
    let forged = common::sign(Some(KID), b"someone-else", &common::claims(MANAGER))?;
    assert_rejected(
        request(Method::DELETE, "/drinks/1", Some(&forged), None)?,
        StatusCode::UNAUTHORIZED,
        "invalid_signature",
    )
    .await
}

#[tokio::test]
async fn expired_token_is_401() -> Result<()> {
    let mut claims = common::claims(MANAGER);
    claims["exp"] = json!(Utc::now().timestamp() - 3600);
    let stale = common::sign(Some(KID), SECRET, &claims)?;
    assert_rejected(
        request(Method::PATCH, "/drinks/1", Some(&stale), Some(json!({ "title": "Mocha" })))?,
        StatusCode::UNAUTHORIZED,
        "token_expired",
    )
    .await
}

#[tokio::test]
async fn foreign_audience_or_issuer_is_401() -> Result<()> {
    let mut claims = common::claims(MANAGER);
    claims["aud"] = json!("some-other-api");
    let token = common::sign(Some(KID), SECRET, &claims)?;
    assert_rejected(
        request(Method::GET, "/drinks-detail", Some(&token), None)?,
        StatusCode::UNAUTHORIZED,
        "invalid_claims",
    )
    .await?;

    let mut claims = common::claims(MANAGER);
    claims["iss"] = json!("https://impostor.test/");
    let token = common::sign(Some(KID), SECRET, &claims)?;
    assert_rejected(
        request(Method::GET, "/drinks-detail", Some(&token), None)?,
        StatusCode::UNAUTHORIZED,
        "invalid_claims",
    )
    .await
}

#[tokio::test]
async fn missing_permission_is_403() -> Result<()> {
    let barista = common::token(BARISTA)?;
    assert_rejected(
        request(Method::POST, "/drinks", Some(&barista), Some(latte()))?,
        StatusCode::FORBIDDEN,
        "unauthorized",
    )
    .await?;

    // no permissions claim at all
    let mut claims = common::claims(&[]);
    if let Some(fields) = claims.as_object_mut() {
        fields.remove("permissions");
    }
    let token = common::sign(Some(KID), SECRET, &claims)?;
    let store = MemoryStore::new();
    let app = common::app(&store)?;
    let (status, body) = send(&app, request(Method::GET, "/drinks-detail", Some(&token), None)?).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Permission not found.");
    Ok(())
}

#[tokio::test]
async fn public_menu_hides_ingredient_names() -> Result<()> {
    let store = MemoryStore::new();
    let app = common::app(&store)?;
    create_latte(&app).await?;

    let (status, body) = common::get(&app, "/drinks").await?;
    assert_eq!(status, StatusCode::OK);
    let first = &body["drinks"][0]["recipe"][0];
    assert_eq!(first["color"], "#3b2313");
    assert_eq!(first["parts"], 1);
    assert!(first.get("name").is_none());

    let barista = common::token(BARISTA)?;
    let (status, body) = send(&app, request(Method::GET, "/drinks-detail", Some(&barista), None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drinks"][0]["recipe"][1]["name"], "milk");
    Ok(())
}

#[tokio::test]
async fn manager_can_edit_the_menu() -> Result<()> {
    let store = MemoryStore::new();
    let app = common::app(&store)?;
    let manager = common::token(MANAGER)?;
    let id = create_latte(&app).await?;

    let (status, body) = send(&app, request(Method::POST, "/drinks", Some(&manager), Some(latte()))?).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "This drink name already exists");

    let (status, body) = send(
        &app,
        request(Method::PATCH, &format!("/drinks/{}", id), Some(&manager), Some(json!({ "title": "Flat White" })))?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drinks"][0]["title"], "Flat White");
    assert_eq!(body["drinks"][0]["recipe"].as_array().map(Vec::len), Some(2));

    let (status, _) = send(
        &app,
        request(Method::PATCH, "/drinks/404", Some(&manager), Some(json!({ "title": "Ghost" })))?,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, request(Method::DELETE, &format!("/drinks/{}", id), Some(&manager), None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "delete": id }));

    let (status, _) = send(&app, request(Method::DELETE, &format!("/drinks/{}", id), Some(&manager), None)?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(store.drinks.is_empty());
    Ok(())
}

#[tokio::test]
async fn incomplete_drinks_are_bad_requests() -> Result<()> {
    let store = MemoryStore::new();
    let app = common::app(&store)?;
    let manager = common::token(MANAGER)?;

    let bodies = [
        json!({ "title": "Water", "recipe": [] }),
        json!({ "recipe": [{ "name": "tea", "color": "green", "parts": 1 }] }),
        json!({ "title": "Mud", "recipe": [{ "name": "", "color": "brown", "parts": 1 }] }),
        json!({ "title": "Oops", "recipe": "espresso" }),
        json!({ "title": "   ", "recipe": [{ "name": "tea", "color": "green", "parts": 1 }] }),
    ];
    for body in bodies {
        let (status, reply) = send(&app, request(Method::POST, "/drinks", Some(&manager), Some(body))?).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "unexpected reply: {}", reply);
        assert_eq!(reply["code"], "VALIDATION_ERROR");
    }
    assert!(store.drinks.is_empty());
    Ok(())
}

#[tokio::test]
async fn store_failures_are_internal_errors() -> Result<()> {
    let store = MemoryStore::new();
    let app = common::app(&store)?;
    let manager = common::token(MANAGER)?;

    store.drinks.set_unavailable(true);
    let (status, body) = send(&app, request(Method::POST, "/drinks", Some(&manager), Some(latte()))?).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 500);
    assert_eq!(body["message"], "Internal server error");
    assert_eq!(body["code"], "INTERNAL_SERVER_ERROR");

    let (status, _) = send(&app, request(Method::GET, "/drinks", None, None)?).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    store.drinks.set_unavailable(false);
    assert!(store.drinks.is_empty());
    let (status, body) = send(&app, request(Method::GET, "/drinks", None, None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drinks"], json!([]));
    Ok(())
}
