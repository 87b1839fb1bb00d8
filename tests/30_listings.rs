mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use triptych_api::database::MemoryStore;

use common::{get, post, request, send};

async fn create(app: &Router, uri: &str, body: Value) -> Result<Value> {
    let (status, reply) = post(app, uri, body).await?;
    assert_eq!(status, StatusCode::OK, "POST {} failed: {}", uri, reply);
    Ok(reply)
}

/// Two venues in San Francisco, one in New York, two artists, three shows
async fn seeded() -> Result<(MemoryStore, Router)> {
    let store = MemoryStore::new();
    let app = common::app(&store)?;

    for (name, city, state) in [
        ("The Musical Hop", "San Francisco", "CA"),
        ("The Dueling Pianos Bar", "New York", "NY"),
        ("Park Square Live Music & Coffee", "San Francisco", "CA"),
    ] {
        create(
            &app,
            "/venues",
            json!({
                "name": name,
                "city": city,
                "state": state,
                "address": "1015 Folsom Street",
                "genres": ["Jazz", "Folk"],
                "image_link": format!("https://img.test/{}.png", name.len())
            }),
        )
        .await?;
    }
    for name in ["Guns N Petals", "Matt Quevedo"] {
        create(
            &app,
            "/artists",
            json!({ "name": name, "city": "San Francisco", "state": "CA", "genres": ["Rock n Roll"] }),
        )
        .await?;
    }

    // artist 1 played venue 1 in the past and is booked at venue 3; artist 2 at venue 1
    for (artist, venue, start) in [
        (1, 1, "2019-05-21T21:30:00Z"),
        (1, 3, "2099-04-01T20:00:00Z"),
        (2, 1, "2098-06-15T23:00:00Z"),
    ] {
        create(&app, "/shows", json!({ "artist_id": artist, "venue_id": venue, "start_time": start })).await?;
    }
    Ok((store, app))
}

#[tokio::test]
async fn venues_are_grouped_by_area() -> Result<()> {
    let (_, app) = seeded().await?;

    let (status, body) = get(&app, "/venues").await?;
    assert_eq!(status, StatusCode::OK);
    let areas = body["areas"].as_array().cloned().unwrap_or_default();
    assert_eq!(areas.len(), 2);

    // CA sorts before NY
    assert_eq!(areas[0]["city"], "San Francisco");
    assert_eq!(areas[0]["venues"][0]["id"], 1);
    assert_eq!(areas[0]["venues"][0]["num_upcoming_shows"], 1);
    assert_eq!(areas[0]["venues"][1]["id"], 3);
    assert_eq!(areas[1]["state"], "NY");
    assert_eq!(areas[1]["venues"][0]["num_upcoming_shows"], 0);
    Ok(())
}

#[tokio::test]
async fn venue_detail_splits_past_and_upcoming() -> Result<()> {
    let (_, app) = seeded().await?;

    let (status, body) = get(&app, "/venues/1").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "The Musical Hop");
    assert_eq!(body["genres"], json!(["Jazz", "Folk"]));
    assert_eq!(body["past_shows_count"], 1);
    assert_eq!(body["upcoming_shows_count"], 1);
    assert_eq!(body["past_shows"][0]["artist_name"], "Guns N Petals");
    assert_eq!(body["upcoming_shows"][0]["artist_id"], 2);

    let (status, body) = get(&app, "/artists/1").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["upcoming_shows"][0]["venue_name"], "Park Square Live Music & Coffee");
    assert_eq!(body["past_shows"][0]["venue_id"], 1);

    let (status, _) = get(&app, "/venues/99").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get(&app, "/artists/99").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn search_by_partial_name() -> Result<()> {
    let (_, app) = seeded().await?;

    let (status, body) = post(&app, "/venues/search", json!({ "search_term": "hop" })).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "The Musical Hop");
    assert_eq!(body["data"][0]["num_upcoming_shows"], 1);

    let (_, body) = post(&app, "/venues/search", json!({ "search_term": "" })).await?;
    assert_eq!(body["count"], 3);

    let (_, body) = post(&app, "/artists/search", json!({ "search_term": "A" })).await?;
    assert_eq!(body["count"], 2);

    let (_, body) = post(&app, "/artists/search", json!({ "search_term": "band" })).await?;
    assert_eq!(body["count"], 0);
    assert_eq!(body["data"], json!([]));
    Ok(())
}

#[tokio::test]
async fn artists_and_shows_are_listed() -> Result<()> {
    let (_, app) = seeded().await?;

    let (_, body) = get(&app, "/artists").await?;
    assert_eq!(body["artists"], json!([
        { "id": 1, "name": "Guns N Petals" },
        { "id": 2, "name": "Matt Quevedo" }
    ]));

    let (status, body) = get(&app, "/shows").await?;
    assert_eq!(status, StatusCode::OK);
    let shows = body["shows"].as_array().cloned().unwrap_or_default();
    assert_eq!(shows.len(), 3);
    assert!(shows.iter().all(|s| s["venue_name"].is_string() && s["artist_name"].is_string()));
    Ok(())
}

#[tokio::test]
async fn bookings_must_reference_listed_parties() -> Result<()> {
    let (store, app) = seeded().await?;

    let (status, _) = post(
        &app,
        "/shows",
        json!({ "artist_id": 9, "venue_id": 1, "start_time": "2099-01-01T20:00:00Z" }),
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = post(
        &app,
        "/shows",
        json!({ "artist_id": 1, "venue_id": 9, "start_time": "2099-01-01T20:00:00Z" }),
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // same artist at the same venue again
    let (status, body) = post(
        &app,
        "/shows",
        json!({ "artist_id": 1, "venue_id": 1, "start_time": "2099-01-01T20:00:00Z" }),
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "CONFLICT");

    let (status, _) = post(&app, "/shows", json!({ "artist_id": 1, "venue_id": 2, "start_time": "soon" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(store.shows.len(), 3);
    Ok(())
}

#[tokio::test]
async fn new_listings_are_validated() -> Result<()> {
    let store = MemoryStore::new();
    let app = common::app(&store)?;

    let (status, _) = post(&app, "/venues", json!({ "name": "Nowhere", "city": "Austin", "state": "TX" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST, "address is required for venues");

    let (status, _) = post(
        &app,
        "/artists",
        json!({ "name": "Comma Club", "city": "Austin", "state": "TX", "genres": ["Rock, Pop"] }),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&app, "/artists", json!({ "name": "", "city": "Austin", "state": "TX" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app,
        "/venues",
        json!({ "name": "  ", "city": " ", "state": "\t", "address": "   " }),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST, "whitespace is not a venue");

    let (status, _) = post(&app, "/artists", json!({ "name": "Solo", "city": "   ", "state": "TX" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(store.venues.is_empty());
    assert!(store.artists.is_empty());
    Ok(())
}

#[tokio::test]
async fn patches_respect_column_limits() -> Result<()> {
    let (_, app) = seeded().await?;

    for body in [
        json!({ "phone": "9".repeat(200) }),
        json!({ "facebook_link": format!("https://facebook.com/{}", "x".repeat(120)) }),
        json!({ "image_link": format!("https://img.test/{}.png", "x".repeat(500)) }),
        json!({ "genres": (0..20).map(|i| format!("Genre {i}")).collect::<Vec<_>>() }),
        json!({ "name": "   " }),
    ] {
        let (status, reply) = send(&app, request(Method::PATCH, "/venues/2", None, Some(body.clone()))?).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "accepted {}", body);
        assert_eq!(reply["success"], false);
    }

    let (status, _) = send(
        &app,
        request(Method::PATCH, "/artists/1", None, Some(json!({ "phone": "9".repeat(200) })))?,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get(&app, "/venues/2").await?;
    assert_eq!(body["name"], "The Dueling Pianos Bar");
    assert_eq!(body["genres"], json!(["Jazz", "Folk"]));
    assert!(body["phone"].is_null());
    Ok(())
}

#[tokio::test]
async fn patch_updates_given_fields_only() -> Result<()> {
    let (_, app) = seeded().await?;

    let (status, body) = send(
        &app,
        request(
            Method::PATCH,
            "/venues/2",
            None,
            Some(json!({ "phone": "914-003-1132", "genres": ["Classical", "R&B"] })),
        )?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "patch failed: {}", body);
    assert_eq!(body["venue"]["phone"], "914-003-1132");
    assert_eq!(body["venue"]["genres"], json!(["Classical", "R&B"]));
    assert_eq!(body["venue"]["city"], "New York");

    let (status, body) = send(
        &app,
        request(Method::PATCH, "/artists/2", None, Some(json!({ "seeking_venue": true })))?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["artist"]["seeking_venue"], true);
    assert_eq!(body["artist"]["name"], "Matt Quevedo");

    let (status, _) = send(&app, request(Method::PATCH, "/artists/42", None, Some(json!({})))?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn deleting_a_venue_or_artist_cancels_its_shows() -> Result<()> {
    let (store, app) = seeded().await?;

    let (status, body) = send(&app, request(Method::DELETE, "/venues/1", None, None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], 1);
    assert_eq!(store.shows.len(), 1);

    let (status, _) = send(&app, request(Method::DELETE, "/venues/1", None, None)?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, request(Method::DELETE, "/artists/1", None, None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(store.shows.is_empty());

    let (_, body) = get(&app, "/shows").await?;
    assert_eq!(body["shows"], json!([]));
    Ok(())
}
