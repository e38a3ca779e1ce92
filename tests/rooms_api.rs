//! Room API integration tests
//!
//! Exercises the REST surface end to end: creation rules, directory
//! listing, membership, and the delete cascade.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use huddle::model::{MessageView, RoomDetail, RoomView};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

async fn create_room(server: &TestServer, body: Value) -> RoomView {
    let response = server.post("/api/rooms").json(&body).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<RoomView>()
}

fn member_ids(room: &RoomView) -> Vec<&str> {
    room.members.iter().map(|member| member.id.as_str()).collect()
}

#[tokio::test]
async fn test_create_room_makes_creator_the_first_member() {
    let (server, state) = common::test_server().await;
    common::seed_user(&state.pool, "u1", "Ada", "https://cdn.test/ada.png").await;

    let room = create_room(&server, json!({ "name": "lounge", "creator": "u1" })).await;

    assert_eq!(room.name, "lounge");
    assert_eq!(room.creator.id, "u1");
    assert_eq!(room.creator.display_name, "Ada");
    assert_eq!(room.members.len(), 1);
    assert_eq!(room.members[0].id, "u1");
    assert!(room.is_public);
    assert_eq!(room.max_members, 50);
    assert!(room.tags.is_empty());
}

#[tokio::test]
async fn test_create_room_applies_optional_fields() {
    let (server, _state) = common::test_server().await;

    let room = create_room(
        &server,
        json!({
            "name": "  builders  ",
            "creator": "u1",
            "description": "<b>welcome</b> to ```<the>``` room",
            "isPublic": false,
            "maxMembers": 5,
            "tags": ["rust", " web ", ""],
        }),
    )
    .await;

    assert_eq!(room.name, "builders");
    assert_eq!(room.description, "welcome to ```<the>``` room");
    assert!(!room.is_public);
    assert_eq!(room.max_members, 5);
    assert_eq!(room.tags, vec!["rust".to_string(), "web".to_string()]);
}

#[tokio::test]
async fn test_create_room_rejects_blank_name() {
    let (server, _state) = common::test_server().await;

    let response = server
        .post("/api/rooms")
        .json(&json!({ "name": "   ", "creator": "u1" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Room name is required");
}

#[tokio::test]
async fn test_create_room_rejects_non_positive_cap() {
    let (server, _state) = common::test_server().await;

    let response = server
        .post("/api/rooms")
        .json(&json!({ "name": "tiny", "creator": "u1", "maxMembers": 0 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_room_returns_404_for_unknown_id() {
    let (server, _state) = common::test_server().await;

    let response = server.get("/api/rooms/does-not-exist").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Room not found");
}

#[tokio::test]
async fn test_join_room_is_idempotent() {
    let (server, _state) = common::test_server().await;
    let room = create_room(&server, json!({ "name": "lounge", "creator": "u1" })).await;

    let first = server
        .post(&format!("/api/rooms/{}/join", room.id))
        .json(&json!({ "userId": "u2" }))
        .await;
    first.assert_status_ok();
    assert_eq!(first.json::<RoomView>().members.len(), 2);

    let second = server
        .post(&format!("/api/rooms/{}/join", room.id))
        .json(&json!({ "userId": "u2" }))
        .await;
    second.assert_status_ok();
    assert_eq!(second.json::<RoomView>().members.len(), 2);
}

#[tokio::test]
async fn test_join_full_room_is_rejected() {
    let (server, _state) = common::test_server().await;
    let room = create_room(
        &server,
        json!({ "name": "solo", "creator": "u1", "maxMembers": 1 }),
    )
    .await;

    let response = server
        .post(&format!("/api/rooms/{}/join", room.id))
        .json(&json!({ "userId": "u2" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "Room is full");

    // Membership is unchanged.
    let detail = server
        .get(&format!("/api/rooms/{}", room.id))
        .await
        .json::<RoomDetail>();
    assert_eq!(detail.room.members.len(), 1);
}

#[tokio::test]
async fn test_full_room_rejects_even_an_existing_member() {
    // The capacity check runs before the idempotency check, so a member
    // re-joining a full room still sees the capacity failure.
    let (server, _state) = common::test_server().await;
    let room = create_room(
        &server,
        json!({ "name": "solo", "creator": "u1", "maxMembers": 1 }),
    )
    .await;

    let response = server
        .post(&format!("/api/rooms/{}/join", room.id))
        .json(&json!({ "userId": "u1" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "Room is full");
}

#[tokio::test]
async fn test_creator_cannot_leave() {
    let (server, _state) = common::test_server().await;
    let room = create_room(&server, json!({ "name": "lounge", "creator": "u1" })).await;

    let response = server
        .post(&format!("/api/rooms/{}/leave", room.id))
        .json(&json!({ "userId": "u1" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "Creator cannot leave the room"
    );

    let detail = server
        .get(&format!("/api/rooms/{}", room.id))
        .await
        .json::<RoomDetail>();
    assert_eq!(detail.room.members.len(), 1);
}

#[tokio::test]
async fn test_leave_room_removes_member() {
    let (server, _state) = common::test_server().await;
    let room = create_room(&server, json!({ "name": "lounge", "creator": "u1" })).await;

    server
        .post(&format!("/api/rooms/{}/join", room.id))
        .json(&json!({ "userId": "u2" }))
        .await
        .assert_status_ok();

    let response = server
        .post(&format!("/api/rooms/{}/leave", room.id))
        .json(&json!({ "userId": "u2" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], "Left room successfully");

    let detail = server
        .get(&format!("/api/rooms/{}", room.id))
        .await
        .json::<RoomDetail>();
    assert_eq!(detail.room.members.len(), 1);
    assert_eq!(detail.room.members[0].id, "u1");
}

#[tokio::test]
async fn test_membership_walkthrough() {
    let (server, _state) = common::test_server().await;
    let room = create_room(
        &server,
        json!({ "name": "rust-study", "creator": "u1", "maxMembers": 2 }),
    )
    .await;
    assert_eq!(member_ids(&room), vec!["u1"]);

    let joined = server
        .post(&format!("/api/rooms/{}/join", room.id))
        .json(&json!({ "userId": "u2" }))
        .await;
    joined.assert_status_ok();
    assert_eq!(member_ids(&joined.json::<RoomView>()), vec!["u1", "u2"]);

    let full = server
        .post(&format!("/api/rooms/{}/join", room.id))
        .json(&json!({ "userId": "u3" }))
        .await;
    full.assert_status(StatusCode::BAD_REQUEST);

    let creator_leave = server
        .post(&format!("/api/rooms/{}/leave", room.id))
        .json(&json!({ "userId": "u1" }))
        .await;
    creator_leave.assert_status(StatusCode::BAD_REQUEST);

    server
        .post(&format!("/api/rooms/{}/leave", room.id))
        .json(&json!({ "userId": "u2" }))
        .await
        .assert_status_ok();

    let detail = server
        .get(&format!("/api/rooms/{}", room.id))
        .await
        .json::<RoomDetail>();
    assert_eq!(member_ids(&detail.room), vec!["u1"]);
}

#[tokio::test]
async fn test_leaving_a_room_twice_still_succeeds() {
    let (server, _state) = common::test_server().await;
    let room = create_room(&server, json!({ "name": "lounge", "creator": "u1" })).await;

    for _ in 0..2 {
        let response = server
            .post(&format!("/api/rooms/{}/leave", room.id))
            .json(&json!({ "userId": "u2" }))
            .await;
        response.assert_status_ok();
    }
}

#[tokio::test]
async fn test_delete_room_cascades_to_messages() {
    let (server, state) = common::test_server().await;
    let room = create_room(&server, json!({ "name": "doomed", "creator": "u1" })).await;

    for content in ["one", "two"] {
        huddle::messages::db::append_message(&state.pool, &room.id, "u1", content, None)
            .await
            .expect("Failed to append message");
    }

    let response = server.delete(&format!("/api/rooms/{}", room.id)).await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        "Room deleted successfully"
    );

    server
        .get(&format!("/api/rooms/{}", room.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // The message log is gone with the room.
    let history = server
        .get(&format!("/api/rooms/{}/messages", room.id))
        .await;
    history.assert_status_ok();
    assert!(history.json::<Vec<MessageView>>().is_empty());

    let second_delete = server.delete(&format!("/api/rooms/{}", room.id)).await;
    second_delete.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_rooms_excludes_private_rooms() {
    let (server, _state) = common::test_server().await;
    create_room(&server, json!({ "name": "open", "creator": "u1" })).await;
    create_room(
        &server,
        json!({ "name": "secret", "creator": "u1", "isPublic": false }),
    )
    .await;

    let response = server.get("/api/rooms").await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    let rooms = body["rooms"].as_array().expect("rooms array");
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["name"], "open");
}

#[tokio::test]
async fn test_list_rooms_search_is_case_insensitive_substring() {
    let (server, _state) = common::test_server().await;
    create_room(&server, json!({ "name": "rust lounge", "creator": "u1" })).await;
    create_room(&server, json!({ "name": "Rustaceans", "creator": "u1" })).await;
    create_room(&server, json!({ "name": "python den", "creator": "u1" })).await;

    let response = server.get("/api/rooms").add_query_param("search", "rust").await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    let names: Vec<&str> = body["rooms"]
        .as_array()
        .expect("rooms array")
        .iter()
        .map(|room| room["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"rust lounge"));
    assert!(names.contains(&"Rustaceans"));
}

#[tokio::test]
async fn test_list_rooms_tag_filter_matches_any() {
    let (server, _state) = common::test_server().await;
    create_room(
        &server,
        json!({ "name": "a", "creator": "u1", "tags": ["rust"] }),
    )
    .await;
    create_room(
        &server,
        json!({ "name": "b", "creator": "u1", "tags": ["web"] }),
    )
    .await;
    create_room(
        &server,
        json!({ "name": "c", "creator": "u1", "tags": ["cooking"] }),
    )
    .await;

    let response = server
        .get("/api/rooms")
        .add_query_param("tags", "rust,web")
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["rooms"].as_array().expect("rooms array").len(), 2);
}

#[tokio::test]
async fn test_list_rooms_paginates_newest_first() {
    let (server, _state) = common::test_server().await;
    for name in ["first", "second", "third"] {
        create_room(&server, json!({ "name": name, "creator": "u1" })).await;
    }

    let page1 = server
        .get("/api/rooms")
        .add_query_param("page", "1")
        .add_query_param("limit", "2")
        .await
        .json::<Value>();
    assert_eq!(page1["totalPages"], 2);
    let names1: Vec<&str> = page1["rooms"]
        .as_array()
        .expect("rooms array")
        .iter()
        .map(|room| room["name"].as_str().unwrap())
        .collect();
    assert_eq!(names1, vec!["third", "second"]);

    let page2 = server
        .get("/api/rooms")
        .add_query_param("page", "2")
        .add_query_param("limit", "2")
        .await
        .json::<Value>();
    let names2: Vec<&str> = page2["rooms"]
        .as_array()
        .expect("rooms array")
        .iter()
        .map(|room| room["name"].as_str().unwrap())
        .collect();
    assert_eq!(names2, vec!["first"]);
}

#[tokio::test]
async fn test_list_rooms_handles_extreme_pagination() {
    let (server, _state) = common::test_server().await;
    create_room(&server, json!({ "name": "lounge", "creator": "u1" })).await;

    // A limit at the integer ceiling fits everything on one page.
    let response = server
        .get("/api/rooms")
        .add_query_param("limit", i64::MAX.to_string())
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["rooms"].as_array().expect("rooms array").len(), 1);
    assert_eq!(body["totalPages"], 1);

    // A page at the ceiling is past the end of the directory.
    let response = server
        .get("/api/rooms")
        .add_query_param("page", i64::MAX.to_string())
        .add_query_param("limit", "2")
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert!(body["rooms"].as_array().expect("rooms array").is_empty());
    assert_eq!(body["totalPages"], 1);
}

#[tokio::test]
async fn test_room_detail_embeds_recent_messages_oldest_first() {
    let (server, state) = common::test_server().await;
    common::seed_user(&state.pool, "u1", "Ada", "").await;
    let room = create_room(&server, json!({ "name": "lounge", "creator": "u1" })).await;

    for content in ["alpha", "beta", "gamma"] {
        huddle::messages::db::append_message(&state.pool, &room.id, "u1", content, None)
            .await
            .expect("Failed to append message");
    }

    let detail = server
        .get(&format!("/api/rooms/{}", room.id))
        .await
        .json::<RoomDetail>();

    let contents: Vec<&str> = detail
        .messages
        .iter()
        .map(|message| message.content.as_str())
        .collect();
    assert_eq!(contents, vec!["alpha", "beta", "gamma"]);
    assert_eq!(detail.messages[0].author.display_name, "Ada");

    // The history endpoint agrees with the embedded view.
    let history = server
        .get(&format!("/api/rooms/{}/messages", room.id))
        .add_query_param("page", "1")
        .add_query_param("limit", "3")
        .await
        .json::<Vec<MessageView>>();
    let history_contents: Vec<&str> = history
        .iter()
        .map(|message| message.content.as_str())
        .collect();
    assert_eq!(history_contents, contents);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (server, _state) = common::test_server().await;
    server.get("/api/nope").await.assert_status(StatusCode::NOT_FOUND);
}
