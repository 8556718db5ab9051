//! End-to-end API tests over a real socket.

use rps_escrow_core::{Choice, Commitment};
use rps_escrow_service::{app, state::AppState};
use serde_json::{json, Value};

/// Serve the app on an ephemeral port and return its base URL
async fn spawn_app() -> String {
    let state = AppState::new(1000);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.unwrap();
    });
    format!("http://{addr}")
}

async fn create_account(client: &reqwest::Client, base: &str, name: &str) -> Value {
    client
        .post(format!("{base}/api/accounts"))
        .json(&json!({"name": name}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn balance_of(client: &reqwest::Client, base: &str, id: &str) -> u64 {
    let body: Value = client
        .get(format!("{base}/api/accounts/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body["balance"].as_u64().unwrap()
}

#[tokio::test]
async fn full_match_over_http() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let alice = create_account(&client, &base, "carol").await;
    let bob = create_account(&client, &base, "dave").await;
    let alice_id = alice["id"].as_str().unwrap().to_string();
    let bob_id = bob["id"].as_str().unwrap().to_string();
    assert_eq!(alice["balance"].as_u64(), Some(1000));

    // Carol creates a match.
    let created: Value = client
        .post(format!("{base}/api/matches"))
        .header("X-Account-Id", &alice_id)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let match_id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["state"], "awaiting_commit");

    // The match shows up in the discovery list.
    let listed: Value = client
        .get(format!("{base}/api/matches"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listed
        .as_array()
        .unwrap()
        .iter()
        .any(|m| m["id"] == match_id.as_str()));

    // Carol opens with a commitment to Rock.
    let commitment = Commitment::new(Choice::Rock, b"saltA").to_string();
    let opened: Value = client
        .post(format!("{base}/api/matches/{match_id}/open"))
        .header("X-Account-Id", &alice_id)
        .json(&json!({"commitment": commitment, "value": 100}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(opened["state"], "awaiting_join");
    assert_eq!(opened["escrowed"].as_u64(), Some(100));
    assert_eq!(balance_of(&client, &base, &alice_id).await, 900);

    // Dave joins with Scissors.
    let joined: Value = client
        .post(format!("{base}/api/matches/{match_id}/join"))
        .header("X-Account-Id", &bob_id)
        .json(&json!({"choice": 3, "value": 100}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(joined["state"], "awaiting_reveal");
    assert_eq!(joined["escrowed"].as_u64(), Some(200));

    // A reveal with the wrong secret is rejected and changes nothing.
    let bad = client
        .post(format!("{base}/api/matches/{match_id}/reveal"))
        .header("X-Account-Id", &alice_id)
        .json(&json!({"choice": 1, "secret": "saltB"}))
        .send()
        .await
        .unwrap();
    assert_eq!(bad.status(), 400);
    let bad_body: Value = bad.json().await.unwrap();
    assert_eq!(bad_body["kind"], "commitment_mismatch");

    // The correct reveal resolves the match and pays the pot.
    let revealed: Value = client
        .post(format!("{base}/api/matches/{match_id}/reveal"))
        .header("X-Account-Id", &alice_id)
        .json(&json!({"choice": 1, "secret": "saltA"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(revealed["outcome"], "initiator_wins");
    assert_eq!(revealed["match"]["state"], "resolved");
    assert_eq!(revealed["match"]["escrowed"].as_u64(), Some(0));
    assert_eq!(balance_of(&client, &base, &alice_id).await, 1100);
    assert_eq!(balance_of(&client, &base, &bob_id).await, 900);
}

#[tokio::test]
async fn join_value_and_role_rejections() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let alice = create_account(&client, &base, "erin").await;
    let bob = create_account(&client, &base, "frank").await;
    let alice_id = alice["id"].as_str().unwrap().to_string();
    let bob_id = bob["id"].as_str().unwrap().to_string();

    let created: Value = client
        .post(format!("{base}/api/matches"))
        .header("X-Account-Id", &alice_id)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let match_id = created["id"].as_str().unwrap().to_string();

    let commitment = Commitment::new(Choice::Paper, b"pepper").to_string();
    client
        .post(format!("{base}/api/matches/{match_id}/open"))
        .header("X-Account-Id", &alice_id)
        .json(&json!({"commitment": commitment, "value": 100}))
        .send()
        .await
        .unwrap();

    // Missing caller header.
    let resp = client
        .post(format!("{base}/api/matches/{match_id}/join"))
        .json(&json!({"choice": 1, "value": 100}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    // Self-play.
    let resp = client
        .post(format!("{base}/api/matches/{match_id}/join"))
        .header("X-Account-Id", &alice_id)
        .json(&json!({"choice": 1, "value": 100}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    // Invalid choice encoding.
    let resp = client
        .post(format!("{base}/api/matches/{match_id}/join"))
        .header("X-Account-Id", &bob_id)
        .json(&json!({"choice": 4, "value": 100}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "invalid_choice");

    // Off-by-one stake.
    let resp = client
        .post(format!("{base}/api/matches/{match_id}/join"))
        .header("X-Account-Id", &bob_id)
        .json(&json!({"choice": 1, "value": 99}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "value_mismatch");

    // Exact stake succeeds.
    let resp = client
        .post(format!("{base}/api/matches/{match_id}/join"))
        .header("X-Account-Id", &bob_id)
        .json(&json!({"choice": 1, "value": 100}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // A second join hits the wrong state.
    let resp = client
        .post(format!("{base}/api/matches/{match_id}/join"))
        .header("X-Account-Id", &bob_id)
        .json(&json!({"choice": 2, "value": 100}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
}

#[tokio::test]
async fn open_requires_valid_commitment_hex() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let alice = create_account(&client, &base, "grace").await;
    let alice_id = alice["id"].as_str().unwrap().to_string();

    let created: Value = client
        .post(format!("{base}/api/matches"))
        .header("X-Account-Id", &alice_id)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let match_id = created["id"].as_str().unwrap().to_string();

    // Not hex at all.
    let resp = client
        .post(format!("{base}/api/matches/{match_id}/open"))
        .header("X-Account-Id", &alice_id)
        .json(&json!({"commitment": "not-hex", "value": 100}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Hex but wrong width.
    let resp = client
        .post(format!("{base}/api/matches/{match_id}/open"))
        .header("X-Account-Id", &alice_id)
        .json(&json!({"commitment": "deadbeef", "value": 100}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Zero wager is rejected even with a valid commitment.
    let commitment = Commitment::new(Choice::Rock, b"salt").to_string();
    let resp = client
        .post(format!("{base}/api/matches/{match_id}/open"))
        .header("X-Account-Id", &alice_id)
        .json(&json!({"commitment": commitment, "value": 0}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "value_mismatch");
}
