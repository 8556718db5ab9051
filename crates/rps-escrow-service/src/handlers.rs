//! HTTP API handlers.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use rps_escrow_core::{AccountId, Choice, Commitment, Ledger, LedgerError, MatchError, MatchId};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::models::*;
use crate::state::AppState;

type ApiResponse = (StatusCode, Json<Value>);

// ============ Helpers ============

fn caller_from_header(headers: &HeaderMap) -> Option<AccountId> {
    headers
        .get("X-Account-Id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(AccountId::from_uuid)
}

fn missing_caller() -> ApiResponse {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Missing X-Account-Id header"})),
    )
}

fn match_not_found(id: Uuid) -> ApiResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": format!("Unknown match: {id}")})),
    )
}

/// Map a rejected operation to a status code and a stable error kind.
///
/// Authorization failures are 403, wrong-state calls 409, client-correctable
/// input errors 400. A ledger failure during payout is the host's problem,
/// not the caller's, so it maps to 502; the match stays retryable.
fn reject(err: MatchError) -> ApiResponse {
    let (status, kind) = match &err {
        MatchError::Unauthorized => (StatusCode::FORBIDDEN, "unauthorized"),
        MatchError::InvalidState(_) => (StatusCode::CONFLICT, "invalid_state"),
        MatchError::ZeroWager | MatchError::WrongValue { .. } => {
            (StatusCode::BAD_REQUEST, "value_mismatch")
        }
        MatchError::InvalidChoice(_) => (StatusCode::BAD_REQUEST, "invalid_choice"),
        MatchError::CommitmentMismatch => (StatusCode::BAD_REQUEST, "commitment_mismatch"),
        MatchError::Transfer(LedgerError::AccountFrozen(_)) => {
            (StatusCode::BAD_GATEWAY, "transfer_failure")
        }
        MatchError::Transfer(_) => (StatusCode::BAD_REQUEST, "transfer_failure"),
    };
    (
        status,
        Json(json!({"error": err.to_string(), "kind": kind})),
    )
}

// ============ Account handlers ============

pub async fn create_account(
    State(state): State<AppState>,
    Json(req): Json<CreateAccountRequest>,
) -> ApiResponse {
    if state.get_account_by_name(&req.name).is_some() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Account name already exists"})),
        );
    }

    let account = state.register_account(req.name);
    let balance = state.ledger.balance(&account.id).unwrap_or(0);
    tracing::info!(id = %account.id, name = %account.name, "account registered");

    (
        StatusCode::OK,
        Json(json!(AccountResponse::new(account, balance))),
    )
}

pub async fn list_accounts(State(state): State<AppState>) -> ApiResponse {
    let accounts: Vec<AccountResponse> = state
        .list_accounts()
        .into_iter()
        .map(|a| {
            let balance = state.ledger.balance(&a.id).unwrap_or(0);
            AccountResponse::new(a, balance)
        })
        .collect();

    (StatusCode::OK, Json(json!(accounts)))
}

pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResponse {
    let id = AccountId::from_uuid(id);
    match state.get_account(&id) {
        Some(account) => {
            let balance = state.ledger.balance(&id).unwrap_or(0);
            (
                StatusCode::OK,
                Json(json!(AccountResponse::new(account, balance))),
            )
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Unknown account"})),
        ),
    }
}

// ============ Match handlers ============

pub async fn create_match(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResponse {
    let caller = match caller_from_header(&headers) {
        Some(id) => id,
        None => return missing_caller(),
    };
    if state.get_account(&caller).is_none() {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Unknown account"})),
        );
    }

    let id = state.registry.create_match(caller);
    match state.registry.get(&id) {
        Some(game) => {
            let view = game.lock().unwrap().view();
            (StatusCode::OK, Json(json!(MatchResponse::new(id, view))))
        }
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Match vanished after creation"})),
        ),
    }
}

pub async fn list_matches(State(state): State<AppState>) -> ApiResponse {
    let matches: Vec<MatchResponse> = state
        .registry
        .list_matches()
        .into_iter()
        .filter_map(|id| {
            let game = state.registry.get(&id)?;
            let view = game.lock().unwrap().view();
            Some(MatchResponse::new(id, view))
        })
        .collect();

    (StatusCode::OK, Json(json!(matches)))
}

pub async fn get_match(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResponse {
    let match_id = MatchId::from_uuid(id);
    match state.registry.get(&match_id) {
        Some(game) => {
            let view = game.lock().unwrap().view();
            (
                StatusCode::OK,
                Json(json!(MatchResponse::new(match_id, view))),
            )
        }
        None => match_not_found(id),
    }
}

pub async fn open_match(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<OpenMatchRequest>,
) -> ApiResponse {
    let caller = match caller_from_header(&headers) {
        Some(id) => id,
        None => return missing_caller(),
    };

    let commitment = match decode_commitment(&req.commitment) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    let match_id = MatchId::from_uuid(id);
    let game = match state.registry.get(&match_id) {
        Some(game) => game,
        None => return match_not_found(id),
    };

    let mut game = game.lock().unwrap();
    match game.open(caller, commitment, req.value, &state.ledger) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!(MatchResponse::new(match_id, game.view()))),
        ),
        Err(err) => reject(err),
    }
}

pub async fn join_match(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<JoinMatchRequest>,
) -> ApiResponse {
    let caller = match caller_from_header(&headers) {
        Some(id) => id,
        None => return missing_caller(),
    };

    let choice = match Choice::from_byte(req.choice) {
        Ok(c) => c,
        Err(err) => return reject(err),
    };

    let match_id = MatchId::from_uuid(id);
    let game = match state.registry.get(&match_id) {
        Some(game) => game,
        None => return match_not_found(id),
    };

    let mut game = game.lock().unwrap();
    match game.join(caller, choice, req.value, &state.ledger) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!(MatchResponse::new(match_id, game.view()))),
        ),
        Err(err) => reject(err),
    }
}

pub async fn reveal_match(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<RevealMatchRequest>,
) -> ApiResponse {
    let caller = match caller_from_header(&headers) {
        Some(id) => id,
        None => return missing_caller(),
    };

    let choice = match Choice::from_byte(req.choice) {
        Ok(c) => c,
        Err(err) => return reject(err),
    };

    let match_id = MatchId::from_uuid(id);
    let game = match state.registry.get(&match_id) {
        Some(game) => game,
        None => return match_not_found(id),
    };

    let mut game = game.lock().unwrap();
    match game.reveal(caller, choice, req.secret.as_bytes(), &state.ledger) {
        Ok(outcome) => (
            StatusCode::OK,
            Json(json!({
                "outcome": outcome,
                "match": MatchResponse::new(match_id, game.view()),
            })),
        ),
        Err(err) => reject(err),
    }
}

fn decode_commitment(hex_str: &str) -> Result<Commitment, ApiResponse> {
    let bytes = hex::decode(hex_str).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Commitment must be hex encoded"})),
        )
    })?;
    let bytes: [u8; 32] = bytes.try_into().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Commitment must be exactly 32 bytes"})),
        )
    })?;
    Ok(Commitment::from_bytes(bytes))
}
