use std::{
    collections::VecDeque,
    fmt::{Debug, Formatter},
    path::PathBuf,
    str::FromStr,
    sync::Arc,
    time::Duration,
};

use axum::{
    body::Body,
    error_handling::HandleErrorLayer,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use http::Request;
use indexmap::IndexMap;
use kakubi_merkle_tree::tree_node::TreeNode;
use kakubi_merkle_verify::Address;
use kakubi_token::{process_signed_instruction, KakubiToken, SignedInstruction, TokenEvent};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower::{
    buffer::BufferLayer, limit::RateLimitLayer, load_shed::LoadShedLayer, timeout::TimeoutLayer,
    ServiceBuilder,
};
use tower_http::{
    trace::{DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::{info, instrument, Span};

use crate::{error, error::ApiError, Result};

/// Events kept in memory; older ones are dropped from the front.
pub const MAX_RETAINED_EVENTS: usize = 100_000;
pub const DEFAULT_EVENTS_PAGE: usize = 100;
pub const MAX_EVENTS_PAGE: usize = 1_000;

/// Token state plus a bounded log of the events it has emitted since start.
/// Both live under one lock so the log order is the execution order.
#[derive(Debug)]
pub struct Store {
    pub token: KakubiToken,
    events: VecDeque<TokenEvent>,
    /// Log position of `events[0]`
    first_event: usize,
    capacity: usize,
}

/// A window of the event log. Positions are stable across trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPage {
    pub from: usize,
    /// Position to ask for next
    pub next: usize,
    pub events: Vec<TokenEvent>,
}

impl Store {
    pub fn new(token: KakubiToken, capacity: usize) -> Self {
        Self {
            token,
            events: VecDeque::new(),
            first_event: 0,
            capacity,
        }
    }

    /// Appends `events`, dropping the oldest entries past capacity.
    pub fn record(&mut self, events: &[TokenEvent]) {
        self.events.extend(events.iter().cloned());
        while self.events.len() > self.capacity {
            self.events.pop_front();
            self.first_event += 1;
        }
    }

    /// Position the next recorded event will take.
    pub fn next_event(&self) -> usize {
        self.first_event + self.events.len()
    }

    /// Up to `limit` events starting at `from`, or at the oldest retained one.
    pub fn events_page(&self, from: usize, limit: usize) -> EventPage {
        let from = from.clamp(self.first_event, self.next_event());
        let events: Vec<_> = self
            .events
            .iter()
            .skip(from - self.first_event)
            .take(limit)
            .cloned()
            .collect();
        EventPage {
            from,
            next: from + events.len(),
            events,
        }
    }
}

pub struct RouterState {
    pub store: RwLock<Store>,
    /// Allocation tree, when one was loaded; enables `/proof`
    pub tree: Option<IndexMap<Address, Vec<TreeNode>>>,
    /// Snapshot rewritten after every successful instruction
    pub state_path: Option<PathBuf>,
}

impl RouterState {
    pub fn new(
        token: KakubiToken,
        tree: Option<IndexMap<Address, Vec<TreeNode>>>,
        state_path: Option<PathBuf>,
    ) -> Self {
        Self {
            store: RwLock::new(Store::new(token, MAX_RETAINED_EVENTS)),
            tree,
            state_path,
        }
    }
}

impl Debug for RouterState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterState")
            .field("tree", &self.tree.as_ref().map(|t| t.len()))
            .field("state_path", &self.state_path)
            .finish()
    }
}

#[instrument]
pub fn get_routes(state: Arc<RouterState>) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(error::handle_error))
        .layer(BufferLayer::new(100))
        .layer(RateLimitLayer::new(1000, Duration::from_secs(10)))
        .layer(TimeoutLayer::new(Duration::from_secs(20)))
        .layer(LoadShedLayer::new())
        .layer(
            TraceLayer::new_for_http()
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started {} {}", request.method(), request.uri().path())
                })
                .on_response(
                    DefaultOnResponse::new()
                        .level(tracing_core::Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        );

    let mut router = Router::new()
        .route("/", get(root))
        .route("/total_supply", get(get_total_supply))
        .route("/balance/:address", get(get_balance))
        .route("/allowance/:owner/:spender", get(get_allowance))
        .route("/nonce/:address", get(get_nonce))
        .route("/claimed/:index", get(get_claimed))
        .route("/distributor", get(get_distributor))
        .route("/fee", get(get_fee))
        .route("/events", get(get_events))
        .route("/execute", post(execute));

    if state.tree.is_some() {
        router = router.route("/proof/:address", get(get_proof));
    }

    router.layer(middleware).with_state(state)
}

/// Runs one signed instruction under the write lock. Instructions are totally
/// ordered: a second claim of the same index always sees the first one's bit.
///
/// The instruction runs against a copy of the token. The copy replaces the
/// served state only once its snapshot is on disk, so a failed write leaves
/// state and event log as they were.
#[instrument(skip(state), err)]
async fn execute(
    State(state): State<Arc<RouterState>>,
    Json(request): Json<SignedInstruction>,
) -> Result<Json<Vec<TokenEvent>>> {
    let mut store = state.store.write().await;
    let mut token = store.token.clone();
    let events = process_signed_instruction(&mut token, &request)?;

    if let Some(path) = &state.state_path {
        write_snapshot(path, &token).await?;
    }

    store.token = token;
    store.record(&events);
    Ok(Json(events))
}

/// Writes beside `path` first, then renames over it.
async fn write_snapshot(path: &std::path::Path, token: &KakubiToken) -> Result<()> {
    let snapshot = serde_json::to_vec_pretty(token)?;
    let staging = path.with_extension("tmp");
    tokio::fs::write(&staging, snapshot).await?;
    tokio::fs::rename(&staging, path).await?;
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
struct Nonce {
    address: Address,
    nonce: u64,
}

#[instrument(skip(state), ret)]
async fn get_nonce(
    State(state): State<Arc<RouterState>>,
    Path(address): Path<String>,
) -> Result<Json<Nonce>> {
    let address = Address::from_str(&address)?;
    let store = state.store.read().await;
    Ok(Json(Nonce {
        address,
        nonce: store.token.nonce_of(&address),
    }))
}

#[derive(Debug, Serialize, Deserialize)]
struct Balance {
    address: Address,
    balance: u128,
}

#[instrument(skip(state), ret)]
async fn get_balance(
    State(state): State<Arc<RouterState>>,
    Path(address): Path<String>,
) -> Result<Json<Balance>> {
    let address = Address::from_str(&address)?;
    let store = state.store.read().await;
    Ok(Json(Balance {
        address,
        balance: store.token.balance_of(&address),
    }))
}

#[derive(Debug, Serialize, Deserialize)]
struct Allowance {
    owner: Address,
    spender: Address,
    allowance: u128,
}

#[instrument(skip(state), ret)]
async fn get_allowance(
    State(state): State<Arc<RouterState>>,
    Path((owner, spender)): Path<(String, String)>,
) -> Result<Json<Allowance>> {
    let owner = Address::from_str(&owner)?;
    let spender = Address::from_str(&spender)?;
    let store = state.store.read().await;
    Ok(Json(Allowance {
        owner,
        spender,
        allowance: store.token.allowance(&owner, &spender),
    }))
}

#[derive(Debug, Serialize, Deserialize)]
struct TotalSupply {
    total_supply: u128,
}

async fn get_total_supply(State(state): State<Arc<RouterState>>) -> Json<TotalSupply> {
    let store = state.store.read().await;
    Json(TotalSupply {
        total_supply: store.token.total_supply(),
    })
}

#[derive(Debug, Serialize, Deserialize)]
struct Claimed {
    index: u64,
    claimed: bool,
}

async fn get_claimed(
    State(state): State<Arc<RouterState>>,
    Path(index): Path<u64>,
) -> Json<Claimed> {
    let store = state.store.read().await;
    Json(Claimed {
        index,
        claimed: store.token.is_claimed(index),
    })
}

#[derive(Debug, Serialize, Deserialize)]
struct Distributor {
    controller: Address,
    pool: Address,
    root: String,
    /// Minted but not yet claimed
    balance: u128,
    claimed_count: u64,
}

async fn get_distributor(State(state): State<Arc<RouterState>>) -> Json<Distributor> {
    let store = state.store.read().await;
    let token = &store.token;
    Json(Distributor {
        controller: token.controller,
        pool: token.pool,
        root: format!("0x{}", hex::encode(token.root)),
        balance: token.distributor_balance(),
        claimed_count: token.claimed_bitmap.claimed_count(),
    })
}

#[derive(Debug, Serialize, Deserialize)]
struct Fee {
    numerator: u64,
    denominator: u64,
    receiver: Option<Address>,
    beneficiary: Option<Address>,
    swap_address: Option<Address>,
    exempt_fee_receiver: bool,
    fee_exempt: Vec<Address>,
}

async fn get_fee(State(state): State<Arc<RouterState>>) -> Json<Fee> {
    let store = state.store.read().await;
    let token = &store.token;
    Json(Fee {
        numerator: token.fee.numerator,
        denominator: token.fee.denominator,
        receiver: token.fee_receiver(),
        beneficiary: token.beneficiary,
        swap_address: token.swap_address,
        exempt_fee_receiver: token.fee.exempt_fee_receiver,
        fee_exempt: token.fee_exempt.iter().copied().collect(),
    })
}

#[derive(Debug, Deserialize)]
struct EventsQuery {
    /// Skip events before this position in the log
    from: Option<usize>,
    limit: Option<usize>,
}

async fn get_events(
    State(state): State<Arc<RouterState>>,
    Query(query): Query<EventsQuery>,
) -> Json<EventPage> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_EVENTS_PAGE)
        .min(MAX_EVENTS_PAGE);
    let store = state.store.read().await;
    Json(store.events_page(query.from.unwrap_or(0), limit))
}

#[derive(Debug, Serialize, Deserialize)]
struct Proof {
    index: u64,
    amount: u128,
    proof: Vec<[u8; 32]>,
}

/// Retrieve the proofs for every allocation held by a given user
#[instrument(skip(state), ret)]
async fn get_proof(
    State(state): State<Arc<RouterState>>,
    Path(address): Path<String>,
) -> Result<Json<Vec<Proof>>> {
    let address = Address::from_str(&address)?;
    let nodes = state
        .tree
        .as_ref()
        .and_then(|tree| tree.get(&address))
        .ok_or_else(|| ApiError::UserNotFound(address.to_string()))?;

    let proofs = nodes
        .iter()
        .map(|node| -> Result<Proof> {
            Ok(Proof {
                index: node.index,
                amount: node.amount(),
                proof: node
                    .proof
                    .to_owned()
                    .ok_or_else(|| ApiError::ProofNotFound(address.to_string()))?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Json(proofs))
}

async fn root() -> impl IntoResponse {
    "Kakubi Token API"
}
