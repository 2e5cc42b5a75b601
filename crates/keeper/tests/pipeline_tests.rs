//! Ingestion and orchestration integration tests
//!
//! Everything runs against in-memory fakes: no network, no chain.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use alloy::primitives::{address, Address, B256};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use tokio::sync::Mutex;
use tower::ServiceExt;

use launchpad_keeper::api::{create_router, ApiState};
use launchpad_keeper::chain::ChainReader;
use launchpad_keeper::config::{ChainConfig, KeeperConfig};
use launchpad_keeper::executor::{Confirmation, LaunchExecutor, TxHandle};
use launchpad_keeper::launch::{LaunchService, PrepareOverrides};
use launchpad_keeper::mentions::MentionSource;
use launchpad_keeper::parser::PostParser;
use launchpad_keeper::scanner::Scanner;
use launchpad_keeper::store::{MemoryStore, RecordStore};
use launchpad_core::salt::SaltSearchEngine;
use launchpad_types::{LaunchError, LaunchParams, LaunchRequest, LaunchResult, LaunchStatus, Mention};

const WALLET_A: &str = "0x742d35cc6634c0532925a3b844bc9e7595f2bd12";
const WALLET_B: &str = "0x8ba1f109551bd432803012645ac136ddd64dba72";

struct FakeMentionSource {
    mentions: Mutex<Vec<Mention>>,
    replies: Mutex<Vec<(String, String)>>,
}

impl FakeMentionSource {
    fn new(mentions: Vec<Mention>) -> Self {
        Self {
            mentions: Mutex::new(mentions),
            replies: Mutex::new(Vec::new()),
        }
    }

    async fn replies(&self) -> Vec<(String, String)> {
        self.replies.lock().await.clone()
    }
}

#[async_trait]
impl MentionSource for FakeMentionSource {
    async fn fetch_mentions(
        &self,
        _since_id: Option<&str>,
        limit: usize,
    ) -> LaunchResult<Vec<Mention>> {
        let mentions = self.mentions.lock().await;
        Ok(mentions.iter().take(limit).cloned().collect())
    }

    async fn reply(&self, mention_id: &str, text: &str) -> LaunchResult<()> {
        self.replies
            .lock()
            .await
            .push((mention_id.to_string(), text.to_string()));
        Ok(())
    }
}

struct FakeChain;

#[async_trait]
impl ChainReader for FakeChain {
    async fn current_block(&self) -> LaunchResult<u64> {
        Ok(8_000_000)
    }

    async fn transaction_count(&self, _address: Address) -> LaunchResult<u64> {
        Ok(7)
    }
}

struct FakeExecutor {
    submissions: AtomicUsize,
    fail: bool,
}

impl FakeExecutor {
    fn succeeding() -> Self {
        Self {
            submissions: AtomicUsize::new(0),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            submissions: AtomicUsize::new(0),
            fail: true,
        }
    }
}

#[async_trait]
impl LaunchExecutor for FakeExecutor {
    async fn submit(&self, _params: &LaunchParams) -> LaunchResult<TxHandle> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(LaunchError::Submission("rpc unreachable".into()));
        }
        Ok(TxHandle {
            tx_hash: B256::repeat_byte(0x99),
        })
    }

    async fn await_confirmation(&self, handle: &TxHandle) -> LaunchResult<Confirmation> {
        Ok(Confirmation {
            token_address: address!("00000000000000000000000000000000000020a1"),
            tx_hash: handle.tx_hash,
        })
    }
}

fn test_config() -> KeeperConfig {
    KeeperConfig {
        chain: ChainConfig {
            launcher: address!("00000008412db3394C91A5CbD01635c6d140637C"),
            ..ChainConfig::default()
        },
        ..KeeperConfig::default()
    }
}

fn test_service() -> Arc<LaunchService> {
    Arc::new(LaunchService::new(
        Arc::new(FakeChain),
        SaltSearchEngine::new(),
        test_config(),
    ))
}

struct Harness {
    source: Arc<FakeMentionSource>,
    store: Arc<MemoryStore>,
    executor: Arc<FakeExecutor>,
    scanner: Scanner,
}

fn harness(mentions: Vec<Mention>, executor: FakeExecutor) -> Harness {
    let source = Arc::new(FakeMentionSource::new(mentions));
    let store = Arc::new(MemoryStore::new());
    let executor = Arc::new(executor);
    let scanner = Scanner::new(
        source.clone(),
        store.clone(),
        executor.clone(),
        test_service(),
        PostParser::new("!launchcoin"),
        24,
        100,
    );
    Harness {
        source,
        store,
        executor,
        scanner,
    }
}

fn launch_mention(id: &str, name: &str, symbol: &str, wallet: &str) -> Mention {
    Mention {
        id: id.to_string(),
        text: format!(
            "@bot !launchcoin\nname: {name}\nsymbol: {symbol}\nwallet: {wallet}\ndescription: test\nimage: https://iili.io/x.jpg"
        ),
        author_id: "42".into(),
        author_handle: "someone".into(),
        created_at: Utc::now(),
        url: format!("https://twitter.com/someone/status/{id}"),
    }
}

#[tokio::test]
async fn accepted_launch_runs_end_to_end() {
    let h = harness(
        vec![launch_mention("100", "Molty Coin", "molty", WALLET_A)],
        FakeExecutor::succeeding(),
    );

    let report = h.scanner.scan_once().await.unwrap();
    assert_eq!(report.mentions_found, 1);
    assert_eq!(report.launched, 1);
    assert_eq!(report.processed, 1);
    assert_eq!(report.failed, 0);
    assert_eq!(report.skipped, 0);
    assert!(report.errors.is_empty());

    let record = h.store.get("100").await.unwrap().unwrap();
    assert_eq!(record.status, LaunchStatus::Launched);
    assert_eq!(record.symbol, "MOLTY");
    assert_eq!(record.wallet, WALLET_A);
    assert!(record.token_address.is_some());
    assert!(record.tx_hash.is_some());
    assert!(record.launched_at.is_some());

    let replies = h.source.replies().await;
    assert_eq!(replies.len(), 1);
    assert!(replies[0].1.contains("Launch successful"));
}

#[tokio::test]
async fn duplicate_event_id_is_processed_at_most_once() {
    let h = harness(
        vec![launch_mention("200", "Molty Coin", "MOLTY", WALLET_A)],
        FakeExecutor::succeeding(),
    );

    let first = h.scanner.scan_once().await.unwrap();
    assert_eq!(first.launched, 1);

    // Same event delivered again on the next poll.
    let second = h.scanner.scan_once().await.unwrap();
    assert_eq!(second.launched, 0);
    assert_eq!(second.skipped, 1);

    assert_eq!(h.executor.submissions.load(Ordering::SeqCst), 1);
    assert_eq!(h.store.all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn second_launch_from_same_wallet_is_rate_limited() {
    let h = harness(
        vec![
            launch_mention("300", "First Coin", "FIRST", WALLET_A),
            launch_mention("301", "Second Coin", "SECOND", WALLET_A),
        ],
        FakeExecutor::succeeding(),
    );

    let report = h.scanner.scan_once().await.unwrap();
    assert_eq!(report.launched, 1);
    assert_eq!(report.skipped, 1);

    let replies = h.source.replies().await;
    let rate_limit_reply = replies
        .iter()
        .find(|(id, _)| id == "301")
        .expect("rate-limited event gets a reply");
    assert!(rate_limit_reply.1.contains("Rate limit"));

    // The rejected event is marked processed and never retried.
    assert!(h.store.is_processed("301").await.unwrap());
    assert!(h.store.get("301").await.unwrap().is_none());
}

#[tokio::test]
async fn symbol_uniqueness_is_case_insensitive() {
    let h = harness(
        vec![
            launch_mention("400", "Molty Coin", "molty", WALLET_A),
            launch_mention("401", "Other Coin", "MOLTY", WALLET_B),
        ],
        FakeExecutor::succeeding(),
    );

    let report = h.scanner.scan_once().await.unwrap();
    assert_eq!(report.launched, 1);
    assert_eq!(report.skipped, 1);

    let replies = h.source.replies().await;
    let duplicate_reply = replies
        .iter()
        .find(|(id, _)| id == "401")
        .expect("duplicate-symbol event gets a reply");
    assert!(duplicate_reply.1.contains("already launched"));
}

#[tokio::test]
async fn invalid_image_is_rejected_without_record() {
    let mut mention = launch_mention("500", "Molty Coin", "MOLTY", WALLET_A);
    mention.text = mention
        .text
        .replace("https://iili.io/x.jpg", "https://example.com/gallery/123");
    let h = harness(vec![mention], FakeExecutor::succeeding());

    let report = h.scanner.scan_once().await.unwrap();
    assert_eq!(report.skipped, 1);
    assert_eq!(report.launched, 0);
    assert!(h.store.get("500").await.unwrap().is_none());

    let replies = h.source.replies().await;
    assert_eq!(replies.len(), 1);
    assert!(replies[0].1.contains("image"));
}

#[tokio::test]
async fn mention_without_trigger_is_skipped_silently() {
    let mention = Mention {
        id: "510".into(),
        text: "@bot what does this thing do?".into(),
        author_id: "42".into(),
        author_handle: "someone".into(),
        created_at: Utc::now(),
        url: "https://twitter.com/someone/status/510".into(),
    };
    let h = harness(vec![mention], FakeExecutor::succeeding());

    let report = h.scanner.scan_once().await.unwrap();
    assert_eq!(report.skipped, 1);
    assert!(h.source.replies().await.is_empty());
    assert!(h.store.is_processed("510").await.unwrap());
}

#[tokio::test]
async fn execution_failure_is_terminal_and_isolated() {
    let h = harness(
        vec![
            launch_mention("600", "First Coin", "FIRST", WALLET_A),
            launch_mention("601", "Second Coin", "SECOND", WALLET_B),
        ],
        FakeExecutor::failing(),
    );

    let report = h.scanner.scan_once().await.unwrap();
    assert_eq!(report.failed, 2);
    assert_eq!(report.launched, 0);
    assert_eq!(report.errors.len(), 2);

    for id in ["600", "601"] {
        let record = h.store.get(id).await.unwrap().unwrap();
        assert_eq!(record.status, LaunchStatus::Failed);
        assert!(record.error.as_deref().unwrap().contains("rpc unreachable"));
    }
}

#[tokio::test]
async fn fallback_salt_is_flagged_unmined() {
    let service = test_service();
    let request = LaunchRequest {
        name: "Molty Coin".into(),
        symbol: "MOLTY".into(),
        wallet: WALLET_A.parse().unwrap(),
        description: "test".into(),
        image: "https://iili.io/x.jpg".into(),
        website: None,
        social: None,
    };

    let prepared = service
        .prepare(&request, &PrepareOverrides::default())
        .await
        .unwrap();
    assert!(!prepared.salt_mined);
    assert!(prepared.note.is_some());
    assert_ne!(prepared.launch_params.salt, B256::ZERO);
    assert_eq!(prepared.launch_params.migration_block, 8_000_500);
    assert_eq!(prepared.launch_params.sweep_block, 8_001_000);
}

fn api_harness(scan_secret: Option<String>) -> axum::Router {
    let h = harness(vec![], FakeExecutor::succeeding());
    create_router(ApiState {
        scanner: Arc::new(h.scanner),
        launch: test_service(),
        scan_secret,
    })
}

#[tokio::test]
async fn health_endpoint_responds() {
    let app = api_harness(None);
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn scan_endpoint_enforces_shared_secret() {
    let app = api_harness(Some("s3cret".into()));
    let response = app
        .clone()
        .oneshot(Request::get("/scan").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(
            Request::get("/scan")
                .header("authorization", "Bearer s3cret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn legacy_prepare_payload_gets_migration_error() {
    let app = api_harness(None);
    let response = app
        .oneshot(
            Request::post("/prepare-launch")
                .header("content-type", "application/json")
                .body(Body::from(format!(r#"{{"agentAddress":"{WALLET_A}"}}"#)))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("no longer supported"));
}

#[tokio::test]
async fn prepare_endpoint_assembles_params() {
    let app = api_harness(None);
    let payload = format!(
        r#"{{"tokenDetails":{{"name":"Molty Coin","symbol":"molty","wallet":"{WALLET_A}","description":"test","image":"https://iili.io/x.jpg"}}}}"#
    );
    let response = app
        .oneshot(
            Request::post("/prepare-launch")
                .header("content-type", "application/json")
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["saltMined"], false);
    assert_eq!(body["launchParams"]["symbol"], "MOLTY");
    assert_eq!(body["chainId"], 84532);
}
