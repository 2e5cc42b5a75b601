//! Ingestion, dedup, and launch orchestration
//!
//! One scan cycle fetches a bounded batch of mentions and processes them
//! sequentially. Each event is marked processed before any other work, so a
//! crash between marking and completion loses the event rather than risking
//! a duplicate on-chain submission. Per-event errors become failed records
//! and batch error entries; they never abort the rest of the batch.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{error, info, warn};

use launchpad_types::{
    LaunchError, LaunchRecord, LaunchRequest, LaunchResult, LaunchStatus, Mention, ScanReport,
};

use crate::executor::{Confirmation, LaunchExecutor};
use crate::launch::{LaunchService, PrepareOverrides};
use crate::mentions::MentionSource;
use crate::parser::PostParser;
use crate::store::RecordStore;

pub struct Scanner {
    source: Arc<dyn MentionSource>,
    store: Arc<dyn RecordStore>,
    executor: Arc<dyn LaunchExecutor>,
    launch: Arc<LaunchService>,
    parser: PostParser,
    rate_limit_hours: u64,
    batch_limit: usize,
}

impl Scanner {
    pub fn new(
        source: Arc<dyn MentionSource>,
        store: Arc<dyn RecordStore>,
        executor: Arc<dyn LaunchExecutor>,
        launch: Arc<LaunchService>,
        parser: PostParser,
        rate_limit_hours: u64,
        batch_limit: usize,
    ) -> Self {
        Self {
            source,
            store,
            executor,
            launch,
            parser,
            rate_limit_hours,
            batch_limit,
        }
    }

    /// Run one poll cycle. Returns `Err` only for invocation-level failures
    /// (missing credentials, mention source down); per-event outcomes land
    /// in the report.
    pub async fn scan_once(&self) -> LaunchResult<ScanReport> {
        self.executor.ready()?;

        let since_id = self.latest_event_id().await?;
        let mentions = self
            .source
            .fetch_mentions(since_id.as_deref(), self.batch_limit)
            .await?;

        let mut report = ScanReport {
            mentions_found: mentions.len(),
            ..ScanReport::default()
        };

        for mention in &mentions {
            if self.store.is_processed(&mention.id).await? {
                report.skipped += 1;
                continue;
            }
            // Mark before any side effect so duplicate delivery stays safe
            // even across a crash.
            self.store.mark_processed(&mention.id).await?;

            match self.process_mention(mention).await {
                Ok(confirmation) => {
                    report.processed += 1;
                    report.launched += 1;
                    info!(
                        event_id = %mention.id,
                        token = %confirmation.token_address,
                        "launch confirmed"
                    );
                }
                Err(e) if e.is_rejection() => {
                    report.skipped += 1;
                    self.reply_rejection(mention, &e).await;
                }
                Err(e) => {
                    report.processed += 1;
                    report.failed += 1;
                    report.errors.push(format!("event {}: {e}", mention.id));
                    error!(event_id = %mention.id, "launch failed: {e}");
                }
            }
        }

        Ok(report)
    }

    /// Parse, validate, rate-limit, uniqueness-check, then orchestrate one
    /// accepted event through to confirmation.
    async fn process_mention(&self, mention: &Mention) -> Result<Confirmation, LaunchError> {
        let request = self.parser.parse(&mention.text)?;
        self.check_rate_limit(&request).await?;
        self.check_symbol_unique(&request).await?;

        let mut record = LaunchRecord {
            event_id: mention.id.clone(),
            event_url: mention.url.clone(),
            author_handle: mention.author_handle.clone(),
            author_id: mention.author_id.clone(),
            name: request.name.clone(),
            symbol: request.symbol.clone(),
            wallet: format!("{:#x}", request.wallet),
            token_address: None,
            tx_hash: None,
            status: LaunchStatus::Processing,
            error: None,
            created_at: mention.created_at,
            launched_at: None,
        };
        self.store.save(record.clone()).await?;

        match self.execute(&request).await {
            Ok(confirmation) => {
                record.token_address = Some(format!("{:#x}", confirmation.token_address));
                record.tx_hash = Some(format!("{:#x}", confirmation.tx_hash));
                record.status = LaunchStatus::Launched;
                record.launched_at = Some(Utc::now());
                self.store.save(record).await?;

                let reply = format!(
                    "Launch successful!\n\nToken: {} ({})\nAddress: {:#x}\nTx: {:#x}",
                    request.name, request.symbol, confirmation.token_address, confirmation.tx_hash
                );
                if let Err(e) = self.source.reply(&mention.id, &reply).await {
                    warn!(event_id = %mention.id, "success reply failed: {e}");
                }
                Ok(confirmation)
            }
            Err(e) => {
                record.status = LaunchStatus::Failed;
                record.error = Some(e.to_string());
                self.store.save(record).await?;
                Err(e)
            }
        }
    }

    async fn execute(&self, request: &LaunchRequest) -> Result<Confirmation, LaunchError> {
        let prepared = self
            .launch
            .prepare(request, &PrepareOverrides::default())
            .await?;
        if !prepared.salt_mined {
            warn!(
                symbol = %request.symbol,
                "launching with unmined salt; hook flags will not be encoded"
            );
        }
        let handle = self.executor.submit(&prepared.launch_params).await?;
        self.executor.await_confirmation(&handle).await
    }

    /// At most one accepted launch per wallet per rolling window.
    async fn check_rate_limit(&self, request: &LaunchRequest) -> LaunchResult<()> {
        let wallet = format!("{:#x}", request.wallet);
        let since = Utc::now() - Duration::hours(self.rate_limit_hours as i64);
        let recent = self.store.by_wallet(&wallet, Some(since)).await?;
        if recent.is_empty() {
            Ok(())
        } else {
            Err(LaunchError::RateLimited {
                wallet,
                window_hours: self.rate_limit_hours,
            })
        }
    }

    /// Symbols are unique across all prior records, case-insensitively.
    async fn check_symbol_unique(&self, request: &LaunchRequest) -> LaunchResult<()> {
        let existing = self.store.all().await?;
        if existing
            .iter()
            .any(|r| r.symbol.eq_ignore_ascii_case(&request.symbol))
        {
            Err(LaunchError::DuplicateSymbol(request.symbol.clone()))
        } else {
            Ok(())
        }
    }

    async fn reply_rejection(&self, mention: &Mention, error: &LaunchError) {
        let text = match error {
            LaunchError::RateLimited { window_hours, .. } => format!(
                "Rate limit: 1 launch per {window_hours} hours per wallet. Please wait."
            ),
            LaunchError::DuplicateSymbol(symbol) => format!(
                "Symbol {symbol} already launched. Choose a different symbol."
            ),
            LaunchError::Validation(reason) => {
                // A post without the trigger was never a launch attempt;
                // stay silent instead of replying to random mentions.
                if !self.parser.contains_trigger(&mention.text) {
                    info!(event_id = %mention.id, "mention skipped: {error}");
                    return;
                }
                format!("Launch request invalid: {reason}")
            }
            _ => {
                info!(event_id = %mention.id, "mention rejected: {error}");
                return;
            }
        };
        if let Err(e) = self.source.reply(&mention.id, &text).await {
            warn!(event_id = %mention.id, "rejection reply failed: {e}");
        }
    }

    /// Cursor for the next fetch: newest stored event by creation time.
    async fn latest_event_id(&self) -> LaunchResult<Option<String>> {
        let records = self.store.all().await?;
        Ok(records
            .into_iter()
            .max_by_key(|r| r.created_at)
            .map(|r| r.event_id))
    }
}
