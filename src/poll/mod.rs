//! The polling loop: watches one channel and announces it going live.
use crate::auth::AccessTokenManager;
use crate::clock::Clock;
use crate::notify::{Cooldown, Notifier};
use crate::status::StatusStore;
use crate::twitch::Helix;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

pub mod error;
pub mod ticker;

pub use error::PollError;
pub use ticker::{IntervalTicker, Ticker};

/// A request for an immediate check. The result is sent back through the
/// enclosed channel.
pub type ForceCheck = oneshot::Sender<Result<CheckOutcome, PollError>>;

/// What a single check found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The channel went live since the last check.
    WentLive { notified: bool },
    /// The channel went offline since the last check.
    WentOffline,
    /// Nothing changed.
    Unchanged { live: bool },
}

#[derive(Debug)]
pub struct PollerData<H, N, C> {
    /// Login of the watched channel.
    pub channel: String,
    pub helix: H,
    pub notifier: N,
    pub clock: C,
    pub store: StatusStore,
    pub cooldown: chrono::Duration,
    pub token_lifetime: chrono::Duration,
}

/// Sole writer of the [StreamStatus](crate::status::StreamStatus).
#[derive(Debug)]
pub struct Poller<H, N, C> {
    channel: String,
    helix: H,
    notifier: N,
    clock: C,
    store: StatusStore,
    tokens: AccessTokenManager,
    cooldown: Cooldown,
}

impl<H: Helix, N: Notifier, C: Clock> Poller<H, N, C> {
    #[must_use]
    pub fn new(data: PollerData<H, N, C>) -> Self {
        let cooldown = Cooldown::new(data.clock.now(), data.cooldown);
        Self {
            channel: data.channel,
            helix: data.helix,
            notifier: data.notifier,
            clock: data.clock,
            store: data.store,
            tokens: AccessTokenManager::new(data.token_lifetime),
            cooldown,
        }
    }

    #[must_use]
    pub fn cooldown(&self) -> &Cooldown {
        &self.cooldown
    }

    /// Runs one check against Twitch and applies the result.
    ///
    /// # Errors
    /// Returns `Err(PollError...)` without touching the stored status:
    /// * `::Access` if no access token could be obtained.
    /// * `::Helix` if the stream lookup failed.
    pub async fn check(&mut self) -> Result<CheckOutcome, PollError> {
        let token = self.tokens.get_or_refresh(&self.helix, &self.clock).await?;
        let streams = match self.helix.live_streams(&token, &self.channel).await {
            Ok(streams) => streams,
            Err(err) => {
                if err.is_unauthorized() {
                    self.tokens.invalidate();
                }
                return Err(err.into());
            }
        };
        let live = streams
            .into_iter()
            .find(|stream| stream.user_login.eq_ignore_ascii_case(&self.channel));

        let shared = self.store.shared();
        let mut status = shared.write().await;

        match (live, status.is_live(&self.channel)) {
            (Some(stream), false) => {
                info!("{} went live: {}", self.channel, stream.title.as_deref().unwrap_or_default());
                status.insert(self.channel.clone(), stream.clone());
                self.store.persist(&status).await;
                drop(status);

                let now = self.clock.now();
                if !self.cooldown.is_ready(now) {
                    warn!(
                        "Webhook cooldown in effect until {}; not sending notification.",
                        self.cooldown.ready_at()
                    );
                    return Ok(CheckOutcome::WentLive { notified: false });
                }

                match self.notifier.notify(&stream, now).await {
                    Ok(()) => {
                        self.cooldown.trigger(now);
                        Ok(CheckOutcome::WentLive { notified: true })
                    }
                    Err(err) => {
                        error!("Live notification for {} failed: {err}", self.channel);
                        Ok(CheckOutcome::WentLive { notified: false })
                    }
                }
            }
            (None, true) => {
                info!("{} went offline", self.channel);
                status.remove(&self.channel);
                self.store.persist(&status).await;
                Ok(CheckOutcome::WentOffline)
            }
            (live, _) => Ok(CheckOutcome::Unchanged {
                live: live.is_some(),
            }),
        }
    }

    async fn check_logged(&mut self) -> Result<CheckOutcome, PollError> {
        debug!("Status check - {}", self.clock.now());
        let result = self.check().await;
        match &result {
            Ok(outcome) => debug!("Status check finished: {outcome}"),
            Err(err) => error!("{err}"),
        }
        result
    }

    /// Checks on every tick of `ticker` and whenever a [ForceCheck] arrives,
    /// one check at a time. Returns once `ticker` ends.
    pub async fn run<T: Ticker>(mut self, mut ticker: T, mut force_checks: mpsc::Receiver<ForceCheck>) {
        info!("Watching {} for live status", self.channel);

        loop {
            tokio::select! {
                keep_going = ticker.wait() => {
                    if !keep_going {
                        break;
                    }
                    let _ = self.check_logged().await;
                }
                Some(reply) = force_checks.recv() => {
                    let result = self.check_logged().await;
                    let _ = reply.send(result);
                }
            }
        }

        info!("Stopped watching {}", self.channel);
    }
}

impl std::fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckOutcome::WentLive { notified: true } => f.write_str("went live, notification sent"),
            CheckOutcome::WentLive { notified: false } => {
                f.write_str("went live, notification skipped")
            }
            CheckOutcome::WentOffline => f.write_str("went offline"),
            CheckOutcome::Unchanged { live: true } => f.write_str("is still live"),
            CheckOutcome::Unchanged { live: false } => f.write_str("is still offline"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::manual::ManualClock;
    use crate::notify::NotifyError;
    use crate::twitch::{HelixError, StreamInfo, TokenGrant};
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    const CHANNEL: &str = "pattybuilds";

    #[derive(Default)]
    struct FakeTwitch {
        live: Mutex<Option<StreamInfo>>,
        token_requests: AtomicUsize,
        refuse_tokens: AtomicBool,
        fail_streams: Mutex<Option<u16>>,
    }

    impl FakeTwitch {
        fn go_live(&self, title: &str) {
            *self.live.lock().unwrap() = Some(stream(title));
        }
        fn go_offline(&self) {
            *self.live.lock().unwrap() = None;
        }
    }

    #[async_trait]
    impl Helix for FakeTwitch {
        async fn app_access_token(&self) -> Result<TokenGrant, HelixError> {
            self.token_requests.fetch_add(1, Ordering::SeqCst);
            if self.refuse_tokens.load(Ordering::SeqCst) {
                return Err(HelixError::Status(403, String::from("nope")));
            }
            Ok(TokenGrant {
                access_token: String::from("token"),
                expires_in: 3600,
            })
        }
        async fn live_streams(
            &self,
            access_token: &str,
            user_login: &str,
        ) -> Result<Vec<StreamInfo>, HelixError> {
            assert_eq!(access_token, "token");
            assert_eq!(user_login, CHANNEL);
            if let Some(status) = *self.fail_streams.lock().unwrap() {
                return Err(HelixError::Status(status, String::from("failure")));
            }
            Ok(self.live.lock().unwrap().iter().cloned().collect())
        }
    }

    #[derive(Default)]
    struct Outbox {
        sent: Mutex<Vec<(StreamInfo, DateTime<Utc>)>>,
        reject: AtomicBool,
    }

    impl Outbox {
        fn sent(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Notifier for Outbox {
        async fn notify(&self, stream: &StreamInfo, now: DateTime<Utc>) -> Result<(), NotifyError> {
            if self.reject.load(Ordering::SeqCst) {
                return Err(NotifyError::Rejected {
                    status: 400,
                    body: String::from("bad embed"),
                });
            }
            self.sent.lock().unwrap().push((stream.clone(), now));
            Ok(())
        }
    }

    struct Harness {
        twitch: Arc<FakeTwitch>,
        outbox: Arc<Outbox>,
        clock: Arc<ManualClock>,
        store: StatusStore,
        poller: Poller<Arc<FakeTwitch>, Arc<Outbox>, Arc<ManualClock>>,
        _dir: tempfile::TempDir,
    }

    fn stream(title: &str) -> StreamInfo {
        serde_json::from_value(serde_json::json!({
            "id": "1",
            "user_login": CHANNEL,
            "user_name": "PattyBuilds",
            "title": title,
            "game_name": "Software and Game Development",
            "viewer_count": 3,
            "thumbnail_url": "https://cdn.example/{width}x{height}.jpg",
            "type": "live",
        }))
        .unwrap()
    }

    async fn harness() -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let store = StatusStore::open(dir.path().join("stream_status.json")).await;
        let twitch = Arc::new(FakeTwitch::default());
        let outbox = Arc::new(Outbox::default());
        let clock = Arc::new(ManualClock::new());

        let poller = Poller::new(PollerData {
            channel: String::from(CHANNEL),
            helix: twitch.clone(),
            notifier: outbox.clone(),
            clock: clock.clone(),
            store: store.clone(),
            cooldown: Duration::hours(3),
            token_lifetime: Duration::hours(24),
        });

        Harness {
            twitch,
            outbox,
            clock,
            store,
            poller,
            _dir: dir,
        }
    }

    async fn persisted(store: &StatusStore) -> crate::status::StreamStatus {
        crate::status::io::load(store.path()).await
    }

    #[tokio::test]
    async fn live_transition_notifies_once_and_starts_cooldown() {
        let mut h = harness().await;
        h.twitch.go_live("first");

        let outcome = h.poller.check().await.unwrap();
        assert_eq!(outcome, CheckOutcome::WentLive { notified: true });
        assert_eq!(h.outbox.sent(), 1);
        assert_eq!(
            h.poller.cooldown().ready_at(),
            h.clock.now() + Duration::hours(3)
        );

        let status = h.store.shared();
        assert_eq!(status.read().await.get(CHANNEL), Some(&stream("first")));
        assert_eq!(persisted(&h.store).await.get(CHANNEL), Some(&stream("first")));

        h.clock.advance(Duration::minutes(1));
        assert_eq!(
            h.poller.check().await.unwrap(),
            CheckOutcome::Unchanged { live: true }
        );
        assert_eq!(h.outbox.sent(), 1);
    }

    #[tokio::test]
    async fn flapping_inside_cooldown_records_without_notifying() {
        let mut h = harness().await;
        h.twitch.go_live("first");
        h.poller.check().await.unwrap();
        let ready_at = h.poller.cooldown().ready_at();

        h.clock.advance(Duration::minutes(10));
        h.twitch.go_offline();
        assert_eq!(h.poller.check().await.unwrap(), CheckOutcome::WentOffline);

        h.clock.advance(Duration::minutes(10));
        h.twitch.go_live("second");
        assert_eq!(
            h.poller.check().await.unwrap(),
            CheckOutcome::WentLive { notified: false }
        );

        assert_eq!(h.outbox.sent(), 1);
        assert_eq!(h.poller.cooldown().ready_at(), ready_at);
        assert_eq!(
            h.store.shared().read().await.get(CHANNEL),
            Some(&stream("second"))
        );
        assert_eq!(persisted(&h.store).await.get(CHANNEL), Some(&stream("second")));
    }

    #[tokio::test]
    async fn live_again_after_cooldown_notifies() {
        let mut h = harness().await;
        h.twitch.go_live("first");
        h.poller.check().await.unwrap();

        h.clock.advance(Duration::hours(1));
        h.twitch.go_offline();
        h.poller.check().await.unwrap();

        h.clock.advance(Duration::hours(2));
        h.twitch.go_live("second");
        assert_eq!(
            h.poller.check().await.unwrap(),
            CheckOutcome::WentLive { notified: true }
        );
        assert_eq!(h.outbox.sent(), 2);
    }

    #[tokio::test]
    async fn offline_transition_removes_silently() {
        let mut h = harness().await;
        h.twitch.go_live("first");
        h.poller.check().await.unwrap();

        h.twitch.go_offline();
        assert_eq!(h.poller.check().await.unwrap(), CheckOutcome::WentOffline);
        assert!(!h.store.shared().read().await.is_live(CHANNEL));
        assert!(persisted(&h.store).await.is_empty());
        assert_eq!(h.outbox.sent(), 1);

        assert_eq!(
            h.poller.check().await.unwrap(),
            CheckOutcome::Unchanged { live: false }
        );
    }

    #[tokio::test]
    async fn restored_live_state_does_not_renotify() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stream_status.json");
        let mut previous = crate::status::StreamStatus::default();
        previous.insert(CHANNEL, stream("before restart"));
        crate::status::io::save(&path, &previous).await.unwrap();

        let twitch = Arc::new(FakeTwitch::default());
        twitch.go_live("before restart");
        let outbox = Arc::new(Outbox::default());
        let mut poller = Poller::new(PollerData {
            channel: String::from(CHANNEL),
            helix: twitch.clone(),
            notifier: outbox.clone(),
            clock: Arc::new(ManualClock::new()),
            store: StatusStore::open(&path).await,
            cooldown: Duration::hours(3),
            token_lifetime: Duration::hours(24),
        });

        assert_eq!(
            poller.check().await.unwrap(),
            CheckOutcome::Unchanged { live: true }
        );
        assert_eq!(outbox.sent(), 0);
    }

    #[tokio::test]
    async fn unwritable_status_file_keeps_memory_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = StatusStore::open(dir.path().join("nope").join("stream_status.json")).await;
        let twitch = Arc::new(FakeTwitch::default());
        let outbox = Arc::new(Outbox::default());
        let mut poller = Poller::new(PollerData {
            channel: String::from(CHANNEL),
            helix: twitch.clone(),
            notifier: outbox.clone(),
            clock: Arc::new(ManualClock::new()),
            store: store.clone(),
            cooldown: Duration::hours(3),
            token_lifetime: Duration::hours(24),
        });

        twitch.go_live("first");
        assert_eq!(
            poller.check().await.unwrap(),
            CheckOutcome::WentLive { notified: true }
        );
        assert!(store.shared().read().await.is_live(CHANNEL));
        assert_eq!(outbox.sent(), 1);
        assert!(!store.path().exists());

        twitch.go_offline();
        assert_eq!(poller.check().await.unwrap(), CheckOutcome::WentOffline);
        assert!(store.shared().read().await.is_empty());
    }

    #[tokio::test]
    async fn rejected_notification_keeps_cooldown_open() {
        let mut h = harness().await;
        h.outbox.reject.store(true, Ordering::SeqCst);
        h.twitch.go_live("first");

        assert_eq!(
            h.poller.check().await.unwrap(),
            CheckOutcome::WentLive { notified: false }
        );
        assert!(h.poller.cooldown().is_ready(h.clock.now()));
        assert!(h.store.shared().read().await.is_live(CHANNEL));
    }

    #[tokio::test]
    async fn token_failure_skips_the_check() {
        let mut h = harness().await;
        h.twitch.refuse_tokens.store(true, Ordering::SeqCst);
        h.twitch.go_live("first");

        assert!(matches!(h.poller.check().await, Err(PollError::Access(_))));
        assert!(h.store.shared().read().await.is_empty());
        assert_eq!(h.outbox.sent(), 0);

        h.twitch.refuse_tokens.store(false, Ordering::SeqCst);
        assert_eq!(
            h.poller.check().await.unwrap(),
            CheckOutcome::WentLive { notified: true }
        );
    }

    #[tokio::test]
    async fn lookup_failure_keeps_state() {
        let mut h = harness().await;
        h.twitch.go_live("first");
        h.poller.check().await.unwrap();

        *h.twitch.fail_streams.lock().unwrap() = Some(500);
        h.twitch.go_offline();
        assert!(matches!(h.poller.check().await, Err(PollError::Helix(_))));
        assert!(h.store.shared().read().await.is_live(CHANNEL));
        assert_eq!(h.twitch.token_requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unauthorized_lookup_drops_the_token() {
        let mut h = harness().await;
        *h.twitch.fail_streams.lock().unwrap() = Some(401);

        assert!(h.poller.check().await.is_err());
        *h.twitch.fail_streams.lock().unwrap() = None;
        h.poller.check().await.unwrap();
        assert_eq!(h.twitch.token_requests.load(Ordering::SeqCst), 2);
    }

    struct Ticks(usize);

    #[async_trait]
    impl Ticker for Ticks {
        async fn wait(&mut self) -> bool {
            if self.0 == 0 {
                return false;
            }
            self.0 -= 1;
            true
        }
    }

    #[tokio::test]
    async fn run_checks_once_per_tick() {
        let h = harness().await;
        h.twitch.go_live("first");
        let (_sender, receiver) = mpsc::channel(1);

        h.poller.run(Ticks(3), receiver).await;

        assert_eq!(h.outbox.sent(), 1);
        assert_eq!(h.twitch.token_requests.load(Ordering::SeqCst), 1);
        assert!(persisted(&h.store).await.is_live(CHANNEL));
    }

    struct Never;

    #[async_trait]
    impl Ticker for Never {
        async fn wait(&mut self) -> bool {
            std::future::pending::<()>().await;
            false
        }
    }

    #[tokio::test]
    async fn forced_check_reports_back() {
        let h = harness().await;
        h.twitch.go_live("first");
        let (sender, receiver) = mpsc::channel(1);
        let poller = tokio::spawn(h.poller.run(Never, receiver));

        let (reply, result) = oneshot::channel();
        sender.send(reply).await.unwrap();
        assert_eq!(
            result.await.unwrap().unwrap(),
            CheckOutcome::WentLive { notified: true }
        );

        poller.abort();
    }
}
