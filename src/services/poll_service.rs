use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::api::{PriceFeed, WalletBackend};
use crate::models::{DashboardSnapshot, SessionState};
use crate::services::{chart_service, transaction_service};

/// Intervals of the two refresh cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerSettings {
    /// Channel balance
    pub fast_interval: Duration,
    /// Price, wallet balance and transactions
    pub slow_interval: Duration,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            fast_interval: Duration::from_millis(1000),
            slow_interval: Duration::from_millis(5000),
        }
    }
}

/// State shared between the cycle tasks and every in-flight request
struct Shared {
    price_feed: Arc<dyn PriceFeed>,
    wallet: Arc<dyn WalletBackend>,
    state: watch::Sender<DashboardSnapshot>,
    active: AtomicBool,
}

impl Shared {
    fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Apply an update to the published snapshot.
    ///
    /// `update` returns whether it changed anything; subscribers are only
    /// woken for real changes. Updates arriving after teardown are dropped.
    fn apply<F>(&self, slice: &str, update: F)
    where
        F: FnOnce(&mut DashboardSnapshot) -> bool,
    {
        if !self.is_active() {
            debug!("Discarding {} result that resolved after teardown", slice);
            return;
        }
        self.state.send_if_modified(update);
    }
}

/// Drives the fast and slow refresh cycles and publishes snapshots
pub struct Poller {
    price_feed: Arc<dyn PriceFeed>,
    wallet: Arc<dyn WalletBackend>,
    settings: PollerSettings,
    token: Option<String>,
}

impl Poller {
    pub fn new(
        price_feed: Arc<dyn PriceFeed>,
        wallet: Arc<dyn WalletBackend>,
        settings: PollerSettings,
    ) -> Self {
        Self {
            price_feed,
            wallet,
            settings,
            token: None,
        }
    }

    /// Auth token read at startup; `None` keeps the dashboard logged out
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Start both cycles.
    ///
    /// Each cycle fires once right away and then on every interval until the
    /// returned handle is torn down or dropped.
    pub fn activate(self) -> PollerHandle {
        let token = self.token.filter(|_| self.wallet.has_sessions());

        let initial = DashboardSnapshot {
            session: if token.is_some() {
                SessionState::Pending
            } else {
                SessionState::LoggedOut
            },
            ..DashboardSnapshot::default()
        };
        let (state, receiver) = watch::channel(initial);

        let shared = Arc::new(Shared {
            price_feed: self.price_feed,
            wallet: self.wallet,
            state,
            active: AtomicBool::new(true),
        });

        let mut tasks = Vec::new();

        tasks.push(spawn_cycle("slow", self.settings.slow_interval, shared.clone(), fire_slow));

        if shared.wallet.has_channel_balance() {
            tasks.push(spawn_cycle("fast", self.settings.fast_interval, shared.clone(), fire_fast));
        } else {
            debug!("Backend has no channel balance, fast cycle not started");
        }

        if let Some(token) = token {
            tasks.push(tokio::spawn(refresh_user(shared.clone(), token)));
        }

        info!(
            "Poller activated (fast: {:?}, slow: {:?})",
            self.settings.fast_interval, self.settings.slow_interval
        );

        PollerHandle {
            tasks,
            shared,
            receiver,
        }
    }
}

/// Owner of a running poller.
///
/// Tearing down (explicitly or by dropping) cancels every scheduled firing.
pub struct PollerHandle {
    tasks: Vec<JoinHandle<()>>,
    shared: Arc<Shared>,
    receiver: watch::Receiver<DashboardSnapshot>,
}

impl PollerHandle {
    /// A receiver that sees every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<DashboardSnapshot> {
        self.receiver.clone()
    }

    /// The latest published snapshot
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.receiver.borrow().clone()
    }

    /// Stop both cycles and discard results still in flight
    pub fn teardown(mut self) {
        self.cancel();
        info!("Poller torn down");
    }

    fn cancel(&mut self) {
        self.shared.active.store(false, Ordering::Release);
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn spawn_cycle(
    name: &'static str,
    period: Duration,
    shared: Arc<Shared>,
    fire: fn(&Arc<Shared>),
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            // The first tick completes immediately
            interval.tick().await;
            if !shared.is_active() {
                break;
            }
            debug!("{} cycle firing", name);
            fire(&shared);
        }
    })
}

/// Fire-and-forget: each request lands on its own slice whenever it resolves
fn fire_slow(shared: &Arc<Shared>) {
    tokio::spawn(refresh_price(shared.clone()));
    tokio::spawn(refresh_wallet_balance(shared.clone()));
    tokio::spawn(refresh_transactions(shared.clone()));
}

fn fire_fast(shared: &Arc<Shared>) {
    tokio::spawn(refresh_channel_balance(shared.clone()));
}

async fn refresh_price(shared: Arc<Shared>) {
    let price = match shared.price_feed.spot_price().await {
        Ok(p) => p,
        Err(e) => {
            warn!("Failed to fetch price: {}", e);
            return;
        }
    };

    // The chart plots the two-decimal price that is displayed
    let formatted = format!("{:.2}", price);
    let value = formatted.parse::<f64>().unwrap_or(price);
    let timestamp = Utc::now().timestamp_millis();

    shared.apply("price", |s| {
        let chart = chart_service::append(&s.chart, timestamp, value);
        let changed = s.price.as_deref() != Some(formatted.as_str()) || !chart.ptr_eq(&s.chart);
        s.price = Some(formatted);
        s.chart = chart;
        changed
    });
}

async fn refresh_wallet_balance(shared: Arc<Shared>) {
    match shared.wallet.wallet_balance().await {
        Ok(sats) => shared.apply("wallet balance", |s| {
            let changed = s.balance.onchain != sats;
            s.balance.onchain = sats;
            changed
        }),
        Err(e) => warn!("Failed to fetch wallet balance: {}", e),
    }
}

async fn refresh_channel_balance(shared: Arc<Shared>) {
    match shared.wallet.channel_balance().await {
        Ok(sats) => shared.apply("channel balance", |s| {
            let changed = s.balance.channel != Some(sats);
            s.balance.channel = Some(sats);
            changed
        }),
        Err(e) => warn!("Failed to fetch channel balance: {}", e),
    }
}

async fn refresh_transactions(shared: Arc<Shared>) {
    match shared.wallet.transactions().await {
        Ok(raw) => {
            debug!("Fetched {} transactions", raw.len());
            let display = transaction_service::normalize(&raw);
            shared.apply("transactions", |s| {
                if *s.transactions == display {
                    return false;
                }
                s.transactions = Arc::new(display);
                true
            });
        }
        Err(e) => warn!("Failed to fetch transactions: {}", e),
    }
}

async fn refresh_user(shared: Arc<Shared>, token: String) {
    match shared.wallet.current_user(&token).await {
        Ok(user) => {
            info!("Logged in as {}", user.username);
            shared.apply("user", |s| {
                s.user = Some(user);
                s.session = SessionState::LoggedIn;
                true
            });
        }
        Err(e) => {
            if e.is_unauthorized() {
                warn!("Auth token rejected, staying logged out");
            } else {
                warn!("Failed to fetch user: {}", e);
            }
            shared.apply("user", |s| {
                s.session = SessionState::LoggedOut;
                true
            });
        }
    }
}
