use std::io::Write;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::ChartSettings;
use crate::models::{DashboardSnapshot, PriceSeries, SessionState};
use crate::services::chart_service::{self, ChartError};
use crate::utils::Table;

/// Draw one frame of the dashboard as text
pub fn render_frame(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();

    out.push_str("Pleb wallet\n===========\n\n");

    let user_line = match (&snapshot.session, &snapshot.user) {
        (SessionState::LoggedIn, Some(user)) if user.admin => {
            format!("Logged in as {} (admin)", user.username)
        }
        (SessionState::LoggedIn, Some(user)) => format!("Logged in as {}", user.username),
        (SessionState::Pending, _) => "Checking session...".to_string(),
        _ => "Logged out".to_string(),
    };
    out.push_str(&user_line);
    out.push_str("\n\n");

    out.push_str(&format!("Balance: {} sats\n", snapshot.balance.onchain));
    if let Some(channel) = snapshot.balance.channel {
        out.push_str(&format!("Channel balance: {} sats\n", channel));
    }
    match &snapshot.price {
        Some(price) => out.push_str(&format!("Price: ${}\n", price)),
        None => out.push_str("Price: loading...\n"),
    }

    out.push_str("\nTransactions\n");
    if snapshot.transactions.is_empty() {
        out.push_str("No transactions\n");
    } else {
        let mut table = Table::new(vec!["", "Description", "Value", "Date"]);
        for tx in snapshot.transactions.iter() {
            let marker = if tx.unsettled_marker { "*" } else { "" };
            table.add_row(vec![
                marker,
                tx.description.as_str(),
                tx.signed_value.as_str(),
                tx.display_date.as_str(),
            ]);
        }
        out.push_str(&table.render());
    }

    out.push_str("\nMade by plebs, for plebs.\n");
    out
}

/// Redraw whenever the poller publishes a new snapshot.
///
/// Returns once the publishing side is gone.
pub async fn run(mut receiver: watch::Receiver<DashboardSnapshot>, chart: ChartSettings) {
    let mut last_chart = PriceSeries::new();

    loop {
        let snapshot = receiver.borrow_and_update().clone();
        draw(&snapshot);

        if !snapshot.chart.ptr_eq(&last_chart) {
            update_chart(&snapshot.chart, &chart);
            last_chart = snapshot.chart.clone();
        }

        if receiver.changed().await.is_err() {
            info!("Poller stopped publishing, view exiting");
            break;
        }
    }
}

fn draw(snapshot: &DashboardSnapshot) {
    let frame = render_frame(snapshot);
    let mut stdout = std::io::stdout().lock();
    // Clear the screen and home the cursor before each frame
    if let Err(e) = write!(stdout, "\x1b[2J\x1b[H{}", frame).and_then(|_| stdout.flush()) {
        warn!("Failed to draw dashboard: {}", e);
    }
}

fn update_chart(series: &PriceSeries, settings: &ChartSettings) {
    match chart_service::render_chart(series, &settings.output, settings.width, settings.height) {
        Ok(()) => debug!("Chart written to {} ({} points)", settings.output.display(), series.len()),
        Err(ChartError::NotEnoughData(n)) => debug!("Chart skipped, only {} point(s)", n),
        Err(e) => warn!("Failed to render chart: {}", e),
    }
}
