use crate::models::SurveyData;
use crate::results::live::calculate_results;
use crate::store::LiveSurveyStore;
use crate::tasks::poller::Poller;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

// Polls the live survey like any other view and logs the results whenever they move
pub async fn monitor_live_results(store: Arc<LiveSurveyStore>, every: Duration) {
    info!("Starting live results monitor (polling every {:?})...", every);
    let poller = Poller::spawn(store, every);
    let mut updates = poller.subscribe();
    let mut last_seen: Option<SurveyData> = None;

    while updates.changed().await.is_ok() {
        let snapshot = poller.snapshot();
        if snapshot.is_loading {
            continue;
        }
        if let Some(e) = &snapshot.error {
            warn!("Results monitor could not refresh: {}", e);
            continue;
        }
        let Some(current) = snapshot.data else {
            continue;
        };

        if let Some(lines) = describe_change(last_seen.as_ref(), &current) {
            info!("Live results ({} answer(s) stored):", current.answers.len());
            for line in lines {
                info!("  {}", line);
            }
        }
        last_seen = Some(current);
    }
}

/// Summary lines for `current`, or `None` if nothing a results view shows has changed.
pub fn describe_change(
    previous: Option<&SurveyData>,
    current: &SurveyData,
) -> Option<Vec<String>> {
    if let Some(previous) = previous {
        if previous.questions == current.questions && previous.answers == current.answers {
            return None;
        }
    }

    Some(
        calculate_results(current)
            .iter()
            .map(|result| result.summary())
            .collect(),
    )
}
