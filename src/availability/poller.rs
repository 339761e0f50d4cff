//! Availability polling task.
//!
//! One task per mounted widget polls the booking API for the current month
//! window: every 60 seconds while mounted, immediately when forced by a
//! participant change or month navigation. Redundant polls inside the
//! interval are suppressed. Results are published on a `watch` channel; a
//! late response can still overwrite a newer snapshot (acknowledged race —
//! polls are serialized in this task, so the window is one in-flight
//! request).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::api::types::{AvailabilityRequest, AvailableSlot, ParticipantCount};
use crate::api::BookingApi;
use crate::availability::calendar::{self, MonthWindow};

/// Fixed poll interval while the calendar is mounted.
const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Commands the widget sends to its poller.
#[derive(Debug, Clone)]
pub enum PollerCommand {
    /// Participant mix changed; forces an immediate re-poll.
    SetParticipants(HashMap<String, u32>),
    /// Calendar navigated to another month; forces an immediate re-poll.
    NavigateMonth(MonthWindow),
    /// Explicit refresh request, bypassing the interval throttle.
    Refresh,
}

/// Latest availability known to the poller.
#[derive(Debug, Clone)]
pub struct AvailabilitySnapshot {
    pub window: MonthWindow,
    pub slots: Vec<AvailableSlot>,
    /// Set exactly once, on the first non-empty response, so the widget can
    /// preselect the earliest available date.
    pub auto_selected_date: Option<NaiveDate>,
    pub loading: bool,
    /// User-facing load failure, if the last poll failed.
    pub error: Option<String>,
}

impl AvailabilitySnapshot {
    fn empty(window: MonthWindow) -> Self {
        Self {
            window,
            slots: Vec::new(),
            auto_selected_date: None,
            loading: false,
            error: None,
        }
    }
}

/// Handle to a running poller. Dropping it stops the task.
pub struct AvailabilityHandle {
    commands: mpsc::Sender<PollerCommand>,
    snapshots: watch::Receiver<AvailabilitySnapshot>,
    task: JoinHandle<()>,
}

impl AvailabilityHandle {
    /// Subscribe to snapshot updates.
    pub fn snapshots(&self) -> watch::Receiver<AvailabilitySnapshot> {
        self.snapshots.clone()
    }

    pub async fn send(&self, command: PollerCommand) {
        // A closed channel just means the poller already stopped.
        let _ = self.commands.send(command).await;
    }

    /// Stop the polling task. Idempotent by construction: aborting a
    /// finished task is a no-op.
    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for AvailabilityHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct PollerState {
    api: Arc<dyn BookingApi>,
    experience_id: String,
    window: MonthWindow,
    participants: HashMap<String, u32>,
    last_fetch: Option<Instant>,
    auto_done: bool,
    tx: watch::Sender<AvailabilitySnapshot>,
}

/// Spawn the availability poller for one experience.
pub fn spawn_poller(
    api: Arc<dyn BookingApi>,
    experience_id: impl Into<String>,
    window: MonthWindow,
    participants: HashMap<String, u32>,
) -> AvailabilityHandle {
    let experience_id = experience_id.into();
    let (command_tx, mut command_rx) = mpsc::channel::<PollerCommand>(32);
    let (snapshot_tx, snapshot_rx) = watch::channel(AvailabilitySnapshot::empty(window));

    let mut state = PollerState {
        api,
        experience_id: experience_id.clone(),
        window,
        participants,
        last_fetch: None,
        auto_done: false,
        tx: snapshot_tx,
    };

    let task = tokio::spawn(async move {
        info!(experience = %state.experience_id, "Availability poller started");
        let mut tick = tokio::time::interval(POLL_INTERVAL);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    state.poll(false).await;
                }
                command = command_rx.recv() => {
                    match command {
                        Some(PollerCommand::SetParticipants(participants)) => {
                            state.participants = participants;
                            state.poll(true).await;
                        }
                        Some(PollerCommand::NavigateMonth(window)) => {
                            state.window = window;
                            state.poll(true).await;
                        }
                        Some(PollerCommand::Refresh) => {
                            state.poll(true).await;
                        }
                        None => {
                            debug!(experience = %state.experience_id, "Poller command channel closed");
                            return;
                        }
                    }
                }
            }
        }
    });

    AvailabilityHandle {
        commands: command_tx,
        snapshots: snapshot_rx,
        task,
    }
}

impl PollerState {
    /// Run one poll cycle unless throttled.
    async fn poll(&mut self, force: bool) {
        // Nothing to query without participants; publish empty so the
        // calendar clears instead of showing stale slots.
        if !self.participants.values().any(|&count| count > 0) {
            let _ = self.tx.send(AvailabilitySnapshot::empty(self.window));
            return;
        }

        if !force
            && let Some(last) = self.last_fetch
            && last.elapsed() < POLL_INTERVAL
        {
            return;
        }
        self.last_fetch = Some(Instant::now());

        self.tx.send_modify(|snap| {
            snap.loading = true;
            snap.auto_selected_date = None;
        });

        let request = AvailabilityRequest {
            experience_id: self.experience_id.clone(),
            participants: self
                .participants
                .iter()
                .filter(|&(_, &count)| count > 0)
                .map(|(category, &quantity)| ParticipantCount {
                    category: category.clone(),
                    quantity,
                })
                .collect(),
            start_date: self.window.start(),
            end_date: self.window.end(),
        };

        match self.api.available_slots(&request).await {
            Ok(slots) => {
                // First non-empty response: jump to the first month with
                // availability and flag its earliest date for auto-select.
                let mut auto_selected_date = None;
                if !self.auto_done && !slots.is_empty() {
                    if let Some(first_month) = calendar::first_slot_month(&slots) {
                        self.window = first_month;
                    }
                    auto_selected_date = calendar::first_available_date(&slots);
                    self.auto_done = true;
                }

                debug!(
                    experience = %self.experience_id,
                    window = %self.window,
                    slots = slots.len(),
                    "Availability updated"
                );
                let _ = self.tx.send(AvailabilitySnapshot {
                    window: self.window,
                    slots,
                    auto_selected_date,
                    loading: false,
                    error: None,
                });
            }
            Err(e) => {
                error!(experience = %self.experience_id, "Availability poll failed: {e}");
                let _ = self.tx.send(AvailabilitySnapshot {
                    window: self.window,
                    slots: Vec::new(),
                    auto_selected_date: None,
                    loading: false,
                    error: Some(e.to_string()),
                });
            }
        }
    }
}
