//! Widget lifecycle — mount, experience selection, teardown.
//!
//! A `Widget` is one mounted instance: it owns the loaded experience list,
//! the booking session for the currently selected experience, and that
//! session's availability poller. Closing the session stops its poller;
//! unmounting releases the registry slot.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::types::BookingConfirmation;
use crate::api::BookingApi;
use crate::availability::{
    AvailabilityHandle, AvailabilitySnapshot, MonthWindow, PollerCommand, spawn_poller,
};
use crate::booking::submission;
use crate::booking::{BookingState, ContactDetails, Wizard};
use crate::catalog::Experience;
use crate::config::WidgetConfig;
use crate::error::{Result, WidgetError};
use crate::widget::registry::WidgetRegistry;

/// Everything tied to one selected experience: reducer, wizard, poller.
pub struct BookingSession {
    pub state: BookingState,
    pub wizard: Wizard,
    availability: AvailabilityHandle,
}

impl BookingSession {
    /// Snapshot stream of the calendar this session polls.
    pub fn availability(&self) -> watch::Receiver<AvailabilitySnapshot> {
        self.availability.snapshots()
    }
}

/// One mounted widget instance.
pub struct Widget {
    config: WidgetConfig,
    api: Arc<dyn BookingApi>,
    registry: Arc<WidgetRegistry>,
    instance_id: Uuid,
    experiences: Vec<Arc<Experience>>,
    load_error: Option<String>,
    session: Option<BookingSession>,
    /// Carried across sessions so the visitor never retypes their details.
    saved_contact: ContactDetails,
}

impl Widget {
    /// Validate the config, claim the container, and load the experience
    /// list. A failed load mounts an empty widget with an inline message
    /// rather than failing the mount.
    pub async fn mount(
        config: WidgetConfig,
        api: Arc<dyn BookingApi>,
        registry: Arc<WidgetRegistry>,
    ) -> Result<Self> {
        config.validate()?;
        let instance_id = registry.register(&config.container).await?;

        let (experiences, load_error) = match api.list_experiences(&config.list_id).await {
            Ok(list) => (list.into_iter().map(Arc::new).collect(), None),
            Err(e) => {
                warn!(list_id = %config.list_id, "Experience list load failed: {e}");
                (Vec::new(), Some("Failed to load experiences".to_string()))
            }
        };

        info!(
            container = %config.container,
            %instance_id,
            experiences = experiences.len(),
            "Widget mounted"
        );

        Ok(Self {
            config,
            api,
            registry,
            instance_id,
            experiences,
            load_error,
            session: None,
            saved_contact: ContactDetails::default(),
        })
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn experiences(&self) -> &[Arc<Experience>] {
        &self.experiences
    }

    /// Inline message shown in place of the list when loading failed.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn session(&self) -> Option<&BookingSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut BookingSession> {
        self.session.as_mut()
    }

    /// Open a booking session for an experience. Replaces any running
    /// session; its poller stops when the old session drops.
    pub async fn select_experience(&mut self, experience_id: &str) -> Result<&mut BookingSession> {
        let experience = self
            .experiences
            .iter()
            .find(|e| e.id == experience_id)
            .cloned()
            .ok_or_else(|| WidgetError::ExperienceNotFound {
                id: experience_id.to_string(),
            })?;

        self.close_session();

        let state = BookingState::new(experience, self.saved_contact.clone());
        let availability = spawn_poller(
            self.api.clone(),
            experience_id,
            MonthWindow::containing(Utc::now().date_naive()),
            HashMap::new(),
        );

        Ok(self.session.insert(BookingSession {
            state,
            wizard: Wizard::new(),
            availability,
        }))
    }

    /// Adjust a participant count and re-poll availability for the new mix.
    pub async fn update_participants(&mut self, category_id: &str, delta: i32) {
        if let Some(session) = self.session.as_mut() {
            session.state.update_participants(category_id, delta);
            session
                .availability
                .send(PollerCommand::SetParticipants(
                    session.state.participants.clone(),
                ))
                .await;
        }
    }

    /// Move the calendar to another month and re-poll.
    pub async fn navigate_month(&mut self, window: MonthWindow) {
        if let Some(session) = self.session.as_ref() {
            session
                .availability
                .send(PollerCommand::NavigateMonth(window))
                .await;
        }
    }

    pub async fn refresh_availability(&self) {
        if let Some(session) = self.session.as_ref() {
            session.availability.send(PollerCommand::Refresh).await;
        }
    }

    /// Submit the current session's booking and return the payment redirect.
    pub async fn confirm_booking(&self, page_url: &str) -> Result<BookingConfirmation> {
        let session = self
            .session
            .as_ref()
            .ok_or(WidgetError::NoExperienceSelected)?;
        submission::confirm(self.api.as_ref(), &session.state, page_url).await
    }

    /// Close the booking modal: stop the poller, keep the contact details.
    pub fn close_session(&mut self) {
        if let Some(session) = self.session.take() {
            self.saved_contact = session.state.contact.clone();
            session.availability.stop();
        }
    }

    /// Tear the widget down and release its container.
    pub async fn unmount(mut self) {
        self.close_session();
        self.registry.unregister(&self.config.container).await;
        info!(container = %self.config.container, "Widget unmounted");
    }
}
