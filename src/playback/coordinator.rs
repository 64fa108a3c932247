//! Process-wide playback preferences
//!
//! The [`GlobalCoordinator`] is created once by the host and owned by it.
//! Controllers never hold the coordinator itself, only a [`Subscription`]:
//! a receiving end that sees every change and has no way to write back.

use crate::config::validate_speed;
use crate::error::ConfigError;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// Values broadcast to every subscribed controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalSettings {
    pub speed_multiplier: f64,
    pub is_paused: bool,
    /// Bumped by every global reset request
    pub reset_epoch: u64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            speed_multiplier: 1.0,
            is_paused: false,
            reset_epoch: 0,
        }
    }
}

/// Shared speed / pause / reset state for every mounted visualization
#[derive(Debug, Default)]
pub struct GlobalCoordinator {
    settings: GlobalSettings,
    subscribers: Vec<Sender<GlobalSettings>>,
}

impl GlobalCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from preferences restored by an outside settings store.
    /// The reset epoch always starts at zero.
    pub fn with_preferences(speed_multiplier: f64, is_paused: bool) -> Result<Self, ConfigError> {
        Ok(GlobalCoordinator {
            settings: GlobalSettings {
                speed_multiplier: validate_speed(speed_multiplier)?,
                is_paused,
                reset_epoch: 0,
            },
            subscribers: Vec::new(),
        })
    }

    pub fn settings(&self) -> GlobalSettings {
        self.settings
    }

    /// Register a new reader. It starts at the current settings and only
    /// reacts to changes made after this call.
    pub fn subscribe(&mut self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        Subscription {
            rx,
            latest: self.settings,
        }
    }

    /// Number of live subscribers, as of the last broadcast
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f64) -> Result<(), ConfigError> {
        let multiplier = validate_speed(multiplier)?;
        if multiplier != self.settings.speed_multiplier {
            self.settings.speed_multiplier = multiplier;
            self.broadcast();
        }
        Ok(())
    }

    pub fn set_paused(&mut self, paused: bool) {
        if paused != self.settings.is_paused {
            self.settings.is_paused = paused;
            self.broadcast();
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.settings.is_paused);
        self.settings.is_paused
    }

    /// Ask every controller to return to position 0. Returns the new epoch.
    pub fn request_reset(&mut self) -> u64 {
        self.settings.reset_epoch += 1;
        self.broadcast();
        self.settings.reset_epoch
    }

    fn broadcast(&mut self) {
        let settings = self.settings;
        // a failed send means the controller was torn down
        self.subscribers.retain(|tx| tx.send(settings).is_ok());
        tracing::debug!(
            speed = settings.speed_multiplier,
            paused = settings.is_paused,
            epoch = settings.reset_epoch,
            subscribers = self.subscribers.len(),
            "global settings broadcast"
        );
    }
}

/// Read-only view of the coordinator held by one controller
#[derive(Debug)]
pub struct Subscription {
    rx: Receiver<GlobalSettings>,
    latest: GlobalSettings,
}

impl Subscription {
    /// A subscription that never changes, for controllers without a
    /// coordinator
    pub fn detached(settings: GlobalSettings) -> Self {
        let (_tx, rx) = mpsc::channel();
        Subscription {
            rx,
            latest: settings,
        }
    }

    /// Last settings seen by this subscriber
    pub fn settings(&self) -> GlobalSettings {
        self.latest
    }

    /// Drain pending broadcasts. Returns the previous settings when
    /// anything changed, so callers can diff old against new.
    pub fn refresh(&mut self) -> Option<GlobalSettings> {
        let previous = self.latest;
        loop {
            match self.rx.try_recv() {
                Ok(settings) => self.latest = settings,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        (self.latest != previous).then_some(previous)
    }
}
