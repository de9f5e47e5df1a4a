// File: src/sync/mirror.rs
use crate::preferences::{Change, PreferencesService};
use crate::sync::debounce::Debouncer;
use crate::sync::payload::{Envelope, SyncPayload};
use crate::sync::transport::Transport;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub type SharedPreferences = Arc<Mutex<PreferencesService>>;

pub fn shared(service: PreferencesService) -> SharedPreferences {
    Arc::new(Mutex::new(service))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorState {
    Idle,
    PendingSend,
}

/// What happened when the debounce timer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Delivered straight to a reachable peer.
    Sent,
    /// Handed to the transport's store-and-forward queue.
    Queued,
    /// Identical to the last payload, nothing sent.
    Skipped,
    /// No peer, or the transport refused it. Logged and forgotten.
    Dropped,
}

/// Keeps the synced preference subset in step with one peer.
///
/// Local changes arm a single-flight debounce timer; when it fires the current
/// accent color and digraph flag are serialized and sent unless they match the
/// last payload. Received payloads are applied without re-arming the timer, so
/// they are never echoed back.
pub struct SettingsMirror<T: Transport> {
    prefs: SharedPreferences,
    transport: T,
    debouncer: Debouncer,
    last_payload: Option<Vec<u8>>,
    // Set by edits made on another thread until their change notice arrives.
    unsent_edit: Arc<AtomicBool>,
}

impl<T: Transport> SettingsMirror<T> {
    pub fn new(prefs: SharedPreferences, transport: T, window: Duration) -> Self {
        Self {
            prefs,
            transport,
            debouncer: Debouncer::new(window),
            last_payload: None,
            unsent_edit: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn preferences(&self) -> &SharedPreferences {
        &self.prefs
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn state(&self) -> MirrorState {
        if self.debouncer.is_armed() {
            MirrorState::PendingSend
        } else {
            MirrorState::Idle
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Flag to raise, while holding the preferences lock, after a synced edit
    /// whose [`SettingsMirror::on_local_change`] call will come later.
    pub(crate) fn unsent_edit_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.unsent_edit)
    }

    /// Whether some local change has not been sent yet.
    fn has_pending_send(&self) -> bool {
        self.debouncer.is_armed() || self.unsent_edit.load(Ordering::Acquire)
    }

    /// Applies a local edit and arms the timer if a synced field changed.
    pub fn update<F>(&mut self, now: Instant, edit: F) -> Vec<Change>
    where
        F: FnOnce(&mut PreferencesService) -> Vec<Change>,
    {
        let changes = edit(&mut self.prefs.lock());
        if changes.iter().any(|c| c.is_synced()) {
            self.on_local_change(now);
        }
        changes
    }

    /// Records that a synced field changed locally. Returns the new deadline.
    pub fn on_local_change(&mut self, now: Instant) -> Instant {
        let deadline = self.debouncer.arm(now);
        self.unsent_edit.store(false, Ordering::Release);
        log::trace!("Settings change pending, sending in {:?}", self.debouncer.window());
        deadline
    }

    /// Sends once the quiescence window has passed. Returns `None` while idle
    /// or still waiting.
    pub fn poll(&mut self, now: Instant) -> Option<SendOutcome> {
        if self.debouncer.fire_if_due(now) {
            Some(self.send_snapshot())
        } else {
            None
        }
    }

    /// Sends a pending change right away, ignoring the remaining window.
    pub fn flush(&mut self) -> Option<SendOutcome> {
        let deadline = self.debouncer.deadline()?;
        self.poll(deadline)
    }

    fn snapshot(&self) -> Envelope {
        Envelope::new(SyncPayload::from_preferences(self.prefs.lock().get()))
    }

    fn send_snapshot(&mut self) -> SendOutcome {
        let envelope = self.snapshot();
        let bytes = match envelope.to_bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!("Could not serialize settings payload: {}", e);
                return SendOutcome::Dropped;
            }
        };

        if self.last_payload.as_deref() == Some(bytes.as_slice()) {
            log::debug!("Settings unchanged since last send, skipping");
            return SendOutcome::Skipped;
        }
        self.last_payload = Some(bytes.clone());

        if !self.transport.is_available() {
            log::info!("No companion device available, dropping settings update");
            return SendOutcome::Dropped;
        }

        if self.transport.is_reachable() {
            log::debug!("Peer reachable, sending settings {:?}", envelope.settings);
            match self.transport.send_message(&bytes) {
                Ok(()) => SendOutcome::Sent,
                Err(e) => {
                    log::warn!("Settings send failed: {}", e);
                    SendOutcome::Dropped
                }
            }
        } else {
            log::debug!("Peer not reachable, queueing settings {:?}", envelope.settings);
            match self.transport.transfer(&bytes) {
                Ok(()) => SendOutcome::Queued,
                Err(e) => {
                    log::warn!("Settings transfer failed: {}", e);
                    SendOutcome::Dropped
                }
            }
        }
    }

    /// Applies a payload from the peer. Only recognized keys are used and the
    /// timer is left alone, so the change does not bounce back.
    pub fn receive(&mut self, bytes: &[u8]) -> Vec<Change> {
        match Envelope::from_bytes(bytes) {
            Some(envelope) if !envelope.settings.is_empty() => self.apply(&envelope.settings),
            Some(_) => {
                log::debug!("Ignoring settings message with no recognized keys");
                Vec::new()
            }
            None => {
                log::debug!("Ignoring message without settings");
                Vec::new()
            }
        }
    }

    pub fn apply(&mut self, payload: &SyncPayload) -> Vec<Change> {
        let mut changes = Vec::new();
        let mut prefs = self.prefs.lock();
        if let Some(color) = payload.accent_color {
            changes.extend(prefs.set_accent_color(color));
        }
        if let Some(digraph) = payload.digraph {
            changes.extend(prefs.set_digraph(digraph));
        }

        // With nothing of ours pending the peer now holds exactly our state,
        // so record it to keep the next timer from echoing it back. A pending
        // local edit is not in the peer's state and must still go out.
        if !self.has_pending_send() {
            let envelope = Envelope::new(SyncPayload::from_preferences(prefs.get()));
            match envelope.to_bytes() {
                Ok(bytes) => self.last_payload = Some(bytes),
                Err(e) => log::error!("Could not serialize settings payload: {}", e),
            }
        }
        drop(prefs);

        if !changes.is_empty() {
            log::info!("Applied settings from peer: {:?}", changes);
        }
        changes
    }
}
