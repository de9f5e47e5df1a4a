// File: src/sync/worker.rs
use crate::preferences::{Change, PreferencesService};
use crate::sync::mirror::{SendOutcome, SettingsMirror, SharedPreferences};
use crate::sync::transport::Transport;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

enum Command {
    LocalChange,
    Incoming(Vec<u8>),
    Flush,
    Shutdown,
}

/// Runs a [`SettingsMirror`] on its own thread.
///
/// Callers edit preferences through [`MirrorWorker::update`] and forward peer
/// messages with [`MirrorWorker::deliver`]; neither blocks on the transport.
/// The thread sleeps until the next command or the debounce deadline,
/// whichever comes first.
pub struct MirrorWorker {
    prefs: SharedPreferences,
    unsent_edit: Arc<AtomicBool>,
    tx: Sender<Command>,
    handle: Option<JoinHandle<()>>,
}

impl MirrorWorker {
    pub fn spawn<T: Transport + 'static>(mirror: SettingsMirror<T>) -> Self {
        Self::start(mirror, None)
    }

    /// Like [`MirrorWorker::spawn`], also reporting every send attempt.
    pub fn spawn_observed<T: Transport + 'static>(
        mirror: SettingsMirror<T>,
    ) -> (Self, Receiver<SendOutcome>) {
        let (events_tx, events_rx) = mpsc::channel();
        (Self::start(mirror, Some(events_tx)), events_rx)
    }

    fn start<T: Transport + 'static>(
        mirror: SettingsMirror<T>,
        events: Option<Sender<SendOutcome>>,
    ) -> Self {
        let prefs = mirror.preferences().clone();
        let unsent_edit = mirror.unsent_edit_flag();
        let (tx, rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("settings-mirror".into())
            .spawn(move || run(mirror, rx, events))
            .map_err(|e| log::error!("Could not start settings mirror thread: {}", e))
            .ok();
        Self { prefs, unsent_edit, tx, handle }
    }

    pub fn preferences(&self) -> &SharedPreferences {
        &self.prefs
    }

    /// Applies a local edit; synced changes schedule a send.
    pub fn update<F>(&self, edit: F) -> Vec<Change>
    where
        F: FnOnce(&mut PreferencesService) -> Vec<Change>,
    {
        let mut prefs = self.prefs.lock();
        let changes = edit(&mut prefs);
        if changes.iter().any(|c| c.is_synced()) {
            // raised under the lock so a peer message applied before the
            // notice below still sees the edit as unsent
            self.unsent_edit.store(true, Ordering::Release);
            self.command(Command::LocalChange);
        }
        drop(prefs);
        changes
    }

    /// Hands a raw message from the peer to the mirror.
    pub fn deliver(&self, message: Vec<u8>) {
        self.command(Command::Incoming(message));
    }

    pub fn flush(&self) {
        self.command(Command::Flush);
    }

    fn command(&self, command: Command) {
        if self.tx.send(command).is_err() {
            log::warn!("Settings mirror thread is gone, dropping command");
        }
    }

    /// Sends anything still pending and stops the thread.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.tx.send(Command::Shutdown);
            if handle.join().is_err() {
                log::error!("Settings mirror thread panicked");
            }
        }
    }
}

impl Drop for MirrorWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run<T: Transport>(
    mut mirror: SettingsMirror<T>,
    rx: Receiver<Command>,
    events: Option<Sender<SendOutcome>>,
) {
    let report = |outcome: Option<SendOutcome>| {
        if let (Some(outcome), Some(events)) = (outcome, &events) {
            let _ = events.send(outcome);
        }
    };

    loop {
        let command = match mirror.deadline() {
            Some(deadline) => {
                let timeout = deadline.saturating_duration_since(Instant::now());
                match rx.recv_timeout(timeout) {
                    Ok(command) => command,
                    Err(RecvTimeoutError::Timeout) => {
                        report(mirror.poll(Instant::now()));
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            None => match rx.recv() {
                Ok(command) => command,
                Err(_) => break,
            },
        };

        match command {
            Command::LocalChange => {
                mirror.on_local_change(Instant::now());
            }
            Command::Incoming(message) => {
                mirror.receive(&message);
            }
            Command::Flush => report(mirror.flush()),
            Command::Shutdown => {
                report(mirror.flush());
                break;
            }
        }
    }
    log::debug!("Settings mirror thread stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::preferences::AccentColor;
    use crate::sync::mirror::shared;
    use crate::sync::payload::Envelope;
    use crate::sync::transport::local_pair;
    use std::time::Duration;

    #[test]
    fn debounced_send_from_thread() {
        let (local, peer) = local_pair();
        let prefs = shared(PreferencesService::new(Box::new(MemoryStore::new())));
        let mirror = SettingsMirror::new(prefs, local, Duration::from_millis(200));
        let (worker, outcomes) = MirrorWorker::spawn_observed(mirror);

        worker.update(|p| p.set_accent_color(AccentColor::Red));
        worker.update(|p| p.set_accent_color(AccentColor::Teal));

        let outcome = outcomes.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(outcome, SendOutcome::Sent);

        let delivered = peer.drain();
        assert_eq!(delivered.len(), 1);
        let envelope = Envelope::from_bytes(&delivered[0]).unwrap();
        assert_eq!(envelope.settings.accent_color, Some(AccentColor::Teal));
        worker.shutdown();
    }

    #[test]
    fn peer_message_does_not_swallow_local_change() {
        let (local, peer) = local_pair();
        let prefs = shared(PreferencesService::new(Box::new(MemoryStore::new())));
        let mirror = SettingsMirror::new(prefs, local, Duration::from_millis(200));
        let (worker, outcomes) = MirrorWorker::spawn_observed(mirror);

        worker.deliver(br#"{"settings":{"digraph":false}}"#.to_vec());
        worker.update(|p| p.set_accent_color(AccentColor::Purple));

        let outcome = outcomes.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(outcome, SendOutcome::Sent);
        let envelope = Envelope::from_bytes(&peer.drain()[0]).unwrap();
        assert_eq!(envelope.settings.accent_color, Some(AccentColor::Purple));
        assert_eq!(envelope.settings.digraph, Some(false));
        worker.shutdown();
    }

    #[test]
    fn shutdown_flushes_pending_change() {
        let (local, peer) = local_pair();
        let prefs = shared(PreferencesService::new(Box::new(MemoryStore::new())));
        let mirror = SettingsMirror::new(prefs, local, Duration::from_secs(60));
        let worker = MirrorWorker::spawn(mirror);

        worker.update(|p| p.set_digraph(false));
        worker.shutdown();
        assert_eq!(peer.transmissions(), 1);
    }
}
