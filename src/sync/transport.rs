// File: src/sync/transport.rs
use crate::error::TransportError;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// A best-effort channel to the companion device.
///
/// `send_message` delivers now and fails when the peer is unreachable;
/// `transfer` hands the payload to a store-and-forward queue that delivers it
/// whenever the peer next shows up. Neither waits for an acknowledgement.
pub trait Transport: Send {
    /// False when there is no peer at all (not paired, companion app missing).
    fn is_available(&self) -> bool {
        true
    }

    fn is_reachable(&self) -> bool;

    fn send_message(&self, payload: &[u8]) -> Result<(), TransportError>;

    fn transfer(&self, payload: &[u8]) -> Result<(), TransportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    A,
    B,
}

impl Side {
    fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

#[derive(Debug, Default)]
struct LinkState {
    paired: bool,
    reachable: bool,
    inbox_a: VecDeque<Vec<u8>>,
    inbox_b: VecDeque<Vec<u8>>,
    // (destination, payload) waiting for the peer to become reachable
    queued: VecDeque<(Side, Vec<u8>)>,
    messages_sent: usize,
    transfers: usize,
}

impl LinkState {
    fn inbox(&mut self, side: Side) -> &mut VecDeque<Vec<u8>> {
        match side {
            Side::A => &mut self.inbox_a,
            Side::B => &mut self.inbox_b,
        }
    }

    fn flush_queued(&mut self) {
        while let Some((dest, payload)) = self.queued.pop_front() {
            self.inbox(dest).push_back(payload);
        }
    }
}

/// One end of an in-process pair of devices. Stands in for the real radio
/// link in the simulator and in tests.
#[derive(Debug, Clone)]
pub struct LocalEndpoint {
    side: Side,
    link: Arc<Mutex<LinkState>>,
}

/// Creates two connected endpoints, paired and reachable.
pub fn local_pair() -> (LocalEndpoint, LocalEndpoint) {
    let link = Arc::new(Mutex::new(LinkState {
        paired: true,
        reachable: true,
        ..LinkState::default()
    }));
    (
        LocalEndpoint { side: Side::A, link: Arc::clone(&link) },
        LocalEndpoint { side: Side::B, link },
    )
}

impl LocalEndpoint {
    /// Changes reachability for both ends. Becoming reachable flushes the
    /// store-and-forward queue into the inboxes.
    pub fn set_reachable(&self, reachable: bool) {
        let mut link = self.link.lock();
        link.reachable = reachable;
        if reachable {
            link.flush_queued();
        }
    }

    pub fn set_paired(&self, paired: bool) {
        self.link.lock().paired = paired;
    }

    /// Next payload delivered to this end, if any.
    pub fn recv(&self) -> Option<Vec<u8>> {
        self.link.lock().inbox(self.side).pop_front()
    }

    pub fn drain(&self) -> Vec<Vec<u8>> {
        self.link.lock().inbox(self.side).drain(..).collect()
    }

    pub fn messages_sent(&self) -> usize {
        self.link.lock().messages_sent
    }

    /// Payloads handed to `transfer`, whether delivered at once or queued.
    pub fn transfers(&self) -> usize {
        self.link.lock().transfers
    }

    /// Total payloads handed to the link, immediate or queued.
    pub fn transmissions(&self) -> usize {
        let link = self.link.lock();
        link.messages_sent + link.transfers
    }
}

impl Transport for LocalEndpoint {
    fn is_available(&self) -> bool {
        self.link.lock().paired
    }

    fn is_reachable(&self) -> bool {
        let link = self.link.lock();
        link.paired && link.reachable
    }

    fn send_message(&self, payload: &[u8]) -> Result<(), TransportError> {
        let mut link = self.link.lock();
        if !link.paired {
            return Err(TransportError::Unavailable);
        }
        if !link.reachable {
            return Err(TransportError::Unreachable);
        }
        link.messages_sent += 1;
        link.inbox(self.side.other()).push_back(payload.to_vec());
        Ok(())
    }

    fn transfer(&self, payload: &[u8]) -> Result<(), TransportError> {
        let mut link = self.link.lock();
        if !link.paired {
            return Err(TransportError::Unavailable);
        }
        link.transfers += 1;
        let dest = self.side.other();
        if link.reachable {
            link.inbox(dest).push_back(payload.to_vec());
        } else {
            link.queued.push_back((dest, payload.to_vec()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_reaches_other_side() {
        let (phone, watch) = local_pair();
        phone.send_message(b"hi").unwrap();
        assert_eq!(watch.recv(), Some(b"hi".to_vec()));
        assert_eq!(phone.recv(), None);
    }

    #[test]
    fn unreachable_rejects_messages_but_queues_transfers() {
        let (phone, watch) = local_pair();
        phone.set_reachable(false);
        assert!(matches!(phone.send_message(b"x"), Err(TransportError::Unreachable)));

        phone.transfer(b"later").unwrap();
        assert!(watch.drain().is_empty());

        watch.set_reachable(true);
        assert_eq!(watch.drain(), vec![b"later".to_vec()]);
    }

    #[test]
    fn transfers_count_immediate_and_queued_delivery() {
        let (phone, watch) = local_pair();
        phone.transfer(b"now").unwrap();
        phone.set_reachable(false);
        phone.transfer(b"later").unwrap();
        assert_eq!(phone.transfers(), 2);
        assert_eq!(phone.messages_sent(), 0);
        assert_eq!(watch.drain(), vec![b"now".to_vec()]);
    }

    #[test]
    fn unpaired_is_unavailable() {
        let (phone, _watch) = local_pair();
        phone.set_paired(false);
        assert!(!phone.is_available());
        assert!(!phone.is_reachable());
        assert!(matches!(phone.transfer(b"x"), Err(TransportError::Unavailable)));
    }
}
