//! Mock communicator for testing

use super::Communicator;
use crate::address::Address;
use crate::error::{Error, Result};
use crate::telegram::{DongleEvent, RadioTelegram, Telegram};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

/// Default base id reported by the mock (gateway base ids live in the
/// 0xFF800000 range)
const DEFAULT_BASE_ID: [u8; 4] = [0xFF, 0x80, 0x00, 0x00];

/// Mock communicator for unit and integration testing
///
/// Clone-able: all clones share the same queues, so a test can keep one
/// clone for injection and inspection while the dongle owns another.
#[derive(Clone)]
pub struct MockCommunicator {
    inner: Arc<Mutex<MockInner>>,
}

struct MockInner {
    inbound: VecDeque<DongleEvent>,
    sent: Vec<Telegram>,
    base_id: Address,
    fail_sends: bool,
}

impl MockCommunicator {
    /// Create a mock with an empty inbound queue
    pub fn new() -> Self {
        MockCommunicator {
            inner: Arc::new(Mutex::new(MockInner {
                inbound: VecDeque::new(),
                sent: Vec::new(),
                base_id: Address::new(DEFAULT_BASE_ID),
                fail_sends: false,
            })),
        }
    }

    /// Queue an inbound event for the receive loop
    pub fn inject(&self, event: DongleEvent) {
        self.inner.lock().inbound.push_back(event);
    }

    /// Queue an inbound radio telegram
    pub fn inject_radio(&self, telegram: RadioTelegram) {
        self.inject(DongleEvent::Radio(telegram));
    }

    /// All telegrams sent so far, in order
    pub fn sent(&self) -> Vec<Telegram> {
        self.inner.lock().sent.clone()
    }

    /// Drop recorded outbound telegrams
    pub fn clear_sent(&self) {
        self.inner.lock().sent.clear();
    }

    /// Override the reported base id
    pub fn set_base_id(&self, base_id: Address) {
        self.inner.lock().base_id = base_id;
    }

    /// Make subsequent sends fail, for error-path tests
    pub fn set_fail_sends(&self, fail: bool) {
        self.inner.lock().fail_sends = fail;
    }
}

impl Communicator for MockCommunicator {
    fn receive(&mut self, _timeout: Duration) -> Result<Option<DongleEvent>> {
        Ok(self.inner.lock().inbound.pop_front())
    }

    fn send(&mut self, telegram: &Telegram) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.fail_sends {
            return Err(Error::SendFailed("mock send failure".to_string()));
        }
        inner.sent.push(telegram.clone());
        Ok(())
    }

    fn base_id(&mut self) -> Result<Address> {
        Ok(self.inner.lock().base_id)
    }
}

impl Default for MockCommunicator {
    fn default() -> Self {
        Self::new()
    }
}
