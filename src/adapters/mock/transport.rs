//! Mock transport for testing.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::models::Request;
use crate::traits::{Exchange, Transport};

/// Transport that replays queued exchanges and records every request.
///
/// When the queue is empty the default exchange (200, empty body) is
/// returned.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    queued: Arc<Mutex<VecDeque<Exchange>>>,
    default_exchange: Arc<Mutex<Exchange>>,
    sent: Arc<Mutex<Vec<Request>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        let transport = Self::default();
        transport.set_default(Exchange {
            status_code: 200,
            ..Exchange::default()
        });
        transport
    }

    /// Queue an exchange for the next send.
    pub fn push(&self, exchange: Exchange) {
        self.queued
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(exchange);
    }

    pub fn set_default(&self, exchange: Exchange) {
        *self
            .default_exchange
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = exchange;
    }

    /// Requests in the order they were sent.
    pub fn sent(&self) -> Vec<Request> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn send_count(&self) -> usize {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &Request) -> Exchange {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let next = self
            .queued
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        next.unwrap_or_else(|| {
            self.default_exchange
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        })
    }
}
