// Common test utilities for integration tests
// This module contains shared code for all integration tests
#![allow(dead_code)]

use std::sync::Once;

use anyhow::Result;
use log::{info, LevelFilter};
use tokio::time::{timeout, Duration as TokioDuration};

use day_night::{ChatSession, ContactList, Message};

// Initialize logging once
static INIT_LOGGER: Once = Once::new();

/// Set up the logger for the tests
pub fn setup_logging() {
    INIT_LOGGER.call_once(|| {
        env_logger::Builder::new()
            .filter_level(LevelFilter::Debug)
            .is_test(true)
            .init();
    });
}

/// Open a fresh session for the contact at `index` in the seeded list
pub fn open_session(index: usize) -> ChatSession {
    let mut contacts = ContactList::new();
    for _ in 0..index {
        contacts.select_next();
    }
    let contact = contacts.open_selected().expect("seeded contact list is never empty");
    ChatSession::new(contact)
}

/// Wait for the next auto-reply to land in `session`, with a timeout
pub async fn wait_for_reply(session: &mut ChatSession, timeout_secs: u64) -> Result<Message> {
    info!("Waiting for auto-reply...");
    match timeout(TokioDuration::from_secs(timeout_secs), session.next_reply()).await {
        Ok(Some(msg)) => Ok(msg.clone()),
        Ok(None) => Err(anyhow::anyhow!("Reply channel closed")),
        Err(_) => Err(anyhow::anyhow!("Timed out waiting for auto-reply")),
    }
}

/// (text, is_sent_by_me) pairs, for compact assertions
pub fn transcript(session: &ChatSession) -> Vec<(String, bool)> {
    session
        .messages()
        .iter()
        .map(|m| (m.text.clone(), m.is_sent_by_me))
        .collect()
}
