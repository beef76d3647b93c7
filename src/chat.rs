// Per-contact chat session: message history, draft buffer and scripted replies
//
// The session is owned by the UI loop and is the only place its state is
// mutated. Reply timers run as tokio tasks and hand the firing time back
// over a channel; the owner drains it with `poll_replies` each tick.

use chrono::{DateTime, Local};
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::clock::{Clock, SystemClock};
use crate::models::{Contact, Message};

/// Text of the scripted reply appended after every successful send
pub const AUTO_REPLY_TEXT: &str = "재미있어! 과제다하고 연락할게!";

/// How long after a send the scripted reply arrives
pub const AUTO_REPLY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug)]
struct ReplyFired {
    at: DateTime<Local>,
}

pub struct ChatSession {
    contact: Contact,
    messages: Vec<Message>,
    draft: String,
    clock: Arc<dyn Clock>,
    reply_tx: mpsc::UnboundedSender<ReplyFired>,
    reply_rx: mpsc::UnboundedReceiver<ReplyFired>,
    pending: Vec<JoinHandle<()>>,
}

impl ChatSession {
    pub fn new(contact: Contact) -> Self {
        Self::with_clock(contact, Arc::new(SystemClock))
    }

    pub fn with_clock(contact: Contact, clock: Arc<dyn Clock>) -> Self {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        info!("Chat session opened for {}", contact.name);
        ChatSession {
            contact,
            messages: Vec::new(),
            draft: String::new(),
            clock,
            reply_tx,
            reply_rx,
            pending: Vec::new(),
        }
    }

    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    /// Number of scheduled replies that have not fired yet
    pub fn pending_replies(&self) -> usize {
        self.pending.iter().filter(|h| !h.is_finished()).count()
    }

    /// Send the current draft
    pub fn send_draft(&mut self) -> bool {
        let text = self.draft.clone();
        self.send_message(&text)
    }

    /// Append `text` as our own message and schedule the scripted reply.
    ///
    /// Whitespace-only input is ignored and leaves the draft untouched.
    /// Returns whether a message was appended. Must be called from within
    /// a tokio runtime, since the reply timer is spawned onto it.
    pub fn send_message(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            debug!("Ignoring empty message for {}", self.contact.name);
            return false;
        }

        self.messages.push(Message::new(text, true, self.clock.now()));
        self.draft.clear();
        self.schedule_reply();
        true
    }

    fn schedule_reply(&mut self) {
        self.pending.retain(|h| !h.is_finished());

        let tx = self.reply_tx.clone();
        let clock = Arc::clone(&self.clock);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(AUTO_REPLY_DELAY).await;
            // Receiver is gone once the session has been torn down
            let _ = tx.send(ReplyFired { at: clock.now() });
        });
        self.pending.push(handle);
        debug!(
            "Scheduled auto-reply for {} ({} pending)",
            self.contact.name,
            self.pending.len()
        );
    }

    fn append_reply(&mut self, fired: ReplyFired) {
        self.messages.push(Message::new(AUTO_REPLY_TEXT, false, fired.at));
    }

    /// Append every reply whose timer has fired since the last call.
    /// Returns how many were appended.
    pub fn poll_replies(&mut self) -> usize {
        let mut appended = 0;
        while let Ok(fired) = self.reply_rx.try_recv() {
            self.append_reply(fired);
            appended += 1;
        }
        if appended > 0 {
            debug!("Appended {} auto-reply(s) for {}", appended, self.contact.name);
        }
        appended
    }

    /// Wait for the next reply timer to fire and append it.
    ///
    /// Returns `None` straight away when no reply is scheduled.
    pub async fn next_reply(&mut self) -> Option<&Message> {
        let fired = match self.reply_rx.try_recv() {
            Ok(fired) => fired,
            // A timer may have finished between the two checks
            Err(_) if self.pending_replies() == 0 => self.reply_rx.try_recv().ok()?,
            Err(_) => self.reply_rx.recv().await?,
        };
        self.append_reply(fired);
        self.messages.last()
    }

    /// Cancel all pending reply timers
    pub fn close(&mut self) {
        let mut cancelled = 0;
        for handle in self.pending.drain(..) {
            if !handle.is_finished() {
                cancelled += 1;
            }
            handle.abort();
        }
        if cancelled > 0 {
            info!(
                "Closed chat with {}, cancelled {} pending auto-reply(s)",
                self.contact.name, cancelled
            );
        }
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.close();
    }
}
