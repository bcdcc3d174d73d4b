//! Planet facts: one request per selection, applied only if still current.
//!
//! Transports deliver replies into a shared inbox; the game drains it once
//! per tick, so a reply can never re-enter the runner mid-update.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::bodies::PLANETS;

/// Shown by the host next to the static description when generation failed.
pub const FALLBACK_NOTICE: &str = "暂时无法获取该星球的更多信息。";

#[derive(Error, Debug)]
pub enum FactError {
    #[error("no fact service configured")]
    NotConfigured,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}")]
    Http { status: u16 },

    #[error("malformed reply: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("reply contained no text")]
    EmptyReply,
}

/// Identity of one fact request. Only the most recent ticket is honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactTicket {
    pub seq: u64,
    pub body: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactOrigin {
    Generated,
    /// Generation failed; the text is the body's static description.
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FactView {
    Hidden,
    Loading { body: usize },
    Ready {
        body: usize,
        text: String,
        origin: FactOrigin,
    },
}

#[derive(Debug)]
pub struct FactReply {
    pub ticket: FactTicket,
    pub result: Result<String, FactError>,
}

pub type FactInbox = Rc<RefCell<Vec<FactReply>>>;

/// Something that can produce a fact about a planet, eventually.
pub trait FactSource {
    /// Start a request. The reply must be pushed to `inbox`, tagged with `ticket`.
    fn request(&self, ticket: FactTicket, planet_name: &str, inbox: FactInbox);
}

/// Used when no API key is configured: every request fails at once.
pub struct OfflineSource;

impl FactSource for OfflineSource {
    fn request(&self, ticket: FactTicket, _planet_name: &str, inbox: FactInbox) {
        inbox.borrow_mut().push(FactReply {
            ticket,
            result: Err(FactError::NotConfigured),
        });
    }
}

pub struct FactDesk {
    source: Box<dyn FactSource>,
    inbox: FactInbox,
    next_seq: u64,
    current: Option<FactTicket>,
    view: FactView,
}

impl FactDesk {
    pub fn new(source: Box<dyn FactSource>) -> Self {
        Self {
            source,
            inbox: Rc::new(RefCell::new(Vec::new())),
            next_seq: 0,
            current: None,
            view: FactView::Hidden,
        }
    }

    pub fn set_source(&mut self, source: Box<dyn FactSource>) {
        self.source = source;
    }

    pub fn view(&self) -> &FactView {
        &self.view
    }

    pub fn current(&self) -> Option<FactTicket> {
        self.current
    }

    /// Text to display, if a fact is ready.
    pub fn text(&self) -> Option<&str> {
        match &self.view {
            FactView::Ready { text, .. } => Some(text),
            _ => None,
        }
    }

    /// The localized failure notice, only while a fallback is shown.
    pub fn notice(&self) -> Option<&'static str> {
        match &self.view {
            FactView::Ready {
                origin: FactOrigin::Fallback,
                ..
            } => Some(FALLBACK_NOTICE),
            _ => None,
        }
    }

    /// Begin loading a fact for `body`, superseding any request in flight.
    pub fn request(&mut self, body: usize) -> FactTicket {
        self.next_seq += 1;
        let ticket = FactTicket {
            seq: self.next_seq,
            body,
        };
        self.current = Some(ticket);
        self.view = FactView::Loading { body };
        if let Some(planet) = PLANETS.get(body) {
            self.source.request(ticket, planet.name, Rc::clone(&self.inbox));
        }
        ticket
    }

    /// Hide the fact and forget the pending request.
    pub fn clear(&mut self) {
        self.current = None;
        self.view = FactView::Hidden;
    }

    /// Apply one reply. Returns false for stale replies, which are dropped.
    pub fn resolve(&mut self, reply: FactReply) -> bool {
        if self.current != Some(reply.ticket) {
            log::debug!(
                "dropping stale fact reply #{} for body {}",
                reply.ticket.seq,
                reply.ticket.body
            );
            return false;
        }
        let body = reply.ticket.body;
        let result = reply.result.and_then(|text| {
            let text = text.trim();
            if text.is_empty() {
                Err(FactError::EmptyReply)
            } else {
                Ok(text.to_owned())
            }
        });
        self.view = match result {
            Ok(text) => FactView::Ready {
                body,
                text,
                origin: FactOrigin::Generated,
            },
            Err(err) => {
                log::warn!("fact request for body {body} failed: {err}");
                FactView::Ready {
                    body,
                    text: PLANETS.get(body).map(|p| p.description).unwrap_or_default().to_owned(),
                    origin: FactOrigin::Fallback,
                }
            }
        };
        true
    }

    /// Drain the inbox. Returns true if the view changed.
    pub fn pump(&mut self) -> bool {
        let replies: Vec<FactReply> = self.inbox.borrow_mut().drain(..).collect();
        let mut changed = false;
        for reply in replies {
            changed |= self.resolve(reply);
        }
        changed
    }
}
