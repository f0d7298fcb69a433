// Copyright 2017-2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{collections::HashMap, fmt::Debug, io::Write, sync::Mutex, time::SystemTime};

use derive_more::From;
use serde::{Deserialize, Serialize};
use tracing::{
    field::{Field, Visit},
    span::Attributes,
    Event, Id, Subscriber,
};
use tracing_subscriber::{layer::Context, registry::LookupSpan, Layer};

use crate::tracing::constants;

#[derive(Debug, Serialize, Deserialize)]
pub struct GameEvent {
    pub timestamp: SystemTime,
    pub kind: GameEventKind,
}

#[derive(Debug, Serialize, Deserialize, From)]
pub enum GameEventKind {
    AttemptStart(AttemptStartEvent),
    Committed(CommittedEvent),
    Rejected(RejectedEvent),
    Check(CheckEvent),
    Checkmate(CheckmateEvent),
    AttemptEnd(AttemptEndEvent),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AttemptStartEvent {
    pub id: u64,
    pub mov: String,
    pub turn: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommittedEvent {
    pub mov: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RejectedEvent {
    pub mov: String,
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckEvent {
    pub side: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckmateEvent {
    pub side: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AttemptEndEvent {
    pub id: u64,
}

/// The GameEventLayer is a Layer that understands the instrumentation in `Game::attempt_move` and writes a record of
/// every move attempt, with its outcome, as one JSON object per line. The resulting log can be replayed or inspected
/// after a session to see exactly which moves were turned down and why.
pub struct GameEventLayer {
    writer: Box<Mutex<dyn Write + Send + Sync>>,
}

impl GameEventLayer {
    pub fn new<W: Write + 'static + Send + Sync>(dest: W) -> GameEventLayer {
        GameEventLayer {
            writer: Box::new(Mutex::new(dest)),
        }
    }

    fn record_event<T: Into<GameEventKind>>(&self, kind: T) {
        let event = GameEvent {
            timestamp: SystemTime::now(),
            kind: kind.into(),
        };

        // A poisoned or failing writer drops the record.
        if let Ok(mut writer) = self.writer.lock() {
            if serde_json::to_writer(&mut *writer, &event).is_ok() {
                let _ = writeln!(&mut *writer);
            }
        }
    }

    fn on_attempt_enter(&self, attrs: &Attributes<'_>, id: &Id) {
        let mut attrs = attrs.extract_fields();
        self.record_event(AttemptStartEvent {
            id: id.into_u64(),
            mov: attrs.remove("mov").unwrap_or_default(),
            turn: attrs.remove("turn").unwrap_or_default(),
        });
    }

    fn on_attempt_exit(&self, id: &Id) {
        self.record_event(AttemptEndEvent { id: id.into_u64() });
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

impl<S: Subscriber> Layer<S> for GameEventLayer
where
    S: for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            if span.name() == constants::ATTEMPT_MOVE {
                self.on_attempt_enter(attrs, id);
            }
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(&id) {
            if span.name() == constants::ATTEMPT_MOVE {
                self.on_attempt_exit(&id);
            }
        }
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut attrs = event.extract_fields();
        // Not all events have `event` keys (e.g. mundane logs from other modules).
        // Ignore the ones we don't care about.
        let event_str = match attrs.remove("event") {
            Some(event_str) => event_str,
            None => return,
        };

        let captured = attrs.remove("captured");
        let mut field = |name: &str| attrs.remove(name).unwrap_or_default();
        match event_str.as_ref() {
            constants::MOVE_COMMITTED => self.record_event(CommittedEvent {
                mov: field("mov"),
                captured,
            }),
            constants::MOVE_REJECTED => self.record_event(RejectedEvent {
                mov: field("mov"),
                reason: field("reason"),
            }),
            constants::CHECK => self.record_event(CheckEvent {
                side: field("side"),
            }),
            constants::CHECKMATE => self.record_event(CheckmateEvent {
                side: field("side"),
            }),
            _ => {}
        }
    }
}

trait HasExtractableFields {
    fn extract_fields(&self) -> HashMap<String, String>;
}

impl HasExtractableFields for Attributes<'_> {
    fn extract_fields(&self) -> HashMap<String, String> {
        let mut extractor = HashMapExtractor(HashMap::new());
        self.record(&mut extractor);
        extractor.0
    }
}

impl HasExtractableFields for Event<'_> {
    fn extract_fields(&self) -> HashMap<String, String> {
        let mut extractor = HashMapExtractor(HashMap::new());
        self.record(&mut extractor);
        extractor.0
    }
}

struct HashMapExtractor(HashMap<String, String>);
impl Visit for HashMapExtractor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_owned(), value.to_owned());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        self.0
            .insert(field.name().to_owned(), format!("{:?}", value));
    }
}
