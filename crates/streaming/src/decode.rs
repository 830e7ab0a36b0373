//! Turns one inbound message into at most one [`DomainEvent`].

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::event::{DomainEvent, EventKind};
use crate::protocol::{
    ClientMessage, EventCode, HelloMessage, PublicationMessage, SubscriptionMessage,
};

#[derive(Debug)]
pub enum DecodeError {
    /// The message is not JSON at all.
    Parse(serde_json::Error),
    /// Valid JSON, but not an object.
    NotAnObject,
    /// Known discriminant, payload failed validation.
    Schema { code: EventCode, source: serde_json::Error },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Parse(e) => write!(f, "malformed JSON: {e}"),
            DecodeError::NotAnObject => write!(f, "message is not a JSON object"),
            DecodeError::Schema { code, source } => {
                write!(f, "invalid payload for event {}: {source}", code.code())
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Parse(e) => Some(e),
            DecodeError::NotAnObject => None,
            DecodeError::Schema { source, .. } => Some(source),
        }
    }
}

impl DecodeError {
    /// `true` for messages that never parsed, `false` for schema failures.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, DecodeError::Schema { .. })
    }
}

/// Read the `event` discriminant. Missing, non-integer and unknown codes all
/// yield `None`.
pub fn classify(message: &Value) -> Option<EventCode> {
    message
        .get("event")
        .and_then(Value::as_i64)
        .and_then(EventCode::from_code)
}

/// Decode a raw message.
///
/// `Ok(None)` means the message was well-formed but carries a discriminant
/// this inspector does not handle; callers drop it silently.
pub fn decode_message(text: &str) -> Result<Option<DomainEvent>, DecodeError> {
    let value: Value = serde_json::from_str(text).map_err(DecodeError::Parse)?;
    decode_value(value)
}

pub fn decode_value(value: Value) -> Result<Option<DomainEvent>, DecodeError> {
    if !value.is_object() {
        return Err(DecodeError::NotAnObject);
    }
    let Some(code) = classify(&value) else {
        return Ok(None);
    };

    let event = match code {
        EventCode::Hello => {
            let msg: HelloMessage = typed(code, value)?;
            DomainEvent {
                id: msg.info.id.0,
                time: msg.time,
                kind: EventKind::Info(msg.info),
            }
        }
        EventCode::ClientJoin | EventCode::ClientMove | EventCode::ClientLeave => {
            let msg: ClientMessage = typed(code, value)?;
            let kind = match code {
                EventCode::ClientJoin => EventKind::ClientJoin(msg.client),
                EventCode::ClientMove => EventKind::ClientMove(msg.client),
                _ => EventKind::ClientLeave(msg.client),
            };
            DomainEvent { id: msg.id, time: msg.time, kind }
        }
        EventCode::SubscriptionNew
        | EventCode::SubscriptionUpdate
        | EventCode::SubscriptionDelete
        | EventCode::Dissemination => {
            let msg: SubscriptionMessage = typed(code, value)?;
            let kind = match code {
                EventCode::SubscriptionNew => EventKind::SubscriptionNew(msg.sub),
                EventCode::SubscriptionUpdate => EventKind::SubscriptionUpdate(msg.sub),
                EventCode::SubscriptionDelete => EventKind::SubscriptionDelete(msg.sub),
                _ => EventKind::Dissemination(msg.sub),
            };
            DomainEvent { id: msg.id, time: msg.time, kind }
        }
        EventCode::Publication => {
            let msg: PublicationMessage = typed(code, value)?;
            DomainEvent {
                id: msg.id,
                time: msg.time,
                kind: EventKind::Publication(msg.publication),
            }
        }
    };
    Ok(Some(event))
}

fn typed<T: DeserializeOwned>(code: EventCode, value: Value) -> Result<T, DecodeError> {
    serde_json::from_value(value).map_err(|source| DecodeError::Schema { code, source })
}
