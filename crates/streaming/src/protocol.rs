//! Inspector wire protocol.
//!
//! Matchers push one JSON document per server-sent event. Every document
//! carries an integer `event` discriminant, an integer `id` sequence number
//! (not unique across matchers) and a coercible `time`, next to a payload
//! whose shape depends on the discriminant:
//!
//! | code | meaning              | payload                                              |
//! |------|----------------------|------------------------------------------------------|
//! | -1   | hello / info         | `{id, alias, pos, aoi, clientList[], subscriptions[]}` |
//! | 2    | client join          | `{client}`                                           |
//! | 3    | client move          | `{client}`                                           |
//! | 4    | client leave         | `{client}`                                           |
//! | 5    | subscription new     | `{sub}`                                              |
//! | 6    | subscription update  | `{sub}`                                              |
//! | 7    | subscription delete  | `{sub}`                                              |
//! | 8    | publication          | `{pub}`                                              |
//! | 10   | dissemination        | `{sub}` (`hostID` is the disseminating matcher)      |

use std::fmt;

use foundation::{Point, Region, Timestamp};
use serde::{Deserialize, Serialize};

/// Identity of a matcher node.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatcherId(pub i64);

impl fmt::Display for MatcherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of discriminants this inspector understands.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EventCode {
    Hello,
    ClientJoin,
    ClientMove,
    ClientLeave,
    SubscriptionNew,
    SubscriptionUpdate,
    SubscriptionDelete,
    Publication,
    Dissemination,
}

impl EventCode {
    /// Unknown codes yield `None` so newer matchers stay compatible.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            -1 => Some(Self::Hello),
            2 => Some(Self::ClientJoin),
            3 => Some(Self::ClientMove),
            4 => Some(Self::ClientLeave),
            5 => Some(Self::SubscriptionNew),
            6 => Some(Self::SubscriptionUpdate),
            7 => Some(Self::SubscriptionDelete),
            8 => Some(Self::Publication),
            10 => Some(Self::Dissemination),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Self::Hello => -1,
            Self::ClientJoin => 2,
            Self::ClientMove => 3,
            Self::ClientLeave => 4,
            Self::SubscriptionNew => 5,
            Self::SubscriptionUpdate => 6,
            Self::SubscriptionDelete => 7,
            Self::Publication => 8,
            Self::Dissemination => 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: String,
    pub pos: Point,
    #[serde(rename = "matcherID")]
    pub matcher_id: MatcherId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    #[serde(rename = "subID")]
    pub sub_id: String,
    pub channel: String,
    pub aoi: Region,
    #[serde(rename = "followClient")]
    pub follow_client: bool,
    #[serde(rename = "clientID")]
    pub client_id: String,
    #[serde(rename = "hostID")]
    pub host_id: MatcherId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationRecord {
    #[serde(rename = "pubID")]
    pub pub_id: String,
    pub channel: String,
    #[serde(rename = "clientID")]
    pub client_id: String,
    #[serde(rename = "matcherID")]
    pub matcher_id: MatcherId,
    pub aoi: Region,
    /// Opaque application payload, kept verbatim.
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Snapshot a matcher broadcasts when an inspector session starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatcherInfo {
    pub id: MatcherId,
    pub alias: String,
    pub pos: Point,
    pub aoi: Region,
    #[serde(rename = "clientList")]
    pub clients: Vec<ClientRecord>,
    pub subscriptions: Vec<SubscriptionRecord>,
}

// Per-discriminant envelopes. Unknown fields (including `event`) are ignored.

#[derive(Debug, Deserialize)]
pub(crate) struct HelloMessage {
    #[serde(with = "foundation::time::coerce")]
    pub time: Timestamp,
    #[serde(flatten)]
    pub info: MatcherInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClientMessage {
    pub id: i64,
    #[serde(with = "foundation::time::coerce")]
    pub time: Timestamp,
    pub client: ClientRecord,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubscriptionMessage {
    pub id: i64,
    #[serde(with = "foundation::time::coerce")]
    pub time: Timestamp,
    pub sub: SubscriptionRecord,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PublicationMessage {
    pub id: i64,
    #[serde(with = "foundation::time::coerce")]
    pub time: Timestamp,
    #[serde(rename = "pub")]
    pub publication: PublicationRecord,
}

#[cfg(test)]
mod tests {
    use super::{EventCode, MatcherInfo, SubscriptionRecord};

    #[test]
    fn event_codes_round_trip() {
        for code in [-1, 2, 3, 4, 5, 6, 7, 8, 10] {
            let ec = EventCode::from_code(code).expect("known code");
            assert_eq!(ec.code(), code);
        }
    }

    #[test]
    fn unknown_codes_are_not_mapped() {
        for code in [0, 1, 9, 11, -2, 1000] {
            assert_eq!(EventCode::from_code(code), None);
        }
    }

    #[test]
    fn subscription_record_uses_wire_names() {
        let sub: SubscriptionRecord = serde_json::from_str(
            r#"{
                "subID": "s1",
                "channel": "chat",
                "aoi": {"isPolygon": false, "center": {"x": 0, "y": 0}, "radius": 5},
                "followClient": true,
                "clientID": "A",
                "hostID": 1
            }"#,
        )
        .unwrap();
        assert_eq!(sub.sub_id, "s1");
        assert!(sub.follow_client);
        assert_eq!(sub.host_id.0, 1);
    }

    #[test]
    fn matcher_info_requires_lists() {
        let no_lists = r#"{
            "id": 1, "alias": "m1", "pos": {"x": 0, "y": 0},
            "aoi": {"isPolygon": false, "center": {"x": 0, "y": 0}, "radius": 5}
        }"#;
        assert!(serde_json::from_str::<MatcherInfo>(no_lists).is_err());
    }
}
