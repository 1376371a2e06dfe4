//! JSON shapes exchanged with the chat service and their mapping onto
//! domain types.

use chrono::{DateTime, NaiveDateTime};
use serde::{de, Deserialize, Deserializer};

use crate::domain::{
    conversation::{Conversation, ConversationKind},
    message::{Message, TimelineMessage},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDto {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default)]
    pub last_message_sender_name: Option<String>,
    #[serde(default, deserialize_with = "optional_timestamp_ms")]
    pub last_message_created_at: Option<i64>,
    #[serde(default)]
    pub favorited: bool,
}

impl From<ConversationDto> for Conversation {
    fn from(dto: ConversationDto) -> Self {
        let kind = if dto.is_group {
            ConversationKind::Group
        } else {
            ConversationKind::Direct
        };

        Self {
            id: dto.id,
            name: dto.name,
            username: dto.username.filter(|_| kind == ConversationKind::Direct),
            kind,
            last_message: dto.last_message,
            last_message_sender_name: dto.last_message_sender_name,
            last_message_created_at_ms: dto.last_message_created_at,
            favorited: dto.favorited,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub conversation_id: i64,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default, deserialize_with = "optional_timestamp_ms")]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub conversation_name: Option<String>,
}

impl From<MessageDto> for Message {
    fn from(dto: MessageDto) -> Self {
        Self {
            conversation_id: dto.conversation_id,
            content: dto.content,
            sender_name: dto.sender_name.unwrap_or_default(),
            created_at_ms: dto.created_at,
            conversation_name: dto.conversation_name.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntryDto {
    pub message: TimelineMessageDto,
    #[serde(default)]
    pub sender_info: Option<SenderInfoDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineMessageDto {
    pub id: i64,
    pub sender_id: i64,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "optional_timestamp_ms")]
    pub created_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SenderInfoDto {
    #[serde(default)]
    pub name: String,
}

impl From<TimelineEntryDto> for TimelineMessage {
    fn from(dto: TimelineEntryDto) -> Self {
        Self {
            id: dto.message.id,
            sender_id: dto.message.sender_id,
            sender_name: dto.sender_info.map(|info| info.name).unwrap_or_default(),
            content: dto.message.content,
            created_at_ms: dto.message.created_at,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Text(String),
}

impl RawTimestamp {
    fn to_millis(&self) -> Option<i64> {
        match self {
            Self::Millis(value) => Some(*value),
            Self::Text(text) => parse_timestamp_ms(text),
        }
    }
}

/// Accepts RFC 3339 or a zone-less ISO local date-time, read as UTC.
pub fn parse_timestamp_ms(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.timestamp_millis());
    }

    raw.parse::<NaiveDateTime>()
        .ok()
        .map(|local| local.and_utc().timestamp_millis())
}

fn optional_timestamp_ms<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawTimestamp>::deserialize(deserializer)? {
        Some(raw) => raw
            .to_millis()
            .map(Some)
            .ok_or_else(|| de::Error::custom("unrecognized timestamp")),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn conversation_maps_camel_case_fields() {
        let dto: ConversationDto = serde_json::from_value(json!({
            "id": 7,
            "name": "Ana",
            "username": "ana",
            "isGroup": false,
            "lastMessage": "oi",
            "lastMessageSenderName": "Ana",
            "lastMessageCreatedAt": "2024-03-05T14:07:00Z",
            "favorited": true
        }))
        .expect("conversation should decode");

        let conversation = Conversation::from(dto);

        assert_eq!(conversation.id, 7);
        assert_eq!(conversation.display_username(), Some("ana"));
        assert_eq!(conversation.last_message_created_at_ms, Some(1_709_647_620_000));
        assert!(conversation.favorited);
    }

    #[test]
    fn group_conversation_drops_username_and_tolerates_nulls() {
        let dto: ConversationDto = serde_json::from_value(json!({
            "id": 2,
            "name": "Time",
            "username": "ignored",
            "isGroup": true,
            "lastMessage": null,
            "lastMessageCreatedAt": null
        }))
        .expect("conversation should decode");

        let conversation = Conversation::from(dto);

        assert!(conversation.is_group());
        assert_eq!(conversation.username, None);
        assert_eq!(conversation.last_message_created_at_ms, None);
        assert!(!conversation.favorited);
    }

    #[test]
    fn search_result_accepts_local_date_time() {
        let dto: MessageDto = serde_json::from_value(json!({
            "conversationId": 5,
            "content": "hello",
            "senderName": "Bia",
            "createdAt": "2024-03-05T14:07:09.123",
            "conversationName": "Amigos"
        }))
        .expect("message should decode");

        let message = Message::from(dto);

        assert_eq!(message.conversation_id, 5);
        assert_eq!(message.created_at_ms, Some(1_709_647_629_123));
        assert_eq!(message.conversation_name, "Amigos");
    }

    #[test]
    fn timeline_entry_flattens_sender_info() {
        let dto: TimelineEntryDto = serde_json::from_value(json!({
            "message": {
                "id": 11,
                "senderId": 3,
                "content": "bom dia",
                "createdAt": 1_709_647_620_000_i64
            },
            "senderInfo": { "name": "Caio" }
        }))
        .expect("timeline entry should decode");

        let message = TimelineMessage::from(dto);

        assert_eq!(message.sender_name, "Caio");
        assert_eq!(message.created_at_ms, Some(1_709_647_620_000));
        assert!(message.is_own(3));
    }

    #[test]
    fn garbage_timestamp_is_rejected() {
        let result = serde_json::from_value::<MessageDto>(json!({
            "conversationId": 5,
            "createdAt": "yesterday"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn null_created_at_keeps_the_message() {
        let search: MessageDto = serde_json::from_value(json!({
            "conversationId": 5,
            "content": "sem data",
            "createdAt": null
        }))
        .expect("message should decode");
        let timeline: TimelineEntryDto = serde_json::from_value(json!({
            "message": { "id": 12, "senderId": 3, "content": "oi" }
        }))
        .expect("timeline entry should decode");

        assert_eq!(Message::from(search).created_at_ms, None);
        assert_eq!(TimelineMessage::from(timeline).created_at_ms, None);
    }

    #[test]
    fn offset_timestamps_are_normalized_to_utc() {
        assert_eq!(
            parse_timestamp_ms("2024-03-05T11:07:00-03:00"),
            Some(1_709_647_620_000)
        );
    }
}
