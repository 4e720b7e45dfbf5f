use serde::{Deserialize, Deserializer, Serialize};

use crate::text::clean_text;

/// Exports written by some tools emit `null` where a value is simply absent.
/// Treat those the same as a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Root of a chat history dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Export {
    #[serde(default, deserialize_with = "nullable")]
    pub exported_at: String,
    #[serde(default, deserialize_with = "nullable")]
    pub export_version: String,
    #[serde(default, deserialize_with = "nullable")]
    pub user: User,
    #[serde(default, deserialize_with = "nullable")]
    pub chats: Vec<Chat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub display_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    #[serde(default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub chat_type: String,
    #[serde(default, deserialize_with = "nullable")]
    pub members: Vec<Member>,
    /// Chronological as written by the exporter; never re-sorted.
    #[serde(default, deserialize_with = "nullable")]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub display_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub message_type: String,
    /// ISO-8601, compared lexically.
    #[serde(default, deserialize_with = "nullable")]
    pub created_date_time: String,
    #[serde(default, deserialize_with = "nullable")]
    pub from: Sender,
    #[serde(default, deserialize_with = "nullable")]
    pub importance: String,
    #[serde(default)]
    pub deleted_date_time: Option<String>,
    #[serde(default)]
    pub last_edited_date_time: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub is_from_me: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub body: Body,
    #[serde(default, deserialize_with = "nullable")]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_event: Option<SystemEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sender {
    #[serde(default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub display_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    /// `html` or `text`.
    #[serde(default, deserialize_with = "nullable")]
    pub content_type: String,
    #[serde(default, deserialize_with = "nullable")]
    pub content: String,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "String::is_empty"
    )]
    pub content_processed: String,
}

impl Body {
    /// The pre-processed content when the exporter produced one, the raw
    /// content otherwise.
    pub fn effective_content(&self) -> &str {
        if self.content_processed.is_empty() {
            &self.content
        } else {
            &self.content_processed
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub content_url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub content_type: String,
}

/// Membership changes, renames and similar non-conversational events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemEvent {
    #[serde(
        rename = "@odata.type",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "String::is_empty"
    )]
    pub event_type: String,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,
}

impl Message {
    pub fn is_deleted(&self) -> bool {
        self.deleted_date_time
            .as_deref()
            .is_some_and(|ts| !ts.is_empty())
    }

    pub fn is_edited(&self) -> bool {
        self.last_edited_date_time
            .as_deref()
            .is_some_and(|ts| !ts.is_empty())
    }

    pub fn is_system_event(&self) -> bool {
        if self.system_event.is_some() {
            return true;
        }
        let message_type = self.message_type.to_lowercase();
        message_type.contains("event")
            || message_type.contains("system")
            || message_type == "unknownfuturemessagetype"
    }

    pub fn sender_name(&self) -> &str {
        if self.from.display_name.is_empty() {
            "Unknown"
        } else {
            &self.from.display_name
        }
    }

    /// Human-readable line for a system event, falling back through the
    /// event description, the cleaned body and the message type.
    pub fn system_text(&self) -> String {
        if let Some(event) = &self.system_event {
            if !event.description.is_empty() {
                return event.description.clone();
            }
        }

        let body = clean_text(self.body.effective_content());
        if !body.is_empty() {
            return body;
        }

        if !self.message_type.is_empty() {
            return self.message_type.clone();
        }

        "System event".to_string()
    }
}

/// Sidebar projection of a chat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    pub id: String,
    pub name: String,
    /// Empty when the chat has no messages.
    pub last_message_date: String,
    pub member_count: usize,
    pub chat_type: String,
}

impl ChatSummary {
    pub fn from_chat(chat: &Chat) -> Self {
        Self {
            id: chat.id.clone(),
            name: chat.name.clone(),
            last_message_date: chat
                .messages
                .last()
                .map(|message| message.created_date_time.clone())
                .unwrap_or_default(),
            member_count: chat.members.len(),
            chat_type: chat.chat_type.clone(),
        }
    }

    pub fn is_group(&self) -> bool {
        self.chat_type == "group"
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Unnamed Chat"
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub chat_id: String,
    pub chat_name: String,
    pub message_id: String,
    pub snippet: String,
    /// Sender display name.
    pub from: String,
    pub created_date_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_with_type(message_type: &str) -> Message {
        Message {
            id: "m1".to_string(),
            message_type: message_type.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn should_deserialize_export_with_camel_case_fields() {
        let json = r#"{
            "exportedAt": "2024-05-01T10:00:00Z",
            "exportVersion": "1.2",
            "user": {"id": "u1", "displayName": "Ada"},
            "chats": [{
                "id": "c1",
                "name": "Project",
                "chatType": "group",
                "members": [{"id": "u1", "displayName": "Ada"}],
                "messages": [{
                    "id": "m1",
                    "messageType": "message",
                    "createdDateTime": "2024-04-30T09:00:00Z",
                    "from": {"id": "u1", "displayName": "Ada"},
                    "importance": "normal",
                    "deletedDateTime": null,
                    "lastEditedDateTime": "2024-04-30T09:05:00Z",
                    "isFromMe": true,
                    "body": {"contentType": "html", "content": "<p>Hi</p>"},
                    "attachments": [{"name": "a.pdf", "contentUrl": "https://x/a.pdf", "contentType": "reference"}]
                }]
            }]
        }"#;

        let export: Export = serde_json::from_str(json).unwrap();

        assert_eq!(export.exported_at, "2024-05-01T10:00:00Z");
        assert_eq!(export.user.display_name, "Ada");
        assert_eq!(export.chats.len(), 1);

        let message = &export.chats[0].messages[0];
        assert_eq!(message.from.display_name, "Ada");
        assert!(message.is_from_me);
        assert!(!message.is_deleted());
        assert!(message.is_edited());
        assert_eq!(message.attachments[0].content_url, "https://x/a.pdf");
        assert!(message.system_event.is_none());
    }

    #[test]
    fn should_default_missing_and_null_fields() {
        let json = r#"{"chats": [{"id": "c1", "name": null, "members": null, "messages": null}]}"#;

        let export: Export = serde_json::from_str(json).unwrap();

        let chat = &export.chats[0];
        assert_eq!(chat.name, "");
        assert!(chat.members.is_empty());
        assert!(chat.messages.is_empty());
        assert_eq!(export.user, User::default());
    }

    #[test]
    fn should_reject_wrongly_typed_fields() {
        let json = r#"{"chats": "not a list"}"#;
        let result: Result<Export, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn should_read_system_event_odata_type() {
        let json = r##"{
            "id": "m2",
            "messageType": "systemEventMessage",
            "systemEvent": {"@odata.type": "#microsoft.graph.membersAddedEventMessageDetail", "description": "Ada added Bob"}
        }"##;

        let message: Message = serde_json::from_str(json).unwrap();
        let event = message.system_event.as_ref().unwrap();

        assert_eq!(
            event.event_type,
            "#microsoft.graph.membersAddedEventMessageDetail"
        );
        assert!(message.is_system_event());
        assert_eq!(message.system_text(), "Ada added Bob");
    }

    #[test]
    fn should_prefer_processed_content() {
        let mut body = Body {
            content_type: "html".to_string(),
            content: "<p>raw</p>".to_string(),
            content_processed: String::new(),
        };
        assert_eq!(body.effective_content(), "<p>raw</p>");

        body.content_processed = "processed".to_string();
        assert_eq!(body.effective_content(), "processed");
    }

    #[test]
    fn should_detect_system_messages_by_type() {
        assert!(message_with_type("systemEventMessage").is_system_event());
        assert!(message_with_type("unknownFutureMessageType").is_system_event());
        assert!(message_with_type("chatEvent").is_system_event());
        assert!(!message_with_type("message").is_system_event());
    }

    #[test]
    fn should_fall_back_through_system_text_sources() {
        let mut message = message_with_type("chatRenamed");
        message.body.content = "<b>Chat</b>   renamed".to_string();
        assert_eq!(message.system_text(), "Chat renamed");

        message.body.content.clear();
        assert_eq!(message.system_text(), "chatRenamed");

        message.message_type.clear();
        assert_eq!(message.system_text(), "System event");
    }

    #[test]
    fn should_treat_empty_timestamps_as_absent() {
        let mut message = message_with_type("message");
        message.deleted_date_time = Some(String::new());
        assert!(!message.is_deleted());

        message.deleted_date_time = Some("2024-01-01T00:00:00Z".to_string());
        assert!(message.is_deleted());
    }

    #[test]
    fn should_fall_back_to_unknown_sender() {
        let mut message = message_with_type("message");
        assert_eq!(message.sender_name(), "Unknown");

        message.from.display_name = "Grace".to_string();
        assert_eq!(message.sender_name(), "Grace");
    }

    #[test]
    fn should_summarize_chat_from_last_message_in_stored_order() {
        let chat = Chat {
            id: "c1".to_string(),
            name: String::new(),
            chat_type: "group".to_string(),
            members: vec![Member::default(), Member::default()],
            messages: vec![
                Message {
                    created_date_time: "2024-03-01T00:00:00Z".to_string(),
                    ..Default::default()
                },
                Message {
                    created_date_time: "2024-01-01T00:00:00Z".to_string(),
                    ..Default::default()
                },
            ],
        };

        let summary = ChatSummary::from_chat(&chat);

        assert_eq!(summary.last_message_date, "2024-01-01T00:00:00Z");
        assert_eq!(summary.member_count, 2);
        assert!(summary.is_group());
        assert_eq!(summary.display_name(), "Unnamed Chat");
    }

    #[test]
    fn should_summarize_chat_without_messages() {
        let summary = ChatSummary::from_chat(&Chat::default());
        assert_eq!(summary.last_message_date, "");
    }

    #[test]
    fn should_serialize_search_result_with_camel_case_keys() {
        let result = SearchResult {
            chat_id: "c1".to_string(),
            chat_name: "Project".to_string(),
            message_id: "m1".to_string(),
            snippet: "hello".to_string(),
            from: "Ada".to_string(),
            created_date_time: "2024-01-01T00:00:00Z".to_string(),
        };

        let json = serde_json::to_string(&result).unwrap();
        let expected = r#"{"chatId":"c1","chatName":"Project","messageId":"m1","snippet":"hello","from":"Ada","createdDateTime":"2024-01-01T00:00:00Z"}"#;
        assert_eq!(json, expected);
    }
}
