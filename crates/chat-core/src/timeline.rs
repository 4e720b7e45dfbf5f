use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Message;

/// A run of consecutive messages sent on the same calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayGroup {
    /// `YYYY-MM-DD` in UTC, or the raw timestamp when it does not parse.
    pub day: String,
    pub messages: Vec<Message>,
}

fn day_key(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(parsed) => parsed
            .with_timezone(&Utc)
            .date_naive()
            .format("%Y-%m-%d")
            .to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// Groups messages by day without reordering them. A new group starts each
/// time the day changes, so out-of-order input may repeat a day.
pub fn group_by_day(messages: &[Message]) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();

    for message in messages {
        let key = day_key(&message.created_date_time);
        match groups.last_mut() {
            Some(group) if group.day == key => group.messages.push(message.clone()),
            _ => groups.push(DayGroup {
                day: key,
                messages: vec![message.clone()],
            }),
        }
    }

    groups
}
