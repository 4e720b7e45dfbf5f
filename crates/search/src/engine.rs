use chat_core::{Chat, Export, Message, SearchResult};

use crate::snippet::extract_snippet;

/// Cap applied when the caller passes zero.
pub const DEFAULT_MAX_RESULTS: usize = 200;

/// Case-insensitive substring search over chat names, message bodies and
/// sender names.
///
/// Results come back in scan order: chats as stored, then messages as stored.
/// There is no relevance ranking. The scan stops once `max_results` hits are
/// collected; zero selects [`DEFAULT_MAX_RESULTS`].
pub fn search(export: Option<&Export>, query: &str, max_results: usize) -> Vec<SearchResult> {
    let Some(export) = export else {
        return Vec::new();
    };
    if query.is_empty() {
        return Vec::new();
    }

    let limit = if max_results == 0 {
        DEFAULT_MAX_RESULTS
    } else {
        max_results
    };
    let query = query.to_lowercase();
    let query = query.as_str();

    let results: Vec<SearchResult> = export
        .chats
        .iter()
        .flat_map(|chat| {
            chat.messages.iter().filter_map(move |message| {
                match_message(message, &chat.name, query).map(|snippet| hit(chat, message, snippet))
            })
        })
        .take(limit)
        .collect();

    tracing::debug!(
        "Search for {:?} returned {} results (limit {})",
        query,
        results.len(),
        limit
    );

    results
}

/// First match wins: body, then sender, then chat name. Only a body match
/// centers the snippet.
fn match_message(message: &Message, chat_name: &str, query: &str) -> Option<String> {
    let body = message.body.effective_content();

    if let Some(offset) = body.to_lowercase().find(query) {
        return Some(extract_snippet(body, offset));
    }

    if message.from.display_name.to_lowercase().contains(query)
        || chat_name.to_lowercase().contains(query)
    {
        return Some(extract_snippet(body, 0));
    }

    None
}

fn hit(chat: &Chat, message: &Message, snippet: String) -> SearchResult {
    SearchResult {
        chat_id: chat.id.clone(),
        chat_name: chat.name.clone(),
        message_id: message.id.clone(),
        snippet,
        from: message.from.display_name.clone(),
        created_date_time: message.created_date_time.clone(),
    }
}
