//! Read-only projections of the conversation list
//!
//! Everything here is computed on demand from store data and never cached.

use chrono::{DateTime, NaiveDate, TimeZone};
use regex::RegexBuilder;

use crate::i18n::dates::{chat_list_label, day_label, format_time, local_day};
use crate::i18n::{TextKey, Translator};
use crate::types::{Conversation, Message};

/// Chat list tabs. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Category {
    #[default]
    All,
    Unread,
    Groups,
    Favorites,
}

impl Category {
    fn admits(self, conversation: &Conversation) -> bool {
        match self {
            Category::All => true,
            Category::Unread => conversation.unread > 0,
            Category::Groups => conversation.is_group,
            Category::Favorites => conversation.is_favorite,
        }
    }

    pub fn label_key(self) -> TextKey {
        match self {
            Category::All => TextKey::FilterAll,
            Category::Unread => TextKey::FilterUnread,
            Category::Groups => TextKey::FilterGroups,
            Category::Favorites => TextKey::FilterFavorites,
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Category::All),
            "unread" => Ok(Category::Unread),
            "groups" => Ok(Category::Groups),
            "favorites" => Ok(Category::Favorites),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// Search box text plus the active category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatFilter {
    pub query: String,
    pub category: Category,
}

impl ChatFilter {
    pub fn matches(&self, conversation: &Conversation) -> bool {
        contains_ignore_case(&conversation.name, &self.query) && self.category.admits(conversation)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Conversations passing `filter`, in list order
pub fn filter_conversations<'a>(
    conversations: &'a [Conversation],
    filter: &ChatFilter,
) -> Vec<&'a Conversation> {
    conversations.iter().filter(|c| filter.matches(c)).collect()
}

/// Whether a message matches an in-conversation search.
///
/// Messages without text (images, tombstones) never match.
pub fn message_matches(message: &Message, query: &str) -> bool {
    message.has_text() && contains_ignore_case(&message.text, query)
}

/// Messages to display for a search query. An empty query shows everything.
pub fn search_messages<'a>(messages: &'a [Message], query: &str) -> Vec<&'a Message> {
    if query.is_empty() {
        return messages.iter().collect();
    }
    messages.iter().filter(|m| message_matches(m, query)).collect()
}

/// Piece of message text, flagged when it matched the search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

/// Split `text` into plain and matched segments for highlighting
pub fn highlight<'a>(text: &'a str, query: &str) -> Vec<Segment<'a>> {
    if query.is_empty() || text.is_empty() {
        return vec![Segment { text, matched: false }];
    }

    let re = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!("Cannot highlight '{}': {}", query, e);
            return vec![Segment { text, matched: false }];
        }
    };

    let mut segments = Vec::new();
    let mut cursor = 0;
    for found in re.find_iter(text) {
        if found.start() > cursor {
            segments.push(Segment {
                text: &text[cursor..found.start()],
                matched: false,
            });
        }
        segments.push(Segment {
            text: found.as_str(),
            matched: true,
        });
        cursor = found.end();
    }
    if cursor < text.len() {
        segments.push(Segment {
            text: &text[cursor..],
            matched: false,
        });
    }
    segments
}

/// Messages of one calendar day
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup<'a> {
    pub day: NaiveDate,
    pub label: String,
    pub messages: Vec<&'a Message>,
}

/// Group messages by calendar day in the viewer's timezone.
///
/// Messages are expected in chronological order; each day becomes one group
/// in order of first appearance.
pub fn group_by_day<'a, Tz: TimeZone>(
    messages: &[&'a Message],
    now: &DateTime<Tz>,
    tr: &Translator,
) -> Vec<DayGroup<'a>> {
    let mut groups: Vec<DayGroup<'a>> = Vec::new();
    for &message in messages {
        let day = local_day(&message.timestamp, now);
        match groups.iter_mut().find(|g| g.day == day) {
            Some(group) => group.messages.push(message),
            None => groups.push(DayGroup {
                day,
                label: day_label(day, now, tr),
                messages: vec![message],
            }),
        }
    }
    groups
}

/// One row of the chat list
#[derive(Debug, Clone, PartialEq)]
pub struct ChatListEntry<'a> {
    pub conversation: &'a Conversation,
    pub when: String,
}

/// Filtered chat list with date labels
pub fn chat_list<'a, Tz: TimeZone>(
    conversations: &'a [Conversation],
    filter: &ChatFilter,
    now: &DateTime<Tz>,
    tr: &Translator,
) -> Vec<ChatListEntry<'a>> {
    filter_conversations(conversations, filter)
        .into_iter()
        .map(|conversation| ChatListEntry {
            conversation,
            when: chat_list_label(&conversation.timestamp, now, tr),
        })
        .collect()
}

/// Line under the contact name in a chat header
pub fn header_subtitle<Tz: TimeZone>(
    conversation: &Conversation,
    now: &DateTime<Tz>,
    tr: &Translator,
) -> String {
    if conversation.is_group {
        let count = conversation.participants.as_ref().map_or(0, Vec::len);
        return format!("{} {}", count, tr.t(TextKey::Participants));
    }
    match conversation.messages.last() {
        Some(last) => format!(
            "{} {}",
            tr.t(TextKey::LastSeenToday),
            format_time(&last.timestamp, now)
        ),
        None => chat_list_label(&conversation.timestamp, now, tr),
    }
}

const SENDER_COLORS: [&str; 10] = [
    "#3498db", "#e74c3c", "#9b59b6", "#f1c40f", "#1abc9c", "#e67e22", "#2ecc71", "#ff7f50",
    "#ff6b81", "#7bed9f",
];

/// Stable colour for a sender name in group chats
pub fn sender_color(name: &str) -> &'static str {
    let hash = name.encode_utf16().fold(0i32, |hash, unit| {
        i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    });
    SENDER_COLORS[hash.unsigned_abs() as usize % SENDER_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use chrono::{Duration, Utc};

    fn conv(id: &str, name: &str) -> Conversation {
        Conversation::new(id, name, "", Utc::now())
    }

    fn sample() -> Vec<Conversation> {
        let mut familia = conv("1", "Familia");
        familia.is_group = true;
        familia.unread = 2;
        let mut ana = conv("2", "Ana López");
        ana.is_favorite = true;
        let bruno = conv("3", "Bruno");
        vec![familia, ana, bruno]
    }

    fn ids(list: Vec<&Conversation>) -> Vec<&str> {
        list.into_iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_filter_by_name_ignores_case() {
        let list = sample();
        let filter = ChatFilter {
            query: "LÓP".to_string(),
            category: Category::All,
        };
        assert_eq!(ids(filter_conversations(&list, &filter)), vec!["2"]);
    }

    #[test]
    fn test_filter_categories() {
        let list = sample();
        let by = |category| ChatFilter {
            query: String::new(),
            category,
        };
        assert_eq!(ids(filter_conversations(&list, &by(Category::All))), vec!["1", "2", "3"]);
        assert_eq!(ids(filter_conversations(&list, &by(Category::Unread))), vec!["1"]);
        assert_eq!(ids(filter_conversations(&list, &by(Category::Groups))), vec!["1"]);
        assert_eq!(ids(filter_conversations(&list, &by(Category::Favorites))), vec!["2"]);
    }

    #[test]
    fn test_filter_combines_query_and_category() {
        let list = sample();
        let filter = ChatFilter {
            query: "bru".to_string(),
            category: Category::Favorites,
        };
        assert!(filter_conversations(&list, &filter).is_empty());
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("groups".parse::<Category>(), Ok(Category::Groups));
        assert!("archived".parse::<Category>().is_err());
    }

    #[test]
    fn test_search_skips_messages_without_text() {
        let now = Utc::now();
        let mut photo = Message::outgoing("Me", "", Some("data:image/png;base64,AA".into()), now);
        photo.id = "p".into();
        let mut gone = Message::outgoing("Me", "hola", None, now);
        gone.tombstone();
        let hello = Message::incoming("h", "Ana", "Hola a todos", now);
        let messages = vec![photo, gone, hello];

        let found = search_messages(&messages, "HOLA");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "h");

        assert!(!message_matches(&messages[0], ""));
        assert_eq!(search_messages(&messages, "").len(), 3);
    }

    #[test]
    fn test_highlight_segments() {
        let segments = highlight("Hola, hola!", "HOLA");
        assert_eq!(
            segments,
            vec![
                Segment { text: "Hola", matched: true },
                Segment { text: ", ", matched: false },
                Segment { text: "hola", matched: true },
                Segment { text: "!", matched: false },
            ]
        );
    }

    #[test]
    fn test_highlight_escapes_query() {
        let segments = highlight("costs $5 (approx)", "(approx)");
        assert_eq!(segments.last().unwrap(), &Segment { text: "(approx)", matched: true });
    }

    #[test]
    fn test_highlight_without_query() {
        assert_eq!(highlight("abc", ""), vec![Segment { text: "abc", matched: false }]);
    }

    #[test]
    fn test_group_by_day() {
        let tr = Translator::new(Language::En);
        let now = Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap();
        let messages = vec![
            Message::incoming("a", "Ana", "old", now - Duration::days(30)),
            Message::incoming("b", "Ana", "yesterday", now - Duration::days(1)),
            Message::incoming("c", "Ana", "morning", now - Duration::hours(3)),
            Message::incoming("d", "Ana", "noon", now),
        ];
        let refs: Vec<&Message> = messages.iter().collect();

        let groups = group_by_day(&refs, &now, &tr);
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["04/15/2024", "Yesterday", "Today"]);
        assert_eq!(groups[2].messages.len(), 2);
    }

    #[test]
    fn test_header_subtitle() {
        let tr = Translator::new(Language::En);
        let now = Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap();

        let mut group = conv("g", "Equipo");
        group.is_group = true;
        group.participants = Some(vec!["A".into(), "B".into(), "C".into()]);
        assert_eq!(header_subtitle(&group, &now, &tr), "3 participants");

        let mut direct = conv("d", "Ana");
        direct.messages.push(Message::incoming("m", "Ana", "hi", now - Duration::minutes(90)));
        assert_eq!(header_subtitle(&direct, &now, &tr), "last seen today at 10:30");
    }

    #[test]
    fn test_header_subtitle_without_messages() {
        let tr = Translator::new(Language::En);
        let now = Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap();

        let mut fresh = conv("n", "Bruno");
        fresh.timestamp = now - Duration::days(1);
        assert_eq!(header_subtitle(&fresh, &now, &tr), "Yesterday");

        fresh.timestamp = Utc.with_ymd_and_hms(2024, 5, 15, 9, 5, 0).unwrap();
        assert_eq!(header_subtitle(&fresh, &now, &tr), "09:05");
    }

    #[test]
    fn test_chat_list_labels() {
        let tr = Translator::new(Language::Es);
        let now = Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap();
        let mut list = sample();
        list[0].timestamp = now - Duration::days(1);
        list[1].timestamp = Utc.with_ymd_and_hms(2024, 5, 15, 8, 7, 0).unwrap();

        let entries = chat_list(&list, &ChatFilter::default(), &now, &tr);
        assert_eq!(entries[0].when, "Ayer");
        assert_eq!(entries[1].when, "08:07");
    }

    #[test]
    fn test_sender_color_is_stable() {
        assert_eq!(sender_color("Mamá"), sender_color("Mamá"));
        assert!(SENDER_COLORS.contains(&sender_color("")));
        assert!(SENDER_COLORS.contains(&sender_color("Julieta")));
    }
}
