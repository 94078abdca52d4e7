//! Mail drafts inviting attendees to a single event.

use chrono::TimeZone;

use crate::datetime::to_local;
use crate::event::Event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailDraft {
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl MailDraft {
    /// `mailto:` URL with every part percent-encoded
    pub fn to_mailto(&self) -> String {
        let recipients: Vec<String> = self
            .recipients
            .iter()
            .map(|r| urlencoding::encode(r).into_owned())
            .collect();

        format!(
            "mailto:{}?subject={}&body={}",
            recipients.join(","),
            urlencoding::encode(&self.subject),
            urlencoding::encode(&self.body)
        )
    }
}

/// Draft an invite for `event`, with its start shown in `tz`
pub fn compose_invite<Tz: TimeZone>(event: &Event, tz: &Tz) -> MailDraft {
    let local_start = to_local(event.start, tz);

    let mut body = format!(
        "{}\n\nWhen: {}\nDuration: {} minutes",
        event.title,
        local_start.format("%A, %B %-d, %Y at %H:%M"),
        event.duration
    );
    if let Some(desc) = event.description.as_deref().filter(|d| !d.is_empty()) {
        body.push_str("\n\n");
        body.push_str(desc);
    }

    MailDraft {
        recipients: event.attendees.clone(),
        subject: event.title.clone(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use chrono_tz::America::New_York;

    fn event() -> Event {
        Event {
            id: "e1".to_string(),
            title: "Sync & plan".to_string(),
            start: Utc.with_ymd_and_hms(2024, 3, 15, 14, 0, 0).unwrap(),
            duration: 30,
            description: Some("Bring notes".to_string()),
            attendees: vec!["alice@example.com".to_string(), "bob@example.com".to_string()],
        }
    }

    #[test]
    fn test_compose_invite_body_uses_local_time() {
        let draft = compose_invite(&event(), &New_York);

        assert_eq!(draft.recipients, vec!["alice@example.com", "bob@example.com"]);
        assert_eq!(draft.subject, "Sync & plan");
        assert_eq!(
            draft.body,
            "Sync & plan\n\nWhen: Friday, March 15, 2024 at 10:00\nDuration: 30 minutes\n\nBring notes"
        );
    }

    #[test]
    fn test_mailto_is_percent_encoded() {
        let mailto = compose_invite(&event(), &Utc).to_mailto();

        assert!(mailto.starts_with(
            "mailto:alice%40example.com,bob%40example.com?subject=Sync%20%26%20plan&body="
        ));
        assert!(!mailto.contains('\n'));
        assert!(mailto.contains("Duration%3A%2030%20minutes"));
    }

    #[test]
    fn test_no_attendees_gives_empty_recipients() {
        let mut e = event();
        e.attendees.clear();
        e.description = None;

        let draft = compose_invite(&e, &Utc);
        assert!(draft.recipients.is_empty());
        assert!(!draft.body.contains("Bring notes"));
        assert!(draft.to_mailto().starts_with("mailto:?subject="));
    }
}
