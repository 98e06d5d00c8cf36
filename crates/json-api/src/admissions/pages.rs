//! Validate-link pages
//!
//! Minimal HTML for admins opening a guest's link on a phone at the door.

use guestgate_app::admissions::{EntryConfirmation, TokenLookup};

const STYLE: &str = "body{font-family:sans-serif;max-width:28rem;margin:2rem auto;padding:0 1rem}\
    .ok{color:#1b7f3b}.warn{color:#b26a00}.err{color:#b00020}\
    button{font-size:1.2rem;padding:.6rem 1.2rem}";

/// Admission details, with a confirm button while the guest has not entered.
pub(crate) fn lookup_page(lookup: &TokenLookup) -> String {
    let record = &lookup.record;

    let status = match record.entry {
        Some(entry) => format!(
            "<p class=\"warn\">Already entered at {at} ({by})</p>",
            at = entry.at,
            by = entry.by,
        ),
        None => "<p class=\"ok\">Not entered yet</p>\
                 <form method=\"post\"><button type=\"submit\">Confirm entry</button></form>"
            .to_string(),
    };

    layout(
        "Guest admission",
        &format!(
            "<h1>{name}</h1><p>Phone: {phone}</p><p>Tickets: {tickets}</p>\
             <p>Validated at: {validated_at}</p>{status}",
            name = escape_html(&record.name),
            phone = escape_html(&lookup.phone),
            tickets = record.ticket_count,
            validated_at = record.validated_at,
        ),
    )
}

/// Result of confirming entry from the link.
pub(crate) fn entered_page(confirmation: &EntryConfirmation) -> String {
    layout(
        "Entry confirmed",
        &format!(
            "<h1 class=\"ok\">Welcome, {name}</h1><p>Tickets: {tickets}</p>",
            name = escape_html(&confirmation.name),
            tickets = confirmation.ticket_count,
        ),
    )
}

/// Rejection page.
pub(crate) fn error_page(title: &str, message: &str) -> String {
    layout(
        title,
        &format!(
            "<h1 class=\"err\">{title}</h1><p>{message}</p>",
            title = escape_html(title),
            message = escape_html(message),
        ),
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{title}</title><style>{STYLE}</style></head><body>{body}</body></html>",
        title = escape_html(title),
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }

    escaped
}

#[cfg(test)]
mod tests {
    use guestgate::{
        ledger::{AdmissionRecord, Entry, EntryMethod},
        tokens::SecondaryToken,
    };
    use jiff::Timestamp;

    use super::*;

    fn lookup(entry: Option<Entry>) -> TokenLookup {
        TokenLookup {
            phone: "050****567".to_string(),
            record: AdmissionRecord {
                name: "<Dana & co>".to_string(),
                ticket_count: 2,
                validated_at: Timestamp::UNIX_EPOCH,
                request_origin: "10.0.0.1".to_string(),
                token: SecondaryToken::new("AB12CD"),
                newsletter_opt_in: false,
                entry,
            },
        }
    }

    #[test]
    fn names_are_escaped() {
        let page = lookup_page(&lookup(None));

        assert!(page.contains("&lt;Dana &amp; co&gt;"), "name should be escaped");
        assert!(!page.contains("<Dana"), "raw name must not appear");
    }

    #[test]
    fn confirm_form_only_before_entry() {
        assert!(lookup_page(&lookup(None)).contains("<form method=\"post\">"));

        let entered = lookup_page(&lookup(Some(Entry {
            at: Timestamp::UNIX_EPOCH,
            by: EntryMethod::DoorCode,
        })));

        assert!(!entered.contains("<form"), "entered guests get no form");
        assert!(entered.contains("Already entered"));
    }

    #[test]
    fn token_is_not_rendered() {
        assert!(!lookup_page(&lookup(None)).contains("AB12CD"));
    }
}
