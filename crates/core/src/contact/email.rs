use serde::Serialize;

use super::validate::ValidatedContact;

/// A notification ready to hand to a mail provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingEmail {
    pub subject: String,
    pub text: String,
    pub html: String,
    /// Replies go to the person who filled in the form.
    pub reply_to: String,
}

pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// `$12.5k` from 1000 upwards (no decimal on whole thousands), `$N` below.
pub fn format_budget(budget: f64) -> String {
    if budget >= 1_000.0 {
        let thousands = budget / 1_000.0;
        if budget % 1_000.0 == 0.0 {
            format!("${thousands:.0}k")
        } else {
            format!("${thousands:.1}k")
        }
    } else {
        format!("${budget}")
    }
}

pub fn compose(contact: &ValidatedContact) -> OutgoingEmail {
    let budget = format_budget(contact.budget);

    let text = format!(
        concat!(
            "New contact form submission from the folio site:\n",
            "\n",
            "Name: {name}\n",
            "Email: {email}\n",
            "Budget: {budget}\n",
            "\n",
            "Message:\n",
            "{message}\n",
            "\n",
            "---\n",
            "Sent from the folio contact form",
        ),
        name = contact.name,
        email = contact.email,
        budget = budget,
        message = contact.message,
    );

    let html = format!(
        concat!(
            "<div style=\"font-family: monospace; max-width: 600px; margin: 0 auto;\">",
            "<h2>New Contact Request</h2>",
            "<p><strong>Name:</strong> {name}</p>",
            "<p><strong>Email:</strong> {email}</p>",
            "<p><strong>Budget:</strong> {budget}</p>",
            "<p><strong>Message:</strong></p>",
            "<p style=\"white-space: pre-wrap;\">{message}</p>",
            "<hr><p style=\"color: #666; font-size: 12px;\">Sent from the folio contact form</p>",
            "</div>"
        ),
        name = escape_html(&contact.name),
        email = escape_html(&contact.email),
        budget = escape_html(&budget),
        message = escape_html(&contact.message),
    );

    OutgoingEmail {
        subject: format!("New Contact Request from {}", contact.name),
        text,
        html,
        reply_to: contact.email.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str, message: &str, budget: f64) -> ValidatedContact {
        ValidatedContact {
            name: name.into(),
            email: "ann@example.com".into(),
            message: message.into(),
            budget,
        }
    }

    #[test]
    fn budget_formats() {
        assert_eq!(format_budget(500.0), "$500");
        assert_eq!(format_budget(0.0), "$0");
        assert_eq!(format_budget(1_000.0), "$1k");
        assert_eq!(format_budget(1_500.0), "$1.5k");
        assert_eq!(format_budget(50_000.0), "$50k");
        assert_eq!(format_budget(1_000_000.0), "$1000k");
    }

    #[test]
    fn html_is_escaped() {
        let email = compose(&contact("<b>Ann</b>", "a & b \"quoted\"", 5_000.0));
        assert!(email.html.contains("&lt;b&gt;Ann&lt;/b&gt;"));
        assert!(email.html.contains("a &amp; b &quot;quoted&quot;"));
        assert!(!email.html.contains("<b>Ann"));
    }

    #[test]
    fn subject_and_reply_to() {
        let email = compose(&contact("Ann", "Hello", 12_000.0));
        assert_eq!(email.subject, "New Contact Request from Ann");
        assert_eq!(email.reply_to, "ann@example.com");
        assert!(email.text.contains("Budget: $12k"));
        assert!(email.text.contains("Message:\nHello\n"));
    }

    #[test]
    fn text_body_layout() {
        let email = compose(&contact("Ann", "Line one\nLine two", 800.0));
        assert_eq!(
            email.text,
            "New contact form submission from the folio site:\n\n\
             Name: Ann\n\
             Email: ann@example.com\n\
             Budget: $800\n\n\
             Message:\n\
             Line one\nLine two\n\n\
             ---\n\
             Sent from the folio contact form"
        );
    }
}
