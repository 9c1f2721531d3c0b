//! Operator incident reporting.
//!
//! Unexpected failures are logged and, when an error channel is configured, posted to
//! Discord so operators see them without reading the process logs. Reports longer than
//! a Discord message are cut short and the full text is attached as `full_error.txt`.

use std::sync::Arc;

use serenity::{
    all::{ChannelId, CreateAttachment, CreateMessage},
    http::Http,
};

/// Discord's maximum message length in characters.
const MESSAGE_LIMIT: usize = 2000;

const ATTACHMENT_NAME: &str = "full_error.txt";

/// A rendered incident ready to be posted.
#[derive(Debug, PartialEq, Eq)]
pub struct IncidentReport {
    pub content: String,
    /// Full report text, present only when `content` was truncated.
    pub attachment: Option<String>,
}

impl IncidentReport {
    /// Renders an incident, truncating it to fit a single Discord message.
    ///
    /// # Arguments
    /// - `context` - Short description of what was being done
    /// - `detail` - Full error text
    pub fn compose(context: &str, detail: &str) -> Self {
        let full = format!("**{context}**\n```\n{detail}\n```");
        if full.chars().count() <= MESSAGE_LIMIT {
            return Self {
                content: full,
                attachment: None,
            };
        }

        let suffix = "\n```\n(truncated, see attachment)";
        let header = format!("**{context}**\n```\n");
        let budget = MESSAGE_LIMIT
            .saturating_sub(header.chars().count())
            .saturating_sub(suffix.chars().count());
        let truncated: String = detail.chars().take(budget).collect();

        let mut content: String = format!("{header}{truncated}{suffix}");
        if content.chars().count() > MESSAGE_LIMIT {
            // Only reachable with a context longer than the limit itself.
            content = content.chars().take(MESSAGE_LIMIT).collect();
        }

        Self {
            content,
            attachment: Some(format!("{context}\n\n{detail}")),
        }
    }
}

/// Reports incidents to the log and the operator channel.
#[derive(Clone)]
pub struct IncidentReporter {
    http: Option<Arc<Http>>,
    channel_id: Option<ChannelId>,
}

impl IncidentReporter {
    /// Creates a reporter posting to `channel_id` when set.
    pub fn new(http: Arc<Http>, channel_id: Option<u64>) -> Self {
        Self {
            http: Some(http),
            channel_id: channel_id.map(ChannelId::new),
        }
    }

    /// Creates a reporter that only logs.
    pub fn log_only() -> Self {
        Self {
            http: None,
            channel_id: None,
        }
    }

    /// Logs an incident and posts it to the operator channel if one is configured.
    ///
    /// Never fails; a report that cannot be delivered is logged instead.
    pub async fn report(&self, context: &str, detail: &str) {
        tracing::error!("{context}: {detail}");

        let (Some(http), Some(channel_id)) = (&self.http, self.channel_id) else {
            return;
        };

        let report = IncidentReport::compose(context, detail);
        let mut message = CreateMessage::new().content(report.content);
        if let Some(full) = report.attachment {
            message = message.add_file(CreateAttachment::bytes(full.into_bytes(), ATTACHMENT_NAME));
        }

        if let Err(e) = channel_id.send_message(http, message).await {
            tracing::error!("Failed to post incident report to channel {}: {}", channel_id, e);
        }
    }
}
