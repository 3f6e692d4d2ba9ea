use crate::core::envelope::{status, ClientContext, OperationResult};
use crate::core::toolkit::{truncate_chars, RedditToolkit};
use crate::domain::params::{Choice, InboxFilter};
use crate::domain::ports::RedditClient;
use serde_json::{json, Value};

const PREVIEW_CHARS: usize = 100;

impl<C: RedditClient> RedditToolkit<C> {
    pub async fn send_private_message(
        &self,
        recipient: &str,
        subject: &str,
        message: &str,
    ) -> OperationResult {
        self.client
            .send_message(recipient, subject, message)
            .await
            .context("Failed to send message")?;
        Ok(status(format!("Message sent to {}.", recipient)))
    }

    /// Message to the moderators of a subreddit.
    pub async fn send_mod_mail(
        &self,
        subreddit: &str,
        subject: &str,
        message: &str,
    ) -> OperationResult {
        let to = format!("/r/{}", subreddit);
        self.client
            .send_message(&to, subject, message)
            .await
            .context("Failed to send modmail")?;
        Ok(status(format!(
            "Modmail sent successfully to moderators of r/{}.",
            subreddit
        )))
    }

    pub async fn get_unread_messages(&self, limit: u32) -> OperationResult {
        let items = self
            .client
            .inbox(InboxFilter::Unread, limit)
            .await
            .context("Failed to retrieve unread messages")?;
        let projected = items
            .iter()
            .map(|item| {
                let preview_source = item
                    .body
                    .as_deref()
                    .or(item.subject.as_deref())
                    .unwrap_or_default();
                json!({
                    "type": item.kind(),
                    "subject": item.subject.as_deref().unwrap_or("N/A"),
                    "author": item.author.as_deref().unwrap_or("Reddit"),
                    "is_new": true,
                    "text_preview": truncate_chars(preview_source, PREVIEW_CHARS),
                })
            })
            .collect();
        Ok(Value::Array(projected))
    }

    pub async fn get_my_notifications(&self, filter_type: &str, limit: u32) -> OperationResult {
        let filter = InboxFilter::parse_choice(filter_type)?;
        let items = self.client.inbox(filter, limit).await?;
        let projected = items
            .iter()
            .map(|item| {
                json!({
                    "id": item.id,
                    "author": item.author.as_deref().unwrap_or("N/A"),
                    "subject": item.subject.as_deref().unwrap_or("N/A"),
                    "body": item.body.as_deref().unwrap_or_default(),
                    "is_new": item.new.unwrap_or(false),
                    "created_utc": item.created_utc,
                })
            })
            .collect();
        Ok(Value::Array(projected))
    }

    pub async fn list_modmail_conversations(&self, subreddit: &str, limit: u32) -> OperationResult {
        let conversations = self.client.modmail_conversations(subreddit, limit).await?;
        let projected = conversations
            .iter()
            .map(|conv| {
                let participant = conv
                    .participant
                    .as_ref()
                    .and_then(|p| p.name.as_deref())
                    .unwrap_or("Unknown User");
                json!({
                    "conversation_id": conv.id,
                    "subject": conv.subject,
                    "last_updated": conv.last_updated,
                    "participant": participant,
                    "is_highlighted": conv.is_highlighted.unwrap_or(false),
                })
            })
            .collect();
        Ok(Value::Array(projected))
    }

    /// With `is_author_hidden` the reply is sent as the subreddit instead of the moderator.
    pub async fn reply_to_modmail_conversation(
        &self,
        conversation_id: &str,
        body: &str,
        is_author_hidden: bool,
    ) -> OperationResult {
        self.client
            .reply_modmail(conversation_id, body, is_author_hidden)
            .await?;
        Ok(status(format!(
            "Replied to modmail conversation '{}'.",
            conversation_id
        )))
    }
}
