use crate::core::envelope::{status, OperationError, OperationResult};
use crate::core::toolkit::{fullname_of, post_or_comment_or, RedditToolkit};
use crate::domain::fullname::ThingKind;
use crate::domain::params::StickySlot;
use crate::domain::ports::RedditClient;
use serde_json::{json, Value};

// 以下操作大多需要版主權限，權限不足時由平台回傳錯誤

impl<C: RedditClient> RedditToolkit<C> {
    pub async fn get_subreddit_traffic_stats(&self, subreddit: &str) -> OperationResult {
        let traffic = self.client.subreddit_traffic(subreddit).await?;
        Ok(json!({
            "daily_stats": traffic.day,
            "monthly_stats": traffic.month,
            "hourly_stats": traffic.hour,
        }))
    }

    pub async fn create_post_collection(
        &self,
        subreddit: &str,
        title: &str,
        description: &str,
    ) -> OperationResult {
        let collection = self
            .client
            .create_collection(subreddit, title, description)
            .await?;
        Ok(json!({
            "status": "Collection created successfully.",
            "collection_id": collection.collection_id,
            "permalink": collection.permalink,
        }))
    }

    pub async fn add_post_to_collection(
        &self,
        collection_id: &str,
        post_id: &str,
    ) -> OperationResult {
        let post = fullname_of("post_id", post_id, ThingKind::Submission)?;
        self.client
            .add_post_to_collection(collection_id, &post)
            .await?;
        Ok(status(format!(
            "Post '{}' added to collection '{}'.",
            post_id, collection_id
        )))
    }

    /// `slot` 1 pins to the top, 2 to the second position.
    pub async fn sticky_post(&self, post_id: &str, state: bool, slot: i64) -> OperationResult {
        let Some(slot) = StickySlot::from_i64(slot) else {
            return Err(OperationError::invalid_argument(
                "slot",
                format!("Invalid slot '{}'. Must be 1 or 2.", slot),
            ));
        };
        let post = fullname_of("post_id", post_id, ThingKind::Submission)?;
        self.client
            .set_sticky(&post, state, slot == StickySlot::Bottom)
            .await?;
        let action = if state { "Stickied" } else { "Un-stickied" };
        Ok(status(format!(
            "Post '{}' has been {} in slot {}.",
            post_id,
            action,
            slot.number()
        )))
    }

    pub async fn add_wiki_editor(&self, subreddit: &str, username: &str) -> OperationResult {
        self.client.add_wiki_contributor(subreddit, username).await?;
        Ok(status(format!(
            "User '{}' can now edit the wiki for r/{}.",
            username, subreddit
        )))
    }

    pub async fn list_approved_submitters(&self, subreddit: &str) -> OperationResult {
        let contributors = self.client.approved_submitters(subreddit).await?;
        let projected = contributors
            .iter()
            .map(|c| json!({ "username": c.name, "date": c.date }))
            .collect();
        Ok(Value::Array(projected))
    }

    pub async fn list_wiki_pages(&self, subreddit: &str) -> OperationResult {
        let pages = self.client.wiki_pages(subreddit).await?;
        Ok(json!(pages))
    }

    pub async fn get_moderation_log(&self, subreddit: &str, limit: u32) -> OperationResult {
        let actions = self.client.mod_log(subreddit, limit).await?;
        let projected = actions
            .iter()
            .map(|a| {
                json!({
                    "action": a.action,
                    "target_author": a.target_author,
                    "target_fullname": a.target_fullname,
                    "description": a.description,
                    "moderator": a.moderator,
                    "created_utc": a.created_utc,
                })
            })
            .collect();
        Ok(Value::Array(projected))
    }

    pub async fn list_muted_users(&self, subreddit: &str) -> OperationResult {
        let muted = self.client.muted_users(subreddit).await?;
        let projected = muted
            .iter()
            .map(|u| json!({ "username": u.name, "date": u.date, "id": u.id }))
            .collect();
        Ok(Value::Array(projected))
    }

    /// `t3_` ids are posts; `t1_` and bare ids are comments.
    pub async fn ignore_reports_on_content(&self, content_id: &str) -> OperationResult {
        let thing = post_or_comment_or("content_id", content_id, ThingKind::Comment)?;
        self.client.ignore_reports(&thing).await?;
        Ok(status(format!(
            "Reports have been ignored for content '{}'.",
            content_id
        )))
    }

    pub async fn delete_flair_template(
        &self,
        subreddit: &str,
        flair_template_id: &str,
    ) -> OperationResult {
        self.client
            .delete_flair_template(subreddit, flair_template_id)
            .await?;
        Ok(status(format!(
            "Flair template '{}' has been deleted.",
            flair_template_id
        )))
    }

    /// A rule that does not exist is a failure: there is nothing to update.
    pub async fn update_subreddit_rule(
        &self,
        subreddit: &str,
        short_name: &str,
        new_description: Option<&str>,
    ) -> OperationResult {
        let rules = self.client.subreddit_rules(subreddit).await?;
        let Some(rule) = rules.iter().find(|r| r.short_name == short_name) else {
            return Err(OperationError::Failed(format!(
                "Rule with short_name '{}' not found.",
                short_name
            )));
        };
        self.client
            .update_rule(subreddit, rule, new_description)
            .await?;
        Ok(status(format!(
            "Rule '{}' in r/{} has been updated.",
            short_name, subreddit
        )))
    }
}
