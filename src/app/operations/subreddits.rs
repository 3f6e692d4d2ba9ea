use crate::core::envelope::{status, ClientContext, OperationResult};
use crate::core::toolkit::RedditToolkit;
use crate::domain::model::SubredditInfo;
use crate::domain::ports::RedditClient;
use serde_json::{json, Value};

fn community(s: &SubredditInfo) -> Value {
    json!({
        "name": s.display_name,
        "subscribers": s.subscribers,
        "public_description": s.public_description,
    })
}

impl<C: RedditClient> RedditToolkit<C> {
    pub async fn get_subreddit_details(&self, subreddit: &str) -> OperationResult {
        let sub = self.client.subreddit_about(subreddit).await?;
        Ok(json!({
            "name": sub.display_name,
            "title": sub.title,
            "subscribers": sub.subscribers,
            "created_utc": sub.created_utc,
            "public_description": sub.public_description,
        }))
    }

    pub async fn get_subreddit_sidebar(&self, subreddit: &str) -> OperationResult {
        let sub = self
            .client
            .subreddit_about(subreddit)
            .await
            .with_context(|| {
                format!("Failed to retrieve sidebar content for r/{}", subreddit)
            })?;
        Ok(json!({
            "description_md": sub.description,
            "public_description": sub.public_description,
            "subscribers": sub.subscribers,
        }))
    }

    pub async fn get_subreddit_rules(&self, subreddit: &str) -> OperationResult {
        let rules = self
            .client
            .subreddit_rules(subreddit)
            .await
            .with_context(|| format!("Failed to retrieve rules for r/{}", subreddit))?;
        let projected = rules
            .iter()
            .map(|r| {
                json!({
                    "short_name": r.short_name,
                    "description": r.description,
                    "created_utc": r.created_utc,
                    "violation_reason": r.violation_reason,
                })
            })
            .collect();
        Ok(Value::Array(projected))
    }

    pub async fn get_link_flair(&self, subreddit: &str) -> OperationResult {
        let templates = self
            .client
            .link_flair_templates(subreddit)
            .await
            .with_context(|| format!("Failed to retrieve flairs for r/{}", subreddit))?;
        let projected = templates
            .iter()
            .map(|t| json!({ "flair_id": t.id, "flair_text": t.text }))
            .collect();
        Ok(Value::Array(projected))
    }

    pub async fn get_user_flair(&self, subreddit: &str, username: &str) -> OperationResult {
        let flair = self
            .client
            .user_flair(subreddit, username)
            .await
            .with_context(|| {
                format!(
                    "Failed to retrieve flair for {} in r/{}",
                    username, subreddit
                )
            })?;
        match flair {
            Some(flair) => Ok(json!({
                "username": flair.user,
                "flair_text": flair.flair_text,
                "flair_css_class": flair.flair_css_class,
            })),
            None => Ok(status(format!(
                "User '{}' has no flair set in this subreddit.",
                username
            ))),
        }
    }

    pub async fn get_moderators(&self, subreddit: &str) -> OperationResult {
        let moderators = self
            .client
            .moderators(subreddit)
            .await
            .with_context(|| format!("Failed to retrieve moderators for r/{}", subreddit))?;
        let names: Vec<&str> = moderators.iter().map(|m| m.name.as_str()).collect();
        Ok(json!({
            "moderators": names,
            "count": names.len(),
        }))
    }

    pub async fn search_subreddits(&self, query: &str, limit: u32) -> OperationResult {
        let subs = self
            .client
            .search_subreddits(query, limit)
            .await
            .context("Subreddit search failed")?;
        Ok(Value::Array(subs.iter().map(community).collect()))
    }

    pub async fn get_subreddits_by_topic(&self, topic: &str, limit: u32) -> OperationResult {
        let subs = self
            .client
            .search_subreddits(topic, limit)
            .await
            .context("Failed to search subreddits by topic")?;
        Ok(Value::Array(subs.iter().map(community).collect()))
    }

    /// Topic lookup returns names only, so each of the first `limit` is fetched in turn.
    pub async fn find_communities_by_topic(&self, topic: &str, limit: u32) -> OperationResult {
        let names = self.client.subreddits_by_topic(topic).await?;
        let mut communities = Vec::new();
        for name in names.iter().take(limit as usize) {
            let sub = self.client.subreddit_about(name).await?;
            communities.push(community(&sub));
        }
        Ok(Value::Array(communities))
    }

    pub async fn get_community_age_rating(&self, subreddit: &str) -> OperationResult {
        let sub = self.client.subreddit_about(subreddit).await?;
        let is_nsfw = sub.over18.unwrap_or(false);
        Ok(json!({
            "subreddit_name": sub.display_name,
            "is_nsfw": is_nsfw,
            "age_rating": if is_nsfw { "18 and Over (NSFW)" } else { "All Ages" },
        }))
    }
}
