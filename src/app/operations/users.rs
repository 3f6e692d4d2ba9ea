use crate::core::envelope::{ClientContext, OperationError, OperationResult};
use crate::core::toolkit::{truncate_chars, RedditToolkit};
use crate::domain::model::{RelatedUser, Thing};
use crate::domain::params::{Choice, ItemType, VoteHistory};
use crate::domain::ports::RedditClient;
use chrono::{DateTime, Datelike, Months, Utc};
use serde_json::{json, Value};

const GILDED_PREVIEW_CHARS: usize = 150;

/// 日曆差：先算整月，再算剩餘天數（與 relativedelta 相同的做法）
pub fn calendar_age(from: DateTime<Utc>, to: DateTime<Utc>) -> (u32, u32, i64) {
    if to <= from {
        return (0, 0, 0);
    }
    let span = (i64::from(to.year()) - i64::from(from.year())) * 12 + i64::from(to.month0())
        - i64::from(from.month0());
    let mut months = span.max(0) as u32;
    let mut anchor = add_months(from, months);
    while months > 0 && anchor > to {
        months -= 1;
        anchor = add_months(from, months);
    }
    let days = (to - anchor).num_days();
    (months / 12, months % 12, days)
}

fn add_months(from: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    from.checked_add_months(Months::new(months)).unwrap_or(from)
}

fn related_users(users: &[RelatedUser]) -> Vec<Value> {
    users
        .iter()
        .map(|u| json!({ "username": u.name, "id": u.id }))
        .collect()
}

fn voted_items(items: &[Thing]) -> Value {
    let projected = items
        .iter()
        .filter_map(|item| match item {
            Thing::Submission(s) => Some(json!({
                "id": s.id,
                "subreddit": s.subreddit,
                "type": "Post",
                "title": s.title,
            })),
            Thing::Comment(c) => Some(json!({
                "id": c.id,
                "subreddit": c.subreddit,
                "type": "Comment",
                "body": c.body,
            })),
            Thing::Other { .. } => None,
        })
        .collect();
    Value::Array(projected)
}

impl<C: RedditClient> RedditToolkit<C> {
    pub async fn get_user_info(&self, username: &str) -> OperationResult {
        let user = self.client.redditor(username).await?;
        if user.name.is_empty() {
            return Err(OperationError::Failed(format!(
                "Could not retrieve info for user {}",
                username
            )));
        }
        let karma = user.link_karma.unwrap_or(0) + user.comment_karma.unwrap_or(0);
        Ok(json!({
            "name": user.name,
            "karma": karma,
            "created_utc": user.created_utc,
        }))
    }

    pub async fn get_user_comments(&self, username: &str, limit: u32) -> OperationResult {
        let comments = self
            .client
            .redditor_comments(username, limit)
            .await
            .with_context(|| format!("Failed to retrieve comments for {}", username))?;
        let projected = comments
            .iter()
            .map(|c| {
                json!({
                    "comment_id": c.id,
                    "subreddit": c.subreddit,
                    "body": c.body,
                    "score": c.score,
                    "created_utc": c.created_utc,
                })
            })
            .collect();
        Ok(Value::Array(projected))
    }

    pub async fn get_redditor_trophies(&self, username: &str) -> OperationResult {
        let trophies = self
            .client
            .redditor_trophies(username)
            .await
            .with_context(|| format!("Failed to retrieve trophies for {}", username))?;
        let projected = trophies
            .iter()
            .map(|t| {
                json!({
                    "name": t.name.as_deref().unwrap_or("N/A"),
                    "description": t.description.as_deref().unwrap_or("No description"),
                    "icon_url": t.icon_url,
                })
            })
            .collect();
        Ok(Value::Array(projected))
    }

    pub async fn get_user_gilded_content(&self, username: &str, limit: u32) -> OperationResult {
        let items = self.client.redditor_gilded(username, limit).await?;
        let projected = items
            .iter()
            .filter_map(|item| match item {
                Thing::Submission(s) => Some(json!({
                    "id": s.id,
                    "subreddit": s.subreddit,
                    "awards_count": s.total_awards_received,
                    "score": s.score,
                    "type": "Post",
                    "title": s.title,
                    "url": s.url,
                })),
                Thing::Comment(c) => Some(json!({
                    "id": c.id,
                    "subreddit": c.subreddit,
                    "awards_count": c.total_awards_received,
                    "score": c.score,
                    "type": "Comment",
                    "body_preview": format!(
                        "{}...",
                        truncate_chars(c.body.as_deref().unwrap_or_default(), GILDED_PREVIEW_CHARS)
                    ),
                    "link": format!(
                        "https://www.reddit.com{}",
                        c.permalink.as_deref().unwrap_or_default()
                    ),
                })),
                Thing::Other { .. } => None,
            })
            .collect();
        Ok(Value::Array(projected))
    }

    /// Followers are the subscribers of the user's profile subreddit.
    pub async fn get_user_follower_count(&self, username: &str) -> OperationResult {
        let user = self.client.redditor(username).await?;
        let followers = user.subreddit.as_ref().and_then(|p| p.subscribers);
        Ok(json!({
            "username": user.name,
            "follower_count": followers,
        }))
    }

    pub async fn get_reddit_age(&self, name: &str, item_type: &str) -> OperationResult {
        let kind = ItemType::parse_choice(item_type)?;
        let created_utc = match kind {
            ItemType::User => self.client.redditor(name).await?.created_utc,
            ItemType::Subreddit => self.client.subreddit_about(name).await?.created_utc,
        };
        let created = created_utc
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts.trunc() as i64, 0))
            .ok_or_else(|| {
                OperationError::Failed(format!("Creation date is unavailable for '{}'", name))
            })?;
        let (years, months, days) = calendar_age(created, Utc::now());

        Ok(json!({
            "name": name,
            "type": item_type,
            "creation_date": created.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            "age": format!("{} years, {} months, {} days", years, months, days),
        }))
    }

    pub async fn get_blocked_users(&self) -> OperationResult {
        let blocked = self
            .client
            .blocked_users()
            .await
            .context("Failed to retrieve blocked users")?;
        Ok(json!({
            "blocked_users": related_users(&blocked),
            "count": blocked.len(),
        }))
    }

    pub async fn list_user_friends(&self) -> OperationResult {
        let friends = self.client.friends().await?;
        Ok(Value::Array(related_users(&friends)))
    }

    pub async fn get_my_upvoted_content(&self, limit: u32) -> OperationResult {
        let me = self.client.me().await?;
        let items = self
            .client
            .vote_history(&me.name, VoteHistory::Upvoted, limit)
            .await?;
        Ok(voted_items(&items))
    }

    pub async fn get_my_downvoted_content(&self, limit: u32) -> OperationResult {
        let me = self.client.me().await?;
        let items = self
            .client
            .vote_history(&me.name, VoteHistory::Downvoted, limit)
            .await?;
        Ok(voted_items(&items))
    }

    pub async fn list_multireddits(&self) -> OperationResult {
        let multis = self
            .client
            .my_multireddits()
            .await
            .context("Failed to retrieve multireddits")?;
        let projected = multis
            .iter()
            .map(|m| {
                json!({
                    "name": m.display_name.as_deref().unwrap_or(&m.name),
                    "path": m.path,
                    "visibility": m.visibility,
                    "subreddits": m.subreddits,
                })
            })
            .collect();
        Ok(Value::Array(projected))
    }

    pub async fn get_moderated_subs(&self, limit: u32) -> OperationResult {
        let subs = self
            .client
            .moderated_subreddits(limit)
            .await
            .context("Failed to retrieve moderated subreddits")?;
        let projected = subs
            .iter()
            .map(|s| {
                json!({
                    "name": s.display_name,
                    "subscribers": s.subscribers,
                    "is_moderator": true,
                })
            })
            .collect();
        Ok(Value::Array(projected))
    }
}
