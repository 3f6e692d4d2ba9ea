use crate::core::envelope::{status, ClientContext, OperationResult};
use crate::core::toolkit::{author_name, RedditToolkit};
use crate::domain::model::Submission;
use crate::domain::params::{Choice, ListingSort, ListingType, SearchSort, TimeFilter};
use crate::domain::ports::RedditClient;
use serde_json::{json, Value};

fn project(posts: &[Submission], f: impl Fn(&Submission) -> Value) -> Value {
    Value::Array(posts.iter().map(f).collect())
}

fn title_id_score_author(s: &Submission) -> Value {
    json!({
        "title": s.title,
        "id": s.id,
        "score": s.score,
        "author": author_name(&s.author),
    })
}

fn feed_entry(s: &Submission) -> Value {
    json!({
        "title": s.title,
        "id": s.id,
        "subreddit": s.subreddit,
        "score": s.score,
        "url": s.url,
        "author": author_name(&s.author),
    })
}

impl<C: RedditClient> RedditToolkit<C> {
    pub async fn get_hot_posts(&self, subreddit: &str, limit: u32) -> OperationResult {
        let posts = self
            .client
            .subreddit_listing(subreddit, ListingSort::Hot, limit)
            .await?;
        Ok(project(&posts, |s| {
            json!({
                "title": s.title,
                "url": s.url,
                "score": s.score,
                "author": author_name(&s.author),
            })
        }))
    }

    pub async fn retrieve_reddit_posts(&self, subreddit: &str, size: u32) -> OperationResult {
        let posts = self
            .client
            .subreddit_listing(subreddit, ListingSort::Hot, size)
            .await
            .with_context(|| format!("Failed to retrieve posts for r/{}", subreddit))?;
        Ok(project(&posts, |s| {
            json!({
                "title": s.title,
                "id": s.id,
                "url": s.url,
                "score": s.score,
                "author": author_name(&s.author),
            })
        }))
    }

    pub async fn get_new_submissions(&self, subreddit: &str, limit: u32) -> OperationResult {
        let posts = self
            .client
            .subreddit_listing(subreddit, ListingSort::New, limit)
            .await
            .context("Failed to retrieve new posts")?;
        Ok(project(&posts, |s| {
            json!({
                "title": s.title,
                "id": s.id,
                "url": s.url,
                "created_utc": s.created_utc,
                "author": author_name(&s.author),
            })
        }))
    }

    pub async fn get_top_posts(
        &self,
        subreddit: &str,
        time_filter: &str,
        limit: u32,
    ) -> OperationResult {
        let time_filter = TimeFilter::parse_choice(time_filter)?;
        let posts = self
            .client
            .subreddit_listing(subreddit, ListingSort::Top(time_filter), limit)
            .await
            .context("Failed to retrieve top posts")?;
        Ok(project(&posts, title_id_score_author))
    }

    pub async fn get_controversial_posts(
        &self,
        subreddit: &str,
        time_filter: &str,
        limit: u32,
    ) -> OperationResult {
        let time_filter = TimeFilter::parse_choice(time_filter)?;
        let posts = self
            .client
            .subreddit_listing(subreddit, ListingSort::Controversial(time_filter), limit)
            .await?;
        Ok(project(&posts, |s| {
            json!({
                "title": s.title,
                "id": s.id,
                "score": s.score,
                "num_comments": s.num_comments,
                "author": author_name(&s.author),
            })
        }))
    }

    pub async fn get_rising_posts(&self, subreddit: &str, limit: u32) -> OperationResult {
        let posts = self
            .client
            .subreddit_listing(subreddit, ListingSort::Rising, limit)
            .await?;
        Ok(project(&posts, |s| {
            json!({
                "title": s.title,
                "id": s.id,
                "score": s.score,
                "num_comments": s.num_comments,
                "author": author_name(&s.author),
            })
        }))
    }

    /// `time_filter` only matters for `top` and `controversial`, where it defaults to `day`.
    pub async fn get_subreddit_listings(
        &self,
        subreddit: &str,
        listing_type: &str,
        time_filter: Option<&str>,
        limit: u32,
    ) -> OperationResult {
        let listing = ListingType::parse_choice(listing_type)?;
        let time_filter = match time_filter {
            Some(value) => TimeFilter::parse_choice(value)?,
            None => TimeFilter::default(),
        };
        let sort = ListingSort::from_listing(listing, time_filter);
        let posts = self
            .client
            .subreddit_listing(subreddit, sort, limit)
            .await
            .with_context(|| {
                format!(
                    "Failed to retrieve {} posts for r/{}",
                    listing.as_str(),
                    subreddit
                )
            })?;
        Ok(project(&posts, title_id_score_author))
    }

    pub async fn get_trending_posts(&self, limit: u32) -> OperationResult {
        let posts = self
            .client
            .subreddit_listing("popular", ListingSort::Hot, limit)
            .await?;
        Ok(project(&posts, feed_entry))
    }

    pub async fn get_best_feed(&self, limit: u32) -> OperationResult {
        let posts = self.client.front_page_best(limit).await?;
        Ok(project(&posts, feed_entry))
    }

    /// Hot posts of one of the authenticated user's multireddits.
    pub async fn get_multireddit_posts(
        &self,
        multireddit_name: &str,
        limit: u32,
    ) -> OperationResult {
        let context = || {
            format!(
                "Failed to retrieve posts from multireddit '{}'",
                multireddit_name
            )
        };
        let me = self.client.me().await.with_context(context)?;
        let posts = self
            .client
            .multireddit_hot(&me.name, multireddit_name, limit)
            .await
            .with_context(context)?;
        Ok(project(&posts, |s| {
            json!({
                "title": s.title,
                "id": s.id,
                "subreddit": s.subreddit,
                "score": s.score,
            })
        }))
    }

    pub async fn get_random_post(&self, subreddit: &str) -> OperationResult {
        match self.client.random_submission(subreddit).await? {
            Some(s) => Ok(json!({
                "title": s.title,
                "id": s.id,
                "author": author_name(&s.author),
                "url": s.url,
                "score": s.score,
            })),
            None => Ok(status("Subreddit may not support random mode or is empty.")),
        }
    }

    /// Global search over r/all. `restrict_sr` is accepted for compatibility and ignored.
    pub async fn search_across_subreddits(
        &self,
        search_query: &str,
        limit: u32,
        restrict_sr: bool,
        sort: &str,
    ) -> OperationResult {
        let sort = SearchSort::parse_choice(sort)?;
        if restrict_sr {
            tracing::debug!("restrict_sr ignored, searching r/all");
        }
        let posts = self
            .client
            .search_submissions("all", search_query, sort, limit)
            .await
            .context("Failed to perform search")?;
        Ok(project(&posts, |s| {
            json!({
                "type": "post",
                "title": s.title,
                "id": s.id,
                "subreddit": s.subreddit,
                "score": s.score,
                "created_utc": s.created_utc,
            })
        }))
    }
}
