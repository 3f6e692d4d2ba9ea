use crate::core::envelope::{status, ClientContext, OperationError, OperationResult};
use crate::core::toolkit::{
    author_name, fullname_of, live_author, post_or_comment, post_or_comment_or, RedditToolkit,
};
use crate::domain::fullname::ThingKind;
use crate::domain::model::{Comment, Thing};
use crate::domain::params::{AnswerStrategy, Choice, PostKind, VoteDirection};
use crate::domain::ports::{NewPost, PostBody, RedditClient};
use serde_json::{json, Value};

/// 空字串視同未提供
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl<C: RedditClient> RedditToolkit<C> {
    /// Submits a self post (`kind='self'`, needs `text`) or a link post (`kind='link'`, needs
    /// `url`).
    pub async fn create_reddit_post(
        &self,
        subreddit: &str,
        title: &str,
        kind: &str,
        text: Option<&str>,
        url: Option<&str>,
        flair_id: Option<&str>,
    ) -> OperationResult {
        let body = match PostKind::parse_choice(kind)? {
            PostKind::SelfPost => match non_empty(text) {
                Some(text) => PostBody::SelfText(text.to_string()),
                None => {
                    return Err(OperationError::invalid_argument(
                        "text",
                        "For 'self' posts, the 'text' parameter is required.",
                    ))
                }
            },
            PostKind::Link => match non_empty(url) {
                Some(url) => PostBody::Link(url.to_string()),
                None => {
                    return Err(OperationError::invalid_argument(
                        "url",
                        "For 'link' posts, the 'url' parameter is required.",
                    ))
                }
            },
        };
        let post = NewPost {
            title: title.to_string(),
            body,
            flair_id: non_empty(flair_id).map(str::to_string),
        };

        let submission = self.client.submit(subreddit, &post).await?;
        Ok(json!({
            "post_id": submission.id,
            "full_url": submission.url,
        }))
    }

    pub async fn delete_reddit_comment(&self, id: &str) -> OperationResult {
        let comment = fullname_of("id", id, ThingKind::Comment)?;
        self.client
            .delete(&comment)
            .await
            .context("Failed to delete comment")?;
        Ok(status(format!(
            "Comment with ID '{}' was successfully deleted.",
            id
        )))
    }

    pub async fn delete_reddit_post(&self, id: &str) -> OperationResult {
        let post = fullname_of("id", id, ThingKind::Submission)?;
        self.client
            .delete(&post)
            .await
            .context("Failed to delete post")?;
        Ok(status(format!("Post with ID '{}' was successfully deleted.", id)))
    }

    /// Replaces the body of the caller's own comment (`t1_`) or self post (`t3_`).
    pub async fn edit_reddit_content(&self, thing_id: &str, text: &str) -> OperationResult {
        let thing = post_or_comment("thing_id", thing_id)?;
        self.client
            .edit(&thing, text)
            .await
            .context("Failed to edit content")?;
        Ok(status(format!(
            "Content ID '{}' was successfully updated.",
            thing_id
        )))
    }

    pub async fn post_reddit_comment(&self, thing_id: &str, text: &str) -> OperationResult {
        let parent = post_or_comment("thing_id", thing_id)?;
        let comment = self
            .client
            .reply(&parent, text)
            .await
            .context("Failed to post comment")?;
        Ok(json!({
            "comment_id": comment.id,
            "fullname": comment.name,
            "permalink": comment.permalink,
        }))
    }

    /// Every comment of a post, breadth first, after expanding all "load more" stubs.
    pub async fn retrieve_post_comments(&self, article: &str) -> OperationResult {
        let post = fullname_of("article", article, ThingKind::Submission)?;
        let forest = self
            .client
            .comment_forest(&post)
            .await
            .with_context(|| {
                format!("Failed to retrieve comments for article ID '{}'", article)
            })?;
        let comments: Vec<Value> = forest
            .breadth_first()
            .into_iter()
            .map(|c| {
                json!({
                    "comment_id": c.id,
                    "author": author_name(&c.author),
                    "body": c.body,
                    "score": c.score,
                    "permalink": c.permalink,
                })
            })
            .collect();
        Ok(Value::Array(comments))
    }

    pub async fn retrieve_specific_content(&self, id: &str) -> OperationResult {
        let thing = self
            .client
            .info(id)
            .await
            .context("Failed to retrieve content")?;
        let Some(thing) = thing else {
            return Ok(status(format!("Content not found for ID: {}.", id)));
        };

        let data = match &thing {
            Thing::Submission(s) => json!({
                "id": s.id,
                "fullname": s.name,
                "object_type": "t3",
                "score": s.score,
                "author": author_name(&s.author),
                "created_utc": s.created_utc,
                "title": s.title,
                "text_body": s.selftext,
            }),
            Thing::Comment(c) => json!({
                "id": c.id,
                "fullname": c.name,
                "object_type": "t1",
                "score": c.score,
                "author": author_name(&c.author),
                "created_utc": c.created_utc,
                "body": c.body,
            }),
            Thing::Other { kind, data } => {
                let id = data.get("id").and_then(Value::as_str).unwrap_or_default();
                json!({
                    "id": id,
                    "fullname": data
                        .get("name")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("{}_{}", kind, id)),
                    "object_type": kind,
                    "score": data.get("score").cloned().unwrap_or(Value::Null),
                    "author": data
                        .get("author")
                        .and_then(Value::as_str)
                        .unwrap_or("Unknown"),
                    "created_utc": data.get("created_utc").cloned().unwrap_or(Value::Null),
                })
            }
        };
        Ok(data)
    }

    pub async fn get_submission_details(&self, submission_id: &str) -> OperationResult {
        let post = fullname_of("submission_id", submission_id, ThingKind::Submission)?;
        let s = self
            .client
            .submission(&post)
            .await
            .context("Submission lookup failed")?;
        Ok(json!({
            "title": s.title,
            "subreddit": s.subreddit,
            "upvote_ratio": s.upvote_ratio,
            "num_comments": s.num_comments,
            "is_self": s.is_self,
        }))
    }

    /// `direction`: 1 upvote, -1 downvote, 0 clear. `t1_` targets a comment, `t3_` or a bare id
    /// a post.
    pub async fn vote_on_content(&self, fullname: &str, direction: i64) -> OperationResult {
        let Some(vote) = VoteDirection::from_i64(direction) else {
            return Err(OperationError::invalid_argument(
                "direction",
                format!("Invalid direction '{}'. Must be 1, -1, or 0.", direction),
            ));
        };
        let thing = post_or_comment_or("fullname", fullname, ThingKind::Submission)?;
        self.client
            .vote(&thing, vote)
            .await
            .context("Voting failed")?;
        Ok(status(format!(
            "Vote of {} cast on {}.",
            vote.as_i64(),
            fullname
        )))
    }

    /// Without a `title` the crosspost reuses the original post's title.
    pub async fn crosspost_submission(
        &self,
        post_id: &str,
        subreddit: &str,
        title: Option<&str>,
    ) -> OperationResult {
        let source = fullname_of("post_id", post_id, ThingKind::Submission)?;
        let title = match non_empty(title) {
            Some(title) => title.to_string(),
            None => self.client.submission(&source).await?.title,
        };
        let crosspost = self.client.crosspost(&source, subreddit, &title).await?;
        Ok(json!({
            "status": "Post crossposted successfully.",
            "new_post_id": crosspost.id,
            "new_post_url": crosspost.permalink.or(crosspost.url),
        }))
    }

    /// Picks one comment by strategy; "no match" is a successful status, not a failure.
    pub async fn find_best_answer_in_post(
        &self,
        post_id: &str,
        strategy: &str,
    ) -> OperationResult {
        let strategy = AnswerStrategy::parse_choice(strategy)?;
        let post = fullname_of("post_id", post_id, ThingKind::Submission)?;
        let forest = self.client.comment_forest(&post).await?;
        let op = live_author(&forest.submission.author);

        let found: Option<&Comment> = match strategy {
            AnswerStrategy::TopVoted => forest.top_level().into_iter().next(),
            AnswerStrategy::OpReply => forest
                .breadth_first()
                .into_iter()
                .find(|c| op.is_some() && live_author(&c.author) == op),
            AnswerStrategy::ModReply => forest
                .breadth_first()
                .into_iter()
                .find(|c| c.is_moderator_distinguished()),
        };

        match found {
            Some(c) => Ok(json!({
                "strategy_used": strategy.as_str(),
                "comment_id": c.id,
                "author": author_name(&c.author),
                "body": c.body,
                "score": c.score,
                "is_op": op.is_some() && live_author(&c.author) == op,
                "is_mod": c.is_moderator_distinguished(),
            })),
            None => Ok(status(format!(
                "No answer found using strategy '{}'.",
                strategy.as_str()
            ))),
        }
    }
}
