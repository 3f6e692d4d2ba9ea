//! [`RedditClient`] over Reddit's OAuth JSON API.
//!
//! Authentication uses the refresh-token grant; the bearer token is cached until shortly
//! before it expires and dropped on a 401 so the next call refreshes it.

use crate::domain::fullname::{Fullname, ThingKind};
use crate::domain::model::{
    Collection, Comment, CommentForest, FlairTemplate, InboxItem, ModAction, ModmailConversation,
    Multireddit, Redditor, RelatedUser, Submission, SubredditInfo, SubredditRule, Thing,
    TrafficStats, Trophy, UserFlair,
};
use crate::domain::params::{
    Choice, InboxFilter, ListingSort, SearchSort, VoteDirection, VoteHistory,
};
use crate::domain::ports::{NewPost, PostBody, RedditClient};
use crate::utils::error::{RedditError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub const DEFAULT_API_BASE_URL: &str = "https://oauth.reddit.com";
pub const DEFAULT_AUTH_BASE_URL: &str = "https://www.reddit.com";

/// 單頁上限由平台決定
const PAGE_SIZE: usize = 100;
const MORE_CHILDREN_BATCH: usize = 100;
/// Refresh this long before the platform-reported expiry.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("refresh_token", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct RedditApiConfig {
    pub api_base_url: String,
    pub auth_base_url: String,
    pub credentials: Credentials,
    pub user_agent: String,
    pub timeout_seconds: u64,
}

struct AccessToken {
    value: String,
    expires_at: Instant,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
    error: Option<String>,
}

pub struct RedditHttpClient {
    http: Client,
    config: RedditApiConfig,
    token: Mutex<Option<AccessToken>>,
}

impl RedditHttpClient {
    pub fn new(config: RedditApiConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            config,
            token: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &RedditApiConfig {
        &self.config
    }

    async fn access_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.value.clone());
            }
        }

        info!("🔑 Refreshing Reddit access token");
        let url = format!(
            "{}/api/v1/access_token",
            self.config.auth_base_url.trim_end_matches('/')
        );
        let credentials = &self.config.credentials;
        let response = self
            .http
            .post(url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", credentials.refresh_token.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RedditError::Auth {
                message: format!("token endpoint returned {}", status),
            });
        }

        let body: TokenResponse = response.json().await?;
        let Some(value) = body.access_token else {
            return Err(RedditError::Auth {
                message: body
                    .error
                    .unwrap_or_else(|| "no access_token in token response".to_string()),
            });
        };
        let lifetime = Duration::from_secs(body.expires_in.unwrap_or(3600));
        *cached = Some(AccessToken {
            value: value.clone(),
            expires_at: Instant::now() + lifetime.saturating_sub(TOKEN_EXPIRY_MARGIN),
        });
        Ok(value)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url.trim_end_matches('/'), path)
    }

    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Value> {
        let token = self.access_token().await?;
        let response = request
            .bearer_auth(token)
            .query(&[("raw_json", "1")])
            .send()
            .await?;

        let status = response.status();
        debug!("{} -> {}", path, status);
        match status {
            StatusCode::UNAUTHORIZED => {
                *self.token.lock().await = None;
                return Err(RedditError::Auth {
                    message: format!("access token rejected for {}", path),
                });
            }
            StatusCode::NOT_FOUND => {
                return Err(RedditError::NotFound {
                    what: path.to_string(),
                })
            }
            s if !s.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(RedditError::Api {
                    status: s.as_u16(),
                    message: api_error_message(s, &body),
                });
            }
            _ => {}
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        debug!("GET {}", path);
        let request = self.http.get(self.endpoint(path)).query(query);
        self.send(request, path).await
    }

    /// Form POST with `api_type=json`; a non-empty `json.errors` is a [`RedditError::Rejected`].
    async fn post_form(&self, path: &str, form: &[(&str, String)]) -> Result<Value> {
        debug!("POST {}", path);
        let mut fields = form.to_vec();
        fields.push(("api_type", "json".to_string()));
        let request = self.http.post(self.endpoint(path)).form(&fields);
        let value = self.send(request, path).await?;
        check_json_errors(&value)?;
        Ok(value)
    }

    /// Follows `after` cursors until `limit` children are collected or the listing ends.
    async fn listing(
        &self,
        path: &str,
        params: &[(&str, String)],
        limit: u32,
    ) -> Result<Vec<Value>> {
        let limit = limit as usize;
        let mut children = Vec::new();
        let mut after: Option<String> = None;

        while children.len() < limit {
            let mut query = params.to_vec();
            query.push(("limit", (limit - children.len()).min(PAGE_SIZE).to_string()));
            if let Some(cursor) = &after {
                query.push(("after", cursor.clone()));
            }

            let page = self.get_json(path, &query).await?;
            let batch = page["data"]["children"]
                .as_array()
                .cloned()
                .unwrap_or_default();
            let received = batch.len();
            children.extend(batch);

            after = page["data"]["after"].as_str().map(str::to_string);
            if received == 0 || after.is_none() {
                break;
            }
        }

        children.truncate(limit);
        Ok(children)
    }

    async fn submissions(
        &self,
        path: &str,
        params: &[(&str, String)],
        limit: u32,
    ) -> Result<Vec<Submission>> {
        self.listing(path, params, limit).await?.iter().map(child_data).collect()
    }

    async fn things(&self, path: &str, limit: u32) -> Result<Vec<Thing>> {
        self.listing(path, &[], limit).await?.iter().map(to_thing).collect()
    }

    async fn first_thing(&self, fullname: &str) -> Result<Option<Thing>> {
        let value = self
            .get_json("/api/info", &[("id", fullname.to_string())])
            .await?;
        value["data"]["children"]
            .as_array()
            .and_then(|children| children.first())
            .map(to_thing)
            .transpose()
    }
}

fn api_error_message(status: StatusCode, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|v| v["message"].as_str().or_else(|| v["reason"].as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string())
}

fn check_json_errors(value: &Value) -> Result<()> {
    let Some(errors) = value["json"]["errors"].as_array() else {
        return Ok(());
    };
    if errors.is_empty() {
        return Ok(());
    }
    // 每筆錯誤為 [代碼, 訊息, 欄位]
    let message = errors
        .iter()
        .map(|e| {
            let parts: Vec<&str> = e
                .as_array()
                .map(|parts| parts.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();
            match parts.as_slice() {
                [code, text, ..] => format!("{}: {}", code, text),
                [code] => code.to_string(),
                _ => e.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("; ");
    Err(RedditError::Rejected { message })
}

fn from_data<T: DeserializeOwned>(value: &Value) -> Result<T> {
    Ok(serde_json::from_value(value.clone())?)
}

fn child_data<T: DeserializeOwned>(child: &Value) -> Result<T> {
    from_data(&child["data"])
}

fn to_thing(child: &Value) -> Result<Thing> {
    let kind = child["kind"].as_str().unwrap_or_default();
    Ok(match kind {
        "t3" => Thing::Submission(child_data(child)?),
        "t1" => Thing::Comment(child_data(child)?),
        other => Thing::Other {
            kind: other.to_string(),
            data: child["data"].clone(),
        },
    })
}

/// UserList payloads come either bare or wrapped in a one- or two-element array.
fn user_list(value: &Value) -> Result<Vec<RelatedUser>> {
    let list = match value {
        Value::Array(items) => items.first().unwrap_or(&Value::Null),
        other => other,
    };
    list["data"]["children"]
        .as_array()
        .map(|children| children.iter().map(from_data).collect())
        .unwrap_or_else(|| Ok(Vec::new()))
}

fn string_field(value: &Value, key: &str) -> String {
    value[key].as_str().unwrap_or_default().to_string()
}

/// 展開留言樹時的累積狀態
///
/// Comments are kept in platform order and deduplicated by fullname, since a
/// "continue this thread" page lists its parent comment again.
#[derive(Default)]
struct CommentWalk {
    comments: Vec<Comment>,
    seen: HashSet<String>,
    /// ids behind "load more comments" stubs, for `/api/morechildren`
    more: Vec<String>,
    /// parent fullnames of "continue this thread" stubs
    threads: Vec<String>,
}

impl CommentWalk {
    fn visit(&mut self, children: &Value) -> Result<()> {
        for child in children.as_array().into_iter().flatten() {
            match child["kind"].as_str() {
                Some("t1") => {
                    let comment: Comment = child_data(child)?;
                    if self.seen.insert(comment.name.clone()) {
                        self.comments.push(comment);
                    }
                    let replies = &child["data"]["replies"];
                    if replies.is_object() {
                        self.visit(&replies["data"]["children"])?;
                    }
                }
                Some("more") => {
                    let data = &child["data"];
                    let ids: Vec<String> = data["children"]
                        .as_array()
                        .into_iter()
                        .flatten()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect();
                    if !ids.is_empty() {
                        self.more.extend(ids);
                    } else if let Some(parent) = data["parent_id"].as_str() {
                        // 空的 more：「繼續此討論串」，要另外抓該留言的頁面
                        self.threads.push(parent.to_string());
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMultireddit {
    name: String,
    display_name: Option<String>,
    path: Option<String>,
    visibility: Option<String>,
    subreddits: Vec<RawMultiSubreddit>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMultiSubreddit {
    name: String,
}

fn inbox_path(filter: InboxFilter) -> &'static str {
    match filter {
        InboxFilter::All => "/message/inbox",
        InboxFilter::Unread => "/message/unread",
        InboxFilter::CommentReplies => "/message/comments",
        InboxFilter::PostReplies => "/message/selfreply",
        InboxFilter::Mentions => "/message/mentions",
        InboxFilter::Messages => "/message/messages",
    }
}

#[async_trait]
impl RedditClient for RedditHttpClient {
    async fn subreddit_listing(
        &self,
        subreddit: &str,
        sort: ListingSort,
        limit: u32,
    ) -> Result<Vec<Submission>> {
        let path = format!("/r/{}/{}", subreddit, sort.path_segment());
        let params: Vec<(&str, String)> = sort
            .time_filter()
            .map(|t| vec![("t", t.as_str().to_string())])
            .unwrap_or_default();
        self.submissions(&path, &params, limit).await
    }

    async fn front_page_best(&self, limit: u32) -> Result<Vec<Submission>> {
        self.submissions("/best", &[], limit).await
    }

    async fn multireddit_hot(
        &self,
        owner: &str,
        name: &str,
        limit: u32,
    ) -> Result<Vec<Submission>> {
        let path = format!("/user/{}/m/{}/hot", owner, name);
        self.submissions(&path, &[], limit).await
    }

    async fn random_submission(&self, subreddit: &str) -> Result<Option<Submission>> {
        let value = match self.get_json(&format!("/r/{}/random", subreddit), &[]).await {
            Ok(value) => value,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };
        // 重新導向到貼文頁時回傳 [貼文, 留言] 兩個 listing
        let listing = match &value {
            Value::Array(listings) => listings.first().unwrap_or(&Value::Null),
            other => other,
        };
        listing["data"]["children"]
            .as_array()
            .and_then(|children| children.iter().find(|c| c["kind"] == "t3"))
            .map(child_data::<Submission>)
            .transpose()
    }

    async fn search_submissions(
        &self,
        subreddit: &str,
        query: &str,
        sort: SearchSort,
        limit: u32,
    ) -> Result<Vec<Submission>> {
        let path = format!("/r/{}/search", subreddit);
        let params = [
            ("q", query.to_string()),
            ("sort", sort.as_str().to_string()),
            ("syntax", "lucene".to_string()),
            ("type", "link".to_string()),
        ];
        self.submissions(&path, &params, limit).await
    }

    async fn submission(&self, id: &Fullname) -> Result<Submission> {
        match self.first_thing(&id.to_string()).await? {
            Some(Thing::Submission(submission)) => Ok(submission),
            _ => Err(RedditError::NotFound {
                what: format!("Submission {}", id),
            }),
        }
    }

    async fn comment_forest(&self, id: &Fullname) -> Result<CommentForest> {
        let value = self
            .get_json(&format!("/comments/{}", id.id()), &[("limit", "500".to_string())])
            .await?;
        let listings = value.as_array().ok_or_else(|| RedditError::UnexpectedResponse {
            message: "comment page is not a pair of listings".to_string(),
        })?;
        let post = listings
            .first()
            .and_then(|l| l["data"]["children"].get(0))
            .ok_or_else(|| RedditError::NotFound {
                what: format!("Submission {}", id),
            })?;
        let submission: Submission = child_data(post)?;

        let mut walk = CommentWalk::default();
        if let Some(tree) = listings.get(1) {
            walk.visit(&tree["data"]["children"])?;
        }

        let link_id = id.to_string();
        let mut requested: HashSet<String> = HashSet::new();
        loop {
            if !walk.more.is_empty() {
                let batch: Vec<String> = walk
                    .more
                    .drain(..walk.more.len().min(MORE_CHILDREN_BATCH))
                    .filter(|c| requested.insert(c.clone()))
                    .collect();
                if batch.is_empty() {
                    continue;
                }
                debug!("Expanding {} more comments of {}", batch.len(), link_id);
                let value = self
                    .get_json(
                        "/api/morechildren",
                        &[
                            ("link_id", link_id.clone()),
                            ("children", batch.join(",")),
                            ("api_type", "json".to_string()),
                        ],
                    )
                    .await?;
                walk.visit(&value["json"]["data"]["things"])?;
            } else if let Some(parent) = walk.threads.pop() {
                if !requested.insert(parent.clone()) {
                    continue;
                }
                let comment_id = parent.strip_prefix("t1_").unwrap_or(parent.as_str());
                debug!("Following thread {} of {}", comment_id, link_id);
                let page = self
                    .get_json(
                        &format!("/comments/{}/_/{}", id.id(), comment_id),
                        &[("limit", "500".to_string())],
                    )
                    .await?;
                walk.visit(&page[1]["data"]["children"])?;
            } else {
                break;
            }
        }

        Ok(CommentForest {
            submission,
            comments: walk.comments,
        })
    }

    async fn info(&self, id: &str) -> Result<Option<Thing>> {
        self.first_thing(id).await
    }

    async fn submit(&self, subreddit: &str, post: &NewPost) -> Result<Submission> {
        let mut form = vec![
            ("sr", subreddit.to_string()),
            ("title", post.title.clone()),
            ("resubmit", "true".to_string()),
        ];
        match &post.body {
            PostBody::SelfText(text) => {
                form.push(("kind", "self".to_string()));
                form.push(("text", text.clone()));
            }
            PostBody::Link(url) => {
                form.push(("kind", "link".to_string()));
                form.push(("url", url.clone()));
            }
        }
        if let Some(flair_id) = &post.flair_id {
            form.push(("flair_id", flair_id.clone()));
        }

        let value = self.post_form("/api/submit", &form).await?;
        let data = &value["json"]["data"];
        Ok(Submission {
            id: string_field(data, "id"),
            name: string_field(data, "name"),
            title: post.title.clone(),
            url: data["url"].as_str().map(str::to_string),
            subreddit: Some(subreddit.to_string()),
            ..Default::default()
        })
    }

    async fn crosspost(
        &self,
        source: &Fullname,
        subreddit: &str,
        title: &str,
    ) -> Result<Submission> {
        let form = [
            ("sr", subreddit.to_string()),
            ("title", title.to_string()),
            ("kind", "crosspost".to_string()),
            ("crosspost_fullname", source.to_string()),
        ];
        let value = self.post_form("/api/submit", &form).await?;
        let data = &value["json"]["data"];
        Ok(Submission {
            id: string_field(data, "id"),
            name: string_field(data, "name"),
            title: title.to_string(),
            url: data["url"].as_str().map(str::to_string),
            subreddit: Some(subreddit.to_string()),
            ..Default::default()
        })
    }

    async fn delete(&self, thing: &Fullname) -> Result<()> {
        self.post_form("/api/del", &[("id", thing.to_string())])
            .await
            .map(|_| ())
    }

    async fn edit(&self, thing: &Fullname, text: &str) -> Result<()> {
        self.post_form(
            "/api/editusertext",
            &[("thing_id", thing.to_string()), ("text", text.to_string())],
        )
        .await
        .map(|_| ())
    }

    async fn reply(&self, parent: &Fullname, text: &str) -> Result<Comment> {
        let value = self
            .post_form(
                "/api/comment",
                &[("thing_id", parent.to_string()), ("text", text.to_string())],
            )
            .await?;
        let created = value["json"]["data"]["things"]
            .get(0)
            .ok_or_else(|| RedditError::UnexpectedResponse {
                message: "comment response has no things".to_string(),
            })?;
        child_data(created)
    }

    async fn vote(&self, thing: &Fullname, direction: VoteDirection) -> Result<()> {
        self.post_form(
            "/api/vote",
            &[
                ("id", thing.to_string()),
                ("dir", direction.as_i64().to_string()),
            ],
        )
        .await
        .map(|_| ())
    }

    async fn redditor(&self, username: &str) -> Result<Redditor> {
        let value = self
            .get_json(&format!("/user/{}/about", username), &[])
            .await?;
        child_data(&value)
    }

    async fn me(&self) -> Result<Redditor> {
        let value = self.get_json("/api/v1/me", &[]).await?;
        from_data(&value)
    }

    async fn redditor_comments(&self, username: &str, limit: u32) -> Result<Vec<Comment>> {
        let path = format!("/user/{}/comments", username);
        self.listing(&path, &[("sort", "new".to_string())], limit)
            .await?
            .iter()
            .map(child_data)
            .collect()
    }

    async fn redditor_gilded(&self, username: &str, limit: u32) -> Result<Vec<Thing>> {
        self.things(&format!("/user/{}/gilded", username), limit)
            .await
    }

    async fn redditor_trophies(&self, username: &str) -> Result<Vec<Trophy>> {
        let value = self
            .get_json(&format!("/api/v1/user/{}/trophies", username), &[])
            .await?;
        value["data"]["trophies"]
            .as_array()
            .map(|trophies| trophies.iter().map(child_data).collect())
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn vote_history(
        &self,
        username: &str,
        history: VoteHistory,
        limit: u32,
    ) -> Result<Vec<Thing>> {
        let path = format!("/user/{}/{}", username, history.path_segment());
        self.things(&path, limit).await
    }

    async fn blocked_users(&self) -> Result<Vec<RelatedUser>> {
        user_list(&self.get_json("/prefs/blocked", &[]).await?)
    }

    async fn friends(&self) -> Result<Vec<RelatedUser>> {
        user_list(&self.get_json("/api/v1/me/friends", &[]).await?)
    }

    async fn my_multireddits(&self) -> Result<Vec<Multireddit>> {
        let value = self.get_json("/api/multi/mine", &[]).await?;
        let raw: Vec<RawMultireddit> = value
            .as_array()
            .map(|multis| multis.iter().map(child_data).collect())
            .unwrap_or_else(|| Ok(Vec::new()))?;
        Ok(raw
            .into_iter()
            .map(|m| Multireddit {
                name: m.name,
                display_name: m.display_name,
                path: m.path,
                visibility: m.visibility,
                subreddits: m.subreddits.into_iter().map(|s| s.name).collect(),
            })
            .collect())
    }

    async fn moderated_subreddits(&self, limit: u32) -> Result<Vec<SubredditInfo>> {
        self.listing("/subreddits/mine/moderator", &[], limit)
            .await?
            .iter()
            .map(child_data)
            .collect()
    }

    async fn subreddit_about(&self, subreddit: &str) -> Result<SubredditInfo> {
        let value = self
            .get_json(&format!("/r/{}/about", subreddit), &[])
            .await?;
        child_data(&value)
    }

    async fn subreddit_rules(&self, subreddit: &str) -> Result<Vec<SubredditRule>> {
        let value = self
            .get_json(&format!("/r/{}/about/rules", subreddit), &[])
            .await?;
        value["rules"]
            .as_array()
            .map(|rules| rules.iter().map(from_data).collect())
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn link_flair_templates(&self, subreddit: &str) -> Result<Vec<FlairTemplate>> {
        let value = self
            .get_json(&format!("/r/{}/api/link_flair_v2", subreddit), &[])
            .await?;
        value
            .as_array()
            .map(|templates| templates.iter().map(from_data).collect())
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn user_flair(&self, subreddit: &str, username: &str) -> Result<Option<UserFlair>> {
        let value = self
            .get_json(
                &format!("/r/{}/api/flairlist", subreddit),
                &[("name", username.to_string())],
            )
            .await?;
        let flair = value["users"]
            .as_array()
            .and_then(|users| {
                users
                    .iter()
                    .find(|u| u["user"].as_str().is_some_and(|n| n.eq_ignore_ascii_case(username)))
            })
            .map(from_data::<UserFlair>)
            .transpose()?;
        Ok(flair.filter(|f| f.flair_text.is_some() || f.flair_css_class.is_some()))
    }

    async fn moderators(&self, subreddit: &str) -> Result<Vec<RelatedUser>> {
        user_list(
            &self
                .get_json(&format!("/r/{}/about/moderators", subreddit), &[])
                .await?,
        )
    }

    async fn search_subreddits(&self, query: &str, limit: u32) -> Result<Vec<SubredditInfo>> {
        self.listing("/subreddits/search", &[("q", query.to_string())], limit)
            .await?
            .iter()
            .map(child_data)
            .collect()
    }

    async fn subreddits_by_topic(&self, topic: &str) -> Result<Vec<String>> {
        let value = self
            .get_json("/api/subreddits_by_topic", &[("query", topic.to_string())])
            .await?;
        Ok(value
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|s| s["name"].as_str())
            .map(str::to_string)
            .collect())
    }

    async fn send_message(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        self.post_form(
            "/api/compose",
            &[
                ("to", to.to_string()),
                ("subject", subject.to_string()),
                ("text", body.to_string()),
            ],
        )
        .await
        .map(|_| ())
    }

    async fn inbox(&self, filter: InboxFilter, limit: u32) -> Result<Vec<InboxItem>> {
        // 讀取未讀清單時不要順便標記為已讀
        let params = [("mark", "false".to_string())];
        self.listing(inbox_path(filter), &params, limit)
            .await?
            .iter()
            .map(child_data)
            .collect()
    }

    async fn modmail_conversations(
        &self,
        subreddit: &str,
        limit: u32,
    ) -> Result<Vec<ModmailConversation>> {
        let value = self
            .get_json(
                "/api/mod/conversations",
                &[
                    ("entity", subreddit.to_string()),
                    ("limit", limit.to_string()),
                    ("sort", "recent".to_string()),
                    ("state", "all".to_string()),
                ],
            )
            .await?;
        let conversations = &value["conversations"];
        value["conversationIds"]
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .filter_map(|id| conversations.get(id))
            .take(limit as usize)
            .map(from_data)
            .collect()
    }

    async fn reply_modmail(
        &self,
        conversation_id: &str,
        body: &str,
        author_hidden: bool,
    ) -> Result<()> {
        self.post_form(
            &format!("/api/mod/conversations/{}", conversation_id),
            &[
                ("body", body.to_string()),
                ("isAuthorHidden", author_hidden.to_string()),
                ("isInternal", "false".to_string()),
            ],
        )
        .await
        .map(|_| ())
    }

    async fn subreddit_traffic(&self, subreddit: &str) -> Result<TrafficStats> {
        let value = self
            .get_json(&format!("/r/{}/about/traffic", subreddit), &[])
            .await?;
        from_data(&value)
    }

    async fn create_collection(
        &self,
        subreddit: &str,
        title: &str,
        description: &str,
    ) -> Result<Collection> {
        let about = self.subreddit_about(subreddit).await?;
        let sr_fullname = about.name.ok_or_else(|| RedditError::UnexpectedResponse {
            message: format!("r/{} has no fullname", subreddit),
        })?;
        let value = self
            .post_form(
                "/api/v1/collections/create_collection",
                &[
                    ("sr_fullname", sr_fullname),
                    ("title", title.to_string()),
                    ("description", description.to_string()),
                ],
            )
            .await?;
        from_data(&value)
    }

    async fn add_post_to_collection(&self, collection_id: &str, post: &Fullname) -> Result<()> {
        self.post_form(
            "/api/v1/collections/add_post_to_collection",
            &[
                ("collection_id", collection_id.to_string()),
                ("link_fullname", post.to_string()),
            ],
        )
        .await
        .map(|_| ())
    }

    async fn set_sticky(&self, post: &Fullname, state: bool, bottom: bool) -> Result<()> {
        let mut form = vec![("id", post.to_string()), ("state", state.to_string())];
        // 不帶 num 時平台放到最後一個置頂位置
        if state && !bottom {
            form.push(("num", "1".to_string()));
        }
        self.post_form("/api/set_subreddit_sticky", &form)
            .await
            .map(|_| ())
    }

    async fn add_wiki_contributor(&self, subreddit: &str, username: &str) -> Result<()> {
        self.post_form(
            &format!("/r/{}/api/friend", subreddit),
            &[
                ("name", username.to_string()),
                ("type", "wikicontributor".to_string()),
            ],
        )
        .await
        .map(|_| ())
    }

    async fn approved_submitters(&self, subreddit: &str) -> Result<Vec<RelatedUser>> {
        user_list(
            &self
                .get_json(&format!("/r/{}/about/contributors", subreddit), &[])
                .await?,
        )
    }

    async fn wiki_pages(&self, subreddit: &str) -> Result<Vec<String>> {
        let value = self
            .get_json(&format!("/r/{}/wiki/pages", subreddit), &[])
            .await?;
        Ok(value["data"]
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect())
    }

    async fn mod_log(&self, subreddit: &str, limit: u32) -> Result<Vec<ModAction>> {
        self.listing(&format!("/r/{}/about/log", subreddit), &[], limit)
            .await?
            .iter()
            .map(child_data)
            .collect()
    }

    async fn muted_users(&self, subreddit: &str) -> Result<Vec<RelatedUser>> {
        user_list(
            &self
                .get_json(&format!("/r/{}/about/muted", subreddit), &[])
                .await?,
        )
    }

    async fn ignore_reports(&self, thing: &Fullname) -> Result<()> {
        if !matches!(thing.kind(), ThingKind::Comment | ThingKind::Submission) {
            warn!("Ignoring reports on unusual thing kind: {}", thing);
        }
        self.post_form("/api/ignore_reports", &[("id", thing.to_string())])
            .await
            .map(|_| ())
    }

    async fn delete_flair_template(&self, subreddit: &str, template_id: &str) -> Result<()> {
        self.post_form(
            &format!("/r/{}/api/deleteflairtemplate", subreddit),
            &[("flair_template_id", template_id.to_string())],
        )
        .await
        .map(|_| ())
    }

    async fn update_rule(
        &self,
        subreddit: &str,
        rule: &SubredditRule,
        description: Option<&str>,
    ) -> Result<()> {
        let description = description
            .map(str::to_string)
            .or_else(|| rule.description.clone())
            .unwrap_or_default();
        let form = [
            ("r", subreddit.to_string()),
            ("old_short_name", rule.short_name.clone()),
            ("short_name", rule.short_name.clone()),
            ("description", description),
            ("kind", rule.kind.clone().unwrap_or_else(|| "all".to_string())),
            (
                "violation_reason",
                rule.violation_reason
                    .clone()
                    .unwrap_or_else(|| rule.short_name.clone()),
            ),
        ];
        self.post_form("/api/update_subreddit_rule", &form)
            .await
            .map(|_| ())
    }
}
