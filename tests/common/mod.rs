#![allow(dead_code)]

use async_trait::async_trait;
use reddit_tools::domain::fullname::Fullname;
use reddit_tools::domain::model::*;
use reddit_tools::domain::params::{
    Choice, InboxFilter, ListingSort, SearchSort, VoteDirection, VoteHistory,
};
use reddit_tools::domain::ports::{NewPost, RedditClient};
use reddit_tools::utils::error::{RedditError, Result};
use reddit_tools::{RedditToolkit, ToolRegistry};
use std::sync::{Arc, Mutex};

/// 測試用客戶端：回傳固定資料並記錄每次呼叫
#[derive(Default)]
pub struct StubClient {
    pub calls: Mutex<Vec<String>>,
    pub failure: Option<String>,
    pub posts: Vec<Submission>,
    pub random: Option<Submission>,
    pub forest: CommentForest,
    pub thing: Option<Thing>,
    pub user: Redditor,
    pub me: Redditor,
    pub comments: Vec<Comment>,
    pub things: Vec<Thing>,
    pub trophies: Vec<Trophy>,
    pub users: Vec<RelatedUser>,
    pub multireddits: Vec<Multireddit>,
    pub subreddit: SubredditInfo,
    pub subreddits: Vec<SubredditInfo>,
    pub topic_names: Vec<String>,
    pub rules: Vec<SubredditRule>,
    pub flair_templates: Vec<FlairTemplate>,
    pub user_flair: Option<UserFlair>,
    pub inbox: Vec<InboxItem>,
    pub modmail: Vec<ModmailConversation>,
    pub traffic: TrafficStats,
    pub collection: Collection,
    pub wiki_pages: Vec<String>,
    pub mod_log: Vec<ModAction>,
}

impl StubClient {
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some(message) => Err(RedditError::Api {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

pub fn submission(id: &str, title: &str) -> Submission {
    Submission {
        id: id.to_string(),
        name: format!("t3_{}", id),
        title: title.to_string(),
        url: Some(format!("https://example.com/{}", id)),
        permalink: Some(format!("/r/test/comments/{}/", id)),
        author: Some("poster".to_string()),
        subreddit: Some("test".to_string()),
        score: Some(42),
        num_comments: Some(7),
        created_utc: Some(1_700_000_000.0),
        ..Default::default()
    }
}

pub fn comment(id: &str, parent: &str, author: &str, body: &str) -> Comment {
    Comment {
        id: id.to_string(),
        name: format!("t1_{}", id),
        author: Some(author.to_string()),
        body: Some(body.to_string()),
        score: Some(1),
        permalink: Some(format!("/r/test/comments/p1/_/{}/", id)),
        subreddit: Some("test".to_string()),
        parent_id: Some(parent.to_string()),
        link_id: Some("t3_p1".to_string()),
        ..Default::default()
    }
}

pub fn posts(count: usize) -> Vec<Submission> {
    (1..=count)
        .map(|i| submission(&format!("p{}", i), &format!("Post {}", i)))
        .collect()
}

pub fn toolkit(client: StubClient) -> (RedditToolkit<StubClient>, Arc<StubClient>) {
    let client = Arc::new(client);
    (RedditToolkit::new(Arc::clone(&client)), client)
}

pub fn registry(client: StubClient) -> (ToolRegistry<StubClient>, Arc<StubClient>) {
    let (toolkit, client) = toolkit(client);
    (ToolRegistry::new(toolkit), client)
}

fn take<T: Clone>(items: &[T], limit: u32) -> Vec<T> {
    items.iter().take(limit as usize).cloned().collect()
}

#[async_trait]
impl RedditClient for StubClient {
    async fn subreddit_listing(
        &self,
        subreddit: &str,
        sort: ListingSort,
        limit: u32,
    ) -> Result<Vec<Submission>> {
        let window = sort.time_filter().map(|t| t.as_str()).unwrap_or("-");
        self.record(format!(
            "subreddit_listing {} {} {} {}",
            subreddit,
            sort.path_segment(),
            window,
            limit
        ))?;
        Ok(take(&self.posts, limit))
    }

    async fn front_page_best(&self, limit: u32) -> Result<Vec<Submission>> {
        self.record(format!("front_page_best {}", limit))?;
        Ok(take(&self.posts, limit))
    }

    async fn multireddit_hot(
        &self,
        owner: &str,
        name: &str,
        limit: u32,
    ) -> Result<Vec<Submission>> {
        self.record(format!("multireddit_hot {} {} {}", owner, name, limit))?;
        Ok(take(&self.posts, limit))
    }

    async fn random_submission(&self, subreddit: &str) -> Result<Option<Submission>> {
        self.record(format!("random_submission {}", subreddit))?;
        Ok(self.random.clone())
    }

    async fn search_submissions(
        &self,
        subreddit: &str,
        query: &str,
        sort: SearchSort,
        limit: u32,
    ) -> Result<Vec<Submission>> {
        self.record(format!(
            "search_submissions {} {} {} {}",
            subreddit,
            query,
            sort.as_str(),
            limit
        ))?;
        Ok(take(&self.posts, limit))
    }

    async fn submission(&self, id: &Fullname) -> Result<Submission> {
        self.record(format!("submission {}", id))?;
        self.posts
            .iter()
            .find(|p| p.id == id.id())
            .cloned()
            .ok_or_else(|| RedditError::NotFound {
                what: format!("Submission {}", id),
            })
    }

    async fn comment_forest(&self, id: &Fullname) -> Result<CommentForest> {
        self.record(format!("comment_forest {}", id))?;
        Ok(self.forest.clone())
    }

    async fn info(&self, id: &str) -> Result<Option<Thing>> {
        self.record(format!("info {}", id))?;
        Ok(self.thing.clone())
    }

    async fn submit(&self, subreddit: &str, post: &NewPost) -> Result<Submission> {
        self.record(format!("submit {} {:?}", subreddit, post.body))?;
        Ok(Submission {
            id: "new1".to_string(),
            name: "t3_new1".to_string(),
            title: post.title.clone(),
            url: Some("https://www.reddit.com/r/test/comments/new1/".to_string()),
            ..Default::default()
        })
    }

    async fn crosspost(
        &self,
        source: &Fullname,
        subreddit: &str,
        title: &str,
    ) -> Result<Submission> {
        self.record(format!("crosspost {} {} {}", source, subreddit, title))?;
        Ok(Submission {
            id: "x1".to_string(),
            name: "t3_x1".to_string(),
            title: title.to_string(),
            permalink: Some("/r/other/comments/x1/".to_string()),
            ..Default::default()
        })
    }

    async fn delete(&self, thing: &Fullname) -> Result<()> {
        self.record(format!("delete {}", thing))
    }

    async fn edit(&self, thing: &Fullname, text: &str) -> Result<()> {
        self.record(format!("edit {} {}", thing, text))
    }

    async fn reply(&self, parent: &Fullname, text: &str) -> Result<Comment> {
        self.record(format!("reply {} {}", parent, text))?;
        Ok(comment("c9", &parent.to_string(), "me", text))
    }

    async fn vote(&self, thing: &Fullname, direction: VoteDirection) -> Result<()> {
        self.record(format!("vote {} {}", thing, direction.as_i64()))
    }

    async fn redditor(&self, username: &str) -> Result<Redditor> {
        self.record(format!("redditor {}", username))?;
        Ok(self.user.clone())
    }

    async fn me(&self) -> Result<Redditor> {
        self.record("me".to_string())?;
        Ok(self.me.clone())
    }

    async fn redditor_comments(&self, username: &str, limit: u32) -> Result<Vec<Comment>> {
        self.record(format!("redditor_comments {} {}", username, limit))?;
        Ok(take(&self.comments, limit))
    }

    async fn redditor_gilded(&self, username: &str, limit: u32) -> Result<Vec<Thing>> {
        self.record(format!("redditor_gilded {} {}", username, limit))?;
        Ok(take(&self.things, limit))
    }

    async fn redditor_trophies(&self, username: &str) -> Result<Vec<Trophy>> {
        self.record(format!("redditor_trophies {}", username))?;
        Ok(self.trophies.clone())
    }

    async fn vote_history(
        &self,
        username: &str,
        history: VoteHistory,
        limit: u32,
    ) -> Result<Vec<Thing>> {
        self.record(format!(
            "vote_history {} {} {}",
            username,
            history.path_segment(),
            limit
        ))?;
        Ok(take(&self.things, limit))
    }

    async fn blocked_users(&self) -> Result<Vec<RelatedUser>> {
        self.record("blocked_users".to_string())?;
        Ok(self.users.clone())
    }

    async fn friends(&self) -> Result<Vec<RelatedUser>> {
        self.record("friends".to_string())?;
        Ok(self.users.clone())
    }

    async fn my_multireddits(&self) -> Result<Vec<Multireddit>> {
        self.record("my_multireddits".to_string())?;
        Ok(self.multireddits.clone())
    }

    async fn moderated_subreddits(&self, limit: u32) -> Result<Vec<SubredditInfo>> {
        self.record(format!("moderated_subreddits {}", limit))?;
        Ok(take(&self.subreddits, limit))
    }

    async fn subreddit_about(&self, subreddit: &str) -> Result<SubredditInfo> {
        self.record(format!("subreddit_about {}", subreddit))?;
        Ok(self.subreddit.clone())
    }

    async fn subreddit_rules(&self, subreddit: &str) -> Result<Vec<SubredditRule>> {
        self.record(format!("subreddit_rules {}", subreddit))?;
        Ok(self.rules.clone())
    }

    async fn link_flair_templates(&self, subreddit: &str) -> Result<Vec<FlairTemplate>> {
        self.record(format!("link_flair_templates {}", subreddit))?;
        Ok(self.flair_templates.clone())
    }

    async fn user_flair(&self, subreddit: &str, username: &str) -> Result<Option<UserFlair>> {
        self.record(format!("user_flair {} {}", subreddit, username))?;
        Ok(self.user_flair.clone())
    }

    async fn moderators(&self, subreddit: &str) -> Result<Vec<RelatedUser>> {
        self.record(format!("moderators {}", subreddit))?;
        Ok(self.users.clone())
    }

    async fn search_subreddits(&self, query: &str, limit: u32) -> Result<Vec<SubredditInfo>> {
        self.record(format!("search_subreddits {} {}", query, limit))?;
        Ok(take(&self.subreddits, limit))
    }

    async fn subreddits_by_topic(&self, topic: &str) -> Result<Vec<String>> {
        self.record(format!("subreddits_by_topic {}", topic))?;
        Ok(self.topic_names.clone())
    }

    async fn send_message(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        self.record(format!("send_message {} {} {}", to, subject, body))
    }

    async fn inbox(&self, filter: InboxFilter, limit: u32) -> Result<Vec<InboxItem>> {
        self.record(format!("inbox {} {}", filter.as_str(), limit))?;
        Ok(take(&self.inbox, limit))
    }

    async fn modmail_conversations(
        &self,
        subreddit: &str,
        limit: u32,
    ) -> Result<Vec<ModmailConversation>> {
        self.record(format!("modmail_conversations {} {}", subreddit, limit))?;
        Ok(take(&self.modmail, limit))
    }

    async fn reply_modmail(
        &self,
        conversation_id: &str,
        body: &str,
        author_hidden: bool,
    ) -> Result<()> {
        self.record(format!(
            "reply_modmail {} {} {}",
            conversation_id, body, author_hidden
        ))
    }

    async fn subreddit_traffic(&self, subreddit: &str) -> Result<TrafficStats> {
        self.record(format!("subreddit_traffic {}", subreddit))?;
        Ok(self.traffic.clone())
    }

    async fn create_collection(
        &self,
        subreddit: &str,
        title: &str,
        description: &str,
    ) -> Result<Collection> {
        self.record(format!(
            "create_collection {} {} {}",
            subreddit, title, description
        ))?;
        Ok(self.collection.clone())
    }

    async fn add_post_to_collection(&self, collection_id: &str, post: &Fullname) -> Result<()> {
        self.record(format!("add_post_to_collection {} {}", collection_id, post))
    }

    async fn set_sticky(&self, post: &Fullname, state: bool, bottom: bool) -> Result<()> {
        self.record(format!("set_sticky {} {} {}", post, state, bottom))
    }

    async fn add_wiki_contributor(&self, subreddit: &str, username: &str) -> Result<()> {
        self.record(format!("add_wiki_contributor {} {}", subreddit, username))
    }

    async fn approved_submitters(&self, subreddit: &str) -> Result<Vec<RelatedUser>> {
        self.record(format!("approved_submitters {}", subreddit))?;
        Ok(self.users.clone())
    }

    async fn wiki_pages(&self, subreddit: &str) -> Result<Vec<String>> {
        self.record(format!("wiki_pages {}", subreddit))?;
        Ok(self.wiki_pages.clone())
    }

    async fn mod_log(&self, subreddit: &str, limit: u32) -> Result<Vec<ModAction>> {
        self.record(format!("mod_log {} {}", subreddit, limit))?;
        Ok(take(&self.mod_log, limit))
    }

    async fn muted_users(&self, subreddit: &str) -> Result<Vec<RelatedUser>> {
        self.record(format!("muted_users {}", subreddit))?;
        Ok(self.users.clone())
    }

    async fn ignore_reports(&self, thing: &Fullname) -> Result<()> {
        self.record(format!("ignore_reports {}", thing))
    }

    async fn delete_flair_template(&self, subreddit: &str, template_id: &str) -> Result<()> {
        self.record(format!("delete_flair_template {} {}", subreddit, template_id))
    }

    async fn update_rule(
        &self,
        subreddit: &str,
        rule: &SubredditRule,
        description: Option<&str>,
    ) -> Result<()> {
        self.record(format!(
            "update_rule {} {} {}",
            subreddit,
            rule.short_name,
            description.unwrap_or("-")
        ))
    }
}
