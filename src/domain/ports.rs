use crate::domain::fullname::Fullname;
use crate::domain::model::{
    Collection, Comment, CommentForest, FlairTemplate, InboxItem, ModAction, ModmailConversation,
    Multireddit, Redditor, RelatedUser, Submission, SubredditInfo, SubredditRule, Thing,
    TrafficStats, Trophy, UserFlair,
};
use crate::domain::params::{InboxFilter, ListingSort, SearchSort, VoteDirection, VoteHistory};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 新貼文的內容：自文貼文帶內文，連結貼文帶網址
#[derive(Debug, Clone, PartialEq)]
pub enum PostBody {
    SelfText(String),
    Link(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub body: PostBody,
    pub flair_id: Option<String>,
}

/// Authenticated session with the platform.
///
/// Each method is one logical platform call. Implementations own transport, authentication,
/// pagination and rate limiting; callers only see domain objects or a [`RedditError`].
///
/// [`RedditError`]: crate::utils::error::RedditError
#[async_trait]
pub trait RedditClient: Send + Sync {
    // listings
    async fn subreddit_listing(
        &self,
        subreddit: &str,
        sort: ListingSort,
        limit: u32,
    ) -> Result<Vec<Submission>>;
    async fn front_page_best(&self, limit: u32) -> Result<Vec<Submission>>;
    async fn multireddit_hot(&self, owner: &str, name: &str, limit: u32)
        -> Result<Vec<Submission>>;
    /// `None` when the subreddit has no random mode or is empty.
    async fn random_submission(&self, subreddit: &str) -> Result<Option<Submission>>;
    async fn search_submissions(
        &self,
        subreddit: &str,
        query: &str,
        sort: SearchSort,
        limit: u32,
    ) -> Result<Vec<Submission>>;

    // content
    async fn submission(&self, id: &Fullname) -> Result<Submission>;
    /// Post plus every comment, with all "load more" stubs expanded.
    async fn comment_forest(&self, id: &Fullname) -> Result<CommentForest>;
    /// `None` when nothing exists under that fullname.
    async fn info(&self, id: &str) -> Result<Option<Thing>>;
    async fn submit(&self, subreddit: &str, post: &NewPost) -> Result<Submission>;
    async fn crosspost(
        &self,
        source: &Fullname,
        subreddit: &str,
        title: &str,
    ) -> Result<Submission>;
    async fn delete(&self, thing: &Fullname) -> Result<()>;
    async fn edit(&self, thing: &Fullname, text: &str) -> Result<()>;
    async fn reply(&self, parent: &Fullname, text: &str) -> Result<Comment>;
    async fn vote(&self, thing: &Fullname, direction: VoteDirection) -> Result<()>;

    // users
    async fn redditor(&self, username: &str) -> Result<Redditor>;
    async fn me(&self) -> Result<Redditor>;
    async fn redditor_comments(&self, username: &str, limit: u32) -> Result<Vec<Comment>>;
    async fn redditor_gilded(&self, username: &str, limit: u32) -> Result<Vec<Thing>>;
    async fn redditor_trophies(&self, username: &str) -> Result<Vec<Trophy>>;
    async fn vote_history(
        &self,
        username: &str,
        history: VoteHistory,
        limit: u32,
    ) -> Result<Vec<Thing>>;
    async fn blocked_users(&self) -> Result<Vec<RelatedUser>>;
    async fn friends(&self) -> Result<Vec<RelatedUser>>;
    async fn my_multireddits(&self) -> Result<Vec<Multireddit>>;
    async fn moderated_subreddits(&self, limit: u32) -> Result<Vec<SubredditInfo>>;

    // subreddits
    async fn subreddit_about(&self, subreddit: &str) -> Result<SubredditInfo>;
    async fn subreddit_rules(&self, subreddit: &str) -> Result<Vec<SubredditRule>>;
    async fn link_flair_templates(&self, subreddit: &str) -> Result<Vec<FlairTemplate>>;
    async fn user_flair(&self, subreddit: &str, username: &str) -> Result<Option<UserFlair>>;
    async fn moderators(&self, subreddit: &str) -> Result<Vec<RelatedUser>>;
    async fn search_subreddits(&self, query: &str, limit: u32) -> Result<Vec<SubredditInfo>>;
    /// Names of subreddits related to a topic, most relevant first.
    async fn subreddits_by_topic(&self, topic: &str) -> Result<Vec<String>>;

    // messaging
    /// `to` is a username or `/r/<subreddit>` for the subreddit's moderators.
    async fn send_message(&self, to: &str, subject: &str, body: &str) -> Result<()>;
    async fn inbox(&self, filter: InboxFilter, limit: u32) -> Result<Vec<InboxItem>>;
    async fn modmail_conversations(
        &self,
        subreddit: &str,
        limit: u32,
    ) -> Result<Vec<ModmailConversation>>;
    async fn reply_modmail(
        &self,
        conversation_id: &str,
        body: &str,
        author_hidden: bool,
    ) -> Result<()>;

    // moderation
    async fn subreddit_traffic(&self, subreddit: &str) -> Result<TrafficStats>;
    async fn create_collection(
        &self,
        subreddit: &str,
        title: &str,
        description: &str,
    ) -> Result<Collection>;
    async fn add_post_to_collection(&self, collection_id: &str, post: &Fullname) -> Result<()>;
    async fn set_sticky(&self, post: &Fullname, state: bool, bottom: bool) -> Result<()>;
    async fn add_wiki_contributor(&self, subreddit: &str, username: &str) -> Result<()>;
    async fn approved_submitters(&self, subreddit: &str) -> Result<Vec<RelatedUser>>;
    async fn wiki_pages(&self, subreddit: &str) -> Result<Vec<String>>;
    async fn mod_log(&self, subreddit: &str, limit: u32) -> Result<Vec<ModAction>>;
    async fn muted_users(&self, subreddit: &str) -> Result<Vec<RelatedUser>>;
    async fn ignore_reports(&self, thing: &Fullname) -> Result<()>;
    async fn delete_flair_template(&self, subreddit: &str, template_id: &str) -> Result<()>;
    async fn update_rule(
        &self,
        subreddit: &str,
        rule: &SubredditRule,
        description: Option<&str>,
    ) -> Result<()>;
}
