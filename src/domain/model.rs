use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// 平台回傳的物件：平台可能省略的欄位一律是 Option

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Submission {
    pub id: String,
    /// fullname, e.g. `t3_abc123`
    pub name: String,
    pub title: String,
    pub url: Option<String>,
    pub permalink: Option<String>,
    pub author: Option<String>,
    pub subreddit: Option<String>,
    pub score: Option<i64>,
    pub upvote_ratio: Option<f64>,
    pub num_comments: Option<i64>,
    pub is_self: Option<bool>,
    pub selftext: Option<String>,
    pub created_utc: Option<f64>,
    pub distinguished: Option<String>,
    pub total_awards_received: Option<i64>,
    pub over_18: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    pub id: String,
    pub name: String,
    pub author: Option<String>,
    pub body: Option<String>,
    pub score: Option<i64>,
    pub permalink: Option<String>,
    pub subreddit: Option<String>,
    pub created_utc: Option<f64>,
    pub distinguished: Option<String>,
    /// fullname of the parent post or comment
    pub parent_id: Option<String>,
    pub link_id: Option<String>,
    pub total_awards_received: Option<i64>,
}

impl Comment {
    pub fn is_moderator_distinguished(&self) -> bool {
        self.distinguished.as_deref() == Some("moderator")
    }
}

/// A post or a comment, for endpoints that return mixed listings.
#[derive(Debug, Clone, PartialEq)]
pub enum Thing {
    Submission(Submission),
    Comment(Comment),
    Other {
        kind: String,
        data: serde_json::Value,
    },
}

impl Thing {
    pub fn kind(&self) -> &str {
        match self {
            Thing::Submission(_) => "t3",
            Thing::Comment(_) => "t1",
            Thing::Other { kind, .. } => kind,
        }
    }
}

/// 貼文與其完整展開後的留言
///
/// `comments` 是扁平列表，依平台回傳順序排列；樹狀結構由 `parent_id` 表示。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentForest {
    pub submission: Submission,
    pub comments: Vec<Comment>,
}

impl CommentForest {
    /// Direct replies to the post, in the default comment sort.
    pub fn top_level(&self) -> Vec<&Comment> {
        let root = self.submission_fullname();
        self.comments
            .iter()
            .filter(|c| c.parent_id.as_deref() == Some(root.as_str()))
            .collect()
    }

    /// Every comment, level by level.
    pub fn breadth_first(&self) -> Vec<&Comment> {
        let mut replies: HashMap<&str, Vec<&Comment>> = HashMap::new();
        for comment in &self.comments {
            if let Some(parent) = comment.parent_id.as_deref() {
                replies.entry(parent).or_default().push(comment);
            }
        }

        let root = self.submission_fullname();
        let mut ordered = replies.remove(root.as_str()).unwrap_or_default();
        let mut cursor = 0;
        while cursor < ordered.len() {
            // remove 讓每個父節點只展開一次
            if let Some(children) = replies.remove(ordered[cursor].name.as_str()) {
                ordered.extend(children);
            }
            cursor += 1;
        }
        ordered
    }

    fn submission_fullname(&self) -> String {
        if self.submission.name.is_empty() {
            format!("t3_{}", self.submission.id)
        } else {
            self.submission.name.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileSubreddit {
    pub subscribers: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Redditor {
    pub id: Option<String>,
    pub name: String,
    pub link_karma: Option<i64>,
    pub comment_karma: Option<i64>,
    pub created_utc: Option<f64>,
    /// 使用者個人頁面，追蹤者數就是它的訂閱數
    pub subreddit: Option<ProfileSubreddit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubredditInfo {
    pub display_name: String,
    /// fullname, e.g. `t5_2qh0u`
    pub name: Option<String>,
    pub title: Option<String>,
    pub subscribers: Option<i64>,
    pub created_utc: Option<f64>,
    pub public_description: Option<String>,
    /// sidebar markdown
    pub description: Option<String>,
    pub over18: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlairTemplate {
    #[serde(alias = "flair_template_id")]
    pub id: String,
    #[serde(alias = "flair_text")]
    pub text: Option<String>,
    pub css_class: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserFlair {
    pub user: Option<String>,
    pub flair_text: Option<String>,
    pub flair_css_class: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubredditRule {
    pub short_name: String,
    pub description: Option<String>,
    pub created_utc: Option<f64>,
    pub violation_reason: Option<String>,
    /// `link`, `comment` or `all`
    pub kind: Option<String>,
    pub priority: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trophy {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "icon_70")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Multireddit {
    pub name: String,
    pub display_name: Option<String>,
    pub path: Option<String>,
    pub visibility: Option<String>,
    pub subreddits: Vec<String>,
}

/// Private message, comment reply or mention from the inbox.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InboxItem {
    pub id: String,
    pub name: String,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub new: Option<bool>,
    pub created_utc: Option<f64>,
}

impl InboxItem {
    /// Type tag taken from the fullname (`t1`, `t4`, ...).
    pub fn kind(&self) -> &str {
        self.name.split('_').next().unwrap_or_default()
    }
}

/// A user as it appears in relationship lists (friends, moderators, muted, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedUser {
    pub name: String,
    pub id: Option<String>,
    pub date: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModAction {
    pub action: Option<String>,
    pub target_author: Option<String>,
    pub target_fullname: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "mod")]
    pub moderator: Option<String>,
    pub created_utc: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModmailParticipant {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModmailConversation {
    pub id: String,
    pub subject: Option<String>,
    pub last_updated: Option<String>,
    pub participant: Option<ModmailParticipant>,
    pub is_highlighted: Option<bool>,
}

/// 流量統計，每一列為 `[timestamp, uniques, pageviews, ...]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficStats {
    pub day: Vec<Vec<serde_json::Value>>,
    pub month: Vec<Vec<serde_json::Value>>,
    pub hour: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collection {
    pub collection_id: Option<String>,
    pub permalink: Option<String>,
    pub title: Option<String>,
}
