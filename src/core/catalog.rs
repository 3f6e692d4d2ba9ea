//! Declarative tool catalogue: name, description and parameters of every operation.
//!
//! The registry binds call arguments against these declarations (defaults, required
//! flags, JSON types) and `tools/list` publishes them as JSON Schema.

use rmcp::model::Tool;
use serde_json::{json, Map, Value};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Boolean,
}

impl ParamType {
    pub fn schema_name(self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Boolean => "boolean",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: &'static str,
    pub ty: ParamType,
    pub required: bool,
    /// `None` 表示沒有預設值；選填字串參數缺省時即為 null
    pub default: Option<Value>,
    pub description: &'static str,
}

impl ParamSpec {
    fn required(name: &'static str, ty: ParamType, description: &'static str) -> Self {
        Self {
            name,
            ty,
            required: true,
            default: None,
            description,
        }
    }

    fn with_default(
        name: &'static str,
        ty: ParamType,
        default: Value,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            ty,
            required: false,
            default: Some(default),
            description,
        }
    }

    fn string(name: &'static str, description: &'static str) -> Self {
        Self::required(name, ParamType::String, description)
    }

    fn optional_string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            ty: ParamType::String,
            required: false,
            default: None,
            description,
        }
    }

    fn string_or(name: &'static str, default: &str, description: &'static str) -> Self {
        Self::with_default(name, ParamType::String, json!(default), description)
    }

    fn integer_or(name: &'static str, default: i64, description: &'static str) -> Self {
        Self::with_default(name, ParamType::Integer, json!(default), description)
    }

    fn boolean_or(name: &'static str, default: bool, description: &'static str) -> Self {
        Self::with_default(name, ParamType::Boolean, json!(default), description)
    }

    fn limit(default: i64) -> Self {
        Self::integer_or("limit", default, "Maximum number of items to return.")
    }

    fn subreddit() -> Self {
        Self::string("subreddit", "Subreddit name without the 'r/' prefix.")
    }

    fn username() -> Self {
        Self::string("username", "Reddit username without the 'u/' prefix.")
    }

    fn schema(&self) -> Value {
        let mut property = Map::new();
        property.insert("type".into(), json!(self.ty.schema_name()));
        property.insert("description".into(), json!(self.description));
        if let Some(default) = &self.default {
            property.insert("default".into(), default.clone());
        }
        Value::Object(property)
    }
}

#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
}

impl ToolSpec {
    fn new(name: &'static str, description: &'static str, params: Vec<ParamSpec>) -> Self {
        Self {
            name,
            description,
            params,
        }
    }

    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// What `tools/list` publishes for this tool.
    pub fn definition(&self) -> Tool {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name.to_string(), p.schema()))
            .collect();
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        let mut input_schema = Map::new();
        input_schema.insert("type".into(), json!("object"));
        input_schema.insert("properties".into(), Value::Object(properties));
        input_schema.insert("required".into(), json!(required));
        Tool::new(self.name, self.description, Arc::new(input_schema))
    }
}

const TIME_FILTER_DOC: &str = "One of 'hour', 'day', 'week', 'month', 'year', 'all'.";

pub fn catalog() -> Vec<ToolSpec> {
    use ParamSpec as P;

    vec![
        // listings
        ToolSpec::new(
            "get_hot_posts",
            "Fetch the hottest posts of a subreddit.",
            vec![P::subreddit(), P::limit(5)],
        ),
        ToolSpec::new(
            "retrieve_reddit_posts",
            "Retrieve the current hot posts of a subreddit, including their ids.",
            vec![
                P::subreddit(),
                P::integer_or("size", 5, "Number of posts to return."),
            ],
        ),
        ToolSpec::new(
            "get_new_submissions",
            "Fetch the newest submissions of a subreddit.",
            vec![P::subreddit(), P::limit(5)],
        ),
        ToolSpec::new(
            "get_top_posts",
            "Fetch the top posts of a subreddit for a time window.",
            vec![
                P::subreddit(),
                P::string_or("time_filter", "day", TIME_FILTER_DOC),
                P::limit(10),
            ],
        ),
        ToolSpec::new(
            "get_controversial_posts",
            "Fetch the most controversial posts of a subreddit for a time window.",
            vec![
                P::subreddit(),
                P::string_or("time_filter", "day", TIME_FILTER_DOC),
                P::limit(10),
            ],
        ),
        ToolSpec::new(
            "get_rising_posts",
            "Fetch posts that are gaining traction in a subreddit.",
            vec![P::subreddit(), P::limit(10)],
        ),
        ToolSpec::new(
            "get_subreddit_listings",
            "Fetch a subreddit listing by type: hot, top, new, rising or controversial.",
            vec![
                P::subreddit(),
                P::string_or(
                    "listing_type",
                    "hot",
                    "One of 'hot', 'top', 'new', 'rising', 'controversial'.",
                ),
                P::optional_string(
                    "time_filter",
                    "Time window for 'top' and 'controversial'; defaults to 'day'.",
                ),
                P::limit(10),
            ],
        ),
        ToolSpec::new(
            "get_trending_posts",
            "Fetch trending posts across Reddit (hot posts of r/popular).",
            vec![P::limit(10)],
        ),
        ToolSpec::new(
            "get_best_feed",
            "Fetch the authenticated user's personalised 'best' front page.",
            vec![P::limit(25)],
        ),
        ToolSpec::new(
            "get_multireddit_posts",
            "Fetch hot posts from one of the authenticated user's multireddits.",
            vec![
                P::string("multireddit_name", "Name of the multireddit."),
                P::limit(10),
            ],
        ),
        ToolSpec::new(
            "get_random_post",
            "Fetch a random post from a subreddit.",
            vec![P::subreddit()],
        ),
        ToolSpec::new(
            "search_across_subreddits",
            "Search posts across all of Reddit.",
            vec![
                P::string("search_query", "Search query."),
                P::limit(5),
                P::boolean_or(
                    "restrict_sr",
                    false,
                    "Accepted for compatibility; the search always covers all subreddits.",
                ),
                P::string_or(
                    "sort",
                    "relevance",
                    "One of 'relevance', 'hot', 'top', 'new', 'comments'.",
                ),
            ],
        ),
        // content
        ToolSpec::new(
            "create_reddit_post",
            "Submit a text ('self') or link post to a subreddit.",
            vec![
                P::subreddit(),
                P::string("title", "Post title."),
                P::string("kind", "'self' for a text post, 'link' for a link post."),
                P::optional_string("text", "Body of a 'self' post."),
                P::optional_string("url", "Target URL of a 'link' post."),
                P::optional_string("flair_id", "Link flair template id."),
            ],
        ),
        ToolSpec::new(
            "delete_reddit_comment",
            "Delete one of the authenticated user's comments.",
            vec![P::string("id", "Comment id, with or without the 't1_' prefix.")],
        ),
        ToolSpec::new(
            "delete_reddit_post",
            "Delete one of the authenticated user's posts.",
            vec![P::string("id", "Post id, with or without the 't3_' prefix.")],
        ),
        ToolSpec::new(
            "edit_reddit_content",
            "Edit the body of the authenticated user's comment or self post.",
            vec![
                P::string("thing_id", "Fullname starting with 't1_' (comment) or 't3_' (post)."),
                P::string("text", "New body text."),
            ],
        ),
        ToolSpec::new(
            "post_reddit_comment",
            "Reply to a post or comment.",
            vec![
                P::string("thing_id", "Fullname starting with 't1_' (comment) or 't3_' (post)."),
                P::string("text", "Comment body."),
            ],
        ),
        ToolSpec::new(
            "retrieve_post_comments",
            "Retrieve every comment of a post, breadth first.",
            vec![P::string("article", "Post id.")],
        ),
        ToolSpec::new(
            "retrieve_specific_content",
            "Look up a single post, comment or other object by fullname.",
            vec![P::string("id", "Fullname such as 't3_abc' or 't1_def'.")],
        ),
        ToolSpec::new(
            "get_submission_details",
            "Fetch summary details of a post.",
            vec![P::string("submission_id", "Post id.")],
        ),
        ToolSpec::new(
            "vote_on_content",
            "Upvote, downvote or clear the vote on a post or comment.",
            vec![
                P::string("fullname", "Target; 't1_' is a comment, 't3_' or a bare id a post."),
                P::integer_or("direction", 1, "1 upvote, -1 downvote, 0 clear."),
            ],
        ),
        ToolSpec::new(
            "crosspost_submission",
            "Crosspost an existing post to another subreddit.",
            vec![
                P::string("post_id", "Id of the post to crosspost."),
                P::subreddit(),
                P::optional_string(
                    "title",
                    "Title of the crosspost; defaults to the original title.",
                ),
            ],
        ),
        ToolSpec::new(
            "find_best_answer_in_post",
            "Pick the most relevant answer in a post's comments.",
            vec![
                P::string("post_id", "Post id."),
                P::string_or(
                    "strategy",
                    "top_voted",
                    "One of 'top_voted', 'op_reply', 'mod_reply'.",
                ),
            ],
        ),
        // users
        ToolSpec::new(
            "get_user_info",
            "Fetch a user's name, total karma and creation time.",
            vec![P::username()],
        ),
        ToolSpec::new(
            "get_user_comments",
            "Fetch a user's most recent comments.",
            vec![P::username(), P::limit(10)],
        ),
        ToolSpec::new(
            "get_redditor_trophies",
            "List the trophies a user has earned.",
            vec![P::username()],
        ),
        ToolSpec::new(
            "get_user_gilded_content",
            "List a user's posts and comments that received awards.",
            vec![P::username(), P::limit(25)],
        ),
        ToolSpec::new(
            "get_user_follower_count",
            "Fetch the follower count of a user.",
            vec![P::username()],
        ),
        ToolSpec::new(
            "get_reddit_age",
            "Compute the age of a user account or a subreddit.",
            vec![
                P::string("name", "Username or subreddit name."),
                P::string("item_type", "'user' or 'subreddit'."),
            ],
        ),
        ToolSpec::new(
            "get_blocked_users",
            "List the users the authenticated user has blocked.",
            vec![],
        ),
        ToolSpec::new(
            "list_user_friends",
            "List the authenticated user's friends.",
            vec![],
        ),
        ToolSpec::new(
            "get_my_upvoted_content",
            "List content the authenticated user has upvoted.",
            vec![P::limit(25)],
        ),
        ToolSpec::new(
            "get_my_downvoted_content",
            "List content the authenticated user has downvoted.",
            vec![P::limit(25)],
        ),
        ToolSpec::new(
            "list_multireddits",
            "List the authenticated user's multireddits.",
            vec![],
        ),
        ToolSpec::new(
            "get_moderated_subs",
            "List the subreddits the authenticated user moderates.",
            vec![P::limit(25)],
        ),
        // subreddits
        ToolSpec::new(
            "get_subreddit_details",
            "Fetch basic details of a subreddit.",
            vec![P::subreddit()],
        ),
        ToolSpec::new(
            "get_subreddit_sidebar",
            "Fetch the sidebar (markdown description) of a subreddit.",
            vec![P::subreddit()],
        ),
        ToolSpec::new(
            "get_subreddit_rules",
            "List the rules of a subreddit.",
            vec![P::subreddit()],
        ),
        ToolSpec::new(
            "get_link_flair",
            "List the link flair templates of a subreddit.",
            vec![P::subreddit()],
        ),
        ToolSpec::new(
            "get_user_flair",
            "Fetch a user's flair in a subreddit.",
            vec![P::subreddit(), P::username()],
        ),
        ToolSpec::new(
            "get_moderators",
            "List the moderators of a subreddit.",
            vec![P::subreddit()],
        ),
        ToolSpec::new(
            "search_subreddits",
            "Search subreddits by name and description.",
            vec![P::string("query", "Search query."), P::limit(10)],
        ),
        ToolSpec::new(
            "get_subreddits_by_topic",
            "Search subreddits related to a topic.",
            vec![P::string("topic", "Topic to search for."), P::limit(10)],
        ),
        ToolSpec::new(
            "find_communities_by_topic",
            "Find communities Reddit associates with a topic.",
            vec![P::string("topic", "Topic to search for."), P::limit(10)],
        ),
        ToolSpec::new(
            "get_community_age_rating",
            "Report whether a subreddit is marked NSFW.",
            vec![P::subreddit()],
        ),
        // messaging
        ToolSpec::new(
            "send_private_message",
            "Send a private message to a user.",
            vec![
                P::string("recipient", "Username of the recipient."),
                P::string("subject", "Message subject."),
                P::string("message", "Message body."),
            ],
        ),
        ToolSpec::new(
            "send_mod_mail",
            "Send a message to the moderators of a subreddit.",
            vec![
                P::subreddit(),
                P::string("subject", "Message subject."),
                P::string("message", "Message body."),
            ],
        ),
        ToolSpec::new(
            "get_unread_messages",
            "List unread inbox items.",
            vec![P::limit(10)],
        ),
        ToolSpec::new(
            "get_my_notifications",
            "List inbox items filtered by type.",
            vec![
                P::string_or(
                    "filter_type",
                    "unread",
                    "One of 'all', 'unread', 'comment_replies', 'post_replies', 'mentions', \
                     'messages'.",
                ),
                P::limit(10),
            ],
        ),
        ToolSpec::new(
            "list_modmail_conversations",
            "List recent modmail conversations of a subreddit.",
            vec![P::subreddit(), P::limit(10)],
        ),
        ToolSpec::new(
            "reply_to_modmail_conversation",
            "Reply to a modmail conversation.",
            vec![
                P::string("conversation_id", "Modmail conversation id."),
                P::string("body", "Reply body."),
                P::boolean_or(
                    "is_author_hidden",
                    false,
                    "Reply as the subreddit instead of the moderator.",
                ),
            ],
        ),
        // moderation
        ToolSpec::new(
            "get_subreddit_traffic_stats",
            "Fetch daily, monthly and hourly traffic of a subreddit.",
            vec![P::subreddit()],
        ),
        ToolSpec::new(
            "create_post_collection",
            "Create a post collection in a subreddit.",
            vec![
                P::subreddit(),
                P::string("title", "Collection title."),
                P::string_or("description", "", "Collection description."),
            ],
        ),
        ToolSpec::new(
            "add_post_to_collection",
            "Add a post to an existing collection.",
            vec![
                P::string("collection_id", "Collection id."),
                P::string("post_id", "Post id."),
            ],
        ),
        ToolSpec::new(
            "sticky_post",
            "Sticky or un-sticky a post.",
            vec![
                P::string("post_id", "Post id."),
                P::boolean_or("state", true, "true to sticky, false to un-sticky."),
                P::integer_or("slot", 1, "Sticky slot, 1 or 2."),
            ],
        ),
        ToolSpec::new(
            "add_wiki_editor",
            "Allow a user to edit a subreddit's wiki.",
            vec![P::subreddit(), P::username()],
        ),
        ToolSpec::new(
            "list_approved_submitters",
            "List the approved submitters of a subreddit.",
            vec![P::subreddit()],
        ),
        ToolSpec::new(
            "list_wiki_pages",
            "List the wiki pages of a subreddit.",
            vec![P::subreddit()],
        ),
        ToolSpec::new(
            "get_moderation_log",
            "Fetch the recent moderation log of a subreddit.",
            vec![P::subreddit(), P::limit(25)],
        ),
        ToolSpec::new(
            "list_muted_users",
            "List the muted users of a subreddit.",
            vec![P::subreddit()],
        ),
        ToolSpec::new(
            "ignore_reports_on_content",
            "Ignore future reports on a post or comment.",
            vec![P::string(
                "content_id",
                "Id of the content; 't3_' ids are posts, 't1_' or bare ids are comments.",
            )],
        ),
        ToolSpec::new(
            "delete_flair_template",
            "Delete a link flair template.",
            vec![
                P::subreddit(),
                P::string("flair_template_id", "Flair template id."),
            ],
        ),
        ToolSpec::new(
            "update_subreddit_rule",
            "Update the description of an existing subreddit rule.",
            vec![
                P::subreddit(),
                P::string("short_name", "Short name of the rule."),
                P::optional_string("new_description", "New rule description."),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_names_are_unique() {
        let tools = catalog();
        let names: HashSet<_> = tools.iter().map(|t| t.name).collect();
        assert_eq!(names.len(), tools.len());
        assert_eq!(tools.len(), 63);
        assert_eq!(
            tools.iter().filter(|t| t.name == "get_multireddit_posts").count(),
            1
        );
    }

    #[test]
    fn test_definition_schema() {
        let tools = catalog();
        let spec = tools
            .iter()
            .find(|t| t.name == "get_top_posts")
            .unwrap();
        let def = spec.definition();
        let value = serde_json::to_value(&def).unwrap();

        assert_eq!(value["inputSchema"]["type"], "object");
        assert_eq!(value["inputSchema"]["required"], json!(["subreddit"]));
        assert_eq!(
            value["inputSchema"]["properties"]["time_filter"]["default"],
            "day"
        );
        assert_eq!(
            value["inputSchema"]["properties"]["limit"]["type"],
            "integer"
        );
    }

    #[test]
    fn test_optional_string_has_no_default() {
        let tools = catalog();
        let spec = tools
            .iter()
            .find(|t| t.name == "create_reddit_post")
            .unwrap();
        let text = spec.param("text").unwrap();
        assert!(!text.required);
        assert!(text.default.is_none());
        assert!(spec.definition().input_schema["properties"]["text"]
            .get("default")
            .is_none());
    }
}
