use crate::core::catalog::{catalog, ParamSpec, ParamType, ToolSpec};
use crate::core::envelope::{Envelope, OperationError, OperationResult};
use crate::core::toolkit::RedditToolkit;
use crate::domain::ports::RedditClient;
use rmcp::model::Tool;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown tool: {0}")]
pub struct UnknownTool(pub String);

/// Call arguments after defaults are filled in and types are checked.
#[derive(Debug, Default)]
pub struct ToolArgs {
    values: Map<String, Value>,
}

impl ToolArgs {
    /// 依工具宣告綁定參數；任何錯誤都在呼叫平台前回報
    pub fn bind(spec: &ToolSpec, arguments: &Value) -> Result<Self, OperationError> {
        let provided = match arguments {
            Value::Object(map) => map.clone(),
            Value::Null => Map::new(),
            _ => {
                return Err(OperationError::Failed(
                    "Tool arguments must be a JSON object.".to_string(),
                ))
            }
        };

        let mut values = Map::new();
        for param in &spec.params {
            let value = match provided.get(param.name) {
                Some(v) if !v.is_null() => v.clone(),
                _ => match &param.default {
                    Some(default) => default.clone(),
                    None if param.required => {
                        return Err(OperationError::missing_parameter(param.name))
                    }
                    None => continue,
                },
            };
            check_type(param, &value)?;
            values.insert(param.name.to_string(), value);
        }

        for name in provided.keys() {
            if spec.param(name).is_none() {
                debug!("Ignoring unknown argument '{}' for {}", name, spec.name);
            }
        }

        Ok(Self { values })
    }

    pub fn str(&self, name: &str) -> &str {
        self.opt_str(name).unwrap_or_default()
    }

    pub fn opt_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    pub fn int(&self, name: &str) -> i64 {
        self.values.get(name).and_then(Value::as_i64).unwrap_or_default()
    }

    pub fn bool(&self, name: &str) -> bool {
        self.values
            .get(name)
            .and_then(Value::as_bool)
            .unwrap_or_default()
    }

    /// Item counts must fit in `u32` and cannot be negative.
    pub fn limit(&self, name: &str) -> Result<u32, OperationError> {
        let value = self.int(name);
        u32::try_from(value).map_err(|_| {
            OperationError::invalid_argument(
                name,
                format!("Parameter '{}' must be a non-negative integer, got {}.", name, value),
            )
        })
    }
}

fn check_type(param: &ParamSpec, value: &Value) -> Result<(), OperationError> {
    let ok = match param.ty {
        ParamType::String => match value.as_str() {
            Some(s) if param.required && s.trim().is_empty() => {
                return Err(OperationError::invalid_argument(
                    param.name,
                    format!("Parameter '{}' must not be empty.", param.name),
                ))
            }
            Some(_) => true,
            None => false,
        },
        ParamType::Integer => value.is_i64(),
        ParamType::Boolean => value.is_boolean(),
    };
    if ok {
        Ok(())
    } else {
        Err(OperationError::invalid_argument(
            param.name,
            format!(
                "Parameter '{}' must be of type {}.",
                param.name,
                param.ty.schema_name()
            ),
        ))
    }
}

/// 工具名稱到操作的對應表
pub struct ToolRegistry<C: RedditClient> {
    toolkit: RedditToolkit<C>,
    specs: Vec<ToolSpec>,
}

impl<C: RedditClient> ToolRegistry<C> {
    pub fn new(toolkit: RedditToolkit<C>) -> Self {
        Self {
            toolkit,
            specs: catalog(),
        }
    }

    pub fn toolkit(&self) -> &RedditToolkit<C> {
        &self.toolkit
    }

    pub fn definitions(&self) -> Vec<Tool> {
        self.specs.iter().map(ToolSpec::definition).collect()
    }

    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    /// Runs one tool. Only an unknown name is an `Err`; every other failure is a
    /// failure envelope.
    pub async fn call(&self, name: &str, arguments: &Value) -> Result<Envelope, UnknownTool> {
        let spec = self
            .get(name)
            .ok_or_else(|| UnknownTool(name.to_string()))?;
        info!("🔧 Calling tool: {}", name);

        let result = match ToolArgs::bind(spec, arguments) {
            Ok(args) => self.dispatch(name, &args).await,
            Err(e) => Err(e),
        };
        match &result {
            Ok(_) => debug!("✅ {} succeeded", name),
            Err(e) if e.is_validation() => debug!("⚠️ {} rejected: {}", name, e),
            Err(e) => debug!("❌ {} failed: {}", name, e),
        }
        Ok(Envelope::from(result))
    }

    async fn dispatch(&self, name: &str, args: &ToolArgs) -> OperationResult {
        let t = &self.toolkit;
        match name {
            "get_hot_posts" => t.get_hot_posts(args.str("subreddit"), args.limit("limit")?).await,
            "retrieve_reddit_posts" => {
                t.retrieve_reddit_posts(args.str("subreddit"), args.limit("size")?)
                    .await
            }
            "get_new_submissions" => {
                t.get_new_submissions(args.str("subreddit"), args.limit("limit")?)
                    .await
            }
            "get_top_posts" => {
                t.get_top_posts(
                    args.str("subreddit"),
                    args.str("time_filter"),
                    args.limit("limit")?,
                )
                .await
            }
            "get_controversial_posts" => {
                t.get_controversial_posts(
                    args.str("subreddit"),
                    args.str("time_filter"),
                    args.limit("limit")?,
                )
                .await
            }
            "get_rising_posts" => {
                t.get_rising_posts(args.str("subreddit"), args.limit("limit")?)
                    .await
            }
            "get_subreddit_listings" => {
                t.get_subreddit_listings(
                    args.str("subreddit"),
                    args.str("listing_type"),
                    args.opt_str("time_filter"),
                    args.limit("limit")?,
                )
                .await
            }
            "get_trending_posts" => t.get_trending_posts(args.limit("limit")?).await,
            "get_best_feed" => t.get_best_feed(args.limit("limit")?).await,
            "get_multireddit_posts" => {
                t.get_multireddit_posts(args.str("multireddit_name"), args.limit("limit")?)
                    .await
            }
            "get_random_post" => t.get_random_post(args.str("subreddit")).await,
            "search_across_subreddits" => {
                t.search_across_subreddits(
                    args.str("search_query"),
                    args.limit("limit")?,
                    args.bool("restrict_sr"),
                    args.str("sort"),
                )
                .await
            }

            "create_reddit_post" => {
                t.create_reddit_post(
                    args.str("subreddit"),
                    args.str("title"),
                    args.str("kind"),
                    args.opt_str("text"),
                    args.opt_str("url"),
                    args.opt_str("flair_id"),
                )
                .await
            }
            "delete_reddit_comment" => t.delete_reddit_comment(args.str("id")).await,
            "delete_reddit_post" => t.delete_reddit_post(args.str("id")).await,
            "edit_reddit_content" => {
                t.edit_reddit_content(args.str("thing_id"), args.str("text"))
                    .await
            }
            "post_reddit_comment" => {
                t.post_reddit_comment(args.str("thing_id"), args.str("text"))
                    .await
            }
            "retrieve_post_comments" => t.retrieve_post_comments(args.str("article")).await,
            "retrieve_specific_content" => t.retrieve_specific_content(args.str("id")).await,
            "get_submission_details" => {
                t.get_submission_details(args.str("submission_id")).await
            }
            "vote_on_content" => {
                t.vote_on_content(args.str("fullname"), args.int("direction"))
                    .await
            }
            "crosspost_submission" => {
                t.crosspost_submission(
                    args.str("post_id"),
                    args.str("subreddit"),
                    args.opt_str("title"),
                )
                .await
            }
            "find_best_answer_in_post" => {
                t.find_best_answer_in_post(args.str("post_id"), args.str("strategy"))
                    .await
            }

            "get_user_info" => t.get_user_info(args.str("username")).await,
            "get_user_comments" => {
                t.get_user_comments(args.str("username"), args.limit("limit")?)
                    .await
            }
            "get_redditor_trophies" => t.get_redditor_trophies(args.str("username")).await,
            "get_user_gilded_content" => {
                t.get_user_gilded_content(args.str("username"), args.limit("limit")?)
                    .await
            }
            "get_user_follower_count" => t.get_user_follower_count(args.str("username")).await,
            "get_reddit_age" => {
                t.get_reddit_age(args.str("name"), args.str("item_type"))
                    .await
            }
            "get_blocked_users" => t.get_blocked_users().await,
            "list_user_friends" => t.list_user_friends().await,
            "get_my_upvoted_content" => t.get_my_upvoted_content(args.limit("limit")?).await,
            "get_my_downvoted_content" => t.get_my_downvoted_content(args.limit("limit")?).await,
            "list_multireddits" => t.list_multireddits().await,
            "get_moderated_subs" => t.get_moderated_subs(args.limit("limit")?).await,

            "get_subreddit_details" => t.get_subreddit_details(args.str("subreddit")).await,
            "get_subreddit_sidebar" => t.get_subreddit_sidebar(args.str("subreddit")).await,
            "get_subreddit_rules" => t.get_subreddit_rules(args.str("subreddit")).await,
            "get_link_flair" => t.get_link_flair(args.str("subreddit")).await,
            "get_user_flair" => {
                t.get_user_flair(args.str("subreddit"), args.str("username"))
                    .await
            }
            "get_moderators" => t.get_moderators(args.str("subreddit")).await,
            "search_subreddits" => {
                t.search_subreddits(args.str("query"), args.limit("limit")?)
                    .await
            }
            "get_subreddits_by_topic" => {
                t.get_subreddits_by_topic(args.str("topic"), args.limit("limit")?)
                    .await
            }
            "find_communities_by_topic" => {
                t.find_communities_by_topic(args.str("topic"), args.limit("limit")?)
                    .await
            }
            "get_community_age_rating" => {
                t.get_community_age_rating(args.str("subreddit")).await
            }

            "send_private_message" => {
                t.send_private_message(
                    args.str("recipient"),
                    args.str("subject"),
                    args.str("message"),
                )
                .await
            }
            "send_mod_mail" => {
                t.send_mod_mail(
                    args.str("subreddit"),
                    args.str("subject"),
                    args.str("message"),
                )
                .await
            }
            "get_unread_messages" => t.get_unread_messages(args.limit("limit")?).await,
            "get_my_notifications" => {
                t.get_my_notifications(args.str("filter_type"), args.limit("limit")?)
                    .await
            }
            "list_modmail_conversations" => {
                t.list_modmail_conversations(args.str("subreddit"), args.limit("limit")?)
                    .await
            }
            "reply_to_modmail_conversation" => {
                t.reply_to_modmail_conversation(
                    args.str("conversation_id"),
                    args.str("body"),
                    args.bool("is_author_hidden"),
                )
                .await
            }

            "get_subreddit_traffic_stats" => {
                t.get_subreddit_traffic_stats(args.str("subreddit")).await
            }
            "create_post_collection" => {
                t.create_post_collection(
                    args.str("subreddit"),
                    args.str("title"),
                    args.str("description"),
                )
                .await
            }
            "add_post_to_collection" => {
                t.add_post_to_collection(args.str("collection_id"), args.str("post_id"))
                    .await
            }
            "sticky_post" => {
                t.sticky_post(args.str("post_id"), args.bool("state"), args.int("slot"))
                    .await
            }
            "add_wiki_editor" => {
                t.add_wiki_editor(args.str("subreddit"), args.str("username"))
                    .await
            }
            "list_approved_submitters" => {
                t.list_approved_submitters(args.str("subreddit")).await
            }
            "list_wiki_pages" => t.list_wiki_pages(args.str("subreddit")).await,
            "get_moderation_log" => {
                t.get_moderation_log(args.str("subreddit"), args.limit("limit")?)
                    .await
            }
            "list_muted_users" => t.list_muted_users(args.str("subreddit")).await,
            "ignore_reports_on_content" => {
                t.ignore_reports_on_content(args.str("content_id")).await
            }
            "delete_flair_template" => {
                t.delete_flair_template(args.str("subreddit"), args.str("flair_template_id"))
                    .await
            }
            "update_subreddit_rule" => {
                t.update_subreddit_rule(
                    args.str("subreddit"),
                    args.str("short_name"),
                    args.opt_str("new_description"),
                )
                .await
            }
            other => Err(OperationError::Failed(format!(
                "Tool '{}' is declared but has no handler.",
                other
            ))),
        }
    }
}
