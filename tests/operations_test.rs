mod common;

use common::{comment, posts, registry, submission, toolkit, StubClient};
use reddit_tools::core::OperationError;
use reddit_tools::domain::model::*;
use reddit_tools::Envelope;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_hot_posts_respects_limit() {
    let (toolkit, client) = toolkit(StubClient {
        posts: posts(10),
        ..Default::default()
    });

    let data = assert_ok!(toolkit.get_hot_posts("rust", 3).await);
    let records = data.as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["title"], "Post 1");
    assert_eq!(records[0]["author"], "poster");
    assert!(records[0].get("url").is_some());
    assert_eq!(client.calls(), vec!["subreddit_listing rust hot - 3"]);
}

#[tokio::test]
async fn test_invalid_time_filter_makes_no_calls() {
    let (registry, client) = registry(StubClient::default());

    let envelope = registry
        .call(
            "get_top_posts",
            &json!({"subreddit": "python", "time_filter": "century"}),
        )
        .await
        .unwrap();

    assert!(!envelope.successful);
    assert_eq!(envelope.data, json!({}));
    let error = envelope.error.unwrap();
    assert!(error.contains("century"));
    assert!(error.contains("'hour', 'day', 'week', 'month', 'year', or 'all'"));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_top_posts_passes_time_window() {
    let (toolkit, client) = toolkit(StubClient {
        posts: posts(2),
        ..Default::default()
    });

    assert_ok!(toolkit.get_top_posts("python", "week", 10).await);
    assert_eq!(client.calls(), vec!["subreddit_listing python top week 10"]);
}

#[tokio::test]
async fn test_subreddit_listings_default_time_filter() {
    let (toolkit, client) = toolkit(StubClient {
        posts: posts(1),
        ..Default::default()
    });

    assert_ok!(
        toolkit
            .get_subreddit_listings("rust", "Controversial", None, 5)
            .await
    );
    assert_ok!(
        toolkit
            .get_subreddit_listings("rust", "new", Some("year"), 5)
            .await
    );
    assert_eq!(
        client.calls(),
        vec![
            "subreddit_listing rust controversial day 5",
            "subreddit_listing rust new - 5",
        ]
    );

    let err = assert_err!(toolkit.get_subreddit_listings("rust", "best", None, 5).await);
    assert!(err.is_validation());
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn test_self_post_requires_text() {
    let (toolkit, client) = toolkit(StubClient::default());

    let err = assert_err!(
        toolkit
            .create_reddit_post("test", "Hello", "self", None, None, None)
            .await
    );
    assert_eq!(
        err.to_string(),
        "For 'self' posts, the 'text' parameter is required."
    );

    let err = assert_err!(
        toolkit
            .create_reddit_post("test", "Hello", "link", None, Some(""), None)
            .await
    );
    assert_eq!(
        err.to_string(),
        "For 'link' posts, the 'url' parameter is required."
    );
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_create_post_returns_id_and_url() {
    let (toolkit, client) = toolkit(StubClient::default());

    let data = assert_ok!(
        toolkit
            .create_reddit_post("test", "Hello", "SELF", Some("body"), None, None)
            .await
    );
    assert_eq!(data["post_id"], "new1");
    assert_eq!(
        data["full_url"],
        "https://www.reddit.com/r/test/comments/new1/"
    );
    assert_eq!(client.calls(), vec![r#"submit test SelfText("body")"#]);
}

#[tokio::test]
async fn test_vote_rejects_bad_direction() {
    let (toolkit, client) = toolkit(StubClient::default());

    let err = assert_err!(toolkit.vote_on_content("t3_abc", 2).await);
    assert!(err.to_string().contains("Must be 1, -1, or 0"));
    assert_eq!(client.call_count(), 0);

    let data = assert_ok!(toolkit.vote_on_content("t1_abc", -1).await);
    assert_eq!(data, json!({"status": "Vote of -1 cast on t1_abc."}));
    assert_ok!(toolkit.vote_on_content("abc", 0).await);
    assert_eq!(client.calls(), vec!["vote t1_abc -1", "vote t3_abc 0"]);
}

#[tokio::test]
async fn test_comment_requires_fullname_prefix() {
    let (toolkit, client) = toolkit(StubClient::default());

    let err = assert_err!(toolkit.post_reddit_comment("xyz", "hi").await);
    assert!(matches!(err, OperationError::InvalidIdentifier { .. }));
    assert!(err.to_string().contains("'t1_' or 't3_'"));

    assert_err!(toolkit.edit_reddit_content("t2_abc", "new").await);
    let err = assert_err!(toolkit.edit_reddit_content("xyz", "new").await);
    assert_eq!(
        err.to_string(),
        "Invalid 'thing_id' format: 'xyz'. Must start with 't1_' or 't3_'."
    );
    assert_eq!(client.call_count(), 0);

    let data = assert_ok!(toolkit.post_reddit_comment("t3_p1", "hi").await);
    assert_eq!(data["comment_id"], "c9");
    assert_eq!(data["fullname"], "t1_c9");
}

#[tokio::test]
async fn test_validation_messages_name_the_value() {
    let (toolkit, client) = toolkit(StubClient::default());

    let err = assert_err!(
        toolkit
            .create_reddit_post("test", "T", "video", Some("x"), None, None)
            .await
    );
    assert_eq!(err.to_string(), "Invalid kind 'video'. Use 'self' or 'link'.");

    let err = assert_err!(toolkit.get_reddit_age("spez", "group").await);
    assert_eq!(
        err.to_string(),
        "Invalid item_type 'group'. Use 'user' or 'subreddit'."
    );

    let err = assert_err!(toolkit.vote_on_content("t3_abc", 2).await);
    assert_eq!(err.to_string(), "Invalid direction '2'. Must be 1, -1, or 0.");
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_ids_of_the_wrong_kind_make_no_calls() {
    let (toolkit, client) = toolkit(StubClient::default());

    let err = assert_err!(toolkit.vote_on_content("t2_abc", 1).await);
    assert!(matches!(err, OperationError::InvalidIdentifier { .. }));
    assert_err!(toolkit.ignore_reports_on_content("t5_xyz").await);
    assert_err!(toolkit.delete_reddit_post("t1_abc").await);
    assert_err!(toolkit.delete_reddit_comment("t3_abc").await);
    assert_err!(toolkit.sticky_post("t1_abc", true, 1).await);
    assert_err!(toolkit.add_post_to_collection("col-1", "t2_abc").await);
    assert_err!(toolkit.get_submission_details("t5_rust").await);
    assert_eq!(client.call_count(), 0);

    assert_ok!(toolkit.ignore_reports_on_content("t3_p1").await);
    assert_ok!(toolkit.ignore_reports_on_content("c1").await);
    assert_ok!(toolkit.delete_reddit_post("t3_abc").await);
    assert_eq!(
        client.calls(),
        vec!["ignore_reports t3_p1", "ignore_reports t1_c1", "delete t3_abc"]
    );
}

#[tokio::test]
async fn test_client_failure_becomes_failure_envelope() {
    let (toolkit, _client) = toolkit(StubClient::failing("Forbidden"));

    let envelope = Envelope::from(toolkit.delete_reddit_comment("abc").await);
    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({
            "successful": false,
            "data": {},
            "error": "Failed to delete comment: received 500 HTTP response: Forbidden",
        })
    );
}

#[tokio::test]
async fn test_reads_are_repeatable() {
    let (toolkit, client) = toolkit(StubClient {
        posts: posts(4),
        ..Default::default()
    });

    let first = toolkit.get_rising_posts("rust", 4).await.unwrap();
    let second = toolkit.get_rising_posts("rust", 4).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn test_not_found_results_are_successful_statuses() {
    let (toolkit, _client) = toolkit(StubClient::default());

    let data = assert_ok!(toolkit.get_random_post("rust").await);
    assert_eq!(
        data["status"],
        "Subreddit may not support random mode or is empty."
    );

    let data = assert_ok!(toolkit.retrieve_specific_content("t3_gone").await);
    assert_eq!(data["status"], "Content not found for ID: t3_gone.");

    let data = assert_ok!(toolkit.get_user_flair("rust", "ferris").await);
    assert_eq!(
        data["status"],
        "User 'ferris' has no flair set in this subreddit."
    );
}

#[tokio::test]
async fn test_specific_content_projects_comment() {
    let (toolkit, _client) = toolkit(StubClient {
        thing: Some(Thing::Comment(comment("c1", "t3_p1", "alice", "hello"))),
        ..Default::default()
    });

    let data = assert_ok!(toolkit.retrieve_specific_content("t1_c1").await);
    assert_eq!(data["object_type"], "t1");
    assert_eq!(data["fullname"], "t1_c1");
    assert_eq!(data["body"], "hello");
    assert!(data.get("title").is_none());
}

fn answer_forest() -> CommentForest {
    let mut moderator = comment("m1", "t1_c1", "modbot", "Locked.");
    moderator.distinguished = Some("moderator".to_string());
    CommentForest {
        submission: Submission {
            author: Some("asker".to_string()),
            ..submission("p1", "How do lifetimes work?")
        },
        comments: vec![
            comment("c1", "t3_p1", "helper", "Read the book."),
            moderator,
            comment("c2", "t3_p1", "other", "Me too."),
            comment("o1", "t1_c2", "asker", "Thanks!"),
        ],
    }
}

#[tokio::test]
async fn test_find_best_answer_strategies() {
    let (toolkit, _client) = toolkit(StubClient {
        forest: answer_forest(),
        ..Default::default()
    });

    let top = assert_ok!(toolkit.find_best_answer_in_post("p1", "top_voted").await);
    assert_eq!(top["comment_id"], "c1");
    assert_eq!(top["strategy_used"], "top_voted");
    assert_eq!(top["is_op"], false);

    let op = assert_ok!(toolkit.find_best_answer_in_post("p1", "op_reply").await);
    assert_eq!(op["comment_id"], "o1");
    assert_eq!(op["is_op"], true);

    let moderator = assert_ok!(toolkit.find_best_answer_in_post("p1", "mod_reply").await);
    assert_eq!(moderator["comment_id"], "m1");
    assert_eq!(moderator["is_mod"], true);

    let err = assert_err!(toolkit.find_best_answer_in_post("p1", "longest").await);
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_find_best_answer_without_match() {
    let (toolkit, _client) = toolkit(StubClient {
        forest: CommentForest {
            submission: submission("p1", "Empty thread"),
            comments: vec![],
        },
        ..Default::default()
    });

    let data = assert_ok!(toolkit.find_best_answer_in_post("p1", "mod_reply").await);
    assert_eq!(
        data,
        json!({"status": "No answer found using strategy 'mod_reply'."})
    );
}

#[tokio::test]
async fn test_post_comments_breadth_first() {
    let (toolkit, _client) = toolkit(StubClient {
        forest: answer_forest(),
        ..Default::default()
    });

    let data = assert_ok!(toolkit.retrieve_post_comments("p1").await);
    let ids: Vec<_> = data
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["comment_id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["c1", "c2", "m1", "o1"]);
}

#[tokio::test]
async fn test_update_rule_not_found_is_failure() {
    let (toolkit, client) = toolkit(StubClient {
        rules: vec![SubredditRule {
            short_name: "Be civil".to_string(),
            ..Default::default()
        }],
        ..Default::default()
    });

    let err = assert_err!(
        toolkit
            .update_subreddit_rule("rust", "No spam", Some("x"))
            .await
    );
    assert_eq!(err.to_string(), "Rule with short_name 'No spam' not found.");

    let data = assert_ok!(
        toolkit
            .update_subreddit_rule("rust", "Be civil", Some("Be kind."))
            .await
    );
    assert_eq!(data["status"], "Rule 'Be civil' in r/rust has been updated.");
    assert_eq!(
        client.calls(),
        vec![
            "subreddit_rules rust",
            "subreddit_rules rust",
            "update_rule rust Be civil Be kind.",
        ]
    );
}

#[tokio::test]
async fn test_sticky_slots() {
    let (toolkit, client) = toolkit(StubClient::default());

    let err = assert_err!(toolkit.sticky_post("p1", true, 3).await);
    assert_eq!(err.to_string(), "Invalid slot '3'. Must be 1 or 2.");

    let data = assert_ok!(toolkit.sticky_post("p1", true, 2).await);
    assert_eq!(data["status"], "Post 'p1' has been Stickied in slot 2.");
    assert_ok!(toolkit.sticky_post("t3_p1", false, 1).await);
    assert_eq!(
        client.calls(),
        vec!["set_sticky t3_p1 true true", "set_sticky t3_p1 false false"]
    );
}

#[tokio::test]
async fn test_follower_count_without_profile() {
    let (toolkit, _client) = toolkit(StubClient {
        user: Redditor {
            name: "ferris".to_string(),
            ..Default::default()
        },
        ..Default::default()
    });

    let data = assert_ok!(toolkit.get_user_follower_count("ferris").await);
    assert_eq!(data, json!({"username": "ferris", "follower_count": null}));
}

#[tokio::test]
async fn test_unread_messages_preview() {
    let (toolkit, client) = toolkit(StubClient {
        inbox: vec![
            InboxItem {
                id: "m1".to_string(),
                name: "t4_m1".to_string(),
                body: Some("x".repeat(150)),
                ..Default::default()
            },
            InboxItem {
                id: "c1".to_string(),
                name: "t1_c1".to_string(),
                author: Some("alice".to_string()),
                subject: Some("comment reply".to_string()),
                ..Default::default()
            },
        ],
        ..Default::default()
    });

    let data = assert_ok!(toolkit.get_unread_messages(10).await);
    let items = data.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["type"], "t4");
    assert_eq!(items[0]["author"], "Reddit");
    assert_eq!(items[0]["subject"], "N/A");
    assert_eq!(items[0]["text_preview"].as_str().unwrap().len(), 100);
    assert_eq!(items[1]["text_preview"], "comment reply");
    assert_eq!(client.calls(), vec!["inbox unread 10"]);
}

#[tokio::test]
async fn test_mod_mail_goes_to_subreddit() {
    let (toolkit, client) = toolkit(StubClient::default());

    let data = assert_ok!(toolkit.send_mod_mail("rust", "Hi", "Question").await);
    assert_eq!(
        data["status"],
        "Modmail sent successfully to moderators of r/rust."
    );
    assert_eq!(client.calls(), vec!["send_message /r/rust Hi Question"]);
}

#[tokio::test]
async fn test_find_communities_looks_up_each() {
    let (toolkit, client) = toolkit(StubClient {
        topic_names: vec!["rust".to_string(), "learnrust".to_string(), "c_programming".to_string()],
        subreddit: SubredditInfo {
            display_name: "rust".to_string(),
            subscribers: Some(300_000),
            ..Default::default()
        },
        ..Default::default()
    });

    let data = assert_ok!(toolkit.find_communities_by_topic("rust", 2).await);
    assert_eq!(data.as_array().unwrap().len(), 2);
    assert_eq!(
        client.calls(),
        vec![
            "subreddits_by_topic rust",
            "subreddit_about rust",
            "subreddit_about learnrust",
        ]
    );
}

#[tokio::test]
async fn test_registry_applies_defaults() {
    let (registry, client) = registry(StubClient {
        posts: posts(20),
        ..Default::default()
    });

    let envelope = registry
        .call("get_hot_posts", &json!({"subreddit": "rust"}))
        .await
        .unwrap();
    assert!(envelope.successful);
    assert_eq!(envelope.data.as_array().unwrap().len(), 5);

    registry
        .call("get_top_posts", &json!({"subreddit": "rust"}))
        .await
        .unwrap();
    assert_eq!(
        client.calls(),
        vec![
            "subreddit_listing rust hot - 5",
            "subreddit_listing rust top day 10",
        ]
    );
}

#[tokio::test]
async fn test_registry_rejects_bad_arguments() {
    let (registry, client) = registry(StubClient::default());

    let missing = registry.call("get_hot_posts", &json!({})).await.unwrap();
    assert_eq!(
        missing.error.as_deref(),
        Some("Missing required parameter 'subreddit'.")
    );

    let empty = registry
        .call("get_user_info", &json!({"username": ""}))
        .await
        .unwrap();
    assert!(!empty.successful);

    let wrong_type = registry
        .call("get_hot_posts", &json!({"subreddit": "rust", "limit": "five"}))
        .await
        .unwrap();
    assert!(!wrong_type.successful);

    let negative = registry
        .call("get_hot_posts", &json!({"subreddit": "rust", "limit": -1}))
        .await
        .unwrap();
    assert!(!negative.successful);

    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_registry_unknown_tool() {
    let (registry, _client) = registry(StubClient::default());

    let err = registry
        .call("get_cold_posts", &json!({}))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Unknown tool: get_cold_posts");
}

/// 每個參數都給合法值，讓呼叫一定會走到客戶端
fn valid_arguments(spec: &reddit_tools::core::ToolSpec) -> serde_json::Value {
    use reddit_tools::core::catalog::ParamType;

    let mut arguments = serde_json::Map::new();
    for param in &spec.params {
        let value = match (param.ty, param.name) {
            (ParamType::String, "thing_id" | "fullname" | "content_id") => json!("t3_abc"),
            (ParamType::String, "kind") => json!("self"),
            (ParamType::String, "time_filter") => json!("day"),
            (ParamType::String, "listing_type") => json!("hot"),
            (ParamType::String, "sort") => json!("relevance"),
            (ParamType::String, "strategy") => json!("top_voted"),
            (ParamType::String, "filter_type") => json!("all"),
            (ParamType::String, "item_type") => json!("user"),
            (ParamType::String, _) => json!("value"),
            (ParamType::Integer, "direction" | "slot") => json!(1),
            (ParamType::Integer, _) => json!(5),
            (ParamType::Boolean, _) => json!(true),
        };
        arguments.insert(param.name.to_string(), value);
    }
    serde_json::Value::Object(arguments)
}

#[tokio::test]
async fn test_client_failures_never_escape() {
    let (registry, client) = registry(StubClient::failing("Too Many Requests"));

    for definition in registry.definitions() {
        let spec = registry.get(&definition.name).unwrap();
        let before = client.call_count();
        let envelope = registry
            .call(&definition.name, &valid_arguments(spec))
            .await
            .unwrap();

        assert!(!envelope.successful, "{} reported success", definition.name);
        assert_eq!(envelope.data, json!({}));
        assert!(
            envelope.error.as_deref().unwrap().contains("Too Many Requests"),
            "{}: {:?}",
            definition.name,
            envelope.error
        );
        assert!(client.call_count() > before, "{} made no call", definition.name);
    }
}

#[tokio::test]
async fn test_registry_dispatches_every_tool() {
    let (registry, _client) = registry(StubClient::default());

    // 每個工具都應被分派到實作，而非 UnknownTool
    for definition in registry.definitions() {
        let result = registry.call(&definition.name, &json!({})).await;
        assert!(result.is_ok(), "tool {} is not dispatched", definition.name);
    }
}

/// 列舉型參數給非法值時，不論哪個工具都不能碰到客戶端
#[tokio::test]
async fn test_illegal_choices_never_reach_the_client() {
    let (registry, client) = registry(StubClient::default());
    let mut checked = 0;

    for definition in registry.definitions() {
        let spec = registry.get(&definition.name).unwrap();
        for param in &spec.params {
            let illegal = match param.name {
                "time_filter" | "listing_type" | "sort" | "strategy" | "filter_type" | "kind"
                | "item_type" => json!("century"),
                "direction" | "slot" => json!(7),
                _ => continue,
            };
            let mut arguments = valid_arguments(spec);
            arguments[param.name] = illegal;

            let envelope = registry.call(&definition.name, &arguments).await.unwrap();
            assert!(
                !envelope.successful,
                "{} accepted {}={}",
                definition.name, param.name, arguments[param.name]
            );
            assert_eq!(envelope.data, json!({}));
            assert_eq!(
                client.call_count(),
                0,
                "{} called the client with an illegal {}",
                definition.name,
                param.name
            );
            checked += 1;
        }
    }
    assert!(checked >= 12, "only {} choice parameters found", checked);
}
