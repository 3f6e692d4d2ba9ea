use crate::core::envelope::OperationError;
use crate::domain::fullname::{Fullname, ThingKind};
use crate::domain::ports::RedditClient;
use std::sync::Arc;

/// 所有操作的入口，持有注入的平台客戶端
///
/// The toolkit keeps no state of its own; the client handle is shared read-only, so a
/// toolkit can be cloned freely and every call is independent of the previous ones.
pub struct RedditToolkit<C: RedditClient> {
    pub(crate) client: Arc<C>,
}

impl<C: RedditClient> RedditToolkit<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C: RedditClient> Clone for RedditToolkit<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

pub(crate) const DELETED_AUTHOR: &str = "[deleted]";

pub(crate) fn author_name(author: &Option<String>) -> String {
    author.clone().unwrap_or_else(|| DELETED_AUTHOR.to_string())
}

/// Author of a live account, `None` for missing or deleted authors.
pub(crate) fn live_author(author: &Option<String>) -> Option<&str> {
    author.as_deref().filter(|name| *name != DELETED_AUTHOR)
}

/// 依字元（非位元組）截斷
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn is_post_or_comment(fullname: &Fullname) -> bool {
    matches!(fullname.kind(), ThingKind::Comment | ThingKind::Submission)
}

/// Strict post-or-comment dispatch: only `t1_` and `t3_` fullnames are accepted.
pub(crate) fn post_or_comment(
    field: &'static str,
    value: &str,
) -> Result<Fullname, OperationError> {
    match Fullname::parse(value) {
        Some(fullname) if is_post_or_comment(&fullname) => Ok(fullname),
        _ => Err(OperationError::InvalidIdentifier {
            field,
            value: value.to_string(),
            expected: "'t1_' or 't3_'",
        }),
    }
}

/// 單一型別的 id：裸 id 補上前綴，其他型別的 fullname 直接拒絕
pub(crate) fn fullname_of(
    field: &'static str,
    value: &str,
    kind: ThingKind,
) -> Result<Fullname, OperationError> {
    Fullname::with_default_kind(value, kind).ok_or_else(|| OperationError::InvalidIdentifier {
        field,
        value: value.to_string(),
        expected: match kind {
            ThingKind::Comment => "'t1_' or be a bare comment id",
            _ => "'t3_' or be a bare post id",
        },
    })
}

/// Post-or-comment id where a bare id falls back to `default`.
pub(crate) fn post_or_comment_or(
    field: &'static str,
    value: &str,
    default: ThingKind,
) -> Result<Fullname, OperationError> {
    match Fullname::parse(value) {
        Some(fullname) if is_post_or_comment(&fullname) => Ok(fullname),
        Some(_) => Err(OperationError::InvalidIdentifier {
            field,
            value: value.to_string(),
            expected: "'t1_' or 't3_'",
        }),
        None => Ok(Fullname::new(default, value)),
    }
}
