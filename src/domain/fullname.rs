use std::fmt;

/// Type tag carried by a fullname prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThingKind {
    Comment,
    Account,
    Submission,
    Message,
    Subreddit,
    Award,
}

impl ThingKind {
    pub fn prefix(self) -> &'static str {
        match self {
            ThingKind::Comment => "t1",
            ThingKind::Account => "t2",
            ThingKind::Submission => "t3",
            ThingKind::Message => "t4",
            ThingKind::Subreddit => "t5",
            ThingKind::Award => "t6",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "t1" => Some(ThingKind::Comment),
            "t2" => Some(ThingKind::Account),
            "t3" => Some(ThingKind::Submission),
            "t4" => Some(ThingKind::Message),
            "t5" => Some(ThingKind::Subreddit),
            "t6" => Some(ThingKind::Award),
            _ => None,
        }
    }
}

/// 帶型別前綴的識別碼，例如 `t1_abc`（留言）或 `t3_abc`（貼文）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fullname {
    kind: ThingKind,
    id: String,
}

impl Fullname {
    pub fn new(kind: ThingKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    /// Parses `tN_<id>`. Returns `None` for unknown prefixes or an empty id.
    pub fn parse(value: &str) -> Option<Self> {
        let (prefix, id) = value.split_once('_')?;
        let kind = ThingKind::from_prefix(prefix)?;
        if id.is_empty() {
            return None;
        }
        Some(Self::new(kind, id))
    }

    /// Accepts either a bare id or a fullname of the expected kind.
    /// A fullname carrying some other known prefix yields `None`.
    pub fn with_default_kind(value: &str, kind: ThingKind) -> Option<Self> {
        match Self::parse(value) {
            Some(fullname) if fullname.kind == kind => Some(fullname),
            Some(_) => None,
            None => Some(Self::new(kind, value)),
        }
    }

    pub fn submission(value: &str) -> Option<Self> {
        Self::with_default_kind(value, ThingKind::Submission)
    }

    pub fn comment(value: &str) -> Option<Self> {
        Self::with_default_kind(value, ThingKind::Comment)
    }

    pub fn kind(&self) -> ThingKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Fullname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.kind.prefix(), self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_prefixes() {
        let comment = Fullname::parse("t1_abc").unwrap();
        assert_eq!(comment.kind(), ThingKind::Comment);
        assert_eq!(comment.id(), "abc");

        let post = Fullname::parse("t3_1nrzroo").unwrap();
        assert_eq!(post.kind(), ThingKind::Submission);
        assert_eq!(post.to_string(), "t3_1nrzroo");
    }

    #[test]
    fn test_parse_rejects_unknown_shapes() {
        assert!(Fullname::parse("xyz").is_none());
        assert!(Fullname::parse("t9_abc").is_none());
        assert!(Fullname::parse("t3_").is_none());
    }

    #[test]
    fn test_bare_ids_get_default_kind() {
        assert_eq!(Fullname::submission("abc").unwrap().to_string(), "t3_abc");
        assert_eq!(Fullname::submission("t3_abc").unwrap().to_string(), "t3_abc");
        assert_eq!(Fullname::comment("t1_abc").unwrap().id(), "abc");
    }

    #[test]
    fn test_other_known_prefix_is_not_rewrapped() {
        assert_eq!(Fullname::submission("t1_abc"), None);
        assert_eq!(Fullname::comment("t3_abc"), None);
        assert_eq!(Fullname::comment("t5_rust"), None);
        // 未知前綴仍視為裸 id
        assert_eq!(Fullname::comment("t9_abc").unwrap().to_string(), "t1_t9_abc");
    }
}
