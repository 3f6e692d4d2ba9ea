use std::fmt;

/// 參數值不在允許集合內
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidChoice {
    pub field: &'static str,
    pub value: String,
    pub allowed: String,
}

impl fmt::Display for InvalidChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid {} '{}'. Use {}.",
            self.field, self.value, self.allowed
        )
    }
}

impl std::error::Error for InvalidChoice {}

/// `'a', 'b', or 'c'`
pub fn quoted_list(values: &[&str]) -> String {
    let quoted: Vec<String> = values.iter().map(|v| format!("'{}'", v)).collect();
    match quoted.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} or {}", first, second),
        [init @ .., last] => format!("{}, or {}", init.join(", "), last),
    }
}

/// String parameter restricted to a fixed set of values.
pub trait Choice: Copy + PartialEq + 'static {
    const FIELD: &'static str;
    const VARIANTS: &'static [(&'static str, Self)];
    const CASE_INSENSITIVE: bool = false;

    fn parse_choice(value: &str) -> Result<Self, InvalidChoice> {
        let candidate = if Self::CASE_INSENSITIVE {
            value.to_lowercase()
        } else {
            value.to_string()
        };
        Self::VARIANTS
            .iter()
            .find(|(name, _)| *name == candidate)
            .map(|(_, variant)| *variant)
            .ok_or_else(|| InvalidChoice {
                field: Self::FIELD,
                value: value.to_string(),
                allowed: quoted_list(&Self::names()),
            })
    }

    fn as_str(self) -> &'static str {
        Self::VARIANTS
            .iter()
            .find(|(_, variant)| *variant == self)
            .map(|(name, _)| *name)
            .unwrap_or_default()
    }

    fn names() -> Vec<&'static str> {
        Self::VARIANTS.iter().map(|(name, _)| *name).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFilter {
    Hour,
    #[default]
    Day,
    Week,
    Month,
    Year,
    All,
}

impl Choice for TimeFilter {
    const FIELD: &'static str = "time_filter";
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("hour", TimeFilter::Hour),
        ("day", TimeFilter::Day),
        ("week", TimeFilter::Week),
        ("month", TimeFilter::Month),
        ("year", TimeFilter::Year),
        ("all", TimeFilter::All),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingType {
    Hot,
    Top,
    New,
    Rising,
    Controversial,
}

impl Choice for ListingType {
    const FIELD: &'static str = "listing_type";
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("hot", ListingType::Hot),
        ("top", ListingType::Top),
        ("new", ListingType::New),
        ("rising", ListingType::Rising),
        ("controversial", ListingType::Controversial),
    ];
    const CASE_INSENSITIVE: bool = true;
}

/// Listing endpoint of a subreddit, with its time window where one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingSort {
    Hot,
    New,
    Rising,
    Top(TimeFilter),
    Controversial(TimeFilter),
}

impl ListingSort {
    pub fn from_listing(listing: ListingType, time_filter: TimeFilter) -> Self {
        match listing {
            ListingType::Hot => ListingSort::Hot,
            ListingType::New => ListingSort::New,
            ListingType::Rising => ListingSort::Rising,
            ListingType::Top => ListingSort::Top(time_filter),
            ListingType::Controversial => ListingSort::Controversial(time_filter),
        }
    }

    pub fn path_segment(self) -> &'static str {
        match self {
            ListingSort::Hot => "hot",
            ListingSort::New => "new",
            ListingSort::Rising => "rising",
            ListingSort::Top(_) => "top",
            ListingSort::Controversial(_) => "controversial",
        }
    }

    pub fn time_filter(self) -> Option<TimeFilter> {
        match self {
            ListingSort::Top(t) | ListingSort::Controversial(t) => Some(t),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchSort {
    #[default]
    Relevance,
    Hot,
    Top,
    New,
    Comments,
}

impl Choice for SearchSort {
    const FIELD: &'static str = "sort";
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("relevance", SearchSort::Relevance),
        ("hot", SearchSort::Hot),
        ("top", SearchSort::Top),
        ("new", SearchSort::New),
        ("comments", SearchSort::Comments),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKind {
    SelfPost,
    Link,
}

impl Choice for PostKind {
    const FIELD: &'static str = "kind";
    const VARIANTS: &'static [(&'static str, Self)] =
        &[("self", PostKind::SelfPost), ("link", PostKind::Link)];
    const CASE_INSENSITIVE: bool = true;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    User,
    Subreddit,
}

impl Choice for ItemType {
    const FIELD: &'static str = "item_type";
    const VARIANTS: &'static [(&'static str, Self)] =
        &[("user", ItemType::User), ("subreddit", ItemType::Subreddit)];
    const CASE_INSENSITIVE: bool = true;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InboxFilter {
    All,
    #[default]
    Unread,
    CommentReplies,
    PostReplies,
    Mentions,
    Messages,
}

impl Choice for InboxFilter {
    const FIELD: &'static str = "filter_type";
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("all", InboxFilter::All),
        ("unread", InboxFilter::Unread),
        ("comment_replies", InboxFilter::CommentReplies),
        ("post_replies", InboxFilter::PostReplies),
        ("mentions", InboxFilter::Mentions),
        ("messages", InboxFilter::Messages),
    ];
    const CASE_INSENSITIVE: bool = true;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerStrategy {
    #[default]
    TopVoted,
    OpReply,
    ModReply,
}

impl Choice for AnswerStrategy {
    const FIELD: &'static str = "strategy";
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("top_voted", AnswerStrategy::TopVoted),
        ("op_reply", AnswerStrategy::OpReply),
        ("mod_reply", AnswerStrategy::ModReply),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
    Clear,
}

impl VoteDirection {
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            1 => Some(VoteDirection::Up),
            -1 => Some(VoteDirection::Down),
            0 => Some(VoteDirection::Clear),
            _ => None,
        }
    }

    pub fn as_i64(self) -> i64 {
        match self {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
            VoteDirection::Clear => 0,
        }
    }
}

/// 已投票內容的歷史清單
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteHistory {
    Upvoted,
    Downvoted,
}

impl VoteHistory {
    pub fn path_segment(self) -> &'static str {
        match self {
            VoteHistory::Upvoted => "upvoted",
            VoteHistory::Downvoted => "downvoted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickySlot {
    Top,
    Bottom,
}

impl StickySlot {
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            1 => Some(StickySlot::Top),
            2 => Some(StickySlot::Bottom),
            _ => None,
        }
    }

    pub fn number(self) -> i64 {
        match self {
            StickySlot::Top => 1,
            StickySlot::Bottom => 2,
        }
    }
}
