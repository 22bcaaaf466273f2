//! Blog actions and the pure reducer that applies them.

use std::rc::Rc;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::models::{
    Article, BlogState, Comment, DocumentKind, Session, SiteConfig, Stats, User,
};

/// Payload of `SET_AUTH`: the session to install.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    /// Signed-in user, `None` after logout.
    pub user: Option<User>,
    /// Whether the admin pages are unlocked.
    pub is_authenticated: bool,
}

/// One requested state transition.
///
/// On the wire this is `{"type": "LIKE_ARTICLE", "payload": "42"}`; kinds
/// this build does not know decode to [`BlogAction::Unknown`] whatever
/// their payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlogAction {
    /// Toggle the global loading flag.
    SetLoading(bool),
    /// Set or clear the global error message.
    SetError(Option<String>),
    /// Replace the article slice.
    SetArticles(Vec<Article>),
    /// Replace the comment slice.
    SetComments(Vec<Comment>),
    /// Replace the user slice.
    SetUsers(Vec<User>),
    /// Replace the site configuration.
    SetConfig(SiteConfig),
    /// Replace the dashboard statistics snapshot.
    SetStats(Stats),
    /// Replace the session.
    SetAuth(AuthPayload),
    /// Prepend a new article.
    AddArticle(Article),
    /// Replace the article with the same id.
    UpdateArticle(Article),
    /// Remove the article with this id.
    DeleteArticle(String),
    /// Append a new top-level comment.
    AddComment(Comment),
    /// Replace the comment with the same id (replies included).
    UpdateComment(Comment),
    /// Remove the comment with this id.
    DeleteComment(String),
    /// Add one like to the article with this id.
    LikeArticle(String),
    /// A kind this build does not recognise; reduces to the same state.
    Unknown,
}

impl<'de> Deserialize<'de> for BlogAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wire {
            #[serde(rename = "type")]
            kind: String,
            #[serde(default)]
            payload: serde_json::Value,
        }

        fn decode(kind: &str, value: serde_json::Value) -> serde_json::Result<BlogAction> {
            use serde_json::from_value;

            Ok(match kind {
                "SET_LOADING" => BlogAction::SetLoading(from_value(value)?),
                "SET_ERROR" => BlogAction::SetError(from_value(value)?),
                "SET_ARTICLES" => BlogAction::SetArticles(from_value(value)?),
                "SET_COMMENTS" => BlogAction::SetComments(from_value(value)?),
                "SET_USERS" => BlogAction::SetUsers(from_value(value)?),
                "SET_CONFIG" => BlogAction::SetConfig(from_value(value)?),
                "SET_STATS" => BlogAction::SetStats(from_value(value)?),
                "SET_AUTH" => BlogAction::SetAuth(from_value(value)?),
                "ADD_ARTICLE" => BlogAction::AddArticle(from_value(value)?),
                "UPDATE_ARTICLE" => BlogAction::UpdateArticle(from_value(value)?),
                "DELETE_ARTICLE" => BlogAction::DeleteArticle(from_value(value)?),
                "ADD_COMMENT" => BlogAction::AddComment(from_value(value)?),
                "UPDATE_COMMENT" => BlogAction::UpdateComment(from_value(value)?),
                "DELETE_COMMENT" => BlogAction::DeleteComment(from_value(value)?),
                "LIKE_ARTICLE" => BlogAction::LikeArticle(from_value(value)?),
                // payload of an unrecognised kind is dropped
                _ => BlogAction::Unknown,
            })
        }

        let wire = Wire::deserialize(deserializer)?;
        decode(&wire.kind, wire.payload).map_err(de::Error::custom)
    }
}

impl BlogAction {
    /// Convenience constructor for `SET_AUTH`.
    pub fn set_auth(user: Option<User>, is_authenticated: bool) -> Self {
        BlogAction::SetAuth(AuthPayload {
            user,
            is_authenticated,
        })
    }

    /// Wire name of the action kind.
    pub fn kind(&self) -> &'static str {
        match self {
            BlogAction::SetLoading(_) => "SET_LOADING",
            BlogAction::SetError(_) => "SET_ERROR",
            BlogAction::SetArticles(_) => "SET_ARTICLES",
            BlogAction::SetComments(_) => "SET_COMMENTS",
            BlogAction::SetUsers(_) => "SET_USERS",
            BlogAction::SetConfig(_) => "SET_CONFIG",
            BlogAction::SetStats(_) => "SET_STATS",
            BlogAction::SetAuth(_) => "SET_AUTH",
            BlogAction::AddArticle(_) => "ADD_ARTICLE",
            BlogAction::UpdateArticle(_) => "UPDATE_ARTICLE",
            BlogAction::DeleteArticle(_) => "DELETE_ARTICLE",
            BlogAction::AddComment(_) => "ADD_COMMENT",
            BlogAction::UpdateComment(_) => "UPDATE_COMMENT",
            BlogAction::DeleteComment(_) => "DELETE_COMMENT",
            BlogAction::LikeArticle(_) => "LIKE_ARTICLE",
            BlogAction::Unknown => "UNKNOWN",
        }
    }

    /// The document slice the store must replicate after this action.
    ///
    /// The session is not listed: it is persisted by login/logout under its
    /// own keys.
    pub fn persisted_kind(&self) -> Option<DocumentKind> {
        match self {
            BlogAction::SetArticles(_)
            | BlogAction::AddArticle(_)
            | BlogAction::UpdateArticle(_)
            | BlogAction::DeleteArticle(_)
            | BlogAction::LikeArticle(_) => Some(DocumentKind::Articles),
            BlogAction::SetComments(_)
            | BlogAction::AddComment(_)
            | BlogAction::UpdateComment(_)
            | BlogAction::DeleteComment(_) => Some(DocumentKind::Comments),
            BlogAction::SetUsers(_) => Some(DocumentKind::Users),
            BlogAction::SetConfig(_) => Some(DocumentKind::Config),
            BlogAction::SetStats(_) => Some(DocumentKind::Stats),
            BlogAction::SetLoading(_)
            | BlogAction::SetError(_)
            | BlogAction::SetAuth(_)
            | BlogAction::Unknown => None,
        }
    }
}

/// Pure transition function.
///
/// The input is only borrowed, so it can never be mutated; slices the
/// action does not touch are shared with the returned state. Actions that
/// target a missing id return a state identical to the input.
pub fn reduce(state: &BlogState, action: BlogAction) -> BlogState {
    let mut next = state.clone();
    match action {
        BlogAction::SetLoading(loading) => {
            next.loading = loading;
        },
        BlogAction::SetError(error) => {
            next.error = error;
        },
        BlogAction::SetArticles(articles) => {
            next.articles = Rc::new(articles);
        },
        BlogAction::SetComments(comments) => {
            next.comments = Rc::new(comments);
        },
        BlogAction::SetUsers(users) => {
            next.users = Rc::new(users);
        },
        BlogAction::SetConfig(config) => {
            next.config = Some(Rc::new(config));
        },
        BlogAction::SetStats(stats) => {
            next.stats = Some(Rc::new(stats));
        },
        BlogAction::SetAuth(AuthPayload {
            user,
            is_authenticated,
        }) => {
            next.session = Rc::new(Session {
                current_user: user,
                is_authenticated,
            });
        },
        BlogAction::AddArticle(article) => {
            // newest first
            let mut articles = Vec::with_capacity(state.articles.len() + 1);
            articles.push(article);
            articles.extend(state.articles.iter().cloned());
            next.articles = Rc::new(articles);
        },
        BlogAction::UpdateArticle(article) => {
            if let Some(idx) = position(&state.articles, |a| a.id == article.id) {
                let mut articles = (*state.articles).clone();
                articles[idx] = article;
                next.articles = Rc::new(articles);
            }
        },
        BlogAction::DeleteArticle(id) => {
            if position(&state.articles, |a| a.id == id).is_some() {
                next.articles =
                    Rc::new(state.articles.iter().filter(|a| a.id != id).cloned().collect());
            }
        },
        BlogAction::AddComment(comment) => {
            let mut comments = (*state.comments).clone();
            comments.push(comment);
            next.comments = Rc::new(comments);
        },
        BlogAction::UpdateComment(comment) => {
            if let Some(idx) = position(&state.comments, |c| c.id == comment.id) {
                let mut comments = (*state.comments).clone();
                comments[idx] = comment;
                next.comments = Rc::new(comments);
            }
        },
        BlogAction::DeleteComment(id) => {
            if position(&state.comments, |c| c.id == id).is_some() {
                next.comments =
                    Rc::new(state.comments.iter().filter(|c| c.id != id).cloned().collect());
            }
        },
        BlogAction::LikeArticle(id) => {
            if let Some(idx) = position(&state.articles, |a| a.id == id) {
                let mut articles = (*state.articles).clone();
                articles[idx].likes = articles[idx].likes.saturating_add(1);
                next.articles = Rc::new(articles);
            }
        },
        BlogAction::Unknown => {},
    }
    next
}

fn position<T>(items: &[T], pred: impl Fn(&T) -> bool) -> Option<usize> {
    items.iter().position(pred)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashSet;

    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    use super::*;
    use crate::models::{Author, Role};

    pub(crate) fn sample_article(id: &str) -> Article {
        let ts = Utc
            .with_ymd_and_hms(2024, 1, 15, 10, 0, 0)
            .single()
            .expect("valid timestamp");
        Article {
            id: id.to_string(),
            title: format!("Article {id}"),
            slug: format!("article-{id}"),
            excerpt: "excerpt".to_string(),
            content: "# Heading\n\nBody".to_string(),
            featured_image: "/images/tech-article.webp".to_string(),
            category: "Rust".to_string(),
            tags: vec!["rust".to_string()],
            author: Author::fallback(),
            published_at: ts,
            updated_at: ts,
            is_published: true,
            read_time: 1,
            views: 10,
            likes: 0,
        }
    }

    pub(crate) fn sample_comment(id: &str, article_id: &str) -> Comment {
        Comment {
            id: id.to_string(),
            article_id: article_id.to_string(),
            author: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            content: format!("comment {id}"),
            created_at: Utc
                .with_ymd_and_hms(2024, 2, 1, 8, 0, 0)
                .single()
                .expect("valid timestamp"),
            is_approved: true,
            replies: Vec::new(),
        }
    }

    pub(crate) fn sample_user(username: &str) -> User {
        User {
            id: format!("u-{username}"),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            name: username.to_uppercase(),
            role: if username == "admin" { Role::Admin } else { Role::User },
            avatar: "/images/avatar.jpg".to_string(),
            bio: String::new(),
            created_at: Utc
                .with_ymd_and_hms(2023, 6, 1, 0, 0, 0)
                .single()
                .expect("valid timestamp"),
            is_active: true,
        }
    }

    fn state_with(articles: Vec<Article>, comments: Vec<Comment>) -> BlogState {
        let state = reduce(&BlogState::default(), BlogAction::SetArticles(articles));
        reduce(&state, BlogAction::SetComments(comments))
    }

    #[test]
    fn add_then_like_increments_likes() {
        let state = reduce(&BlogState::default(), BlogAction::AddArticle(sample_article("1")));
        let state = reduce(&state, BlogAction::LikeArticle("1".to_string()));
        assert_eq!(state.articles[0].likes, 1);
    }

    #[test]
    fn add_article_prepends() {
        let state = state_with(vec![sample_article("1")], Vec::new());
        let state = reduce(&state, BlogAction::AddArticle(sample_article("2")));
        let ids: Vec<_> = state.articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn like_touches_only_the_target() {
        let state = state_with(vec![sample_article("1"), sample_article("2")], Vec::new());
        let next = reduce(&state, BlogAction::LikeArticle("2".to_string()));
        assert_eq!(next.articles[0], state.articles[0]);
        let mut expected = state.articles[1].clone();
        expected.likes += 1;
        assert_eq!(next.articles[1], expected);
    }

    #[test]
    fn like_missing_id_is_identity() {
        let state = state_with(vec![sample_article("1")], Vec::new());
        let next = reduce(&state, BlogAction::LikeArticle("nope".to_string()));
        assert!(Rc::ptr_eq(&state.articles, &next.articles));
        assert_eq!(next, state);
    }

    #[test]
    fn update_missing_article_is_noop() {
        let state = state_with(vec![sample_article("1")], Vec::new());
        let next = reduce(&state, BlogAction::UpdateArticle(sample_article("9")));
        assert_eq!(next.articles.len(), 1);
        assert_eq!(next.articles[0].id, "1");
    }

    #[test]
    fn delete_article_keeps_its_comments() {
        let state = state_with(vec![sample_article("1")], vec![sample_comment("c1", "1")]);
        let next = reduce(&state, BlogAction::DeleteArticle("1".to_string()));
        assert!(next.articles.is_empty());
        assert_eq!(next.comments.len(), 1);
        assert!(Rc::ptr_eq(&state.comments, &next.comments));
    }

    #[test]
    fn update_comment_attaches_reply_without_touching_siblings() {
        let state = state_with(
            Vec::new(),
            vec![sample_comment("c1", "1"), sample_comment("c2", "1")],
        );
        let mut parent = state.comments[0].clone();
        let prior = parent.replies.len();
        parent.replies.push(sample_comment("r1", "1"));
        let next = reduce(&state, BlogAction::UpdateComment(parent));
        assert_eq!(next.comments[0].replies.len(), prior + 1);
        assert_eq!(next.comments[1], state.comments[1]);
    }

    #[test]
    fn delete_comment_preserves_order() {
        let state = state_with(
            Vec::new(),
            vec![
                sample_comment("c1", "1"),
                sample_comment("c2", "1"),
                sample_comment("c3", "2"),
            ],
        );
        let next = reduce(&state, BlogAction::DeleteComment("c2".to_string()));
        let ids: Vec<_> = next.comments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c3"]);
    }

    #[test]
    fn untouched_slices_are_shared() {
        let state = state_with(vec![sample_article("1")], vec![sample_comment("c1", "1")]);
        let next = reduce(&state, BlogAction::AddComment(sample_comment("c2", "1")));
        assert!(Rc::ptr_eq(&state.articles, &next.articles));
        assert!(Rc::ptr_eq(&state.users, &next.users));
        assert!(Rc::ptr_eq(&state.session, &next.session));
        assert_eq!(state.comments.len(), 1);
        assert_eq!(next.comments.len(), 2);
    }

    #[test]
    fn reducer_is_deterministic() {
        let state = state_with(vec![sample_article("1")], Vec::new());
        let action = BlogAction::UpdateArticle(Article {
            title: "Changed".to_string(),
            ..sample_article("1")
        });
        assert_eq!(reduce(&state, action.clone()), reduce(&state, action));
    }

    #[test]
    fn set_auth_replaces_session() {
        let state = reduce(
            &BlogState::default(),
            BlogAction::set_auth(Some(sample_user("admin")), true),
        );
        assert!(state.is_authenticated());
        assert_eq!(state.current_user().map(|u| u.username.as_str()), Some("admin"));
        let state = reduce(&state, BlogAction::set_auth(None, false));
        assert_eq!(*state.session, Session::default());
    }

    #[test]
    fn wire_format_round_trips_and_unknown_is_identity() {
        let action: BlogAction =
            serde_json::from_str(r#"{"type":"LIKE_ARTICLE","payload":"42"}"#).expect("parse");
        assert_eq!(action, BlogAction::LikeArticle("42".to_string()));

        let unknown: BlogAction =
            serde_json::from_str(r#"{"type":"ARCHIVE_EVERYTHING"}"#).expect("parse unknown");
        assert_eq!(unknown, BlogAction::Unknown);
        let state = state_with(vec![sample_article("1")], Vec::new());
        assert_eq!(reduce(&state, unknown), state);
    }

    #[test]
    fn unknown_kind_ignores_its_payload() {
        let state = state_with(vec![sample_article("1")], Vec::new());
        for raw in [
            r#"{"type":"ARCHIVE_EVERYTHING","payload":{"id":"1"}}"#,
            r#"{"type":"FOO","payload":"1"}"#,
            r#"{"type":"UNKNOWN"}"#,
        ] {
            let action: BlogAction = serde_json::from_str(raw).expect("parse unknown");
            assert_eq!(action, BlogAction::Unknown, "{raw}");
            assert_eq!(reduce(&state, action), state);
        }
    }

    #[test]
    fn known_kind_with_bad_payload_is_rejected() {
        let wrong_shape = r#"{"type":"LIKE_ARTICLE","payload":{"id":"1"}}"#;
        assert!(serde_json::from_str::<BlogAction>(wrong_shape).is_err());
        assert!(serde_json::from_str::<BlogAction>(r#"{"payload":"1"}"#).is_err());
    }

    #[test]
    fn serialized_actions_decode_to_themselves() {
        let actions = vec![
            BlogAction::SetLoading(true),
            BlogAction::SetError(None),
            BlogAction::AddArticle(sample_article("1")),
            BlogAction::set_auth(Some(sample_user("admin")), true),
            BlogAction::DeleteComment("c1".to_string()),
        ];
        for action in actions {
            let json = serde_json::to_string(&action).expect("serialize");
            let decoded: BlogAction = serde_json::from_str(&json).expect("decode");
            assert_eq!(decoded, action);
        }
    }

    #[test]
    fn like_saturates_at_max() {
        let mut article = sample_article("1");
        article.likes = u64::MAX;
        let state = state_with(vec![article], Vec::new());
        let next = reduce(&state, BlogAction::LikeArticle("1".to_string()));
        assert_eq!(next.articles[0].likes, u64::MAX);
    }

    #[test]
    fn persisted_kind_follows_action_family() {
        assert_eq!(
            BlogAction::LikeArticle("1".to_string()).persisted_kind(),
            Some(DocumentKind::Articles)
        );
        assert_eq!(
            BlogAction::DeleteComment("1".to_string()).persisted_kind(),
            Some(DocumentKind::Comments)
        );
        assert_eq!(BlogAction::SetLoading(true).persisted_kind(), None);
        assert_eq!(BlogAction::set_auth(None, false).persisted_kind(), None);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(u8),
        Update(u8),
        Delete(u8),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..8).prop_map(Op::Add),
            (0u8..8).prop_map(Op::Update),
            (0u8..8).prop_map(Op::Delete),
        ]
    }

    proptest! {
        #[test]
        fn article_ids_stay_unique(ops in proptest::collection::vec(op_strategy(), 0..40)) {
            let mut state = BlogState::default();
            let mut live: HashSet<String> = HashSet::new();
            for op in ops {
                match op {
                    Op::Add(n) => {
                        let id = n.to_string();
                        // the editor only adds fresh ids
                        if live.insert(id.clone()) {
                            state = reduce(&state, BlogAction::AddArticle(sample_article(&id)));
                        }
                    },
                    Op::Update(n) => {
                        let id = n.to_string();
                        let article = Article { title: "edited".to_string(), ..sample_article(&id) };
                        state = reduce(&state, BlogAction::UpdateArticle(article));
                    },
                    Op::Delete(n) => {
                        let id = n.to_string();
                        live.remove(&id);
                        state = reduce(&state, BlogAction::DeleteArticle(id));
                    },
                }
            }
            let ids: Vec<&str> = state.articles.iter().map(|a| a.id.as_str()).collect();
            let unique: HashSet<&str> = ids.iter().copied().collect();
            prop_assert_eq!(ids.len(), unique.len());
            prop_assert_eq!(unique.len(), live.len());
            for id in &live {
                prop_assert!(unique.contains(id.as_str()));
            }
        }

        #[test]
        fn like_adds_exactly_one(likes in 0u64..1000, target in 0usize..3) {
            let mut articles: Vec<Article> = (0..3).map(|i| sample_article(&i.to_string())).collect();
            articles[target].likes = likes;
            let state = state_with(articles, Vec::new());
            let next = reduce(&state, BlogAction::LikeArticle(target.to_string()));
            for (i, (before, after)) in state.articles.iter().zip(next.articles.iter()).enumerate() {
                if i == target {
                    prop_assert_eq!(after.likes, before.likes + 1);
                    prop_assert_eq!(Article { likes: before.likes, ..after.clone() }, before.clone());
                } else {
                    prop_assert_eq!(after, before);
                }
            }
        }
    }
}
