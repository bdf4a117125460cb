use super::{local_id, now_timestamp, RowStatus, SubmitOutcome};
use crate::api::Query;
use crate::app::App;
use crate::error::ClientError;
use crate::models::{Comment, CommentParams, Post};
use crate::pagination::Pagination;
use crate::router::Route;
use crate::store::PostsAction;
use crate::validation::{validate_comment, ValidationErrors};

/// Where the displayed post came from
#[derive(Debug, Clone, PartialEq)]
pub enum PostSource {
    Fetched(Post),
    /// Snapshot recorded when the post was opened from the list
    Snapshot(Post),
}

impl PostSource {
    pub fn post(&self) -> &Post {
        match self {
            PostSource::Fetched(post) | PostSource::Snapshot(post) => post,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentRow {
    pub comment: Comment,
    pub status: RowStatus,
    pub can_delete: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostDetailView {
    /// `None` renders the not-found empty state
    pub post: Option<PostSource>,
    pub comments: Vec<CommentRow>,
    pub pagination: Option<Pagination>,
    pub can_edit: bool,
}

#[derive(Debug)]
pub struct PostDetailPage {
    post_id: String,
    comments_page: u32,
    size: u32,
    watched: Vec<Query>,
    pub comment: String,
    pub errors: ValidationErrors,
    pub server_error: Option<String>,
}

impl PostDetailPage {
    pub fn new(app: &App, post_id: impl Into<String>) -> Self {
        Self {
            post_id: post_id.into(),
            comments_page: 1,
            size: app.page_size(),
            watched: Vec::new(),
            comment: String::new(),
            errors: ValidationErrors::new(),
            server_error: None,
        }
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    fn queries(&self) -> Vec<Query> {
        vec![
            Query::Post {
                id: self.post_id.clone(),
            },
            Query::Comments {
                post_id: self.post_id.clone(),
                page: self.comments_page,
                size: self.size,
            },
        ]
    }

    fn subscribe(&mut self, app: &mut App) {
        let queries = self.queries();
        if self.watched != queries {
            self.leave(app);
            for query in &queries {
                app.api.watch(query.clone());
            }
            self.watched = queries;
        }
    }

    pub fn leave(&mut self, app: &mut App) {
        for query in self.watched.drain(..) {
            app.api.unwatch(&query);
        }
    }

    pub async fn load(&mut self, app: &mut App) -> Result<PostDetailView, ClientError> {
        self.subscribe(app);
        let user_name = app.current_user_name().await;

        let post = match app.post(&self.post_id).await {
            Ok(post) => Some(PostSource::Fetched(post)),
            Err(e) if e.is_not_found() => None,
            Err(e) if e.is_unauthorized() => return Err(e),
            Err(e) => {
                tracing::warn!("Failed to load post {}: {}", self.post_id, e);
                self.server_error = Some("Failed to load post".to_string());
                app.store
                    .state()
                    .posts
                    .selected_post
                    .as_ref()
                    .filter(|p| p.id == self.post_id)
                    .cloned()
                    .map(PostSource::Snapshot)
            }
        };

        let Some(source) = post else {
            return Ok(PostDetailView {
                post: None,
                comments: Vec::new(),
                pagination: None,
                can_edit: false,
            });
        };

        let mut comments = Vec::new();
        let mut pagination = None;
        match app
            .comments(&self.post_id, self.comments_page, self.size)
            .await
        {
            Ok(response) => {
                let ids = response.comments.iter().map(|c| c.id.clone()).collect();
                app.store.dispatch(PostsAction::CommentsLoaded(ids))?;
                pagination = Some(Pagination::new(
                    response.page_info.page_number,
                    response.page_info.total_pages,
                ));
                comments.extend(response.comments.into_iter().map(|comment| CommentRow {
                    can_delete: owns(&comment.user_name, user_name.as_deref()),
                    comment,
                    status: RowStatus::Server,
                }));
            }
            Err(e) => {
                tracing::warn!("Failed to load comments for {}: {}", self.post_id, e);
                self.server_error = Some("Failed to load comments".to_string());
            }
        }
        comments.extend(self.overlay_rows(app, user_name.as_deref()));

        Ok(PostDetailView {
            can_edit: owns(&source.post().user_name, user_name.as_deref()),
            post: Some(source),
            comments,
            pagination,
        })
    }

    pub async fn change_comments_page(
        &mut self,
        app: &mut App,
        page: u32,
    ) -> Result<PostDetailView, ClientError> {
        self.comments_page = page.max(1);
        self.load(app).await
    }

    /// Append the comment locally, then send it. The local entry is
    /// confirmed by the response or marked failed.
    pub async fn add_comment(&mut self, app: &mut App) -> SubmitOutcome {
        self.server_error = None;
        let params = CommentParams {
            comment: self.comment.clone(),
        };
        if let Err(errors) = validate_comment(&params) {
            self.errors = errors.clone();
            return SubmitOutcome::Invalid(errors);
        }
        self.errors = ValidationErrors::new();

        let user_name = app.current_user_name().await.unwrap_or_default();
        let local = Comment {
            id: local_id(),
            post_id: self.post_id.clone(),
            content: params.comment.trim().to_string(),
            created_at: now_timestamp(),
            user_name,
        };
        let local_id = local.id.clone();
        if let Err(e) = app.store.dispatch(PostsAction::CommentPending(local)) {
            return SubmitOutcome::Failed(e.into());
        }

        let toast = app.notifier.loading("Adding comment, please hold on...");
        match app.add_comment(&self.post_id, &params.comment).await {
            Ok(comment) => {
                app.notifier.success(toast, "Comment added successfully");
                let confirmed = PostsAction::CommentConfirmed { local_id, comment };
                if let Err(e) = app.store.dispatch(confirmed) {
                    return SubmitOutcome::Failed(e.into());
                }
                self.comment.clear();
                SubmitOutcome::Succeeded(app.route().clone())
            }
            Err(e) => {
                tracing::warn!("Failed to add comment: {}", e);
                app.notifier.error(toast, "Failed to add comment");
                let failed = PostsAction::CommentFailed {
                    local_id,
                    reason: e.to_string(),
                };
                if let Err(storage) = app.store.dispatch(failed) {
                    tracing::warn!("Failed to record comment failure: {}", storage);
                }
                self.server_error = Some("Failed to add comment".to_string());
                SubmitOutcome::Failed(e)
            }
        }
    }

    pub async fn delete_comment(
        &mut self,
        app: &mut App,
        comment_id: &str,
    ) -> Result<(), ClientError> {
        let toast = app.notifier.loading("Deleting comment, please hold on...");
        match app.delete_comment(&self.post_id, comment_id).await {
            Ok(()) => {
                app.notifier.success(toast, "Comment deleted successfully");
                app.store
                    .dispatch(PostsAction::CommentRemoved(comment_id.to_string()))?;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to delete comment {}: {}", comment_id, e);
                app.notifier.error(toast, "Failed to delete comment");
                Err(e)
            }
        }
    }

    /// Delete the post and go back to the list
    pub async fn delete_post(&mut self, app: &mut App) -> SubmitOutcome {
        // stop watching first so the invalidation does not refetch a deleted post
        self.leave(app);
        let toast = app.notifier.loading("Deleting Post, please hold on...");
        match app.delete_post(&self.post_id).await {
            Ok(()) => {
                app.notifier.success(toast, "Post deleted successfully");
                if let Err(e) = app
                    .store
                    .dispatch(PostsAction::PostRemoved(self.post_id.clone()))
                {
                    return SubmitOutcome::Failed(e.into());
                }
                SubmitOutcome::Succeeded(app.navigate(Route::Posts).clone())
            }
            Err(e) => {
                tracing::warn!("Failed to delete post {}: {}", self.post_id, e);
                app.notifier.error(toast, "Failed to delete Post");
                self.server_error = Some("Failed to delete post".to_string());
                SubmitOutcome::Failed(e)
            }
        }
    }

    pub fn edit(&mut self, app: &mut App) -> Route {
        self.leave(app);
        app.navigate(Route::EditPost(self.post_id.clone())).clone()
    }

    fn overlay_rows(&self, app: &App, user_name: Option<&str>) -> Vec<CommentRow> {
        app.store
            .state()
            .posts
            .comments
            .items()
            .iter()
            .filter(|item| item.entry.post_id == self.post_id)
            .map(|item| CommentRow {
                comment: item.entry.clone(),
                status: RowStatus::from(&item.state),
                can_delete: item.is_confirmed() && owns(&item.entry.user_name, user_name),
            })
            .collect()
    }
}

fn owns(author: &str, user_name: Option<&str>) -> bool {
    user_name.is_some_and(|name| name == author)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::storage::{MemoryStorage, TOKEN_KEY};
    use serde_json::{json, Value};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app_for(server: &MockServer) -> App {
        let config = ClientConfig {
            base_url: server.uri(),
            ..ClientConfig::default()
        };
        App::new(&config, Box::new(MemoryStorage::with(TOKEN_KEY, "tok"))).unwrap()
    }

    fn post_json(id: &str, author: &str) -> Value {
        json!({
            "id": id,
            "title": "Hello",
            "content": "body",
            "createdAt": "2024-03-01T10:00:00Z",
            "updatedAt": "2024-03-01T10:00:00Z",
            "commentCount": 1,
            "userName": author
        })
    }

    fn comments_json(ids: &[&str]) -> Value {
        let comments: Vec<Value> = ids
            .iter()
            .map(|id| {
                json!({
                    "id": id,
                    "postId": "p1",
                    "content": format!("comment {}", id),
                    "createdAt": "2024-03-02T10:00:00Z",
                    "userName": "bob"
                })
            })
            .collect();
        json!({
            "comments": comments,
            "pageInfo": {"pageNumber": 1, "pageSize": 5, "totalItems": ids.len(), "totalPages": 1}
        })
    }

    async fn mount_account(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/v1/account"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "userId": "u1",
                "email": "ann@example.com",
                "firstName": "Ann",
                "lastName": "Lee",
                "userName": "ann"
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn owner_sees_edit_affordance() {
        let server = MockServer::start().await;
        mount_account(&server).await;
        Mock::given(method("GET"))
            .and(path("/v1/posts/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(post_json("p1", "ann")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/posts/p1/comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(comments_json(&["c1"])))
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        let mut page = PostDetailPage::new(&app, "p1");
        let view = page.load(&mut app).await.unwrap();

        assert!(matches!(view.post, Some(PostSource::Fetched(_))));
        assert!(view.can_edit);
        assert_eq!(view.comments.len(), 1);
        assert!(!view.comments[0].can_delete);
    }

    #[tokio::test]
    async fn missing_post_is_empty_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/posts/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        let mut page = PostDetailPage::new(&app, "gone");
        let view = page.load(&mut app).await.unwrap();

        assert!(view.post.is_none());
        assert!(view.comments.is_empty());
    }

    #[tokio::test]
    async fn falls_back_to_selected_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/posts/p1"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        let snapshot: Post = serde_json::from_value(post_json("p1", "bob")).unwrap();
        app.store
            .dispatch(PostsAction::SelectPost(snapshot.clone()))
            .unwrap();

        let mut page = PostDetailPage::new(&app, "p1");
        let view = page.load(&mut app).await.unwrap();

        assert_eq!(view.post, Some(PostSource::Snapshot(snapshot)));
        assert!(page.server_error.is_some());
    }

    #[tokio::test]
    async fn comment_is_appended_before_the_server_answers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/posts/p1/comments"))
            .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        let mut page = PostDetailPage::new(&app, "p1");
        page.comment = "Nice post".into();

        let outcome = page.add_comment(&mut app).await;
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));

        // only an entry pushed as pending can be marked failed
        let items = app.store.state().posts.comments.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].entry.content, "Nice post");
        assert!(items[0].failure().is_some());
        assert_eq!(page.comment, "Nice post");
        assert_eq!(app.notifier.last().unwrap().message, "Failed to add comment");
    }

    #[tokio::test]
    async fn confirmed_comment_is_superseded_by_the_server_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/posts/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(post_json("p1", "bob")))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/posts/p1/comments"))
            .and(body_json(json!({"content": "Nice post"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "c2",
                "postId": "p1",
                "content": "Nice post",
                "createdAt": "2024-03-02T11:00:00Z",
                "userName": "bob"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/posts/p1/comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(comments_json(&["c1", "c2"])))
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        let mut page = PostDetailPage::new(&app, "p1");
        page.comment = "Nice post".into();

        assert!(page.add_comment(&mut app).await.is_success());
        assert!(page.comment.is_empty());
        assert!(app.store.state().posts.comments.items()[0].is_confirmed());

        let view = page.load(&mut app).await.unwrap();
        assert_eq!(view.comments.len(), 2);
        assert!(view.comments.iter().all(|row| row.status == RowStatus::Server));
        assert!(app.store.state().posts.comments.is_empty());
    }

    #[tokio::test]
    async fn empty_comment_is_rejected_locally() {
        let server = MockServer::start().await;
        let mut app = app_for(&server);
        let mut page = PostDetailPage::new(&app, "p1");
        page.comment = "   ".into();

        assert!(matches!(
            page.add_comment(&mut app).await,
            SubmitOutcome::Invalid(_)
        ));
        assert!(app.store.state().posts.comments.is_empty());
    }

    #[tokio::test]
    async fn deleting_the_post_returns_to_the_list() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/posts/p1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        let mut page = PostDetailPage::new(&app, "p1");
        match page.delete_post(&mut app).await {
            SubmitOutcome::Succeeded(route) => assert_eq!(route, Route::Posts),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn deleted_post_is_not_fetched_again() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/posts/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(post_json("p1", "ann")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/posts/p1/comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(comments_json(&["c1"])))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/v1/posts/p1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        let mut page = PostDetailPage::new(&app, "p1");
        page.load(&mut app).await.unwrap();

        assert!(page.delete_post(&mut app).await.is_success());
        server.verify().await;
    }

    #[tokio::test]
    async fn failed_post_delete_stays_put() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/posts/p1"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.navigate(Route::PostDetails("p1".into()));
        let mut page = PostDetailPage::new(&app, "p1");

        assert!(matches!(
            page.delete_post(&mut app).await,
            SubmitOutcome::Failed(_)
        ));
        assert_eq!(app.route(), &Route::PostDetails("p1".into()));
    }
}
