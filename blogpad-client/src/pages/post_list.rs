use super::RowStatus;
use crate::api::Query;
use crate::app::App;
use crate::error::ClientError;
use crate::models::Post;
use crate::pagination::Pagination;
use crate::router::Route;
use crate::store::PostsAction;

#[derive(Debug, Clone, PartialEq)]
pub struct PostRow {
    pub post: Post,
    pub status: RowStatus,
    pub can_delete: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostListView {
    pub rows: Vec<PostRow>,
    /// `None` until a server page has been loaded
    pub pagination: Option<Pagination>,
    pub total_items: u64,
}

impl PostListView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug)]
pub struct PostListPage {
    page: u32,
    size: u32,
    watched: Option<Query>,
    pub error: Option<String>,
}

impl PostListPage {
    pub fn new(app: &App) -> Self {
        Self {
            page: 1,
            size: app.page_size(),
            watched: None,
            error: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    fn query(&self) -> Query {
        Query::Posts {
            page: self.page,
            size: self.size,
        }
    }

    /// Subscribe to the current page and build the view. The server page wins
    /// once loaded; otherwise only the local overlay is shown.
    pub async fn load(&mut self, app: &mut App) -> Result<PostListView, ClientError> {
        let query = self.query();
        if self.watched.as_ref() != Some(&query) {
            self.leave(app);
            app.api.watch(query.clone());
            self.watched = Some(query);
        }
        let user_name = app.current_user_name().await;

        match app.posts(self.page, self.size).await {
            Ok(response) => {
                self.error = None;
                let ids = response.posts.iter().map(|p| p.id.clone()).collect();
                app.store.dispatch(PostsAction::PostsLoaded(ids))?;

                let mut rows = overlay_rows(app, user_name.as_deref());
                rows.extend(response.posts.into_iter().map(|post| PostRow {
                    can_delete: owns(&post, user_name.as_deref()),
                    post,
                    status: RowStatus::Server,
                }));

                Ok(PostListView {
                    rows,
                    pagination: Some(Pagination::new(
                        response.page_info.page_number,
                        response.page_info.total_pages,
                    )),
                    total_items: response.page_info.total_items,
                })
            }
            Err(e) if e.is_unauthorized() => Err(e),
            Err(e) => {
                tracing::warn!("Failed to load posts: {}", e);
                self.error = Some("Failed to load posts".to_string());
                Ok(PostListView {
                    rows: overlay_rows(app, user_name.as_deref()),
                    pagination: None,
                    total_items: 0,
                })
            }
        }
    }

    pub async fn change_page(
        &mut self,
        app: &mut App,
        page: u32,
    ) -> Result<PostListView, ClientError> {
        self.page = page.max(1);
        self.load(app).await
    }

    /// Delete a post; the watched list refetches through invalidation
    pub async fn delete(&mut self, app: &mut App, id: &str) -> Result<(), ClientError> {
        let toast = app.notifier.loading("Deleting Post, please hold on...");
        match app.delete_post(id).await {
            Ok(()) => {
                app.notifier.success(toast, "Post deleted successfully");
                app.store.dispatch(PostsAction::PostRemoved(id.to_string()))?;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to delete post {}: {}", id, e);
                app.notifier.error(toast, "Failed to delete Post");
                Err(e)
            }
        }
    }

    /// Record the selection and go to its detail page
    pub fn open(&self, app: &mut App, post: &Post) -> Result<Route, ClientError> {
        app.store.dispatch(PostsAction::SelectPost(post.clone()))?;
        Ok(app.navigate(Route::PostDetails(post.id.clone())).clone())
    }

    pub fn leave(&mut self, app: &mut App) {
        if let Some(query) = self.watched.take() {
            app.api.unwatch(&query);
        }
    }
}

fn owns(post: &Post, user_name: Option<&str>) -> bool {
    user_name.is_some_and(|name| name == post.user_name)
}

fn overlay_rows(app: &App, user_name: Option<&str>) -> Vec<PostRow> {
    app.store
        .state()
        .posts
        .posts
        .items()
        .iter()
        .map(|item| PostRow {
            post: item.entry.clone(),
            status: RowStatus::from(&item.state),
            can_delete: item.is_confirmed() && owns(&item.entry, user_name),
        })
        .collect()
}
