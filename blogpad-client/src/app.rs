use crate::api::{Api, Mutation, Query};
use crate::config::ClientConfig;
use crate::error::{ClientError, StorageError};
use crate::models::{
    AuthResponse, Comment, CommentsResponse, Post, PostParams, PostsResponse, SignInParams,
    SignUpParams, User,
};
use crate::notify::Notifier;
use crate::router::Route;
use crate::storage::Storage;
use crate::store::{AuthAction, PostsAction, Store};

/// Everything a page needs: API runner, state store, notifications and the
/// current route.
#[derive(Debug)]
pub struct App {
    pub api: Api,
    pub store: Store,
    pub notifier: Notifier,
    page_size: u32,
    route: Route,
}

impl App {
    pub fn new(config: &ClientConfig, storage: Box<dyn Storage>) -> Result<Self, StorageError> {
        let store = Store::init(storage)?;
        let route = Route::Posts.resolve(store.is_authenticated());
        Ok(Self {
            api: Api::new(config),
            store,
            notifier: Notifier::new(),
            page_size: config.page_size,
            route,
        })
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Navigate, applying the protected-route redirect
    pub fn navigate(&mut self, route: Route) -> &Route {
        let resolved = route.resolve(self.store.is_authenticated());
        tracing::debug!("Navigate {} -> {}", self.route, resolved);
        self.route = resolved;
        &self.route
    }

    // ==================== Queries ====================

    pub async fn current_user(&mut self) -> Result<User, ClientError> {
        self.api.query(&Query::CurrentUser, self.store.token()).await
    }

    /// Current user name, or `None` when the account cannot be loaded
    pub async fn current_user_name(&mut self) -> Option<String> {
        match self.current_user().await {
            Ok(user) => Some(user.user_name),
            Err(e) => {
                tracing::debug!("Current user unavailable: {}", e);
                None
            }
        }
    }

    pub async fn posts(&mut self, page: u32, size: u32) -> Result<PostsResponse, ClientError> {
        self.api
            .query(&Query::Posts { page, size }, self.store.token())
            .await
    }

    pub async fn post(&mut self, id: &str) -> Result<Post, ClientError> {
        self.api
            .query(&Query::Post { id: id.to_string() }, self.store.token())
            .await
    }

    pub async fn comments(
        &mut self,
        post_id: &str,
        page: u32,
        size: u32,
    ) -> Result<CommentsResponse, ClientError> {
        let query = Query::Comments {
            post_id: post_id.to_string(),
            page,
            size,
        };
        self.api.query(&query, self.store.token()).await
    }

    // ==================== Mutations ====================

    pub async fn sign_up(&mut self, params: SignUpParams) -> Result<AuthResponse, ClientError> {
        self.authenticate(Mutation::SignUp(params)).await
    }

    pub async fn sign_in(&mut self, params: SignInParams) -> Result<AuthResponse, ClientError> {
        self.authenticate(Mutation::SignIn(params)).await
    }

    /// Persist the returned token, then invalidate with the new credentials
    async fn authenticate(&mut self, mutation: Mutation) -> Result<AuthResponse, ClientError> {
        let value = self.api.run(&mutation, self.store.token()).await?;
        let response: AuthResponse = serde_json::from_value(value)?;
        self.store
            .dispatch(AuthAction::SetToken(response.token.clone()))?;
        tracing::info!("Authenticated via {}", mutation.name());
        self.api
            .invalidate(&mutation.invalidates(), self.store.token())
            .await;
        Ok(response)
    }

    /// End the session. Local state is cleared even when the server call
    /// fails; the server error is still returned.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        let result = self.api.run(&Mutation::Logout, self.store.token()).await;
        if let Err(e) = &result {
            tracing::warn!("Server logout failed: {}", e);
        }
        self.store.dispatch(AuthAction::Logout)?;
        self.store.dispatch(PostsAction::Reset)?;
        self.api.reset();
        self.navigate(Route::Login);
        tracing::info!("Logged out");
        result.map(|_| ())
    }

    pub async fn create_post(&mut self, params: PostParams) -> Result<Post, ClientError> {
        let value = self
            .api
            .mutate(&Mutation::CreatePost(params), self.store.token())
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn update_post(&mut self, id: &str, params: PostParams) -> Result<Post, ClientError> {
        let mutation = Mutation::UpdatePost {
            id: id.to_string(),
            params,
        };
        let value = self.api.mutate(&mutation, self.store.token()).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn delete_post(&mut self, id: &str) -> Result<(), ClientError> {
        let mutation = Mutation::DeletePost { id: id.to_string() };
        self.api.mutate(&mutation, self.store.token()).await?;
        Ok(())
    }

    pub async fn add_comment(
        &mut self,
        post_id: &str,
        content: &str,
    ) -> Result<Comment, ClientError> {
        let mutation = Mutation::AddComment {
            post_id: post_id.to_string(),
            content: content.to_string(),
        };
        let value = self.api.mutate(&mutation, self.store.token()).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn delete_comment(
        &mut self,
        post_id: &str,
        comment_id: &str,
    ) -> Result<(), ClientError> {
        let mutation = Mutation::DeleteComment {
            post_id: post_id.to_string(),
            comment_id: comment_id.to_string(),
        };
        self.api.mutate(&mutation, self.store.token()).await?;
        Ok(())
    }
}
