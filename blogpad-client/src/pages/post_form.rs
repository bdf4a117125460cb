use super::{local_id, now_timestamp, SubmitOutcome};
use crate::app::App;
use crate::error::ClientError;
use crate::models::{Post, PostParams};
use crate::router::Route;
use crate::store::PostsAction;
use crate::validation::{validate_post, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
}

#[derive(Debug)]
pub struct PostFormPage {
    mode: FormMode,
    pub form: PostParams,
    pub errors: ValidationErrors,
    pub server_error: Option<String>,
}

impl PostFormPage {
    pub fn create() -> Self {
        Self::with_mode(FormMode::Create)
    }

    pub fn edit(id: impl Into<String>) -> Self {
        Self::with_mode(FormMode::Edit(id.into()))
    }

    fn with_mode(mode: FormMode) -> Self {
        Self {
            mode,
            form: PostParams::default(),
            errors: ValidationErrors::new(),
            server_error: None,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Prefill the form from the post being edited
    pub async fn load(&mut self, app: &mut App) -> Result<(), ClientError> {
        if let FormMode::Edit(id) = &self.mode {
            let post = app.post(id).await?;
            self.form = PostParams {
                title: post.title,
                content: post.content,
            };
        }
        Ok(())
    }

    pub async fn submit(&mut self, app: &mut App) -> SubmitOutcome {
        self.server_error = None;
        if let Err(errors) = validate_post(&self.form) {
            self.errors = errors.clone();
            return SubmitOutcome::Invalid(errors);
        }
        self.errors = ValidationErrors::new();

        let toast = app.notifier.loading(match self.mode {
            FormMode::Create => "Creating post, please hold on...",
            FormMode::Edit(_) => "Saving post, please hold on...",
        });

        let result = match &self.mode {
            FormMode::Create => self.create_post(app).await,
            FormMode::Edit(id) => app.update_post(id, self.form.clone()).await.map(|_| ()),
        };

        match result {
            Ok(()) => {
                app.notifier.success(toast, "Post saved successfully");
                SubmitOutcome::Succeeded(app.navigate(Route::Posts).clone())
            }
            Err(e) => {
                tracing::warn!("Failed to save post: {}", e);
                app.notifier.error(toast, "Failed to save post");
                self.server_error = Some("Failed to save post".to_string());
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Record a pending entry, then reconcile it with the response
    async fn create_post(&self, app: &mut App) -> Result<(), ClientError> {
        let now = now_timestamp();
        let local = Post {
            id: local_id(),
            title: self.form.title.clone(),
            content: self.form.content.clone(),
            created_at: now.clone(),
            updated_at: now,
            is_edited: false,
            comment_count: 0,
            user_name: app.current_user_name().await.unwrap_or_default(),
        };
        let local_id = local.id.clone();
        app.store.dispatch(PostsAction::PostPending(local))?;

        match app.create_post(self.form.clone()).await {
            Ok(post) => {
                app.store
                    .dispatch(PostsAction::PostConfirmed { local_id, post })?;
                Ok(())
            }
            Err(e) => {
                app.store.dispatch(PostsAction::PostFailed {
                    local_id,
                    reason: e.to_string(),
                })?;
                Err(e)
            }
        }
    }

    /// Leave the form without saving
    pub fn cancel(&self, app: &mut App) -> Route {
        let target = match &self.mode {
            FormMode::Create => Route::Posts,
            FormMode::Edit(id) => Route::PostDetails(id.clone()),
        };
        app.navigate(target).clone()
    }
}
