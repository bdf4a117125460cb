use crate::render;
use anyhow::{bail, Context, Result};
use blogpad_client::models::{PostParams, SignInParams, SignUpParams};
use blogpad_client::pages::{
    LoginPage, PostDetailPage, PostFormPage, PostListPage, RegisterPage, SubmitOutcome,
};
use blogpad_client::store::PostsAction;
use blogpad_client::{App, Route};
use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum Action {
    /// Create an account
    Register {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,
    },

    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    Logout,

    /// Show the signed-in account
    Whoami,

    /// List posts
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Show a post with its comments
    Show {
        id: String,

        #[arg(short, long, default_value_t = 1)]
        comments_page: u32,
    },

    Create {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        content: String,
    },

    /// Edit a post; omitted fields keep their current value
    Edit {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,
    },

    Delete {
        id: String,
    },

    /// Add a comment to a post
    Comment {
        post_id: String,
        text: String,
    },

    DeleteComment {
        post_id: String,
        comment_id: String,
    },
}

/// An [`App`] plus the list page, which keeps its page number between
/// commands in the shell.
pub struct Session {
    pub app: App,
    list: PostListPage,
}

impl Session {
    pub fn new(app: App) -> Self {
        let list = PostListPage::new(&app);
        Self { app, list }
    }

    /// Navigate and fail when a protected route bounces to registration
    fn enter(&mut self, route: Route) -> Result<()> {
        let wanted = route.clone();
        if self.app.navigate(route) != &wanted {
            self.app.notifier.error_now(
                "You need to login first: blogpad login --email <email> --password <password>",
            );
            bail!("not logged in");
        }
        Ok(())
    }

    fn flush_toasts(&mut self) {
        let settled = self.app.notifier.drain_settled();
        render::toasts(&settled);
    }

    pub async fn execute(&mut self, action: Action) -> Result<()> {
        let result = self.dispatch(action).await;
        self.flush_toasts();
        result
    }

    async fn dispatch(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Register {
                email,
                password,
                first_name,
                last_name,
            } => {
                self.app.navigate(Route::Register);
                let mut page = RegisterPage::new(SignUpParams {
                    email,
                    password,
                    first_name,
                    last_name,
                });
                let outcome = page.submit(&mut self.app).await;
                check(outcome, page.server_error.as_deref())
            }

            Action::Login { email, password } => {
                self.app.navigate(Route::Login);
                let mut page = LoginPage::new(SignInParams { email, password });
                let outcome = page.submit(&mut self.app).await;
                check(outcome, page.server_error.as_deref())
            }

            Action::Logout => {
                let result = self.app.logout().await;
                println!("👋 Logged out");
                result.context("Server did not confirm logout")
            }

            Action::Whoami => {
                self.enter(Route::Posts)?;
                let user = self
                    .app
                    .current_user()
                    .await
                    .context("Failed to load account")?;
                render::user(&user);
                Ok(())
            }

            Action::List { page } => {
                self.enter(Route::Posts)?;
                let view = self.list.change_page(&mut self.app, page).await?;
                render::post_list(&view);
                match self.list.error.take() {
                    Some(error) => bail!(error),
                    None => Ok(()),
                }
            }

            Action::Show { id, comments_page } => {
                self.enter(Route::PostDetails(id.clone()))?;
                let mut page = PostDetailPage::new(&self.app, id);
                let view = page
                    .change_comments_page(&mut self.app, comments_page)
                    .await?;
                page.leave(&mut self.app);
                render::post_detail(&view);
                if view.post.is_none() {
                    bail!("post {} not found", page.post_id());
                }
                Ok(())
            }

            Action::Create { title, content } => {
                self.enter(Route::NewPost)?;
                let mut page = PostFormPage::create();
                page.form = PostParams { title, content };
                let outcome = page.submit(&mut self.app).await;
                check(outcome, page.server_error.as_deref())
            }

            Action::Edit { id, title, content } => {
                self.enter(Route::EditPost(id.clone()))?;
                let mut page = PostFormPage::edit(id.clone());
                page.load(&mut self.app)
                    .await
                    .with_context(|| format!("Failed to load post {}", id))?;
                if let Some(title) = title {
                    page.form.title = title;
                }
                if let Some(content) = content {
                    page.form.content = content;
                }
                let outcome = page.submit(&mut self.app).await;
                check(outcome, page.server_error.as_deref())
            }

            Action::Delete { id } => {
                self.enter(Route::PostDetails(id.clone()))?;
                let mut page = PostDetailPage::new(&self.app, id);
                let outcome = page.delete_post(&mut self.app).await;
                check(outcome, page.server_error.as_deref())
            }

            Action::Comment { post_id, text } => {
                self.enter(Route::PostDetails(post_id.clone()))?;
                let mut page = PostDetailPage::new(&self.app, post_id);
                page.comment = text;
                let outcome = page.add_comment(&mut self.app).await;
                check(outcome, page.server_error.as_deref())
            }

            Action::DeleteComment {
                post_id,
                comment_id,
            } => {
                self.enter(Route::PostDetails(post_id.clone()))?;
                let mut page = PostDetailPage::new(&self.app, post_id);
                page.delete_comment(&mut self.app, &comment_id)
                    .await
                    .context("Failed to delete comment")
            }
        }
    }

    /// Drop failed optimistic entries
    pub fn dismiss_failed(&mut self) -> Result<()> {
        self.app.store.dispatch(PostsAction::DismissFailed)?;
        Ok(())
    }

    pub fn list_page(&self) -> u32 {
        self.list.page()
    }

    /// Current route, for the shell prompt
    pub fn location(&self) -> String {
        self.app.route().path()
    }

    /// Show whatever page the route points at
    pub async fn open(&mut self, path: &str) -> Result<()> {
        let route = Route::parse(path);
        let landed = self.app.navigate(route).clone();
        match landed {
            Route::Posts => {
                let page = self.list.page();
                self.execute(Action::List { page }).await
            }
            Route::PostDetails(id) => {
                self.execute(Action::Show {
                    id,
                    comments_page: 1,
                })
                .await
            }
            Route::NotFound(path) => bail!("no page at {}", path),
            other => {
                println!("📍 {}", other);
                Ok(())
            }
        }
    }
}

fn check(outcome: SubmitOutcome, inline: Option<&str>) -> Result<()> {
    match outcome {
        SubmitOutcome::Succeeded(route) => {
            tracing::debug!("Landed on {}", route);
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            println!("⚠️  Please fix the following:");
            render::validation(&errors);
            bail!("validation failed")
        }
        SubmitOutcome::Failed(e) => {
            if let Some(inline) = inline {
                println!("   {}", inline);
            }
            Err(e.into())
        }
    }
}
