use super::SubmitOutcome;
use crate::app::App;
use crate::models::SignInParams;
use crate::router::Route;
use crate::validation::{validate_sign_in, ValidationErrors};

#[derive(Debug, Default)]
pub struct LoginPage {
    pub form: SignInParams,
    pub errors: ValidationErrors,
    pub server_error: Option<String>,
}

impl LoginPage {
    pub fn new(form: SignInParams) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    pub async fn submit(&mut self, app: &mut App) -> SubmitOutcome {
        self.server_error = None;
        if let Err(errors) = validate_sign_in(&self.form) {
            self.errors = errors.clone();
            return SubmitOutcome::Invalid(errors);
        }
        self.errors = ValidationErrors::new();

        let toast = app.notifier.loading("Logging in, please hold on...");

        match app.sign_in(self.form.clone()).await {
            Ok(_) => {
                app.notifier.success(toast, "Login successful");
                let route = app.navigate(Route::Posts).clone();
                SubmitOutcome::Succeeded(route)
            }
            Err(e) => {
                tracing::warn!("Failed to sign in: {}", e);
                app.notifier.error(toast, "Failed to login");
                self.server_error = Some("Failed to sign in".to_string());
                SubmitOutcome::Failed(e)
            }
        }
    }
}
