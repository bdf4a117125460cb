use super::SubmitOutcome;
use crate::app::App;
use crate::models::SignUpParams;
use crate::router::Route;
use crate::validation::{validate_sign_up, ValidationErrors};

#[derive(Debug, Default)]
pub struct RegisterPage {
    pub form: SignUpParams,
    pub errors: ValidationErrors,
    pub server_error: Option<String>,
}

impl RegisterPage {
    pub fn new(form: SignUpParams) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    pub async fn submit(&mut self, app: &mut App) -> SubmitOutcome {
        self.server_error = None;
        if let Err(errors) = validate_sign_up(&self.form) {
            self.errors = errors.clone();
            return SubmitOutcome::Invalid(errors);
        }
        self.errors = ValidationErrors::new();

        let toast = app
            .notifier
            .loading("Creating your account, please hold on...");

        match app.sign_up(self.form.clone()).await {
            Ok(_) => {
                app.notifier.success(toast, "Account created successfully");
                let route = app.navigate(Route::Posts).clone();
                SubmitOutcome::Succeeded(route)
            }
            Err(e) => {
                tracing::warn!("Failed to sign up: {}", e);
                app.notifier.error(toast, "Failed to create account");
                self.server_error =
                    Some("Something went wrong while creating your account".to_string());
                SubmitOutcome::Failed(e)
            }
        }
    }
}
