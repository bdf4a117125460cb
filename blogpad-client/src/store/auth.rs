use crate::storage::TOKEN_KEY;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub token: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    SetToken(String),
    Logout,
}

/// Write to durable storage requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageEffect {
    Set { key: &'static str, value: String },
    Remove { key: &'static str },
}

/// Neither transition depends on the previous token.
pub fn reduce(_state: AuthState, action: &AuthAction) -> (AuthState, Option<StorageEffect>) {
    match action {
        AuthAction::SetToken(token) => (
            AuthState {
                token: Some(token.clone()),
            },
            Some(StorageEffect::Set {
                key: TOKEN_KEY,
                value: token.clone(),
            }),
        ),
        AuthAction::Logout => (
            AuthState::default(),
            Some(StorageEffect::Remove { key: TOKEN_KEY }),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_token_persists() {
        let (state, effect) = reduce(AuthState::default(), &AuthAction::SetToken("t1".into()));
        assert!(state.is_authenticated());
        assert_eq!(
            effect,
            Some(StorageEffect::Set {
                key: TOKEN_KEY,
                value: "t1".into()
            })
        );
    }

    #[test]
    fn logout_clears_state_and_storage() {
        let logged_in = AuthState {
            token: Some("t1".into()),
        };
        let (state, effect) = reduce(logged_in, &AuthAction::Logout);
        assert_eq!(state.token, None);
        assert_eq!(effect, Some(StorageEffect::Remove { key: TOKEN_KEY }));
    }
}
