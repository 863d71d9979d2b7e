use tg_store::SharedStore;
use tg_workspace::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Registration is not implemented in demo")]
    RegistrationUnavailable,
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingFields => "MISSING_FIELDS",
            AuthError::RegistrationUnavailable => "REGISTRATION_UNAVAILABLE",
        }
    }
}

/// Session-scoped values every view reads: the authentication flag and the
/// theme. The flag is never persisted; a new context always starts signed out.
pub struct SessionContext {
    store: SharedStore,
    authenticated: bool,
    theme: Theme,
}

impl SessionContext {
    pub fn new(store: SharedStore) -> Self {
        let theme = Theme::load(&*store);
        Self {
            store,
            authenticated: false,
            theme,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Any non-empty credential pair signs in. Registration is not offered.
    pub fn authenticate(
        &mut self,
        mode: AuthMode,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        if mode == AuthMode::Register {
            return Err(AuthError::RegistrationUnavailable);
        }
        self.authenticated = true;
        tracing::info!("Signed in");
        Ok(())
    }

    pub fn sign_out(&mut self) {
        if self.authenticated {
            tracing::info!("Signed out");
        }
        self.authenticated = false;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = self.theme.save(&*self.store) {
            tracing::warn!(code = e.error_code(), "Failed to persist theme: {}", e);
        }
        self.theme
    }
}
