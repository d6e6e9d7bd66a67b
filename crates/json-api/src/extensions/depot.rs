//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use storefront_app::auth::AuthenticatedUser;

const CURRENT_USER_KEY: &str = "storefront.current_user";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }
}

/// Access to the authenticated user injected by the auth middleware.
pub(crate) trait CurrentUserExt {
    fn insert_current_user(&mut self, user: AuthenticatedUser);

    fn current_user_or_401(&self) -> Result<&AuthenticatedUser, StatusError>;
}

impl CurrentUserExt for Depot {
    fn insert_current_user(&mut self, user: AuthenticatedUser) {
        self.insert(CURRENT_USER_KEY, user);
    }

    fn current_user_or_401(&self) -> Result<&AuthenticatedUser, StatusError> {
        self.get::<AuthenticatedUser>(CURRENT_USER_KEY)
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }
}
