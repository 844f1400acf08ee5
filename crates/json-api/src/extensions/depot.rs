//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use bookstore_app::auth::Identity;

const IDENTITY_DEPOT_KEY: &str = "identity";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_identity(&mut self, identity: Identity);

    /// The authenticated caller, or 401 when the auth middleware did not run.
    fn identity_or_401(&self) -> Result<Identity, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_identity(&mut self, identity: Identity) {
        self.insert(IDENTITY_DEPOT_KEY, identity);
    }

    fn identity_or_401(&self) -> Result<Identity, StatusError> {
        self.get::<Identity>(IDENTITY_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}

#[cfg(test)]
mod tests {
    use bookstore_app::domain::users::records::{Role, UserUuid};
    use salvo::http::StatusCode;
    use testresult::TestResult;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn identity_round_trips_through_depot() -> TestResult {
        let identity = Identity {
            user_uuid: UserUuid::from_uuid(Uuid::nil()),
            role: Role::Staff,
        };

        let mut depot = Depot::new();

        depot.insert_identity(identity);

        assert_eq!(depot.identity_or_401()?, identity);

        Ok(())
    }

    #[test]
    fn missing_identity_is_unauthorized() {
        let depot = Depot::new();

        assert_eq!(
            depot.identity_or_401().map_err(|e| e.code),
            Err(StatusCode::UNAUTHORIZED)
        );
    }
}
