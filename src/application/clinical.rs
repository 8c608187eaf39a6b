use std::sync::Arc;

use subtle::ConstantTimeEq;

use crate::domain::clinical::{
    BiochemicalRecord, MeasurementRecord, NutritionPlanRecord, UserProfile, VitalSignsRecord,
};
use crate::domain::errors::DomainError;
use crate::domain::ports::ClinicalStore;

/// Login and clinical-record reads. All store calls run on the blocking pool;
/// the store itself is sync diesel.
pub struct ClinicalService {
    store: Arc<dyn ClinicalStore>,
}

impl ClinicalService {
    pub fn new(store: Arc<dyn ClinicalStore>) -> Self {
        Self { store }
    }

    async fn with_store<T, F>(&self, op: F) -> Result<T, DomainError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn ClinicalStore) -> Result<T, DomainError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?
    }

    /// Exact-match credential check. `None` covers both unknown email and
    /// wrong password; callers present the same generic failure for either.
    pub async fn authenticate(
        &self,
        email: String,
        password: String,
    ) -> Result<Option<UserProfile>, DomainError> {
        let account = self
            .with_store(move |store| store.find_user_by_email(&email))
            .await?;

        Ok(account.and_then(|account| {
            if credentials_match(&account.password, &password) {
                Some(UserProfile::from(account))
            } else {
                None
            }
        }))
    }

    pub async fn measurements(&self, folio: i32) -> Result<Vec<MeasurementRecord>, DomainError> {
        self.with_store(move |store| store.measurements(folio)).await
    }

    pub async fn vital_signs(&self, folio: i32) -> Result<Vec<VitalSignsRecord>, DomainError> {
        self.with_store(move |store| store.vital_signs(folio)).await
    }

    pub async fn biochemical_results(
        &self,
        folio: i32,
    ) -> Result<Vec<BiochemicalRecord>, DomainError> {
        self.with_store(move |store| store.biochemical_results(folio))
            .await
    }

    pub async fn nutrition_plans(
        &self,
        folio: i32,
    ) -> Result<Vec<NutritionPlanRecord>, DomainError> {
        self.with_store(move |store| store.nutrition_plans(folio))
            .await
    }
}

/// Constant-time comparison so response timing does not reveal how much of
/// the password matched. Length differences still short-circuit inside
/// `ct_eq`; that leak is accepted.
fn credentials_match(stored: &str, supplied: &str) -> bool {
    stored.as_bytes().ct_eq(supplied.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clinical::UserAccount;

    struct FixedStore {
        user: Option<UserAccount>,
    }

    impl ClinicalStore for FixedStore {
        fn find_user_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError> {
            Ok(self
                .user
                .as_ref()
                .filter(|u| u.email == email)
                .cloned())
        }

        fn measurements(&self, _folio: i32) -> Result<Vec<MeasurementRecord>, DomainError> {
            Ok(vec![])
        }

        fn vital_signs(&self, _folio: i32) -> Result<Vec<VitalSignsRecord>, DomainError> {
            Ok(vec![])
        }

        fn biochemical_results(&self, _folio: i32) -> Result<Vec<BiochemicalRecord>, DomainError> {
            Ok(vec![])
        }

        fn nutrition_plans(&self, _folio: i32) -> Result<Vec<NutritionPlanRecord>, DomainError> {
            Ok(vec![])
        }
    }

    fn service_with_ana() -> ClinicalService {
        ClinicalService::new(Arc::new(FixedStore {
            user: Some(UserAccount {
                id: 42,
                name: "Ana Torres".into(),
                email: "ana@example.com".into(),
                password: "hunter2".into(),
            }),
        }))
    }

    #[tokio::test]
    async fn valid_credentials_yield_the_profile_with_folio() {
        let profile = service_with_ana()
            .authenticate("ana@example.com".into(), "hunter2".into())
            .await
            .expect("store should not fail")
            .expect("credentials should match");
        assert_eq!(profile.folio, 42);
        assert_eq!(profile.email, "ana@example.com");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_identical() {
        let svc = service_with_ana();

        let wrong_password = svc
            .authenticate("ana@example.com".into(), "letmein".into())
            .await
            .expect("store should not fail");
        let unknown_email = svc
            .authenticate("nadie@example.com".into(), "hunter2".into())
            .await
            .expect("store should not fail");

        assert!(wrong_password.is_none());
        assert!(unknown_email.is_none());
    }

    #[test]
    fn comparison_handles_unequal_lengths() {
        assert!(credentials_match("hunter2", "hunter2"));
        assert!(!credentials_match("hunter2", "hunter"));
        assert!(!credentials_match("hunter2", "hunter22"));
        assert!(!credentials_match("", "x"));
    }
}
