use crate::core::engine::ShippingEngine;
use crate::domain::model::{BoxRecord, BoxSubmission};
use crate::domain::ports::BoxStore;
use crate::utils::error::{Result, ShippingError};

const SAVE_CONTEXT: &str = "Failed to save box";
const FETCH_CONTEXT: &str = "Failed to fetch boxes";

/// Saves and lists boxes through a store, pricing them on the way in.
pub struct BoxService<S: BoxStore> {
    store: S,
    engine: ShippingEngine,
}

impl<S: BoxStore> BoxService<S> {
    pub fn new(store: S, engine: ShippingEngine) -> Self {
        Self { store, engine }
    }

    pub fn engine(&self) -> &ShippingEngine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Live cost preview for a form that has not been submitted yet.
    pub fn estimate(&self, weight: f64, code: &str) -> Result<f64> {
        self.engine.compute_cost_for_code(weight, code)
    }

    pub async fn save_box(&self, submission: &BoxSubmission) -> Result<BoxRecord> {
        let errors = self.engine.validate(submission);
        if !errors.is_valid() {
            return Err(ShippingError::Validation(errors));
        }

        let payload = self.engine.build_record(submission)?;
        tracing::debug!(
            "Saving box for {} to {} ({} kg)",
            payload.receiver_name,
            payload.destination_country,
            payload.weight
        );

        let record = self
            .store
            .insert(payload)
            .await
            .map_err(|e| prefix(SAVE_CONTEXT, e))?;

        tracing::info!(
            "Saved box {} with shipping cost {}",
            record.id,
            self.engine.format_currency(record.shipping_cost)
        );
        Ok(record)
    }

    pub async fn fetch_boxes(&self) -> Result<Vec<BoxRecord>> {
        let records = self
            .store
            .list_all()
            .await
            .map_err(|e| prefix(FETCH_CONTEXT, e))?;

        tracing::debug!("Fetched {} boxes", records.len());
        Ok(records)
    }
}

// Store errors keep their message verbatim under the operation's context.
fn prefix(context: &'static str, error: ShippingError) -> ShippingError {
    let message = match error {
        ShippingError::Store { message, .. } => message,
        other => other.to_string(),
    };
    tracing::error!("{}: {}", context, message);
    ShippingError::store(context, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::NewBox;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingStore {
        calls: AtomicUsize,
    }

    impl BoxStore for FailingStore {
        async fn insert(&self, _payload: NewBox) -> Result<BoxRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ShippingError::store("insert", "connection refused"))
        }

        async fn list_all(&self) -> Result<Vec<BoxRecord>> {
            Err(ShippingError::ConfigError {
                message: "no table".to_string(),
            })
        }
    }

    fn service() -> BoxService<FailingStore> {
        BoxService::new(
            FailingStore {
                calls: AtomicUsize::new(0),
            },
            ShippingEngine::default(),
        )
    }

    #[tokio::test]
    async fn test_invalid_submission_never_reaches_store() {
        let service = service();
        let result = service.save_box(&BoxSubmission::default()).await;

        match result {
            Err(ShippingError::Validation(errors)) => assert_eq!(errors.len(), 4),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(service.store().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_store_errors_are_prefixed() {
        let service = service();
        let submission = BoxSubmission {
            receiver_name: "Bob".to_string(),
            weight: 1.0,
            box_color: "0,0,0".to_string(),
            destination_country: "CHINA".to_string(),
        };

        let err = service.save_box(&submission).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to save box: connection refused");

        let err = service.fetch_boxes().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to fetch boxes: Configuration error: no table"
        );
    }

    #[test]
    fn test_estimate() {
        let service = service();
        assert_eq!(service.estimate(2.0, "BRAZIL").unwrap(), 2.0 * 15.63);
        assert!(service.estimate(2.0, "").is_err());
    }
}
