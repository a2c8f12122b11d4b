use crate::models::detection_types::{DetectionResult, DetectionStatus, SessionState};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Owner of the per-tab session record. All writes go through these methods;
/// readers only ever see cloned snapshots.
///
/// Every `begin` and `reset` bumps the generation. The file-read and network
/// completions carry the generation they were started under and are dropped
/// if it no longer matches, so a reset (or a newer upload) supersedes
/// anything still in flight without needing transport cancellation.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<Mutex<SessionState>>,
    generation: Arc<AtomicU64>,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore {
            state: Arc::new(Mutex::new(SessionState::initial())),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.lock().unwrap().clone()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Start a new analysis: clears any previous preview/result and moves to
    /// `uploading`. Returns the generation the caller must present with every
    /// later completion.
    pub fn begin(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut state = self.state.lock().unwrap();
        state.status = DetectionStatus::Uploading;
        state.image_preview = None;
        state.result = None;
        generation
    }

    /// Publish the preview once the file read finishes, regardless of how the
    /// network side is doing. Preview and status/result are disjoint fields.
    pub fn set_preview(&self, generation: u64, data_url: String) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        let mut state = self.state.lock().unwrap();
        state.image_preview = Some(data_url);
        true
    }

    /// Mark the prediction request as in flight.
    pub fn set_processing(&self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        let mut state = self.state.lock().unwrap();
        if state.status != DetectionStatus::Uploading {
            return false;
        }
        state.status = DetectionStatus::Processing;
        true
    }

    pub fn complete(&self, generation: u64, result: DetectionResult) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        let mut state = self.state.lock().unwrap();
        state.status = DetectionStatus::Complete;
        state.result = Some(result);
        true
    }

    pub fn fail(&self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        let mut state = self.state.lock().unwrap();
        state.status = DetectionStatus::Error;
        state.result = None;
        true
    }

    /// "Analyze another image": unconditionally back to the initial record.
    /// The generation bump orphans any completion still in flight.
    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.state.lock().unwrap() = SessionState::initial();
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_result_invariant(store: &SessionStore) {
        let state = store.snapshot();
        assert_eq!(
            state.result.is_some(),
            state.status == DetectionStatus::Complete,
            "result must be Some exactly when status is complete, got {:?}",
            state
        );
    }

    fn some_result() -> DetectionResult {
        DetectionResult {
            is_real: true,
            confidence: 0.91,
        }
    }

    #[test]
    fn happy_path_walks_idle_uploading_processing_complete() {
        let store = SessionStore::new();
        assert_eq!(store.snapshot().status, DetectionStatus::Idle);
        assert_result_invariant(&store);

        let generation = store.begin();
        assert_eq!(store.snapshot().status, DetectionStatus::Uploading);
        assert_result_invariant(&store);

        assert!(store.set_processing(generation));
        assert_eq!(store.snapshot().status, DetectionStatus::Processing);
        assert_result_invariant(&store);

        assert!(store.complete(generation, some_result()));
        let state = store.snapshot();
        assert_eq!(state.status, DetectionStatus::Complete);
        assert_eq!(state.result, Some(some_result()));
        assert_result_invariant(&store);
    }

    #[test]
    fn failure_path_ends_in_error_with_no_result() {
        let store = SessionStore::new();
        let generation = store.begin();
        store.set_processing(generation);

        assert!(store.fail(generation));
        let state = store.snapshot();
        assert_eq!(state.status, DetectionStatus::Error);
        assert!(state.result.is_none());
        assert_result_invariant(&store);
    }

    #[test]
    fn preview_lands_independently_of_network_order() {
        let store = SessionStore::new();

        // Preview before the response.
        let generation = store.begin();
        assert!(store.set_preview(generation, "data:a".to_string()));
        store.set_processing(generation);
        store.complete(generation, some_result());
        assert_eq!(store.snapshot().image_preview.as_deref(), Some("data:a"));

        // Response before the preview.
        let generation = store.begin();
        store.set_processing(generation);
        store.complete(generation, some_result());
        assert!(store.set_preview(generation, "data:b".to_string()));
        let state = store.snapshot();
        assert_eq!(state.image_preview.as_deref(), Some("data:b"));
        assert_eq!(state.status, DetectionStatus::Complete);
    }

    #[test]
    fn reset_restores_exact_initial_values() {
        let store = SessionStore::new();
        let generation = store.begin();
        store.set_preview(generation, "data:x".to_string());
        store.set_processing(generation);
        store.complete(generation, some_result());

        store.reset();
        assert_eq!(store.snapshot(), SessionState::initial());
        assert_result_invariant(&store);

        // Same from the error state.
        let generation = store.begin();
        store.fail(generation);
        store.reset();
        assert_eq!(store.snapshot(), SessionState::initial());
    }

    #[test]
    fn stale_completions_are_discarded_after_reset() {
        let store = SessionStore::new();
        let generation = store.begin();
        store.set_processing(generation);

        store.reset();

        assert!(!store.complete(generation, some_result()));
        assert!(!store.fail(generation));
        assert!(!store.set_preview(generation, "data:stale".to_string()));
        assert_eq!(store.snapshot(), SessionState::initial());
    }

    #[test]
    fn newer_upload_supersedes_in_flight_analysis() {
        let store = SessionStore::new();
        let first = store.begin();
        store.set_processing(first);

        let second = store.begin();
        assert!(!store.complete(
            first,
            DetectionResult {
                is_real: false,
                confidence: 0.2,
            }
        ));
        assert_eq!(store.snapshot().status, DetectionStatus::Uploading);

        store.set_processing(second);
        assert!(store.complete(second, some_result()));
        assert_eq!(store.snapshot().result, Some(some_result()));
    }

    #[test]
    fn processing_requires_uploading_first() {
        let store = SessionStore::new();
        let generation = store.begin();
        store.set_processing(generation);
        // A second processing mark on the same generation is a no-op.
        assert!(!store.set_processing(generation));
        assert_eq!(store.snapshot().status, DetectionStatus::Processing);
    }

    #[tokio::test]
    async fn concurrent_preview_and_completion_commute() {
        let store = SessionStore::new();
        let generation = store.begin();
        store.set_processing(generation);

        let preview_store = store.clone();
        let preview = tokio::spawn(async move {
            preview_store.set_preview(generation, "data:race".to_string())
        });
        let complete_store = store.clone();
        let complete =
            tokio::spawn(async move { complete_store.complete(generation, some_result()) });

        assert!(preview.await.unwrap());
        assert!(complete.await.unwrap());

        let state = store.snapshot();
        assert_eq!(state.status, DetectionStatus::Complete);
        assert_eq!(state.image_preview.as_deref(), Some("data:race"));
        assert_eq!(state.result, Some(some_result()));
    }
}
