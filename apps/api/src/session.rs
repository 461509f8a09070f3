//! In-memory registry of wizard sessions.
//!
//! Each session sits behind its own `tokio::sync::Mutex`. A generation stage
//! holds that lock for its whole run, so stages and edits on one session are
//! applied one at a time while other sessions proceed independently. The map
//! lock itself is only held long enough to look an entry up.
//!
//! Sessions idle for longer than the configured TTL are evicted by a
//! background sweep; a session whose lock is held is never idle.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::project::{GenerationSettings, InputPatch, ProjectState};

/// How often the eviction sweep runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

struct Entry {
    project: ProjectState,
    last_access: Instant,
}

type Slot = Arc<Mutex<Entry>>;

/// Exclusive access to one session's state until dropped.
pub struct SessionGuard(OwnedMutexGuard<Entry>);

impl Deref for SessionGuard {
    type Target = ProjectState;

    fn deref(&self) -> &ProjectState {
        &self.0.project
    }
}

impl DerefMut for SessionGuard {
    fn deref_mut(&mut self) -> &mut ProjectState {
        &mut self.0.project
    }
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Slot>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, settings: GenerationSettings) -> (Uuid, ProjectState) {
        let id = Uuid::new_v4();
        let project = ProjectState::new(settings);
        let entry = Entry {
            project: project.clone(),
            last_access: Instant::now(),
        };
        self.inner
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(entry)));
        (id, project)
    }

    /// Locks one session, waiting for any stage already running on it.
    pub async fn lock(&self, id: Uuid) -> Result<SessionGuard, AppError> {
        let slot = self
            .inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))?;
        let mut guard = slot.lock_owned().await;
        guard.last_access = Instant::now();
        Ok(SessionGuard(guard))
    }

    pub async fn get(&self, id: Uuid) -> Result<ProjectState, AppError> {
        let session = self.lock(id).await?;
        Ok((*session).clone())
    }

    /// Replaces the stored state. The session must still exist.
    #[cfg(test)]
    pub async fn put(&self, id: Uuid, project: ProjectState) -> Result<(), AppError> {
        let mut session = self.lock(id).await?;
        *session = project;
        Ok(())
    }

    pub async fn update_inputs(&self, id: Uuid, patch: InputPatch) -> Result<ProjectState, AppError> {
        self.modify(id, |p| p.apply_inputs(patch)).await
    }

    pub async fn update_settings(
        &self,
        id: Uuid,
        settings: GenerationSettings,
    ) -> Result<ProjectState, AppError> {
        settings.validate()?;
        self.modify(id, |p| p.settings = settings).await
    }

    pub async fn reset(&self, id: Uuid) -> Result<ProjectState, AppError> {
        self.modify(id, ProjectState::reset).await
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Drops every session not touched within `ttl`. Returns how many went.
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let now = Instant::now();
        let mut map = self.inner.write().await;
        let before = map.len();
        map.retain(|_, slot| match slot.try_lock() {
            Ok(entry) => now.duration_since(entry.last_access) < ttl,
            // locked: a stage or edit is in progress
            Err(_) => true,
        });
        before - map.len()
    }

    /// Runs `evict_idle` every minute for the life of the process.
    pub fn spawn_eviction(&self, ttl: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
            loop {
                ticker.tick().await;
                let evicted = store.evict_idle(ttl).await;
                if evicted > 0 {
                    info!("Evicted {evicted} idle sessions");
                }
            }
        })
    }

    async fn modify<F>(&self, id: Uuid, f: F) -> Result<ProjectState, AppError>
    where
        F: FnOnce(&mut ProjectState),
    {
        let mut session = self.lock(id).await?;
        f(&mut *session);
        Ok((*session).clone())
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::Stage;

    #[tokio::test]
    async fn test_create_and_get() {
        let store = SessionStore::new();
        let (id, created) = store.create(GenerationSettings::default()).await;
        let fetched = store.get(id).await.unwrap();
        assert_eq!(created, fetched);
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let store = SessionStore::new();
        let err = store.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(store.put(Uuid::new_v4(), ProjectState::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let (a, _) = store.create(GenerationSettings::default()).await;
        let (b, _) = store.create(GenerationSettings::default()).await;
        store
            .update_inputs(
                a,
                InputPatch {
                    job_title: Some("A사".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(store.get(a).await.unwrap().job_title, "A사");
        assert!(store.get(b).await.unwrap().job_title.is_empty());
    }

    #[tokio::test]
    async fn test_update_settings_validates() {
        let store = SessionStore::new();
        let (id, _) = store.create(GenerationSettings::default()).await;
        let bad = GenerationSettings {
            temperature: 2.0,
            ..Default::default()
        };
        assert!(store.update_settings(id, bad).await.is_err());
        assert!((store.get(id).await.unwrap().settings.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_reset_and_remove() {
        let store = SessionStore::new();
        let (id, mut p) = store.create(GenerationSettings::default()).await;
        p.draft = Some("초안".into());
        store.put(id, p).await.unwrap();
        assert_eq!(store.get(id).await.unwrap().stage(), Stage::DraftGenerated);

        let reset = store.reset(id).await.unwrap();
        assert_eq!(reset.stage(), Stage::Empty);

        store.remove(id).await.unwrap();
        assert!(store.get(id).await.is_err());
    }

    #[tokio::test]
    async fn test_edit_waits_for_locked_session() {
        let store = SessionStore::new();
        let (id, _) = store.create(GenerationSettings::default()).await;

        let mut session = store.lock(id).await.unwrap();
        let edit = tokio::spawn({
            let store = store.clone();
            async move {
                store
                    .update_inputs(
                        id,
                        InputPatch {
                            jd_text: Some("새 공고".into()),
                            ..Default::default()
                        },
                    )
                    .await
            }
        });
        tokio::task::yield_now().await;
        assert!(!edit.is_finished());

        session.draft = Some("초안".into());
        drop(session);

        let updated = edit.await.unwrap().unwrap();
        assert_eq!(updated.jd_text, "새 공고");
        assert_eq!(updated.draft.as_deref(), Some("초안"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_is_evicted() {
        let store = SessionStore::new();
        let ttl = Duration::from_secs(600);
        let (idle, _) = store.create(GenerationSettings::default()).await;
        let (active, _) = store.create(GenerationSettings::default()).await;

        tokio::time::advance(Duration::from_secs(400)).await;
        store.get(active).await.unwrap();
        tokio::time::advance(Duration::from_secs(300)).await;

        assert_eq!(store.evict_idle(ttl).await, 1);
        assert!(matches!(store.get(idle).await, Err(AppError::NotFound(_))));
        assert!(store.get(active).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_locked_session_is_not_evicted() {
        let store = SessionStore::new();
        let (id, _) = store.create(GenerationSettings::default()).await;
        let session = store.lock(id).await.unwrap();

        tokio::time::advance(Duration::from_secs(7200)).await;
        assert_eq!(store.evict_idle(Duration::from_secs(60)).await, 0);

        drop(session);
        assert!(store.get(id).await.is_ok());
    }
}
