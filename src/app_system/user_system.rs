use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::actor_framework::{FrameworkError, ResourceActor};
use crate::clients::UserClient;
use crate::domain::{seed_users, User, UserCreate};

/// Owns the user store actor and hands out clients to it.
///
/// Responsible for seeding the store, spawning the actor, and waiting for it
/// to drain on shutdown.
pub struct UserSystem {
    pub user_client: UserClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl UserSystem {
    /// Starts the store with the standard seed records (ids 1 and 2).
    pub fn new(buffer_size: usize) -> Result<Self, FrameworkError> {
        Self::with_seed(buffer_size, seed_users())
    }

    #[instrument(name = "user_system", skip(seed))]
    pub fn with_seed(buffer_size: usize, seed: Vec<UserCreate>) -> Result<Self, FrameworkError> {
        info!("Starting user system");

        let user_id_counter = Arc::new(AtomicU64::new(1));
        let next_user_id = move || user_id_counter.fetch_add(1, Ordering::SeqCst);

        let (mut user_actor, user_resource_client) = ResourceActor::<User>::new(buffer_size, next_user_id);
        user_actor.seed(seed)?;
        let user_client = UserClient::new(user_resource_client);
        let user_handle = tokio::spawn(user_actor.run());

        info!("User system started");

        Ok(Self {
            user_client,
            handles: vec![user_handle],
        })
    }

    /// Drops this system's client and waits for the actor to stop.
    ///
    /// The actor stops once every clone of the client is gone, so callers
    /// must release the clones they handed out (e.g. the HTTP router) first.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down user system");

        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("User system shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserPatch;
    use std::collections::BTreeSet;

    #[tokio::test]
    async fn test_concurrent_creates_receive_distinct_sequential_ids() {
        let system = UserSystem::new(8).unwrap();

        let tasks: Vec<_> = (0..50)
            .map(|i| {
                let client = system.user_client.clone();
                tokio::spawn(async move {
                    client
                        .create_user(UserCreate::new(format!("user {i}"), format!("u{i}@x.com"), "Load"))
                        .await
                })
            })
            .collect();

        let mut ids = BTreeSet::new();
        for task in tasks {
            let user = task.await.unwrap().unwrap();
            assert!(ids.insert(user.id), "duplicate id {}", user.id);
        }

        assert_eq!(ids, (3..=52).collect::<BTreeSet<u64>>());
        assert_eq!(system.user_client.list_users().await.unwrap().len(), 52);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_seeded_lifecycle() {
        let system = UserSystem::new(8).unwrap();
        let client = system.user_client.clone();

        let seeded: Vec<u64> = client.list_users().await.unwrap().iter().map(|u| u.id).collect();
        assert_eq!(seeded, vec![1, 2]);

        let created = client.create_user(UserCreate::new("A", "a@x.com", "D")).await.unwrap();
        assert_eq!(
            created,
            User { id: 3, name: "A".into(), email: "a@x.com".into(), department: "D".into() }
        );
        assert_eq!(client.get_user(3).await.unwrap(), Some(created.clone()));

        let listed = client.list_users().await.unwrap();
        assert_eq!(listed.iter().filter(|u| **u == created).count(), 1);

        assert!(client.delete_user(3).await.unwrap());
        assert_eq!(client.get_user(3).await.unwrap(), None);

        drop(client);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_ids_leave_store_unchanged() {
        let system = UserSystem::new(8).unwrap();
        let client = &system.user_client;

        assert_eq!(client.get_user(999).await.unwrap(), None);
        assert!(!client.delete_user(999).await.unwrap());
        assert_eq!(
            client.update_user(999, UserPatch::new("X", "x@x.com", "")).await.unwrap(),
            None
        );

        assert!(client.delete_user(2).await.unwrap());
        assert!(!client.delete_user(2).await.unwrap());
        assert_eq!(client.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_replaces_fields() {
        let system = UserSystem::new(8).unwrap();
        let client = &system.user_client;

        let updated = client
            .update_user(1, UserPatch::new("Vikas K", "vk@x.com", "Platform"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            updated,
            User { id: 1, name: "Vikas K".into(), email: "vk@x.com".into(), department: "Platform".into() }
        );
        assert_eq!(client.get_user(1).await.unwrap(), Some(updated));
        assert_eq!(client.list_users().await.unwrap().len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_to_one_user_are_never_torn() {
        let system = UserSystem::new(8).unwrap();

        let tasks: Vec<_> = (0..200)
            .map(|i| {
                let client = system.user_client.clone();
                tokio::spawn(async move {
                    client
                        .update_user(1, UserPatch::new(format!("n{i}"), format!("e{i}"), format!("d{i}")))
                        .await
                })
            })
            .collect();

        for task in tasks {
            let updated = task.await.unwrap().unwrap().unwrap();
            let suffix = &updated.name[1..];
            assert_eq!(updated.email, format!("e{suffix}"));
            assert_eq!(updated.department, format!("d{suffix}"));
        }

        let stored = system.user_client.get_user(1).await.unwrap().unwrap();
        assert_eq!(stored.id, 1);
        let suffix = &stored.name[1..];
        assert_eq!(stored.email, format!("e{suffix}"));
        assert_eq!(stored.department, format!("d{suffix}"));
        assert_eq!(system.user_client.list_users().await.unwrap().len(), 2);
    }
}
