use std::fmt::{Debug, Display};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks and DTOs)
// =============================================================================

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the assigned ID and creation parameters
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, String>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), String> { Ok(()) }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), String>;
    fn on_delete(&self) -> Result<(), String> { Ok(()) }
}

/// Errors raised by the framework itself, independent of any entity.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
    #[error("Rejected by entity hook: {0}")]
    Rejected(String),
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<Option<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<bool>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Sole owner of a collection of entities.
///
/// Every request is handled to completion before the next one is received,
/// so each create, update and delete is observed as one step. Entities are
/// kept in insertion order. IDs come from `next_id_fn`, which is expected to
/// be monotonic (an atomic counter) so removed IDs are never handed out again.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Vec<T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Inserts initial entities before the actor starts serving requests.
    ///
    /// Seeds draw their IDs from the same generator as regular creates.
    pub fn seed(
        &mut self,
        items: impl IntoIterator<Item = T::CreateParams>,
    ) -> Result<(), FrameworkError> {
        for params in items {
            self.insert_new(params)?;
        }
        Ok(())
    }

    #[instrument(name = "resource_actor", skip(self))]
    pub async fn run(mut self) {
        info!(entities = self.store.len(), "ResourceActor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    self.handle_create(params, respond_to);
                }
                ResourceRequest::Get { id, respond_to } => {
                    self.handle_get(id, respond_to);
                }
                ResourceRequest::List { respond_to } => {
                    self.handle_list(respond_to);
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    self.handle_update(id, patch, respond_to);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    self.handle_delete(id, respond_to);
                }
            }
        }

        info!("ResourceActor stopped");
    }

    fn insert_new(&mut self, params: T::CreateParams) -> Result<T, FrameworkError> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create_params(id, params).map_err(FrameworkError::Rejected)?;
        item.on_create().map_err(FrameworkError::Rejected)?;
        self.store.push(item.clone());
        Ok(item)
    }

    fn position(&self, id: &T::Id) -> Option<usize> {
        self.store.iter().position(|item| item.id() == id)
    }

    #[instrument(skip(self, params, respond_to))]
    fn handle_create(&mut self, params: T::CreateParams, respond_to: Response<T>) {
        debug!("Processing create request");
        let result = self.insert_new(params);
        match &result {
            Ok(item) => info!(id = %item.id(), "Entity created"),
            Err(e) => warn!(error = %e, "Entity creation rejected"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(entity_id = %id), skip(self, id, respond_to))]
    fn handle_get(&self, id: T::Id, respond_to: Response<Option<T>>) {
        debug!("Processing get request");
        let item = self.store.iter().find(|item| item.id() == &id).cloned();
        if item.is_none() {
            debug!("Entity not found");
        }
        let _ = respond_to.send(Ok(item));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_list(&self, respond_to: Response<Vec<T>>) {
        debug!(count = self.store.len(), "Processing list request");
        let _ = respond_to.send(Ok(self.store.clone()));
    }

    /// Applies the patch to a copy and swaps it in, so a rejected patch
    /// leaves the stored entity untouched.
    #[instrument(fields(entity_id = %id), skip(self, id, patch, respond_to))]
    fn handle_update(&mut self, id: T::Id, patch: T::Patch, respond_to: Response<Option<T>>) {
        debug!("Processing update request");
        let Some(index) = self.position(&id) else {
            debug!("Entity not found for update");
            let _ = respond_to.send(Ok(None));
            return;
        };

        let mut updated = self.store[index].clone();
        if let Err(e) = updated.on_update(patch) {
            warn!(error = %e, "Update rejected");
            let _ = respond_to.send(Err(FrameworkError::Rejected(e)));
            return;
        }
        self.store[index] = updated.clone();
        info!("Entity updated");
        let _ = respond_to.send(Ok(Some(updated)));
    }

    #[instrument(fields(entity_id = %id), skip(self, id, respond_to))]
    fn handle_delete(&mut self, id: T::Id, respond_to: Response<bool>) {
        debug!("Processing delete request");
        let Some(index) = self.position(&id) else {
            debug!("Entity not found for delete");
            let _ = respond_to.send(Ok(false));
            return;
        };

        if let Err(e) = self.store[index].on_delete() {
            warn!(error = %e, "Delete rejected");
            let _ = respond_to.send(Err(FrameworkError::Rejected(e)));
            return;
        }
        self.store.remove(index);
        info!("Entity deleted");
        let _ = respond_to.send(Ok(true));
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<bool, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
