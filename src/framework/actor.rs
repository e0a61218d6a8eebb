//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the core component that manages the lifecycle
//! and state of entities. It implements the "Server" side of the Actor Model, processing
//! messages sequentially and ensuring exclusive access to the entity store.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// This struct is the "Server" half of the actor. It owns the state (`store`) and
/// the receiver end of the channel. Each actor processes its own messages
/// *sequentially* in a loop, so the `store` needs no `Mutex` or `RwLock`.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ## Operations
///
/// * **Create**: generates the next ID, builds the entity with `T::from_create_params`,
///   rejects it if its [`natural_key`](ActorEntity::natural_key) is taken, runs `on_create`,
///   then stores it.
/// * **Get**: returns a clone of the entity if found, or `None`.
/// * **List**: returns clones of every entity matching the query, ordered by creation.
/// * **Update**: runs `on_update` against the stored entity and returns the new state.
/// * **Delete**: runs `on_delete`, then removes the entity.
/// * **Purge**: deletes every entity matching the query.
/// * **Action**: runs `handle_action` and returns its result.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, (u32, T)>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    fn key_taken(&self, key: &str) -> bool {
        self.store
            .values()
            .any(|(_, item)| item.natural_key().as_deref() == Some(key))
    }

    fn select(&self, query: &T::Query) -> Vec<(u32, T::Id)> {
        let mut selected: Vec<(u32, T::Id)> = self
            .store
            .iter()
            .filter(|(_, (_, item))| item.matches(query))
            .map(|(id, (seq, _))| (*seq, id.clone()))
            .collect();
        selected.sort_by_key(|(seq, _)| *seq);
        selected
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. This allows entities
    /// to access external dependencies (like other clients) that were created *after*
    /// the actor was instantiated but *before* the loop started.
    pub async fn run(mut self, context: T::Context) {
        // Just the type name (e.g., "Review" instead of "marketplace_core::model::review::Review")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let seq = self.next_id;
                    let id = T::Id::from(seq);

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Some(key) = item.natural_key() {
                                if self.key_taken(&key) {
                                    warn!(entity_type, %key, "Create conflicts with existing entity");
                                    let _ = respond_to.send(Err(FrameworkError::Conflict(key)));
                                    continue;
                                }
                            }
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.next_id += 1;
                            self.store.insert(id.clone(), (seq, item));
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).map(|(_, item)| item.clone());
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { query, respond_to } => {
                    let items: Vec<T> = self
                        .select(&query)
                        .into_iter()
                        .filter_map(|(_, id)| self.store.get(&id).map(|(_, item)| item.clone()))
                        .collect();
                    debug!(entity_type, ?query, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some((_, item)) = self.store.get_mut(&id) {
                        // Hooks mutate a copy so a failed update leaves the stored entity intact.
                        let mut candidate = item.clone();
                        if let Err(e) = candidate.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        *item = candidate;
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some((_, item)) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Purge { query, respond_to } => {
                    debug!(entity_type, ?query, "Purge");
                    let mut removed = 0usize;
                    let mut failure = None;
                    for (_, id) in self.select(&query) {
                        let Some((_, item)) = self.store.get(&id) else {
                            continue;
                        };
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed during purge");
                            failure = Some(FrameworkError::EntityError(Box::new(e)));
                            break;
                        }
                        self.store.remove(&id);
                        removed += 1;
                    }
                    info!(entity_type, removed, size = self.store.len(), "Purged");
                    let _ = respond_to.send(match failure {
                        Some(e) => Err(e),
                        None => Ok(removed),
                    });
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some((_, item)) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
