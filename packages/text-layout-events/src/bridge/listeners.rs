use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use smol_str::SmolStr;
use text_layout_traits::{EmitError, EventEmitter, EventPayload};

/// Callback invoked with the payload of an event it was registered for
pub type Listener = Arc<dyn Fn(&EventPayload) -> Result<(), EmitError> + Send + Sync>;

/// Handle returned by [`ListenerRegistry::add_listener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Synchronous fan-out of events to registered callbacks.
///
/// Listeners for an event run in registration order on the thread calling
/// [`emit`](EventEmitter::emit). The registry lock is released before any listener
/// runs, so listeners may add or remove listeners themselves.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: RwLock<HashMap<SmolStr, Vec<(ListenerId, Listener)>>>,
    next_id: AtomicU64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener<F>(&self, event_name: &str, listener: F) -> ListenerId
    where
        F: Fn(&EventPayload) -> Result<(), EmitError> + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .entry(SmolStr::new(event_name))
            .or_default()
            .push((id, Arc::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write();
        let mut removed = false;
        listeners.retain(|_, entries| {
            let before = entries.len();
            entries.retain(|(entry_id, _)| *entry_id != id);
            removed |= entries.len() != before;
            !entries.is_empty()
        });
        removed
    }

    pub fn listener_count(&self, event_name: &str) -> usize {
        self.listeners
            .read()
            .get(event_name)
            .map_or(0, |entries| entries.len())
    }
}

impl EventEmitter for ListenerRegistry {
    fn emit(&self, event_name: &str, payload: EventPayload) -> Result<(), EmitError> {
        let targets: Vec<Listener> = match self.listeners.read().get(event_name) {
            Some(entries) => entries.iter().map(|(_, listener)| Arc::clone(listener)).collect(),
            None => return Ok(()),
        };

        for listener in targets {
            if let Err(err) = listener(&payload) {
                log::warn!("Listener for '{event_name}' failed: {err}");
                return Err(err);
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listeners = self.listeners.read();
        let mut map = f.debug_map();
        for (name, entries) in listeners.iter() {
            map.entry(name, &entries.len());
        }
        map.finish()
    }
}
