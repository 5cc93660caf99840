//! Active-format tracking.
//!
//! The tracker requeries the host surface after every edit or selection change
//! and publishes the resulting [`FormatSnapshot`] to its subscribers (the
//! toolbar). Queries are best-effort: a capability whose query fails reads as
//! inactive and the remaining queries still run.

use crate::capability::Capability;
use crate::platform::EditSurface;
use crate::snapshot::FormatSnapshot;

/// Callback invoked with each newly published snapshot.
pub type SnapshotListener = Box<dyn FnMut(&FormatSnapshot)>;

/// Handle returned by [`FormatTracker::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

#[derive(Default)]
pub struct FormatTracker {
    current: FormatSnapshot,
    published: bool,
    next_id: u64,
    listeners: Vec<(SubscriberId, SnapshotListener)>,
}

impl FormatTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently computed snapshot.
    pub fn current(&self) -> FormatSnapshot {
        self.current
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&FormatSnapshot) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a subscriber. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Query every capability once and build a snapshot.
    pub fn query<S: EditSurface + ?Sized>(surface: &S) -> FormatSnapshot {
        FormatSnapshot::from_fn(|capability| match surface.query_state(capability) {
            Ok(active) => active,
            Err(e) => {
                tracing::debug!(
                    target: "newsdesk::tracker",
                    %capability,
                    error = %e,
                    "state query failed, treating as inactive"
                );
                false
            }
        })
    }

    /// Requery the surface and publish if the snapshot changed.
    ///
    /// The first refresh always publishes. Returns whether subscribers were
    /// notified.
    pub fn refresh<S: EditSurface + ?Sized>(&mut self, surface: &S) -> bool {
        let snapshot = Self::query(surface);
        if self.published && snapshot == self.current {
            tracing::trace!(target: "newsdesk::tracker", "snapshot unchanged");
            return false;
        }

        self.current = snapshot;
        self.published = true;
        tracing::trace!(
            target: "newsdesk::tracker",
            active = ?snapshot.active().map(Capability::name).collect::<Vec<_>>(),
            "publishing snapshot"
        );
        for (_, listener) in &mut self.listeners {
            listener(&snapshot);
        }
        true
    }
}
