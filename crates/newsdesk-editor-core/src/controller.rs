//! Edit-surface controller: sync between the host page's `value` and the
//! surface's live content.
//!
//! The surface is uncontrolled, so the parent-owned value can only flow down
//! by reseeding it wholesale. Reseeding is gated on two checks:
//!
//! 1. the new value must differ from what the surface already holds, and
//! 2. the surface must not hold local edits the parent has not yet echoed back.
//!
//! Reseeding never emits a change notification; only local edits do.

use crate::platform::EditSurface;

/// Callback receiving the serialized content after each local edit.
pub type ChangeCallback = Box<dyn FnMut(&str)>;

/// What an external value update did to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Surface already matched, or the parent repeated its last value.
    Unchanged,
    /// Surface content was replaced.
    Reseeded,
    /// Surface holds unacknowledged local edits; the update was not applied.
    Deferred,
}

#[derive(Default)]
pub struct SurfaceController {
    /// Surface content as of the last reseed or parent echo.
    synced: String,
    /// Last parent value that was applied or echoed.
    last_external: Option<String>,
    on_change: Option<ChangeCallback>,
}

impl SurfaceController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_on_change(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn clear_on_change(&mut self) {
        self.on_change = None;
    }

    /// Seed the surface from the parent's initial value, if they differ.
    pub fn initialize<S: EditSurface + ?Sized>(&mut self, surface: &mut S, external: &str) -> SyncOutcome {
        self.last_external = Some(external.to_string());
        self.reseed_if_different(surface, external)
    }

    /// The surface content changed locally: serialize it and notify the parent.
    pub fn on_local_edit<S: EditSurface + ?Sized>(&mut self, surface: &S) -> String {
        let value = surface.content();
        if let Some(callback) = self.on_change.as_mut() {
            callback(&value);
        }
        value
    }

    /// The parent pushed a new value down.
    pub fn on_external_value_change<S: EditSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        new_value: &str,
    ) -> SyncOutcome {
        let current = surface.content();

        if current == new_value {
            // Echo of our own content acknowledges any pending local edits.
            self.synced = current;
            self.last_external = Some(new_value.to_string());
            return SyncOutcome::Unchanged;
        }

        if self.last_external.as_deref() == Some(new_value) {
            return SyncOutcome::Unchanged;
        }

        // A deferred value is not recorded, so the parent resending it later
        // still applies it.
        if current != self.synced {
            tracing::debug!(
                target: "newsdesk::controller",
                "surface has unsynced local edits, not reseeding"
            );
            return SyncOutcome::Deferred;
        }

        self.last_external = Some(new_value.to_string());
        self.reseed(surface, new_value);
        SyncOutcome::Reseeded
    }

    /// Reseed unconditionally, discarding pending local edits.
    pub fn reset<S: EditSurface + ?Sized>(&mut self, surface: &mut S, value: &str) -> SyncOutcome {
        self.last_external = Some(value.to_string());
        self.reseed_if_different(surface, value)
    }

    /// Whether the surface holds edits the parent has not echoed back.
    pub fn has_pending_edits<S: EditSurface + ?Sized>(&self, surface: &S) -> bool {
        surface.content() != self.synced
    }

    fn reseed_if_different<S: EditSurface + ?Sized>(&mut self, surface: &mut S, value: &str) -> SyncOutcome {
        let current = surface.content();
        if current == value {
            self.synced = current;
            return SyncOutcome::Unchanged;
        }
        self.reseed(surface, value);
        SyncOutcome::Reseeded
    }

    fn reseed<S: EditSurface + ?Sized>(&mut self, surface: &mut S, value: &str) {
        tracing::trace!(target: "newsdesk::controller", len = value.len(), "reseeding surface");
        surface.set_content(value);
        // The host may normalize markup on the way in; track what it holds.
        self.synced = surface.content();
    }
}
