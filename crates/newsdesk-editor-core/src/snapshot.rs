//! Point-in-time read of which capabilities are active.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::capability::Capability;

/// Which formatting capabilities apply at the current caret/selection.
///
/// Snapshots are rebuilt from a full requery of the host surface every time.
/// They are never patched in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FormatSnapshot {
    active: [bool; Capability::COUNT],
}

impl FormatSnapshot {
    /// Build a snapshot by evaluating `f` once per capability.
    pub fn from_fn(mut f: impl FnMut(Capability) -> bool) -> Self {
        let mut active = [false; Capability::COUNT];
        for cap in Capability::ALL {
            active[cap.index()] = f(cap);
        }
        Self { active }
    }

    /// Snapshot with exactly the given capabilities active.
    pub fn with_active(caps: &[Capability]) -> Self {
        Self::from_fn(|cap| caps.contains(&cap))
    }

    pub fn is_active(&self, capability: Capability) -> bool {
        self.active[capability.index()]
    }

    /// Iterate the active capabilities in snapshot order.
    pub fn active(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL
            .into_iter()
            .filter(|cap| self.is_active(*cap))
    }
}

impl std::ops::Index<Capability> for FormatSnapshot {
    type Output = bool;

    fn index(&self, capability: Capability) -> &bool {
        &self.active[capability.index()]
    }
}

/// Serializes as `{ "bold": true, "italic": false, ... }`.
impl Serialize for FormatSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Capability::COUNT))?;
        for cap in Capability::ALL {
            map.serialize_entry(cap.name(), &self.is_active(cap))?;
        }
        map.end()
    }
}
