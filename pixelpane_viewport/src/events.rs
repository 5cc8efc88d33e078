// Copyright 2025 the Pixelpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change notification for viewport consumers.

use std::fmt;

use pixelpane_geometry::ViewportState;

/// What caused a viewport change.
///
/// Renderers mostly redraw regardless, but interaction layers care: a
/// constraint re-clamp must not cancel an in-flight gesture, while an
/// absolute update usually should.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeSource {
    /// A relative gesture delta (drag, wheel, pinch).
    UserInput,
    /// An absolute programmatic update (navigation, reset, explicit set).
    ApiUpdate,
    /// A re-clamp forced by changed constraints, such as a surface resize.
    Constraint,
}

/// A viewport change delivered to listeners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportChange {
    /// State before the change.
    pub old_state: ViewportState,
    /// State after the change.
    pub new_state: ViewportState,
    /// What caused the change.
    pub source: ChangeSource,
}

/// Identifies a registered listener so it can be removed later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listener registry with stable removal.
///
/// Emission order is registration order. Emission happens synchronously on
/// the mutating call, so listeners observe every transition in order and
/// never observe a half-applied one.
pub(crate) struct Listeners {
    entries: Vec<(ListenerId, Box<dyn FnMut(&ViewportChange)>)>,
    next_id: u64,
}

impl Listeners {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    pub(crate) fn subscribe(
        &mut self,
        listener: impl FnMut(&ViewportChange) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns whether it was still registered.
    pub(crate) fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn emit(&mut self, change: &ViewportChange) {
        for (_, listener) in &mut self.entries {
            listener(change);
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
