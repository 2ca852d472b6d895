use std::{cell::Cell, rc::Rc};

use crate::{animation::ease::Ease, scene::animation::Animation};

/// Named mutable scalar that live displays read and animations drive.
///
/// Clones share the same value, so a clone captured by a [`crate::Live`] builder always
/// observes the latest write.
#[derive(Clone, Debug)]
pub struct ValueTracker {
    value: Rc<Cell<f64>>,
}

impl ValueTracker {
    /// Create a tracker holding `value`.
    pub fn new(value: f64) -> Self {
        Self {
            value: Rc::new(Cell::new(value)),
        }
    }

    /// Current value.
    pub fn get(&self) -> f64 {
        self.value.get()
    }

    /// Overwrite the current value.
    pub fn set(&self, value: f64) {
        self.value.set(value);
    }

    /// Animation moving this tracker from its value at play start to `target`.
    pub fn animate_to(&self, target: f64) -> Animation {
        Animation::SetValue {
            tracker: self.clone(),
            target,
            ease: Ease::default(),
        }
    }

    /// `true` when both handles share one value.
    pub fn same_as(&self, other: &ValueTracker) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/tracker.rs"]
mod tests;
