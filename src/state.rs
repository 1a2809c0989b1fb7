//! Single-writer state cells shared with read-only consumers.
//!
//! The active section and the theme flag are each owned by exactly one writer and read by the
//! UI. Everything runs on the event loop thread, so the cell is a plain `Rc<RefCell<_>>` with a
//! version counter that readers can compare to notice changes.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

struct Shared<T> {
    value: RefCell<T>,
    version: Cell<u64>,
}

/// The only handle allowed to mutate a state cell.
///
/// Not `Clone`: handing the writer to a component makes that component the cell's sole owner.
pub struct StateWriter<T> {
    shared: Rc<Shared<T>>,
}

/// Read-only view of a state cell. Cheap to clone and pass down the composition tree.
pub struct StateReader<T> {
    shared: Rc<Shared<T>>,
}

#[must_use]
/// Creates a cell holding `initial`, returning its writer and a first reader.
pub fn state_cell<T>(initial: T) -> (StateWriter<T>, StateReader<T>) {
    let shared = Rc::new(Shared {
        value: RefCell::new(initial),
        version: Cell::new(0),
    });
    let reader = StateReader {
        shared: Rc::clone(&shared),
    };
    (StateWriter { shared }, reader)
}

impl<T> StateWriter<T> {
    /// Stores `value`, bumping the version only if it differs from the current value.
    ///
    /// Returns whether the stored value changed.
    pub fn set(&mut self, value: T) -> bool
    where
        T: PartialEq,
    {
        let mut current = self.shared.value.borrow_mut();
        if *current == value {
            return false;
        }
        *current = value;
        self.shared.version.set(self.shared.version.get() + 1);
        true
    }

    /// Mutates the value in place and unconditionally bumps the version.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut *self.shared.value.borrow_mut());
        self.shared.version.set(self.shared.version.get() + 1);
    }

    #[must_use]
    /// Hands out another reader of this cell.
    pub fn reader(&self) -> StateReader<T> {
        StateReader {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T> StateReader<T> {
    #[must_use]
    /// Borrows the current value.
    ///
    /// # Panics
    ///
    /// Panics if called from inside the writer's `update` closure.
    pub fn borrow(&self) -> Ref<'_, T> {
        self.shared.value.borrow()
    }

    #[must_use]
    /// Number of changes published so far.
    pub fn version(&self) -> u64 {
        self.shared.version.get()
    }
}

impl<T: Clone> StateReader<T> {
    #[must_use]
    /// Clones out the current value.
    pub fn get(&self) -> T {
        self.shared.value.borrow().clone()
    }
}

impl<T> Clone for StateReader<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

#[cfg(test)]
#[path = "tests/state.rs"]
mod tests;
