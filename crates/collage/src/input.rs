//! Observable values read by scene content.
//!
//! An [`Input`] is a shared, versioned cell. Content that reads an input
//! through [`SceneBuilder::read`](crate::SceneBuilder::read) records a
//! [`Dependency`] on it; once the input changes, the dependency reports
//! itself stale and the painter composes the scene again.
//!
//! A dependency can also register an observer on its input. Observers are
//! held weakly and run on every change, so the painter can ask its host for
//! a new frame without polling.

use std::{
    cell::{Cell, Ref, RefCell},
    fmt,
    rc::{Rc, Weak},
};

pub(crate) type Observer = dyn Fn();

struct InputCell<T> {
    value: RefCell<T>,
    version: Cell<u64>,
    observers: RefCell<Vec<Weak<Observer>>>,
}

impl<T> InputCell<T> {
    fn notify(&self) {
        let live: Vec<Rc<Observer>> = {
            let mut observers = self.observers.borrow_mut();
            observers.retain(|observer| observer.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };
        for observer in live {
            observer();
        }
    }
}

/// A shared value whose changes can be observed.
///
/// Cloning an input shares the same cell.
pub struct Input<T> {
    cell: Rc<InputCell<T>>,
}

impl<T> Input<T> {
    pub fn new(value: T) -> Self {
        Self {
            cell: Rc::new(InputCell {
                value: RefCell::new(value),
                version: Cell::new(0),
                observers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Borrows the current value.
    pub fn borrow(&self) -> Ref<'_, T> {
        self.cell.value.borrow()
    }

    /// Runs `f` on the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cell.value.borrow())
    }

    /// Replaces the value, bumps the version and notifies observers.
    pub fn set(&self, value: T) {
        *self.cell.value.borrow_mut() = value;
        self.bump();
    }

    /// Mutates the value in place and bumps the version.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.cell.value.borrow_mut());
        self.bump();
    }

    /// Returns how many times the value has been changed.
    pub fn version(&self) -> u64 {
        self.cell.version.get()
    }

    fn bump(&self) {
        self.cell.version.set(self.cell.version.get() + 1);
        self.cell.notify();
    }
}

impl<T: Clone> Input<T> {
    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        self.cell.value.borrow().clone()
    }
}

impl<T: PartialEq> Input<T> {
    /// Replaces the value, bumping the version only if it differs.
    pub fn set_if_changed(&self, value: T) -> bool {
        if *self.cell.value.borrow() == value {
            return false;
        }
        self.set(value);
        true
    }
}

impl<T> Clone for Input<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Input<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input")
            .field("value", &self.cell.value.borrow())
            .field("version", &self.version())
            .finish()
    }
}

/// Anything exposing a change counter.
pub(crate) trait Versioned {
    fn version(&self) -> u64;

    /// Registers `observer` to run after every change. Registering the same
    /// observer twice has no effect.
    fn observe(&self, observer: &Rc<Observer>);
}

impl<T> Versioned for InputCell<T> {
    fn version(&self) -> u64 {
        self.version.get()
    }

    fn observe(&self, observer: &Rc<Observer>) {
        let weak = Rc::downgrade(observer);
        let mut observers = self.observers.borrow_mut();
        observers.retain(|existing| existing.strong_count() > 0);
        if !observers.iter().any(|existing| existing.ptr_eq(&weak)) {
            observers.push(weak);
        }
    }
}

/// A recorded read of an input at a given version.
#[derive(Clone)]
pub(crate) struct Dependency {
    source: Rc<dyn Versioned>,
    seen: u64,
}

impl Dependency {
    pub(crate) fn on<T: 'static>(input: &Input<T>) -> Self {
        let source: Rc<dyn Versioned> = input.cell.clone();
        Self {
            seen: source.version(),
            source,
        }
    }

    /// Returns true if the input changed after it was read.
    pub(crate) fn is_stale(&self) -> bool {
        self.source.version() != self.seen
    }

    /// Runs `observer` on every later change of the input, for as long as
    /// the caller keeps it alive.
    pub(crate) fn observe(&self, observer: &Rc<Observer>) {
        self.source.observe(observer);
    }
}

impl fmt::Debug for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dependency")
            .field("seen", &self.seen)
            .field("current", &self.source.version())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_value_and_version() {
        let input = Input::new(1);
        let other = input.clone();
        other.set(5);

        assert_eq!(input.get(), 5);
        assert_eq!(input.version(), 1);
    }

    #[test]
    fn test_update_in_place() {
        let input = Input::new(vec![1, 2]);
        input.update(|values| values.push(3));
        assert_eq!(input.with(Vec::len), 3);
        assert_eq!(*input.borrow(), [1, 2, 3]);
    }

    #[test]
    fn test_set_if_changed() {
        let input = Input::new("a".to_string());
        assert!(!input.set_if_changed("a".to_string()));
        assert_eq!(input.version(), 0);
        assert!(input.set_if_changed("b".to_string()));
        assert_eq!(input.version(), 1);
    }

    #[test]
    fn test_dependency_goes_stale_after_write() {
        let input = Input::new(0.0_f64);
        let dependency = Dependency::on(&input);
        assert!(!dependency.is_stale());

        input.set(1.0);
        assert!(dependency.is_stale());
        assert!(!Dependency::on(&input).is_stale());
    }

    #[test]
    fn test_observer_runs_on_change_until_dropped() {
        let input = Input::new(0_u32);
        let calls = Rc::new(Cell::new(0));
        let observer: Rc<Observer> = {
            let calls = Rc::clone(&calls);
            Rc::new(move || calls.set(calls.get() + 1))
        };

        let dependency = Dependency::on(&input);
        dependency.observe(&observer);
        dependency.observe(&observer);

        input.set(1);
        input.update(|value| *value += 1);
        assert!(!input.set_if_changed(2));
        assert_eq!(calls.get(), 2);

        drop(observer);
        input.set(3);
        assert_eq!(calls.get(), 2);
        assert!(input.cell.observers.borrow().is_empty());
    }

    #[test]
    fn test_observer_may_read_input() {
        let input = Input::new(1);
        let seen = Rc::new(Cell::new(0));
        let observer: Rc<Observer> = {
            let input = input.clone();
            let seen = Rc::clone(&seen);
            Rc::new(move || seen.set(input.get()))
        };
        Dependency::on(&input).observe(&observer);

        input.set(7);
        assert_eq!(seen.get(), 7);
    }
}
