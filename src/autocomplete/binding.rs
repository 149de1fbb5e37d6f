use std::cell::Cell;
use std::rc::Rc;

use crate::state_management::MapsReadiness;

use super::{AutocompleteFactory, AutocompleteHandle, InputTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingState {
    /// Maps not loaded yet, or the input is not attached
    #[default]
    WaitingForReadiness,
    /// A handle exists and its listener is active
    Bound,
    /// The factory returned nothing or failed: plain text input
    Degraded,
    /// Released on unmount
    TornDown,
}

/// Owns the autocomplete handle of one address field.
///
/// At most one handle exists at a time and it is created only once the maps
/// are loaded and the input is attached. Calling [AutocompleteBinding::sync]
/// again while bound does nothing.
#[derive(Default)]
pub struct AutocompleteBinding {
    handle: Option<Rc<dyn AutocompleteHandle>>,
    active: Rc<Cell<bool>>,
    state: BindingState,
    handles_created: usize,
}

impl AutocompleteBinding {
    pub fn state(&self) -> BindingState {
        self.state
    }

    #[cfg(test)]
    pub fn is_bound(&self) -> bool {
        self.handle.is_some()
    }

    #[cfg(test)]
    pub fn handles_created(&self) -> usize {
        self.handles_created
    }

    pub fn sync(
        &mut self,
        readiness: MapsReadiness,
        target: Option<&InputTarget>,
        factory: &dyn AutocompleteFactory,
        on_select: impl Fn(String) + 'static,
    ) {
        if !readiness.is_loaded {
            if self.handle.is_some() {
                log::debug!("AutocompleteBinding - maps no longer loaded, releasing handle");
                self.release();
            }
            self.state = BindingState::WaitingForReadiness;
            return;
        }
        let Some(target) = target else {
            self.state = BindingState::WaitingForReadiness;
            return;
        };
        if self.handle.is_some() {
            return;
        }

        let handle = match factory.create(target) {
            Ok(Some(handle)) => handle,
            Ok(None) => {
                log::debug!("AutocompleteBinding - no autocomplete available for {target}");
                self.state = BindingState::Degraded;
                return;
            }
            Err(e) => {
                log::error!("Error initializing autocomplete: {e}");
                self.state = BindingState::Degraded;
                return;
            }
        };
        self.handles_created += 1;

        let active = Rc::new(Cell::new(true));
        let weak_handle = Rc::downgrade(&handle);
        let listener_active = active.clone();
        handle.on_place_selected(Box::new(move || {
            if !listener_active.get() {
                return;
            }
            let Some(handle) = weak_handle.upgrade() else {
                return;
            };
            if let Some(address) = handle.selected_place().address() {
                on_select(address.to_owned());
            }
        }));

        log::debug!(
            "AutocompleteBinding - bound to {target} (handle #{})",
            self.handles_created
        );
        self.active = active;
        self.handle = Some(handle);
        self.state = BindingState::Bound;
    }

    pub fn teardown(&mut self) {
        self.release();
        self.state = BindingState::TornDown;
    }

    fn release(&mut self) {
        self.active.set(false);
        if let Some(handle) = self.handle.take() {
            handle.release_all_listeners();
        }
    }
}

impl Drop for AutocompleteBinding {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autocomplete::testing::{FactoryMode, FakeFactory};
    use crate::autocomplete::Place;
    use std::cell::RefCell;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(String) + Clone + 'static) {
        let received = Rc::new(RefCell::new(vec![]));
        let sink = received.clone();
        (received, move |address: String| {
            sink.borrow_mut().push(address)
        })
    }

    #[test]
    fn waits_until_loaded() {
        let factory = FakeFactory::new(FactoryMode::Create);
        let target = InputTarget::generate();
        let (_, on_select) = recorder();
        let mut binding = AutocompleteBinding::default();

        binding.sync(MapsReadiness::loading(), Some(&target), &factory, on_select);
        assert_eq!(binding.state(), BindingState::WaitingForReadiness);
        assert_eq!(factory.calls.get(), 0);
    }

    #[test]
    fn waits_until_input_attached() {
        let factory = FakeFactory::new(FactoryMode::Create);
        let (_, on_select) = recorder();
        let mut binding = AutocompleteBinding::default();

        binding.sync(MapsReadiness::loaded(), None, &factory, on_select);
        assert_eq!(binding.state(), BindingState::WaitingForReadiness);
        assert_eq!(factory.calls.get(), 0);
    }

    #[test]
    fn binds_once_even_when_synced_again() {
        let factory = FakeFactory::new(FactoryMode::Create);
        let target = InputTarget::generate();
        let (_, on_select) = recorder();
        let mut binding = AutocompleteBinding::default();

        for _ in 0..3 {
            binding.sync(
                MapsReadiness::loaded(),
                Some(&target),
                &factory,
                on_select.clone(),
            );
        }
        assert_eq!(binding.state(), BindingState::Bound);
        assert_eq!(binding.handles_created(), 1);
        assert_eq!(factory.calls.get(), 1);
        assert_eq!(factory.created.borrow()[0].0, target);
        assert_eq!(factory.last_handle().listeners.len(), 1);
    }

    #[test]
    fn forwards_selected_address() {
        let factory = FakeFactory::new(FactoryMode::Create);
        let target = InputTarget::generate();
        let (received, on_select) = recorder();
        let mut binding = AutocompleteBinding::default();
        binding.sync(MapsReadiness::loaded(), Some(&target), &factory, on_select);

        factory
            .last_handle()
            .select(Place::with_address("123 Main St"));
        assert_eq!(*received.borrow(), vec!["123 Main St".to_owned()]);
    }

    #[test]
    fn ignores_place_without_address() {
        let factory = FakeFactory::new(FactoryMode::Create);
        let target = InputTarget::generate();
        let (received, on_select) = recorder();
        let mut binding = AutocompleteBinding::default();
        binding.sync(MapsReadiness::loaded(), Some(&target), &factory, on_select);

        let handle = factory.last_handle();
        handle.select(Place::default());
        handle.select(Place::with_address(""));
        assert!(received.borrow().is_empty());
    }

    #[test]
    fn factory_without_handle_degrades() {
        let factory = FakeFactory::new(FactoryMode::Unavailable);
        let target = InputTarget::generate();
        let (_, on_select) = recorder();
        let mut binding = AutocompleteBinding::default();
        binding.sync(MapsReadiness::loaded(), Some(&target), &factory, on_select);

        assert_eq!(binding.state(), BindingState::Degraded);
        assert!(!binding.is_bound());
        assert_eq!(binding.handles_created(), 0);
    }

    #[test]
    fn factory_error_degrades_and_can_retry() {
        let factory = FakeFactory::new(FactoryMode::Fail);
        let target = InputTarget::generate();
        let (_, on_select) = recorder();
        let mut binding = AutocompleteBinding::default();
        binding.sync(
            MapsReadiness::loaded(),
            Some(&target),
            &factory,
            on_select.clone(),
        );
        assert_eq!(binding.state(), BindingState::Degraded);

        factory.mode.set(FactoryMode::Create);
        binding.sync(MapsReadiness::loaded(), Some(&target), &factory, on_select);
        assert_eq!(binding.state(), BindingState::Bound);
        assert_eq!(binding.handles_created(), 1);
    }

    #[test]
    fn teardown_silences_later_notifications() {
        let factory = FakeFactory::new(FactoryMode::Create);
        let target = InputTarget::generate();
        let (received, on_select) = recorder();
        let mut binding = AutocompleteBinding::default();
        binding.sync(MapsReadiness::loaded(), Some(&target), &factory, on_select);
        let handle = factory.last_handle();

        binding.teardown();
        assert_eq!(binding.state(), BindingState::TornDown);
        assert_eq!(handle.released.get(), 1);
        assert!(handle.listeners.is_empty());

        handle.select(Place::with_address("123 Main St"));
        assert!(received.borrow().is_empty());

        binding.teardown();
        assert_eq!(handle.released.get(), 1);
    }

    #[test]
    fn teardown_silences_leaky_provider() {
        let factory = FakeFactory::leaky();
        let target = InputTarget::generate();
        let (received, on_select) = recorder();
        let mut binding = AutocompleteBinding::default();
        binding.sync(MapsReadiness::loaded(), Some(&target), &factory, on_select);
        let handle = factory.last_handle();

        binding.teardown();
        assert_eq!(handle.listeners.len(), 1);
        handle.select(Place::with_address("123 Main St"));
        assert!(received.borrow().is_empty());
    }

    #[test]
    fn losing_readiness_releases_handle() {
        let factory = FakeFactory::new(FactoryMode::Create);
        let target = InputTarget::generate();
        let (received, on_select) = recorder();
        let mut binding = AutocompleteBinding::default();
        binding.sync(
            MapsReadiness::loaded(),
            Some(&target),
            &factory,
            on_select.clone(),
        );
        let first = factory.last_handle();

        binding.sync(
            MapsReadiness::loading(),
            Some(&target),
            &factory,
            on_select.clone(),
        );
        assert_eq!(binding.state(), BindingState::WaitingForReadiness);
        assert_eq!(first.released.get(), 1);

        binding.sync(MapsReadiness::loaded(), Some(&target), &factory, on_select);
        assert_eq!(binding.handles_created(), 2);

        first.select(Place::with_address("stale"));
        factory
            .last_handle()
            .select(Place::with_address("fresh"));
        assert_eq!(*received.borrow(), vec!["fresh".to_owned()]);
    }

    #[test]
    fn dropping_binding_releases_handle() {
        let factory = FakeFactory::new(FactoryMode::Create);
        let target = InputTarget::generate();
        let (_, on_select) = recorder();
        let mut binding = AutocompleteBinding::default();
        binding.sync(MapsReadiness::loaded(), Some(&target), &factory, on_select);
        let handle = factory.last_handle();

        drop(binding);
        assert_eq!(handle.released.get(), 1);
    }

    #[test]
    fn handle_is_not_kept_alive_by_its_listener() {
        let factory = FakeFactory::new(FactoryMode::Create);
        let target = InputTarget::generate();
        let (_, on_select) = recorder();
        let mut binding = AutocompleteBinding::default();
        binding.sync(MapsReadiness::loaded(), Some(&target), &factory, on_select);

        // binding + factory record
        assert_eq!(Rc::strong_count(&factory.last_handle()), 3);
    }
}
