//! Selector group synchronization.
//!
//! A [`SelectorGroup`] keeps N mutually exclusive toggle widgets in step with
//! one scalar parameter. It works in one of two addressing modes:
//!
//! - [`AddressingMode::Index`] - the value is a position in the widget list
//! - [`AddressingMode::Identifier`] - the value is a number carried in each
//!   widget's label
//!
//! Two directions of traffic meet here. The host tells the group that the
//! value changed ([`SelectorGroup::apply_value`]), and the group then flips
//! widget states. A widget tells the group it was clicked
//! ([`SelectorGroup::widget_clicked`]), and the group proposes a new value to
//! the host. Flipping a widget programmatically can make the toolkit report a
//! click, so every programmatic update runs under a suppression guard and
//! clicks arriving during it are ignored. Without the guard, automation and
//! user input would feed each other forever.
//!
//! Everything here runs on the UI thread. State lives in `Cell`s so that a
//! widget may call back into the group while the group is updating it.
//!
//! # Example
//!
//! ```ignore
//! let group = SelectorGroup::new(host, buttons, SelectorConfig::index().with_group_id(7))?;
//!
//! // Host notification (value changed, e.g. automation):
//! group.apply_value(2.0);
//!
//! // Toolkit click callback:
//! group.widget_clicked(&buttons[0]);
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use dialkit_utils::{approx_eq, leading_float};

use crate::error::{ParameterError, ParameterResult};
use crate::types::{PlainValue, RadioGroupId};
use crate::update_flag::UpdateFlag;

// =============================================================================
// Widget and host contracts
// =============================================================================

/// Identifies a click listener registered on widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

impl ListenerId {
    /// Allocate a process-wide unique listener id.
    pub fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value.
    pub fn get(self) -> u32 {
        self.0
    }
}

/// How a value change is delivered to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// One atomic change (begin, set, end in a single step).
    Complete,
    /// Part of a continuous drag.
    Partial,
}

/// Whether setting a widget's state should fire its click listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// Notify listeners.
    Send,
    /// Change state quietly.
    Silent,
}

/// A toggle-capable control with a boolean active state and a click event.
///
/// Implemented by a handle into the UI toolkit. Handles are compared with
/// `PartialEq` to detect duplicates, so equality should mean "same control".
pub trait ToggleWidget {
    /// Whether the handle still refers to a live control.
    fn is_attached(&self) -> bool {
        true
    }

    /// Current toggle state.
    fn is_active(&self) -> bool;

    /// Set the toggle state.
    fn set_active(&self, active: bool, notification: Notification);

    /// Label or component name (the source of identifiers).
    fn label(&self) -> String;

    /// Put the control in a toolkit-level radio group.
    fn set_radio_group(&self, _group: RadioGroupId) {}

    /// Make a click flip the toggle state.
    fn set_toggles_on_click(&self, _toggles: bool) {}

    /// Start delivering clicks to `listener`.
    fn add_click_listener(&self, listener: ListenerId);

    /// Stop delivering clicks to `listener`.
    fn remove_click_listener(&self, listener: ListenerId);
}

/// The owner of the canonical parameter value.
pub trait ParameterHost {
    /// Current physical value.
    fn value(&self) -> PlainValue;

    /// Physical default value.
    fn default_value(&self) -> PlainValue;

    /// Ask the host to change the value.
    fn propose_value(&self, value: PlainValue, gesture: Gesture);
}

impl<H: ParameterHost + ?Sized> ParameterHost for &H {
    fn value(&self) -> PlainValue {
        (**self).value()
    }

    fn default_value(&self) -> PlainValue {
        (**self).default_value()
    }

    fn propose_value(&self, value: PlainValue, gesture: Gesture) {
        (**self).propose_value(value, gesture)
    }
}

impl<H: ParameterHost + ?Sized> ParameterHost for Rc<H> {
    fn value(&self) -> PlainValue {
        (**self).value()
    }

    fn default_value(&self) -> PlainValue {
        (**self).default_value()
    }

    fn propose_value(&self, value: PlainValue, gesture: Gesture) {
        (**self).propose_value(value, gesture)
    }
}

impl<H: ParameterHost + ?Sized> ParameterHost for Arc<H> {
    fn value(&self) -> PlainValue {
        (**self).value()
    }

    fn default_value(&self) -> PlainValue {
        (**self).default_value()
    }

    fn propose_value(&self, value: PlainValue, gesture: Gesture) {
        (**self).propose_value(value, gesture)
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// How a value addresses a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressingMode {
    /// Value is the widget's position in the group.
    #[default]
    Index,
    /// Value is the number parsed from the widget's label.
    Identifier,
}

/// Selector group configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Addressing mode.
    pub mode: AddressingMode,
    /// Radio group id handed to every widget. Only positive ids are used.
    pub group_id: Option<RadioGroupId>,
}

impl SelectorConfig {
    /// Index-addressed group without a radio group id.
    pub const fn index() -> Self {
        Self {
            mode: AddressingMode::Index,
            group_id: None,
        }
    }

    /// Identifier-addressed group without a radio group id.
    pub const fn identifier() -> Self {
        Self {
            mode: AddressingMode::Identifier,
            group_id: None,
        }
    }

    /// Set the shared radio group id.
    pub const fn with_group_id(mut self, group_id: RadioGroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self::index()
    }
}

// =============================================================================
// SuppressionGuard
// =============================================================================

/// Holds click suppression on for its lifetime.
///
/// Restores the previous state on drop, so nested programmatic updates leave
/// suppression on until the outermost one finishes.
struct SuppressionGuard<'a> {
    flag: &'a Cell<bool>,
    previous: bool,
}

impl<'a> SuppressionGuard<'a> {
    fn engage(flag: &'a Cell<bool>) -> Self {
        let previous = flag.replace(true);
        Self { flag, previous }
    }
}

impl Drop for SuppressionGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}

// =============================================================================
// SelectorGroup
// =============================================================================

/// Mediates between one scalar parameter and a group of exclusive toggles.
///
/// Construction registers the group as a click listener on every distinct
/// widget and then syncs the widgets to the host's current value. Dropping the
/// group unregisters it from every widget it registered with.
pub struct SelectorGroup<W: ToggleWidget + PartialEq, H: ParameterHost> {
    host: H,
    widgets: Vec<W>,
    /// Value each widget stands for: its position (Index) or label number (Identifier).
    identifiers: Vec<PlainValue>,
    mode: AddressingMode,
    listener: ListenerId,
    value: Cell<PlainValue>,
    active: Cell<Option<usize>>,
    suppress_clicks: Cell<bool>,
}

impl<W: ToggleWidget + PartialEq, H: ParameterHost> SelectorGroup<W, H> {
    /// Wire `widgets` to `host`.
    ///
    /// Duplicate handles are registered once. Fails without leaving any
    /// listener behind if a handle is detached, if an Identifier-mode label
    /// carries no number, or if no widget was given.
    pub fn new<I>(host: H, widgets: I, config: SelectorConfig) -> ParameterResult<Self>
    where
        I: IntoIterator<Item = W>,
    {
        let mut group = Self {
            host,
            widgets: Vec::new(),
            identifiers: Vec::new(),
            mode: config.mode,
            listener: ListenerId::next(),
            value: Cell::new(0.0),
            active: Cell::new(None),
            suppress_clicks: Cell::new(false),
        };

        // Returning early drops `group`, which unregisters what was wired so far.
        for (index, widget) in widgets.into_iter().enumerate() {
            if group.widgets.contains(&widget) {
                log::trace!("Skipping duplicate widget at position {}", index);
                continue;
            }

            if !widget.is_attached() {
                log::warn!("Selector wiring failed: widget at position {} is detached", index);
                return Err(ParameterError::DetachedWidget { index });
            }

            let identifier = match config.mode {
                AddressingMode::Index => group.widgets.len() as PlainValue,
                AddressingMode::Identifier => {
                    let label = widget.label();
                    match leading_float(&label) {
                        Some(identifier) => identifier,
                        None => {
                            log::warn!(
                                "Selector wiring failed: label {:?} at position {} has no identifier",
                                label,
                                index
                            );
                            return Err(ParameterError::MissingIdentifier { index, label });
                        }
                    }
                }
            };

            if let Some(group_id) = config.group_id.filter(|id| *id > 0) {
                widget.set_radio_group(group_id);
            }
            widget.set_toggles_on_click(true);
            widget.add_click_listener(group.listener);

            group.widgets.push(widget);
            group.identifiers.push(identifier);
        }

        if group.widgets.is_empty() {
            log::warn!("Selector wiring failed: no widgets");
            return Err(ParameterError::EmptyGroup);
        }

        log::debug!(
            "Selector {:?} wired to {} widgets in {:?} mode",
            group.listener,
            group.widgets.len(),
            group.mode
        );

        let initial = group.host.value();
        group.apply_value(initial);
        Ok(group)
    }

    /// Reflect a host value in the widgets.
    ///
    /// Called when the host reports a change. Clicks fired by the widgets
    /// while this runs are ignored.
    pub fn apply_value(&self, value: PlainValue) {
        self.value.set(value);
        let _guard = SuppressionGuard::engage(&self.suppress_clicks);

        let target = match self.mode {
            AddressingMode::Index => Some(self.clamped_index(value)),
            AddressingMode::Identifier => self
                .identifiers
                .iter()
                .position(|identifier| approx_eq(*identifier, value)),
        };

        for (index, widget) in self.widgets.iter().enumerate() {
            if Some(index) != target && widget.is_active() {
                widget.set_active(false, Notification::Silent);
            }
        }
        if let Some(index) = target {
            self.widgets[index].set_active(true, Notification::Send);
        }
        self.active.set(target);
    }

    /// Handle a click reported by `widget`.
    ///
    /// Returns the value proposed to the host, or `None` if the click was
    /// ignored (programmatic update in progress, unknown widget, or the click
    /// left the widget inactive).
    pub fn widget_clicked(&self, widget: &W) -> Option<PlainValue> {
        if self.suppress_clicks.get() {
            log::trace!("Selector {:?} ignoring click during update", self.listener);
            return None;
        }

        let index = self.widgets.iter().position(|w| w == widget)?;
        if !widget.is_active() {
            return None;
        }

        let proposal = match self.mode {
            AddressingMode::Index => index as PlainValue,
            AddressingMode::Identifier => {
                let identifier = self.identifiers[index];
                // Re-selecting the applied option resets to the default
                // instead of leaving the selection stuck.
                if approx_eq(identifier, self.value.get()) {
                    self.host.default_value()
                } else {
                    identifier
                }
            }
        };

        self.host.propose_value(proposal, Gesture::Complete);
        Some(proposal)
    }

    /// Re-read the host value if `flag` was raised since the last poll.
    ///
    /// Returns whether the widgets were refreshed.
    pub fn poll(&self, flag: &UpdateFlag) -> bool {
        if flag.take() {
            self.apply_value(self.host.value());
            true
        } else {
            false
        }
    }

    /// Last applied value.
    pub fn value(&self) -> PlainValue {
        self.value.get()
    }

    /// Index of the active widget, if any.
    pub fn active_index(&self) -> Option<usize> {
        self.active.get()
    }

    /// Number of wired widgets.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Always false for a constructed group.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Wired widgets in order.
    pub fn widgets(&self) -> &[W] {
        &self.widgets
    }

    /// Widget at `index`.
    pub fn widget(&self, index: usize) -> Option<&W> {
        self.widgets.get(index)
    }

    /// Value the widget at `index` stands for.
    pub fn identifier(&self, index: usize) -> Option<PlainValue> {
        self.identifiers.get(index).copied()
    }

    /// Addressing mode.
    pub fn mode(&self) -> AddressingMode {
        self.mode
    }

    /// Listener id registered on the widgets.
    pub fn listener_id(&self) -> ListenerId {
        self.listener
    }

    /// The parameter host.
    pub fn host(&self) -> &H {
        &self.host
    }

    fn clamped_index(&self, value: PlainValue) -> usize {
        let last = self.widgets.len().saturating_sub(1);
        let rounded = value.round();
        let index = if rounded.is_nan() || rounded <= 0.0 {
            0
        } else if rounded >= last as PlainValue {
            last
        } else {
            rounded as usize
        };
        if index as PlainValue != rounded {
            log::debug!(
                "Selector {:?} clamped value {} to index {}",
                self.listener,
                value,
                index
            );
        }
        index
    }
}

impl<W: ToggleWidget + PartialEq, H: ParameterHost> Drop for SelectorGroup<W, H> {
    fn drop(&mut self) {
        for widget in &self.widgets {
            widget.remove_click_listener(self.listener);
        }
        log::debug!(
            "Selector {:?} released {} widgets",
            self.listener,
            self.widgets.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Weak;

    type TestGroup = SelectorGroup<MockButton, Rc<MockHost>>;

    #[derive(Default)]
    struct ButtonState {
        label: String,
        active: Cell<bool>,
        attached: Cell<bool>,
        radio_group: Cell<RadioGroupId>,
        toggles_on_click: Cell<bool>,
        listeners: RefCell<Vec<ListenerId>>,
        notifications: Cell<usize>,
        group: RefCell<Weak<TestGroup>>,
    }

    /// Shared handle that dispatches clicks synchronously, like a toolkit button.
    #[derive(Clone)]
    struct MockButton(Rc<ButtonState>);

    impl PartialEq for MockButton {
        fn eq(&self, other: &Self) -> bool {
            Rc::ptr_eq(&self.0, &other.0)
        }
    }

    impl MockButton {
        fn new(label: &str) -> Self {
            Self(Rc::new(ButtonState {
                label: label.to_string(),
                attached: Cell::new(true),
                ..Default::default()
            }))
        }

        fn detached(label: &str) -> Self {
            let button = Self::new(label);
            button.0.attached.set(false);
            button
        }

        fn connect(&self, group: &Rc<TestGroup>) {
            *self.0.group.borrow_mut() = Rc::downgrade(group);
        }

        /// User click on a radio button: it ends up active, then listeners run.
        fn click(&self) -> Option<PlainValue> {
            self.0.active.set(true);
            self.dispatch()
        }

        fn dispatch(&self) -> Option<PlainValue> {
            let group = self.0.group.borrow().upgrade();
            group.and_then(|group| group.widget_clicked(self))
        }

        fn listener_count(&self) -> usize {
            self.0.listeners.borrow().len()
        }
    }

    impl ToggleWidget for MockButton {
        fn is_attached(&self) -> bool {
            self.0.attached.get()
        }

        fn is_active(&self) -> bool {
            self.0.active.get()
        }

        fn set_active(&self, active: bool, notification: Notification) {
            self.0.active.set(active);
            if notification == Notification::Send {
                self.0.notifications.set(self.0.notifications.get() + 1);
                self.dispatch();
            }
        }

        fn label(&self) -> String {
            self.0.label.clone()
        }

        fn set_radio_group(&self, group: RadioGroupId) {
            self.0.radio_group.set(group);
        }

        fn set_toggles_on_click(&self, toggles: bool) {
            self.0.toggles_on_click.set(toggles);
        }

        fn add_click_listener(&self, listener: ListenerId) {
            self.0.listeners.borrow_mut().push(listener);
        }

        fn remove_click_listener(&self, listener: ListenerId) {
            self.0.listeners.borrow_mut().retain(|l| *l != listener);
        }
    }

    /// Host that applies proposals immediately and notifies the group
    /// synchronously, as a parameter attachment on the UI thread does.
    struct MockHost {
        value: Cell<PlainValue>,
        default: PlainValue,
        proposals: RefCell<Vec<(PlainValue, Gesture)>>,
        group: RefCell<Weak<TestGroup>>,
    }

    impl MockHost {
        fn new(value: PlainValue, default: PlainValue) -> Rc<Self> {
            Rc::new(Self {
                value: Cell::new(value),
                default,
                proposals: RefCell::new(Vec::new()),
                group: RefCell::new(Weak::new()),
            })
        }

        fn proposals(&self) -> Vec<(PlainValue, Gesture)> {
            self.proposals.borrow().clone()
        }
    }

    impl ParameterHost for MockHost {
        fn value(&self) -> PlainValue {
            self.value.get()
        }

        fn default_value(&self) -> PlainValue {
            self.default
        }

        fn propose_value(&self, value: PlainValue, gesture: Gesture) {
            self.proposals.borrow_mut().push((value, gesture));
            self.value.set(value);
            let group = self.group.borrow().upgrade();
            if let Some(group) = group {
                group.apply_value(value);
            }
        }
    }

    fn buttons(labels: &[&str]) -> Vec<MockButton> {
        labels.iter().map(|label| MockButton::new(label)).collect()
    }

    fn wire(host: &Rc<MockHost>, buttons: &[MockButton], config: SelectorConfig) -> Rc<TestGroup> {
        let group = Rc::new(
            SelectorGroup::new(Rc::clone(host), buttons.iter().cloned(), config).unwrap(),
        );
        *host.group.borrow_mut() = Rc::downgrade(&group);
        for button in buttons {
            button.connect(&group);
        }
        group
    }

    fn active_flags(buttons: &[MockButton]) -> Vec<bool> {
        buttons.iter().map(|b| b.is_active()).collect()
    }

    #[test]
    fn test_index_apply_activates_only_target() {
        let host = MockHost::new(0.0, 0.0);
        let buttons = buttons(&["a", "b", "c", "d"]);
        let group = wire(&host, &buttons, SelectorConfig::index());

        group.apply_value(2.0);
        assert_eq!(active_flags(&buttons), [false, false, true, false]);
        assert_eq!(group.active_index(), Some(2));
        assert_eq!(group.value(), 2.0);
        assert!(host.proposals().is_empty());
    }

    #[test]
    fn test_index_click_proposes_once() {
        let host = MockHost::new(2.0, 0.0);
        let buttons = buttons(&["a", "b", "c", "d"]);
        let group = wire(&host, &buttons, SelectorConfig::index());

        assert_eq!(buttons[0].click(), Some(0.0));
        assert_eq!(host.proposals(), [(0.0, Gesture::Complete)]);
        assert_eq!(active_flags(&buttons), [true, false, false, false]);
        assert_eq!(group.active_index(), Some(0));
        // The echoed update notified the widget, and the guard swallowed it.
        assert_eq!(buttons[0].0.notifications.get(), 1);
    }

    #[test]
    fn test_initial_sync() {
        let host = MockHost::new(3.0, 0.0);
        let buttons = buttons(&["a", "b", "c", "d"]);
        let group = wire(&host, &buttons, SelectorConfig::index());

        assert_eq!(active_flags(&buttons), [false, false, false, true]);
        assert_eq!(group.active_index(), Some(3));
        assert!(buttons.iter().all(|b| b.0.toggles_on_click.get()));
    }

    #[test]
    fn test_index_value_clamped() {
        let host = MockHost::new(0.0, 0.0);
        let buttons = buttons(&["a", "b", "c", "d"]);
        let group = wire(&host, &buttons, SelectorConfig::index());

        group.apply_value(7.0);
        assert_eq!(group.active_index(), Some(3));
        group.apply_value(-3.0);
        assert_eq!(group.active_index(), Some(0));
        group.apply_value(1.6);
        assert_eq!(group.active_index(), Some(2));
        assert_eq!(active_flags(&buttons), [false, false, true, false]);
    }

    #[test]
    fn test_registers_once_and_unregisters_on_drop() {
        let host = MockHost::new(0.0, 0.0);
        let a = MockButton::new("a");
        let b = MockButton::new("b");
        let c = MockButton::new("c");
        let handles = [a.clone(), b.clone(), a.clone(), c.clone()];
        let group = wire(&host, &handles, SelectorConfig::index().with_group_id(5));

        assert_eq!(group.len(), 3);
        assert_eq!(group.identifier(2), Some(2.0));
        for button in [&a, &b, &c] {
            assert_eq!(button.listener_count(), 1);
            assert_eq!(button.0.radio_group.get(), 5);
        }

        drop(group);
        for button in [&a, &b, &c] {
            assert_eq!(button.listener_count(), 0);
        }
    }

    #[test]
    fn test_non_positive_group_id_not_forwarded() {
        let host = MockHost::new(0.0, 0.0);
        let buttons = buttons(&["a", "b"]);
        let _group = wire(&host, &buttons, SelectorConfig::index().with_group_id(0));
        assert!(buttons.iter().all(|b| b.0.radio_group.get() == 0));
    }

    #[test]
    fn test_detached_widget_fails_and_rolls_back() {
        let host = MockHost::new(0.0, 0.0);
        let a = MockButton::new("a");
        let gone = MockButton::detached("b");
        let c = MockButton::new("c");

        let result = SelectorGroup::new(
            Rc::clone(&host),
            [a.clone(), gone, c.clone()],
            SelectorConfig::index(),
        );
        assert!(matches!(result, Err(ParameterError::DetachedWidget { index: 1 })));
        assert_eq!(a.listener_count(), 0);
        assert_eq!(c.listener_count(), 0);
    }

    #[test]
    fn test_empty_group_fails() {
        let host = MockHost::new(0.0, 0.0);
        let result = SelectorGroup::new(host, Vec::<MockButton>::new(), SelectorConfig::index());
        assert!(matches!(result, Err(ParameterError::EmptyGroup)));
    }

    #[test]
    fn test_identifier_apply() {
        let host = MockHost::new(500.0, 1000.0);
        let buttons = buttons(&["250", "500", "1000", "2000"]);
        let group = wire(&host, &buttons, SelectorConfig::identifier());

        assert_eq!(active_flags(&buttons), [false, true, false, false]);
        group.apply_value(1000.0);
        assert_eq!(active_flags(&buttons), [false, false, true, false]);
        assert_eq!(group.identifier(3), Some(2000.0));
    }

    #[test]
    fn test_identifier_miss_deactivates_all() {
        let host = MockHost::new(500.0, 1000.0);
        let buttons = buttons(&["250", "500", "1000", "2000"]);
        let group = wire(&host, &buttons, SelectorConfig::identifier());

        group.apply_value(750.0);
        assert_eq!(active_flags(&buttons), [false; 4]);
        assert_eq!(group.active_index(), None);
        assert_eq!(group.value(), 750.0);
    }

    #[test]
    fn test_identifier_click_proposes_identifier() {
        let host = MockHost::new(500.0, 1000.0);
        let buttons = buttons(&["250", "500", "1000", "2000"]);
        let group = wire(&host, &buttons, SelectorConfig::identifier());

        assert_eq!(buttons[3].click(), Some(2000.0));
        assert_eq!(host.proposals(), [(2000.0, Gesture::Complete)]);
        assert_eq!(group.active_index(), Some(3));
        assert_eq!(active_flags(&buttons), [false, false, false, true]);
    }

    #[test]
    fn test_identifier_reclick_resets_to_default() {
        let host = MockHost::new(500.0, 1000.0);
        let buttons = buttons(&["250", "500", "1000", "2000"]);
        let group = wire(&host, &buttons, SelectorConfig::identifier());

        assert_eq!(buttons[1].click(), Some(1000.0));
        assert_eq!(host.proposals(), [(1000.0, Gesture::Complete)]);
        assert_eq!(group.active_index(), Some(2));
        assert_eq!(active_flags(&buttons), [false, false, true, false]);
    }

    #[test]
    fn test_identifier_click_compares_applied_value() {
        let host = MockHost::new(500.0, 1000.0);
        let buttons = buttons(&["250", "500", "1000", "2000"]);
        let group = wire(&host, &buttons, SelectorConfig::identifier());

        // Automation moved the host value but the UI has not polled yet.
        host.value.set(2000.0);
        assert_eq!(group.value(), 500.0);
        assert!(!buttons[3].is_active());

        assert_eq!(buttons[3].click(), Some(2000.0));
        assert_eq!(host.proposals(), [(2000.0, Gesture::Complete)]);
        assert_eq!(group.active_index(), Some(3));
    }

    #[test]
    fn test_missing_identifier_fails() {
        let host = MockHost::new(1.0, 1.0);
        let one = MockButton::new("1");
        let two = MockButton::new("two");

        let result = SelectorGroup::new(
            Rc::clone(&host),
            [one.clone(), two],
            SelectorConfig::identifier(),
        );
        match result {
            Err(ParameterError::MissingIdentifier { index, label }) => {
                assert_eq!(index, 1);
                assert_eq!(label, "two");
            }
            _ => panic!("expected MissingIdentifier"),
        }
        assert_eq!(one.listener_count(), 0);
    }

    #[test]
    fn test_ignored_clicks() {
        let host = MockHost::new(0.0, 0.0);
        let buttons = buttons(&["a", "b"]);
        let group = wire(&host, &buttons, SelectorConfig::index());

        // Click that toggled the widget off.
        buttons[1].0.active.set(false);
        assert_eq!(group.widget_clicked(&buttons[1]), None);

        // Widget from somewhere else.
        let stranger = MockButton::new("x");
        stranger.0.active.set(true);
        assert_eq!(group.widget_clicked(&stranger), None);

        assert!(host.proposals().is_empty());
    }

    #[test]
    fn test_poll_update_flag() {
        let host = MockHost::new(0.0, 0.0);
        let buttons = buttons(&["a", "b", "c", "d"]);
        let group = wire(&host, &buttons, SelectorConfig::index());

        let flag = UpdateFlag::new();
        assert!(!group.poll(&flag));

        // Automation moved the value; the audio side only raises the flag.
        host.value.set(3.0);
        let audio_side = flag.clone();
        std::thread::spawn(move || audio_side.request())
            .join()
            .unwrap();

        assert!(group.poll(&flag));
        assert_eq!(group.active_index(), Some(3));
        assert!(!group.poll(&flag));
        assert!(host.proposals().is_empty());
    }

    #[test]
    fn test_suppression_guard_nests() {
        let flag = Cell::new(false);
        {
            let _outer = SuppressionGuard::engage(&flag);
            {
                let _inner = SuppressionGuard::engage(&flag);
                assert!(flag.get());
            }
            assert!(flag.get());
        }
        assert!(!flag.get());
    }

    #[test]
    fn test_listener_ids_unique() {
        let first = ListenerId::next();
        let second = ListenerId::next();
        assert_ne!(first, second);
        assert!(second.get() > first.get());
    }
}
