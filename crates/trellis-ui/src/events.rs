//! Component event bus.
//!
//! Listeners are registered per source component and event tag. Dispatch
//! delivers to the target's listeners and, for bubbling events, forwards
//! exactly one step to the target's logical parent. The parent relation is
//! supplied by whoever dispatches, through [`HasParentLike`].

use std::fmt;

use strum_macros::Display;

use crate::ComponentId;

/// The kinds of event components announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum EventTag {
    /// The component's styles or size changed.
    Style,
    /// The component's element was attached to a parent.
    Attach,
    /// The component's element was removed from its parent.
    Detach,
    /// A container finished running its layout.
    Layout,
}

/// An announced event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// What happened.
    pub tag: EventTag,
    /// The component it happened to.
    pub target: ComponentId,
    /// Whether the event is forwarded to the target's logical parent.
    pub bubbles: bool,
}

impl Event {
    /// A non-bubbling event.
    #[must_use]
    pub const fn new(tag: EventTag, target: ComponentId) -> Self {
        Self {
            tag,
            target,
            bubbles: false,
        }
    }

    /// The same event, forwarded to the target's logical parent as well.
    #[must_use]
    pub const fn bubbling(mut self) -> Self {
        self.bubbles = true;
        self
    }
}

/// Anything that can name the logical parent of a component.
pub trait HasParentLike {
    /// The component events bubble to from `source`, if any.
    fn logical_parent(&self, source: ComponentId) -> Option<ComponentId>;
}

/// Handle returned by [`EventBus::listen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(&Event, ComponentId)>;

struct Registration {
    id: ListenerId,
    source: ComponentId,
    tag: EventTag,
    callback: Callback,
}

/// Registry of listeners keyed by source component and tag.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    registrations: Vec<Registration>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.registrations.len())
            .finish()
    }
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for `tag` events delivered to `source`.
    ///
    /// The callback receives the event and the component it is being
    /// delivered to, which differs from `event.target` when bubbling.
    pub fn listen<F>(&mut self, source: ComponentId, tag: EventTag, callback: F) -> ListenerId
    where
        F: FnMut(&Event, ComponentId) + 'static,
    {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.registrations.push(Registration {
            id,
            source,
            tag,
            callback: Box::new(callback),
        });
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unlisten(&mut self, id: ListenerId) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.id != id);
        self.registrations.len() != before
    }

    /// Remove every listener registered on `source`.
    pub fn unlisten_all(&mut self, source: ComponentId) {
        self.registrations.retain(|r| r.source != source);
    }

    /// Number of listeners registered on `source`.
    #[must_use]
    pub fn listener_count(&self, source: ComponentId) -> usize {
        self.registrations
            .iter()
            .filter(|r| r.source == source)
            .count()
    }

    /// Deliver `event` to its target and, if it bubbles, to the target's
    /// logical parent. Returns how many callbacks ran.
    pub fn dispatch(&mut self, event: &Event, parents: &dyn HasParentLike) -> usize {
        let mut delivered = self.deliver(event, event.target);
        if event.bubbles
            && let Some(parent) = parents.logical_parent(event.target)
        {
            delivered += self.deliver(event, parent);
        }
        delivered
    }

    fn deliver(&mut self, event: &Event, source: ComponentId) -> usize {
        let mut delivered = 0;
        for registration in &mut self.registrations {
            if registration.source == source && registration.tag == event.tag {
                (registration.callback)(event, source);
                delivered += 1;
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Chain;

    impl HasParentLike for Chain {
        fn logical_parent(&self, source: ComponentId) -> Option<ComponentId> {
            source.0.checked_sub(1).map(ComponentId)
        }
    }

    #[test]
    fn test_delivers_by_source_and_tag() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let _ = bus.listen(ComponentId(1), EventTag::Style, move |event, at| {
            log.borrow_mut().push((event.tag, at));
        });

        assert_eq!(bus.dispatch(&Event::new(EventTag::Style, ComponentId(1)), &Chain), 1);
        assert_eq!(bus.dispatch(&Event::new(EventTag::Attach, ComponentId(1)), &Chain), 0);
        assert_eq!(bus.dispatch(&Event::new(EventTag::Style, ComponentId(2)), &Chain), 0);
        assert_eq!(*seen.borrow(), vec![(EventTag::Style, ComponentId(1))]);
    }

    #[test]
    fn test_bubbles_exactly_one_step() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for source in 0..3 {
            let log = Rc::clone(&seen);
            let _ = bus.listen(ComponentId(source), EventTag::Layout, move |event, at| {
                log.borrow_mut().push((event.target, at));
            });
        }

        let event = Event::new(EventTag::Layout, ComponentId(2)).bubbling();
        assert_eq!(bus.dispatch(&event, &Chain), 2);
        assert_eq!(
            *seen.borrow(),
            vec![
                (ComponentId(2), ComponentId(2)),
                (ComponentId(2), ComponentId(1)),
            ]
        );
    }

    #[test]
    fn test_unlisten() {
        let mut bus = EventBus::new();
        let id = bus.listen(ComponentId(0), EventTag::Detach, |_, _| {});
        assert_eq!(bus.listener_count(ComponentId(0)), 1);
        assert!(bus.unlisten(id));
        assert!(!bus.unlisten(id));
        assert_eq!(bus.listener_count(ComponentId(0)), 0);
    }
}
