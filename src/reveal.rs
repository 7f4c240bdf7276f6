//! # Incremental Reveal
//!
//! Progressive rendering over a derived result list: the controller exposes a
//! growing prefix of its source, advanced one page at a time when a sentinel
//! element near the end of the rendered list comes close to the viewport.
//!
//! The viewport itself sits behind [`SentinelObserver`] so the controller
//! stays platform-free. On targets without a viewport, skip the observer and
//! call [`RevealController::advance`] directly as an explicit "load more".

use std::{cell::RefCell, rc::Rc};

/// Trigger distance before the sentinel is actually in view, in pixels.
pub const SENTINEL_MARGIN_PX: u32 = 100;

pub struct RevealController<T> {
    items: Vec<T>,
    page_size: usize,
    visible: usize,
    settling: bool,
}

impl<T> RevealController<T> {
    /// `page_size` is clamped to at least one.
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        let page_size = page_size.max(1);

        Self {
            items,
            page_size,
            visible: page_size,
            settling: false,
        }
    }

    /// The currently revealed prefix.
    pub fn visible(&self) -> &[T] {
        &self.items[..self.visible.min(self.items.len())]
    }

    pub fn has_more(&self) -> bool {
        self.visible < self.items.len()
    }

    /// Reveals one more page, clamped to the end of the source.
    pub fn advance(&mut self) {
        if self.has_more() {
            self.visible = (self.visible + self.page_size).min(self.items.len());
        }
    }

    /// Replaces the source list. The window always resets to the first page,
    /// so a filter change upstream shows the start of the new result set
    /// rather than a stale offset into it.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.visible = self.page_size;
        self.settling = false;
    }

    /// Intersection callback entry point. Advances at most one page per
    /// event: repeat notifications while the previous advance is still
    /// settling are dropped until [`Self::settle`] is called.
    pub fn notify_sentinel(&mut self) {
        if self.settling || !self.has_more() {
            return;
        }
        self.advance();
        self.settling = true;
    }

    /// Marks the last advance as rendered, re-arming the sentinel.
    pub fn settle(&mut self) {
        self.settling = false;
    }
}

pub type SubscriptionId = u64;

/// Capability to watch an element's proximity to the viewport: "call me when
/// the sentinel is within `near_margin` pixels of being visible."
pub trait SentinelObserver {
    fn subscribe(&mut self, near_margin: u32, callback: Box<dyn FnMut()>) -> SubscriptionId;

    fn unsubscribe(&mut self, id: SubscriptionId);
}

/// Registers `callback` with the observer and unsubscribes when dropped, so
/// detaching the sentinel cannot leak the observation.
pub struct Subscription {
    observer: Rc<RefCell<dyn SentinelObserver>>,
    id: SubscriptionId,
}

pub fn observe(
    observer: Rc<RefCell<dyn SentinelObserver>>,
    near_margin: u32,
    callback: Box<dyn FnMut()>,
) -> Subscription {
    let id = observer.borrow_mut().subscribe(near_margin, callback);

    Subscription { observer, id }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.observer.borrow_mut().unsubscribe(self.id);
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

    use super::{
        RevealController, SENTINEL_MARGIN_PX, SentinelObserver, Subscription, SubscriptionId,
        observe,
    };

    #[derive(Default)]
    struct FakeViewport {
        callbacks: BTreeMap<SubscriptionId, Box<dyn FnMut()>>,
        next_id: SubscriptionId,
    }

    impl FakeViewport {
        fn fire(&mut self) {
            for callback in self.callbacks.values_mut() {
                callback();
            }
        }
    }

    impl SentinelObserver for FakeViewport {
        fn subscribe(&mut self, _near_margin: u32, callback: Box<dyn FnMut()>) -> SubscriptionId {
            let id = self.next_id;
            self.next_id += 1;
            self.callbacks.insert(id, callback);
            id
        }

        fn unsubscribe(&mut self, id: SubscriptionId) {
            self.callbacks.remove(&id);
        }
    }

    #[test]
    fn test_initial_window_is_one_page() {
        let controller = RevealController::new(vec![1, 2, 3, 4, 5], 2);
        assert_eq!(controller.visible(), &[1, 2]);
        assert!(controller.has_more());
    }

    #[test]
    fn test_short_source_is_fully_visible() {
        let controller = RevealController::new(vec![1], 8);
        assert_eq!(controller.visible(), &[1]);
        assert!(!controller.has_more());

        let empty: RevealController<i32> = RevealController::new(vec![], 8);
        assert_eq!(empty.visible(), &[] as &[i32]);
        assert!(!empty.has_more());
    }

    #[test]
    fn test_advance_grows_by_page_and_clamps() {
        let items: Vec<u64> = (0..7).collect();
        let mut controller = RevealController::new(items.clone(), 3);

        // After k advances the window is min(3 * (k + 1), 7).
        for expected in [3, 6, 7, 7] {
            assert_eq!(controller.visible(), &items[..expected]);
            assert_eq!(controller.has_more(), expected < items.len());
            controller.advance();
        }
    }

    #[test]
    fn test_set_items_resets_to_first_page() {
        let mut controller = RevealController::new((0..20).collect(), 4);
        controller.advance();
        controller.advance();
        assert_eq!(controller.visible().len(), 12);

        controller.set_items((100..110).collect());
        assert_eq!(controller.visible(), &[100, 101, 102, 103]);
        assert!(controller.has_more());
    }

    #[test]
    fn test_sentinel_advances_once_until_settled() {
        let mut controller = RevealController::new((0..10).collect::<Vec<_>>(), 2);

        controller.notify_sentinel();
        assert_eq!(controller.visible().len(), 4);

        // Re-entrant events before the render settles must not stack.
        controller.notify_sentinel();
        controller.notify_sentinel();
        assert_eq!(controller.visible().len(), 4);

        controller.settle();
        controller.notify_sentinel();
        assert_eq!(controller.visible().len(), 6);
    }

    #[test]
    fn test_sentinel_is_inert_when_exhausted() {
        let mut controller = RevealController::new(vec![1, 2], 4);
        controller.notify_sentinel();
        assert_eq!(controller.visible(), &[1, 2]);
    }

    #[test]
    fn test_subscription_drives_controller_and_cleans_up() {
        let controller = Rc::new(RefCell::new(RevealController::new(
            (0..12).collect::<Vec<_>>(),
            4,
        )));
        let viewport = Rc::new(RefCell::new(FakeViewport::default()));

        let driven = controller.clone();
        let subscription: Subscription = observe(
            viewport.clone(),
            SENTINEL_MARGIN_PX,
            Box::new(move || driven.borrow_mut().notify_sentinel()),
        );

        viewport.borrow_mut().fire();
        assert_eq!(controller.borrow().visible().len(), 8);

        // Dropping the guard releases the observation.
        drop(subscription);
        assert!(viewport.borrow().callbacks.is_empty());

        viewport.borrow_mut().fire();
        assert_eq!(controller.borrow().visible().len(), 8);
    }
}
