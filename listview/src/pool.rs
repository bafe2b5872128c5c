use core::fmt;

use crate::ItemViewFactory;

type Hook<V> = Box<dyn FnMut(&mut V)>;

/// Handle to a view acquired from an [`ItemViewPool`].
///
/// Handles are invalidated when the view is released or the pool is cleared; a stale handle
/// never aliases a view that was handed out later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ViewHandle {
    slot: u32,
    generation: u32,
}

struct Slot<V> {
    view: Option<V>,
    generation: u32,
    active: bool,
}

/// Creates, reuses and disposes item views.
///
/// `acquire` hands out an idle view (or creates one through the factory) that is not handed out
/// anywhere else; `release` takes it back. Releasing a handle that is not outstanding is a bug
/// in the caller and asserts in debug builds.
pub struct ItemViewPool<V> {
    factory: Box<dyn ItemViewFactory<V>>,
    slots: Vec<Slot<V>>,
    idle: Vec<u32>,
    vacant: Vec<u32>,
    active: usize,
    created: usize,
    max_idle: usize,
    on_acquire: Option<Hook<V>>,
    on_release: Option<Hook<V>>,
    on_destroy: Option<Hook<V>>,
}

impl<V> ItemViewPool<V> {
    pub const DEFAULT_MAX_IDLE: usize = 10_000;

    pub fn new(factory: impl ItemViewFactory<V> + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            slots: Vec::new(),
            idle: Vec::new(),
            vacant: Vec::new(),
            active: 0,
            created: 0,
            max_idle: Self::DEFAULT_MAX_IDLE,
            on_acquire: None,
            on_release: None,
            on_destroy: None,
        }
    }

    /// Caps the number of idle views kept for reuse; views released beyond it are destroyed.
    pub fn with_max_idle(mut self, max_idle: usize) -> Self {
        self.max_idle = max_idle;
        self
    }

    /// Runs on every view handed out by `acquire` (typically "show").
    pub fn with_on_acquire(mut self, f: impl FnMut(&mut V) + 'static) -> Self {
        self.on_acquire = Some(Box::new(f));
        self
    }

    /// Runs on every view taken back by `release` (typically "hide").
    pub fn with_on_release(mut self, f: impl FnMut(&mut V) + 'static) -> Self {
        self.on_release = Some(Box::new(f));
        self
    }

    /// Runs on every view right before the pool drops it.
    pub fn with_on_destroy(mut self, f: impl FnMut(&mut V) + 'static) -> Self {
        self.on_destroy = Some(Box::new(f));
        self
    }

    /// Views currently owned by the pool (`count_active() + count_idle()`).
    pub fn count_all(&self) -> usize {
        self.active + self.idle.len()
    }

    /// Views handed out and not yet released.
    pub fn count_active(&self) -> usize {
        self.active
    }

    pub fn count_idle(&self) -> usize {
        self.idle.len()
    }

    /// Views created by the factory over the pool's lifetime.
    pub fn count_created(&self) -> usize {
        self.created
    }

    pub fn is_active(&self, handle: ViewHandle) -> bool {
        self.slots
            .get(handle.slot as usize)
            .is_some_and(|s| s.active && s.generation == handle.generation)
    }

    pub fn acquire(&mut self) -> ViewHandle {
        let slot = match self.idle.pop() {
            Some(slot) => slot,
            None => self.create(),
        };
        let s = &mut self.slots[slot as usize];
        s.active = true;
        self.active += 1;
        if let (Some(hook), Some(view)) = (self.on_acquire.as_mut(), s.view.as_mut()) {
            hook(view);
        }
        ViewHandle {
            slot,
            generation: s.generation,
        }
    }

    /// Returns a view to the pool. Returns `false` (and asserts in debug builds) if `handle` is
    /// not outstanding.
    pub fn release(&mut self, handle: ViewHandle) -> bool {
        let outstanding = self.is_active(handle);
        if !outstanding {
            lwarn!(
                slot = handle.slot,
                generation = handle.generation,
                "ItemViewPool: release of a view that is not outstanding"
            );
            debug_assert!(
                outstanding,
                "ItemViewPool: release of a view that is not outstanding ({handle:?})"
            );
            return false;
        }

        let s = &mut self.slots[handle.slot as usize];
        s.active = false;
        s.generation = s.generation.wrapping_add(1);
        self.active -= 1;
        if let (Some(hook), Some(view)) = (self.on_release.as_mut(), s.view.as_mut()) {
            hook(view);
        }

        if self.idle.len() < self.max_idle {
            self.idle.push(handle.slot);
        } else {
            self.destroy(handle.slot);
        }
        true
    }

    pub fn get(&self, handle: ViewHandle) -> Option<&V> {
        if !self.is_active(handle) {
            return None;
        }
        self.slots[handle.slot as usize].view.as_ref()
    }

    pub fn get_mut(&mut self, handle: ViewHandle) -> Option<&mut V> {
        if !self.is_active(handle) {
            return None;
        }
        self.slots[handle.slot as usize].view.as_mut()
    }

    /// Destroys every view, idle and outstanding. Outstanding handles become stale.
    pub fn clear(&mut self) {
        ldebug!(
            active = self.active,
            idle = self.idle.len(),
            "ItemViewPool::clear"
        );
        for slot in 0..self.slots.len() {
            if self.slots[slot].active {
                let s = &mut self.slots[slot];
                s.active = false;
                s.generation = s.generation.wrapping_add(1);
            }
            if self.slots[slot].view.is_some() {
                self.destroy(slot as u32);
            }
        }
        self.idle.clear();
        self.active = 0;
    }

    fn create(&mut self) -> u32 {
        let view = self.factory.create();
        self.created += 1;
        match self.vacant.pop() {
            Some(slot) => {
                self.slots[slot as usize].view = Some(view);
                slot
            }
            None => {
                self.slots.push(Slot {
                    view: Some(view),
                    generation: 0,
                    active: false,
                });
                ldebug!(slots = self.slots.len(), "ItemViewPool: grew");
                (self.slots.len() - 1) as u32
            }
        }
    }

    fn destroy(&mut self, slot: u32) {
        if let Some(mut view) = self.slots[slot as usize].view.take() {
            if let Some(hook) = self.on_destroy.as_mut() {
                hook(&mut view);
            }
            self.vacant.push(slot);
        }
    }
}

impl<V> fmt::Debug for ItemViewPool<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemViewPool")
            .field("active", &self.active)
            .field("idle", &self.idle.len())
            .field("created", &self.created)
            .field("max_idle", &self.max_idle)
            .finish_non_exhaustive()
    }
}
