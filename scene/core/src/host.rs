//! Frame Host
//!
//! The host owns frame scheduling and resize notifications, the way a
//! browser owns `requestAnimationFrame` and window listeners. The loop asks
//! for frames and listeners; the driver (terminal event loop, test) asks the
//! host what is due and dispatches to the loop.
//!
//! [`Scheduler`] is single-threaded by construction (`Rc`), matching the
//! cooperative model: frames never run concurrently.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::viewport::Viewport;

/// Ticket for a requested frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(u64);

/// Ticket for a registered resize listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerHandle(u64);

/// Scheduling services an animation loop needs from its host
pub trait FrameHost {
    /// Current viewport size
    fn viewport(&self) -> Viewport;

    /// Ask for one callback on the next display refresh
    fn request_frame(&self) -> FrameHandle;

    /// Withdraw a frame request (no-op if it already fired)
    fn cancel_frame(&self, handle: FrameHandle);

    /// Start receiving resize notifications
    fn add_resize_listener(&self) -> ListenerHandle;

    /// Stop receiving resize notifications
    fn remove_resize_listener(&self, handle: ListenerHandle);
}

#[derive(Debug, Default)]
struct SchedulerState {
    viewport: Viewport,
    next_id: u64,
    pending_frames: BTreeSet<FrameHandle>,
    listeners: BTreeSet<ListenerHandle>,
}

impl SchedulerState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Cooperative frame host shared between a driver and its loop
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    state: Rc<RefCell<SchedulerState>>,
}

impl Scheduler {
    /// Create a host for a viewport
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            state: Rc::new(RefCell::new(SchedulerState {
                viewport,
                ..SchedulerState::default()
            })),
        }
    }

    /// Consume all due frame requests; true if any were pending
    ///
    /// Called by the driver once per display refresh.
    pub fn take_frame(&self) -> bool {
        let mut state = self.state.borrow_mut();
        let due = !state.pending_frames.is_empty();
        state.pending_frames.clear();
        due
    }

    /// Record a new viewport size; true if anyone is listening
    ///
    /// The driver forwards the resize to the loop only when this returns
    /// true.
    pub fn resize(&self, viewport: Viewport) -> bool {
        let mut state = self.state.borrow_mut();
        state.viewport = viewport;
        !state.listeners.is_empty()
    }

    /// Number of outstanding frame requests
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.state.borrow().pending_frames.len()
    }

    /// Number of registered resize listeners
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }
}

impl FrameHost for Scheduler {
    fn viewport(&self) -> Viewport {
        self.state.borrow().viewport
    }

    fn request_frame(&self) -> FrameHandle {
        let mut state = self.state.borrow_mut();
        let handle = FrameHandle(state.next_id());
        state.pending_frames.insert(handle);
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.state.borrow_mut().pending_frames.remove(&handle);
    }

    fn add_resize_listener(&self) -> ListenerHandle {
        let mut state = self.state.borrow_mut();
        let handle = ListenerHandle(state.next_id());
        state.listeners.insert(handle);
        handle
    }

    fn remove_resize_listener(&self, handle: ListenerHandle) {
        self.state.borrow_mut().listeners.remove(&handle);
    }
}
