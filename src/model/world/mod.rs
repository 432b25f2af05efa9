use crate::model::config::AppConfig;
use crate::model::ecs::Ecs;
use crate::model::events::{EventBus, GuiCommand, Subscription};
use crate::model::metrics::Metrics;
use crate::model::spatial_hash::SpatialHash;
use ecosim_core::EntityId;
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

pub mod commands;
pub mod init;
pub mod update;

pub use update::TickSummary;

/// Commands received from the bus, applied at the start of the next tick.
pub(crate) type CommandInbox = Rc<RefCell<VecDeque<GuiCommand>>>;

/// The top-level simulation: one ECS, one broad-phase grid, one event bus.
pub struct World {
    pub width: f64,
    pub height: f64,
    /// Ticks run, paused or not.
    pub tick: u64,
    pub ecs: Ecs,
    pub spatial_hash: SpatialHash,
    pub config: AppConfig,
    pub rng: ChaCha8Rng,
    pub metrics: Metrics,
    events: Rc<EventBus>,
    inbox: CommandInbox,
    scene_requests: Rc<RefCell<VecDeque<String>>>,
    subscriptions: Vec<Subscription>,
    frame: u64,
    paused: bool,
    running: bool,
}

impl World {
    /// Unpaused ticks since construction or the last reset.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// False once an `AppQuit` command has been applied.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The bus this world listens on. Clone the `Rc` to hand it to other
    /// collaborators.
    #[must_use]
    pub fn events(&self) -> &Rc<EventBus> {
        &self.events
    }

    /// Commands received but not yet applied.
    #[must_use]
    pub fn pending_commands(&self) -> usize {
        self.inbox.borrow().len()
    }

    /// Oldest scene switch requested on the bus, if any. Scene management
    /// belongs to the host; the world only records the request.
    pub fn take_scene_request(&mut self) -> Option<String> {
        self.scene_requests.borrow_mut().pop_front()
    }

    /// Broad-phase candidates near `(x, y)`. May include entities farther
    /// than `radius`; never misses a closer one.
    #[must_use]
    pub fn query_spatial(&self, x: f64, y: f64, radius: f64) -> Vec<EntityId> {
        self.spatial_hash.query(x, y, radius)
    }

    /// Entities whose position, as of the last spatial rebuild, lies within
    /// `radius` of `(x, y)`. The rebuild happens at the start of each tick,
    /// before AI and Movement.
    #[must_use]
    pub fn neighbors_within(&self, x: f64, y: f64, radius: f64) -> Vec<EntityId> {
        self.spatial_hash.query_within(x, y, radius)
    }

    #[must_use]
    pub fn population(&self) -> usize {
        self.ecs.entities().len()
    }
}

impl Drop for World {
    fn drop(&mut self) {
        for token in self.subscriptions.drain(..) {
            self.events.unsubscribe(token);
        }
    }
}
