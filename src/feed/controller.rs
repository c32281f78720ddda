use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

use crate::app::{ReelError, Result};
use crate::domain::{FeedLimits, FeedSnapshot, FeedState, PageResult};
use crate::gateway::Gateway;

type Ack = oneshot::Sender<()>;

/// Messages understood by the controller task.
#[derive(Debug)]
pub enum FeedCommand {
    /// Drop everything and load the first page again.
    Reset { done: Option<Ack> },
    /// The item at `index` is now the most visible one. With `video_id`,
    /// an index that no longer holds that video is re-resolved first.
    NotifyVisible {
        index: usize,
        video_id: Option<i64>,
        done: Option<Ack>,
    },
    /// Clear the error notice without retrying.
    DismissError,
    Shutdown,
}

/// Handle to the controller task.
///
/// The async methods resolve once the controller has finished acting on the
/// request, including any fetch it started.
#[derive(Clone)]
pub struct FeedHandle {
    tx: mpsc::UnboundedSender<FeedCommand>,
    state_rx: watch::Receiver<FeedSnapshot>,
}

impl FeedHandle {
    /// Reset the feed and wait for the first page to load or fail.
    pub async fn reset(&self) -> Result<()> {
        self.request(|done| FeedCommand::Reset { done: Some(done) })
            .await
    }

    /// Report the most visible index and wait for any resulting fetch and
    /// eviction.
    pub async fn notify_visible(&self, index: usize) -> Result<()> {
        self.request(|done| FeedCommand::NotifyVisible {
            index,
            video_id: None,
            done: Some(done),
        })
        .await
    }

    /// Fire-and-forget report from a viewer that may be looking at an older
    /// snapshot. `index` is read from that snapshot and `video_id` is the
    /// video shown there.
    pub fn report_visible(&self, index: usize, video_id: i64) -> Result<()> {
        self.send(FeedCommand::NotifyVisible {
            index,
            video_id: Some(video_id),
            done: None,
        })
    }

    /// Fire-and-forget form of [`reset`](Self::reset).
    pub fn refresh(&self) -> Result<()> {
        self.send(FeedCommand::Reset { done: None })
    }

    pub fn dismiss_error(&self) -> Result<()> {
        self.send(FeedCommand::DismissError)
    }

    /// Stop the controller and cancel any fetch in flight.
    pub fn shutdown(&self) -> Result<()> {
        self.send(FeedCommand::Shutdown)
    }

    /// The latest published state.
    pub fn snapshot(&self) -> FeedSnapshot {
        self.state_rx.borrow().clone()
    }

    /// Receiver that wakes on every published change.
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.state_rx.clone()
    }

    async fn request(&self, make: impl FnOnce(Ack) -> FeedCommand) -> Result<()> {
        let (done, wait) = oneshot::channel();
        self.send(make(done))?;
        wait.await.map_err(|_| ReelError::ControllerClosed)
    }

    fn send(&self, command: FeedCommand) -> Result<()> {
        self.tx
            .send(command)
            .map_err(|_| ReelError::ControllerClosed)
    }
}

struct FetchCompletion {
    generation: u64,
    offset: u32,
    result: Result<PageResult>,
}

struct InFlight {
    generation: u64,
    offset: u32,
    task: JoinHandle<FetchCompletion>,
    waiter: Option<Ack>,
}

enum Event {
    Command(Option<FeedCommand>),
    Fetched(std::result::Result<FetchCompletion, JoinError>),
}

/// Sole owner of the feed state.
///
/// At most one fetch runs at a time. Each fetch carries the generation it
/// was issued under; `reset` bumps the generation and aborts the fetch, and
/// any completion from an older generation is dropped.
pub struct FeedController {
    gateway: Arc<dyn Gateway>,
    category: String,
    state: FeedState,
    generation: u64,
    /// Position of the item last reported visible, kept in step with trims so
    /// the window can be placed once a fetch lands.
    visible: Option<usize>,
    in_flight: Option<InFlight>,
    rx: mpsc::UnboundedReceiver<FeedCommand>,
    state_tx: watch::Sender<FeedSnapshot>,
}

impl FeedController {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        category: impl Into<String>,
        limits: FeedLimits,
    ) -> (Self, FeedHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let state = FeedState::new(limits);
        let (state_tx, state_rx) = watch::channel(state.snapshot(0));

        let controller = Self {
            gateway,
            category: category.into(),
            state,
            generation: 0,
            visible: None,
            in_flight: None,
            rx,
            state_tx,
        };
        (controller, FeedHandle { tx, state_rx })
    }

    /// Run until shut down or until every handle is dropped.
    pub async fn run(mut self) {
        info!("Feed controller started (category {:?})", self.category);

        loop {
            let event = tokio::select! {
                command = self.rx.recv() => Event::Command(command),
                joined = wait_for(&mut self.in_flight) => Event::Fetched(joined),
            };

            match event {
                Event::Command(None) | Event::Command(Some(FeedCommand::Shutdown)) => break,
                Event::Command(Some(command)) => self.handle_command(command),
                Event::Fetched(joined) => self.complete_fetch(joined),
            }
        }

        self.cancel_in_flight();
        self.publish();
        info!("Feed controller stopped");
    }

    fn handle_command(&mut self, command: FeedCommand) {
        match command {
            FeedCommand::Reset { done } => self.reset(done),
            FeedCommand::NotifyVisible {
                index,
                video_id,
                done,
            } => self.notify_visible(index, video_id, done),
            FeedCommand::DismissError => {
                self.state.dismiss_error();
                self.publish();
            }
            FeedCommand::Shutdown => {}
        }
    }

    fn reset(&mut self, done: Option<Ack>) {
        self.generation += 1;
        self.cancel_in_flight();
        self.state.reset();
        self.visible = None;
        info!("Feed reset (generation {})", self.generation);
        self.start_fetch(done);
    }

    fn notify_visible(&mut self, index: usize, video_id: Option<i64>, done: Option<Ack>) {
        let index = match video_id {
            None => index,
            Some(id) => match self.state.resolve_visible(index, id) {
                Some(position) => position,
                None => {
                    debug!("Video {} left the window before its report arrived", id);
                    ack(done);
                    return;
                }
            },
        };
        self.visible = (index < self.state.items().len()).then_some(index);

        if self.state.should_prefetch(index) {
            debug!(
                "Index {} of {} is near the end, fetching",
                index,
                self.state.items().len()
            );
            // eviction runs once the page lands
            self.start_fetch(done);
            return;
        }

        self.evict_around(index);
        self.publish();
        ack(done);
    }

    fn evict_around(&mut self, index: usize) {
        if let Some(kept) = self.state.evict_around(index) {
            debug!(
                "Window trimmed to {}..{} around index {}",
                kept.start, kept.end, index
            );
            self.visible = self
                .visible
                .filter(|position| kept.contains(position))
                .map(|position| position - kept.start);
        }
    }

    fn start_fetch(&mut self, done: Option<Ack>) {
        let offset = self.state.begin_fetch();
        let generation = self.generation;
        let limit = self.state.limits().page_size;
        let gateway = self.gateway.clone();
        let category = self.category.clone();

        debug!("Fetching offset {} (generation {})", offset, generation);
        let task = tokio::spawn(async move {
            let result = gateway
                .fetch_recommendations(offset, limit, &category)
                .await;
            FetchCompletion {
                generation,
                offset,
                result,
            }
        });

        self.in_flight = Some(InFlight {
            generation,
            offset,
            task,
            waiter: done,
        });
        self.publish();
    }

    fn complete_fetch(&mut self, joined: std::result::Result<FetchCompletion, JoinError>) {
        let Some(fetch) = self.in_flight.take() else {
            return;
        };

        let completion = joined.unwrap_or_else(|e| FetchCompletion {
            generation: fetch.generation,
            offset: fetch.offset,
            result: Err(ReelError::Other(format!("Fetch task failed: {}", e))),
        });

        if completion.generation != self.generation {
            warn!(
                "Discarding page at offset {} from generation {} (current {})",
                completion.offset, completion.generation, self.generation
            );
            self.state.finish_fetch();
            self.publish();
            ack(fetch.waiter);
            return;
        }

        match completion.result {
            Ok(page) if page.is_empty() => {
                info!("Feed exhausted at offset {}", completion.offset);
                self.state.apply_page(page);
            }
            Ok(page) => {
                info!(
                    "Loaded {} items at offset {}",
                    page.items.len(),
                    completion.offset
                );
                self.state.apply_page(page);
            }
            Err(e) => {
                warn!("Fetch at offset {} failed: {}", completion.offset, e);
                self.state.apply_failure(e.to_string());
            }
        }
        self.state.finish_fetch();

        if let Some(index) = self.visible {
            self.evict_around(index);
        }

        self.publish();
        ack(fetch.waiter);
    }

    fn cancel_in_flight(&mut self) {
        if let Some(fetch) = self.in_flight.take() {
            debug!(
                "Cancelling fetch at offset {} (generation {})",
                fetch.offset, fetch.generation
            );
            fetch.task.abort();
            self.state.finish_fetch();
            ack(fetch.waiter);
        }
    }

    fn publish(&self) {
        self.state_tx
            .send_replace(self.state.snapshot(self.generation));
    }
}

async fn wait_for(
    in_flight: &mut Option<InFlight>,
) -> std::result::Result<FetchCompletion, JoinError> {
    match in_flight {
        Some(fetch) => (&mut fetch.task).await,
        None => std::future::pending().await,
    }
}

fn ack(done: Option<Ack>) {
    if let Some(done) = done {
        let _ = done.send(());
    }
}

/// Spawn the controller as a tokio task.
pub fn spawn_feed_controller(
    gateway: Arc<dyn Gateway>,
    category: impl Into<String>,
    limits: FeedLimits,
) -> FeedHandle {
    let (controller, handle) = FeedController::new(gateway, category, limits);

    tokio::spawn(async move {
        controller.run().await;
    });

    handle
}
