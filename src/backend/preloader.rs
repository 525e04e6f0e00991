use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Duration;

use super::queue::{PreloadItem, PreloadQueue};

const BATCH_SIZE: usize = 5;
const BATCH_INTERVAL: Duration = Duration::from_millis(250);

/// Fired by the preloader's one-shot timer. Carries the epoch the timer was
/// armed under so a tick that was already in flight when the user paused is
/// recognized as stale and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloadTick(u64);

/// What the preload control should look like right now. Derived on demand,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonVisual {
    Hidden,
    OfferPause,
    OfferResume,
}

pub fn compute_visual(enabled: bool, queue_empty: bool, timer_active: bool) -> ButtonVisual {
    if !enabled || queue_empty {
        ButtonVisual::Hidden
    } else if timer_active {
        ButtonVisual::OfferPause
    } else {
        ButtonVisual::OfferResume
    }
}

/// Issues a background load for one image. Fire-and-forget: the preloader
/// never awaits the load and never learns whether it succeeded.
pub trait ImageLoader: Send {
    fn issue(&self, image_url: &str);
}

/// Production sink: joins the relative artwork path onto a base URL and
/// spawns an HTTP GET whose body is read and discarded.
pub struct HttpImageLoader {
    client: reqwest::Client,
    base_url: String,
}

impl HttpImageLoader {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("PokeVote-TUI/0.1.0")
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.to_string(),
        }
    }
}

impl ImageLoader for HttpImageLoader {
    fn issue(&self, image_url: &str) {
        let url = format!("{}{}", self.base_url, image_url);
        let client = self.client.clone();

        tokio::spawn(async move {
            match client.get(&url).send().await {
                Ok(response) => {
                    let _ = response.bytes().await;
                }
                Err(err) => log::debug!("preload fetch failed for {url}: {err}"),
            }
        });
    }
}

/// Batching preload scheduler. While enabled and the queue is non-empty, a
/// single one-shot timer drains one batch per tick and re-arms itself; it
/// stops on its own when the queue runs dry.
///
/// Two observable states: Idle (no timer pending) and Armed (timer pending).
/// The timer is a spawned sleep that posts a [`PreloadTick`] back to the main
/// loop, which hands it to [`Preloader::drain`]. Only one timer is ever
/// pending: arming is a no-op while Armed, and each drain re-arms only after
/// its own batch work is done.
pub struct Preloader {
    enabled: bool,
    queue: PreloadQueue,
    timer: Option<JoinHandle<()>>,
    epoch: u64,
    last_generation: u32,
    last_letter: String,
    loader: Box<dyn ImageLoader>,
    tick_tx: mpsc::UnboundedSender<PreloadTick>,
}

impl Preloader {
    /// `enabled` comes from the session opt-out flag, is fixed here, and
    /// never changes afterwards.
    pub fn new(
        enabled: bool,
        loader: Box<dyn ImageLoader>,
        tick_tx: mpsc::UnboundedSender<PreloadTick>,
    ) -> Self {
        Self {
            enabled,
            queue: PreloadQueue::new(),
            timer: None,
            epoch: 0,
            last_generation: 1,
            last_letter: "A".to_string(),
            loader,
            tick_tx,
        }
    }

    /// Appends items and arms the timer if it was idle. An empty input is a
    /// complete no-op; enqueueing while Armed never shortens the current
    /// wait.
    pub fn enqueue(&mut self, items: Vec<PreloadItem>) {
        if items.is_empty() {
            return;
        }
        self.queue.enqueue(items);
        self.schedule();
    }

    /// Arms the one-shot batch timer. No-op unless preloading is enabled,
    /// the queue is non-empty, and no timer is already pending.
    pub fn schedule(&mut self) {
        if self.enabled && self.timer.is_none() && !self.queue.is_empty() {
            let tx = self.tick_tx.clone();
            let tick = PreloadTick(self.epoch);
            self.timer = Some(tokio::spawn(async move {
                tokio::time::sleep(BATCH_INTERVAL).await;
                let _ = tx.send(tick);
            }));
            log::debug!("preloader armed, {} pending", self.queue.len());
        }
    }

    pub fn resume(&mut self) {
        self.schedule();
    }

    /// Cancels the pending timer, if any. Effective before any further batch
    /// runs; already-issued image loads are not revoked. No-op while Idle.
    pub fn pause(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            self.epoch += 1;
            log::debug!("preloader paused, {} pending", self.queue.len());
        }
    }

    pub fn toggle(&mut self) {
        if self.timer.is_some() {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Drains one batch in response to a timer tick: dequeues up to
    /// [`BATCH_SIZE`] items, issues a fire-and-forget load for each in order,
    /// records the last item's metadata, then re-arms if work remains.
    ///
    /// A tick from a timer that has since been cancelled carries an old
    /// epoch and is dropped here.
    pub fn drain(&mut self, tick: PreloadTick) {
        if tick.0 != self.epoch {
            log::debug!("stale preload tick dropped");
            return;
        }
        self.timer = None;
        self.epoch += 1;

        let batch = self.queue.take_batch(BATCH_SIZE);
        for item in &batch {
            self.loader.issue(&item.image_url);
            self.last_generation = item.generation;
            self.last_letter = item.letter.clone();
        }
        log::debug!(
            "preloader drained {} items, {} pending",
            batch.len(),
            self.queue.len()
        );

        if !self.queue.is_empty() {
            self.schedule();
        }
    }

    pub fn visual(&self) -> ButtonVisual {
        compute_visual(self.enabled, self.queue.is_empty(), self.timer.is_some())
    }

    /// True while a timer is pending, i.e. preloading is actively running.
    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn last_generation(&self) -> u32 {
        self.last_generation
    }

    pub fn last_letter(&self) -> &str {
        &self.last_letter
    }
}
