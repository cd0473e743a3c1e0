//! Screen controller
//!
//! Orchestrates one "decide" cycle: snapshot the catalog, filter, pick
//! one row uniformly, and drive the content transition around the swap.
//! A single controller instance owns the selection result / animation
//! state pair; its shared state is only mutated by its own continuations.

use moldpick_common::config::Config;
use moldpick_common::events::SelectorEvent;
use moldpick_common::model::Mold;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::filter::{self, FilterConfig};
use crate::selector;
use crate::state::SharedState;
use crate::store::{CatalogStore, StoreError};
use crate::transition::{ContentTransition, ImageFade, Step};

/// User-facing message for an empty catalog
pub const NO_DATA_MESSAGE: &str = "データがありません";
/// User-facing message when no row matches the active filter
pub const NO_MATCH_MESSAGE: &str = "条件に合うデータがありません。";

/// Interval at which the transition machines are advanced
const FRAME: Duration = Duration::from_millis(20);

/// Outcome of one decide cycle
#[derive(Debug, Clone, PartialEq)]
pub enum DecideOutcome {
    /// A new row was picked and is now displayed
    Selected(Mold),
    /// The catalog has no rows
    NoData,
    /// No row matches the active filter
    NoMatch,
    /// The store call failed; message surfaced verbatim
    StoreFailed(String),
    /// A decide cycle was already in flight; request ignored
    Busy,
    /// Teardown began before the result could be applied; dropped
    Cancelled,
}

enum Picked {
    One(Mold),
    NoData,
    NoMatch,
}

/// Clears the in-flight flag when the decide future completes or is
/// dropped mid-cycle.
struct InFlightGuard<'a>(&'a std::sync::atomic::AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// The screen controller
pub struct ScreenController {
    store: Arc<dyn CatalogStore>,
    state: Arc<SharedState>,
    transition: Mutex<ContentTransition>,
    image_fade: Mutex<ImageFade>,
    prev_image_url: Mutex<Option<String>>,
    /// Generation counter for image fade drivers; a retrigger supersedes
    /// the running driver
    image_fade_run: AtomicU64,
    shutdown: CancellationToken,
}

impl ScreenController {
    /// Create a controller over the given store and shared state
    pub fn new(store: Arc<dyn CatalogStore>, state: Arc<SharedState>, config: &Config) -> Self {
        Self {
            store,
            state,
            transition: Mutex::new(ContentTransition::new(
                Duration::from_millis(config.content_fade_ms),
                config.curve,
            )),
            image_fade: Mutex::new(ImageFade::new(
                Duration::from_millis(config.image_fade_ms),
                config.curve,
                true,
            )),
            prev_image_url: Mutex::new(None),
            image_fade_run: AtomicU64::new(0),
            shutdown: CancellationToken::new(),
        }
    }

    /// Mark the controller as torn down
    ///
    /// In-flight fetches are not aborted, but their late completions are
    /// dropped instead of writing to the destroyed controller's state.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Run one decide cycle
    ///
    /// A decide while another is in flight is ignored and reported as
    /// [`DecideOutcome::Busy`]; the trigger control stays effectively
    /// debounced.
    pub async fn decide(&self) -> DecideOutcome {
        if self.state.decide_in_flight.swap(true, Ordering::SeqCst) {
            debug!("decide ignored, another cycle is in flight");
            return DecideOutcome::Busy;
        }

        // Released on drop: an abandoned request future (client
        // disconnect) must not leave the guard set.
        let _in_flight = InFlightGuard(&self.state.decide_in_flight);
        self.run_decide().await
    }

    async fn run_decide(&self) -> DecideOutcome {
        // Step 1: clear any previous error state
        self.state.set_error_message(None).await;

        let filter_config = self.state.get_filter().await;

        match self.pick_candidate(&filter_config).await {
            Err(err) => {
                // The prior selection stays on display
                let message = err.to_string();
                warn!(%message, "store fetch failed");
                if self.shutdown.is_cancelled() {
                    return DecideOutcome::Cancelled;
                }
                self.state.set_error_message(Some(message.clone())).await;
                self.state
                    .broadcast_event(SelectorEvent::selection_failed(&message));
                DecideOutcome::StoreFailed(message)
            }
            Ok(Picked::NoData) => {
                if self.shutdown.is_cancelled() {
                    return DecideOutcome::Cancelled;
                }
                self.state
                    .set_error_message(Some(NO_DATA_MESSAGE.to_string()))
                    .await;
                self.state
                    .broadcast_event(SelectorEvent::selection_failed(NO_DATA_MESSAGE));
                DecideOutcome::NoData
            }
            Ok(Picked::NoMatch) => {
                if self.shutdown.is_cancelled() {
                    return DecideOutcome::Cancelled;
                }
                self.state
                    .set_error_message(Some(NO_MATCH_MESSAGE.to_string()))
                    .await;
                self.state
                    .broadcast_event(SelectorEvent::selection_failed(NO_MATCH_MESSAGE));
                DecideOutcome::NoMatch
            }
            Ok(Picked::One(mold)) => {
                if self.shutdown.is_cancelled() {
                    debug!("dropping pick completed after teardown");
                    return DecideOutcome::Cancelled;
                }
                if self.animate_swap(&mold).await {
                    DecideOutcome::Selected(mold)
                } else {
                    DecideOutcome::Cancelled
                }
            }
        }
    }

    /// Obtain one candidate row for the current filter configuration
    ///
    /// Unfiltered decides push the random selection to the store: fetch
    /// the count, pick a uniform offset, fetch exactly that row. With a
    /// filter active the whole snapshot is fetched and filtered locally.
    async fn pick_candidate(&self, filter_config: &FilterConfig) -> Result<Picked, StoreError> {
        if filter_config.is_unfiltered() {
            let count = self.store.fetch_count().await?;
            if count == 0 {
                return Ok(Picked::NoData);
            }
            let offset = selector::pick_offset(count, &mut rand::thread_rng());
            let rows = self.store.fetch_range(offset, offset).await?;
            match rows.into_iter().next() {
                Some(mold) => Ok(Picked::One(mold)),
                // Table shrank between count and range query
                None => Ok(Picked::NoData),
            }
        } else {
            let rows = self.store.fetch_all().await?;
            if rows.is_empty() {
                return Ok(Picked::NoData);
            }
            let filtered = filter::apply(&rows, filter_config);
            if filtered.is_empty() {
                return Ok(Picked::NoMatch);
            }
            let mold = selector::pick(&filtered, &mut rand::thread_rng()).clone();
            Ok(Picked::One(mold))
        }
    }

    /// Drive the content transition and apply the new pick at the
    /// fade-out/fade-in boundary
    ///
    /// Returns true when the swap was applied, false when teardown ended
    /// the transition before the boundary.
    async fn animate_swap(&self, mold: &Mold) -> bool {
        let mut transition = self.transition.lock().await;
        transition.begin();
        self.state
            .broadcast_event(SelectorEvent::transition_phase("fading_out", 1.0));

        let mut ticker = tokio::time::interval(FRAME);
        ticker.tick().await; // first tick completes immediately

        let mut applied = false;
        loop {
            ticker.tick().await;
            if self.shutdown.is_cancelled() {
                return applied;
            }
            match transition.tick(FRAME) {
                Step::Advanced(opacity) => {
                    self.state.broadcast_event(SelectorEvent::transition_phase(
                        transition.phase().as_str(),
                        opacity,
                    ));
                }
                Step::Swap => {
                    self.apply_selection(mold).await;
                    applied = true;
                }
                Step::Done => {
                    self.state
                        .broadcast_event(SelectorEvent::transition_phase("idle", 1.0));
                    return applied;
                }
                Step::Idle => return applied,
            }
        }
    }

    /// Replace the displayed selection (never append)
    async fn apply_selection(&self, mold: &Mold) {
        let version = self.state.bump_image_version();

        // The image fade only plays when the image source actually
        // changed between successive picks
        {
            let mut prev = self.prev_image_url.lock().await;
            let animate = *prev != mold.image_url;
            *prev = mold.image_url.clone();

            let mut image_fade = self.image_fade.lock().await;
            image_fade.set_animate(animate);
            image_fade.on_source_changed(version);
        }

        self.state.set_selection(Some(mold.clone())).await;
        self.state.decided.store(true, Ordering::Relaxed);
        self.state
            .broadcast_event(SelectorEvent::selection_changed(
                mold.id,
                mold.manufacturer.clone(),
                mold.product_name.clone(),
                mold.image_url.clone(),
                version,
            ));
        info!(id = mold.id, manufacturer = %mold.manufacturer, "selection replaced");
    }

    /// The displayed image finished loading: play the fade-in
    ///
    /// A retrigger while a fade is in flight supersedes the running
    /// driver (the generation counter) and the machine restarts from
    /// opacity 0, so concurrent fades never stack.
    pub async fn image_loaded(&self) {
        let run = self.image_fade_run.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut fade = self.image_fade.lock().await;
            fade.on_load_complete();
            if !fade.is_fading() {
                // Animation suppressed: opacity pinned to 1
                self.state
                    .broadcast_event(SelectorEvent::transition_phase("image", fade.opacity()));
                return;
            }
        }

        let mut ticker = tokio::time::interval(FRAME);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if self.shutdown.is_cancelled() {
                return;
            }
            if self.image_fade_run.load(Ordering::SeqCst) != run {
                // Superseded by a newer load completion
                return;
            }

            let (opacity, fading) = {
                let mut fade = self.image_fade.lock().await;
                let opacity = fade.tick(FRAME);
                (opacity, fade.is_fading())
            };
            self.state
                .broadcast_event(SelectorEvent::transition_phase("image", opacity));
            if !fading {
                return;
            }
        }
    }
}
