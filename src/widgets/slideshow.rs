//! Full-screen slideshow viewer.
//!
//! ```text
//! Closed ──open──▶ Open(project, 0) ──next/prev──▶ Open(project, i') ──close──▶ Closed
//! ```
//!
//! The viewer is sans-IO. Every operation returns the [`Effect`]s the host
//! must perform (subscribe to the keyboard, request an image, arm or cancel a
//! timer) and the host reports back through [`Input`]s. Nothing here owns a
//! timer or a listener, so the same code runs under the browser runtime and
//! under plain unit tests.
//!
//! ## Load tracking
//!
//! Navigating to a slot that is neither preloaded nor failed raises the
//! loading flag and arms a timer identified by a fresh [`TimerToken`]. The
//! load signal and the timer race: whichever arrives first settles the slot
//! and the other becomes inert. A timeout carrying a stale token does
//! nothing; a load signal for a slot the timeout already failed does nothing.
//!
//! Failed slots render a placeholder and stay failed for the life of the
//! open viewer unless `retry_failed_on_revisit` is set, in which case
//! navigating back onto one clears the failure and tries again. Preloading
//! never re-requests a failed slot either way.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Slideshow tuning, loaded from the `[slideshow]` section of `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlideshowSettings {
    /// How long the current slide may load before it is marked failed.
    pub load_timeout_ms: u32,
    /// Preload the previous and next slides as well as the current one.
    pub preload_neighbors: bool,
    /// Re-attempt a failed slide when the user navigates back onto it.
    pub retry_failed_on_revisit: bool,
    /// Close the viewer when the dimmed backdrop is clicked.
    pub close_on_backdrop: bool,
}

impl Default for SlideshowSettings {
    fn default() -> Self {
        Self {
            load_timeout_ms: 10_000,
            preload_neighbors: true,
            retry_failed_on_revisit: false,
            close_on_backdrop: true,
        }
    }
}

/// Keys the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// Identifies one armed load timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Something that happened to an open viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Next,
    Previous,
    Close,
    /// Click on the dimmed area outside the image frame.
    BackdropClick,
    Key(Key),
    /// The image at this index finished loading (displayed or preloaded).
    ImageLoaded(usize),
    /// The image at this index signalled an error.
    ImageFailed(usize),
    TimedOut(TimerToken),
}

/// Work the host must perform on behalf of the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Subscribe to page-level key presses.
    ListenKeyboard,
    /// Drop the key press subscription.
    UnlistenKeyboard,
    /// Fetch this image off-screen.
    Preload(usize),
    /// Report `Input::TimedOut(token)` after `after_ms`.
    StartTimer { token: TimerToken, after_ms: u32 },
    CancelTimer(TimerToken),
}

/// What the current slot should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideState {
    /// Waiting for the image; show the spinner.
    Loading,
    /// Show the image.
    Ready,
    /// Show the "failed to load" placeholder.
    Failed,
}

impl SlideState {
    /// Whether the displayed image may point at the slide's URL. A failed
    /// slot shows the placeholder and leaves the image without a source.
    pub fn requests_image(self) -> bool {
        self != SlideState::Failed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingLoad {
    index: usize,
    token: TimerToken,
}

/// State of one open viewer session.
#[derive(Debug, Clone)]
pub struct Slideshow {
    project_id: String,
    image_count: usize,
    index: usize,
    preloaded: BTreeSet<usize>,
    failed: BTreeSet<usize>,
    requested: BTreeSet<usize>,
    loading: bool,
    pending: Option<PendingLoad>,
}

impl Slideshow {
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn image_count(&self) -> usize {
        self.image_count
    }

    /// Current index, always in `[0, image_count)`.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_preloaded(&self, index: usize) -> bool {
        self.preloaded.contains(&index)
    }

    pub fn is_failed(&self, index: usize) -> bool {
        self.failed.contains(&index)
    }

    pub fn preloaded(&self) -> impl Iterator<Item = usize> + '_ {
        self.preloaded.iter().copied()
    }

    pub fn failed(&self) -> impl Iterator<Item = usize> + '_ {
        self.failed.iter().copied()
    }

    pub fn slide_state(&self) -> SlideState {
        if self.failed.contains(&self.index) {
            SlideState::Failed
        } else if self.loading {
            SlideState::Loading
        } else {
            SlideState::Ready
        }
    }

    /// Counter text, e.g. `"2 / 5"`.
    pub fn counter(&self) -> String {
        format!("{} / {}", self.index + 1, self.image_count)
    }

    fn next_index(&self) -> usize {
        (self.index + 1) % self.image_count
    }

    fn previous_index(&self) -> usize {
        (self.index + self.image_count - 1) % self.image_count
    }
}

/// The viewer: closed, or open on one project's gallery.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    settings: SlideshowSettings,
    session: Option<Slideshow>,
    next_token: u64,
}

impl Viewer {
    pub fn new(settings: SlideshowSettings) -> Self {
        Self {
            settings,
            session: None,
            next_token: 0,
        }
    }

    pub fn settings(&self) -> &SlideshowSettings {
        &self.settings
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn current(&self) -> Option<&Slideshow> {
        self.session.as_ref()
    }

    /// Open the viewer on a project, always at its first image.
    ///
    /// A project without images leaves the viewer closed. Opening while
    /// already open tears the previous session down first.
    pub fn open(&mut self, project_id: &str, image_count: usize) -> Vec<Effect> {
        let mut effects = self.close();
        if image_count == 0 {
            log::warn!("project '{project_id}' has no images; slideshow stays closed");
            return effects;
        }
        self.session = Some(Slideshow {
            project_id: project_id.to_string(),
            image_count,
            index: 0,
            preloaded: BTreeSet::new(),
            failed: BTreeSet::new(),
            requested: BTreeSet::new(),
            loading: false,
            pending: None,
        });
        effects.push(Effect::ListenKeyboard);
        effects.extend(self.navigate(0));
        effects
    }

    /// Close the viewer, discarding all session state.
    pub fn close(&mut self) -> Vec<Effect> {
        let Some(session) = self.session.take() else {
            return Vec::new();
        };
        let mut effects = Vec::new();
        if let Some(pending) = session.pending {
            effects.push(Effect::CancelTimer(pending.token));
        }
        effects.push(Effect::UnlistenKeyboard);
        effects
    }

    /// Feed one input. Inputs while closed have no effect.
    pub fn handle(&mut self, input: Input) -> Vec<Effect> {
        let Some(session) = self.session.as_ref() else {
            return Vec::new();
        };
        match input {
            Input::Next | Input::Key(Key::ArrowRight) => {
                let target = session.next_index();
                self.navigate(target)
            }
            Input::Previous | Input::Key(Key::ArrowLeft) => {
                let target = session.previous_index();
                self.navigate(target)
            }
            Input::Close | Input::Key(Key::Escape) => self.close(),
            Input::BackdropClick if self.settings.close_on_backdrop => self.close(),
            Input::BackdropClick | Input::Key(Key::Other) => Vec::new(),
            Input::ImageLoaded(index) => self.image_loaded(index),
            Input::ImageFailed(index) => self.image_failed(index),
            Input::TimedOut(token) => self.timed_out(token),
        }
    }

    fn fresh_token(&mut self) -> TimerToken {
        self.next_token += 1;
        TimerToken(self.next_token)
    }

    fn navigate(&mut self, target: usize) -> Vec<Effect> {
        let token = self.fresh_token();
        let settings = self.settings.clone();
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        let mut effects = Vec::new();

        session.index = target;
        session.loading = false;
        if let Some(pending) = session.pending.take() {
            effects.push(Effect::CancelTimer(pending.token));
        }

        if settings.retry_failed_on_revisit && session.failed.remove(&target) {
            session.requested.remove(&target);
        }

        if !session.preloaded.contains(&target) && !session.failed.contains(&target) {
            session.loading = true;
            session.pending = Some(PendingLoad {
                index: target,
                token,
            });
            effects.push(Effect::StartTimer {
                token,
                after_ms: settings.load_timeout_ms,
            });
        }

        effects.extend(preload_effects(session, settings.preload_neighbors));
        effects
    }

    fn image_loaded(&mut self, index: usize) -> Vec<Effect> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        if index >= session.image_count || session.failed.contains(&index) {
            return Vec::new();
        }
        session.preloaded.insert(index);
        session.requested.remove(&index);
        settle_pending(session, index)
    }

    fn image_failed(&mut self, index: usize) -> Vec<Effect> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        if index >= session.image_count || session.preloaded.contains(&index) {
            return Vec::new();
        }
        log::debug!("slide {index} of '{}' failed to load", session.project_id);
        session.failed.insert(index);
        session.requested.remove(&index);
        settle_pending(session, index)
    }

    fn timed_out(&mut self, token: TimerToken) -> Vec<Effect> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        match session.pending {
            Some(pending) if pending.token == token => {
                log::debug!(
                    "slide {} of '{}' timed out",
                    pending.index,
                    session.project_id
                );
                session.pending = None;
                session.loading = false;
                session.failed.insert(pending.index);
                session.requested.remove(&pending.index);
            }
            _ => {}
        }
        Vec::new()
    }
}

/// Clear the loading state if `index` is the slot being waited on.
fn settle_pending(session: &mut Slideshow, index: usize) -> Vec<Effect> {
    match session.pending {
        Some(pending) if pending.index == index => {
            session.pending = None;
            session.loading = false;
            vec![Effect::CancelTimer(pending.token)]
        }
        _ => Vec::new(),
    }
}

/// Request current, previous and next (deduplicated, wrapping), skipping
/// anything already preloaded, failed or in flight.
fn preload_effects(session: &mut Slideshow, neighbors: bool) -> Vec<Effect> {
    let mut candidates = vec![session.index];
    if neighbors {
        candidates.push(session.previous_index());
        candidates.push(session.next_index());
    }
    let mut effects = Vec::new();
    for index in candidates {
        if session.preloaded.contains(&index) || session.failed.contains(&index) {
            continue;
        }
        if session.requested.insert(index) {
            effects.push(Effect::Preload(index));
        }
    }
    effects
}
