//! Interactive page widgets as pure state machines.
//!
//! Every widget here is driven by discrete UI events (pointer moves, key
//! presses, animation-frame ticks, image load callbacks, intersection samples)
//! and never touches the DOM. The browser runtime translates DOM events into
//! calls on these types and applies whatever they report back; native tests
//! drive them directly.
//!
//! | Widget | Role |
//! |--------|------|
//! | [`carousel`] | Auto-scrolling, drag-to-scroll, looped project strip |
//! | [`slideshow`] | Full-screen screenshot viewer with preloading and load timeouts |
//! | [`visibility`] | Timeline entrance/exit tracking from intersection samples |
//! | [`progress`] | Page scroll-progress percentage |
//!
//! The tuning knobs of each widget (`*Settings`) double as sections of
//! `config.toml`, so the page and the tests share one parameterized version.

pub mod carousel;
pub mod progress;
pub mod slideshow;
pub mod visibility;

pub use carousel::{Carousel, CarouselSettings, Viewport};
pub use progress::scroll_progress;
pub use slideshow::{Effect, Input, Key, SlideState, Slideshow, SlideshowSettings, TimerToken, Viewer};
pub use visibility::{IntersectionSample, Transition, VisibilitySettings, VisibilityTracker};
