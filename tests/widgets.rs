//! Behavioural properties of the page widgets, exercised through the public
//! API exactly as the browser runtime drives them.

use devfolio::widgets::{
    Carousel, CarouselSettings, Effect, Input, Key, SlideState, SlideshowSettings, TimerToken,
    Viewer, Viewport,
};

fn ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("project-{i}")).collect()
}

fn started_timer(effects: &[Effect]) -> Option<TimerToken> {
    effects.iter().find_map(|e| match e {
        Effect::StartTimer { token, .. } => Some(*token),
        _ => None,
    })
}

// ===========================================================================
// Carousel
// ===========================================================================

#[test]
fn every_card_reports_the_project_it_was_cloned_from() {
    for n in 1..=7 {
        let carousel = Carousel::new(ids(n), CarouselSettings::default());
        assert_eq!(carousel.card_count(), 2 * n);
        for card in 0..2 * n {
            let expected = format!("project-{}", card % n);
            assert_eq!(carousel.select(card), Some(expected.as_str()));
        }
        assert_eq!(carousel.select(2 * n), None);
    }
}

#[test]
fn auto_scroll_advances_until_hovered_or_dragged() {
    let viewport = Viewport::new(4000.0, 800.0);
    let mut carousel = Carousel::new(ids(4), CarouselSettings::default());

    let mut last = carousel.offset();
    for _ in 0..20 {
        let next = carousel.tick(viewport);
        assert!(next > last, "offset must strictly increase: {last} -> {next}");
        last = next;
    }

    carousel.pointer_enter();
    for _ in 0..5 {
        assert_eq!(carousel.tick(viewport), last);
    }
    carousel.pointer_leave();
    assert!(carousel.tick(viewport) > last);

    let frozen = carousel.offset();
    carousel.pointer_down(300.0);
    for _ in 0..5 {
        assert_eq!(carousel.tick(viewport), frozen);
    }
}

#[test]
fn auto_scroll_loops_at_single_copy_width() {
    let settings = CarouselSettings {
        scroll_step: 100.0,
        ..CarouselSettings::default()
    };
    let viewport = Viewport::new(2000.0, 500.0);
    let mut carousel = Carousel::new(ids(3), settings);
    let offsets: Vec<f64> = (0..12).map(|_| carousel.tick(viewport)).collect();
    assert!(offsets.iter().all(|o| *o <= viewport.loop_width()));
    assert!(offsets.contains(&0.0), "offset never wrapped: {offsets:?}");
}

#[test]
fn drag_scrolls_against_pointer_and_swallows_click() {
    let viewport = Viewport::new(3000.0, 600.0);
    let mut carousel = Carousel::new(ids(3), CarouselSettings::default());
    carousel.sync_offset(500.0);

    carousel.pointer_down(400.0);
    let offset = carousel.pointer_move(350.0, viewport).unwrap();
    assert_eq!(offset, 600.0);
    carousel.pointer_up();

    assert_eq!(carousel.select(1), None);

    // A press that barely moves is still a click.
    carousel.pointer_down(100.0);
    carousel.pointer_move(102.0, viewport);
    carousel.pointer_up();
    assert_eq!(carousel.select(1), Some("project-1"));
}

// ===========================================================================
// Slideshow
// ===========================================================================

fn opened(count: usize) -> Viewer {
    let mut viewer = Viewer::new(SlideshowSettings::default());
    viewer.open("movie-chief", count);
    viewer
}

fn index(viewer: &Viewer) -> usize {
    viewer.current().unwrap().index()
}

#[test]
fn next_and_previous_are_inverse() {
    for count in 1..=6 {
        for start in 0..count {
            for (first, second) in [(Input::Next, Input::Previous), (Input::Previous, Input::Next)] {
                let mut viewer = opened(count);
                for _ in 0..start {
                    viewer.handle(Input::Next);
                }
                assert_eq!(index(&viewer), start);
                viewer.handle(first);
                viewer.handle(second);
                assert_eq!(index(&viewer), start, "count {count}, start {start}");
            }
        }
    }
}

#[test]
fn load_before_timeout_marks_preloaded() {
    let mut viewer = opened(3);
    let effects = viewer.handle(Input::Next);
    let token = started_timer(&effects).unwrap();
    assert!(viewer.current().unwrap().is_loading());

    let effects = viewer.handle(Input::ImageLoaded(1));
    assert!(effects.contains(&Effect::CancelTimer(token)));
    let show = viewer.current().unwrap();
    assert!(!show.is_loading());
    assert!(show.is_preloaded(1));
    assert_eq!(show.slide_state(), SlideState::Ready);

    // The timer losing the race changes nothing.
    viewer.handle(Input::TimedOut(token));
    assert!(!viewer.current().unwrap().is_failed(1));
}

#[test]
fn timeout_before_load_marks_failed() {
    let mut viewer = opened(3);
    let effects = viewer.handle(Input::Next);
    let token = started_timer(&effects).unwrap();

    viewer.handle(Input::TimedOut(token));
    let show = viewer.current().unwrap();
    assert!(!show.is_loading());
    assert!(show.is_failed(1));
    assert_eq!(show.slide_state(), SlideState::Failed);

    // A late load does not resurrect the slot.
    viewer.handle(Input::ImageLoaded(1));
    assert!(viewer.current().unwrap().is_failed(1));
}

#[test]
fn opening_always_starts_at_first_image() {
    let mut viewer = opened(4);
    viewer.handle(Input::Next);
    viewer.handle(Input::Next);
    viewer.handle(Input::Close);

    for project in ["gojo", "movie-chief", "gojo"] {
        viewer.open(project, 4);
        assert_eq!(index(&viewer), 0);
        assert_eq!(viewer.current().unwrap().project_id(), project);
        viewer.handle(Input::Next);
    }
}

#[test]
fn escape_closes_and_unsubscribes_keyboard() {
    let mut viewer = opened(3);
    let effects = viewer.handle(Input::Key(Key::Escape));
    assert!(effects.contains(&Effect::UnlistenKeyboard));
    assert!(!viewer.is_open());

    for key in [Key::ArrowRight, Key::ArrowLeft, Key::Escape] {
        assert!(viewer.handle(Input::Key(key)).is_empty());
    }
    assert!(viewer.current().is_none());
}

#[test]
fn right_arrow_walks_and_wraps() {
    let mut viewer = opened(3);
    assert_eq!(index(&viewer), 0);
    viewer.handle(Input::Key(Key::ArrowRight));
    viewer.handle(Input::Key(Key::ArrowRight));
    assert_eq!(index(&viewer), 2);
    viewer.handle(Input::Key(Key::ArrowRight));
    assert_eq!(index(&viewer), 0);
    assert_eq!(viewer.current().unwrap().counter(), "1 / 3");
}

#[test]
fn keyboard_subscription_spans_exactly_the_open_session() {
    let mut viewer = Viewer::new(SlideshowSettings::default());
    let opened = viewer.open("gojo", 2);
    assert_eq!(
        opened.iter().filter(|e| **e == Effect::ListenKeyboard).count(),
        1
    );
    let closed = viewer.close();
    assert_eq!(
        closed.iter().filter(|e| **e == Effect::UnlistenKeyboard).count(),
        1
    );
    assert!(viewer.close().is_empty());
}
