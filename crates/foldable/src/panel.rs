use std::time::{Duration, Instant};

use cairo::Context;
use config::{Curve, FoldConfig};
use util::color::Color;

use crate::animation::{AnimationRun, FoldDirection, RunOutcome, FOLDED_ANGLE, UNFOLDED_ANGLE};
use crate::compositor::Compositor;
use crate::content::{Content, ContentView};
use crate::error::Result;
use crate::input::{MouseEvent, MouseState, PointerEvent};
use crate::listener::{FoldListener, NoopListener};
use crate::shadow::Shadow;
use crate::slice::{mirror, split_halves};
use crate::snapshot::{capture, Snapshot};

struct Pieces {
    top: Snapshot,
    mirrored_bottom: Snapshot,
}

/// A card that folds between a cover face (`cover_height` tall) and a detail
/// face (twice as tall).
///
/// Starts folded. All transitions are silently ignored when they do not
/// apply: folding a folded panel, anything at all while a run is in flight.
/// The detail face has to be exactly twice the cover height for the halves
/// to line up; this is not checked.
pub struct FoldablePanel {
    folded: bool,
    cover_height: i32,
    width: i32,
    height: i32,
    layout_requested: bool,

    duration: Duration,
    curve: Curve,
    shadow_color: Color,

    compositor: Compositor,
    run: Option<AnimationRun>,
    listener: Box<dyn FoldListener>,
    mouse: MouseState,
}

impl FoldablePanel {
    pub fn new(conf: &FoldConfig) -> Self {
        Self {
            folded: true,
            cover_height: 0,
            width: conf.width,
            height: 0,
            layout_requested: false,
            duration: Duration::from_millis(conf.animation_duration),
            curve: conf.animation_curve,
            shadow_color: conf.shadow_color,
            compositor: Compositor::new(),
            run: None,
            listener: Box::new(NoopListener),
            mouse: MouseState::default(),
        }
    }

    /// Install both faces. Resets the panel to folded, dropping any run in
    /// flight without notifying the listener.
    pub fn setup(&mut self, cover: Box<dyn Content>, detail: Box<dyn Content>, cover_height: i32) {
        if self.run.take().is_some() {
            log::debug!("setup while animating, run dropped");
        }
        self.compositor.cover = ContentView::new(cover, true);
        self.compositor.detail = ContentView::new(detail, false);
        self.compositor.clear_layers();
        self.compositor.rotation = FOLDED_ANGLE;
        self.folded = true;
        self.cover_height = cover_height;
        self.height = cover_height;
        self.request_layout();
    }

    pub fn set_fold_listener(&mut self, listener: Box<dyn FoldListener>) {
        self.listener = listener;
    }

    pub fn set_mouse_debug(&mut self, mouse_debug: bool) {
        self.mouse = MouseState::new(mouse_debug);
    }

    pub fn set_width(&mut self, width: i32) {
        if self.width != width {
            self.width = width;
            self.request_layout();
        }
    }

    pub fn is_folded(&self) -> bool {
        self.folded
    }
    pub fn is_animating(&self) -> bool {
        self.run.is_some()
    }
    pub fn animation(&self) -> Option<&AnimationRun> {
        self.run.as_ref()
    }

    pub fn cover_height(&self) -> i32 {
        self.cover_height
    }
    pub fn height(&self) -> i32 {
        self.height
    }
    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }
    pub fn cover_view(&self) -> &ContentView {
        &self.compositor.cover
    }
    pub fn detail_view(&self) -> &ContentView {
        &self.compositor.detail
    }
    pub fn detail_content_mut(&mut self) -> &mut dyn Content {
        self.compositor.detail.content_mut()
    }

    fn request_layout(&mut self) {
        self.layout_requested = true;
    }

    /// Whether the size changed since the last call.
    pub fn take_layout_request(&mut self) -> bool {
        std::mem::take(&mut self.layout_requested)
    }

    /// Fold without animation. Returns whether it took effect.
    pub fn fold(&mut self) -> bool {
        if self.folded || self.is_animating() {
            log::debug!("ignoring fold: folded={} animating={}", self.folded, self.is_animating());
            return false;
        }
        self.folded = true;
        self.compositor.clear_layers();
        self.compositor.rotation = FOLDED_ANGLE;
        self.compositor.show_cover(true);
        self.height = self.cover_height;
        self.request_layout();
        true
    }

    /// Unfold without animation. Returns whether it took effect.
    pub fn unfold(&mut self) -> bool {
        if !self.folded || self.is_animating() {
            log::debug!("ignoring unfold: folded={} animating={}", self.folded, self.is_animating());
            return false;
        }
        self.compositor.show_cover(false);
        self.compositor.clear_layers();
        self.compositor.rotation = FOLDED_ANGLE;
        self.height = self.cover_height * 2;
        self.request_layout();
        self.folded = false;
        true
    }

    pub fn fold_animated(&mut self) -> bool {
        self.fold_animated_at(Instant::now())
    }
    pub fn fold_animated_at(&mut self, now: Instant) -> bool {
        self.begin(FoldDirection::Fold, now)
    }

    pub fn unfold_animated(&mut self) -> bool {
        self.unfold_animated_at(Instant::now())
    }
    pub fn unfold_animated_at(&mut self, now: Instant) -> bool {
        self.begin(FoldDirection::Unfold, now)
    }

    /// What a tap on the card usually does.
    pub fn toggle_animated(&mut self) -> bool {
        self.toggle_animated_at(Instant::now())
    }
    pub fn toggle_animated_at(&mut self, now: Instant) -> bool {
        self.begin(FoldDirection::from(self.folded), now)
    }

    fn prepare_pieces(&mut self) -> Result<Pieces> {
        let detail = capture(&mut self.compositor.detail, self.width, self.cover_height)?;
        let (top, bottom) = split_halves(&detail)?;
        Ok(Pieces {
            top,
            mirrored_bottom: mirror(&bottom)?,
        })
    }

    fn begin(&mut self, direction: FoldDirection, now: Instant) -> bool {
        if self.is_animating() {
            log::debug!("ignoring {direction:?}: already animating");
            return false;
        }
        if FoldDirection::from(self.folded) != direction {
            log::debug!("ignoring {direction:?}: folded={}", self.folded);
            return false;
        }

        let pieces = match self.prepare_pieces() {
            Ok(p) => p,
            Err(e) => {
                log::error!("failed to prepare {direction:?} images: {e}");
                return false;
            }
        };

        match direction {
            FoldDirection::Fold => self.listener.on_fold_start(),
            FoldDirection::Unfold => self.listener.on_unfold_start(),
        }

        let initial_height = match direction {
            FoldDirection::Fold => self.height,
            FoldDirection::Unfold => self.cover_height,
        };
        self.run = Some(AnimationRun::new(
            direction,
            now,
            self.duration,
            self.curve,
            initial_height,
            pieces.mirrored_bottom.clone(),
        ));

        // frame 0 values, so a paint before the first tick matches it
        let mut shadow = Shadow::acquire(self.shadow_color);
        shadow.set_alpha(match direction {
            FoldDirection::Fold => 0,
            FoldDirection::Unfold => 255,
        });
        match direction {
            FoldDirection::Fold => {
                self.compositor.rotation = UNFOLDED_ANGLE;
                self.compositor.detail.visible = false;
                self.compositor.above.set(pieces.mirrored_bottom, shadow);
                self.compositor.below.set(pieces.top, shadow);
            }
            FoldDirection::Unfold => {
                self.compositor.below.set(pieces.top, shadow);
            }
        }
        log::debug!("{direction:?} started, initial height {initial_height}");
        true
    }

    /// Advance the run in flight to `now`. Returns `Some(Completed)` on the
    /// tick that finishes it, `None` otherwise (including when idle).
    pub fn tick(&mut self, now: Instant) -> Option<RunOutcome> {
        let bounds = (self.cover_height, self.cover_height * 2);
        let run = self.run.as_mut()?;
        let frame = run.refresh(now, bounds);

        if run.take_swap() {
            match run.direction {
                FoldDirection::Fold => {
                    self.compositor.above.clear();
                    self.compositor.cover.visible = true;
                }
                FoldDirection::Unfold => {
                    self.compositor.cover.visible = false;
                    self.compositor
                        .above
                        .set(run.mirrored.clone(), Shadow::acquire(self.shadow_color));
                }
            }
        }

        self.compositor.rotation = frame.rotation;
        self.compositor.below.set_shadow_alpha(frame.shadow_alpha);
        self.compositor.above.set_shadow_alpha(frame.shadow_alpha);
        self.height = frame.height;

        let direction = run.direction;
        let finished = run.is_finished();
        self.request_layout();

        if finished {
            self.complete(direction);
            Some(RunOutcome::Completed)
        } else {
            None
        }
    }

    fn complete(&mut self, direction: FoldDirection) {
        self.run = None;
        self.compositor.clear_layers();
        self.compositor.rotation = FOLDED_ANGLE;
        match direction {
            FoldDirection::Fold => {
                self.compositor.show_cover(true);
                self.height = self.cover_height;
                self.folded = true;
                self.request_layout();
                log::debug!("fold finished");
                self.listener.on_fold_end();
            }
            FoldDirection::Unfold => {
                self.compositor.show_cover(false);
                self.height = self.cover_height * 2;
                self.folded = false;
                self.request_layout();
                log::debug!("unfold finished");
                self.listener.on_unfold_end();
            }
        }
    }

    /// Stop the run in flight. Nothing is restored: layers, rotation and
    /// height stay wherever the last tick left them, and no end callback
    /// fires. A later `fold`/`unfold` puts the card back at rest.
    pub fn cancel(&mut self) -> Option<RunOutcome> {
        let run = self.run.take()?;
        log::debug!("{:?} cancelled at {:.2}", run.direction, run.progress());
        Some(RunOutcome::Cancelled)
    }

    /// Feed pointer input. Everything is swallowed while animating.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Vec<MouseEvent> {
        if self.is_animating() {
            self.mouse.reset_press();
            return vec![];
        }
        self.mouse.feed(event)
    }

    pub fn paint(&self, ctx: &Context) -> Result<()> {
        self.compositor.paint(ctx, self.size(), self.cover_height)
    }
}

impl std::fmt::Debug for FoldablePanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FoldablePanel")
            .field("folded", &self.folded)
            .field("animating", &self.is_animating())
            .field("cover_height", &self.cover_height)
            .field("size", &self.size())
            .field("compositor", &self.compositor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{argb, events, Event, Lazy, Recorder, Striped};
    use util::draw::new_surface_with_context;

    const COVER: i32 = 100;
    const WIDTH: i32 = 40;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn panel() -> FoldablePanel {
        let conf = FoldConfig {
            width: WIDTH,
            ..Default::default()
        };
        let mut p = FoldablePanel::new(&conf);
        p.setup(
            Box::new(Striped::new((WIDTH, COVER))),
            Box::new(Striped::new((WIDTH, COVER * 2))),
            COVER,
        );
        p
    }

    fn recorded(p: &mut FoldablePanel) -> crate::test::EventsRc {
        let (r, events) = Recorder::new();
        p.set_fold_listener(Box::new(r));
        events
    }

    fn assert_at_rest(p: &FoldablePanel) {
        assert!(!p.is_animating());
        assert_ne!(p.cover_view().visible, p.detail_view().visible);
        assert_eq!(p.cover_view().visible, p.is_folded());
        let expected = if p.is_folded() { COVER } else { COVER * 2 };
        assert_eq!(p.height(), expected);
        assert!(p.compositor().above.is_empty());
        assert!(p.compositor().below.is_empty());
    }

    /// Tick every 10ms until the run finishes.
    fn run_to_end(p: &mut FoldablePanel, start: Instant) -> Vec<i32> {
        let mut heights = vec![];
        for i in 1..=100 {
            let outcome = p.tick(start + ms(i * 10));
            heights.push(p.height());
            if outcome == Some(RunOutcome::Completed) {
                return heights;
            }
        }
        panic!("run did not finish");
    }

    #[test]
    fn starts_folded() {
        let p = panel();
        assert!(p.is_folded());
        assert_at_rest(&p);
    }

    #[test]
    fn instant_transitions() {
        let mut p = panel();
        assert!(!p.fold());
        assert_at_rest(&p);

        assert!(p.unfold());
        assert!(!p.is_folded());
        assert_at_rest(&p);
        assert!(p.take_layout_request());
        assert!(!p.take_layout_request());

        assert!(!p.unfold());
        assert!(!p.take_layout_request());

        for _ in 0..3 {
            assert!(p.fold());
            assert_at_rest(&p);
            assert!(p.unfold());
            assert_at_rest(&p);
        }
    }

    #[test]
    fn unfold_scenario() {
        let mut p = panel();
        let log = recorded(&mut p);
        let start = Instant::now();

        assert!(p.unfold_animated_at(start));
        assert_eq!(events(&log), vec![Event::UnfoldStart]);
        assert!(p.is_animating());
        assert!(p.is_folded());
        assert_eq!(p.height(), COVER);

        let heights = run_to_end(&mut p, start);
        assert!(heights.windows(2).all(|w| w[0] <= w[1]));
        assert!(heights.iter().all(|h| (COVER..=COVER * 2).contains(h)));

        assert!(!p.is_folded());
        assert_eq!(p.height(), COVER * 2);
        assert_eq!(events(&log), vec![Event::UnfoldStart, Event::UnfoldEnd]);
        assert_at_rest(&p);
        assert_eq!(p.compositor().rotation, 0.);
    }

    #[test]
    fn fold_heights_shrink() {
        let mut p = panel();
        p.unfold();
        let log = recorded(&mut p);
        let start = Instant::now();

        assert!(p.fold_animated_at(start));
        assert!(!p.detail_view().visible);
        assert_eq!(p.compositor().rotation, UNFOLDED_ANGLE);

        let heights = run_to_end(&mut p, start);
        assert!(heights.windows(2).all(|w| w[0] >= w[1]));
        assert!(heights.iter().all(|h| (COVER..=COVER * 2).contains(h)));
        assert_eq!(events(&log), vec![Event::FoldStart, Event::FoldEnd]);
        assert!(p.is_folded());
        assert_at_rest(&p);
    }

    #[test]
    fn round_trip_restores_rest_state() {
        let mut p = panel();
        let start = Instant::now();
        p.unfold_animated_at(start);
        run_to_end(&mut p, start);
        p.fold_animated_at(start + ms(2000));
        run_to_end(&mut p, start + ms(2000));

        assert!(p.is_folded());
        assert_at_rest(&p);
        assert_eq!(p.height(), COVER);
    }

    #[test]
    fn swap_happens_once_at_half_way() {
        let mut p = panel();
        let start = Instant::now();
        p.unfold_animated_at(start);

        let mut swaps = vec![];
        let mut cover_was_visible = p.cover_view().visible;
        for i in 1..=60u64 {
            let t = i * 10;
            p.tick(start + ms(t));
            if p.is_animating() {
                let visible = p.cover_view().visible;
                if visible != cover_was_visible {
                    swaps.push(t);
                }
                cover_was_visible = visible;
            }
        }
        assert_eq!(swaps, vec![300]);
    }

    #[test]
    fn unfold_swap_puts_mirrored_half_on_flap() {
        let mut p = panel();
        let start = Instant::now();
        p.unfold_animated_at(start);
        assert!(p.compositor().above.image.is_none());
        assert!(p.compositor().below.image.is_some());

        p.tick(start + ms(290));
        assert!(p.compositor().above.image.is_none());
        assert!(p.cover_view().visible);

        p.tick(start + ms(310));
        let above = p.compositor().above.image.as_ref().unwrap();
        assert_eq!(above.size(), (WIDTH, COVER));
        assert_eq!(above.pixel(0, 0), Some(argb(Striped::BOTTOM)));
        assert!(!p.cover_view().visible);
    }

    #[test]
    fn fold_swap_reveals_cover() {
        let mut p = panel();
        p.unfold();
        let start = Instant::now();
        p.fold_animated_at(start);
        assert!(p.compositor().above.image.is_some());
        assert!(!p.cover_view().visible);

        p.tick(start + ms(350));
        assert!(p.compositor().above.image.is_none());
        assert!(p.cover_view().visible);
        assert!(p.compositor().below.image.is_some());
    }

    #[test]
    fn shadows_follow_progress() {
        let mut p = panel();
        let start = Instant::now();
        p.unfold_animated_at(start);
        p.tick(start + ms(300));
        let alpha = |l: &crate::compositor::Layer| l.shadow.map(|s| s.alpha());
        assert_eq!(alpha(&p.compositor().below), Some(127));
        assert_eq!(alpha(&p.compositor().above), Some(127));
    }

    #[test]
    fn shadows_start_at_first_frame_values() {
        let alpha = |p: &FoldablePanel| p.compositor().below.shadow.map(|s| s.alpha());
        let mut p = panel();
        let start = Instant::now();
        p.unfold_animated_at(start);
        assert_eq!(alpha(&p), Some(255));
        p.tick(start);
        assert_eq!(alpha(&p), Some(255));
        run_to_end(&mut p, start);

        p.fold_animated_at(start + ms(1000));
        assert_eq!(alpha(&p), Some(0));
        p.tick(start + ms(1000));
        assert_eq!(alpha(&p), Some(0));
    }

    #[test]
    fn capture_is_fresh_per_run() {
        let mut p = panel();
        let start = Instant::now();
        p.unfold_animated_at(start);
        // 50px bands: row 30 is still the first one
        let below = p.compositor().below.image.as_ref().unwrap();
        assert_eq!(below.pixel(0, 30), Some(argb(Striped::BANDS[0])));
        run_to_end(&mut p, start);

        p.detail_content_mut().measure(WIDTH, COVER);
        let restart = start + ms(1000);
        assert!(p.fold_animated_at(restart));
        let below = p.compositor().below.image.as_ref().unwrap();
        assert_eq!(below.size(), (WIDTH, COVER / 2));
        assert_eq!(below.pixel(0, 30), Some(argb(Striped::BANDS[1])));
    }

    #[test]
    fn width_change_requests_layout_and_resizes_capture() {
        let mut p = panel();
        p.take_layout_request();
        p.set_width(WIDTH);
        assert!(!p.take_layout_request());

        p.set_width(WIDTH * 2);
        assert!(p.take_layout_request());
        assert_eq!(p.size(), (WIDTH * 2, COVER));

        p.setup(
            Box::new(Striped::new((WIDTH * 2, COVER))),
            Box::new(Lazy::default()),
            COVER,
        );
        assert!(p.unfold_animated_at(Instant::now()));
        let below = p.compositor().below.image.as_ref().unwrap();
        assert_eq!(below.size(), (WIDTH * 2, COVER));
    }

    #[test]
    fn busy_panel_ignores_everything() {
        let mut p = panel();
        let log = recorded(&mut p);
        let start = Instant::now();
        p.unfold_animated_at(start);
        p.tick(start + ms(100));
        let height = p.height();

        assert!(!p.unfold_animated_at(start + ms(110)));
        assert!(!p.fold_animated_at(start + ms(110)));
        assert!(!p.toggle_animated_at(start + ms(110)));
        assert!(!p.fold());
        assert!(!p.unfold());

        assert!(p.is_folded());
        assert_eq!(p.height(), height);
        assert_eq!(events(&log), vec![Event::UnfoldStart]);
        assert_eq!(p.animation().map(|r| r.start_time()), Some(start));
    }

    #[test]
    fn animated_transition_checks_fold_state() {
        let mut p = panel();
        assert!(!p.fold_animated());
        assert!(!p.is_animating());

        p.unfold();
        assert!(!p.unfold_animated());
        assert!(!p.is_animating());
    }

    #[test]
    fn cancel_leaves_state_alone() {
        let mut p = panel();
        p.unfold();
        let log = recorded(&mut p);
        let start = Instant::now();
        p.fold_animated_at(start);
        p.tick(start + ms(180));
        let height = p.height();

        assert_eq!(p.cancel(), Some(RunOutcome::Cancelled));
        assert!(!p.is_animating());
        assert_eq!(events(&log), vec![Event::FoldStart]);
        assert!(!p.is_folded());
        assert_eq!(p.height(), height);

        // no more ticks land
        assert_eq!(p.tick(start + ms(600)), None);
        assert_eq!(p.height(), height);
        assert_eq!(p.cancel(), None);

        assert!(p.fold());
        assert_at_rest(&p);
    }

    #[test]
    fn fold_after_cancel_stays_in_bounds() {
        let mut p = panel();
        p.unfold();
        let start = Instant::now();
        p.fold_animated_at(start);
        p.tick(start + ms(300));
        p.cancel();
        assert!(p.height() < COVER * 2);

        let restart = start + ms(1000);
        p.fold_animated_at(restart);
        let heights = run_to_end(&mut p, restart);
        assert!(heights.iter().all(|h| (COVER..=COVER * 2).contains(h)));
        assert_at_rest(&p);
    }

    #[test]
    fn toggle_follows_fold_state() {
        let mut p = panel();
        let log = recorded(&mut p);
        let start = Instant::now();
        assert!(p.toggle_animated_at(start));
        run_to_end(&mut p, start);
        assert!(p.toggle_animated_at(start + ms(1000)));
        run_to_end(&mut p, start + ms(1000));
        assert_eq!(
            events(&log),
            vec![
                Event::UnfoldStart,
                Event::UnfoldEnd,
                Event::FoldStart,
                Event::FoldEnd
            ]
        );
    }

    #[test]
    fn last_listener_wins() {
        let mut p = panel();
        let first = recorded(&mut p);
        let second = recorded(&mut p);
        p.unfold_animated_at(Instant::now());
        assert!(events(&first).is_empty());
        assert_eq!(events(&second), vec![Event::UnfoldStart]);
    }

    #[test]
    fn pointer_input_swallowed_while_animating() {
        let mut p = panel();
        let start = Instant::now();

        assert_eq!(p.handle_pointer(PointerEvent::Press((1., 1.), 1)).len(), 1);
        p.unfold_animated_at(start);
        assert!(p.handle_pointer(PointerEvent::Release((1., 1.), 1)).is_empty());
        assert!(p.handle_pointer(PointerEvent::Press((1., 1.), 1)).is_empty());

        run_to_end(&mut p, start);
        assert_eq!(p.handle_pointer(PointerEvent::Press((1., 1.), 1)).len(), 1);
        let out = p.handle_pointer(PointerEvent::Release((1., 1.), 1));
        assert!(matches!(out.last(), Some(MouseEvent::Click(_, 1))));
    }

    #[test]
    fn unsized_detail_is_measured_for_capture() {
        let conf = FoldConfig {
            width: WIDTH,
            ..Default::default()
        };
        let mut p = FoldablePanel::new(&conf);
        p.setup(
            Box::new(Striped::new((WIDTH, COVER))),
            Box::new(Lazy::default()),
            COVER,
        );
        let start = Instant::now();
        assert!(p.unfold_animated_at(start));
        assert_eq!(p.detail_view().size(), (WIDTH, COVER * 2));
        let below = p.compositor().below.image.as_ref().unwrap();
        assert_eq!(below.size(), (WIDTH, COVER));
        assert_eq!(below.pixel(0, 0), Some(argb(Lazy::COLOR)));
    }

    #[test]
    fn panel_without_faces_still_animates() {
        let mut p = FoldablePanel::new(&FoldConfig::default());
        let start = Instant::now();
        assert!(p.unfold_animated_at(start));
        assert_eq!(p.tick(start + ms(600)), Some(RunOutcome::Completed));
        assert!(!p.is_folded());
    }

    #[test]
    fn setup_resets_to_folded() {
        let mut p = panel();
        p.unfold_animated_at(Instant::now());
        p.setup(
            Box::new(Striped::new((WIDTH, COVER))),
            Box::new(Striped::new((WIDTH, COVER * 2))),
            COVER,
        );
        assert!(p.is_folded());
        assert_at_rest(&p);
    }

    #[test]
    fn paint_at_rest_shows_cover() {
        let p = panel();
        let (surf, ctx) = new_surface_with_context((WIDTH, COVER * 2)).unwrap();
        p.paint(&ctx).unwrap();
        drop(ctx);
        let s = Snapshot::from_surface(surf);
        assert_eq!(s.pixel(0, 0), Some(argb(Striped::TOP)));
        assert_eq!(s.pixel(0, COVER - 1), Some(argb(Striped::BOTTOM)));
        // clipped to the folded height
        assert_eq!(s.pixel(0, COVER + 10), Some(0));
    }
}
