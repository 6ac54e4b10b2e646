use std::{
    fs::{self, File},
    path::PathBuf,
    time::Instant,
};

use config::FoldConfig;
use foldable::{
    frame::{frame_gap, FrameManager},
    input::{MouseEvent, PointerEvent},
    FoldError, FoldListener, FoldablePanel, RunOutcome,
};
use thiserror::Error;
use util::draw::new_surface_with_context;

use crate::args::Direction;
use crate::faces::{CoverFace, DetailFace};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{0}")]
    Fold(#[from] FoldError),
    #[error("cairo: {0}")]
    Cairo(#[from] cairo::Error),
    #[error("png: {0}")]
    Png(#[from] cairo::IoError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("{0:?} does not apply to the card in its current state")]
    Rejected(Direction),
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub direction: Direction,
    pub out: PathBuf,
    pub realtime: bool,
    pub mouse_debug: bool,
}

/// Stands in for the list that would normally own the card.
struct LogListener;
impl FoldListener for LogListener {
    fn on_fold_start(&mut self) {
        log::info!("fold start");
    }
    fn on_fold_end(&mut self) {
        log::info!("fold end");
    }
    fn on_unfold_start(&mut self) {
        log::info!("unfold start");
    }
    fn on_unfold_end(&mut self) {
        log::info!("unfold end");
    }
}

pub fn build_panel(conf: &FoldConfig) -> FoldablePanel {
    let mut panel = FoldablePanel::new(conf);
    panel.setup(
        Box::new(CoverFace::new(conf.width, conf.cover_height)),
        Box::new(DetailFace::new(conf.width, conf.cover_height)),
        conf.cover_height,
    );
    panel.set_fold_listener(Box::new(LogListener));
    panel
}

/// Tap the middle of the card, toggling it on click the way a list would.
fn tap(panel: &mut FoldablePanel, now: Instant) -> bool {
    let (w, h) = panel.size();
    let pos = (w as f64 / 2., h as f64 / 2.);
    let mut events = panel.handle_pointer(PointerEvent::Press(pos, 1));
    events.extend(panel.handle_pointer(PointerEvent::Release(pos, 1)));
    let clicked = events.iter().any(|e| matches!(e, MouseEvent::Click(..)));
    clicked && panel.toggle_animated_at(now)
}

fn start(panel: &mut FoldablePanel, direction: Direction, now: Instant) -> Result<(), RenderError> {
    let accepted = match direction {
        Direction::Fold => {
            panel.unfold();
            panel.fold_animated_at(now)
        }
        Direction::Unfold => panel.unfold_animated_at(now),
        Direction::Toggle => tap(panel, now),
    };
    if accepted {
        Ok(())
    } else {
        Err(RenderError::Rejected(direction))
    }
}

fn write_frame(panel: &FoldablePanel, canvas: (i32, i32), path: PathBuf) -> Result<(), RenderError> {
    let (surf, ctx) = new_surface_with_context(canvas)?;
    panel.paint(&ctx)?;
    drop(ctx);
    let mut f = File::create(&path)?;
    surf.write_to_png(&mut f)?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

/// Run one animation to completion, one PNG per tick. Returns the number of
/// frames written.
pub fn run(conf: &FoldConfig, opts: &RenderOptions) -> Result<usize, RenderError> {
    conf.validate().map_err(RenderError::Config)?;
    fs::create_dir_all(&opts.out)?;

    let mut panel = build_panel(conf);
    panel.set_mouse_debug(opts.mouse_debug);
    let canvas = (conf.width, conf.cover_height * 2);

    let mut frame_manager = FrameManager::new(conf.frame_rate);
    if opts.realtime {
        frame_manager.start()?;
    }

    let t0 = Instant::now();
    start(&mut panel, opts.direction, t0)?;

    let gap = frame_gap(conf.frame_rate);
    let mut frames = 0usize;
    loop {
        let now = if opts.realtime {
            frame_manager.wait_frame().unwrap_or_else(Instant::now)
        } else {
            t0 + gap * (frames as u32 + 1)
        };
        let outcome = panel.tick(now);
        write_frame(&panel, canvas, opts.out.join(format!("frame-{frames:04}.png")))?;
        frames += 1;

        if outcome == Some(RunOutcome::Completed) || !panel.is_animating() {
            break;
        }
    }
    frame_manager.stop();

    Ok(frames)
}
