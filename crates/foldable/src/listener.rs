/// Fold lifecycle notifications, called synchronously from the panel.
///
/// Every method defaults to doing nothing; implement only the ones you need.
/// `*_end` only fires when a run completes, never on cancel.
pub trait FoldListener {
    fn on_fold_start(&mut self) {}
    fn on_fold_end(&mut self) {}
    fn on_unfold_start(&mut self) {}
    fn on_unfold_end(&mut self) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;
impl FoldListener for NoopListener {}
