use std::future::Future;

use crate::animator::Animator;
use crate::error::Result;
use crate::pane::SharedPane;

/// Placeholder shown while a view builds.
const BUSY_PLACEHOLDER: &str = "<span class=\"spinner\"></span>";

/// Outcome of a content build handed to the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Swap {
    /// Replace the pane content with this HTML.
    Apply(String),
    /// The build was superseded; leave the pane alone.
    Discard,
}

/// Sequences a pane transition: animate out, build behind a busy
/// placeholder, swap, animate in. The three phases run strictly in order;
/// missing animations degrade to immediate completion.
pub struct Presenter {
    pane: SharedPane,
    animator: Animator,
}

impl Presenter {
    pub fn new(pane: SharedPane, animator: Animator) -> Self {
        Self { pane, animator }
    }

    pub fn pane(&self) -> &SharedPane {
        &self.pane
    }

    /// Presents the result of `build` on the pane.
    ///
    /// The out-animation is skipped when the pane has no content yet, to
    /// avoid animating an empty placeholder. A build error clears the busy
    /// placeholder and propagates; the caller decides how to surface it.
    pub async fn present<Fut>(&self, build: Fut, anim_out: &str, anim_in: &str) -> Result<Swap>
    where
        Fut: Future<Output = Result<Swap>>,
    {
        if !self.pane.is_empty() {
            self.animator.animate(anim_out, &self.pane).await;
        }

        self.pane.set_content(BUSY_PLACEHOLDER);
        self.pane.set_busy(true);

        let outcome = build.await;
        self.pane.set_busy(false);

        match outcome {
            Ok(Swap::Apply(content)) => {
                self.pane.set_content(content);
                self.animator.animate(anim_in, &self.pane).await;
                Ok(Swap::Apply(self.pane.content()))
            }
            Ok(Swap::Discard) => Ok(Swap::Discard),
            Err(err) => {
                self.pane.set_content("");
                Err(err)
            }
        }
    }
}
