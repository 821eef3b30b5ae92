use std::collections::HashMap;
use std::time::Duration;

use tracing::warn;

use crate::pane::SharedPane;

/// Sentinel animation name that always completes immediately.
pub const NONE: &str = "none";

#[derive(Debug, Clone)]
struct Animation {
    class_name: String,
    duration: Duration,
}

/// Named-animation driver.
///
/// Applies an animation's CSS class to the pane, waits out its duration,
/// and removes the class again. Unknown names degrade to immediate
/// completion instead of hanging a transition on a mistyped or removed
/// stylesheet entry.
#[derive(Debug, Clone)]
pub struct Animator {
    animations: HashMap<String, Animation>,
}

impl Animator {
    /// The stock transition set: `pop-in` and `pop-out`, 150 ms each.
    pub fn standard() -> Self {
        Self::new()
            .with_animation("pop-in", "anim-pop-in", Duration::from_millis(150))
            .with_animation("pop-out", "anim-pop-out", Duration::from_millis(150))
    }

    pub fn new() -> Self {
        Self {
            animations: HashMap::new(),
        }
    }

    pub fn with_animation(
        mut self,
        name: impl Into<String>,
        class_name: impl Into<String>,
        duration: Duration,
    ) -> Self {
        self.animations.insert(
            name.into(),
            Animation {
                class_name: class_name.into(),
                duration,
            },
        );
        self
    }

    /// Runs one named animation to completion on the pane.
    pub async fn animate(&self, name: &str, pane: &SharedPane) {
        if name == NONE {
            return;
        }

        let Some(animation) = self.animations.get(name) else {
            warn!(name, "invalid animation");
            return;
        };

        pane.add_class(&animation.class_name);
        tokio::time::sleep(animation.duration).await;
        pane.remove_class(&animation.class_name);
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::standard()
    }
}
