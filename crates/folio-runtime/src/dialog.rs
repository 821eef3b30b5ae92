use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use folio_markup::escape;
use folio_types::{ActionHint, DialogAction, DialogRequest};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::session::SessionStore;

/// What a presented dialog looks like, for rendering and for tests.
#[derive(Debug, Clone)]
pub struct DialogView {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
    /// Expander state, defaulted from the session preference.
    pub details_open: bool,
    pub actions: Vec<DialogActionView>,
    pub body_html: String,
}

#[derive(Debug, Clone)]
pub struct DialogActionView {
    pub text: String,
    pub hint: Option<ActionHint>,
    pub no_dispose: bool,
}

struct ActiveDialog {
    view: DialogView,
    chooser: mpsc::UnboundedSender<usize>,
}

#[derive(Default)]
struct SlotState {
    locked: bool,
    waiters: VecDeque<oneshot::Sender<()>>,
    active: Option<ActiveDialog>,
}

/// The single shared modal slot.
///
/// Presentation requests queue in submission order; exactly one dialog is
/// visible at a time. `show` resolves with the text of the selected
/// disposing action; an action marked `no_dispose` keeps the dialog open
/// and accepting further selections.
pub struct DialogQueue {
    session: Arc<dyn SessionStore>,
    slot: Mutex<SlotState>,
}

impl DialogQueue {
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self {
            session,
            slot: Mutex::new(SlotState::default()),
        }
    }

    /// Presents a dialog once the slot is free and waits for a disposing
    /// selection, returning its text.
    ///
    /// Selecting a `no_dispose` action runs its callback and leaves the
    /// dialog open and interactive. Action callbacks run before
    /// resolution; a callback error is logged and never prevents the
    /// selected text from being returned.
    pub async fn show(&self, request: DialogRequest) -> String {
        self.acquire().await;

        let mut actions: Vec<DialogAction> = request
            .actions
            .iter()
            .filter(|action| {
                if action.text.is_empty() {
                    debug!("skipping dialog action with no text");
                    return false;
                }
                true
            })
            .cloned()
            .collect();
        if actions.is_empty() {
            actions.push(DialogAction::new("OK"));
        }

        let (tx, mut rx) = mpsc::unbounded_channel();
        let view = self.compose_view(&request, &actions);
        {
            let mut slot = self.slot.lock().expect("dialog slot poisoned");
            slot.active = Some(ActiveDialog { view, chooser: tx });
        }

        // A no_dispose selection keeps the dialog open and interactive, so
        // keep receiving until a disposing action (or an external dismissal)
        // closes it.
        let text = loop {
            let Some(index) = rx.recv().await else {
                // Closed channel means an external dismissal already
                // released the slot.
                return String::new();
            };

            let action = &actions[index.min(actions.len() - 1)];
            if let Some(callback) = &action.callback
                && let Err(err) = callback()
            {
                warn!(action = %action.text, %err, "dialog action callback failed");
            }

            if !action.no_dispose {
                break action.text.clone();
            }
        };

        self.dispose();
        text
    }

    /// The dialog currently occupying the slot, if any.
    pub fn visible(&self) -> Option<DialogView> {
        let slot = self.slot.lock().expect("dialog slot poisoned");
        slot.active.as_ref().map(|active| active.view.clone())
    }

    /// Selects an action on the visible dialog by its text.
    pub fn select(&self, text: &str) -> bool {
        let slot = self.slot.lock().expect("dialog slot poisoned");
        let Some(active) = &slot.active else {
            return false;
        };
        let Some(index) = active.view.actions.iter().position(|a| a.text == text) else {
            return false;
        };
        active.chooser.send(index).is_ok()
    }

    /// Dismisses the visible dialog without selecting an action, freeing
    /// the slot for the next queued request.
    pub fn dismiss(&self) {
        self.dispose();
    }

    /// Toggles the details expander, persisting the preference.
    pub fn set_details_open(&self, open: bool) {
        let mut state = self.session.get();
        state.show_error_details = open;
        if let Err(err) = self.session.set(state) {
            warn!(%err, "could not persist dialog details preference");
        }

        let mut slot = self.slot.lock().expect("dialog slot poisoned");
        if let Some(active) = &mut slot.active {
            active.view.details_open = open;
        }
    }

    async fn acquire(&self) {
        let rx = {
            let mut slot = self.slot.lock().expect("dialog slot poisoned");
            let (tx, rx) = oneshot::channel();
            slot.waiters.push_back(tx);
            if !slot.locked {
                Self::dispatch_next(&mut slot);
            }
            rx
        };

        // The sender is only dropped if the queue itself goes away.
        let _ = rx.await;
    }

    fn dispose(&self) {
        let mut slot = self.slot.lock().expect("dialog slot poisoned");
        slot.active = None;
        Self::dispatch_next(&mut slot);
    }

    fn dispatch_next(slot: &mut SlotState) {
        match slot.waiters.pop_front() {
            Some(next) => {
                slot.locked = true;
                let _ = next.send(());
            }
            None => {
                slot.locked = false;
            }
        }
    }

    fn compose_view(&self, request: &DialogRequest, actions: &[DialogAction]) -> DialogView {
        let title = request.title.clone().unwrap_or_else(|| "Information".to_string());
        let message = request.message.clone().unwrap_or_default();
        let details_open = self.session.get().show_error_details;

        let action_views: Vec<DialogActionView> = actions
            .iter()
            .map(|action| DialogActionView {
                text: action.text.clone(),
                hint: action.hint,
                no_dispose: action.no_dispose,
            })
            .collect();

        let mut body = String::new();
        body.push_str("<div class=\"dialog\" role=\"dialog\">");
        body.push_str(&format!("<h2>{}</h2>", escape(&title)));
        body.push_str(&format!("<p>{}</p>", escape(&message)));

        if let Some(details) = &request.details {
            body.push_str(if details_open { "<details open>" } else { "<details>" });
            body.push_str("<summary>Details</summary>");
            body.push_str(&format!("<div class=\"reason\">{}</div>", escape(details)));
            body.push_str("</details>");
        }

        body.push_str("<div class=\"actions\">");
        for action in &action_views {
            match action.hint {
                Some(hint) => body.push_str(&format!(
                    "<button class=\"{}\">{}</button>",
                    hint.css_class(),
                    escape(&action.text)
                )),
                None => body.push_str(&format!("<button>{}</button>", escape(&action.text))),
            }
        }
        body.push_str("</div></div>");

        DialogView {
            title,
            message,
            details: request.details.clone(),
            details_open,
            actions: action_views,
            body_html: body,
        }
    }
}
