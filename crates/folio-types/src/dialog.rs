use std::fmt;
use std::sync::Arc;

/// Outcome callback attached to a dialog action.
///
/// Errors returned here are logged by the dialog queue and never prevent
/// the dialog from resolving.
pub type ActionCallback =
    Arc<dyn Fn() -> Result<(), Box<dyn std::error::Error + Send + Sync>> + Send + Sync>;

/// Styling hint for a dialog action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionHint {
    /// The action the user most likely wants.
    Suggested,
    /// The action has irreversible consequences.
    Destructive,
}

impl ActionHint {
    pub fn css_class(&self) -> &'static str {
        match self {
            ActionHint::Suggested => "suggested",
            ActionHint::Destructive => "destructive",
        }
    }
}

/// One selectable action on a dialog.
#[derive(Clone)]
pub struct DialogAction {
    pub text: String,
    pub hint: Option<ActionHint>,
    /// Keep the modal slot occupied after this action is selected.
    pub no_dispose: bool,
    pub callback: Option<ActionCallback>,
}

impl DialogAction {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            hint: None,
            no_dispose: false,
            callback: None,
        }
    }

    pub fn suggested(mut self) -> Self {
        self.hint = Some(ActionHint::Suggested);
        self
    }

    pub fn destructive(mut self) -> Self {
        self.hint = Some(ActionHint::Destructive);
        self
    }

    pub fn keep_open(mut self) -> Self {
        self.no_dispose = true;
        self
    }

    pub fn on_select<F>(mut self, callback: F) -> Self
    where
        F: Fn() -> Result<(), Box<dyn std::error::Error + Send + Sync>> + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }
}

impl fmt::Debug for DialogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogAction")
            .field("text", &self.text)
            .field("hint", &self.hint)
            .field("no_dispose", &self.no_dispose)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// A request to present one modal dialog.
///
/// Exactly one request is visible at a time; others queue in submission
/// order behind the modal slot.
#[derive(Debug, Clone, Default)]
pub struct DialogRequest {
    pub title: Option<String>,
    pub message: Option<String>,
    /// Technical details shown in a collapsible expander.
    pub details: Option<String>,
    /// Selectable actions. An empty list falls back to a single "OK".
    pub actions: Vec<DialogAction>,
}

impl DialogRequest {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            message: Some(message.into()),
            details: None,
            actions: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_action(mut self, action: DialogAction) -> Self {
        self.actions.push(action);
        self
    }
}
