use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

impl Visibility {
    pub fn flipped(self) -> Self {
        match self {
            Visibility::Hidden => Visibility::Visible,
            Visibility::Visible => Visibility::Hidden,
        }
    }

    pub fn is_visible(self) -> bool {
        self == Visibility::Visible
    }
}

/// Presentation changes the UI applies after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormTransition {
    pub visibility: Visibility,
    pub show_form: bool,
    pub show_trigger: bool,
    pub focus_input: bool,
}

/// Two-state toggle for the "add task" form. Not persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormController {
    visibility: Visibility,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn toggle(&mut self) -> FormTransition {
        self.visibility = self.visibility.flipped();
        debug!(visibility = ?self.visibility, "toggled add form");
        let visible = self.visibility.is_visible();
        FormTransition {
            visibility: self.visibility,
            show_form: visible,
            show_trigger: !visible,
            focus_input: visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden() {
        assert_eq!(FormController::new().visibility(), Visibility::Hidden);
    }

    #[test]
    fn toggle_alternates_and_focuses_only_when_opening() {
        let mut form = FormController::new();

        let open = form.toggle();
        assert_eq!(
            open,
            FormTransition {
                visibility: Visibility::Visible,
                show_form: true,
                show_trigger: false,
                focus_input: true,
            }
        );

        let close = form.toggle();
        assert_eq!(close.visibility, Visibility::Hidden);
        assert!(!close.show_form);
        assert!(close.show_trigger);
        assert!(!close.focus_input);
    }
}
