#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// A create/edit dialog. The form only exists while the dialog is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal<T> {
    Closed,
    Open { mode: FormMode, form: T },
}

impl<T> Default for Modal<T> {
    fn default() -> Self {
        Modal::Closed
    }
}

impl<T> Modal<T> {
    pub fn open_create(&mut self, form: T) {
        *self = Modal::Open {
            mode: FormMode::Create,
            form,
        };
    }

    pub fn open_edit(&mut self, id: impl Into<String>, form: T) {
        *self = Modal::Open {
            mode: FormMode::Edit { id: id.into() },
            form,
        };
    }

    pub fn close(&mut self) {
        *self = Modal::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Modal::Open { .. })
    }

    pub fn mode(&self) -> Option<&FormMode> {
        match self {
            Modal::Open { mode, .. } => Some(mode),
            Modal::Closed => None,
        }
    }

    pub fn form(&self) -> Option<&T> {
        match self {
            Modal::Open { form, .. } => Some(form),
            Modal::Closed => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut T> {
        match self {
            Modal::Open { form, .. } => Some(form),
            Modal::Closed => None,
        }
    }

    /// Dialog heading for the current mode.
    pub fn title(&self, noun: &str) -> Option<String> {
        self.mode().map(|mode| match mode {
            FormMode::Create => format!("Add New {}", noun),
            FormMode::Edit { .. } => format!("Edit {}", noun),
        })
    }

    pub fn submit_label(&self) -> Option<&'static str> {
        self.mode().map(|mode| match mode {
            FormMode::Create => "Create",
            FormMode::Edit { .. } => "Update",
        })
    }
}
