//! Page state machine. Every successful mutation invalidates the list and reloads it from the API;
//! the view never shows data the API has not returned.

use serde::Serialize;
use student_records::Student;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    /// A create, update or delete is in flight; further submits are ignored.
    Submitting,
    /// The list could not be fetched. Terminal: no retry.
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(i32),
}

/// Form inputs as the user typed them. `age` stays text until submit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub age: String,
}

impl FormFields {
    fn from_student(student: &Student) -> Self {
        FormFields {
            name: student.name.clone(),
            email: student.email.clone(),
            age: student.age.to_string(),
        }
    }

    /// Age text that is not a number is sent as `null` and left for the API to reject.
    pub fn payload(&self) -> StudentPayload {
        StudentPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            age: self.age.trim().parse().ok(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Form {
    pub mode: FormMode,
    pub fields: FormFields,
}

/// JSON body sent on create and update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StudentPayload {
    pub name: String,
    pub email: String,
    pub age: Option<i64>,
}

/// API call requested by a transition, executed by the driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Fetch,
    Create(StudentPayload),
    Update(i32, StudentPayload),
    Delete(i32),
}

#[derive(Clone, Debug)]
pub struct StudentsView {
    phase: Phase,
    students: Vec<Student>,
    form: Option<Form>,
    pending_delete: Option<i32>,
    error: Option<String>,
}

impl Default for StudentsView {
    fn default() -> Self {
        Self::new()
    }
}

impl StudentsView {
    pub fn new() -> Self {
        StudentsView {
            phase: Phase::Idle,
            students: Vec::new(),
            form: None,
            pending_delete: None,
            error: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn form(&self) -> Option<&Form> {
        self.form.as_ref()
    }

    pub fn pending_delete(&self) -> Option<i32> {
        self.pending_delete
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True once a mutation has gone through and the list has been reloaded.
    pub fn is_settled(&self) -> bool {
        self.phase == Phase::Loaded && self.form.is_none() && self.pending_delete.is_none() && self.error.is_none()
    }

    /// Initial display. Only valid from `Idle`.
    pub fn start(&mut self) -> Option<Effect> {
        if self.phase != Phase::Idle {
            return None;
        }
        self.reload()
    }

    fn reload(&mut self) -> Option<Effect> {
        self.phase = Phase::Loading;
        self.error = None;
        Some(Effect::Fetch)
    }

    pub fn fetch_resolved(&mut self, result: Result<Vec<Student>, String>) -> Option<Effect> {
        if self.phase != Phase::Loading {
            return None;
        }
        match result {
            Ok(students) => {
                self.students = students;
                self.phase = Phase::Loaded;
            }
            Err(message) => {
                self.error = Some(message);
                self.phase = Phase::Error;
            }
        }
        None
    }

    pub fn open_add(&mut self) {
        if self.phase != Phase::Loaded {
            return;
        }
        self.pending_delete = None;
        self.form = Some(Form {
            mode: FormMode::Add,
            fields: FormFields::default(),
        });
    }

    /// Pre-populate from the loaded record. Unknown ids leave the view unchanged.
    pub fn open_edit(&mut self, id: i32) {
        if self.phase != Phase::Loaded {
            return;
        }
        if let Some(student) = self.students.iter().find(|s| s.id == id) {
            self.pending_delete = None;
            self.form = Some(Form {
                mode: FormMode::Edit(id),
                fields: FormFields::from_student(student),
            });
        }
    }

    /// Reopen a form with input posted back by the browser. The API decides whether `Edit(id)` exists.
    pub fn restore_form(&mut self, mode: FormMode, fields: FormFields) {
        if self.phase != Phase::Loaded {
            return;
        }
        self.pending_delete = None;
        self.form = Some(Form { mode, fields });
    }

    pub fn submit(&mut self) -> Option<Effect> {
        if self.phase != Phase::Loaded {
            return None;
        }
        let form = self.form.as_ref()?;
        let payload = form.fields.payload();
        let effect = match form.mode {
            FormMode::Add => Effect::Create(payload),
            FormMode::Edit(id) => Effect::Update(id, payload),
        };
        self.phase = Phase::Submitting;
        self.error = None;
        Some(effect)
    }

    pub fn submit_resolved(&mut self, result: Result<(), String>) -> Option<Effect> {
        if self.phase != Phase::Submitting {
            return None;
        }
        match result {
            Ok(()) => {
                self.form = None;
                self.reload()
            }
            Err(message) => {
                self.phase = Phase::Loaded;
                self.error = Some(message);
                None
            }
        }
    }

    /// Ask for confirmation before deleting `id`.
    pub fn request_delete(&mut self, id: i32) {
        if self.phase != Phase::Loaded {
            return;
        }
        self.form = None;
        self.pending_delete = Some(id);
    }

    pub fn confirm_delete(&mut self) -> Option<Effect> {
        if self.phase != Phase::Loaded {
            return None;
        }
        let id = self.pending_delete.take()?;
        self.phase = Phase::Submitting;
        self.error = None;
        Some(Effect::Delete(id))
    }

    pub fn delete_resolved(&mut self, result: Result<(), String>) -> Option<Effect> {
        if self.phase != Phase::Submitting {
            return None;
        }
        match result {
            Ok(()) => self.reload(),
            Err(message) => {
                self.phase = Phase::Loaded;
                self.error = Some(message);
                None
            }
        }
    }
}
