//! HTML for the students page, rendered from a `StudentsView`.

use crate::view::{Form, FormMode, Phase, StudentsView};
use student_records::Student;

pub const TITLE: &str = "Student Info CRUD";
pub const EMPTY_PLACEHOLDER: &str = "No students found.";
pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this student?";

const STYLE: &str = "body{font-family:sans-serif;background:#f9fafb;margin:0;padding:1rem}\
main{max-width:42rem;margin:0 auto;background:#fff;border-radius:.25rem;box-shadow:0 1px 3px #0002;padding:1.5rem}\
table{width:100%;border-collapse:collapse;margin-top:.5rem}th,td{border:1px solid #ddd;padding:.5rem}\
th{background:#f3f4f6}.error{color:#dc2626;margin-bottom:.5rem}\
.button{display:inline-block;padding:.5rem 1rem;background:#2563eb;color:#fff;border-radius:.25rem;text-decoration:none;border:0}\
.danger{background:#ef4444}.modal{position:fixed;inset:0;display:flex;align-items:center;justify-content:center;background:#0004}\
.dialog{background:#fff;border-radius:.25rem;padding:1.5rem;width:100%;max-width:28rem;position:relative}\
.close{position:absolute;top:.5rem;right:.75rem;text-decoration:none;color:#6b7280}\
label{display:block;margin:.75rem 0 .25rem}input{width:100%;box-sizing:border-box;padding:.5rem}\
button:disabled{opacity:.5}";

/// Escape text for element content and double-quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_page(view: &StudentsView) -> String {
    let mut html = String::new();
    html.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n<main>\n", TITLE, STYLE));
    html.push_str(&format!("<h1>{}</h1>\n", TITLE));
    html.push_str("<a class=\"button\" href=\"/?form=add\">+ Add Student</a>\n");

    if let Some(message) = view.error() {
        html.push_str(&format!("<div class=\"error\" role=\"alert\">{}</div>\n", escape(message)));
    }

    match view.phase() {
        Phase::Idle | Phase::Loading => html.push_str("<div>Loading...</div>\n"),
        Phase::Error => {}
        Phase::Loaded | Phase::Submitting => html.push_str(&render_table(view.students())),
    }
    html.push_str("</main>\n");

    if let Some(id) = view.pending_delete() {
        html.push_str(&render_confirm(id, view.students().iter().find(|s| s.id == id)));
    }
    if let Some(form) = view.form() {
        html.push_str(&render_form(form, view.phase() == Phase::Submitting));
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn render_table(students: &[Student]) -> String {
    let mut html = String::from(
        "<table>\n<thead><tr><th>ID</th><th>Name</th><th>Email</th><th>Age</th><th>Actions</th></tr></thead>\n<tbody>\n",
    );
    if students.is_empty() {
        html.push_str(&format!("<tr><td colspan=\"5\">{}</td></tr>\n", EMPTY_PLACEHOLDER));
    }
    for s in students {
        html.push_str(&format!(
            "<tr><td>{id}</td><td>{name}</td><td>{email}</td><td>{age}</td>\
             <td><a href=\"/?edit={id}\">Edit</a> <a class=\"danger\" href=\"/?confirm={id}\">Delete</a></td></tr>\n",
            id = s.id,
            name = escape(&s.name),
            email = escape(&s.email),
            age = s.age,
        ));
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

fn render_confirm(id: i32, student: Option<&Student>) -> String {
    let who = student
        .map(|s| format!("<p>{} ({})</p>", escape(&s.name), escape(&s.email)))
        .unwrap_or_default();
    format!(
        "<div class=\"modal\"><div class=\"dialog\" role=\"alertdialog\">\
         <p>{}</p>{}\
         <form method=\"post\" action=\"/delete/{}\"><button class=\"button danger\" type=\"submit\">Delete</button> \
         <a href=\"/\">Cancel</a></form></div></div>\n",
        CONFIRM_DELETE, who, id
    )
}

fn render_form(form: &Form, submitting: bool) -> String {
    let (heading, action_label, hidden_id) = match form.mode {
        FormMode::Add => ("Add Student", "Create", String::new()),
        FormMode::Edit(id) => (
            "Edit Student",
            "Update",
            format!("<input type=\"hidden\" name=\"id\" value=\"{}\">", id),
        ),
    };
    let label = if submitting { "Saving..." } else { action_label };
    let disabled = if submitting { " disabled" } else { "" };
    format!(
        "<div class=\"modal\"><div class=\"dialog\">\
         <a class=\"close\" href=\"/\" aria-label=\"Close\">&times;</a>\
         <h2>{heading}</h2>\
         <form method=\"post\" action=\"/save\">{hidden_id}\
         <label for=\"name\">Name</label><input id=\"name\" type=\"text\" name=\"name\" value=\"{name}\" required>\
         <label for=\"email\">Email</label><input id=\"email\" type=\"email\" name=\"email\" value=\"{email}\" required>\
         <label for=\"age\">Age</label><input id=\"age\" type=\"number\" name=\"age\" value=\"{age}\" min=\"1\" required>\
         <p><button class=\"button\" type=\"submit\"{disabled}>{label}</button></p>\
         </form></div></div>\n",
        name = escape(&form.fields.name),
        email = escape(&form.fields.email),
        age = escape(&form.fields.age),
    )
}
