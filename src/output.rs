use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::OutputFormat;
use crate::form::FormState;
use crate::list::{ListController, ListState, EMPTY_LIST};
use crate::types::Employee;

static OUTPUT_JSON: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_format(format: OutputFormat) {
    OUTPUT_JSON.store(matches!(format, OutputFormat::Json), Ordering::Relaxed);
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_json_output() -> bool {
    OUTPUT_JSON.load(Ordering::Relaxed)
}

fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

#[derive(Tabled)]
struct EmployeeRow {
    #[tabled(rename = "Id")]
    id: i64,
    #[tabled(rename = "First Name")]
    first_name: String,
    #[tabled(rename = "Last Name")]
    last_name: String,
    #[tabled(rename = "E-mail")]
    email: String,
    #[tabled(rename = "Edit")]
    edit: String,
    #[tabled(rename = "Delete")]
    delete: String,
}

impl EmployeeRow {
    fn new(employee: &Employee, list: &ListController) -> Self {
        let delete = if list.is_delete_disabled(employee.id) {
            "(deleting)".to_string()
        } else {
            format!("ems delete {}", employee.id)
        };
        Self {
            id: employee.id,
            first_name: truncate(&employee.first_name, 30),
            last_name: truncate(&employee.last_name, 30),
            email: truncate(&employee.email, 40),
            edit: format!("ems open {}", list.edit_route(employee.id)),
            delete,
        }
    }
}

/// Render the list view: the explicit empty state, or one row per employee.
pub fn render_list(list: &ListController) -> String {
    match list.state() {
        ListState::Loading => "Loading...".bright_black().to_string(),
        ListState::LoadFailed(error) => error.red().bold().to_string(),
        ListState::Loaded(_) if list.is_empty() => format!(
            "{}\nAdd one with: ems open {}",
            EMPTY_LIST.bright_black(),
            list.add_route()
        ),
        ListState::Loaded(employees) => {
            let rows: Vec<EmployeeRow> = employees
                .iter()
                .map(|employee| EmployeeRow::new(employee, list))
                .collect();
            Table::new(rows).with(Style::rounded()).to_string()
        }
    }
}

pub fn print_list(list: &ListController) {
    if is_json_output() {
        print_json(list.rows());
    } else {
        println!("{}", render_list(list));
    }
}

/// Progress line for the row whose delete is in flight.
pub fn render_deleting(list: &ListController) -> Option<String> {
    list.rows()
        .iter()
        .find(|employee| list.is_delete_disabled(employee.id))
        .map(|employee| {
            format!(
                "Deleting employee {} ({})...",
                employee.id,
                employee.full_name()
            )
            .bright_black()
            .to_string()
        })
}

pub fn print_deleting(list: &ListController) {
    if is_quiet() || is_json_output() {
        return;
    }
    if let Some(line) = render_deleting(list) {
        println!("{line}");
    }
}

/// Result of a delete as one JSON document: the id and the refreshed rows.
pub fn deleted_json(id: i64, list: &ListController) -> serde_json::Value {
    serde_json::json!({
        "deleted": id,
        "employees": list.rows(),
    })
}

/// Report a finished delete. JSON mode prints a single document.
pub fn print_deleted(id: i64, list: &ListController) {
    if is_json_output() {
        print_json(&deleted_json(id, list));
    } else {
        print_message(&format!("Deleted employee {id}"));
        println!("{}", render_list(list));
    }
}

pub fn print_employee(employee: &Employee) {
    if is_json_output() {
        print_json(employee);
        return;
    }

    println!("{} - {}", employee.id, employee.full_name().bold());
    println!();
    println!("First Name: {}", employee.first_name);
    println!("Last Name:  {}", employee.last_name);
    println!("Email:      {}", employee.email);
}

/// Field errors under their labels, then the form-level banner.
pub fn render_form_errors(state: &FormState) -> String {
    let mut lines: Vec<String> = state
        .errors
        .iter()
        .map(|(field, message)| format!("  {}: {}", field.label(), message.red()))
        .collect();

    if let Some(banner) = &state.form_error {
        lines.push(banner.red().bold().to_string());
    }

    lines.join("\n")
}

pub fn print_form_errors(state: &FormState) {
    let rendered = render_form_errors(state);
    if !rendered.is_empty() {
        eprintln!("{rendered}");
    }
}

/// Print a message (skipped when quiet, wrapped in an object in JSON mode)
pub fn print_message(message: &str) {
    if is_quiet() {
        return;
    }
    if is_json_output() {
        print_json(&serde_json::json!({ "message": message }));
    } else {
        println!("{message}");
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Truncate a string with ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
