use colored::Colorize;

use crate::cli::{EmployeeFieldArgs, UpdateArgs};
use crate::client::{EmployeeClient, EmployeeDirectory};
use crate::commands::{confirm, prompt};
use crate::error::{EmsError, Result};
use crate::form::{FormController, FormMode, SubmitOutcome, FETCH_FAILED};
use crate::list::{DeleteOutcome, ListController};
use crate::output;
use crate::types::{Field, Route};

pub async fn list(client: &EmployeeClient) -> Result<()> {
    let list = ListController::mount(client).await;
    if let Some(error) = list.error() {
        return Err(EmsError::Banner(error.to_string()));
    }

    output::print_list(&list);
    Ok(())
}

pub async fn show(client: &EmployeeClient, id: i64) -> Result<()> {
    match client.get(id).await {
        Ok(employee) => {
            output::print_employee(&employee);
            Ok(())
        }
        Err(e) => {
            tracing::warn!(id, error = %e, "failed to fetch employee");
            Err(EmsError::Banner(FETCH_FAILED.to_string()))
        }
    }
}

pub async fn add(client: &EmployeeClient, args: EmployeeFieldArgs) -> Result<()> {
    let mut form = FormController::create();
    apply_args(&mut form, args);
    submit(client, &mut form).await
}

pub async fn update(client: &EmployeeClient, args: UpdateArgs) -> Result<()> {
    let mut form = load_form(client, args.id).await?;
    apply_args(&mut form, args.fields);
    submit(client, &mut form).await
}

pub async fn delete(client: &EmployeeClient, id: i64, yes: bool) -> Result<()> {
    let mut list = ListController::mount(client).await;
    if let Some(error) = list.error() {
        return Err(EmsError::Banner(error.to_string()));
    }

    let question = match list.rows().iter().find(|e| e.id == id) {
        Some(employee) => format!("Delete employee {id} ({})?", employee.full_name()),
        None => format!("Delete employee {id}?"),
    };

    let confirmed = yes || confirm(&question)?;
    let outcome = list
        .delete(client, id, |_| confirmed, output::print_deleting)
        .await;

    match outcome {
        DeleteOutcome::Cancelled => {
            output::print_message("Aborted.");
            Ok(())
        }
        DeleteOutcome::Deleted => {
            if let Some(error) = list.error() {
                return Err(EmsError::Banner(error.to_string()));
            }
            output::print_deleted(id, &list);
            Ok(())
        }
        DeleteOutcome::Failed => Err(EmsError::Banner(
            list.error().unwrap_or_default().to_string(),
        )),
    }
}

/// Show the view behind `route`. Form routes prompt on stdin.
pub async fn open(client: &EmployeeClient, route: Route) -> Result<()> {
    match route {
        Route::Home | Route::Employees => list(client).await,
        Route::AddEmployee => fill_interactively(client, FormController::create()).await,
        Route::UpdateEmployee(id) => {
            let form = load_form(client, id).await?;
            fill_interactively(client, form).await
        }
    }
}

async fn load_form(client: &EmployeeClient, id: i64) -> Result<FormController> {
    let form = FormController::load(client, id).await;
    match &form.state().form_error {
        Some(error) => Err(EmsError::Banner(error.clone())),
        None => Ok(form),
    }
}

fn apply_args(form: &mut FormController, args: EmployeeFieldArgs) {
    let provided = [
        (Field::FirstName, args.first_name),
        (Field::LastName, args.last_name),
        (Field::Email, args.email),
    ];
    for (field, value) in provided {
        if let Some(value) = value {
            form.edit(field, value);
        }
    }
}

async fn submit(client: &EmployeeClient, form: &mut FormController) -> Result<()> {
    match form.submit(client).await {
        SubmitOutcome::Saved { employee, next } => {
            let verb = match form.mode() {
                FormMode::Create => "Created",
                FormMode::Update(_) => "Updated",
            };
            if output::is_json_output() {
                output::print_employee(&employee);
                return Ok(());
            }
            output::print_message(&format!(
                "{verb} employee {} - {}",
                employee.id,
                employee.full_name()
            ));
            navigate(client, next).await
        }
        SubmitOutcome::Invalid => {
            output::print_form_errors(form.state());
            Err(EmsError::InvalidForm {
                count: form.state().errors.len(),
            })
        }
        SubmitOutcome::Failed => Err(EmsError::Banner(
            form.state().form_error.clone().unwrap_or_default(),
        )),
    }
}

/// Follow a controller's navigation after a save or cancel.
async fn navigate(client: &EmployeeClient, route: Route) -> Result<()> {
    if route.is_list() {
        list(client).await
    } else {
        // forms never navigate to another form
        tracing::debug!(%route, "ignoring navigation to form route");
        Ok(())
    }
}

/// Prompt for every field, then re-prompt only the fields that failed
/// validation until the form saves. End of input cancels back to the list.
async fn fill_interactively(client: &EmployeeClient, mut form: FormController) -> Result<()> {
    let (title, busy) = match form.mode() {
        FormMode::Create => ("Add New Employee", "Adding..."),
        FormMode::Update(_) => ("Update Employee", "Updating..."),
    };
    println!("{} ({})", title.bold(), form.mode().route());
    println!("{}", "Press Ctrl-D to cancel.".bright_black());

    let mut pending: Vec<Field> = Field::ALL.to_vec();
    loop {
        for field in &pending {
            let current = form.state().fields.get(*field).to_string();
            let label = if current.is_empty() {
                format!("{}: ", field.label())
            } else {
                format!("{} [{current}]: ", field.label())
            };

            match prompt(&label)? {
                Some(value) if value.is_empty() && !current.is_empty() => {}
                Some(value) => form.edit(*field, value),
                None => {
                    println!();
                    return navigate(client, form.cancel()).await;
                }
            }
        }

        println!("{}", busy.bright_black());
        match form.submit(client).await {
            SubmitOutcome::Invalid => {
                output::print_form_errors(form.state());
                pending = form.state().errors.iter().map(|(field, _)| field).collect();
            }
            SubmitOutcome::Failed => {
                output::print_form_errors(form.state());
                if !confirm("Try again?")? {
                    return Err(EmsError::Banner(
                        form.state().form_error.clone().unwrap_or_default(),
                    ));
                }
                pending.clear();
            }
            SubmitOutcome::Saved { employee, next } => {
                output::print_message(&format!(
                    "Saved employee {} - {}",
                    employee.id,
                    employee.full_name()
                ));
                return navigate(client, next).await;
            }
        }
    }
}
