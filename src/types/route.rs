use std::fmt;
use std::str::FromStr;

use crate::error::EmsError;

/// Client-side views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`, shows the list
    Home,
    /// `/employees`
    Employees,
    /// `/add-employee`
    AddEmployee,
    /// `/update-employee/:id`
    UpdateEmployee(i64),
}

impl Route {
    /// Whether this route renders the employee list.
    pub fn is_list(self) -> bool {
        matches!(self, Route::Home | Route::Employees)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Employees => write!(f, "/employees"),
            Route::AddEmployee => write!(f, "/add-employee"),
            Route::UpdateEmployee(id) => write!(f, "/update-employee/{id}"),
        }
    }
}

impl FromStr for Route {
    type Err = EmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim();
        let trimmed = path.trim_end_matches('/');

        match trimmed {
            "" => Ok(Route::Home),
            "/employees" => Ok(Route::Employees),
            "/add-employee" => Ok(Route::AddEmployee),
            _ => trimmed
                .strip_prefix("/update-employee/")
                .and_then(|id| id.parse::<i64>().ok())
                .map(Route::UpdateEmployee)
                .ok_or_else(|| EmsError::InvalidRoute(path.to_string())),
        }
    }
}
