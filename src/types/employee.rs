use std::fmt;

use serde::{Deserialize, Serialize};

/// An employee record as returned by the backend.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The editable part of the record.
    pub fn fields(&self) -> EmployeeFields {
        EmployeeFields {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Request body for create and update. Identity is assigned by the server.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl EmployeeFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
        }
    }

    /// Copy with one field replaced.
    pub fn with(&self, field: Field, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            Field::FirstName => next.first_name = value,
            Field::LastName => next.last_name = value,
            Field::Email => next.email = value,
        }
        next
    }
}

/// An editable employee field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::FirstName, Field::LastName, Field::Email];

    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
