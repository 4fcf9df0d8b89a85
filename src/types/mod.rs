mod employee;
mod route;

pub use employee::{Employee, EmployeeFields, Field};
pub use route::Route;
