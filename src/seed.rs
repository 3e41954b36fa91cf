//! Fixed sample rows inserted on every run.

use crate::value::Money;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepartmentSeed {
    pub dept_id: i64,
    pub dept_name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmployeeSeed {
    pub emp_id: i64,
    pub emp_name: &'static str,
    pub dept_id: Option<i64>,
    pub salary_cents: i64,
    /// ISO-8601 calendar date, bound as text
    pub hire_date: &'static str,
}

impl EmployeeSeed {
    pub fn salary(&self) -> Money {
        Money::from_cents(self.salary_cents)
    }
}

pub const DEPARTMENTS: [DepartmentSeed; 3] = [
    DepartmentSeed { dept_id: 1, dept_name: "HR" },
    DepartmentSeed { dept_id: 2, dept_name: "Finance" },
    DepartmentSeed { dept_id: 3, dept_name: "IT" },
];

pub const EMPLOYEES: [EmployeeSeed; 6] = [
    EmployeeSeed {
        emp_id: 1,
        emp_name: "Alice",
        dept_id: Some(1),
        salary_cents: 520_000,
        hire_date: "2022-04-01",
    },
    EmployeeSeed {
        emp_id: 2,
        emp_name: "Bob",
        dept_id: Some(2),
        salary_cents: 670_000,
        hire_date: "2023-02-10",
    },
    EmployeeSeed {
        emp_id: 3,
        emp_name: "Charlie",
        dept_id: Some(3),
        salary_cents: 720_000,
        hire_date: "2021-12-15",
    },
    EmployeeSeed {
        emp_id: 4,
        emp_name: "Dina",
        dept_id: Some(2),
        salary_cents: 610_000,
        hire_date: "2022-06-30",
    },
    EmployeeSeed {
        emp_id: 5,
        emp_name: "Evan",
        dept_id: Some(3),
        salary_cents: 820_000,
        hire_date: "2020-08-19",
    },
    EmployeeSeed {
        emp_id: 6,
        emp_name: "Fiona",
        dept_id: Some(1),
        salary_cents: 560_000,
        hire_date: "2021-01-10",
    },
];
