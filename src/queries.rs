//! The demonstration statements, in the order the tour runs them.

/// A read-only statement and the banner printed above its rows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedQuery {
    pub label: &'static str,
    pub sql: &'static str,
    /// Computed columns with no declared type that still hold amounts
    pub money_columns: &'static [&'static str],
}

pub const INNER_JOIN: NamedQuery = NamedQuery {
    label: "INNER JOIN employees + departments",
    sql: "SELECT e.emp_name, d.dept_name, e.salary
          FROM employees e
          JOIN departments d ON e.dept_id = d.dept_id
          ORDER BY d.dept_name",
    money_columns: &[],
};

pub const UNION_EARNERS: NamedQuery = NamedQuery {
    label: "UNION example (high vs low earners)",
    sql: "SELECT emp_name, 'High Earner' AS category FROM employees WHERE salary >= 7000
          UNION
          SELECT emp_name, 'Low Earner' AS category FROM employees WHERE salary < 7000",
    money_columns: &[],
};

pub const RANK_IN_DEPT: NamedQuery = NamedQuery {
    label: "RANK employees by salary within each department",
    sql: "SELECT dept_id, emp_name, salary,
                 RANK() OVER (PARTITION BY dept_id ORDER BY salary DESC) AS rank_in_dept
          FROM employees",
    money_columns: &[],
};

pub const ABOVE_DEPT_AVERAGE: NamedQuery = NamedQuery {
    label: "Employees earning above department average",
    sql: "SELECT emp_name, salary, dept_id
          FROM employees e
          WHERE salary > (SELECT AVG(salary) FROM employees WHERE dept_id = e.dept_id)",
    money_columns: &[],
};

pub const DEPT_AVERAGE_CTE: NamedQuery = NamedQuery {
    label: "Average salary per dept using CTE",
    sql: "WITH dept_avg AS (
              SELECT dept_id, AVG(salary) AS avg_sal FROM employees GROUP BY dept_id
          )
          SELECT d.dept_name, ROUND(a.avg_sal, 2) AS avg_salary
          FROM dept_avg a
          JOIN departments d ON a.dept_id = d.dept_id",
    money_columns: &["avg_salary"],
};

pub const LIST_TABLES: NamedQuery = NamedQuery {
    label: "Tables in database",
    sql: "SELECT name FROM sqlite_master
          WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
          ORDER BY name",
    money_columns: &[],
};

/// Everything before the metadata query.
pub const SHOWCASE: [NamedQuery; 5] = [
    INNER_JOIN,
    UNION_EARNERS,
    RANK_IN_DEPT,
    ABOVE_DEPT_AVERAGE,
    DEPT_AVERAGE_CTE,
];
