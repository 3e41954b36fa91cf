use std::collections::{BTreeMap, BTreeSet};

use rust_sql_tour::queries::{self, NamedQuery};
use rust_sql_tour::seed::{self, EmployeeSeed};
use rust_sql_tour::{Money, Result, ResultSet, Runner, TourConfig, Value};
use tempfile::NamedTempFile;

// Helper function to create a seeded tour database in a temporary file
fn create_seeded_db() -> Result<(Runner, NamedTempFile)> {
    let temp_file = NamedTempFile::new().unwrap();
    let runner = Runner::connect(&TourConfig::with_db_path(temp_file.path()))?;
    runner.recreate_schema()?;
    runner.seed_data()?;
    Ok((runner, temp_file))
}

fn run(runner: &Runner, query: NamedQuery) -> Result<ResultSet> {
    runner.run_query(&query)
}

fn text(result: &ResultSet, row: usize, column: &str) -> String {
    let index = result.column_index(column).unwrap();
    result.rows[row][index].as_text().unwrap().to_string()
}

fn money(result: &ResultSet, row: usize, column: &str) -> Money {
    let index = result.column_index(column).unwrap();
    result.rows[row][index].as_money().unwrap()
}

fn integer(result: &ResultSet, row: usize, column: &str) -> i64 {
    let index = result.column_index(column).unwrap();
    result.rows[row][index].as_integer().unwrap()
}

fn dept_name(dept_id: i64) -> &'static str {
    seed::DEPARTMENTS
        .iter()
        .find(|d| d.dept_id == dept_id)
        .map(|d| d.dept_name)
        .unwrap()
}

#[test]
fn test_inner_join_pairs_every_employee() {
    test_inner_join_pairs_every_employee_impl().unwrap();
}

fn test_inner_join_pairs_every_employee_impl() -> Result<()> {
    let (runner, _temp) = create_seeded_db()?;
    let result = run(&runner, queries::INNER_JOIN)?;

    assert_eq!(result.columns, vec!["emp_name", "dept_name", "salary"]);
    assert_eq!(result.len(), 6);

    let dept_order: Vec<String> = (0..result.len())
        .map(|row| text(&result, row, "dept_name"))
        .collect();
    let mut sorted = dept_order.clone();
    sorted.sort();
    assert_eq!(dept_order, sorted);

    for row in 0..result.len() {
        let name = text(&result, row, "emp_name");
        let employee = seed::EMPLOYEES
            .iter()
            .find(|e| e.emp_name == name)
            .unwrap();
        assert_eq!(
            text(&result, row, "dept_name"),
            dept_name(employee.dept_id.unwrap())
        );
        assert_eq!(money(&result, row, "salary"), employee.salary());
    }
    Ok(())
}

#[test]
fn test_union_splits_at_threshold() {
    test_union_splits_at_threshold_impl().unwrap();
}

fn test_union_splits_at_threshold_impl() -> Result<()> {
    let (runner, _temp) = create_seeded_db()?;
    let result = run(&runner, queries::UNION_EARNERS)?;

    let pairs: BTreeSet<(String, String)> = (0..result.len())
        .map(|row| (text(&result, row, "emp_name"), text(&result, row, "category")))
        .collect();
    let expected: BTreeSet<(String, String)> = [
        ("Alice", "Low Earner"),
        ("Bob", "Low Earner"),
        ("Charlie", "High Earner"),
        ("Dina", "Low Earner"),
        ("Evan", "High Earner"),
        ("Fiona", "Low Earner"),
    ]
    .into_iter()
    .map(|(name, category)| (name.to_string(), category.to_string()))
    .collect();

    assert_eq!(pairs, expected);
    // union collapses duplicates, so no pair appears twice
    assert_eq!(result.len(), expected.len());
    Ok(())
}

#[test]
fn test_rank_within_department() {
    test_rank_within_department_impl().unwrap();
}

fn test_rank_within_department_impl() -> Result<()> {
    let (runner, _temp) = create_seeded_db()?;
    let result = run(&runner, queries::RANK_IN_DEPT)?;
    assert_eq!(result.len(), 6);

    for row in 0..result.len() {
        let dept_id = integer(&result, row, "dept_id");
        let salary = money(&result, row, "salary");
        let higher = seed::EMPLOYEES
            .iter()
            .filter(|e| e.dept_id == Some(dept_id) && e.salary() > salary)
            .count() as i64;
        assert_eq!(integer(&result, row, "rank_in_dept"), higher + 1);
    }
    Ok(())
}

#[test]
fn test_rank_ties_share_rank_and_leave_gap() {
    test_rank_ties_share_rank_and_leave_gap_impl().unwrap();
}

fn test_rank_ties_share_rank_and_leave_gap_impl() -> Result<()> {
    let (runner, _temp) = create_seeded_db()?;
    runner.insert_employees(&[EmployeeSeed {
        emp_id: 7,
        emp_name: "Gus",
        dept_id: Some(3),
        salary_cents: 820_000,
        hire_date: "2024-03-01",
    }])?;

    let result = run(&runner, queries::RANK_IN_DEPT)?;
    let ranks: BTreeMap<String, i64> = (0..result.len())
        .filter(|&row| integer(&result, row, "dept_id") == 3)
        .map(|row| {
            (
                text(&result, row, "emp_name"),
                integer(&result, row, "rank_in_dept"),
            )
        })
        .collect();

    assert_eq!(ranks.get("Evan"), Some(&1));
    assert_eq!(ranks.get("Gus"), Some(&1));
    assert_eq!(ranks.get("Charlie"), Some(&3));
    Ok(())
}

#[test]
fn test_correlated_subquery_above_department_average() {
    test_correlated_subquery_above_department_average_impl().unwrap();
}

fn test_correlated_subquery_above_department_average_impl() -> Result<()> {
    let (runner, _temp) = create_seeded_db()?;
    let result = run(&runner, queries::ABOVE_DEPT_AVERAGE)?;

    let found: BTreeMap<String, i64> = (0..result.len())
        .map(|row| (text(&result, row, "emp_name"), integer(&result, row, "dept_id")))
        .collect();
    let expected: BTreeMap<String, i64> = [("Bob", 2), ("Evan", 3), ("Fiona", 1)]
        .into_iter()
        .map(|(name, dept)| (name.to_string(), dept))
        .collect();
    assert_eq!(found, expected);
    assert_eq!(result.len(), 3);
    Ok(())
}

#[test]
fn test_cte_department_averages() {
    test_cte_department_averages_impl().unwrap();
}

fn test_cte_department_averages_impl() -> Result<()> {
    let (runner, _temp) = create_seeded_db()?;
    let result = run(&runner, queries::DEPT_AVERAGE_CTE)?;
    assert_eq!(result.len(), 3);

    let averages: BTreeMap<String, String> = (0..result.len())
        .map(|row| {
            (
                text(&result, row, "dept_name"),
                money(&result, row, "avg_salary").to_string(),
            )
        })
        .collect();
    assert_eq!(averages.get("HR").map(String::as_str), Some("5400.00"));
    assert_eq!(averages.get("Finance").map(String::as_str), Some("6400.00"));
    assert_eq!(averages.get("IT").map(String::as_str), Some("7700.00"));

    let index = result.column_index("avg_salary").unwrap();
    assert!(result
        .rows
        .iter()
        .all(|row| matches!(row[index], Value::Decimal(_))));
    Ok(())
}

#[test]
fn test_list_tables() {
    test_list_tables_impl().unwrap();
}

fn test_list_tables_impl() -> Result<()> {
    let (runner, _temp) = create_seeded_db()?;
    assert_eq!(runner.list_tables()?, vec!["departments", "employees"]);
    Ok(())
}
