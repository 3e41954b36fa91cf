//! Table definitions for the tour and their rendering into SQLite DDL.

/// Ordered set of tables. Parents come before the tables that reference them.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub tables: Vec<TableDefinition>,
}

impl Schema {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }
    pub fn add_table(mut self, table: TableDefinition) -> Self {
        self.tables.push(table);
        self
    }

    /// `DROP TABLE IF EXISTS` for every table, children first so that
    /// enforced foreign keys never see a dangling reference.
    pub fn drop_statements(&self) -> Vec<String> {
        self.tables
            .iter()
            .rev()
            .map(|table| format!("DROP TABLE IF EXISTS {}", table.name))
            .collect()
    }

    /// `CREATE TABLE` for every table, parents first.
    pub fn create_statements(&self) -> Vec<String> {
        self.tables.iter().map(TableDefinition::create_sql).collect()
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|table| table.name.as_str()).collect()
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl TableDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }
    pub fn with_column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }
    pub fn with_foreign_key(mut self, foreign_key: ForeignKey) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    pub fn create_sql(&self) -> String {
        let mut clauses: Vec<String> = self.columns.iter().map(ColumnDefinition::sql).collect();
        clauses.extend(self.foreign_keys.iter().map(ForeignKey::sql));
        format!("CREATE TABLE {} (\n    {}\n)", self.name, clauses.join(",\n    "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDefinition {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            constraints: Vec::new(),
        }
    }
    pub fn with_constraint(mut self, constraint: ColumnConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    fn sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.data_type.sql());
        for constraint in &self.constraints {
            sql.push(' ');
            sql.push_str(constraint.sql());
        }
        sql
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DataType {
    Integer,
    Varchar,
    Decimal { precision: u8, scale: u8 },
    Date,
}

impl DataType {
    fn sql(&self) -> String {
        match self {
            DataType::Integer => "INTEGER".to_string(),
            DataType::Varchar => "VARCHAR".to_string(),
            DataType::Decimal { precision, scale } => format!("DECIMAL({precision},{scale})"),
            DataType::Date => "DATE".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnConstraint {
    PrimaryKey,
    NotNull,
}

impl ColumnConstraint {
    fn sql(&self) -> &'static str {
        match self {
            ColumnConstraint::PrimaryKey => "PRIMARY KEY",
            ColumnConstraint::NotNull => "NOT NULL",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey {
    pub column: String,
    pub foreign_table: String,
    pub foreign_column: String,
}

impl ForeignKey {
    pub fn new(column: &str, foreign_table: &str, foreign_column: &str) -> Self {
        Self {
            column: column.to_string(),
            foreign_table: foreign_table.to_string(),
            foreign_column: foreign_column.to_string(),
        }
    }

    fn sql(&self) -> String {
        format!(
            "FOREIGN KEY({}) REFERENCES {}({})",
            self.column, self.foreign_table, self.foreign_column
        )
    }
}

pub const DEPARTMENTS: &str = "departments";
pub const EMPLOYEES: &str = "employees";

/// The two tour tables: `departments`, then `employees` referencing it.
pub fn tour_schema() -> Schema {
    Schema::new()
        .add_table(
            TableDefinition::new(DEPARTMENTS)
                .with_column(
                    ColumnDefinition::new("dept_id", DataType::Integer)
                        .with_constraint(ColumnConstraint::PrimaryKey),
                )
                .with_column(
                    ColumnDefinition::new("dept_name", DataType::Varchar)
                        .with_constraint(ColumnConstraint::NotNull),
                ),
        )
        .add_table(
            TableDefinition::new(EMPLOYEES)
                .with_column(
                    ColumnDefinition::new("emp_id", DataType::Integer)
                        .with_constraint(ColumnConstraint::PrimaryKey),
                )
                .with_column(ColumnDefinition::new("emp_name", DataType::Varchar))
                .with_column(ColumnDefinition::new("dept_id", DataType::Integer))
                .with_column(ColumnDefinition::new(
                    "salary",
                    DataType::Decimal {
                        precision: 10,
                        scale: 2,
                    },
                ))
                .with_column(ColumnDefinition::new("hire_date", DataType::Date))
                .with_foreign_key(ForeignKey::new("dept_id", DEPARTMENTS, "dept_id")),
        )
}
