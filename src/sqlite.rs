use rusqlite::types::{ToSqlOutput, Value as SqlValue, ValueRef};
use rusqlite::ToSql;
use std::collections::HashMap;

/// Core value types for SQLite operations
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Text(String),
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Integer(i) => ToSqlOutput::Owned(SqlValue::Integer(*i)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        })
    }
}

/// Named parameter bindings for SQL queries.
///
/// Names carry their `:` prefix, exactly as they appear in the statement.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Params {
    pub values: HashMap<String, Value>,
}

impl Params {
    /// Create a new Params object
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an anonymous value and return the generated placeholder.
    pub fn push(&mut self, value: impl Into<Value>) -> String {
        let name = format!(":p{}", self.values.len());
        self.values.insert(name.clone(), value.into());
        name
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the bindings in the shape rusqlite accepts for named parameters.
    pub fn as_named(&self) -> Vec<(&str, &dyn ToSql)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
            .collect()
    }
}

/// SQL Query with typed parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    pub statement: String,
    pub params: Params,
}

impl SqlQuery {
    pub fn new(statement: &str) -> Self {
        Self {
            statement: statement.to_string(),
            params: Params::new(),
        }
    }
}

/// Query operators for building advanced queries
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOperator {
    Equal(Value),
    GreaterThan(Value),
    LessThan(Value),
    Like(String),
    /// Inclusive on both ends.
    Between(Value, Value),
}

impl QueryOperator {
    fn render(&self, field: &str, params: &mut Params) -> String {
        let binary = |sql_op: &str, value: &Value, params: &mut Params| {
            format!("{field} {sql_op} {}", params.push(value.clone()))
        };
        match self {
            QueryOperator::Equal(v) => binary("=", v, params),
            QueryOperator::GreaterThan(v) => binary(">", v, params),
            QueryOperator::LessThan(v) => binary("<", v, params),
            QueryOperator::Like(pattern) => {
                format!("{field} LIKE {}", params.push(pattern.as_str()))
            }
            QueryOperator::Between(low, high) => {
                let low = params.push(low.clone());
                let high = params.push(high.clone());
                format!("{field} BETWEEN {low} AND {high}")
            }
        }
    }
}

/// A single WHERE term: a field test, or an OR-group of terms.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Condition { field: String, op: QueryOperator },
    Any(Vec<Predicate>),
}

impl Predicate {
    pub fn condition(field: &str, op: QueryOperator) -> Self {
        Predicate::Condition {
            field: field.to_string(),
            op,
        }
    }

    fn render(&self, params: &mut Params) -> String {
        match self {
            Predicate::Condition { field, op } => op.render(field, params),
            Predicate::Any(terms) if terms.is_empty() => "0".to_string(),
            Predicate::Any(terms) => {
                let rendered: Vec<String> = terms.iter().map(|t| t.render(params)).collect();
                format!("({})", rendered.join(" OR "))
            }
        }
    }
}

/// Query builder for composable, immutable queries.
///
/// Top-level predicates are joined with `AND` in insertion order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Query {
    pub predicates: Vec<Predicate>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_condition(mut self, field: &str, op: QueryOperator) -> Self {
        self.predicates.push(Predicate::condition(field, op));
        self
    }
    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Render the WHERE body, binding every operand into `params`.
    pub fn to_where(&self, params: &mut Params) -> Option<String> {
        if self.predicates.is_empty() {
            return None;
        }
        let terms: Vec<String> = self.predicates.iter().map(|p| p.render(params)).collect();
        Some(terms.join(" AND "))
    }
}

/// CRUD operation types
#[derive(Debug, Clone, PartialEq)]
pub struct CreateOperation {
    pub table: String,
    pub data: Vec<(String, Value)>,
}

impl CreateOperation {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            data: Vec::new(),
        }
    }
    pub fn with_value(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.data.push((column.to_string(), value.into()));
        self
    }

    pub fn to_sql(&self) -> SqlQuery {
        let mut params = Params::new();
        let columns: Vec<&str> = self.data.iter().map(|(c, _)| c.as_str()).collect();
        let names: Vec<String> = self
            .data
            .iter()
            .map(|(column, value)| {
                let name = format!(":{column}");
                params.values.insert(name.clone(), value.clone());
                name
            })
            .collect();
        let statement = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            columns.join(", "),
            names.join(", ")
        );
        SqlQuery {
            statement,
            params,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadOperation {
    pub table: String,
    pub query: Query,
    pub fields: Option<Vec<String>>,
    pub order_by: Option<Vec<(String, bool)>>, // (field, is_ascending)
}

impl ReadOperation {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            query: Query::new(),
            fields: None,
            order_by: None,
        }
    }
    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }
    pub fn with_fields(mut self, fields: &[&str]) -> Self {
        self.fields = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }
    pub fn order_by(mut self, field: &str, ascending: bool) -> Self {
        self.order_by
            .get_or_insert_with(Vec::new)
            .push((field.to_string(), ascending));
        self
    }

    pub fn to_sql(&self) -> SqlQuery {
        let mut params = Params::new();
        let fields = match &self.fields {
            Some(fields) => fields.join(", "),
            None => "*".to_string(),
        };
        let mut statement = format!("SELECT {} FROM {}", fields, self.table);
        if let Some(clause) = self.query.to_where(&mut params) {
            statement.push_str(" WHERE ");
            statement.push_str(&clause);
        }
        if let Some(order) = self.order_by.as_ref().filter(|o| !o.is_empty()) {
            let terms: Vec<String> = order
                .iter()
                .map(|(field, asc)| format!("{} {}", field, if *asc { "ASC" } else { "DESC" }))
                .collect();
            statement.push_str(" ORDER BY ");
            statement.push_str(&terms.join(", "));
        }
        SqlQuery {
            statement,
            params,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOperation {
    pub table: String,
    pub query: Query,
}

impl DeleteOperation {
    pub fn new(table: &str, query: Query) -> Self {
        Self {
            table: table.to_string(),
            query,
        }
    }

    pub fn to_sql(&self) -> SqlQuery {
        let mut params = Params::new();
        let mut statement = format!("DELETE FROM {}", self.table);
        if let Some(clause) = self.query.to_where(&mut params) {
            statement.push_str(" WHERE ");
            statement.push_str(&clause);
        }
        SqlQuery {
            statement,
            params,
        }
    }
}

/// Table definition for the SQLite database
#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
        }
    }
    pub fn add_column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    /// `CREATE TABLE` without `IF NOT EXISTS`; executing it twice fails.
    pub fn create_sql(&self) -> String {
        let columns: Vec<String> = self.columns.iter().map(ColumnDefinition::to_sql).collect();
        format!("CREATE TABLE {} ({})", self.name, columns.join(", "))
    }

    pub fn drop_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {}", self.name)
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

    fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.data_type.as_sql());
        for constraint in &self.constraints {
            sql.push(' ');
            sql.push_str(constraint.as_sql());
        }
        sql
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Text,
}

impl DataType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Text => "TEXT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnConstraint {
    PrimaryKey,
    AutoIncrement,
    NotNull,
    /// Explicitly nullable.
    Null,
}

impl ColumnConstraint {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ColumnConstraint::PrimaryKey => "PRIMARY KEY",
            ColumnConstraint::AutoIncrement => "AUTOINCREMENT",
            ColumnConstraint::NotNull => "NOT NULL",
            ColumnConstraint::Null => "NULL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_operation_renders_where_and_order() {
        let query = Query::new()
            .with_condition("email", QueryOperator::Like("ali%".to_string()))
            .with_condition(
                "date",
                QueryOperator::Between("2015-12-01".into(), "2015-12-31".into()),
            );
        let sql = ReadOperation::new("user")
            .with_fields(&["id", "email"])
            .with_query(query)
            .order_by("email", true)
            .order_by("date", false)
            .to_sql();

        assert_eq!(
            sql.statement,
            "SELECT id, email FROM user WHERE email LIKE :p0 AND date BETWEEN :p1 AND :p2 \
             ORDER BY email ASC, date DESC"
        );
        assert_eq!(sql.params.len(), 3);
        assert_eq!(sql.params.values[":p0"], Value::Text("ali%".to_string()));
        assert_eq!(sql.params.values[":p2"], Value::Text("2015-12-31".to_string()));
    }

    #[test]
    fn test_or_group_is_parenthesized() {
        let query = Query::new().with_predicate(Predicate::Any(vec![
            Predicate::condition("bloodsugar", QueryOperator::LessThan(50.into())),
            Predicate::condition("bloodsugar", QueryOperator::GreaterThan(200.into())),
        ]));
        let mut params = Params::new();
        assert_eq!(
            query.to_where(&mut params).as_deref(),
            Some("(bloodsugar < :p0 OR bloodsugar > :p1)")
        );
        assert_eq!(params.values[":p1"], Value::Integer(200));
    }

    #[test]
    fn test_empty_query_has_no_where() {
        let sql = ReadOperation::new("user").to_sql();
        assert_eq!(sql.statement, "SELECT * FROM user");
        assert!(sql.params.is_empty());

        let sql = DeleteOperation::new("user", Query::new()).to_sql();
        assert_eq!(sql.statement, "DELETE FROM user");
    }

    #[test]
    fn test_create_operation_binds_named_columns() {
        let sql = CreateOperation::new("user")
            .with_value("email", "a@b.c")
            .with_value("bloodsugar", 48)
            .to_sql();
        assert_eq!(
            sql.statement,
            "INSERT INTO user (email, bloodsugar) VALUES (:email, :bloodsugar)"
        );
        assert_eq!(sql.params.values[":bloodsugar"], Value::Integer(48));
    }

    #[test]
    fn test_table_definition_ddl() {
        let table = TableDefinition::new("t")
            .add_column(
                ColumnDefinition::new("id", DataType::Integer)
                    .with_constraint(ColumnConstraint::PrimaryKey)
                    .with_constraint(ColumnConstraint::AutoIncrement),
            )
            .add_column(ColumnDefinition::new("n", DataType::Text));
        assert_eq!(
            table.create_sql(),
            "CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT, n TEXT)"
        );
        assert_eq!(table.drop_sql(), "DROP TABLE IF EXISTS t");
    }
}
