mod article_helpers;

pub use article_helpers::*;

/// A value destined for one positional parameter of a dynamically assembled
/// statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    TextArray(Vec<String>),
    Bool(bool),
    Int(i32),
}

/// Assembles an `UPDATE` statement from an ordered list of column/value
/// pairs. Column names come from a fixed set of `&'static str` literals at
/// the call sites and are never taken from request data; request data only
/// ever lands in the bound values.
pub struct UpdateBuilder {
    table: &'static str,
    assignments: Vec<(&'static str, SqlValue)>,
}

impl UpdateBuilder {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            assignments: Vec::new(),
        }
    }

    pub fn set(mut self, column: &'static str, value: SqlValue) -> Self {
        self.assignments.push((column, value));
        self
    }

    pub fn set_opt(self, column: &'static str, value: Option<SqlValue>) -> Self {
        match value {
            Some(value) => self.set(column, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Renders the statement and the positional values in assignment order,
    /// with the row id appended as the final parameter.
    pub fn build(self, id: i32) -> (String, Vec<SqlValue>) {
        let clauses = self
            .assignments
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{} = ${}", column, i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let query = format!(
            "UPDATE {} SET {} WHERE id = ${} RETURNING *",
            self.table,
            clauses,
            self.assignments.len() + 1
        );
        let mut values: Vec<SqlValue> = self
            .assignments
            .into_iter()
            .map(|(_, value)| value)
            .collect();
        values.push(SqlValue::Int(id));
        (query, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_assignments_in_insertion_order() {
        let (query, values) = UpdateBuilder::new("articles")
            .set("title", SqlValue::Text("New title".to_string()))
            .set("tags", SqlValue::TextArray(vec!["a".to_string()]))
            .set("is_published", SqlValue::Bool(true))
            .build(7);
        assert_eq!(
            query,
            "UPDATE articles SET title = $1, tags = $2, is_published = $3 \
             WHERE id = $4 RETURNING *"
        );
        assert_eq!(
            values,
            vec![
                SqlValue::Text("New title".to_string()),
                SqlValue::TextArray(vec!["a".to_string()]),
                SqlValue::Bool(true),
                SqlValue::Int(7),
            ]
        );
    }

    #[test]
    fn single_assignment_numbers_id_second() {
        let (query, values) = UpdateBuilder::new("articles")
            .set("author", SqlValue::Text("kay".to_string()))
            .build(3);
        assert_eq!(
            query,
            "UPDATE articles SET author = $1 WHERE id = $2 RETURNING *"
        );
        assert_eq!(values.len(), 2);
        assert_eq!(values[1], SqlValue::Int(3));
    }

    #[test]
    fn set_opt_skips_absent_values() {
        let builder = UpdateBuilder::new("articles")
            .set_opt("title", None)
            .set_opt("content", None);
        assert!(builder.is_empty());

        let builder = builder.set_opt("author", Some(SqlValue::Text("kay".to_string())));
        assert!(!builder.is_empty());
    }
}
