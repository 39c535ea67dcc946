use std::fmt::Display;

/// A single column filter, rendered as `<column>=eq.<value>` on the wire.
#[derive(Debug, Clone)]
pub struct Filter {
    column: String,
    operand: String,
}

impl Filter {
    pub fn eq(column: &str, value: impl Display) -> Self {
        Filter {
            column: column.to_string(),
            operand: format!("eq.{}", value),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn operand(&self) -> &str {
        &self.operand
    }
}

/// Builder for a read against one table of the hosted data service.
#[derive(Debug, Clone)]
pub struct SelectQuery {
    table: String,
    columns: String,
    filters: Vec<Filter>,
    order: Option<String>,
    limit: Option<u32>,
}

impl SelectQuery {
    pub fn new(table: &str) -> Self {
        SelectQuery {
            table: table.to_string(),
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn columns(mut self, columns: &str) -> Self {
        self.columns = columns.to_string();
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.order = Some(format!("{}.desc", column));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.columns.clone())];
        for filter in &self.filters {
            params.push((filter.column().to_string(), filter.operand().to_string()));
        }
        if let Some(order) = &self.order {
            params.push(("order".to_string(), order.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn filter_renders_eq_operand() {
        let id = Uuid::new_v4();
        let filter = Filter::eq("vendor_id", id);
        assert_eq!(filter.column(), "vendor_id");
        assert_eq!(filter.operand(), format!("eq.{}", id));
    }

    #[test]
    fn select_defaults_to_all_columns() {
        let params = SelectQuery::new("notifications").params();
        assert_eq!(params, vec![("select".to_string(), "*".to_string())]);
    }

    #[test]
    fn select_renders_filters_order_and_limit() {
        let params = SelectQuery::new("notifications")
            .columns("id,message")
            .filter(Filter::eq("is_read", false))
            .order_desc("created_at")
            .limit(20)
            .params();

        assert_eq!(
            params,
            vec![
                ("select".to_string(), "id,message".to_string()),
                ("is_read".to_string(), "eq.false".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
                ("limit".to_string(), "20".to_string()),
            ]
        );
    }
}
