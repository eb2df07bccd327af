//! Request parameters for list endpoints

use crate::api::filter::{FilterClause, SortClause};

/// Page number and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

/// Filtering, sorting and pagination applied to one list request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParameters {
    pub filtering: Vec<FilterClause>,
    pub sorting: Option<SortClause>,
    pub pagination: Option<Pagination>,
}

impl RequestParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter clause. The empty sentinel clause is skipped.
    pub fn with_filter(mut self, clause: FilterClause) -> Self {
        if !clause.is_empty() {
            self.filtering.push(clause);
        }
        self
    }

    pub fn with_sort(mut self, clause: SortClause) -> Self {
        if !clause.is_empty() {
            self.sorting = Some(clause);
        }
        self
    }

    pub fn with_pagination(mut self, page: u32, per_page: u32) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }

    /// Set the page number, keeping any page size already chosen
    pub fn set_page(&mut self, page: u32) {
        match self.pagination.as_mut() {
            Some(p) => p.page = page,
            None => {
                self.pagination = Some(Pagination {
                    page,
                    per_page: 0,
                })
            }
        }
    }

    /// Render as ordered query-string pairs.
    ///
    /// Filters become `property:operator=v1,v2`, sorting `sort=property:dir`.
    /// A zero page size is left to the server default.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();

        for clause in &self.filtering {
            query.push((
                format!("{}:{}", clause.property, clause.operator),
                clause.values.join(","),
            ));
        }

        if let Some(ref sort) = self.sorting {
            query.push((
                "sort".to_string(),
                format!("{}:{}", sort.property, sort.direction().as_str()),
            ));
        }

        if let Some(p) = self.pagination {
            query.push(("page".to_string(), p.page.to_string()));
            if p.per_page > 0 {
                query.push(("per_page".to_string(), p.per_page.to_string()));
            }
        }

        query
    }
}
