use super::error::FilterError;
use super::types::{MovieSort, SortDirection, SortField};

pub struct FilterOrder;

impl FilterOrder {
    /// Parses `title`, `+title` or `-yearofrelease`; a leading `-` means descending.
    pub fn parse(sort_by: &str) -> Result<MovieSort, FilterError> {
        let trimmed = sort_by.trim();
        if trimmed.is_empty() {
            return Err(FilterError::InvalidSortExpression(sort_by.to_string()));
        }

        let (direction, name) = match trimmed.strip_prefix('-') {
            Some(rest) => (SortDirection::Desc, rest),
            None => (SortDirection::Asc, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let field = SortField::parse(name).ok_or_else(|| FilterError::InvalidSortField(name.to_string()))?;
        Ok(MovieSort { field, direction })
    }

    /// ORDER BY clause against the `m` alias. Insertion order breaks ties,
    /// and is the whole ordering when unsorted.
    pub fn generate(sort: Option<&MovieSort>) -> String {
        match sort {
            Some(s) => format!("ORDER BY m.{} {}, m.created", s.field.column(), s.direction.to_sql()),
            None => "ORDER BY m.created".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ascending_by_default() {
        let sort = FilterOrder::parse("title").unwrap();
        assert_eq!(sort.field, SortField::Title);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn parses_explicit_prefixes() {
        assert_eq!(FilterOrder::parse("+yearofrelease").unwrap().direction, SortDirection::Asc);
        let sort = FilterOrder::parse("-yearofrelease").unwrap();
        assert_eq!(sort.field, SortField::YearOfRelease);
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn rejects_unknown_field() {
        assert_eq!(
            FilterOrder::parse("-slug"),
            Err(FilterError::InvalidSortField("slug".to_string()))
        );
    }

    #[test]
    fn generates_order_clause() {
        let sort = FilterOrder::parse("-title").unwrap();
        assert_eq!(FilterOrder::generate(Some(&sort)), "ORDER BY m.title DESC, m.created");
        assert_eq!(FilterOrder::generate(None), "ORDER BY m.created");
    }
}
