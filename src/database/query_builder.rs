use crate::filter::{FilterOrder, GetAllMoviesOptions};

/// Scalar columns plus the store-computed aggregate (rounded to one decimal,
/// NULL without ratings) and the caller's own rating. `$1` is the caller id.
const MOVIE_COLUMNS: &str = r#"
    m.id, m.slug, m.title, m.yearofrelease,
    round(avg(r.rating), 1)::float4 AS rating,
    myr.rating AS userrating
"#;

const RATING_JOINS: &str = r#"
    LEFT JOIN ratings r ON m.id = r.movieid
    LEFT JOIN ratings myr ON m.id = myr.movieid AND myr.userid = $1
"#;

/// Filter shared by the listing and count queries. Title matches as a
/// case-insensitive substring, year exactly; either may be NULL to skip.
fn filter_clause(title_param: usize, year_param: usize) -> String {
    format!(
        "WHERE (${t}::text IS NULL OR m.title ILIKE ('%' || ${t} || '%')) \
         AND (${y}::int IS NULL OR m.yearofrelease = ${y})",
        t = title_param,
        y = year_param
    )
}

pub struct QueryBuilder;

impl QueryBuilder {
    /// Single movie keyed by `m.{key_column} = $2`
    pub fn select_one(key_column: &str) -> String {
        format!(
            "SELECT {MOVIE_COLUMNS} FROM movies m {RATING_JOINS} \
             WHERE m.{key_column} = $2 \
             GROUP BY m.id, myr.rating"
        )
    }

    pub fn select_genres() -> &'static str {
        "SELECT name FROM genres WHERE movieid = $1 ORDER BY position"
    }

    /// Paged listing. Binds: `$1` user, `$2` title, `$3` year, `$4` limit, `$5` offset.
    pub fn select_all(options: &GetAllMoviesOptions) -> String {
        // Genres come from a correlated subquery so they keep their position
        // order and do not multiply the rating rows being averaged.
        format!(
            "SELECT {MOVIE_COLUMNS}, \
             (SELECT string_agg(g.name, ',' ORDER BY g.position) FROM genres g WHERE g.movieid = m.id) AS genres \
             FROM movies m \
             {RATING_JOINS} \
             {filter} \
             GROUP BY m.id, myr.rating \
             {order} \
             LIMIT $4 OFFSET $5",
            filter = filter_clause(2, 3),
            order = FilterOrder::generate(options.sort.as_ref()),
        )
    }

    /// Count matching the listing filter. Binds: `$1` title, `$2` year.
    pub fn count() -> String {
        format!(
            "SELECT COUNT(m.id) AS count FROM movies m {filter}",
            filter = filter_clause(1, 2)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterOrder;

    #[test]
    fn select_one_keys_on_requested_column() {
        let by_slug = QueryBuilder::select_one("slug");
        assert!(by_slug.contains("WHERE m.slug = $2"));
        assert!(by_slug.contains("myr.userid = $1"));
        assert!(by_slug.contains("round(avg(r.rating), 1)"));
    }

    #[test]
    fn select_all_orders_and_pages() {
        let options = GetAllMoviesOptions {
            sort: Some(FilterOrder::parse("-yearofrelease").unwrap()),
            ..Default::default()
        };
        let sql = QueryBuilder::select_all(&options);
        assert!(sql.contains("ORDER BY m.yearofrelease DESC, m.created"));
        assert!(sql.contains("LIMIT $4 OFFSET $5"));
        assert!(sql.contains("string_agg(g.name, ',' ORDER BY g.position)"));
    }

    #[test]
    fn select_all_without_sort_keeps_insertion_order() {
        let sql = QueryBuilder::select_all(&GetAllMoviesOptions::default());
        assert!(sql.contains("ORDER BY m.created LIMIT"));
    }

    #[test]
    fn genres_follow_insert_position() {
        assert!(QueryBuilder::select_genres().ends_with("ORDER BY position"));
    }

    #[test]
    fn count_uses_same_filter_positions_shifted() {
        let sql = QueryBuilder::count();
        assert!(sql.contains("$1::text IS NULL"));
        assert!(sql.contains("$2::int IS NULL"));
        assert!(!sql.contains("$3"));
    }
}
