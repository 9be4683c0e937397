/// Declarative query specification for question listings. Stands in for ORM
/// query-builder chaining: the service describes the filter, the store turns
/// it into SQL. Ordering is always newest-first by creation date.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionFilter {
    /// Every question.
    All,
    /// Questions carrying at least one of the given tag ids (match-any).
    TagsAny(Vec<i64>),
    /// Questions owned by the given user.
    OwnedBy(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionQuery {
    pub filter: QuestionFilter,
}

const QUESTION_COLUMNS: &str = "id, title, description, creation_date, user_id";

impl QuestionQuery {
    pub fn all() -> Self {
        Self { filter: QuestionFilter::All }
    }

    pub fn tags_any(tag_ids: Vec<i64>) -> Self {
        Self { filter: QuestionFilter::TagsAny(tag_ids) }
    }

    pub fn owned_by(user_id: i64) -> Self {
        Self { filter: QuestionFilter::OwnedBy(user_id) }
    }

    /// SQL for this query. Bind parameters are applied by the store, matching
    /// on the filter variant.
    pub fn to_sql(&self) -> String {
        match &self.filter {
            QuestionFilter::All => format!(
                "SELECT {QUESTION_COLUMNS} FROM questions ORDER BY creation_date DESC"
            ),
            QuestionFilter::TagsAny(_) => format!(
                "SELECT DISTINCT q.id, q.title, q.description, q.creation_date, q.user_id \
                 FROM questions q \
                 INNER JOIN question_tags qt ON qt.question_id = q.id \
                 WHERE qt.tag_id = ANY($1) \
                 ORDER BY q.creation_date DESC"
            ),
            QuestionFilter::OwnedBy(_) => format!(
                "SELECT {QUESTION_COLUMNS} FROM questions WHERE user_id = $1 ORDER BY creation_date DESC"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_orders_by_creation_date_desc() {
        let sql = QuestionQuery::all().to_sql();
        assert!(sql.contains("FROM questions"));
        assert!(sql.ends_with("ORDER BY creation_date DESC"));
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn tags_any_joins_the_tag_link_table() {
        let sql = QuestionQuery::tags_any(vec![1, 2]).to_sql();
        assert!(sql.contains("INNER JOIN question_tags"));
        assert!(sql.contains("qt.tag_id = ANY($1)"));
        assert!(sql.contains("ORDER BY q.creation_date DESC"));
        // join can multiply rows when several filter tags match one question
        assert!(sql.starts_with("SELECT DISTINCT"));
    }

    #[test]
    fn owned_by_filters_on_user_id() {
        let sql = QuestionQuery::owned_by(9).to_sql();
        assert!(sql.contains("WHERE user_id = $1"));
        assert!(sql.contains("ORDER BY creation_date DESC"));
    }
}
