use sea_orm::{
    ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QuerySelect, Select, SqlErr,
};

use showroom_domain::pagination::{Page, PageRequest};

/// Run `select` once for the total row count and once for the requested page.
pub async fn fetch_page<E, C>(
    select: Select<E>,
    db: &C,
    page: PageRequest,
) -> Result<Page<E::Model>, DbErr>
where
    E: EntityTrait,
    E::Model: Send + Sync,
    C: ConnectionTrait,
{
    let page = page.clamped();
    let total = select.clone().count(db).await?;
    let items = select
        .offset(page.offset())
        .limit(u64::from(page.limit))
        .all(db)
        .await?;
    Ok(Page::new(items, total))
}

/// Whether the database rejected a write because of a UNIQUE index.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Escape `%`, `_` and `\` so `term` matches literally inside `LIKE`.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_wrap_search_term_in_wildcards() {
        assert_eq!(like_pattern("toyota"), "%toyota%");
    }

    #[test]
    fn should_escape_like_metacharacters() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn should_not_treat_plain_errors_as_unique_violations() {
        assert!(!is_unique_violation(&DbErr::RecordNotFound("x".into())));
    }
}
