use crate::models::{weekday_column, DbOpeningRule};
use courtbook_core::models::opening_rule::OpeningRule;
use eyre::{eyre, Result};
use sqlx::PgExecutor;
use uuid::Uuid;

pub async fn create_opening_rule<'e, E: PgExecutor<'e>>(executor: E, rule: &OpeningRule) -> Result<DbOpeningRule> {
    let rule = sqlx::query_as::<_, DbOpeningRule>(
        r#"
        INSERT INTO opening_rules (id, court_id, weekday, start_time, end_time, active)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, court_id, weekday, start_time, end_time, active
        "#,
    )
    .bind(rule.id)
    .bind(rule.court_id)
    .bind(weekday_column(rule))
    .bind(rule.start_time)
    .bind(rule.end_time)
    .bind(rule.active)
    .fetch_one(executor)
    .await?;

    Ok(rule)
}

pub async fn update_opening_rule<'e, E: PgExecutor<'e>>(executor: E, rule: &OpeningRule) -> Result<DbOpeningRule> {
    let updated = sqlx::query_as::<_, DbOpeningRule>(
        r#"
        UPDATE opening_rules
        SET weekday = $2, start_time = $3, end_time = $4, active = $5
        WHERE id = $1
        RETURNING id, court_id, weekday, start_time, end_time, active
        "#,
    )
    .bind(rule.id)
    .bind(weekday_column(rule))
    .bind(rule.start_time)
    .bind(rule.end_time)
    .bind(rule.active)
    .fetch_optional(executor)
    .await?
    .ok_or_else(|| eyre!("Opening rule not found"))?;

    Ok(updated)
}

pub async fn get_opening_rule_by_id<'e, E: PgExecutor<'e>>(executor: E, id: Uuid) -> Result<Option<DbOpeningRule>> {
    let rule = sqlx::query_as::<_, DbOpeningRule>(
        r#"
        SELECT id, court_id, weekday, start_time, end_time, active
        FROM opening_rules
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(rule)
}

pub async fn get_opening_rules_by_court_id<'e, E: PgExecutor<'e>>(
    executor: E,
    court_id: Uuid,
) -> Result<Vec<DbOpeningRule>> {
    let rules = sqlx::query_as::<_, DbOpeningRule>(
        r#"
        SELECT id, court_id, weekday, start_time, end_time, active
        FROM opening_rules
        WHERE court_id = $1
        ORDER BY weekday ASC, start_time ASC
        "#,
    )
    .bind(court_id)
    .fetch_all(executor)
    .await?;

    Ok(rules)
}

pub async fn get_opening_rules_for_weekday<'e, E: PgExecutor<'e>>(
    executor: E,
    court_id: Uuid,
    weekday: i16,
) -> Result<Vec<DbOpeningRule>> {
    let rules = sqlx::query_as::<_, DbOpeningRule>(
        r#"
        SELECT id, court_id, weekday, start_time, end_time, active
        FROM opening_rules
        WHERE court_id = $1 AND weekday = $2
        ORDER BY start_time ASC
        "#,
    )
    .bind(court_id)
    .bind(weekday)
    .fetch_all(executor)
    .await?;

    Ok(rules)
}
