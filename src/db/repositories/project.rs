use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::constants::project_status;
use crate::entities::projects;
use crate::slug::slugify;

/// Filters for the paginated project listing. `include_hidden` is derived
/// from the caller's role, never from the query string.
#[derive(Debug, Default)]
pub struct ProjectListQuery {
    pub page: u64,
    pub limit: u64,
    pub category: Option<String>,
    pub status: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    pub visibility: Option<bool>,
    pub include_hidden: bool,
}

/// Slug lookup, publication-status gating and the view counter live here;
/// plain CRUD goes through `ContentRepository<projects::Entity>`.
pub struct ProjectRepository {
    conn: DatabaseConnection,
}

impl ProjectRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, query: &ProjectListQuery) -> Result<(Vec<projects::Model>, u64)> {
        let mut select = projects::Entity::find();

        if query.include_hidden {
            if let Some(status) = &query.status {
                select = select.filter(projects::Column::Status.eq(status.clone()));
            }
            if let Some(featured) = query.featured {
                select = select.filter(projects::Column::Featured.eq(featured));
            }
            if let Some(visible) = query.visibility {
                select = select.filter(projects::Column::Visibility.eq(visible));
            }
        } else {
            select = select
                .filter(projects::Column::Status.eq(project_status::PUBLISHED))
                .filter(projects::Column::Visibility.eq(true));
        }

        if let Some(category) = &query.category {
            select = select.filter(projects::Column::Category.eq(category.clone()));
        }

        if let Some(search) = &query.search {
            select = select.filter(
                Condition::any()
                    .add(projects::Column::Title.contains(search.as_str()))
                    .add(projects::Column::ShortDescription.contains(search.as_str())),
            );
        }

        let select = select
            .order_by_asc(projects::Column::Order)
            .order_by_desc(projects::Column::CreatedAt);

        let total = select
            .clone()
            .count(&self.conn)
            .await
            .context("Failed to count projects")?;

        let offset = query.page.saturating_sub(1) * query.limit;
        let items = select
            .offset(offset)
            .limit(query.limit)
            .all(&self.conn)
            .await
            .context("Failed to list projects")?;

        Ok((items, total))
    }

    pub async fn find_by_slug(
        &self,
        slug: &str,
        include_hidden: bool,
    ) -> Result<Option<projects::Model>> {
        let mut query = projects::Entity::find().filter(projects::Column::Slug.eq(slug));

        if !include_hidden {
            query = query
                .filter(projects::Column::Status.eq(project_status::PUBLISHED))
                .filter(projects::Column::Visibility.eq(true));
        }

        query
            .one(&self.conn)
            .await
            .context("Failed to fetch project by slug")
    }

    /// Bump the view counter. A lost increment under concurrent reads is
    /// acceptable; the counter is informational.
    pub async fn record_view(&self, project: projects::Model) -> Result<projects::Model> {
        let views = project.views + 1;
        let mut active: projects::ActiveModel = project.into();
        active.views = Set(views);

        active
            .update(&self.conn)
            .await
            .context("Failed to record project view")
    }

    pub async fn slug_exists(&self, slug: &str) -> Result<bool> {
        let count = projects::Entity::find()
            .filter(projects::Column::Slug.eq(slug))
            .count(&self.conn)
            .await
            .context("Failed to check slug")?;

        Ok(count > 0)
    }

    /// Derive a unique slug from the title, appending `-2`, `-3`, ... on
    /// collision.
    pub async fn unique_slug(&self, title: &str) -> Result<String> {
        let base = slugify(title);
        let base = if base.is_empty() {
            "project".to_string()
        } else {
            base
        };

        if !self.slug_exists(&base).await? {
            return Ok(base);
        }

        let mut counter = 2u32;
        loop {
            let candidate = format!("{base}-{counter}");
            if !self.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
            counter += 1;
        }
    }
}
