use std::marker::PhantomData;

use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    IntoActiveModel, PrimaryKeyTrait, QueryFilter, QueryOrder, Select,
};

use crate::services::audit::resources;

/// Implemented by every collection that participates in admin-controlled
/// display ordering: a mutable `order` column, a visibility flag, and a date
/// column breaking ties when `order` values collide.
pub trait ContentEntity: EntityTrait {
    /// Tag recorded in the audit trail for this collection.
    const RESOURCE: &'static str;

    type Active: ActiveModelTrait<Entity = Self> + ActiveModelBehavior + Send;

    fn order_column() -> Self::Column;

    fn visibility_column() -> Self::Column;

    /// Secondary sort key; newer records win on `order` ties.
    fn date_column() -> Self::Column;

    fn id_of(model: &Self::Model) -> i32;

    fn order_of(model: &Self::Model) -> i32;
}

/// One repository for all ordered collections. Skill, experience, education
/// and certification handlers use it directly; projects layer slug and
/// publication-status logic on top in `ProjectRepository`.
pub struct ContentRepository<E>
where
    E: ContentEntity,
{
    conn: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E> ContentRepository<E>
where
    E: ContentEntity,
{
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self {
            conn,
            _entity: PhantomData,
        }
    }

    fn sorted(query: Select<E>) -> Select<E> {
        query
            .order_by_asc(E::order_column())
            .order_by_desc(E::date_column())
    }

    /// List in display order. Non-admin callers (`include_hidden = false`)
    /// only see visible records; admins see everything unless they ask for
    /// an explicit visibility filter.
    pub async fn list(
        &self,
        include_hidden: bool,
        visibility: Option<bool>,
        extra: Option<Condition>,
    ) -> Result<Vec<E::Model>> {
        let mut query = E::find();

        if include_hidden {
            if let Some(visible) = visibility {
                query = query.filter(E::visibility_column().eq(visible));
            }
        } else {
            query = query.filter(E::visibility_column().eq(true));
        }

        if let Some(condition) = extra {
            query = query.filter(condition);
        }

        Self::sorted(query)
            .all(&self.conn)
            .await
            .context("Failed to list records")
    }

    pub async fn get(&self, id: i32, include_hidden: bool) -> Result<Option<E::Model>>
    where
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
    {
        let mut query = E::find_by_id(id);

        if !include_hidden {
            query = query.filter(E::visibility_column().eq(true));
        }

        query.one(&self.conn).await.context("Failed to fetch record")
    }

    pub async fn insert(&self, model: E::Active) -> Result<E::Model>
    where
        E::Model: IntoActiveModel<E::Active>,
    {
        model
            .insert(&self.conn)
            .await
            .context("Failed to insert record")
    }

    pub async fn update(&self, model: E::Active) -> Result<E::Model>
    where
        E::Model: IntoActiveModel<E::Active>,
    {
        model
            .update(&self.conn)
            .await
            .context("Failed to update record")
    }

    pub async fn delete(&self, id: i32) -> Result<bool>
    where
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
    {
        let result = E::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete record")?;

        Ok(result.rows_affected > 0)
    }

    /// Reorder guard. Admins shift records by writing `order ± 1` on the
    /// moved record only; a shift that would push the first record further
    /// up, or the last record further down, cannot change the display
    /// sequence and is ignored. Returns the order value to apply, or `None`
    /// for such a boundary no-op. Gaps and duplicate values are tolerated.
    pub async fn clamp_order(&self, target: &E::Model, requested: i32) -> Result<Option<i32>> {
        let current = E::order_of(target);
        if requested == current {
            return Ok(Some(requested));
        }

        let sequence = Self::sorted(E::find())
            .all(&self.conn)
            .await
            .context("Failed to load display sequence")?;

        let Some(position) = sequence
            .iter()
            .position(|model| E::id_of(model) == E::id_of(target))
        else {
            return Ok(Some(requested));
        };

        let moving_up = requested < current;
        if moving_up && position == 0 {
            return Ok(None);
        }
        if !moving_up && position + 1 == sequence.len() {
            return Ok(None);
        }

        Ok(Some(requested))
    }
}

use crate::entities::{certifications, education, experiences, projects, skills};

impl ContentEntity for projects::Entity {
    const RESOURCE: &'static str = resources::PROJECT;

    type Active = projects::ActiveModel;

    fn order_column() -> Self::Column {
        projects::Column::Order
    }

    fn visibility_column() -> Self::Column {
        projects::Column::Visibility
    }

    fn date_column() -> Self::Column {
        projects::Column::CreatedAt
    }

    fn id_of(model: &Self::Model) -> i32 {
        model.id
    }

    fn order_of(model: &Self::Model) -> i32 {
        model.order
    }
}

impl ContentEntity for skills::Entity {
    const RESOURCE: &'static str = resources::SKILL;

    type Active = skills::ActiveModel;

    fn order_column() -> Self::Column {
        skills::Column::Order
    }

    fn visibility_column() -> Self::Column {
        skills::Column::Visibility
    }

    fn date_column() -> Self::Column {
        skills::Column::CreatedAt
    }

    fn id_of(model: &Self::Model) -> i32 {
        model.id
    }

    fn order_of(model: &Self::Model) -> i32 {
        model.order
    }
}

impl ContentEntity for experiences::Entity {
    const RESOURCE: &'static str = resources::EXPERIENCE;

    type Active = experiences::ActiveModel;

    fn order_column() -> Self::Column {
        experiences::Column::Order
    }

    fn visibility_column() -> Self::Column {
        experiences::Column::Visibility
    }

    fn date_column() -> Self::Column {
        experiences::Column::StartDate
    }

    fn id_of(model: &Self::Model) -> i32 {
        model.id
    }

    fn order_of(model: &Self::Model) -> i32 {
        model.order
    }
}

impl ContentEntity for education::Entity {
    const RESOURCE: &'static str = resources::EDUCATION;

    type Active = education::ActiveModel;

    fn order_column() -> Self::Column {
        education::Column::Order
    }

    fn visibility_column() -> Self::Column {
        education::Column::Visibility
    }

    fn date_column() -> Self::Column {
        education::Column::StartDate
    }

    fn id_of(model: &Self::Model) -> i32 {
        model.id
    }

    fn order_of(model: &Self::Model) -> i32 {
        model.order
    }
}

impl ContentEntity for certifications::Entity {
    const RESOURCE: &'static str = resources::CERTIFICATION;

    type Active = certifications::ActiveModel;

    fn order_column() -> Self::Column {
        certifications::Column::Order
    }

    fn visibility_column() -> Self::Column {
        certifications::Column::Visibility
    }

    fn date_column() -> Self::Column {
        certifications::Column::IssueDate
    }

    fn id_of(model: &Self::Model) -> i32 {
        model.id
    }

    fn order_of(model: &Self::Model) -> i32 {
        model.order
    }
}
