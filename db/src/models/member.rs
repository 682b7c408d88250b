use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    Records,
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Records.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C>(db: &C, name: &str) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();
        ActiveModel {
            name: Set(name.to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Full roster, ordered by name for display.
    pub async fn find_all<C>(db: &C) -> Result<Vec<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find().order_by_asc(Column::Name).all(db).await
    }

    pub async fn exists<C>(db: &C, id: i64) -> Result<bool, DbErr>
    where
        C: ConnectionTrait,
    {
        Ok(Entity::find_by_id(id).one(db).await?.is_some())
    }

    /// Removes the member and every attendance record that references them.
    /// Returns `false` when no such member exists.
    pub async fn delete_cascade<C>(db: &C, id: i64) -> Result<bool, DbErr>
    where
        C: ConnectionTrait,
    {
        use super::attendance_record;

        attendance_record::Entity::delete_many()
            .filter(attendance_record::Column::MemberId.eq(id))
            .exec(db)
            .await?;

        let res = Entity::delete_by_id(id).exec(db).await?;
        if res.rows_affected > 0 {
            tracing::debug!(member_id = id, "removed member and attendance records");
        }
        Ok(res.rows_affected > 0)
    }
}
