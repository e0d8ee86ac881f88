use sea_orm::entity::prelude::*;

/// Model line of a brand; `(brand_id, name)` is unique.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "vehicle_models")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub brand_id: i64,
    pub category_id: i64,
    pub name: String,
    pub year_start: Option<i32>,
    pub year_end: Option<i32>,
    pub engine_capacity_cc: Option<i32>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vehicle_brands::Entity",
        from = "Column::BrandId",
        to = "super::vehicle_brands::Column::Id"
    )]
    Brand,
    #[sea_orm(
        belongs_to = "super::vehicle_categories::Entity",
        from = "Column::CategoryId",
        to = "super::vehicle_categories::Column::Id"
    )]
    Category,
}

impl Related<super::vehicle_brands::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

impl Related<super::vehicle_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
