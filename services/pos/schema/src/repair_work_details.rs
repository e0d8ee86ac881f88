use sea_orm::entity::prelude::*;

/// One task line of a work order.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "repair_work_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub detail_number: String,
    pub work_order_id: i64,
    pub damage_id: Option<i64>,
    pub task_name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub mechanic_id: Option<i64>,
    pub status: String,
    pub completion_percentage: i16,
    #[sea_orm(column_type = "Decimal(Some((8, 2)))")]
    pub estimated_hours: Decimal,
    #[sea_orm(column_type = "Decimal(Some((8, 2)))")]
    pub actual_hours: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub labor_cost: Decimal,
    pub quality_checked: bool,
    pub quality_checked_by: Option<i64>,
    pub quality_checked_at: Option<DateTimeUtc>,
    #[sea_orm(column_type = "Text", nullable)]
    pub quality_notes: Option<String>,
    pub started_at: Option<DateTimeUtc>,
    pub completed_at: Option<DateTimeUtc>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::repair_work_orders::Entity",
        from = "Column::WorkOrderId",
        to = "super::repair_work_orders::Column::Id"
    )]
    WorkOrder,
    #[sea_orm(
        belongs_to = "super::vehicle_damages::Entity",
        from = "Column::DamageId",
        to = "super::vehicle_damages::Column::Id"
    )]
    Damage,
    #[sea_orm(has_many = "super::repair_parts_usage::Entity")]
    PartsUsage,
}

impl Related<super::repair_work_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkOrder.def()
    }
}

impl Related<super::vehicle_damages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Damage.def()
    }
}

impl Related<super::repair_parts_usage::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PartsUsage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
