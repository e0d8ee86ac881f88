use sea_orm::entity::prelude::*;

/// Container of repair tasks for one purchased vehicle.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "repair_work_orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub work_order_number: String,
    pub transaction_id: i64,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub priority: String,
    pub status: String,
    pub approval_status: String,
    pub assigned_mechanic_id: Option<i64>,
    pub supervisor_id: Option<i64>,
    #[sea_orm(column_type = "Decimal(Some((8, 2)))")]
    pub estimated_hours: Decimal,
    #[sea_orm(column_type = "Decimal(Some((8, 2)))")]
    pub actual_hours: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub estimated_cost: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub actual_cost: Decimal,
    pub scheduled_start: Option<DateTimeUtc>,
    pub scheduled_end: Option<DateTimeUtc>,
    pub started_at: Option<DateTimeUtc>,
    pub completed_at: Option<DateTimeUtc>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub approved_by: Option<i64>,
    pub approved_at: Option<DateTimeUtc>,
    #[sea_orm(column_type = "Text", nullable)]
    pub approval_notes: Option<String>,
    pub created_by: i64,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vehicle_purchase_transactions::Entity",
        from = "Column::TransactionId",
        to = "super::vehicle_purchase_transactions::Column::Id"
    )]
    Transaction,
    #[sea_orm(has_many = "super::repair_work_details::Entity")]
    Details,
    #[sea_orm(has_many = "super::quality_inspections::Entity")]
    Inspections,
}

impl Related<super::vehicle_purchase_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl Related<super::repair_work_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Details.def()
    }
}

impl Related<super::quality_inspections::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inspections.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
