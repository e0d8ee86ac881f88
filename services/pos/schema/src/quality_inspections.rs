use sea_orm::entity::prelude::*;

/// Rating and sign-off record for a finished work order.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "quality_inspections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub inspection_number: String,
    pub work_order_id: i64,
    pub inspector_id: i64,
    pub inspection_date: DateTimeUtc,
    pub status: String,
    pub overall_rating: Option<i16>,
    pub workmanship_rating: Option<i16>,
    pub safety_rating: Option<i16>,
    pub appearance_rating: Option<i16>,
    pub functionality_rating: Option<i16>,
    #[sea_orm(column_type = "Text", nullable)]
    pub defects_found: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub recommendations: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub rework_required: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub rework_notes: Option<String>,
    pub rework_due_date: Option<DateTimeUtc>,
    pub signed_off_by: Option<i64>,
    pub signed_off_at: Option<DateTimeUtc>,
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
}

impl Related<super::repair_work_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
