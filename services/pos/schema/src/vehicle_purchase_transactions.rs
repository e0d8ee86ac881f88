use sea_orm::entity::prelude::*;

/// Purchase of a used vehicle from a customer.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "vehicle_purchase_transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub transaction_number: String,
    pub customer_id: i64,
    /// Customer name at the time of purchase.
    pub customer_name: String,
    pub vehicle_model_id: Option<i64>,
    #[sea_orm(unique)]
    pub vin: String,
    pub license_plate: Option<String>,
    pub engine_number: Option<String>,
    pub manufacture_year: Option<i32>,
    pub color: Option<String>,
    pub mileage: Option<i32>,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub asking_price: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub purchase_price: Decimal,
    pub condition_rating: Option<i16>,
    #[sea_orm(column_type = "Text", nullable)]
    pub inspection_notes: Option<String>,
    pub inspected_by: Option<i64>,
    pub inspected_at: Option<DateTimeUtc>,
    pub status: String,
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
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id"
    )]
    Customer,
    #[sea_orm(has_many = "super::vehicle_purchase_payments::Entity")]
    Payments,
    #[sea_orm(has_many = "super::vehicle_damages::Entity")]
    Damages,
    #[sea_orm(has_many = "super::repair_work_orders::Entity")]
    WorkOrders,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::vehicle_purchase_payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::vehicle_damages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Damages.def()
    }
}

impl Related<super::repair_work_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkOrders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
