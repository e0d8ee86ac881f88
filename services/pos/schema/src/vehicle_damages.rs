use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "vehicle_damages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub damage_number: String,
    pub transaction_id: i64,
    pub damage_type: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub location: Option<String>,
    pub severity: String,
    pub status: String,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub estimated_cost: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))", nullable)]
    pub actual_cost: Option<Decimal>,
    pub identified_by: i64,
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
}

impl Related<super::vehicle_purchase_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
