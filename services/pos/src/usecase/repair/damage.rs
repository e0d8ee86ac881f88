use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

use showroom_domain::numbering::DocumentKind;
use showroom_domain::workflow::{DamageSeverity, DamageStatus};

use super::RepairService;
use crate::domain::patch::DamagePatch;
use crate::domain::repository::{
    ProductRepository, RepairRepository, SequencePort, UserRepository, VehiclePurchaseRepository,
};
use crate::domain::types::VehicleDamage;
use crate::error::{PosError, Resource};
use crate::usecase::{next_number, non_negative, optional, required};

#[derive(Debug, Deserialize)]
pub struct CreateDamageInput {
    pub transaction_id: i64,
    pub damage_type: String,
    pub description: String,
    pub location: Option<String>,
    pub severity: DamageSeverity,
    #[serde(default)]
    pub estimated_cost: Decimal,
}

impl<R, T, U, P, N> RepairService<R, T, U, P, N>
where
    R: RepairRepository,
    T: VehiclePurchaseRepository,
    U: UserRepository,
    P: ProductRepository,
    N: SequencePort,
{
    pub async fn create_damage(
        &self,
        input: CreateDamageInput,
        identified_by: i64,
    ) -> Result<VehicleDamage, PosError> {
        let tx = self.transaction(input.transaction_id).await?;
        let now = Utc::now();
        let mut damage = VehicleDamage {
            id: 0,
            damage_number: next_number(&self.seq, DocumentKind::VehicleDamage, now).await?,
            transaction_id: tx.id,
            damage_type: required("damage_type", &input.damage_type)?,
            description: required("description", &input.description)?,
            location: optional(input.location),
            severity: input.severity,
            status: DamageStatus::Identified,
            estimated_cost: non_negative("estimated_cost", input.estimated_cost)?,
            actual_cost: None,
            identified_by,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        damage.id = self.repo.create_damage(&damage).await?;
        Ok(damage)
    }

    pub async fn get_damage(&self, id: i64) -> Result<VehicleDamage, PosError> {
        self.repo
            .find_damage(id)
            .await?
            .ok_or(PosError::NotFound(Resource::Damage))
    }

    /// Damages of a transaction, most severe first.
    pub async fn list_damages(&self, transaction_id: i64) -> Result<Vec<VehicleDamage>, PosError> {
        self.transaction(transaction_id).await?;
        self.repo.list_damages(transaction_id).await
    }

    pub async fn update_damage(&self, id: i64, patch: DamagePatch) -> Result<VehicleDamage, PosError> {
        let mut damage = self.get_damage(id).await?;
        patch.apply_to(&mut damage);
        damage.damage_type = required("damage_type", &damage.damage_type)?;
        damage.description = required("description", &damage.description)?;
        non_negative("estimated_cost", damage.estimated_cost)?;
        if let Some(actual) = damage.actual_cost {
            non_negative("actual_cost", actual)?;
        }
        damage.updated_at = Utc::now();
        self.repo.update_damage(&damage).await?;
        Ok(damage)
    }

    pub async fn update_damage_status(
        &self,
        id: i64,
        status: DamageStatus,
    ) -> Result<VehicleDamage, PosError> {
        let mut damage = self.get_damage(id).await?;
        damage.status = status;
        damage.updated_at = Utc::now();
        self.repo.update_damage(&damage).await?;
        Ok(damage)
    }

    /// Soft delete.
    pub async fn delete_damage(&self, id: i64) -> Result<(), PosError> {
        let mut damage = self.get_damage(id).await?;
        damage.is_active = false;
        damage.updated_at = Utc::now();
        self.repo.update_damage(&damage).await
    }
}
