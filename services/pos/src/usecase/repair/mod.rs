//! Repair workflow: damages, work orders, work details, parts usage and
//! quality inspections of purchased vehicles.
//!
//! Every create checks its parent first (transaction for damages and work
//! orders, work order for details and inspections, work detail for parts
//! usage) and fails with the parent's not-found error before anything is
//! written.

mod damage;
mod inspection;
mod parts_usage;
mod work_detail;
mod work_order;

pub use damage::CreateDamageInput;
pub use inspection::{CreateInspectionInput, ReworkInput};
pub use parts_usage::CreatePartsUsageInput;
pub use work_detail::{CreateWorkDetailInput, ProgressInput};
pub use work_order::{AssignInput, CreateWorkOrderInput};

use crate::domain::repository::{
    ProductRepository, RepairRepository, SequencePort, UserRepository, VehiclePurchaseRepository,
};
use crate::domain::types::{PurchaseTransaction, User, WorkDetail, WorkOrder};
use crate::error::{PosError, Resource};

pub struct RepairService<R, T, U, P, N>
where
    R: RepairRepository,
    T: VehiclePurchaseRepository,
    U: UserRepository,
    P: ProductRepository,
    N: SequencePort,
{
    pub repo: R,
    pub transactions: T,
    pub users: U,
    pub products: P,
    pub seq: N,
}

impl<R, T, U, P, N> RepairService<R, T, U, P, N>
where
    R: RepairRepository,
    T: VehiclePurchaseRepository,
    U: UserRepository,
    P: ProductRepository,
    N: SequencePort,
{
    async fn transaction(&self, id: i64) -> Result<PurchaseTransaction, PosError> {
        self.transactions
            .find_transaction(id)
            .await?
            .ok_or(PosError::NotFound(Resource::Transaction))
    }

    pub async fn get_work_order(&self, id: i64) -> Result<WorkOrder, PosError> {
        self.repo
            .find_work_order(id)
            .await?
            .ok_or(PosError::NotFound(Resource::WorkOrder))
    }

    pub async fn get_work_detail(&self, id: i64) -> Result<WorkDetail, PosError> {
        self.repo
            .find_work_detail(id)
            .await?
            .ok_or(PosError::NotFound(Resource::WorkDetail))
    }

    /// Referenced staff member; must exist and be active.
    async fn staff(&self, id: i64, field: &'static str) -> Result<User, PosError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(PosError::NotFound(Resource::User))?;
        if !user.is_active {
            return Err(PosError::validation(field, format!("user {id} is inactive")));
        }
        Ok(user)
    }
}
