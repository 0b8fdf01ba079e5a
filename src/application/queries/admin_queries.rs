//! Admin Queries

use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct GetAdmin {
    pub admin_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct ListAdmins;
