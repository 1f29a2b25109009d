use serde::Serialize;
use uuid::Uuid;

use crate::appointments::repo::AppointmentWithDonor;
use crate::blood_requests::repo::BloodRequestWithRequester;
use crate::inventory::repo::InventoryItem;
use crate::users::repo::{Role, User};

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub success: bool,
    pub users: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct RoleChangeResponse {
    pub success: bool,
    pub message: String,
    pub user: UserSummary,
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdminDashboardResponse {
    pub success: bool,
    pub data: AdminDashboardData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboardData {
    pub admin: AdminIdentity,
    pub stats: AdminStats,
    pub recent_activities: RecentActivities,
}

#[derive(Debug, Serialize)]
pub struct AdminIdentity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_users: i64,
    pub total_requests: i64,
    pub total_appointments: i64,
    pub low_stock_count: usize,
    pub low_stock_items: Vec<InventoryItem>,
}

#[derive(Debug, Serialize)]
pub struct RecentActivities {
    pub users: Vec<User>,
    pub requests: Vec<BloodRequestWithRequester>,
    pub appointments: Vec<AppointmentWithDonor>,
}
