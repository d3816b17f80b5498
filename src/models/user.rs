use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Approver,
    User,
    Driver,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Approver => "approver",
            Role::User => "user",
            Role::Driver => "driver",
        }
    }

    pub fn can_decide(&self) -> bool {
        matches!(self, Role::Admin | Role::Approver)
    }

    pub fn can_drive(&self) -> bool {
        matches!(self, Role::Admin | Role::Driver)
    }
}
