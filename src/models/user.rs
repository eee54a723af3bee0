use serde::Deserialize;

pub const ADMIN_ROLES: [&str; 2] = ["admin", "ROLE_ADMIN"];

/// Authenticated principal, taken from the bearer token.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: i64,
    pub role: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        ADMIN_ROLES.contains(&self.role.as_str())
    }

    /// Owners may touch their own reviews, admins may touch any.
    pub fn can_manage(&self, owner_id: i64) -> bool {
        self.id == owner_id || self.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_can_manage_anything() {
        let admin = User { id: 1, role: "ROLE_ADMIN".to_string() };
        let user = User { id: 2, role: "user".to_string() };

        assert!(admin.is_admin());
        assert!(admin.can_manage(2));
        assert!(!user.is_admin());
        assert!(user.can_manage(2));
        assert!(!user.can_manage(3));
    }
}
