use doceria_auth::{Role, User, UserId, hash_password};
use doceria_core::EntityId;

use crate::store::{InMemoryStore, Store};

/// E-mail of the bootstrap admin account.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@doceria.local";

/// Seed the bootstrap admin account unless one already exists.
///
/// The password comes from `DOCERIA_ADMIN_PASSWORD`; without it a well-known
/// dev default is used and a warning is logged.
pub fn seed_admin(users: &InMemoryStore<UserId, User>) {
    let exists = users
        .list()
        .into_iter()
        .any(|user| user.email == DEFAULT_ADMIN_EMAIL);
    if exists {
        return;
    }

    let password = std::env::var("DOCERIA_ADMIN_PASSWORD").unwrap_or_else(|_| {
        tracing::warn!("DOCERIA_ADMIN_PASSWORD not set; seeding admin with insecure dev default");
        "123456".to_string()
    });

    let user = User {
        id: UserId::new(EntityId::new()),
        name: "Administrator".to_string(),
        email: DEFAULT_ADMIN_EMAIL.to_string(),
        password_hash: hash_password(&password),
        role: Role::Admin,
    };
    users.save(user);
    tracing::info!(email = DEFAULT_ADMIN_EMAIL, "seeded default admin user");
}
