use async_trait::async_trait;

/// The signed-in user as far as uploads care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: String,
    pub email: Option<String>,
}

/// Identity backend seam. Only `current_user` is consumed by uploads.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_user(&self) -> Option<UserIdentity>;
}

/// Fixed identity, e.g. resolved once from the command line.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    user: Option<UserIdentity>,
}

impl StaticIdentity {
    pub fn signed_in(id: impl Into<String>, email: Option<String>) -> Self {
        Self {
            user: Some(UserIdentity {
                id: id.into(),
                email,
            }),
        }
    }

    pub fn signed_out() -> Self {
        Self { user: None }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_user(&self) -> Option<UserIdentity> {
        self.user.clone()
    }
}
