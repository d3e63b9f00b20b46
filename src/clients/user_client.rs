use tracing::{debug, instrument, warn};
use crate::domain::{User, UserCreate, UserPatch};
use crate::user_actor::UserError;
use crate::actor_framework::ResourceClient;

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, UserError, user, users);

impl UserClient {
    #[instrument(fields(user_name = %params.name), skip(self, params))]
    pub async fn create_user(&self, params: UserCreate) -> Result<User, UserError> {
        debug!("Sending request");
        require_contact(&params.name, &params.email)?;
        self.inner.create(params).await.map_err(UserError::from)
    }

    #[instrument(fields(user_name = %patch.name), skip(self, patch))]
    pub async fn update_user(&self, id: u64, patch: UserPatch) -> Result<Option<User>, UserError> {
        debug!("Sending request");
        require_contact(&patch.name, &patch.email)?;
        self.inner.update(id, patch).await.map_err(UserError::from)
    }
}

/// Name and email are mandatory; department stays free-form.
fn require_contact(name: &str, email: &str) -> Result<(), UserError> {
    if name.trim().is_empty() {
        warn!("Validation failed: empty name");
        return Err(UserError::ValidationError("Name required".to_string()));
    }
    if email.trim().is_empty() {
        warn!("Validation failed: empty email");
        return Err(UserError::ValidationError("Email required".to_string()));
    }
    Ok(())
}
