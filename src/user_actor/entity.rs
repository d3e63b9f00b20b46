use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate, UserPatch};

impl Entity for User {
    type Id = u64;
    type CreateParams = UserCreate;
    type Patch = UserPatch;

    fn id(&self) -> &u64 { &self.id }

    /// Creates a new User from creation parameters.
    ///
    /// # Arguments
    /// * `id` - Identifier drawn from the store's counter
    /// * `params` - User creation parameters containing name, email and department
    fn from_create_params(id: u64, params: UserCreate) -> Result<Self, String> {
        Ok(Self {
            id,
            name: params.name,
            email: params.email,
            department: params.department,
        })
    }

    /// Replaces the user's profile information.
    ///
    /// # Fields Updated
    /// - `name`: User's display name
    /// - `email`: User's email address
    /// - `department`: Free-form department label
    ///
    /// The `id` is never touched.
    fn on_update(&mut self, patch: UserPatch) -> Result<(), String> {
        self.name = patch.name;
        self.email = patch.email;
        self.department = patch.department;
        Ok(())
    }
}
