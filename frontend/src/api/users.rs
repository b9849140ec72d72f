use super::{ApiClient, Method, Transport};
use crate::error::ApiError;
use crate::models::{Ack, Envelope, Id, User, UserUpdate};

impl<T: Transport> ApiClient<T> {
    /// The backend answers with a one-element list.
    pub async fn get_user(&self, id: Id) -> Result<Option<User>, ApiError> {
        let request = self.request(Method::Get, "/user").query("id", id);
        let reply: Envelope<Vec<User>> = self.call(request).await?;
        Ok(reply.data.and_then(|users| users.into_iter().next()))
    }

    pub async fn update_user(&self, update: &UserUpdate) -> Result<Ack, ApiError> {
        let request = self.request(Method::Put, "/user").json(update)?;
        self.call(request).await
    }

    pub async fn delete_user(&self, id: Id) -> Result<Ack, ApiError> {
        let request = self.request(Method::Delete, "/user").query("id", id);
        self.call(request).await
    }
}
