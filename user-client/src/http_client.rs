use crate::error::UserClientError;
use crate::{NewUser, User, UserUpdate};
use reqwest::{Client, Response};
use serde::Deserialize;

#[derive(Clone)]
pub struct UserClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: User,
}

impl UserClient {
    pub fn new(endpoint: &str) -> Result<Self, UserClientError> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    fn user_url(&self, id: &str) -> String {
        format!("{}/users/{}", self.base_url, id)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, UserClientError> {
        let resp = self.client.get(self.users_url()).send().await?;
        Ok(success(resp).await?.json().await?)
    }

    pub async fn get_user(&self, id: &str) -> Result<User, UserClientError> {
        let resp = self.client.get(self.user_url(id)).send().await?;
        Ok(success(resp).await?.json().await?)
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User, UserClientError> {
        let resp = self.client.post(self.users_url()).json(user).send().await?;
        let envelope: UserEnvelope = success(resp).await?.json().await?;
        Ok(envelope.user)
    }

    pub async fn update_user(&self, id: &str, update: &UserUpdate) -> Result<User, UserClientError> {
        let resp = self.client.put(self.user_url(id)).json(update).send().await?;
        let envelope: UserEnvelope = success(resp).await?.json().await?;
        Ok(envelope.user)
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), UserClientError> {
        let resp = self.client.delete(self.user_url(id)).send().await?;
        success(resp).await?;
        Ok(())
    }
}

async fn success(resp: Response) -> Result<Response, UserClientError> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        Err(UserClientError::from_http_response(resp).await)
    }
}
