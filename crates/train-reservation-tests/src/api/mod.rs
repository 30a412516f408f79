use std::sync::Arc;

use eyre::Result;
use flume::Sender;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::oneshot;
use train_reservation_core::{RequestMethod, Reservation, Train, Trains};
use uuid::Uuid;

pub mod mock;

#[derive(Debug, Error)]
#[error("Error {status}: {body}")]
pub struct ApiError {
    pub status: u16,
    pub body: String,
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Response as sent by the service
#[derive(Debug)]
pub struct Response {
    pub status: u16,
    pub body: String,
    pub request_id: Option<Uuid>,
}

impl Response {
    /// Decode a successful response's body as `T`
    fn into_api_response<T: DeserializeOwned>(self) -> Result<ApiResponse<T>> {
        let result = if self.status == 200 {
            Ok(serde_json::from_str(&self.body)?)
        } else {
            Err(ApiError {
                status: self.status,
                body: self.body,
            })
        };
        Ok(ApiResponse {
            request_id: self.request_id,
            result,
        })
    }
}

struct RequestMsg {
    method: RequestMethod,
    url: String,
    body: Option<String>,
    response_channel: oneshot::Sender<Response>,
}

pub struct Api {
    /// One channel per worker thread
    channels: Arc<Vec<Sender<RequestMsg>>>,

    my_channel: Sender<RequestMsg>,
    my_index: usize,
}

impl Api {
    fn new(channels: Vec<Sender<RequestMsg>>) -> Self {
        let my_channel = channels[0].clone();
        Self {
            channels: Arc::new(channels),
            my_channel,
            my_index: 0,
        }
    }
}

impl Clone for Api {
    fn clone(&self) -> Self {
        let my_index = (self.my_index + 1) % self.channels.len();
        Self {
            channels: self.channels.clone(),
            my_channel: self.channels[my_index].clone(),
            my_index,
        }
    }
}

#[derive(Deserialize)]
struct ReferenceResponse {
    value: String,
}

impl Api {
    /// Send a raw request and wait for its response
    pub async fn request(
        &self,
        method: RequestMethod,
        url: &str,
        body: Option<String>,
    ) -> Result<Response> {
        let (sender, receiver) = oneshot::channel();
        let msg = RequestMsg {
            method,
            url: url.into(),
            body,
            response_channel: sender,
        };
        self.my_channel.send_async(msg).await?;
        Ok(receiver.await?)
    }

    pub async fn data_for_train(&self, train_id: &str) -> Result<ApiResponse<Train>> {
        let url = format!("/data_for_train/{train_id}");
        let response = self.request(RequestMethod::Get, &url, None);
        response.await?.into_api_response()
    }

    pub async fn reserve(&self, reservation: &Reservation) -> Result<ApiResponse<Train>> {
        self.reserve_raw(&serde_json::to_string(reservation)?).await
    }

    /// Post `body` to `/reserve` as is
    pub async fn reserve_raw(&self, body: &str) -> Result<ApiResponse<Train>> {
        let response = self.request(RequestMethod::Post, "/reserve", Some(body.into()));
        response.await?.into_api_response()
    }

    pub async fn reset(&self) -> Result<ApiResponse<Trains>> {
        let response = self.request(RequestMethod::Post, "/reset", None);
        response.await?.into_api_response()
    }

    pub async fn booking_reference(&self) -> Result<ApiResponse<String>> {
        let response = self.request(RequestMethod::Get, "/", None);
        let response: ApiResponse<ReferenceResponse> = response.await?.into_api_response()?;
        Ok(response.map(|r| r.value))
    }
}

pub struct ApiResponse<T> {
    pub request_id: Option<Uuid>,
    pub result: ApiResult<T>,
}

impl<T> ApiResponse<T> {
    pub fn map<R, F: FnOnce(T) -> R>(self, func: F) -> ApiResponse<R> {
        ApiResponse {
            request_id: self.request_id,
            result: self.result.map(func),
        }
    }

    /// Status code of the response
    pub fn status(&self) -> u16 {
        match &self.result {
            Ok(_) => 200,
            Err(err) => err.status,
        }
    }
}
