//! Mock API implementation directly using the `train-reservation-engine` crate

use std::sync::Arc;

use eyre::Result;
use tokio::sync::oneshot;
use tokio::task::{self, JoinHandle};
use train_reservation_core::{
    Config, RawRequest, Request, RequestHandler, RequestKind, RequestMethod, Trains,
};
use train_reservation_engine::{Dispatcher, ReservationEngine, TrainDataHandler};
use uuid::Uuid;

use super::{Api, RequestMsg, Response};

pub struct MockWorkers {
    join_handles: Vec<JoinHandle<()>>,
}

struct MockRawRequest {
    url: String,
    method: RequestMethod,
    body: Option<String>,
    response_channel: oneshot::Sender<Response>,
}

pub async fn start(
    threads: u16,
    config: Config,
    trains: Option<Trains>,
) -> Result<(MockWorkers, Api)> {
    let service = config.service;
    let dispatcher = task::spawn_blocking(move || match trains {
        Some(trains) => Ok(Dispatcher::TrainData(TrainDataHandler::new(
            ReservationEngine::new(trains),
        ))),
        None => train_reservation_engine::launch(&config),
    })
    .await??;
    let dispatcher = Arc::new(dispatcher);

    let it = (0..threads).map(move |_| {
        let (sender, receiver) = flume::bounded::<RequestMsg>(65536);
        let dispatcher = dispatcher.clone();
        let handle = task::spawn_blocking(move || {
            let dispatcher = &*dispatcher;
            for msg in receiver.into_iter() {
                let Some(kind) = RequestKind::route(service, msg.method, &msg.url) else {
                    let _ = msg.response_channel.send(Response {
                        status: 404,
                        body: String::new(),
                        request_id: None,
                    });
                    continue;
                };
                let raw = Box::new(MockRawRequest {
                    url: msg.url,
                    method: msg.method,
                    body: msg.body,
                    response_channel: msg.response_channel,
                });
                dispatcher.handle(Request::from_raw(kind, Uuid::new_v4(), raw))
            }
        });
        (sender, handle)
    });
    let (senders, join_handles) = it.unzip();

    Ok((MockWorkers { join_handles }, Api::new(senders)))
}

impl MockWorkers {
    pub async fn shutdown(self) {
        for handle in self.join_handles {
            handle.await.unwrap()
        }
    }
}

impl RawRequest for MockRawRequest {
    fn url(&self) -> &str {
        &self.url
    }

    fn method(&self) -> RequestMethod {
        self.method
    }

    fn read_bytes(&mut self) -> std::io::Result<Vec<u8>> {
        Ok(self.body.take().unwrap_or_default().into_bytes())
    }

    fn respond_with_json(self: Box<Self>, status: u16, body: String, id: Uuid) {
        let response = Response {
            status,
            body,
            request_id: Some(id),
        };
        let _ = self.response_channel.send(response);
    }

    fn respond_with_status(self: Box<Self>, status: u16, id: Uuid) {
        let response = Response {
            status,
            body: String::new(),
            request_id: Some(id),
        };
        let _ = self.response_channel.send(response);
    }
}
