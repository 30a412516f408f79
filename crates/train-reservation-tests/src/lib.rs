use eyre::Result;
use train_reservation_core::{Config, Service, Trains, DEFAULT_STARTING_POINT};

mod api;
pub use api::{Api, ApiError, ApiResponse, Response};

pub struct TestCtxBuilder {
    /// Service to run
    pub service: Service,
    /// Trains to start with, the built-in trains if [`None`]
    pub trains: Option<Trains>,
    /// Starting point of the booking reference counter
    pub starting_point: u64,
    /// Count of worker threads
    pub worker_threads: u16,
}

impl TestCtxBuilder {
    /// Create a new test context builder for the train data service with the
    /// built-in trains
    pub fn new() -> Self {
        TestCtxBuilder {
            service: Service::TrainData,
            trains: None,
            starting_point: DEFAULT_STARTING_POINT,
            worker_threads: 2,
        }
    }

    /// Run the booking reference service instead
    pub fn booking_reference(mut self) -> Self {
        self.service = Service::BookingReference;
        self
    }

    /// Start with the given trains
    pub fn with_trains(mut self, trains: Trains) -> Self {
        self.trains = Some(trains);
        self
    }

    /// Set the starting point of the booking reference counter
    pub fn with_starting_point(mut self, starting_point: u64) -> Self {
        self.starting_point = starting_point;
        self
    }

    /// Set the number of worker threads to use
    pub fn with_worker_threads(mut self, threads: u16) -> Self {
        assert_ne!(threads, 0);
        self.worker_threads = threads;
        self
    }

    /// Get the [`Config`] for launching the service
    fn config(&self) -> Config {
        Config {
            service: self.service,
            starting_point: self.starting_point,
            train_data: None,
        }
    }

    /// Build the test context
    pub async fn build(self) -> Result<TestCtx> {
        let config = self.config();
        let (workers, api) = api::mock::start(self.worker_threads, config, self.trains).await?;

        Ok(TestCtx {
            api,
            workers,
            service: self.service,
            worker_threads: self.worker_threads,
            drop_bomb: DropBomb,
        })
    }
}

impl Default for TestCtxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Test context
pub struct TestCtx {
    /// API allowing to interact with the service
    pub api: Api,
    workers: api::mock::MockWorkers,
    /// The service under test
    pub service: Service,
    /// Number of worker threads
    pub worker_threads: u16,

    drop_bomb: DropBomb,
}

impl TestCtx {
    /// Shut the workers down and finish the test
    pub async fn finish(self) {
        std::mem::forget(self.drop_bomb);
        drop(self.api);
        self.workers.shutdown().await;
    }
}

struct DropBomb;

impl Drop for DropBomb {
    fn drop(&mut self) {
        eprintln!("@TestAuthor: You should call `ctx.finish().await` to shut the workers down");
    }
}
