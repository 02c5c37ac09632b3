#![allow(dead_code)]

use async_trait::async_trait;
use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use tickctl::{Error, Gateway, Result, SimulationConfig};
use tokio::time::sleep;

/// One scripted poll response: how long the "network" takes and what comes
/// back. An exhausted script behaves like an unreachable engine.
struct Step<T> {
    delay: Duration,
    result: std::result::Result<T, String>,
}

#[derive(Default)]
struct Inner {
    count_script: Mutex<VecDeque<Step<u64>>>,
    logs_script: Mutex<VecDeque<Step<Vec<String>>>>,
    loaded: Mutex<Option<SimulationConfig>>,
    submitted: Mutex<Vec<SimulationConfig>>,
    saved: Mutex<Vec<SimulationConfig>>,
    count_calls: AtomicUsize,
    logs_calls: AtomicUsize,
    submit_calls: AtomicUsize,
    reset_calls: AtomicUsize,
    fail_commands: AtomicBool,
}

/// In-memory [`Gateway`] recording every call.
#[derive(Clone, Default)]
pub struct MockGateway {
    inner: Arc<Inner>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next `ticket_count` response.
    pub fn count_response(
        self,
        delay: Duration,
        result: std::result::Result<u64, &str>,
    ) -> Self {
        self.inner.count_script.lock().unwrap().push_back(Step {
            delay,
            result: result.map_err(Into::into),
        });
        self
    }

    /// Script the next `logs` response.
    pub fn logs_response(
        self,
        delay: Duration,
        result: std::result::Result<Vec<&str>, &str>,
    ) -> Self {
        self.inner.logs_script.lock().unwrap().push_back(Step {
            delay,
            result: result
                .map(|lines| lines.into_iter().map(Into::into).collect())
                .map_err(Into::into),
        });
        self
    }

    /// What `load_config` should hand back.
    pub fn load_response(self, config: SimulationConfig) -> Self {
        *self.inner.loaded.lock().unwrap() = Some(config);
        self
    }

    /// Make every command endpoint answer with a server error.
    pub fn fail_commands(self) -> Self {
        self.inner.fail_commands.store(true, Ordering::Release);
        self
    }

    pub fn count_calls(&self) -> usize {
        self.inner.count_calls.load(Ordering::Acquire)
    }

    pub fn logs_calls(&self) -> usize {
        self.inner.logs_calls.load(Ordering::Acquire)
    }

    pub fn submit_calls(&self) -> usize {
        self.inner.submit_calls.load(Ordering::Acquire)
    }

    pub fn reset_calls(&self) -> usize {
        self.inner.reset_calls.load(Ordering::Acquire)
    }

    pub fn submitted(&self) -> Vec<SimulationConfig> {
        self.inner.submitted.lock().unwrap().clone()
    }

    pub fn saved(&self) -> Vec<SimulationConfig> {
        self.inner.saved.lock().unwrap().clone()
    }

    fn command(&self, message: &str) -> Result<String> {
        if self.inner.fail_commands.load(Ordering::Acquire) {
            return Err(server_error("command failed"));
        }

        Ok(message.to_owned())
    }
}

/// The configuration used across the end-to-end scenarios.
pub fn sample_config() -> SimulationConfig {
    SimulationConfig {
        total_tickets: 50,
        max_ticket_capacity: 100,
        ticket_release_rate: 10,
        customer_retrieval_rate: 5,
        release_interval: 1,
        retrieval_interval: 1,
        no_of_vendors: 2,
        no_of_customers: 3,
    }
}

fn server_error(message: &str) -> Error {
    Error::Status {
        status: 500,
        message: message.to_owned(),
    }
}

async fn play<T>(script: &Mutex<VecDeque<Step<T>>>) -> Result<T> {
    let step = script.lock().unwrap().pop_front();

    let Some(step) = step else {
        return Err(server_error("engine unreachable"));
    };

    sleep(step.delay).await;

    step.result.map_err(|message| server_error(&message))
}

#[async_trait]
impl Gateway for MockGateway {
    async fn submit(&self, config: &SimulationConfig) -> Result<String> {
        self.inner.submit_calls.fetch_add(1, Ordering::AcqRel);
        self.inner.submitted.lock().unwrap().push(config.clone());
        self.command("Configuration submitted successfully!")
    }

    async fn start(&self) -> Result<String> {
        self.command("Threads started successfully!")
    }

    async fn stop(&self) -> Result<String> {
        self.command("Threads stopped successfully!")
    }

    async fn reset(&self) -> Result<String> {
        self.inner.reset_calls.fetch_add(1, Ordering::AcqRel);
        self.command("System reset successfully!")
    }

    async fn save_config(&self, config: &SimulationConfig) -> Result<String> {
        self.inner.saved.lock().unwrap().push(config.clone());
        self.command("Configuration saved successfully!")
    }

    async fn load_config(&self) -> Result<SimulationConfig> {
        match self.inner.loaded.lock().unwrap().clone() {
            Some(config) => Ok(config),
            None => Err(server_error("no saved configuration")),
        }
    }

    async fn ticket_count(&self) -> Result<u64> {
        self.inner.count_calls.fetch_add(1, Ordering::AcqRel);
        play(&self.inner.count_script).await
    }

    async fn logs(&self) -> Result<Vec<String>> {
        self.inner.logs_calls.fetch_add(1, Ordering::AcqRel);
        play(&self.inner.logs_script).await
    }
}
