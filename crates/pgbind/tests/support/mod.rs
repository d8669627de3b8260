#![allow(dead_code)]

use pgbind::{async_trait, Connection, Driver, Queryable, Response, Result, Row, Value};

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

/// What the mock observed, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A statement issued on the pool
    Pool(String, Vec<Value>),
    Connect,
    /// A statement issued on a checked-out connection
    Query(String, Vec<Value>),
    Release,
}

#[derive(Debug, Default)]
struct State {
    events: Mutex<Vec<Event>>,
    failures: Mutex<Vec<String>>,
    responses: Mutex<VecDeque<Response>>,
    latency: Mutex<Option<Duration>>,
}

/// An in-memory driver that records every call it receives.
#[derive(Debug, Default, Clone)]
pub struct MockDriver {
    state: Arc<State>,
}

#[derive(Debug)]
pub struct MockError(pub String);

impl std::fmt::Display for MockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for MockError {}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statements starting with `prefix` fail.
    pub fn fail_on(&self, prefix: &str) -> &Self {
        self.state.failures.lock().unwrap().push(prefix.to_string());
        self
    }

    /// Queues the response for the next statement that succeeds.
    pub fn respond(&self, response: Response) -> &Self {
        self.state.responses.lock().unwrap().push_back(response);
        self
    }

    /// Every statement takes `latency` to complete.
    pub fn latency(&self, latency: Duration) -> &Self {
        *self.state.latency.lock().unwrap() = Some(latency);
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.state.events.lock().unwrap().clone()
    }

    /// Statement text only, pool and connection alike.
    pub fn statements(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Pool(sql, _) | Event::Query(sql, _) => Some(sql),
                _ => None,
            })
            .collect()
    }

    pub fn releases(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| **event == Event::Release)
            .count()
    }
}

impl State {
    async fn query(&self, event: Event, sql: &str) -> Result<Response> {
        self.events.lock().unwrap().push(event);

        let latency = *self.latency.lock().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let failed = self
            .failures
            .lock()
            .unwrap()
            .iter()
            .any(|prefix| sql.starts_with(prefix.as_str()));

        if failed {
            return Err(pgbind::Error::driver_operation_failed(MockError(format!(
                "mock failure: {sql}"
            ))));
        }

        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }
}

#[async_trait]
impl Queryable for MockDriver {
    async fn query(&self, sql: &str, params: &[Value]) -> Result<Response> {
        let event = Event::Pool(sql.to_string(), params.to_vec());
        self.state.query(event, sql).await
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn connect(&self) -> Result<Box<dyn Connection>> {
        self.state.events.lock().unwrap().push(Event::Connect);
        Ok(Box::new(MockConnection {
            state: self.state.clone(),
        }))
    }
}

#[derive(Debug)]
struct MockConnection {
    state: Arc<State>,
}

#[async_trait]
impl Queryable for MockConnection {
    async fn query(&self, sql: &str, params: &[Value]) -> Result<Response> {
        let event = Event::Query(sql.to_string(), params.to_vec());
        self.state.query(event, sql).await
    }
}

impl Connection for MockConnection {
    fn release(self: Box<Self>) {
        self.state.events.lock().unwrap().push(Event::Release);
    }
}

pub fn row<const N: usize>(columns: [(&str, Value); N]) -> Row {
    columns.into_iter().collect()
}

pub fn query(sql: &str, params: Vec<Value>) -> Event {
    Event::Query(sql.to_string(), params)
}

pub fn pool(sql: &str, params: Vec<Value>) -> Event {
    Event::Pool(sql.to_string(), params)
}
