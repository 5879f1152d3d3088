#![allow(dead_code)]

use async_trait::async_trait;
use permapages_core::{
    CapabilityResult, QueryEndpoint, Receipt, RecordLoader, Submitter, Tag,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const OWNER: &str = "vh-NTHVvlKZqRxc8LyyTNok65yQ55a_PJ1zWLb9G2JI";

/// Ordered record of every remote call across all mocks of one test.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().expect("call log lock").push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().expect("call log lock").clone()
    }
}

pub fn edges(nodes: Vec<Value>) -> Value {
    let edges = nodes
        .into_iter()
        .map(|node| json!({ "node": node }))
        .collect::<Vec<_>>();
    json!({ "data": { "transactions": { "edges": edges } } })
}

pub fn stamped_node(id: &str, timestamp: i64, extra_tags: &[(&str, &str)]) -> Value {
    let mut tags = vec![json!({ "name": "Timestamp", "value": timestamp.to_string() })];
    for (name, value) in extra_tags {
        tags.push(json!({ "name": name, "value": value }));
    }
    json!({ "id": id, "owner": { "address": OWNER }, "tags": tags })
}

pub struct MockQuery {
    log: CallLog,
    outcome: Result<Value, String>,
    pub queries: Mutex<Vec<String>>,
}

impl MockQuery {
    pub fn responding(log: &CallLog, response: Value) -> Arc<Self> {
        Arc::new(Self {
            log: log.clone(),
            outcome: Ok(response),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(log: &CallLog, message: &str) -> Arc<Self> {
        Arc::new(Self {
            log: log.clone(),
            outcome: Err(message.to_string()),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn last_query(&self) -> Option<String> {
        self.queries.lock().expect("queries lock").last().cloned()
    }
}

#[async_trait]
impl QueryEndpoint for MockQuery {
    async fn query(&self, query: &str) -> CapabilityResult<Value> {
        self.log.push("query");
        self.queries
            .lock()
            .expect("queries lock")
            .push(query.to_string());
        self.outcome.clone().map_err(Into::into)
    }
}

pub struct MockLoader<R> {
    log: CallLog,
    records: HashMap<String, R>,
}

impl<R> MockLoader<R> {
    pub fn with_records(log: &CallLog, records: Vec<(&str, R)>) -> Arc<Self> {
        Arc::new(Self {
            log: log.clone(),
            records: records
                .into_iter()
                .map(|(id, record)| (id.to_string(), record))
                .collect(),
        })
    }

    pub fn empty(log: &CallLog) -> Arc<Self> {
        Self::with_records(log, Vec::new())
    }
}

#[async_trait]
impl<R: Clone + Send + Sync + 'static> RecordLoader<R> for MockLoader<R> {
    async fn load(&self, id: &str) -> CapabilityResult<R> {
        self.log.push(format!("load:{id}"));
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| format!("entry {id} not found").into())
    }
}

pub struct MockSubmitter {
    name: &'static str,
    log: CallLog,
    outcome: Result<Receipt, String>,
    pub calls: Mutex<Vec<(Value, Vec<Tag>)>>,
}

impl MockSubmitter {
    pub fn returning(name: &'static str, log: &CallLog, receipt: Receipt) -> Arc<Self> {
        Arc::new(Self {
            name,
            log: log.clone(),
            outcome: Ok(receipt),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn with_id(name: &'static str, log: &CallLog, id: &str) -> Arc<Self> {
        Self::returning(name, log, Receipt::with_id(id))
    }

    pub fn failing(name: &'static str, log: &CallLog, message: &str) -> Arc<Self> {
        Arc::new(Self {
            name,
            log: log.clone(),
            outcome: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(Value, Vec<Tag>)> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl Submitter for MockSubmitter {
    async fn submit(&self, payload: Value, tags: &[Tag]) -> CapabilityResult<Receipt> {
        self.log.push(self.name);
        self.calls
            .lock()
            .expect("calls lock")
            .push((payload, tags.to_vec()));
        self.outcome.clone().map_err(Into::into)
    }
}
