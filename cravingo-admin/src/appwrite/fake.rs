//! In-memory backend for tests

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::oneshot;

use super::{AppwriteError, AppwriteResult, Query, RowList, StorageApi, TablesApi};

/// A request the fake received
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List { table: String, queries: Vec<Query> },
    Create { table: String, data: Value },
    Update { table: String, row: String, data: Value },
    Delete { table: String, row: String },
    DeleteFile { bucket: String, file: String },
}

/// Tables held in memory
///
/// Queries are recorded but not evaluated; a list returns every stored row.
#[derive(Default)]
pub struct FakeBackend {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    raw_lists: Mutex<HashMap<String, Value>>,
    failures: Mutex<HashMap<String, (u16, String)>>,
    gates: Mutex<HashMap<String, VecDeque<oneshot::Receiver<()>>>>,
    calls: Mutex<Vec<Call>>,
    next_id: AtomicU64,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, table: &str, rows: Vec<Value>) -> Self {
        self.tables.lock().insert(table.to_string(), rows);
        self
    }

    /// Serve `rows` verbatim as the list body's `rows` field
    pub fn with_raw_rows(self, table: &str, rows: Value) -> Self {
        self.raw_lists.lock().insert(table.to_string(), rows);
        self
    }

    /// Reject every request on `target` (a table or bucket id)
    pub fn fail(&self, target: &str, status: u16, message: &str) {
        self.failures
            .lock()
            .insert(target.to_string(), (status, message.to_string()));
    }

    /// Hold the next list of `table` until the returned sender fires
    pub fn gate(&self, table: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .entry(table.to_string())
            .or_default()
            .push_back(rx);
        tx
    }

    pub fn set_rows(&self, table: &str, rows: Vec<Value>) {
        self.tables.lock().insert(table.to_string(), rows);
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables.lock().get(table).cloned().unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }

    fn check(&self, target: &str) -> AppwriteResult<()> {
        match self.failures.lock().get(target) {
            Some((status, message)) => Err(AppwriteError::Api {
                status: *status,
                kind: "fake_failure".into(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn not_found() -> AppwriteError {
        AppwriteError::Api {
            status: 404,
            kind: "row_not_found".into(),
            message: "Row with the requested ID could not be found.".into(),
        }
    }
}

#[async_trait]
impl TablesApi for FakeBackend {
    async fn list_rows(&self, table_id: &str, queries: &[Query]) -> AppwriteResult<RowList> {
        self.record(Call::List {
            table: table_id.to_string(),
            queries: queries.to_vec(),
        });

        let gate = self
            .gates
            .lock()
            .get_mut(table_id)
            .and_then(VecDeque::pop_front);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        self.check(table_id)?;
        if let Some(raw) = self.raw_lists.lock().get(table_id) {
            return Ok(RowList {
                total: 0,
                rows: raw.clone(),
            });
        }
        Ok(RowList::new(self.rows(table_id)))
    }

    async fn create_row(&self, table_id: &str, data: Value) -> AppwriteResult<Value> {
        self.record(Call::Create {
            table: table_id.to_string(),
            data: data.clone(),
        });
        self.check(table_id)?;

        let id = format!("row-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let mut row = data;
        if let Value::Object(map) = &mut row {
            map.insert("$id".into(), Value::String(id));
        }
        self.tables
            .lock()
            .entry(table_id.to_string())
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    async fn update_row(&self, table_id: &str, row_id: &str, data: Value) -> AppwriteResult<Value> {
        self.record(Call::Update {
            table: table_id.to_string(),
            row: row_id.to_string(),
            data: data.clone(),
        });
        self.check(table_id)?;

        let mut tables = self.tables.lock();
        let row = tables
            .get_mut(table_id)
            .and_then(|rows| rows.iter_mut().find(|r| r["$id"] == row_id))
            .ok_or_else(Self::not_found)?;
        if let (Value::Object(target), Value::Object(fields)) = (&mut *row, data) {
            target.extend(fields);
        }
        Ok(row.clone())
    }

    async fn delete_row(&self, table_id: &str, row_id: &str) -> AppwriteResult<()> {
        self.record(Call::Delete {
            table: table_id.to_string(),
            row: row_id.to_string(),
        });
        self.check(table_id)?;

        let mut tables = self.tables.lock();
        let rows = tables.get_mut(table_id).ok_or_else(Self::not_found)?;
        let before = rows.len();
        rows.retain(|r| r["$id"] != row_id);
        if rows.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }
}

#[async_trait]
impl StorageApi for FakeBackend {
    async fn delete_file(&self, bucket_id: &str, file_id: &str) -> AppwriteResult<()> {
        self.record(Call::DeleteFile {
            bucket: bucket_id.to_string(),
            file: file_id.to_string(),
        });
        self.check(bucket_id)
    }
}
