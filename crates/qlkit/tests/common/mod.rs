//! In-memory driver used by the integration tests.

#![allow(dead_code)]

use qlkit::{Connector, DriverError, ExecResult, Row, Runner, TxRunner, Value};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct State {
    statements: Vec<(String, Vec<Value>)>,
    rows: Vec<Row>,
    exec_result: ExecResult,
    fail_with: Option<String>,
    fail_begin: bool,
    tx_events: Vec<&'static str>,
}

/// Records every statement and answers with scripted rows.
#[derive(Clone, Default)]
pub struct MockConn {
    state: Arc<Mutex<State>>,
}

impl MockConn {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, rows: Vec<Row>) -> Self {
        self.state.lock().unwrap().rows = rows;
        self
    }

    pub fn with_exec_result(self, result: ExecResult) -> Self {
        self.state.lock().unwrap().exec_result = result;
        self
    }

    pub fn failing(self, message: &str) -> Self {
        self.state.lock().unwrap().fail_with = Some(message.to_string());
        self
    }

    pub fn failing_begin(self) -> Self {
        self.state.lock().unwrap().fail_begin = true;
        self
    }

    /// SQL of every statement run so far.
    pub fn statements(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .statements
            .iter()
            .map(|(sql, _)| sql.clone())
            .collect()
    }

    /// Arguments of the last statement.
    pub fn last_args(&self) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .statements
            .last()
            .map(|(_, args)| args.clone())
            .unwrap_or_default()
    }

    pub fn tx_events(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().tx_events.clone()
    }

    fn record(&self, sql: &str, args: &[Value]) -> Result<(), DriverError> {
        let mut state = self.state.lock().unwrap();
        state.statements.push((sql.to_string(), args.to_vec()));
        match &state.fail_with {
            Some(message) => Err(message.clone().into()),
            None => Ok(()),
        }
    }
}

impl Runner for MockConn {
    async fn exec(&self, sql: &str, args: &[Value]) -> Result<ExecResult, DriverError> {
        self.record(sql, args)?;
        Ok(self.state.lock().unwrap().exec_result)
    }

    async fn query(&self, sql: &str, args: &[Value]) -> Result<Vec<Row>, DriverError> {
        self.record(sql, args)?;
        Ok(self.state.lock().unwrap().rows.clone())
    }
}

impl Connector for MockConn {
    type Tx = MockTx;

    async fn begin(&self) -> Result<MockTx, DriverError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_begin {
            return Err("cannot begin".into());
        }
        state.tx_events.push("begin");
        Ok(MockTx { conn: self.clone() })
    }
}

/// Transaction over the same recorded state.
pub struct MockTx {
    conn: MockConn,
}

impl Runner for MockTx {
    async fn exec(&self, sql: &str, args: &[Value]) -> Result<ExecResult, DriverError> {
        self.conn.exec(sql, args).await
    }

    async fn query(&self, sql: &str, args: &[Value]) -> Result<Vec<Row>, DriverError> {
        self.conn.query(sql, args).await
    }
}

impl TxRunner for MockTx {
    async fn commit(self) -> Result<(), DriverError> {
        self.conn.state.lock().unwrap().tx_events.push("commit");
        Ok(())
    }

    async fn rollback(self) -> Result<(), DriverError> {
        self.conn.state.lock().unwrap().tx_events.push("rollback");
        Ok(())
    }
}

/// A `(id, name)` row.
pub fn user_row(id: i64, name: &str) -> Row {
    Row::from_pairs([("id", Value::from(id)), ("name", Value::from(name))])
}
