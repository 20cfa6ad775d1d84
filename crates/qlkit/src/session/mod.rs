//! Connections, sessions and transactions.
//!
//! A [`Connection`] wraps a driver connection together with its dialect, the
//! default event receiver and a [`SessionConfig`]. Statements run against an
//! [`Executor`]: either a [`Session`] opened from the connection, or a [`Tx`]
//! begun from a session.
//!
//! ```ignore
//! use qlkit::prelude::*;
//!
//! let conn = Connection::open("mysql", driver_conn)?;
//! let sess = conn.new_session(None);
//!
//! let tx = sess.begin().await?;
//! insert_into("users").pair("name", "ann").exec(&tx).await?;
//! tx.commit().await?;
//!
//! let names: Vec<String> = select(["name"]).from("users").load_all(&sess).await?;
//! ```

mod config;
pub(crate) mod run;

pub use config::SessionConfig;

use crate::client::{Connector, Runner, TxRunner};
use crate::dialect::{self, Dialect};
use crate::error::{QlError, QlResult};
use crate::monitor::{EventReceiver, NullReceiver};
use std::fmt;
use std::sync::Arc;

/// Something statements can execute against.
pub trait Executor: Send + Sync {
    type Runner: Runner;

    /// The driver-level runner.
    fn runner(&self) -> &Self::Runner;

    /// Dialect used to build and interpolate statements.
    fn dialect(&self) -> &'static dyn Dialect;

    /// Receiver for instrumentation events.
    fn receiver(&self) -> &dyn EventReceiver;

    fn config(&self) -> &SessionConfig;
}

/// A driver connection with its dialect and defaults.
pub struct Connection<C> {
    conn: Arc<C>,
    dialect: &'static dyn Dialect,
    receiver: Arc<dyn EventReceiver>,
    config: SessionConfig,
}

impl<C: Runner> Connection<C> {
    /// Wrap `conn` using `dialect`.
    pub fn new(conn: C, dialect: &'static dyn Dialect) -> Self {
        Self {
            conn: Arc::new(conn),
            dialect,
            receiver: Arc::new(NullReceiver),
            config: SessionConfig::default(),
        }
    }

    /// Wrap `conn`, picking the dialect from a driver name (`mysql`, `postgres`).
    pub fn open(driver: &str, conn: C) -> QlResult<Self> {
        Ok(Self::new(conn, dialect::for_driver(driver)?))
    }

    /// Set the default event receiver.
    pub fn with_receiver(mut self, receiver: impl EventReceiver + 'static) -> Self {
        self.receiver = Arc::new(receiver);
        self
    }

    /// Set the default event receiver from an Arc.
    pub fn with_receiver_arc(mut self, receiver: Arc<dyn EventReceiver>) -> Self {
        self.receiver = receiver;
        self
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Open a session. `None` inherits the connection's receiver.
    pub fn new_session(&self, receiver: Option<Arc<dyn EventReceiver>>) -> Session<C> {
        Session {
            conn: Arc::clone(&self.conn),
            dialect: self.dialect,
            receiver: receiver.unwrap_or_else(|| Arc::clone(&self.receiver)),
            config: self.config.clone(),
        }
    }

    pub fn dialect(&self) -> &'static dyn Dialect {
        self.dialect
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The wrapped driver connection.
    pub fn get_ref(&self) -> &C {
        &self.conn
    }
}

impl<C> fmt::Debug for Connection<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("dialect", &self.dialect.name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// A unit of work on a connection.
pub struct Session<C> {
    conn: Arc<C>,
    dialect: &'static dyn Dialect,
    receiver: Arc<dyn EventReceiver>,
    config: SessionConfig,
}

impl<C: Runner> Session<C> {
    /// Override the config for this session only.
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }
}

impl<C: Connector> Session<C> {
    /// Begin a transaction.
    pub async fn begin(&self) -> QlResult<Tx<C::Tx>> {
        match self.conn.begin().await {
            Ok(tx) => {
                self.receiver.event("qlkit.begin");
                Ok(Tx {
                    tx,
                    dialect: self.dialect,
                    receiver: Arc::clone(&self.receiver),
                    config: self.config.clone(),
                })
            }
            Err(e) => {
                let err = QlError::Driver(e);
                self.receiver.event_err("qlkit.begin", &err);
                Err(err)
            }
        }
    }
}

impl<C: Runner> Executor for Session<C> {
    type Runner = C;

    fn runner(&self) -> &C {
        &self.conn
    }

    fn dialect(&self) -> &'static dyn Dialect {
        self.dialect
    }

    fn receiver(&self) -> &dyn EventReceiver {
        self.receiver.as_ref()
    }

    fn config(&self) -> &SessionConfig {
        &self.config
    }
}

impl<C> fmt::Debug for Session<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("dialect", &self.dialect.name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// An open transaction.
///
/// [`commit`](Self::commit) and [`rollback`](Self::rollback) consume it.
/// Dropping it without either leaves the outcome to the driver.
pub struct Tx<T> {
    tx: T,
    dialect: &'static dyn Dialect,
    receiver: Arc<dyn EventReceiver>,
    config: SessionConfig,
}

impl<T: TxRunner> Tx<T> {
    /// Commit the transaction.
    pub async fn commit(self) -> QlResult<()> {
        let Tx { tx, receiver, .. } = self;
        finish_tx(receiver.as_ref(), "qlkit.commit", tx.commit().await)
    }

    /// Roll the transaction back.
    pub async fn rollback(self) -> QlResult<()> {
        let Tx { tx, receiver, .. } = self;
        finish_tx(receiver.as_ref(), "qlkit.rollback", tx.rollback().await)
    }
}

fn finish_tx(
    receiver: &dyn EventReceiver,
    name: &str,
    result: Result<(), crate::error::DriverError>,
) -> QlResult<()> {
    match result {
        Ok(()) => {
            receiver.event(name);
            Ok(())
        }
        Err(e) => {
            let err = QlError::Driver(e);
            receiver.event_err(name, &err);
            Err(err)
        }
    }
}

impl<T: TxRunner> Executor for Tx<T> {
    type Runner = T;

    fn runner(&self) -> &T {
        &self.tx
    }

    fn dialect(&self) -> &'static dyn Dialect {
        self.dialect
    }

    fn receiver(&self) -> &dyn EventReceiver {
        self.receiver.as_ref()
    }

    fn config(&self) -> &SessionConfig {
        &self.config
    }
}

impl<T> fmt::Debug for Tx<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tx")
            .field("dialect", &self.dialect.name())
            .finish_non_exhaustive()
    }
}
