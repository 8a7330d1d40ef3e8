//! # Resolver
//!
//! Answers `interest "<name>"` expressions. Tiers are tried in order and the
//! first one that applies wins:
//!
//! 1. the [`LocalStore`], never touching the network,
//! 2. a synthetic `offline-data:` value when no session is attached,
//! 3. a single Interest over the attached [`ContentSession`].
//!
//! Names that do not end in `/` are rejected before any tier is consulted.
//! A failed Interest is fatal; it never falls back to tier 2.

pub mod local_store;

use std::time::Duration;

use tracing::{debug, error, info, warn};

pub use local_store::LocalStore;

use crate::eval::evaluator::{EvalError, EvalResult};
use crate::eval::value::Value;
use crate::network::{ContentSession, Interest, Name};

pub const NAME_SEPARATOR: char = '/';
pub const SYNTHETIC_PREFIX: &str = "offline-data:";
pub const DEFAULT_INTEREST_LIFETIME: Duration = Duration::from_millis(6000);

/// Placeholder produced for `name` when running without a session.
pub fn synthetic_value(name: &str) -> Value {
    Value::Text(format!(
        "{}{}",
        SYNTHETIC_PREFIX,
        name.replace(NAME_SEPARATOR, "_")
    ))
}

pub struct Resolver {
    store: LocalStore,
    session: Option<Box<dyn ContentSession>>,
    interest_lifetime: Duration,
}

impl Resolver {
    pub fn offline(store: LocalStore) -> Self {
        Self {
            store,
            session: None,
            interest_lifetime: DEFAULT_INTEREST_LIFETIME,
        }
    }

    pub fn with_session(store: LocalStore, session: Box<dyn ContentSession>) -> Self {
        Self {
            store,
            session: Some(session),
            interest_lifetime: DEFAULT_INTEREST_LIFETIME,
        }
    }

    pub fn with_interest_lifetime(mut self, lifetime: Duration) -> Self {
        self.interest_lifetime = lifetime;
        self
    }

    pub fn is_online(&self) -> bool {
        self.session.is_some()
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn resolve(&mut self, name: &str) -> EvalResult<Value> {
        if !name.ends_with(NAME_SEPARATOR) {
            error!("interest name must end with `{}`", NAME_SEPARATOR);
            return Err(EvalError::InvalidName {
                name: name.to_string(),
            });
        }

        if let Some(raw) = self.store.get(name) {
            debug!("resolved from local store");
            return Ok(Value::coerce(raw));
        }

        let lifetime = self.interest_lifetime;
        let Some(session) = self.session.as_mut() else {
            debug!("no session, using synthetic value");
            return Ok(synthetic_value(name));
        };

        let network_error = |source| {
            error!(%name, error = %source, "interest failed");
            EvalError::Network {
                name: name.to_string(),
                source,
            }
        };
        let interest = Interest::new(Name::from_uri(name).map_err(network_error)?)
            .with_must_be_fresh(true)
            .with_can_be_prefix(true)
            .with_lifetime(lifetime);
        let data = session
            .express_interest(&interest)
            .await
            .map_err(network_error)?;
        debug!(data = %data.name, bytes = data.content.len(), "resolved from network");

        if data.content.is_empty() {
            return Ok(Value::Text(String::new()));
        }
        let text = String::from_utf8(data.content).map_err(|_| {
            network_error(crate::network::NetworkError::Decode(
                "content is not valid UTF-8".to_string(),
            ))
        })?;
        Ok(Value::coerce(text.trim()))
    }

    /// Closes the session, if any. Close failures are logged and dropped.
    pub async fn release(&mut self) {
        if let Some(mut session) = self.session.take() {
            match session.close().await {
                Ok(()) => info!("session released"),
                Err(e) => warn!(error = %e, "failed to release session"),
            }
        }
    }
}
