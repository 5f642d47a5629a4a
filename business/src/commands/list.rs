//! Loading a resource collection.
//!
//! - [`ResourceInput`] says which resource (and which path parameters) to load.
//! - [`RefreshResourceCommand`] performs the GET and publishes into
//!   [`ResourceListCompute`].
//!
//! UI code reads the compute with `ctx.state::<ResourceListCompute>()` and feeds
//! it to [`crate::ResourceTableState::sync_from`].

use bizdesk_states::{
    CancellationToken, Command, CommandFuture, CommandSnapshot, LatestOnlyUpdater, State,
};
use chrono::{DateTime, Utc};
use ustr::Ustr;

use crate::api;
use crate::catalog;
use crate::config::BusinessConfig;
use crate::error::ApiError;
use crate::record::Record;
use crate::schema::PathParams;

/// Which collection the next refresh loads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceInput {
    pub resource: Option<Ustr>,
    pub params: PathParams,
}

impl State for ResourceInput {}

impl ResourceInput {
    pub fn new(resource: &str) -> Self {
        Self {
            resource: Some(Ustr::from(resource)),
            params: PathParams::new(),
        }
    }

    /// Adds `user_id` from the config when the endpoint needs it and none is set.
    pub fn with_config_params(mut self, config: &BusinessConfig) -> Self {
        if let Some(user_id) = &config.user_id {
            self.params
                .entry("user_id".to_owned())
                .or_insert_with(|| user_id.clone());
        }
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub enum ListStatus {
    #[default]
    Idle,

    Loading,

    Loaded {
        records: Vec<Record>,
        fetched_at: DateTime<Utc>,
        /// Generation of the refresh that produced this result.
        generation: u64,
    },

    Error(String),
}

/// Last fetched collection of [`ResourceListCompute::resource`].
#[derive(Debug, Clone, Default)]
pub struct ResourceListCompute {
    pub resource: Option<Ustr>,
    pub status: ListStatus,
}

impl State for ResourceListCompute {}

impl ResourceListCompute {
    pub fn is_loading(&self) -> bool {
        matches!(self.status, ListStatus::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            ListStatus::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn records(&self) -> Option<&[Record]> {
        match &self.status {
            ListStatus::Loaded { records, .. } => Some(records.as_slice()),
            _ => None,
        }
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        match &self.status {
            ListStatus::Loaded { fetched_at, .. } => Some(*fetched_at),
            _ => None,
        }
    }

    /// Generation of the refresh behind a `Loaded` status.
    pub fn generation(&self) -> Option<u64> {
        match &self.status {
            ListStatus::Loaded { generation, .. } => Some(*generation),
            _ => None,
        }
    }

    pub fn is_for(&self, resource: &str) -> bool {
        self.resource.is_some_and(|own| own.as_str() == resource)
    }
}

/// Fetches the collection named by [`ResourceInput`].
///
/// A newer dispatch cancels this one; its late results are never applied.
#[derive(Default, Debug)]
pub struct RefreshResourceCommand;

impl Command for RefreshResourceCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let input = snap.state::<ResourceInput>().clone();
        let config = snap.state::<BusinessConfig>().clone();

        Box::pin(async move {
            let Some(resource) = input.resource else {
                log::warn!("refresh dispatched without a resource");
                return;
            };
            let publish = |status| {
                updater.set(ResourceListCompute {
                    resource: Some(resource),
                    status,
                });
            };

            let Some(schema) = catalog::find(&resource) else {
                publish(ListStatus::Error(
                    ApiError::UnknownResource(resource.to_string()).to_string(),
                ));
                return;
            };

            publish(ListStatus::Loading);

            match api::list_records(&config, schema, &input.params).await {
                Ok(records) => publish(ListStatus::Loaded {
                    records,
                    fetched_at: Utc::now(),
                    generation: updater.task_id().generation(),
                }),
                Err(err) => {
                    log::warn!("failed to load {resource}: {err}");
                    publish(ListStatus::Error(err.to_string()));
                }
            }
        })
    }
}
