//! Row-level mutations: delete, create and update.
//!
//! Both commands read [`MutationInput`] and publish into [`MutationCompute`].
//! After a `Done` status the caller takes the [`MutationOutcome`], patches its
//! table with it and re-dispatches [`crate::RefreshResourceCommand`].

use bizdesk_states::{
    CancellationToken, Command, CommandFuture, CommandSnapshot, LatestOnlyUpdater, State,
};
use serde_json::Value;
use ustr::Ustr;

use crate::api;
use crate::catalog;
use crate::config::BusinessConfig;
use crate::error::{ApiError, ApiResult};
use crate::form::{FormDraft, ValidationErrors};
use crate::record::Record;
use crate::schema::{PathParams, ResourceSchema};

/// The pending mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationInput {
    pub resource: Option<Ustr>,
    pub params: PathParams,
    /// Target row. `None` with a body means create.
    pub record_id: Option<Ustr>,
    /// Key and raw value of the target row's id, restored on the saved row
    /// when the backend does not echo one.
    pub identity: Option<(&'static str, Value)>,
    pub body: Option<Value>,
}

impl State for MutationInput {}

impl MutationInput {
    pub fn delete(resource: Ustr, params: PathParams, record_id: Ustr) -> Self {
        Self {
            resource: Some(resource),
            params,
            record_id: Some(record_id),
            identity: None,
            body: None,
        }
    }

    /// Validates `draft` and turns it into a create or update.
    pub fn save(params: PathParams, draft: &FormDraft) -> Result<Self, ValidationErrors> {
        Ok(Self {
            resource: Some(draft.resource()),
            params,
            record_id: draft.record_id(),
            identity: draft
                .identity()
                .map(|(key, value)| (key, value.clone())),
            body: Some(draft.to_json()?),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Deleted(Ustr),
    Saved(Record),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MutationStatus {
    #[default]
    Idle,
    InFlight(MutationKind),
    Done {
        kind: MutationKind,
        outcome: MutationOutcome,
    },
    Failed {
        kind: MutationKind,
        message: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationCompute {
    pub resource: Option<Ustr>,
    pub status: MutationStatus,
}

impl State for MutationCompute {}

impl MutationCompute {
    pub fn is_in_flight(&self) -> bool {
        matches!(self.status, MutationStatus::InFlight(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            MutationStatus::Failed { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Hands out a finished outcome once; the status goes back to `Idle`.
    pub fn take_outcome(&mut self) -> Option<MutationOutcome> {
        match std::mem::take(&mut self.status) {
            MutationStatus::Done { outcome, .. } => Some(outcome),
            other => {
                self.status = other;
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.status = MutationStatus::Idle;
    }
}

fn schema_for(input: &MutationInput) -> ApiResult<&'static ResourceSchema> {
    let resource = input
        .resource
        .ok_or_else(|| ApiError::UnknownResource(String::new()))?;
    catalog::find(&resource).ok_or_else(|| ApiError::UnknownResource(resource.to_string()))
}

fn publisher(
    updater: &LatestOnlyUpdater,
    resource: Option<Ustr>,
) -> impl Fn(MutationStatus) + '_ {
    move |status| {
        updater.set(MutationCompute { resource, status });
    }
}

/// Deletes `MutationInput::record_id`.
#[derive(Default, Debug)]
pub struct DeleteRecordCommand;

impl Command for DeleteRecordCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let input = snap.state::<MutationInput>().clone();
        let config = snap.state::<BusinessConfig>().clone();

        Box::pin(async move {
            let kind = MutationKind::Delete;
            let publish = publisher(&updater, input.resource);
            publish(MutationStatus::InFlight(kind));

            let result = async {
                let schema = schema_for(&input)?;
                let id = input.record_id.ok_or(ApiError::MissingRecordId)?;
                api::delete_record(&config, schema, &input.params, &id).await?;
                Ok::<_, ApiError>(id)
            }
            .await;

            match result {
                Ok(id) => publish(MutationStatus::Done {
                    kind,
                    outcome: MutationOutcome::Deleted(id),
                }),
                Err(err) => {
                    log::warn!("delete failed: {err}");
                    publish(MutationStatus::Failed {
                        kind,
                        message: err.to_string(),
                    });
                }
            }
        })
    }
}

/// POSTs a new record or PUTs an existing one, depending on `record_id`.
#[derive(Default, Debug)]
pub struct SaveRecordCommand;

impl Command for SaveRecordCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let input = snap.state::<MutationInput>().clone();
        let config = snap.state::<BusinessConfig>().clone();

        Box::pin(async move {
            let kind = if input.record_id.is_some() {
                MutationKind::Update
            } else {
                MutationKind::Create
            };
            let publish = publisher(&updater, input.resource);
            publish(MutationStatus::InFlight(kind));

            match save(&config, &input).await {
                Ok(record) => publish(MutationStatus::Done {
                    kind,
                    outcome: MutationOutcome::Saved(record),
                }),
                Err(err) => {
                    log::warn!("{} failed: {err}", kind.label());
                    publish(MutationStatus::Failed {
                        kind,
                        message: err.to_string(),
                    });
                }
            }
        })
    }
}

async fn save(config: &BusinessConfig, input: &MutationInput) -> ApiResult<Record> {
    let schema = schema_for(input)?;
    let body = input
        .body
        .clone()
        .ok_or_else(|| ApiError::Envelope("nothing to save".to_owned()))?;

    let returned = match input.record_id {
        Some(id) => api::update_record(config, schema, &input.params, &id, &body).await?,
        None => api::create_record(config, schema, &input.params, &body).await?,
    };

    // Without an echo the submitted body stands in for the saved row.
    let mut record = Record::from_value(body).unwrap_or_default();
    if let Some(returned) = returned {
        record.merge(returned);
    }
    if record.identity().is_none()
        && let Some((key, value)) = &input.identity
    {
        record.set(*key, value.clone());
    }
    Ok(record)
}
