mod list;
mod mutation;

pub use list::{ListStatus, RefreshResourceCommand, ResourceInput, ResourceListCompute};
pub use mutation::{
    DeleteRecordCommand, MutationCompute, MutationInput, MutationKind, MutationOutcome,
    MutationStatus, SaveRecordCommand,
};
