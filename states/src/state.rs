use std::any::{Any, type_name};

/// A piece of application state stored in [`crate::StateCtx`].
///
/// States are keyed by their concrete type, so each type is stored at most once.
/// `Clone` is required because commands run against a snapshot of every state,
/// never against the live value.
pub trait State: Any + Send + Clone {}

/// Object-safe view of a [`State`] used by the context storage.
pub(crate) trait ErasedState: Send {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn clone_boxed(&self) -> Box<dyn Any + Send>;

    /// Replace `self` with `value` if it holds the same concrete type.
    fn assign_box(&mut self, value: Box<dyn Any + Send>) -> bool;

    fn type_name(&self) -> &'static str;
}

impl<T: State> ErasedState for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn clone_boxed(&self) -> Box<dyn Any + Send> {
        Box::new(self.clone())
    }

    fn assign_box(&mut self, value: Box<dyn Any + Send>) -> bool {
        match value.downcast::<T>() {
            Ok(value) => {
                *self = *value;
                true
            }
            Err(_) => false,
        }
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }
}
