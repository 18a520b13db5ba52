pub mod completion;
pub mod prompt;

pub use completion::{
    BoxedBackend, CompletionAdapter, CompletionBackend, CompletionError, build_backend,
};
