//! Application services for task ordering and lifecycle orchestration.

mod access;
mod allocator;
mod error;
mod lifecycle;
mod ordering;

pub use allocator::PositionAllocator;
pub use error::{TaskErrorKind, TaskServiceError, TaskServiceResult};
pub use lifecycle::{CreateTaskRequest, TaskLifecycleService, UpdateTaskRequest};
pub use ordering::TaskOrderingService;
