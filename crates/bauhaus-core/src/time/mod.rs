mod deadline;

pub use deadline::CommitDeadline;
