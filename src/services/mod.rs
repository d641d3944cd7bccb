pub mod exercise_log;
pub mod exercises;

pub use exercise_log::{ExerciseLog, LogEntry, LogFilter, LogQuery};
pub use exercises::{CreateExerciseRequest, ExerciseAdded};
