use crate::models::{AppData, CreateTaskRequest, Task};
use std::fmt;

/// Both the trimmed name and the category were blank on create.
#[derive(Debug, PartialEq, Eq)]
pub struct BlankTaskError;

impl fmt::Display for BlankTaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "please provide a task name or pick a category")
    }
}

impl std::error::Error for BlankTaskError {}

/// Append a new task. The name falls back to the category when blank; a task
/// with neither is rejected without touching the collection.
pub fn create_task<'a>(
    data: &'a mut AppData,
    request: &CreateTaskRequest,
    now_ms: i64,
) -> Result<&'a Task, BlankTaskError> {
    let name = request.name.trim();
    let category = request.category.trim();
    if name.is_empty() && category.is_empty() {
        return Err(BlankTaskError);
    }

    let name = if name.is_empty() { category } else { name };

    let mut id = now_ms;
    while data.tasks.iter().any(|task| task.id == id) {
        id += 1;
    }

    data.tasks.push(Task {
        id,
        name: name.to_string(),
        description: request.description.trim().to_string(),
        category: category.to_string(),
        total_time_spent: 0,
        current_session_time: 0,
        is_running: false,
        last_start_time: None,
    });

    Ok(&data.tasks[data.tasks.len() - 1])
}

/// Flip a task between running and stopped. Stopping is the only place elapsed
/// time is committed: it lands in both `total_time_spent` and
/// `current_session_time`. Elapsed is clamped at zero so a clock regression
/// during a segment cannot shrink the totals. Returns false when the id is
/// unknown.
pub fn toggle_task(data: &mut AppData, id: i64, now_ms: i64) -> bool {
    let Some(task) = data.tasks.iter_mut().find(|task| task.id == id) else {
        return false;
    };

    if task.is_running {
        let elapsed = task
            .last_start_time
            .map(|started| (now_ms - started).max(0))
            .unwrap_or(0);
        task.total_time_spent += elapsed;
        task.current_session_time += elapsed;
        task.is_running = false;
        task.last_start_time = None;
    } else {
        task.is_running = true;
        task.last_start_time = Some(now_ms);
    }

    true
}

/// Zero the current session and stop the task. `total_time_spent` is
/// cumulative and survives resets. Returns false when the id is unknown.
pub fn reset_task(data: &mut AppData, id: i64) -> bool {
    let Some(task) = data.tasks.iter_mut().find(|task| task.id == id) else {
        return false;
    };

    task.current_session_time = 0;
    task.is_running = false;
    task.last_start_time = None;
    true
}

/// Remove a task permanently. Returns false when the id is unknown.
pub fn delete_task(data: &mut AppData, id: i64) -> bool {
    let before = data.tasks.len();
    data.tasks.retain(|task| task.id != id);
    data.tasks.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, category: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            name: name.to_string(),
            description: String::new(),
            category: category.to_string(),
        }
    }

    fn assert_invariant(data: &AppData) {
        for task in &data.tasks {
            assert_eq!(task.is_running, task.last_start_time.is_some());
        }
    }

    #[test]
    fn create_appends_with_zeroed_timers() {
        let mut data = AppData::default();
        let task = create_task(&mut data, &request("Write", "Work"), 1_000).unwrap();
        assert_eq!(task.name, "Write");
        assert_eq!(task.total_time_spent, 0);
        assert_eq!(task.current_session_time, 0);
        assert!(!task.is_running);
        assert_invariant(&data);
    }

    #[test]
    fn create_falls_back_to_category_when_name_blank() {
        let mut data = AppData::default();
        let task = create_task(&mut data, &request("  ", "Study"), 1_000).unwrap();
        assert_eq!(task.name, "Study");
        assert_eq!(task.category, "Study");
    }

    #[test]
    fn create_rejects_blank_name_and_category() {
        let mut data = AppData::default();
        let result = create_task(&mut data, &request("  ", ""), 1_000);
        assert_eq!(result.unwrap_err(), BlankTaskError);
        assert!(data.tasks.is_empty());
    }

    #[test]
    fn create_bumps_id_on_collision() {
        let mut data = AppData::default();
        let first = create_task(&mut data, &request("a", ""), 1_000).unwrap().id;
        let second = create_task(&mut data, &request("b", ""), 1_000).unwrap().id;
        assert_eq!(first, 1_000);
        assert_eq!(second, 1_001);
    }

    #[test]
    fn toggle_commits_elapsed_into_both_counters() {
        let mut data = AppData::default();
        let id = create_task(&mut data, &request("Write", ""), 0).unwrap().id;

        assert!(toggle_task(&mut data, id, 5_000));
        assert_invariant(&data);
        assert_eq!(data.tasks[0].last_start_time, Some(5_000));

        assert!(toggle_task(&mut data, id, 6_000));
        assert_invariant(&data);
        let task = &data.tasks[0];
        assert_eq!(task.total_time_spent, 1_000);
        assert_eq!(task.current_session_time, 1_000);
        assert!(!task.is_running);
        assert_eq!(task.last_start_time, None);
    }

    #[test]
    fn toggle_cycles_do_not_double_count() {
        let mut data = AppData::default();
        let id = create_task(&mut data, &request("Write", ""), 0).unwrap().id;

        toggle_task(&mut data, id, 1_000);
        toggle_task(&mut data, id, 1_500);
        toggle_task(&mut data, id, 2_000);
        toggle_task(&mut data, id, 2_250);

        let task = &data.tasks[0];
        assert_eq!(task.total_time_spent, 750);
        assert_eq!(task.current_session_time, 750);
        assert_invariant(&data);
    }

    #[test]
    fn toggle_clamps_clock_regression() {
        let mut data = AppData::default();
        let id = create_task(&mut data, &request("Write", ""), 0).unwrap().id;

        toggle_task(&mut data, id, 5_000);
        toggle_task(&mut data, id, 4_000);

        let task = &data.tasks[0];
        assert_eq!(task.total_time_spent, 0);
        assert_eq!(task.current_session_time, 0);
        assert_invariant(&data);
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let mut data = AppData::default();
        create_task(&mut data, &request("Write", ""), 0).unwrap();
        assert!(!toggle_task(&mut data, 99, 1_000));
        assert!(!data.tasks[0].is_running);
    }

    #[test]
    fn reset_zeroes_session_but_keeps_total() {
        let mut data = AppData::default();
        let id = create_task(&mut data, &request("Write", ""), 0).unwrap().id;
        toggle_task(&mut data, id, 1_000);
        toggle_task(&mut data, id, 2_000);

        assert!(reset_task(&mut data, id));
        let task = &data.tasks[0];
        assert_eq!(task.current_session_time, 0);
        assert_eq!(task.total_time_spent, 1_000);
        assert!(!task.is_running);
        assert_invariant(&data);
    }

    #[test]
    fn reset_stops_a_running_task() {
        let mut data = AppData::default();
        let id = create_task(&mut data, &request("Write", ""), 0).unwrap().id;
        toggle_task(&mut data, id, 1_000);

        assert!(reset_task(&mut data, id));
        assert!(!data.tasks[0].is_running);
        assert_eq!(data.tasks[0].last_start_time, None);
        assert_invariant(&data);
    }

    #[test]
    fn delete_removes_only_the_target() {
        let mut data = AppData::default();
        let first = create_task(&mut data, &request("a", ""), 0).unwrap().id;
        let second = create_task(&mut data, &request("b", ""), 1).unwrap().id;

        assert!(delete_task(&mut data, first));
        assert_eq!(data.tasks.len(), 1);
        assert_eq!(data.tasks[0].id, second);
    }

    #[test]
    fn delete_unknown_id_leaves_collection_unchanged() {
        let mut data = AppData::default();
        create_task(&mut data, &request("a", ""), 0).unwrap();
        assert!(!delete_task(&mut data, 42));
        assert_eq!(data.tasks.len(), 1);
    }
}
