//! Task planning: specs × models, with the model-id filter applied.

use arena_core::{resolve_models, CoreError, ExampleSpec, ModelDescriptor, Task};

/// Build the full task list for a run.
///
/// The filter is resolved first, so an unknown model id aborts before
/// any task exists. Output order is model-major — all of one model's
/// specs, then the next model's — which keeps interleaved log output
/// grouped when concurrency is 1.
pub fn plan(
    registry: &[ModelDescriptor],
    specs: &[ExampleSpec],
    model_filter: &[String],
) -> Result<Vec<Task>, CoreError> {
    let models = resolve_models(registry, model_filter)?;

    let mut tasks = Vec::with_capacity(models.len() * specs.len());
    for model in &models {
        for spec in specs {
            tasks.push(Task::new(model.clone(), spec.clone()));
        }
    }
    Ok(tasks)
}
