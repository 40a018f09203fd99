use crate::{
    context::Context,
    stage::{Stage, StageError},
};
use std::borrow::Cow;
use std::sync::Arc;

/// An ordered list of stages applied one after another.
#[derive(Clone)]
pub struct Pipeline {
    stages: Vec<Arc<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Arc<dyn Stage>>) -> Self {
        Self { stages }
    }

    pub fn push<T: Stage + 'static>(&mut self, stage: T) {
        self.stages.push(Arc::new(stage));
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn process<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        let mut current = text;

        for stage in &self.stages {
            // Fast path: skip if no mutation needed
            if !stage.needs_apply(&current, ctx)? {
                continue;
            }

            let before = current.len();
            current = stage.apply(current, ctx)?;
            tracing::trace!(stage = stage.name(), before, after = current.len(), "applied");
        }

        Ok(current)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.stage_names()).finish()
    }
}
