use crate::image_classifier::interface::ClassifierError;
use std::path::Path;

/// Class names indexed by model output position, one per line of the labels file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Labels {
    names: Vec<String>,
}

impl Labels {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn parse(contents: &str) -> Self {
        Self::new(contents.lines().map(|line| line.trim().to_string()).collect())
    }

    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ClassifierError::ModelLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::parse(&contents))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn name(&self, index: usize) -> String {
        match self.names.get(index) {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("class_{}", index),
        }
    }
}
